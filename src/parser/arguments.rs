use std::sync::LazyLock;

use indexmap::IndexMap;
use scraper::{ElementRef, Selector};

use super::description;
use super::dom;
use crate::error::ParseError;
use crate::schema::Argument;

static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

const NO_PARAMETERS: &str = "requires no parameters";
const ARRAY_PREFIX: &str = "Array of ";
const TYPE_OVERRIDES: &[(&str, &str)] = &[("String", "str"), ("Integer", "int"), ("Boolean", "bool")];

/// Arguments (or fields) documented for the entry whose content block is `block`.
///
/// `Ok(None)` means there is neither a "requires no parameters" note nor a
/// table before the next heading; the caller decides whether that is fatal.
pub fn determine_arguments(
    block: ElementRef<'_>,
    heading: &str,
) -> Result<Option<IndexMap<String, Argument>>, ParseError> {
    if requires_no_parameters(block) {
        return Ok(Some(IndexMap::new()));
    }
    match dom::section_table(block) {
        Some(table) => parse_table(table, heading).map(Some),
        None => Ok(None),
    }
}

pub fn requires_no_parameters(block: ElementRef<'_>) -> bool {
    dom::text_of(block).to_lowercase().contains(NO_PARAMETERS)
}

/// One argument per row after the header row, in table order.
pub fn parse_table(
    table: ElementRef<'_>,
    heading: &str,
) -> Result<IndexMap<String, Argument>, ParseError> {
    let mut arguments = IndexMap::new();

    for (index, row) in table.select(&ROW).enumerate().skip(1) {
        let cells: Vec<ElementRef> = row.select(&CELL).collect();
        if cells.len() < 3 {
            return Err(ParseError::UnexpectedColumns {
                heading: heading.to_string(),
                row: index,
                cells: cells.len(),
            });
        }

        let last = cells[cells.len() - 1];
        // Method tables carry a Required column; field tables mark optional
        // entries in the description instead.
        let required = if cells.len() == 4 {
            dom::text_of(cells[2]) == "Yes"
        } else {
            !dom::text_of(last).starts_with("Optional.")
        };

        arguments.insert(
            dom::text_of(cells[0]),
            Argument {
                types: parse_types(&dom::text_of(cells[1])),
                description: description::render_element(last),
                required,
            },
        );
    }

    Ok(arguments)
}

/// Split an "A or B" expression and normalize each alternative.
pub fn parse_types(expr: &str) -> Vec<String> {
    expr.split(" or ")
        .map(|part| normalize_type(part.trim()))
        .collect()
}

/// `Array of X` becomes `array(X')`; primitives map to short names.
pub fn normalize_type(name: &str) -> String {
    if let Some(inner) = name.strip_prefix(ARRAY_PREFIX) {
        return format!("array({})", normalize_type(inner));
    }
    TYPE_OVERRIDES
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| name.to_string())
}
