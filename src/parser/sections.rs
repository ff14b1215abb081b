use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::dom;
use crate::error::ParseError;

static HEADINGS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3, h4").unwrap());

const DEFERRED_CATEGORY: &str = "Recent changes";

/// Which document is being walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Reference,
    Changelog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Method,
    Type,
    Article,
    Changelog,
    Skipped,
}

/// A heading paired with the element right after it.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub title: String,
    pub heading: ElementRef<'a>,
    pub block: ElementRef<'a>,
    pub category: String,
}

/// Every h3/h4 in document order that has a content block.
pub fn segment(document: &Html) -> Result<Vec<Section<'_>>, ParseError> {
    let mut sections = Vec::new();

    for heading in document.select(&HEADINGS) {
        let title = dom::text_of(heading);
        let Some(block) = dom::next_element_sibling(heading) else {
            debug!("No content block after {:?}, skipping", title);
            continue;
        };
        let category = dom::previous_sibling_named(block, "h3")
            .map(dom::text_of)
            .ok_or_else(|| ParseError::MissingCategory(title.clone()))?;

        sections.push(Section {
            title,
            heading,
            block,
            category,
        });
    }

    Ok(sections)
}

/// Decide what a heading documents from the shape of its title.
///
/// Rule order matters: changelog mode, then spaces (articles), then the case
/// of the first character (methods are camelCase, types PascalCase).
pub fn classify(title: &str, category: &str, mode: Mode) -> SectionKind {
    if mode == Mode::Changelog {
        if !title.contains(' ') {
            debug!("Changelog heading {:?} has no space", title);
        }
        return SectionKind::Changelog;
    }

    if title.contains(' ') {
        if category.contains(DEFERRED_CATEGORY) {
            debug!("Changelog article {:?}, skipping to be added later", title);
            return SectionKind::Skipped;
        }
        return SectionKind::Article;
    }

    match title.chars().next() {
        None => {
            warn!("Empty heading under {:?}, skipping", category);
            SectionKind::Skipped
        }
        Some(c) if c.is_lowercase() => SectionKind::Method,
        Some(_) => SectionKind::Type,
    }
}

// ── Tests ──
