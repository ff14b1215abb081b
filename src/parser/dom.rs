//! Sibling navigation over the parsed page.
//!
//! `scraper` keeps the tree in an arena with parent/sibling links, so every
//! helper here is a walk along those links rather than a search from the root.

use scraper::{ElementRef, Node};

/// A piece of a content fragment: an element or a bare text node between elements.
#[derive(Debug, Clone, Copy)]
pub enum Piece<'a> {
    Element(ElementRef<'a>),
    Text(&'a str),
}

/// Concatenated visible text of an element and its descendants.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

pub fn is_heading(el: ElementRef<'_>) -> bool {
    matches!(el.value().name(), "h3" | "h4")
}

/// The next sibling that is an element, skipping text and comments.
pub fn next_element_sibling<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Nearest preceding sibling with the given tag name.
pub fn previous_sibling_named<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    el.prev_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sib| sib.value().name() == name)
}

/// First `table` following `el` before the next h3/h4.
pub fn section_table<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    for sib in el.next_siblings().filter_map(ElementRef::wrap) {
        if is_heading(sib) {
            return None;
        }
        if sib.value().name() == "table" {
            return Some(sib);
        }
    }
    None
}

/// `block` followed by every sibling node up to the next h3/h4.
pub fn section_pieces<'a>(block: ElementRef<'a>) -> Vec<Piece<'a>> {
    let mut pieces = vec![Piece::Element(block)];
    for node in block.next_siblings() {
        match node.value() {
            Node::Text(text) => pieces.push(Piece::Text(&**text)),
            Node::Element(_) => match ElementRef::wrap(node) {
                Some(sib) if is_heading(sib) => break,
                Some(sib) => pieces.push(Piece::Element(sib)),
                None => {}
            },
            _ => {}
        }
    }
    pieces
}

/// True when the first character is uppercase. Empty text is not.
pub fn starts_uppercase(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

pub fn starts_lowercase(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::*;

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        doc.select(&Selector::parse(css).unwrap()).next().unwrap()
    }

    #[test]
    fn next_element_skips_text() {
        let doc = Html::parse_document("<h4>getMe</h4>\n  <p>Body</p>");
        let heading = first(&doc, "h4");
        let block = next_element_sibling(heading).unwrap();
        assert_eq!(block.value().name(), "p");
    }

    #[test]
    fn previous_h3_is_nearest() {
        let doc = Html::parse_document(
            "<h3>First</h3><p>a</p><h3>Second</h3><h4>x</h4><p id=\"b\">b</p>",
        );
        let block = first(&doc, "p#b");
        let h3 = previous_sibling_named(block, "h3").unwrap();
        assert_eq!(text_of(h3), "Second");
    }

    #[test]
    fn table_lookup_stops_at_heading() {
        let doc = Html::parse_document(
            "<h4>A</h4><p id=\"a\">a</p><h4>B</h4><p>b</p><table><tr><td>x</td></tr></table>",
        );
        assert!(section_table(first(&doc, "p#a")).is_none());
    }

    #[test]
    fn pieces_run_until_heading() {
        let doc = Html::parse_document(
            "<h4>Title here</h4><p id=\"a\">one</p>\n<ul><li>two</li></ul><h4>Next</h4><p>x</p>",
        );
        let pieces = section_pieces(first(&doc, "p#a"));
        assert_eq!(pieces.len(), 3);
        assert!(matches!(pieces[1], Piece::Text("\n")));
        assert!(matches!(pieces[2], Piece::Element(el) if el.value().name() == "ul"));
    }

    #[test]
    fn case_checks() {
        assert!(starts_uppercase("Message"));
        assert!(!starts_uppercase("message"));
        assert!(!starts_uppercase(""));
        assert!(starts_lowercase("sendMessage"));
        assert!(!starts_lowercase("_x"));
    }
}
