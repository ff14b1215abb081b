use html_escape::{encode_double_quoted_attribute, encode_text};
use scraper::{ElementRef, Node};

use super::dom::{self, Piece};
use super::markdown;
use crate::schema::Description;

const REPLACEMENTS: &[(&str, &str)] = &[
    ("\u{2019}", "'"),
    ("\u{2018}", "'"),
    ("\u{201c}", "\""),
    ("\u{201d}", "\""),
    ("\u{2014}", "-"),
    ("\u{2013}", "-"),
    ("More info on Sending Files »", ""),
];

/// Tags dropped from the serialized HTML so it embeds cleanly.
const STRIPPED_TAGS: &[&str] = &["<td>", "</td>", "<body>", "</body>"];

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Render a single element.
pub fn render_element(el: ElementRef<'_>) -> Description {
    render(&[Piece::Element(el)])
}

/// Render a run of sibling pieces as one description.
pub fn render(pieces: &[Piece<'_>]) -> Description {
    let mut text = String::new();
    let mut html = String::new();
    for piece in pieces {
        match piece {
            Piece::Element(el) => {
                text.extend(el.text());
                serialize_element(*el, &mut html);
            }
            Piece::Text(t) => {
                text.push_str(t);
                html.push_str(&encode_text(t));
            }
        }
    }

    let html = strip_tags(&html);
    let markdown = markdown::convert(&html);
    Description {
        plaintext: escape_plaintext(&text),
        html,
        markdown,
    }
}

/// Typographic cleanup of visible text.
pub fn escape_plaintext(text: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Route for an in-page anchor, or `None` if the link is left alone.
///
/// Hyphenated fragments are articles; otherwise the link text's case picks
/// method or type.
pub fn rewrite_href(href: &str, link_text: &str) -> Option<String> {
    let fragment = href.strip_prefix('#')?;
    if link_text.is_empty() {
        return None;
    }
    if href.contains('-') {
        let id = fragment.split('#').next().unwrap_or_default();
        Some(format!("#/articles/{}", id))
    } else if dom::starts_lowercase(link_text) {
        Some(format!("#/methods/{}", link_text))
    } else {
        Some(format!("#/types/{}", link_text))
    }
}

fn strip_tags(html: &str) -> String {
    STRIPPED_TAGS
        .iter()
        .fold(html.to_string(), |acc, tag| acc.replace(tag, ""))
}

fn serialize_element(el: ElementRef<'_>, out: &mut String) {
    let element = el.value();
    let name = element.name();

    let href = if name == "a" {
        element
            .attr("href")
            .and_then(|href| rewrite_href(href, &dom::text_of(el)))
    } else {
        None
    };

    // Sorted so output is stable across runs.
    let mut attrs: Vec<(&str, &str)> = element.attrs().collect();
    attrs.sort_unstable();

    out.push('<');
    out.push_str(name);
    for (key, value) in attrs {
        let value = match (&href, key) {
            (Some(routed), "href") => routed.as_str(),
            _ => value,
        };
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(value));
        out.push('"');
    }

    if VOID_ELEMENTS.contains(&name) {
        out.push_str("/>");
        return;
    }
    out.push('>');

    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&encode_text(&**text)),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    serialize_element(child, out);
                }
            }
            _ => {}
        }
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
