use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::arguments;
use super::description;
use super::dom;
use super::returns;
use super::sections::Section;
use crate::error::ParseError;
use crate::schema::{Article, ChangelogEntry, Method, Type};

static STRONG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("strong").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

const VERSION_PREFIX: &str = "Bot API ";
/// The page header reads "Recent changes", a date, then "Bot API X.Y".
const VERSION_STRONG_INDEX: usize = 2;

/// Version string from the reference page header.
pub fn version(document: &Html) -> Result<String, ParseError> {
    document
        .select(&STRONG)
        .nth(VERSION_STRONG_INDEX)
        .map(|strong| strip_version_prefix(&dom::text_of(strong)))
        .ok_or(ParseError::MissingVersion)
}

fn strip_version_prefix(text: &str) -> String {
    text.strip_prefix(VERSION_PREFIX).unwrap_or(text).to_string()
}

pub fn method(section: &Section<'_>) -> Result<Method, ParseError> {
    let arguments = arguments::determine_arguments(section.block, &section.title)?
        .ok_or_else(|| ParseError::MissingTable(section.title.clone()))?;

    Ok(Method {
        arguments,
        returns: returns::determine_return(section.block),
        description: description::render_element(section.block),
        category: section.category.clone(),
    })
}

/// A type without a table holds no fields.
pub fn type_(section: &Section<'_>) -> Result<Type, ParseError> {
    let fields = arguments::determine_arguments(section.block, &section.title)?.unwrap_or_default();

    Ok(Type {
        fields,
        description: description::render_element(section.block),
        category: section.category.clone(),
    })
}

/// Returns the anchor id the article is keyed by, and the article.
pub fn article(section: &Section<'_>) -> Result<(String, Article), ParseError> {
    let id = section
        .heading
        .select(&ANCHOR)
        .next()
        .and_then(|a| a.value().attr("name"))
        .ok_or_else(|| ParseError::MissingAnchor(section.title.clone()))?
        .to_string();

    let article = Article {
        content: description::render(&dom::section_pieces(section.block)),
        title: section.title.clone(),
        category: section.category.clone(),
    };
    Ok((id, article))
}

/// Version comes from a leading "Bot API X.Y" in bold, else the heading.
pub fn changelog(section: &Section<'_>) -> ChangelogEntry {
    let version = section
        .block
        .select(&STRONG)
        .next()
        .map(dom::text_of)
        .and_then(|text| text.strip_prefix(VERSION_PREFIX).map(str::to_string))
        .unwrap_or_else(|| section.title.clone());

    ChangelogEntry {
        content: description::render(&dom::section_pieces(section.block)),
        version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::sections::segment;

    fn with_sections<T>(html: &str, f: impl FnOnce(&[Section<'_>]) -> T) -> T {
        let doc = Html::parse_document(html);
        let sections = segment(&doc).unwrap();
        f(&sections)
    }

    #[test]
    fn version_is_third_strong() {
        let doc = Html::parse_document(
            "<p><strong>Recent changes</strong></p><p><strong>March 31, 2024</strong></p>\
             <p><strong>Bot API 7.2</strong></p>",
        );
        assert_eq!(version(&doc).unwrap(), "7.2");
    }

    #[test]
    fn missing_version_is_fatal() {
        let doc = Html::parse_document("<p><strong>Only one</strong></p>");
        assert!(matches!(version(&doc), Err(ParseError::MissingVersion)));
    }

    #[test]
    fn method_without_table_is_fatal() {
        let html = "<h3>Available methods</h3><h4>doThing</h4><p>Does a thing.</p>";
        let err = with_sections(html, |s| method(&s[1]).unwrap_err());
        assert!(matches!(err, ParseError::MissingTable(t) if t == "doThing"));
    }

    #[test]
    fn type_without_table_has_no_fields() {
        let html = "<h3>Available types</h3><h4>CallbackGame</h4>\
                    <p>A placeholder, currently holds no information.</p>";
        let t = with_sections(html, |s| type_(&s[1]).unwrap());
        assert!(t.fields.is_empty());
        assert_eq!(t.category, "Available types");
    }

    #[test]
    fn article_spans_until_next_heading() {
        let html = "<h3>Making requests</h3>\
                    <h4><a class=\"anchor\" name=\"making-requests\" href=\"#making-requests\"></a>Making requests</h4>\
                    <p>All queries must be served over HTTPS.</p>\
                    <ul><li>GET and POST are supported</li></ul>\
                    <h4>getMe</h4><p>Requires no parameters.</p>";
        let (id, article) = with_sections(html, |s| article(&s[1]).unwrap());
        assert_eq!(id, "making-requests");
        assert_eq!(article.title, "Making requests");
        assert_eq!(article.category, "Making requests");
        assert_eq!(
            article.content.plaintext,
            "All queries must be served over HTTPS.GET and POST are supported"
        );
        assert_eq!(
            article.content.markdown,
            "All queries must be served over HTTPS.\n\n- GET and POST are supported"
        );
    }

    #[test]
    fn article_without_anchor_is_fatal() {
        let html = "<h3>Intro</h3><h4>Some article</h4><p>text</p>";
        let err = with_sections(html, |s| article(&s[1]).unwrap_err());
        assert!(matches!(err, ParseError::MissingAnchor(_)));
    }

    #[test]
    fn changelog_version_from_strong_or_title() {
        let html = "<h3>Recent changes</h3>\
                    <h4>March 31, 2024</h4><p><strong>Bot API 7.2</strong></p><ul><li>Added things.</li></ul>\
                    <h4>June 2015</h4><p>Inline mode <strong>was added</strong>.</p>";
        let (first, second) = with_sections(html, |s| (changelog(&s[1]), changelog(&s[2])));
        assert_eq!(first.version, "7.2");
        assert!(first.content.plaintext.contains("Added things."));
        assert_eq!(second.version, "June 2015");
    }
}
