use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use super::dom;

static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static EMPHASIS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("em").unwrap());

/// Guess a method's return type from its prose.
///
/// Links are scanned from the end and every qualifying link overwrites the
/// candidate, so the earliest qualifying link in the document wins. Historical
/// schema files depend on this exact tie-break.
pub fn determine_return(block: ElementRef<'_>) -> Option<String> {
    let text = dom::text_of(block);
    let is_array = text.to_lowercase().contains("array");
    let sentences: Vec<String> = text.split('.').map(str::to_lowercase).collect();

    let mut links: Vec<ElementRef> = block.select(&LINK).collect();
    links.reverse();

    let mut return_type = None;
    for link in links {
        let link_text = dom::text_of(link);
        if !dom::starts_uppercase(&link_text) {
            continue;
        }
        let needle = link_text.to_lowercase();
        for sentence in &sentences {
            if sentence.contains(&needle) && sentence.contains("return") {
                return_type = Some(link_text.clone());
            }
        }
    }

    match return_type {
        Some(found) if is_array => Some(format!("array({})", found)),
        Some(found) => Some(found),
        None => block
            .select(&EMPHASIS)
            .map(dom::text_of)
            .find(|t| dom::starts_uppercase(t)),
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    fn infer(html: &str) -> Option<String> {
        let doc = Html::parse_document(html);
        let block = doc
            .select(&Selector::parse("p").unwrap())
            .next()
            .unwrap();
        determine_return(block)
    }

    #[test]
    fn single_link() {
        assert_eq!(
            infer(r##"<p>Returns a <a href="#message">Message</a> object.</p>"##).as_deref(),
            Some("Message")
        );
    }

    #[test]
    fn array_anywhere_wraps() {
        assert_eq!(
            infer(r##"<p>Returns a <a href="#message">Message</a> object. Sends an array of things.</p>"##)
                .as_deref(),
            Some("array(Message)")
        );
    }

    #[test]
    fn first_qualifying_link_wins() {
        let html = r##"<p>On success, the <a href="#chat">Chat</a> is returned,
            otherwise a <a href="#user">User</a> is returned.</p>"##;
        assert_eq!(infer(html).as_deref(), Some("Chat"));
    }

    #[test]
    fn link_outside_return_sentence_is_ignored() {
        let html = r##"<p>Uses <a href="#update">Update</a> objects. Returns <em>True</em> on success.</p>"##;
        assert_eq!(infer(html).as_deref(), Some("True"));
    }

    #[test]
    fn lowercase_links_are_ignored() {
        let html = r##"<p>Like <a href="#getme">getMe</a>, returns basic info.</p>"##;
        assert_eq!(infer(html), None);
    }

    #[test]
    fn emphasis_fallback_is_not_array_wrapped() {
        let html = r#"<p>Returns an array of results. Returns <em>Int</em> on success.</p>"#;
        assert_eq!(infer(html).as_deref(), Some("Int"));
    }
}
