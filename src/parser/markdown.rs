use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node};

use super::dom;

static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Convert an HTML fragment to markdown, entity-unescaped.
///
/// Tables have no markdown form here and are kept as raw HTML. Text is
/// re-escaped on the way out so the final unescape runs exactly once.
pub fn convert(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::new();
    convert_children(fragment.root_element(), &mut out);
    let collapsed = BLANK_LINES.replace_all(out.trim(), "\n\n");
    html_escape::decode_html_entities(&collapsed).into_owned()
}

fn convert_children(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&escaped(text)),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    convert_element(child, out);
                }
            }
            _ => {}
        }
    }
}

fn escaped(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

fn inline(el: ElementRef<'_>) -> String {
    let mut s = String::new();
    convert_children(el, &mut s);
    s
}

fn block(out: &mut String, body: &str) {
    out.push_str("\n\n");
    out.push_str(body.trim());
    out.push_str("\n\n");
}

fn wrap(out: &mut String, marker: &str, body: &str) {
    if body.trim().is_empty() {
        out.push_str(body);
        return;
    }
    out.push_str(marker);
    out.push_str(body);
    out.push_str(marker);
}

fn convert_element(el: ElementRef<'_>, out: &mut String) {
    let element = el.value();
    match element.name() {
        "p" => block(out, &inline(el)),
        name @ ("h1" | "h2" | "h3" | "h4" | "h5" | "h6") => {
            let level = name[1..].parse::<usize>().unwrap_or(1);
            block(out, &format!("{} {}", "#".repeat(level), inline(el).trim()));
        }
        "strong" | "b" => wrap(out, "**", &inline(el)),
        "em" | "i" => wrap(out, "*", &inline(el)),
        "code" => wrap(out, "`", &escaped(&dom::text_of(el))),
        "pre" => {
            let code = escaped(&dom::text_of(el));
            let indented: Vec<String> = code
                .trim_end()
                .lines()
                .map(|line| format!("    {}", line))
                .collect();
            // Not `block`: trimming would eat the indent.
            out.push_str("\n\n");
            out.push_str(&indented.join("\n"));
            out.push_str("\n\n");
        }
        "a" => {
            let text = inline(el);
            match element.attr("href") {
                Some(href) => {
                    out.push('[');
                    out.push_str(&text);
                    out.push_str("](");
                    out.push_str(&escaped(href));
                    out.push(')');
                }
                None => out.push_str(&text),
            }
        }
        "img" => {
            let alt = element.attr("alt").unwrap_or_default();
            let src = element.attr("src").unwrap_or_default();
            out.push_str(&format!("![{}]({})", escaped(alt), escaped(src)));
        }
        "br" => out.push_str("  \n"),
        "hr" => block(out, "---"),
        kind @ ("ul" | "ol") => {
            let items: Vec<String> = el
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|child| child.value().name() == "li")
                .enumerate()
                .map(|(i, li)| {
                    let bullet = if kind == "ol" {
                        format!("{}.", i + 1)
                    } else {
                        "-".to_string()
                    };
                    format!("{} {}", bullet, inline(li).trim())
                })
                .collect();
            block(out, &items.join("\n"));
        }
        "blockquote" => {
            let inner = inline(el);
            let quoted: Vec<String> = inner
                .trim()
                .lines()
                .map(|line| format!("> {}", line.trim()))
                .collect();
            block(out, &quoted.join("\n"));
        }
        "table" => block(out, &el.html()),
        _ => convert_children(el, out),
    }
}
