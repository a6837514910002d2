// crates/serve/src/render/sanitize.rs

//! Allow-list HTML sanitizer for user-authored rich text.

use super::escape::esc_url;
use crate::Error;
use lol_html::{comments, element, html_content::Element, HtmlRewriter, Settings};

/// Tags kept as-is (attributes still filtered).
pub const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "a", "strong", "b", "em", "i", "u", "s", "del", "ul", "ol", "li", "blockquote",
    "code", "pre", "h2", "h3", "h4", "h5", "h6", "hr", "span",
];

/// Tags dropped together with everything inside them. Raw-text and RCDATA
/// elements belong here: their content is passed through as text and would
/// become live markup once the wrapper is unwrapped. Foreign content
/// (`svg`, `math`) parses the same way.
pub const DROPPED_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "template", "textarea", "title", "xmp",
    "noscript", "noembed", "noframes", "plaintext", "svg", "math",
];

fn filter_element(el: &mut Element) {
    let tag = el.tag_name();

    if DROPPED_TAGS.contains(&tag.as_str()) {
        el.remove();
        return;
    }
    if !ALLOWED_TAGS.contains(&tag.as_str()) {
        el.remove_and_keep_content();
        return;
    }

    let names: Vec<String> = el.attributes().iter().map(|a| a.name()).collect();
    for name in names {
        let keep = match (tag.as_str(), name.as_str()) {
            (_, "title") => true,
            ("a", "href") => {
                let href = el.get_attribute("href").unwrap_or_default();
                match esc_url(&href) {
                    Some(clean) => el.set_attribute("href", &clean).is_ok(),
                    None => false,
                }
            }
            ("a", "target") => el.get_attribute("target").as_deref() == Some("_blank"),
            ("a", "rel") => true,
            _ => false,
        };
        if !keep {
            el.remove_attribute(&name);
        }
    }

    if tag == "a" && el.get_attribute("target").as_deref() == Some("_blank") {
        let _ = el.set_attribute("rel", "noopener noreferrer");
    }
}

/// Reduce `html` to the allow-listed subset.
#[tracing::instrument(skip_all)]
pub fn sanitize_rich_text(html: &str) -> Result<String, Error> {
    let mut out = Vec::with_capacity(html.len());

    let settings = Settings {
        element_content_handlers: vec![
            element!("*", |el| {
                filter_element(el);
                Ok(())
            }),
            comments!("*", |c| {
                c.remove();
                Ok(())
            }),
        ],
        ..Settings::default()
    };

    let mut rewriter = HtmlRewriter::new(settings, |chunk: &[u8]| out.extend_from_slice(chunk));
    rewriter
        .write(html.as_bytes())
        .map_err(|e| Error::LolHtml(e.to_string()))?;
    rewriter.end().map_err(|e| Error::LolHtml(e.to_string()))?;

    Ok(String::from_utf8(out)?)
}
