// crates/serve/src/shortcode.rs

//! `[tag attr="v"]` placeholders in page content.
//!
//! Only self-contained tags are recognised. `[[tag]]` renders as the literal
//! `[tag]`, and tags without a registered handler are left verbatim.

use crate::{registry::Shortcode, Error};
use regex::Regex;
use std::{
    collections::{BTreeMap, HashMap},
    ops::Range,
    sync::{Arc, LazyLock},
};

pub type ShortcodeAttrs = BTreeMap<String, String>;

static SHORTCODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\[?)([A-Za-z][A-Za-z0-9_-]*)((?:\s+[^\[\]]*)?)\](\]?)")
        .expect("shortcode regex")
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][A-Za-z0-9_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"']+))"#)
        .expect("shortcode attribute regex")
});

/// Parse `a="1" b='2' c=3` into a map with lowercased keys. Later
/// duplicates win; bare words are ignored.
pub fn parse_attrs(raw: &str) -> ShortcodeAttrs {
    ATTR_RE
        .captures_iter(raw)
        .filter_map(|c| {
            let key = c.get(1)?.as_str().to_ascii_lowercase();
            let val = c.get(2).or_else(|| c.get(3)).or_else(|| c.get(4))?;
            Some((key, val.as_str().to_string()))
        })
        .collect()
}

/// One placeholder found in content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcodeMatch {
    pub range: Range<usize>,
    pub tag: String,
    pub attrs: ShortcodeAttrs,
    /// Surrounding `[` / `]` not part of the tag itself.
    pub open: &'static str,
    pub close: &'static str,
}

impl ShortcodeMatch {
    pub fn is_escaped(&self) -> bool {
        !self.open.is_empty() && !self.close.is_empty()
    }
}

/// All placeholders, in document order. Owned so callers can await
/// between them.
pub fn scan(content: &str) -> Vec<ShortcodeMatch> {
    SHORTCODE_RE
        .captures_iter(content)
        .filter_map(|c| {
            let whole = c.get(0)?;
            Some(ShortcodeMatch {
                range: whole.range(),
                tag: c.get(2)?.as_str().to_ascii_lowercase(),
                attrs: parse_attrs(c.get(3).map_or("", |m| m.as_str())),
                open: if c.get(1).is_some_and(|m| !m.is_empty()) { "[" } else { "" },
                close: if c.get(4).is_some_and(|m| !m.is_empty()) { "]" } else { "" },
            })
        })
        .collect()
}

/// Replace every registered placeholder with its handler's output.
#[tracing::instrument(skip_all)]
pub async fn expand(
    content: &str,
    handlers: &HashMap<String, Arc<dyn Shortcode>>,
) -> Result<String, Error> {
    let mut out = String::with_capacity(content.len());
    let mut last = 0;

    for m in scan(content) {
        out.push_str(&content[last..m.range.start]);
        last = m.range.end;

        let original = &content[m.range.clone()];
        let Some(handler) = handlers.get(&m.tag) else {
            out.push_str(original);
            continue;
        };

        if m.is_escaped() {
            out.push_str(&original[1..original.len() - 1]);
            continue;
        }

        tracing::debug!(tag = %m.tag, "expanding shortcode");
        let rendered = handler.render(&m.attrs).await?;
        out.push_str(m.open);
        out.push_str(&rendered);
        out.push_str(m.close);
    }

    out.push_str(&content[last..]);
    Ok(out)
}
