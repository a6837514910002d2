// crates/serve/src/render/escape.rs

//! Output-context escaping. Stored values are already sanitized; these only
//! make them safe for the spot they are interpolated into.

use std::borrow::Cow;
use url::Url;

/// Schemes allowed in any emitted `href`/`src`.
pub const LINK_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Escape text content.
pub fn esc_html(s: &str) -> Cow<'_, str> {
    html_escape::encode_text(s)
}

/// Escape a value for a double-quoted attribute.
pub fn esc_attr(s: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(s)
}

/// Validate and percent-encode a URL for use as an href/src.
///
/// Accepts absolute URLs with an allowed scheme, root-relative paths and
/// bare fragments. Anything else yields `None` and must not be emitted.
pub fn esc_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.starts_with('#') {
        return Some(local_ref("/", raw)?.trim_start_matches('/').to_string());
    }
    if raw.starts_with('/') && !raw.starts_with("//") {
        return local_ref("/", raw);
    }

    let url = Url::parse(raw).ok()?;
    if !LINK_SCHEMES.contains(&url.scheme()) {
        return None;
    }
    Some(url.to_string())
}

/// Normalise a host-less reference by resolving it against a throwaway base
/// and keeping everything from the path onwards.
fn local_ref(base_path: &str, raw: &str) -> Option<String> {
    let base = Url::parse("http://localhost").ok()?.join(base_path).ok()?;
    let url = base.join(raw).ok()?;
    if url.host_str() != Some("localhost") {
        return None;
    }
    Some(url[url::Position::BeforePath..].to_string())
}

/// `tel:` href from free-text phone; keeps only dialable characters.
pub fn tel_href(phone: &str) -> Option<String> {
    let dial: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    if !dial.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    esc_url(&format!("tel:{dial}"))
}

/// `mailto:` href from a stored (validated) email.
pub fn mailto_href(email: &str) -> Option<String> {
    esc_url(&format!("mailto:{}", email.trim()))
}
