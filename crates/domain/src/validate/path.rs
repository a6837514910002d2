use super::{site::validate_web_url, ValidationError};
use regex::Regex;
use std::sync::LazyLock;

static SAFE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9/._~%+@-]+$").unwrap());
static HAS_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:").unwrap());

/// A logo reference is either an absolute http(s) URL or a path that will be
/// resolved against the configured base at render time.
#[tracing::instrument(skip_all)]
pub fn validate_asset_ref(s: &str) -> Result<String, ValidationError> {
    let s = s.trim();

    if HAS_SCHEME.is_match(s) {
        return validate_web_url(s).map(|u| u.to_string());
    }

    if s.starts_with("//") {
        return Err(ValidationError::InvalidPath(
            "protocol-relative references are not allowed".into(),
        ));
    }
    if !SAFE_PATH.is_match(s) {
        return Err(ValidationError::InvalidPath(
            "path contains unsupported characters".into(),
        ));
    }
    if s.split('/').any(|seg| seg == "..") {
        return Err(ValidationError::InvalidPath(
            "parent segments are not allowed".into(),
        ));
    }

    Ok(s.to_string())
}
