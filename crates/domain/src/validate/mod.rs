pub mod email;
pub mod path;
pub mod site;
pub mod text;

pub use email::validate_email;
pub use path::validate_asset_ref;
pub use site::validate_web_url;
pub use text::{sanitize_text_field, sanitize_textarea_field, strip_tags};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("not a valid email address")]
    InvalidEmail,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("value is required")]
    Required,
}
