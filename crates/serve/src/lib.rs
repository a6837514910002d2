pub mod registry;
pub mod render;
pub mod shortcode;

use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("template error: {0}")]
    Template(String),

    #[error("handlebars error: {0}")]
    Handlebars(#[from] handlebars::RenderError),

    #[error("lol_html error: {0}")]
    LolHtml(String),

    #[error("FromUTF8 error: {0}")]
    FromUTF8(#[from] FromUtf8Error),

    /// A backing store could not be read; nothing should be rendered.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl From<handlebars::TemplateError> for Error {
    fn from(e: handlebars::TemplateError) -> Self {
        Error::Template(e.to_string())
    }
}
