use adapt::StoreError;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serve::Error as ServeError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serve error: {0}")]
    Serve(#[from] ServeError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    #[error("not found")]
    NotFound,
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound | Error::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Error::Store(StoreError::ReadOnly) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match &self {
            Error::Forbidden(why) => why.to_string(),
            Error::NotFound | Error::Store(StoreError::NotFound(_)) => "Not found.".to_string(),
            Error::Store(StoreError::ReadOnly) => {
                "Contact details are read-only on this site.".to_string()
            }
            _ => {
                // details stay in the log, never in the page
                tracing::error!(error = %self, "request failed");
                "Something went wrong. Please try again later.".to_string()
            }
        };
        (status, Html(format!("<p>{msg}</p>"))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_store_errors_to_status() {
        assert_eq!(
            Error::Store(StoreError::ReadOnly).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            Error::Store(StoreError::NotFound(uuid::Uuid::nil())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::Store(StoreError::Corrupt("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::Serve(ServeError::Unavailable("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(Error::Forbidden("no").status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn unavailable_page_hides_details() {
        let resp = Error::Store(StoreError::Unavailable("/secret/path: EIO".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
