pub mod config;
pub mod notice;

use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

pub use config::{
    open_config_store, ConfigStore, EnvConfigStore, LayeredConfigStore, MemoryConfigStore,
    TomlConfigStore,
};
pub use notice::{JsonNoticeStore, MemoryNoticeStore, NoticeStore};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file or service could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Data was read but could not be decoded.
    #[error("store data corrupt: {0}")]
    Corrupt(String),

    #[error("store is read-only")]
    ReadOnly,

    #[error("record not found: {0}")]
    NotFound(Uuid),
}

impl StoreError {
    pub(crate) fn io(path: &Path, e: std::io::Error) -> Self {
        StoreError::Unavailable(format!("{}: {e}", path.display()))
    }

    pub(crate) fn corrupt(path: &Path, e: impl std::fmt::Display) -> Self {
        StoreError::Corrupt(format!("{}: {e}", path.display()))
    }
}

impl From<StoreError> for serve::Error {
    fn from(e: StoreError) -> Self {
        serve::Error::Unavailable(e.to_string())
    }
}
