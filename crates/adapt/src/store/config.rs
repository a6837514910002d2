// crates/adapt/src/store/config.rs

use super::StoreError;
use crate::io::{read_to_string_opt, write_atomic};
use async_trait::async_trait;
use domain::{
    contact::{sanitize, ContactConfig, ContactField, ContactInput, SaveOutcome},
    setting::{ConfigSource, ContactSettings},
};
use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::sync::{Mutex, RwLock};

pub const CONTACT_FILE: &str = "contact.toml";

/// One named support-contact record.
///
/// Implementations sanitize on `set`; `get` never caches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get(&self) -> Result<ContactConfig, StoreError>;

    /// Sanitize `input` on top of the current record and persist the result.
    /// Returns what was stored plus any per-field rejections.
    async fn set(&self, input: ContactInput) -> Result<SaveOutcome, StoreError>;

    fn is_writable(&self) -> bool;
}

/// Pick the backend named by `[contact] source`.
pub fn open_config_store(settings: &ContactSettings, data_dir: &Path) -> Arc<dyn ConfigStore> {
    let path = data_dir.join(CONTACT_FILE);
    match settings.source {
        ConfigSource::Settings => Arc::new(TomlConfigStore::new(path)),
        ConfigSource::Environment => Arc::new(EnvConfigStore::from_env()),
        ConfigSource::Layered => Arc::new(LayeredConfigStore::new(
            TomlConfigStore::new(path),
            EnvConfigStore::from_env(),
        )),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TOML file
// ─────────────────────────────────────────────────────────────────────────────

/// `<data>/contact.toml`, rewritten atomically on every save.
#[derive(Debug)]
pub struct TomlConfigStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TomlConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigStore for TomlConfigStore {
    #[tracing::instrument(skip_all, fields(path = %self.path.display()))]
    async fn get(&self) -> Result<ContactConfig, StoreError> {
        let Some(s) = read_to_string_opt(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?
        else {
            return Ok(ContactConfig::default());
        };
        toml::from_str(&s).map_err(|e| StoreError::corrupt(&self.path, e))
    }

    #[tracing::instrument(skip_all, fields(path = %self.path.display()))]
    async fn set(&self, input: ContactInput) -> Result<SaveOutcome, StoreError> {
        let _guard = self.write_lock.lock().await;

        let previous = self.get().await?;
        let outcome = sanitize(&input, &previous);

        let body = toml::to_string_pretty(&outcome.config)
            .map_err(|e| StoreError::corrupt(&self.path, e))?;
        write_atomic(&self.path, body.as_bytes())
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        tracing::info!(rejected = outcome.rejected.len(), "contact details saved");
        Ok(outcome)
    }

    fn is_writable(&self) -> bool {
        true
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Environment
// ─────────────────────────────────────────────────────────────────────────────

/// Variable name per field.
pub fn env_var(field: ContactField) -> &'static str {
    match field {
        ContactField::CompanyName => "SUPPORT_COMPANY_NAME",
        ContactField::Logo => "SUPPORT_LOGO_PATH",
        ContactField::Email => "SUPPORT_EMAIL",
        ContactField::Phone => "SUPPORT_PHONE",
        ContactField::Website => "SUPPORT_WEBSITE",
    }
}

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Read-only record built from `SUPPORT_*` variables on every read.
#[derive(Clone)]
pub struct EnvConfigStore {
    lookup: Lookup,
}

impl fmt::Debug for EnvConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvConfigStore").finish_non_exhaustive()
    }
}

impl EnvConfigStore {
    pub fn from_env() -> Self {
        Self::with_lookup(|key| std::env::var(key).ok())
    }

    /// Use a custom variable source.
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    fn read(&self) -> ContactConfig {
        let input = ContactField::ALL
            .into_iter()
            .fold(ContactInput::default(), |input, field| {
                match (self.lookup)(env_var(field)) {
                    Some(v) => input.with(field, v),
                    None => input,
                }
            });

        let outcome = sanitize(&input, &ContactConfig::default());
        for r in &outcome.rejected {
            tracing::warn!(var = env_var(r.field), reason = %r.reason, "ignoring invalid environment value");
        }
        outcome.config
    }
}

#[async_trait]
impl ConfigStore for EnvConfigStore {
    async fn get(&self) -> Result<ContactConfig, StoreError> {
        Ok(self.read())
    }

    async fn set(&self, _input: ContactInput) -> Result<SaveOutcome, StoreError> {
        Err(StoreError::ReadOnly)
    }

    fn is_writable(&self) -> bool {
        false
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Layered
// ─────────────────────────────────────────────────────────────────────────────

/// Saved values win field by field; the environment fills the gaps.
#[derive(Debug)]
pub struct LayeredConfigStore {
    saved: TomlConfigStore,
    defaults: EnvConfigStore,
}

impl LayeredConfigStore {
    pub fn new(saved: TomlConfigStore, defaults: EnvConfigStore) -> Self {
        Self { saved, defaults }
    }
}

#[async_trait]
impl ConfigStore for LayeredConfigStore {
    async fn get(&self) -> Result<ContactConfig, StoreError> {
        let saved = self.saved.get().await?;
        let defaults = self.defaults.get().await?;
        Ok(saved.overlay(&defaults))
    }

    /// Writes the saved layer only; the returned config is that layer.
    async fn set(&self, input: ContactInput) -> Result<SaveOutcome, StoreError> {
        self.saved.set(input).await
    }

    fn is_writable(&self) -> bool {
        true
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    config: RwLock<ContactConfig>,
}

impl MemoryConfigStore {
    pub fn new(config: ContactConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn get(&self) -> Result<ContactConfig, StoreError> {
        Ok(self.config.read().await.clone())
    }

    async fn set(&self, input: ContactInput) -> Result<SaveOutcome, StoreError> {
        let mut guard = self.config.write().await;
        let outcome = sanitize(&input, &guard);
        *guard = outcome.config.clone();
        Ok(outcome)
    }

    fn is_writable(&self) -> bool {
        true
    }
}
