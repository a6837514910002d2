// crates/adapt/src/inbox.rs

use crate::store::StoreError;
use domain::message::ContactMessage;
use std::path::{Path, PathBuf};
use tokio::{
    fs::OpenOptions,
    io::AsyncWriteExt,
    sync::Mutex,
};

pub const MESSAGES_FILE: &str = "messages.jsonl";

/// Append-only log of contact form messages, one JSON object per line.
#[derive(Debug)]
pub struct MessageLog {
    path: PathBuf,
    append_lock: Mutex<()>,
}

impl MessageLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[tracing::instrument(skip_all, fields(id = %message.id))]
    pub async fn append(&self, message: &ContactMessage) -> Result<(), StoreError> {
        let mut line =
            serde_json::to_string(message).map_err(|e| StoreError::corrupt(&self.path, e))?;
        line.push('\n');

        let _guard = self.append_lock.lock().await;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(&self.path, e))?;
        }
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;
        f.write_all(line.as_bytes())
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;
        f.sync_data().await.map_err(|e| StoreError::io(&self.path, e))?;

        tracing::info!("contact message stored");
        Ok(())
    }

    /// All stored messages, oldest first.
    pub async fn read_all(&self) -> Result<Vec<ContactMessage>, StoreError> {
        let Some(s) = crate::io::read_to_string_opt(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?
        else {
            return Ok(Vec::new());
        };
        s.lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).map_err(|e| StoreError::corrupt(&self.path, e)))
            .collect()
    }
}
