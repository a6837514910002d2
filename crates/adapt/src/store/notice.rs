// crates/adapt/src/store/notice.rs

use super::StoreError;
use crate::io::{read_to_string_opt, write_atomic};
use async_trait::async_trait;
use domain::notice::Notice;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

pub const NOTICES_FILE: &str = "notices.json";

/// CRUD over admin notices. `list` returns store order; callers sort.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoticeStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Notice>, StoreError>;
    async fn get(&self, id: Uuid) -> Result<Option<Notice>, StoreError>;
    async fn insert(&self, notice: Notice) -> Result<(), StoreError>;
    /// Replace an existing notice (`NotFound` otherwise).
    async fn update(&self, notice: Notice) -> Result<(), StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

fn replace(notices: &mut [Notice], notice: Notice) -> Result<(), StoreError> {
    let slot = notices
        .iter_mut()
        .find(|n| n.id == notice.id)
        .ok_or(StoreError::NotFound(notice.id))?;
    *slot = notice;
    Ok(())
}

fn remove(notices: &mut Vec<Notice>, id: Uuid) -> Result<(), StoreError> {
    let before = notices.len();
    notices.retain(|n| n.id != id);
    if notices.len() == before {
        return Err(StoreError::NotFound(id));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON file
// ─────────────────────────────────────────────────────────────────────────────

/// `<data>/notices.json`: a JSON array re-read on every call.
#[derive(Debug)]
pub struct JsonNoticeStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonNoticeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<Notice>, StoreError> {
        match read_to_string_opt(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?
        {
            Some(s) if !s.trim().is_empty() => {
                serde_json::from_str(&s).map_err(|e| StoreError::corrupt(&self.path, e))
            }
            _ => Ok(Vec::new()),
        }
    }

    async fn save(&self, notices: &[Notice]) -> Result<(), StoreError> {
        let body =
            serde_json::to_vec_pretty(notices).map_err(|e| StoreError::corrupt(&self.path, e))?;
        write_atomic(&self.path, &body)
            .await
            .map_err(|e| StoreError::io(&self.path, e))
    }

    /// Load, mutate, save under the write lock.
    async fn modify<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Vec<Notice>) -> Result<(), StoreError> + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut notices = self.load().await?;
        f(&mut notices)?;
        self.save(&notices).await
    }
}

#[async_trait]
impl NoticeStore for JsonNoticeStore {
    #[tracing::instrument(skip_all)]
    async fn list(&self) -> Result<Vec<Notice>, StoreError> {
        self.load().await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Notice>, StoreError> {
        Ok(self.load().await?.into_iter().find(|n| n.id == id))
    }

    #[tracing::instrument(skip_all, fields(id = %notice.id))]
    async fn insert(&self, notice: Notice) -> Result<(), StoreError> {
        self.modify(move |all| {
            all.push(notice);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip_all, fields(id = %notice.id))]
    async fn update(&self, notice: Notice) -> Result<(), StoreError> {
        self.modify(move |all| replace(all, notice)).await
    }

    #[tracing::instrument(skip_all, fields(%id))]
    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.modify(move |all| remove(all, id)).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryNoticeStore {
    notices: RwLock<Vec<Notice>>,
}

impl MemoryNoticeStore {
    pub fn new(notices: Vec<Notice>) -> Self {
        Self {
            notices: RwLock::new(notices),
        }
    }
}

#[async_trait]
impl NoticeStore for MemoryNoticeStore {
    async fn list(&self) -> Result<Vec<Notice>, StoreError> {
        Ok(self.notices.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Notice>, StoreError> {
        Ok(self.notices.read().await.iter().find(|n| n.id == id).cloned())
    }

    async fn insert(&self, notice: Notice) -> Result<(), StoreError> {
        self.notices.write().await.push(notice);
        Ok(())
    }

    async fn update(&self, notice: Notice) -> Result<(), StoreError> {
        replace(&mut self.notices.write().await, notice)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        remove(&mut *self.notices.write().await, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::notice::NoticeDraft;
    use tempfile::tempdir;

    fn notice(title: &str) -> Notice {
        Notice::new(
            NoticeDraft {
                title: title.into(),
                body: "body".into(),
            },
            "alice",
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn json_store_crud() {
        let dir = tempdir().unwrap();
        let store = JsonNoticeStore::new(dir.path().join(NOTICES_FILE));
        assert!(store.list().await.unwrap().is_empty());

        let mut n = notice("First");
        store.insert(n.clone()).await.unwrap();
        store.insert(notice("Second")).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 2);

        n.title = "First (edited)".into();
        store.update(n.clone()).await.unwrap();
        assert_eq!(store.get(n.id).await.unwrap().unwrap().title, "First (edited)");

        // survives a new handle
        let reopened = JsonNoticeStore::new(store.path());
        assert_eq!(reopened.list().await.unwrap().len(), 2);

        store.delete(n.id).await.unwrap();
        assert!(store.get(n.id).await.unwrap().is_none());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let dir = tempdir().unwrap();
        let store = JsonNoticeStore::new(dir.path().join(NOTICES_FILE));
        let ghost = notice("ghost");

        assert!(matches!(
            store.update(ghost.clone()).await,
            Err(StoreError::NotFound(id)) if id == ghost.id
        ));
        assert!(matches!(
            store.delete(ghost.id).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn corrupt_json_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(NOTICES_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonNoticeStore::new(path).list().await,
            Err(StoreError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn memory_store_crud() {
        let store = MemoryNoticeStore::default();
        let n = notice("One");
        store.insert(n.clone()).await.unwrap();
        assert_eq!(store.get(n.id).await.unwrap(), Some(n.clone()));
        store.delete(n.id).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }
}
