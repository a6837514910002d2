// crates/adapt/src/feed.rs

use crate::store::{NoticeStore, StoreError};
use domain::notice::{sort_newest_first, Notice};
use std::sync::Arc;

/// Read-side query for the dashboard feed. Every call hits the store.
#[derive(Clone)]
pub struct NoticeFeed {
    store: Arc<dyn NoticeStore>,
}

impl NoticeFeed {
    pub fn new(store: Arc<dyn NoticeStore>) -> Self {
        Self { store }
    }

    /// Up to `limit` notices, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<Notice>, StoreError> {
        let mut notices = self.store.list().await?;
        sort_newest_first(&mut notices);
        notices.truncate(limit);
        Ok(notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::notice::MockNoticeStore;
    use chrono::{Duration, TimeZone, Utc};
    use domain::notice::{NoticeDraft, FEED_LIMIT};

    fn notices(n: usize) -> Vec<Notice> {
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                Notice::new(
                    NoticeDraft {
                        title: format!("n{i}"),
                        body: String::new(),
                    },
                    "alice",
                    base + Duration::days(i as i64),
                )
            })
            .collect()
    }

    fn feed_over(all: Vec<Notice>) -> NoticeFeed {
        let mut store = MockNoticeStore::new();
        store.expect_list().returning(move || Ok(all.clone()));
        NoticeFeed::new(Arc::new(store))
    }

    #[tokio::test]
    async fn returns_five_newest_descending() {
        let feed = feed_over(notices(8));
        let got = feed.list_recent(FEED_LIMIT).await.unwrap();
        let titles: Vec<_> = got.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["n7", "n6", "n5", "n4", "n3"]);
    }

    #[tokio::test]
    async fn fewer_than_limit_returns_all() {
        let feed = feed_over(notices(3));
        let got = feed.list_recent(FEED_LIMIT).await.unwrap();
        let titles: Vec<_> = got.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["n2", "n1", "n0"]);
    }

    #[tokio::test]
    async fn empty_store_is_empty_feed() {
        let feed = feed_over(Vec::new());
        assert!(feed.list_recent(FEED_LIMIT).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let mut store = MockNoticeStore::new();
        store
            .expect_list()
            .returning(|| Err(StoreError::Unavailable("disk".into())));
        let feed = NoticeFeed::new(Arc::new(store));
        assert!(matches!(
            feed.list_recent(FEED_LIMIT).await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
