use crate::validate::{sanitize_text_field, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of notices surfaced on the dashboard feed.
pub const FEED_LIMIT: usize = 5;

/// An admin-authored notice shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: Uuid,
    pub title: String,
    /// Rich text (markdown-flavoured, may contain inline HTML). Sanitized on
    /// output, never trusted.
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub author: String,
}

impl Notice {
    pub fn new(draft: NoticeDraft, author: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            body: draft.body,
            created_at: now,
            author: author.into(),
        }
    }

    /// Replace editable content; id, author and creation time are kept.
    pub fn apply(&mut self, draft: NoticeDraft) {
        self.title = draft.title;
        self.body = draft.body;
    }
}

/// Editor submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeDraft {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl NoticeDraft {
    pub fn validate(self) -> Result<NoticeDraft, ValidationError> {
        let title = sanitize_text_field(&self.title);
        if title.is_empty() {
            return Err(ValidationError::Required);
        }
        let body = self.body.replace("\r\n", "\n").trim().to_string();
        Ok(NoticeDraft { title, body })
    }
}

/// Newest first. Stable, so equal timestamps keep their stored order.
pub fn sort_newest_first(notices: &mut [Notice]) {
    notices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0).unwrap()
    }

    #[test]
    fn draft_requires_title() {
        let draft = NoticeDraft {
            title: "  <b></b> ".into(),
            body: "x".into(),
        };
        assert_eq!(draft.validate(), Err(ValidationError::Required));
    }

    #[test]
    fn draft_title_is_plain_text() {
        let draft = NoticeDraft {
            title: "<em>Maintenance</em> window".into(),
            body: "line one\r\nline two\n".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(draft.title, "Maintenance window");
        assert_eq!(draft.body, "line one\nline two");
    }

    #[test]
    fn sorting_is_newest_first_and_stable() {
        let mk = |title: &str, day| {
            Notice::new(
                NoticeDraft {
                    title: title.into(),
                    body: String::new(),
                },
                "admin",
                at(day),
            )
        };
        let mut list = vec![mk("a", 1), mk("b", 3), mk("c", 2), mk("d", 3)];
        sort_newest_first(&mut list);
        let titles: Vec<&str> = list.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["b", "d", "c", "a"]);
    }

    #[test]
    fn apply_keeps_identity() {
        let mut n = Notice::new(
            NoticeDraft {
                title: "old".into(),
                body: "old".into(),
            },
            "editor",
            at(4),
        );
        let id = n.id;
        n.apply(NoticeDraft {
            title: "new".into(),
            body: "new body".into(),
        });
        assert_eq!(n.id, id);
        assert_eq!(n.author, "editor");
        assert_eq!(n.created_at, at(4));
        assert_eq!(n.title, "new");
    }
}
