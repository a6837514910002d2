use crate::notice::Notice;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Change site-wide settings and manage the notice list.
    ManageOptions,
    EditPosts,
    EditOthersPosts,
    Read,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Administrator,
    Editor,
    Author,
    Subscriber,
}

impl Role {
    pub fn capabilities(self) -> &'static [Capability] {
        use Capability::*;
        match self {
            Role::Administrator => &[ManageOptions, EditPosts, EditOthersPosts, Read],
            Role::Editor => &[EditPosts, EditOthersPosts, Read],
            Role::Author => &[EditPosts, Read],
            Role::Subscriber => &[Read],
        }
    }

    pub fn has(self, cap: Capability) -> bool {
        self.capabilities().contains(&cap)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Administrator => "administrator",
            Role::Editor => "editor",
            Role::Author => "author",
            Role::Subscriber => "subscriber",
        };
        f.write_str(s)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "administrator" | "admin" => Ok(Role::Administrator),
            "editor" => Ok(Role::Editor),
            "author" => Ok(Role::Author),
            "subscriber" => Ok(Role::Subscriber),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Permission checks consulted before rendering privileged affordances.
pub trait AccessControl: Send + Sync {
    fn can(&self, cap: Capability) -> bool;

    /// Object-level check for a specific notice.
    fn can_edit_notice(&self, notice: &Notice) -> bool;
}

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub name: String,
    pub role: Role,
}

impl Viewer {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

impl AccessControl for Viewer {
    fn can(&self, cap: Capability) -> bool {
        self.role.has(cap)
    }

    fn can_edit_notice(&self, notice: &Notice) -> bool {
        self.can(Capability::EditOthersPosts)
            || (self.can(Capability::EditPosts) && notice.author == self.name)
    }
}

/// Public visitor: no capabilities at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl AccessControl for Anonymous {
    fn can(&self, _cap: Capability) -> bool {
        false
    }

    fn can_edit_notice(&self, _notice: &Notice) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeDraft;
    use chrono::Utc;

    fn notice_by(author: &str) -> Notice {
        Notice::new(
            NoticeDraft {
                title: "t".into(),
                body: String::new(),
            },
            author,
            Utc::now(),
        )
    }

    #[test]
    fn role_capabilities() {
        assert!(Role::Administrator.has(Capability::ManageOptions));
        assert!(!Role::Editor.has(Capability::ManageOptions));
        assert!(Role::Author.has(Capability::EditPosts));
        assert!(!Role::Subscriber.has(Capability::EditPosts));
    }

    #[test]
    fn authors_edit_only_their_own_notices() {
        let author = Viewer::new("sam", Role::Author);
        assert!(author.can_edit_notice(&notice_by("sam")));
        assert!(!author.can_edit_notice(&notice_by("alex")));

        let editor = Viewer::new("kim", Role::Editor);
        assert!(editor.can_edit_notice(&notice_by("alex")));

        let subscriber = Viewer::new("sam", Role::Subscriber);
        assert!(!subscriber.can_edit_notice(&notice_by("sam")));
    }

    #[test]
    fn anonymous_has_nothing() {
        assert!(!Anonymous.can(Capability::Read));
        assert!(!Anonymous.can_edit_notice(&notice_by("x")));
    }

    #[test]
    fn roles_parse() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Administrator));
        assert_eq!("editor".parse::<Role>(), Ok(Role::Editor));
        assert!("root".parse::<Role>().is_err());
    }
}
