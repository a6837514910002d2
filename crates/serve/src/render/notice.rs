// crates/serve/src/render/notice.rs

use super::{
    autop::autop,
    escape::{esc_attr, esc_html},
    sanitize::sanitize_rich_text,
};
use crate::Error;
use domain::{
    capability::{AccessControl, Capability},
    notice::Notice,
};
use std::fmt::Write as _;

pub const NOTICES_PATH: &str = "/admin/notices";
pub const NEW_NOTICE_PATH: &str = "/admin/notices/new";
pub const NOTICE_DATE_FORMAT: &str = "%B %-d, %Y";

pub fn edit_notice_path(notice: &Notice) -> String {
    format!("{NOTICES_PATH}/{}/edit", notice.id)
}

/// Title is escaped, body is autop'd then allow-list sanitized.
pub fn render_notice_body(notice: &Notice) -> Result<String, Error> {
    sanitize_rich_text(&autop(&notice.body))
}

/// Feed markup for the dashboard widget. `notices` are already ordered and
/// limited by the caller.
#[tracing::instrument(skip_all, fields(count = notices.len()))]
pub fn render_notice_feed(notices: &[Notice], viewer: &dyn AccessControl) -> Result<String, Error> {
    let manage = viewer.can(Capability::ManageOptions);
    let add_new = format!(
        r#"<a href="{}" class="button">Add New Notice</a>"#,
        esc_attr(NEW_NOTICE_PATH)
    );

    if notices.is_empty() {
        let mut html = String::from("<p>No admin notices available.</p>");
        if manage {
            let _ = write!(html, "<p>{add_new}</p>");
        }
        return Ok(html);
    }

    let mut html = String::from(r#"<div class="admin-notices">"#);
    for notice in notices {
        let body = render_notice_body(notice)?;
        let _ = write!(
            html,
            r#"<div class="admin-notice"><h3>{}</h3><div class="notice-content">{body}</div><div class="notice-meta"><span class="notice-date">{}</span>"#,
            esc_html(&notice.title),
            notice.created_at.format(NOTICE_DATE_FORMAT)
        );
        if viewer.can_edit_notice(notice) {
            let _ = write!(
                html,
                r#"<a href="{}" class="edit-notice">Edit</a>"#,
                esc_attr(&edit_notice_path(notice))
            );
        }
        html.push_str("</div></div>");
    }
    if manage {
        let _ = write!(
            html,
            r#"<p><a href="{}" class="button">View All Notices</a> {add_new}</p>"#,
            esc_attr(NOTICES_PATH)
        );
    }
    html.push_str("</div>");

    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use domain::{
        capability::{Role, Viewer},
        notice::NoticeDraft,
    };

    fn notice(title: &str, body: &str, author: &str) -> Notice {
        let draft = NoticeDraft {
            title: title.into(),
            body: body.into(),
        };
        let at = Utc.with_ymd_and_hms(2026, 3, 5, 9, 30, 0).unwrap();
        Notice::new(draft, author, at)
    }

    fn viewer(name: &str, role: Role) -> Viewer {
        Viewer {
            name: name.into(),
            role,
        }
    }

    #[test]
    fn subscriber_sees_content_without_affordances() {
        let notices = vec![notice("Downtime", "Back **soon**.", "alice")];
        let html = render_notice_feed(&notices, &viewer("sam", Role::Subscriber)).unwrap();

        assert!(html.contains("<h3>Downtime</h3>"));
        assert!(html.contains("<strong>soon</strong>"));
        assert!(html.contains(r#"<span class="notice-date">March 5, 2026</span>"#));
        assert!(!html.contains("Edit"));
        assert!(!html.contains("Add New Notice"));
        assert!(!html.contains("View All Notices"));
    }

    #[test]
    fn administrator_sees_edit_and_footer() {
        let notices = vec![notice("Downtime", "soon", "alice")];
        let html = render_notice_feed(&notices, &viewer("root", Role::Administrator)).unwrap();

        assert!(html.contains(&format!(
            r#"<a href="/admin/notices/{}/edit" class="edit-notice">Edit</a>"#,
            notices[0].id
        )));
        assert!(html.contains("View All Notices"));
        assert!(html.contains("Add New Notice"));
    }

    #[test]
    fn author_edits_only_own_notices() {
        let notices = vec![notice("Mine", "a", "alice"), notice("Theirs", "b", "bob")];
        let html = render_notice_feed(&notices, &viewer("alice", Role::Author)).unwrap();

        assert_eq!(html.matches("edit-notice").count(), 1);
        assert!(html.contains(&edit_notice_path(&notices[0])));
        assert!(!html.contains("View All Notices"));
    }

    #[test]
    fn empty_feed_message() {
        let html = render_notice_feed(&[], &viewer("sam", Role::Subscriber)).unwrap();
        assert_eq!(html, "<p>No admin notices available.</p>");

        let html = render_notice_feed(&[], &viewer("root", Role::Administrator)).unwrap();
        assert!(html.contains("No admin notices available."));
        assert!(html.contains(r#"href="/admin/notices/new""#));
    }

    #[test]
    fn hostile_content_is_neutralised() {
        let notices = vec![notice(
            "<img src=x onerror=alert(1)>",
            "<script>alert(1)</script>[x](javascript:alert(2)) <a href=\"javascript:alert(3)\">y</a>",
            "alice",
        )];
        let html = render_notice_feed(&notices, &viewer("sam", Role::Subscriber)).unwrap();

        assert!(!html.contains("<script"));
        assert!(!html.contains("<img"));
        assert!(!html.to_lowercase().contains("javascript:"));
        assert!(html.contains("&lt;img"));
    }

    #[test]
    fn raw_text_wrappers_in_body_stay_inert() {
        for body in [
            "<textarea><script>alert(1)</script></textarea>",
            "<xmp><img src=x onerror=alert(1)></xmp>",
            "<noscript><img src=x onerror=alert(1)></noscript>",
            "Before\n\n<title><script>alert(1)</script></title>",
            "<svg><style><img src=x onerror=alert(1)></style></svg>",
        ] {
            let notices = vec![notice("Heads up", body, "bob")];
            let html = render_notice_feed(&notices, &viewer("sam", Role::Subscriber)).unwrap();

            assert!(!html.contains("<script"), "{body} -> {html}");
            assert!(!html.contains("<img"), "{body} -> {html}");
            assert!(html.contains("<h3>Heads up</h3>"));
        }
    }
}
