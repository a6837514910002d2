// crates/serve/src/render/style.rs

/// Styles for the dashboard widgets; registered for the dashboard screen only.
pub const DASHBOARD_CSS: &str = r#"
.support-dashboard { padding: 10px; background: #fff; }
.support-header { display: flex; flex-wrap: wrap; align-items: center; }
.support-logo { flex: 0 0 auto; margin-right: 30px; }
.support-logo img { max-width: 150px; height: auto; }
.support-contact { flex: 1 1 auto; }
.support-contact h2 { margin: 0 0 10px 0; padding: 0; color: #1d2327; }
.support-details { display: flex; flex-direction: column; gap: 15px; padding-top: 10px; }
.support-item { display: flex; align-items: center; padding: 5px 0; }
.support-item .dashicons { margin-right: 10px; color: #2271b1; }
.support-item a { color: #2271b1; text-decoration: none; font-size: 14px; }
.support-item a:hover { color: #135e96; text-decoration: underline; }

.admin-notices { padding: 10px 0; }
.admin-notice { margin-bottom: 20px; padding-bottom: 15px; border-bottom: 1px solid #dcdcde; }
.admin-notice:last-child { border-bottom: none; margin-bottom: 5px; }
.admin-notice h3 { margin: 0 0 10px; padding: 0; font-size: 16px; color: #1d2327; }
.notice-content { margin-bottom: 10px; }
.notice-content p { margin: 0 0 10px; line-height: 1.5; }
.notice-meta { font-size: 12px; color: #646970; display: flex; justify-content: space-between; }
.edit-notice { color: #2271b1; text-decoration: none; }
.edit-notice:hover { color: #135e96; text-decoration: underline; }

#dashboard-widgets .postbox { padding-top: 0; }
#dashboard-widgets .postbox h2 { padding: 12px; border-bottom: 1px solid #dcdcde; }

@media screen and (max-width: 782px) {
    .support-header { flex-direction: column; align-items: flex-start; }
    .support-logo { margin: 0 0 20px 0; }
}
"#;
