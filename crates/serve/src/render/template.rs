// crates/serve/src/render/template.rs

use crate::Error;
use handlebars::Handlebars;
use serde::Serialize;
use std::io::Write;

// ─────────────────────────────────────────────────────────────────────────────
// Embedded templates
// ─────────────────────────────────────────────────────────────────────────────

const LAYOUT: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{title}}</title>
{{#if styles}}<style>{{{styles}}}</style>{{/if}}
</head>
<body class="wp-admin">
<nav class="admin-menu">
<a href="/admin">Dashboard</a>
<a href="/admin/notices">Admin Notices</a>
<a href="/admin/settings">Contact Details</a>
{{#if viewer}}<span class="current-user">{{viewer}}</span>{{/if}}
</nav>
<div class="wrap">
<h1>{{title}}</h1>
{{{body}}}
</div>
</body>
</html>
"#;

const DASHBOARD: &str = r#"<div id="dashboard-widgets">
{{#each widgets}}
<div id="{{id}}" class="postbox">
<h2>{{title}}</h2>
<div class="inside">{{{html}}}</div>
</div>
{{/each}}
</div>
"#;

const SETTINGS: &str = r#"{{#if updated}}<div class="notice notice-success"><p>Settings saved.</p></div>{{/if}}
{{#each rejections}}<div class="notice notice-error"><p>{{this}}</p></div>
{{/each}}
{{#if read_only}}<div class="notice notice-info"><p>Contact details are provided by the environment and cannot be edited here.</p></div>{{/if}}
<form method="post" action="/admin/settings">
<h2>Contact Information</h2>
<p>Enter your contact information below:</p>
<table class="form-table">
{{#each fields}}
<tr>
<th scope="row"><label for="{{name}}">{{label}}</label></th>
<td><input type="{{input_type}}" id="{{name}}" name="{{name}}" value="{{value}}"{{#if ../read_only}} disabled{{/if}}></td>
</tr>
{{/each}}
</table>
{{#unless read_only}}<p class="submit"><input type="submit" class="button button-primary" value="Save Changes"></p>{{/unless}}
</form>
"#;

const NOTICE_LIST: &str = r#"{{#if can_create}}<p><a href="/admin/notices/new" class="page-title-action">Add New Notice</a></p>{{/if}}
{{#if notices}}
<table class="wp-list-table">
<thead><tr><th>Title</th><th>Author</th><th>Date</th><th></th></tr></thead>
<tbody>
{{#each notices}}
<tr>
<td>{{title}}</td>
<td>{{author}}</td>
<td>{{date}}</td>
<td>{{#if edit_href}}<a href="{{edit_href}}">Edit</a>
<form method="post" action="{{delete_href}}" class="inline"><input type="submit" class="button-link" value="Delete"></form>{{/if}}</td>
</tr>
{{/each}}
</tbody>
</table>
{{else}}
<p>No admin notices found</p>
{{/if}}
"#;

const NOTICE_FORM: &str = r#"{{#each errors}}<div class="notice notice-error"><p>{{this}}</p></div>
{{/each}}
<form method="post" action="{{action}}">
<p><label for="title">Title</label><br>
<input type="text" id="title" name="title" value="{{title}}" required></p>
<p><label for="body">Content</label><br>
<textarea id="body" name="body" rows="10">{{body}}</textarea></p>
<p class="submit"><input type="submit" class="button button-primary" value="{{submit}}"></p>
</form>
"#;

const CONTACT_FORM: &str = r#"{{#each errors}}<p class="contact-error">{{this}}</p>
{{/each}}
<form id="custom-contact-form" class="contact-form" method="post" action="{{action}}">
<p><label for="name">Name:</label>
<input type="text" name="name" id="name" value="{{name}}" required></p>
<p><label for="email">Email:</label>
<input type="email" name="email" id="email" value="{{email}}" required></p>
<p><label for="message">Message:</label>
<textarea name="message" id="message" required>{{message}}</textarea></p>
<p><input type="submit" value="Send Message"></p>
<input type="hidden" name="_nonce" value="{{nonce}}">
</form>
"#;

const PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{title}}</title>
{{#if styles}}<style>{{{styles}}}</style>{{/if}}
</head>
<body>
<main class="entry-content">
{{{body}}}
</main>
</body>
</html>
"#;

// ─────────────────────────────────────────────────────────────────────────────
// Models
// ─────────────────────────────────────────────────────────────────────────────

/// Admin shell. `body` and `styles` are trusted, pre-rendered markup.
#[derive(Debug, Default, Serialize)]
pub struct LayoutModel {
    pub title: String,
    pub styles: String,
    pub body: String,
    pub viewer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WidgetView {
    pub id: String,
    pub title: String,
    pub html: String,
}

#[derive(Debug, Default, Serialize)]
pub struct DashboardModel {
    pub widgets: Vec<WidgetView>,
}

#[derive(Debug, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub value: String,
}

#[derive(Debug, Default, Serialize)]
pub struct SettingsModel {
    pub fields: Vec<FieldView>,
    pub rejections: Vec<String>,
    pub updated: bool,
    pub read_only: bool,
}

#[derive(Debug, Serialize)]
pub struct NoticeRow {
    pub title: String,
    pub author: String,
    pub date: String,
    pub edit_href: Option<String>,
    pub delete_href: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct NoticeListModel {
    pub notices: Vec<NoticeRow>,
    pub can_create: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct NoticeFormModel {
    pub action: String,
    pub submit: &'static str,
    pub title: String,
    pub body: String,
    pub errors: Vec<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct ContactFormModel {
    pub action: String,
    pub nonce: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub errors: Vec<String>,
}

/// Public page shell.
#[derive(Debug, Default, Serialize)]
pub struct PageModel {
    pub title: String,
    pub styles: String,
    pub body: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────────────────

/// Handlebars registry preloaded with the built-in templates.
pub struct Templates {
    handlebars: Handlebars<'static>,
}

impl Templates {
    pub const LAYOUT: &'static str = "layout";
    pub const DASHBOARD: &'static str = "dashboard";
    pub const SETTINGS: &'static str = "settings";
    pub const NOTICE_LIST: &'static str = "notice_list";
    pub const NOTICE_FORM: &'static str = "notice_form";
    pub const CONTACT_FORM: &'static str = "contact_form";
    pub const PAGE: &'static str = "page";

    pub fn new() -> Result<Self, Error> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        for (name, src) in [
            (Self::LAYOUT, LAYOUT),
            (Self::DASHBOARD, DASHBOARD),
            (Self::SETTINGS, SETTINGS),
            (Self::NOTICE_LIST, NOTICE_LIST),
            (Self::NOTICE_FORM, NOTICE_FORM),
            (Self::CONTACT_FORM, CONTACT_FORM),
            (Self::PAGE, PAGE),
        ] {
            handlebars.register_template_string(name, src)?;
        }
        Ok(Self { handlebars })
    }

    pub fn render<M: Serialize>(&self, name: &str, model: &M) -> Result<String, Error> {
        Ok(self.handlebars.render(name, model)?)
    }

    pub fn render_to_write<M, W>(&self, name: &str, model: &M, out: &mut W) -> Result<(), Error>
    where
        M: Serialize,
        W: Write,
    {
        self.handlebars.render_to_write(name, model, out)?;
        Ok(())
    }

    /// Render `body` inside the admin shell.
    pub fn admin_page(&self, model: &LayoutModel) -> Result<String, Error> {
        self.render(Self::LAYOUT, model)
    }
}
