// crates/edge/src/public.rs

use crate::{state::AppState, Error};
use adapt::components::{render_contact_form, CONTACT_FORM_ACTION};
use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use domain::message::{ContactSubmission, FieldError};
use serde::Deserialize;
use serve::{
    registry::Screen,
    render::{
        escape::esc_html,
        template::{ContactFormModel, PageModel, Templates},
    },
};

pub const HOME_SLUG: &str = "index";

/// Lowercase letters, digits, `-` and `_` only; keeps lookups inside the
/// pages directory.
fn valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

fn title_for(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn public_page(app: &AppState, title: &str, body: String) -> Result<Html<String>, Error> {
    let html = app.templates.render(
        Templates::PAGE,
        &PageModel {
            title: title.to_string(),
            styles: app.registry.styles_for(Screen::Public),
            body,
        },
    )?;
    Ok(Html(html))
}

async fn render_slug(app: &AppState, slug: &str) -> Result<Html<String>, Error> {
    if !valid_slug(slug) {
        return Err(Error::NotFound);
    }
    let path = app.pages_dir.join(format!("{slug}.html"));
    let content = match tokio::fs::read_to_string(&path).await {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(Error::NotFound),
        Err(e) => return Err(e.into()),
    };

    let body = app.registry.expand(&content).await?;
    public_page(app, &title_for(slug), body)
}

#[tracing::instrument(skip_all)]
pub async fn home(State(app): State<AppState>) -> Result<Html<String>, Error> {
    render_slug(&app, HOME_SLUG).await
}

#[tracing::instrument(skip_all, fields(%slug))]
pub async fn page(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, Error> {
    render_slug(&app, &slug).await
}

// ─────────────────────────────────────────────────────────────────────────────
// Contact form
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ContactPost {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "_nonce", default)]
    pub nonce: String,
}

fn describe(err: &FieldError) -> String {
    let label = match err.field {
        "name" => "Name",
        "email" => "Email",
        "message" => "Message",
        other => other,
    };
    format!("{label}: {}", err.error)
}

#[tracing::instrument(skip_all)]
pub async fn contact(
    State(app): State<AppState>,
    Form(post): Form<ContactPost>,
) -> Result<Response, Error> {
    if !app.nonce.verify(CONTACT_FORM_ACTION, &post.nonce, Utc::now()) {
        tracing::debug!("contact form nonce rejected");
        return Err(Error::Forbidden(
            "The link you followed has expired. Please reload the page and try again.",
        ));
    }

    let submission = ContactSubmission {
        name: post.name.clone(),
        email: post.email.clone(),
        message: post.message.clone(),
    };

    match submission.validate(Utc::now()) {
        Ok(message) => {
            app.inbox.append(&message).await?;
            let body = format!(
                "<p class=\"contact-success\">Thank you, {}. Your message has been sent.</p>",
                esc_html(&message.name)
            );
            Ok(public_page(&app, "Contact", body)?.into_response())
        }
        Err(errs) => {
            let model = ContactFormModel {
                name: post.name,
                email: post.email,
                message: post.message,
                errors: errs.iter().map(describe).collect(),
                ..ContactFormModel::default()
            };
            let form = render_contact_form(&app.templates, &app.nonce, model)?;
            let page = public_page(&app, "Contact", form)?;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_stay_in_pages_dir() {
        assert!(valid_slug("contact-us"));
        assert!(valid_slug("faq_2"));
        assert!(!valid_slug(""));
        assert!(!valid_slug(".."));
        assert!(!valid_slug("a/b"));
        assert!(!valid_slug("About"));
    }

    #[test]
    fn titles_from_slugs() {
        assert_eq!(title_for("contact-us"), "Contact Us");
        assert_eq!(title_for("index"), "Index");
    }
}
