// crates/edge/src/admin.rs

use crate::{state::AppState, Error};
use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};
use domain::{
    capability::{AccessControl, Capability, Viewer},
    contact::{ContactConfig, ContactField, ContactInput},
};
use serde::Deserialize;
use serve::{
    registry::Screen,
    render::template::{DashboardModel, FieldView, LayoutModel, SettingsModel, Templates},
};
use std::collections::HashMap;

pub const SETTINGS_PATH: &str = "/admin/settings";

pub(crate) fn require(viewer: &Viewer, cap: Capability) -> Result<(), Error> {
    if viewer.can(cap) {
        Ok(())
    } else {
        Err(Error::Forbidden(
            "Sorry, you are not allowed to access this page.",
        ))
    }
}

/// Wrap `body` in the admin shell with the styles registered for `screen`.
pub(crate) fn admin_page(
    app: &AppState,
    viewer: &Viewer,
    title: &str,
    screen: Screen,
    body: String,
) -> Result<Html<String>, Error> {
    let html = app.templates.admin_page(&LayoutModel {
        title: title.to_string(),
        styles: app.registry.styles_for(screen),
        body,
        viewer: Some(viewer.name.clone()),
    })?;
    Ok(Html(html))
}

#[tracing::instrument(skip_all)]
pub async fn dashboard(
    State(app): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<Html<String>, Error> {
    require(&viewer, Capability::Read)?;

    let widgets = app.registry.render_dashboard(&viewer).await?;
    let body = app
        .templates
        .render(Templates::DASHBOARD, &DashboardModel { widgets })?;
    admin_page(&app, &viewer, "Dashboard", Screen::Dashboard, body)
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SettingsQuery {
    pub updated: Option<String>,
}

fn input_type(field: ContactField) -> &'static str {
    match field {
        ContactField::Email => "email",
        ContactField::Phone => "tel",
        ContactField::Website => "url",
        ContactField::Logo | ContactField::CompanyName => "text",
    }
}

fn settings_model(app: &AppState, config: &ContactConfig) -> SettingsModel {
    SettingsModel {
        fields: app
            .fields
            .iter()
            .map(|f| FieldView {
                name: f.as_str(),
                label: f.label(),
                input_type: input_type(*f),
                value: config.get(*f).unwrap_or_default().to_string(),
            })
            .collect(),
        read_only: !app.config.is_writable(),
        ..SettingsModel::default()
    }
}

fn settings_page(app: &AppState, viewer: &Viewer, model: &SettingsModel) -> Result<Html<String>, Error> {
    let body = app.templates.render(Templates::SETTINGS, model)?;
    admin_page(app, viewer, "Contact Details Settings", Screen::Settings, body)
}

#[tracing::instrument(skip_all)]
pub async fn settings_form(
    State(app): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Query(q): Query<SettingsQuery>,
) -> Result<Html<String>, Error> {
    require(&viewer, Capability::ManageOptions)?;

    let config = app.config.get().await?;
    let mut model = settings_model(&app, &config);
    model.updated = q.updated.is_some();
    settings_page(&app, &viewer, &model)
}

/// Only exposed fields are read from the form; anything else is ignored.
#[tracing::instrument(skip_all)]
pub async fn save_settings(
    State(app): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Form(raw): Form<HashMap<String, String>>,
) -> Result<Response, Error> {
    require(&viewer, Capability::ManageOptions)?;
    if !app.config.is_writable() {
        return Err(adapt::StoreError::ReadOnly.into());
    }

    let input = app
        .fields
        .iter()
        .fold(ContactInput::default(), |input, field| {
            match raw.get(field.as_str()) {
                Some(v) => input.with(*field, v.as_str()),
                None => input,
            }
        });

    let outcome = app.config.set(input).await?;
    tracing::info!(user = %viewer.name, rejected = outcome.rejected.len(), "settings submitted");

    if outcome.rejected.is_empty() {
        return Ok(Redirect::to(&format!("{SETTINGS_PATH}?updated=1")).into_response());
    }

    // rejected fields kept their last valid value; show the effective record
    let current = app.config.get().await?;
    let mut model = settings_model(&app, &current);
    model.rejections = outcome.rejected.iter().map(|r| r.to_string()).collect();
    Ok(settings_page(&app, &viewer, &model)?.into_response())
}
