// crates/edge/src/router.rs

use crate::{admin, auth, notices, public, state::AppState};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

/// Capability-gated admin surface, behind the certificate gate.
#[tracing::instrument(skip_all)]
pub fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin::dashboard))
        .route(
            "/admin/settings",
            get(admin::settings_form).post(admin::save_settings),
        )
        .route("/admin/notices", get(notices::list).post(notices::create))
        .route("/admin/notices/new", get(notices::new_form))
        .route("/admin/notices/{id}", post(notices::update))
        .route("/admin/notices/{id}/edit", get(notices::edit_form))
        .route("/admin/notices/{id}/delete", post(notices::delete))
        .route_layer(middleware::from_fn_with_state(state, auth::gate))
}

/// Pages and the contact form; no authentication.
#[tracing::instrument(skip_all)]
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::home))
        .route("/contact", post(public::contact))
        .route("/{slug}", get(public::page))
}
