pub mod admin;
pub mod auth;
pub mod bootstrap;
pub mod cli;
pub mod notices;
pub mod public;
pub mod router;
pub mod state;

mod error;

pub use error::Error;

use tower::Layer;
use tower_http::{normalize_path::NormalizePathLayer, trace::TraceLayer};

/// Build the full application: admin + public routes, request tracing, and
/// trailing-slash normalisation so `/admin/` == `/admin`.
pub fn app_router(
    state: state::AppState,
) -> tower_http::normalize_path::NormalizePath<axum::Router> {
    let routes = axum::Router::new()
        .merge(router::admin_routes(state.clone()))
        .merge(router::public_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    NormalizePathLayer::trim_trailing_slash().layer(routes)
}
