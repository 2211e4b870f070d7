use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::AdminSecret;
use crate::routes::{admin_routes, person_routes};
use crate::state::person::PersonStore;

/// Build the complete Axum application:
/// - /persons, /persons/:id   (person registry)
/// - /admin                   (Basic-auth protected portal)
///
/// Any other path falls through to axum's empty 404.
pub fn build_app(store: PersonStore, secret: AdminSecret) -> Router {
    Router::new()
        .merge(person_routes::routes(store))
        .merge(admin_routes::routes(secret))
        // Logging middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
