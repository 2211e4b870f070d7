use axum::{extract::State, routing::any, Router};
use axum_extra::{
    headers::{authorization::Basic, Authorization},
    TypedHeader,
};

use crate::config::AdminSecret;
use crate::errors::ApiError;

const ADMIN_USER: &str = "admin";
const BANNER: &str = "Admin portal";

pub fn routes(secret: AdminSecret) -> Router {
    Router::new()
        .route("/admin", any(admin_portal))
        .with_state(secret)
}

/// ANY /admin
///
/// Re-checks HTTP Basic credentials on every request; there is no session.
async fn admin_portal(
    State(secret): State<AdminSecret>,
    credentials: Option<TypedHeader<Authorization<Basic>>>,
) -> Result<&'static str, ApiError> {
    let Some(TypedHeader(auth)) = credentials else {
        tracing::warn!("Admin access without credentials");
        return Err(ApiError::Unauthorized);
    };

    if auth.username() != ADMIN_USER || !secret.matches(auth.password()) {
        tracing::warn!("Failed admin login for user {:?}", auth.username());
        return Err(ApiError::Unauthorized);
    }

    Ok(BANNER)
}
