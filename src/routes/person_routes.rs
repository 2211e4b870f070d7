use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::errors::ApiError;
use crate::services::person_service;
use crate::state::person::{Person, PersonStore};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Build all person routes:
/// - /persons          (collection)
/// - /persons/random   (redirect to a random person)
/// - /persons/:id      (single person)
pub fn routes(store: PersonStore) -> Router {
    Router::new()
        .route(
            "/persons",
            // `get` would also answer HEAD, so HEAD is routed to the 405 explicitly.
            get(list_persons)
                .head(method_not_allowed)
                .post(create_person)
                .fallback(method_not_allowed)
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/persons/random", get(random_person))
        .route("/persons/:id", get(get_person))
        .with_state(store)
}

/// Serialize `value` outside of any store lock and wrap it as a JSON response.
fn json_response<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value).map_err(ApiError::Serialization)?;
    Ok(([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response())
}

//
// ─────────────────────────────────────────────────────────────
// GET /persons
// Return every stored person as a JSON array
// ─────────────────────────────────────────────────────────────
//
async fn list_persons(
    State(store): State<PersonStore>,
) -> Result<Response, ApiError>
{
    let persons = person_service::snapshot(&store);
    json_response(&persons)
}

//
// ─────────────────────────────────────────────────────────────
// POST /persons
// Store a new person under a server-generated id.
// The whole body is read; no size limit applies.
// ─────────────────────────────────────────────────────────────
//
async fn create_person(
    State(store): State<PersonStore>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError>
{
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default();

    if content_type != JSON_CONTENT_TYPE {
        return Err(ApiError::UnsupportedMediaType(content_type));
    }

    let person: Person = serde_json::from_slice(&body).map_err(ApiError::MalformedBody)?;

    let id = person_service::insert(&store, person);
    tracing::info!("Created person {}", id);

    Ok(StatusCode::OK)
}

//
// ─────────────────────────────────────────────────────────────
// * /persons
// Anything but GET or POST (HEAD included)
// ─────────────────────────────────────────────────────────────
//
async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

//
// ─────────────────────────────────────────────────────────────
// GET /persons/random
// 302 to a random person, or 404 when the store is empty
// ─────────────────────────────────────────────────────────────
//
async fn random_person(
    State(store): State<PersonStore>,
) -> Result<Response, ApiError>
{
    let id = person_service::random_id(&store).ok_or(ApiError::NotFound)?;

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, format!("/persons/{id}"))],
    )
        .into_response())
}

//
// ─────────────────────────────────────────────────────────────
// GET /persons/{id}
// Return JSON person or 404
// ─────────────────────────────────────────────────────────────
//
async fn get_person(
    Path(id): Path<String>,
    State(store): State<PersonStore>,
) -> Result<Response, ApiError>
{
    let person = person_service::get(&store, &id).ok_or(ApiError::NotFound)?;
    json_response(&person)
}
