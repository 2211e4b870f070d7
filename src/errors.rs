use std::io;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors surfaced to HTTP clients.
///
/// Variants render as short plain-text bodies (`NotFound` has none).
/// Parse and serialization errors carry the raw serde message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("need content-type 'application/json', but got '{0}'")]
    UnsupportedMediaType(String),

    #[error("{0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("{0}")]
    Serialization(#[source] serde_json::Error),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("401 - Unauthorized")]
    Unauthorized,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            ApiError::NotFound => status.into_response(),
            ApiError::Unauthorized => (
                status,
                [(header::WWW_AUTHENTICATE, r#"Basic realm="admin""#)],
                self.to_string(),
            )
                .into_response(),
            ApiError::Serialization(ref e) => {
                tracing::error!("Failed to serialize response: {e}");
                (status, self.to_string()).into_response()
            }
            _ => (status, self.to_string()).into_response(),
        }
    }
}

/// Fatal conditions that stop the service before it starts serving.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("failed to read {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("ADMIN_PASSWORD is not set")]
    MissingAdminPassword,

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}
