use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PokedexError {
    #[error("{0}")]
    NotFound(String),
    #[error("catalog unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("storage failure: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, PokedexError>;

impl PokedexError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            PokedexError::NotFound(_) => StatusCode::NOT_FOUND,
            PokedexError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            PokedexError::Validation(_) => StatusCode::BAD_REQUEST,
            PokedexError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PokedexError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
