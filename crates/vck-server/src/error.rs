use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("missing header: {0}")]
    MissingHeader(&'static str),

    #[error("request signature does not match")]
    InvalidSignature,

    #[error("request timestamp is outside the allowed window")]
    StaleRequest,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("search failed: {0}")]
    Search(#[from] vck_core::SearchError),

    #[error("could not reach slack: {0}")]
    Http(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingHeader(_) | Self::InvalidSignature | Self::StaleRequest => {
                StatusCode::UNAUTHORIZED
            }
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
