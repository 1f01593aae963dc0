use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fortuna_core::ErrorBody;
use thiserror::Error;

/// Errori degli handler HTTP. Il messaggio (Display) è esattamente quello mandato al client.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: No token")]
    NoToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Stream not found")]
    StreamNotFound,

    #[error("Internal Server Error")]
    Database(#[from] sqlx::Error),

    #[error("Internal Server Error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoToken | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::MalformedPayload => StatusCode::BAD_REQUEST,
            ApiError::StreamNotFound => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // il dettaglio resta nei log, al client arriva solo il messaggio generico
        match &self {
            ApiError::Database(e) => tracing::error!(error = %e, "database error"),
            ApiError::Internal(detail) => tracing::error!(%detail, "internal error"),
            _ => {}
        }
        (self.status(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
