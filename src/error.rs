use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::model::BackendError;

// Sent to clients as {"error": "..."}
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Messaggio vuoto")]
    EmptyMessage,

    #[error("Richiesta non valida: {0}")]
    InvalidBody(String),

    #[error("Chiave API non configurata nel server.")]
    MissingApiKey,

    #[error("Chiave API non trovata nel file .env.local")]
    MissingListingKey,

    #[error("{} (Dettaglio: {0})", .0.failure().message())]
    Backend(BackendError),

    #[error("{0}")]
    Listing(BackendError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::EmptyMessage | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingApiKey
            | ApiError::MissingListingKey
            | ApiError::Backend(_)
            | ApiError::Listing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
