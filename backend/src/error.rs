//! Error type shared by every service module.
//!
//! Handlers keep the `process` → `match` shape and turn failures into a
//! JSON `{ "error": ... }` body through `ResponseError`.

use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input rejected before touching the store.
    #[error("{0}")]
    Validation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Business-rule rejection: default library rows, system roles.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ServiceError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, msg)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                ServiceError::Conflict(
                    msg.clone()
                        .unwrap_or_else(|| "Constraint violation".to_string()),
                )
            }
            _ => ServiceError::Database(err),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Database(_)
            | ServiceError::Serialization(_)
            | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

/// Logs a failed request at a level matching its severity and builds the response.
pub fn respond_with(context: &str, err: ServiceError) -> HttpResponse {
    if err.status_code().is_server_error() {
        log::error!("{}: {}", context, err);
    } else {
        log::warn!("{}: {}", context, err);
    }
    err.error_response()
}

/// JSON extractor settings: body size limit, and malformed bodies answered
/// with the same `{ "error": ... }` shape as every other failure.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default().limit(limit).error_handler(|err, _req| {
        let response = respond_with("Rejected JSON body", ServiceError::Validation(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = respond_with("Rejected query string", ServiceError::Validation(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}
