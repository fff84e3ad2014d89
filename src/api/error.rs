use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::db::models::{InvalidIdentifier, JobId};

/// Body of every error raised by a handler
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Service-level errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Session cookie missing or its token invalid
    #[error("unauthorized access")]
    Unauthenticated,

    /// Session subject does not own the requested resource
    #[error("Forbidden access")]
    Forbidden,

    /// A required field is missing
    #[error("{0}")]
    Validation(String),

    /// An identifier is not well-formed
    #[error(transparent)]
    InvalidId(#[from] InvalidIdentifier),

    /// A job referenced by a write does not exist
    #[error("job not found: {0}")]
    JobNotFound(JobId),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden => StatusCode::FORBIDDEN,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::InvalidId(_)
            | ServiceError::JobNotFound(_)
            | ServiceError::Database(_)
            | ServiceError::Token(_)
            | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!("Request failed: {}", self);
            "internal server error".to_string()
        } else {
            if status == StatusCode::BAD_REQUEST {
                warn!("Rejected request: {}", self);
            }
            self.to_string()
        };

        HttpResponse::build(status).json(MessageResponse { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::{json, Value};
    use uuid::Uuid;

    async fn body_of(err: ServiceError) -> (StatusCode, Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn auth_failures_carry_message_bodies() {
        assert_eq!(
            body_of(ServiceError::Unauthenticated).await,
            (StatusCode::UNAUTHORIZED, json!({"message": "unauthorized access"}))
        );
        assert_eq!(
            body_of(ServiceError::Forbidden).await,
            (StatusCode::FORBIDDEN, json!({"message": "Forbidden access"}))
        );
    }

    #[actix_web::test]
    async fn server_errors_hide_details() {
        let (status, body) = body_of(ServiceError::JobNotFound(JobId(Uuid::new_v4()))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message": "internal server error"}));

        let (status, _) = body_of(ServiceError::Database(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn malformed_identifier_is_an_internal_fault() {
        let (status, body) = body_of(InvalidIdentifier("xyz".to_string()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message": "internal server error"}));
    }

    #[actix_web::test]
    async fn missing_field_is_a_bad_request() {
        let (status, body) = body_of(ServiceError::Validation("job_id is required".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "job_id is required"}));
    }
}
