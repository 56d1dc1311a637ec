use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        let error_message = match self {
            ApiError::DatabaseError(err) => format!("Internal Server Error: {}", err),
            ApiError::JsonError(err) => format!("Bad Request: {}", err),
            ApiError::Unauthorized(err) => format!("Unauthorized: {}", err),
        };

        HttpResponse::build(self.status_code()).json(json!({
            "message": error_message
        }))
    }

    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            ApiError::DatabaseError(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::JsonError(_) => actix_web::http::StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }
}
