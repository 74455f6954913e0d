use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Error body returned by every handler: `{"error": <title>, "detail": <message>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(detail.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({"error": self.title, "detail": self.detail});
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let detail = Some(e.to_string());
        match e {
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Not Found", detail),
            ServiceError::Validation(_) | ServiceError::Model(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Validation Error", detail)
            }
            ServiceError::Conflict(_) => {
                warn!(error = ?detail, "write conflict");
                Self::new(StatusCode::CONFLICT, "Conflict", detail)
            }
            ServiceError::Db(_) => {
                error!(error = ?detail, "database error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Database Error", detail)
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(e: JsonRejection) -> Self { Self::bad_request(e.body_text()) }
}

impl From<PathRejection> for JsonApiError {
    fn from(e: PathRejection) -> Self { Self::bad_request(e.body_text()) }
}

impl From<QueryRejection> for JsonApiError {
    fn from(e: QueryRejection) -> Self { Self::bad_request(e.body_text()) }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
