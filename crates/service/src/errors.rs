use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: i64) -> Self { Self::NotFound(format!("{} {} not found", entity, id)) }

    pub fn conflict(entity: &str, id: i64) -> Self {
        Self::Conflict(format!("{} {} was modified concurrently; reload and retry", entity, id))
    }

    pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(msg),
            _ => Self::Db(e.to_string()),
        }
    }
}
