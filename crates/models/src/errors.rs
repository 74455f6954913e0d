use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
}

/// Longest accepted `name`/`title`, matching the column width in the migrations.
pub const LABEL_MAX_LEN: usize = 256;

/// Shared rule for optional free-text labels: non-blank and at most [`LABEL_MAX_LEN`] chars.
pub fn validate_label(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} must not be blank")));
    }
    if value.chars().count() > LABEL_MAX_LEN {
        return Err(ModelError::Validation(format!("{field} longer than {LABEL_MAX_LEN} characters")));
    }
    Ok(())
}
