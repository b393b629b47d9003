use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }
}

impl From<sea_orm::DbErr> for ModelError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Db(e.to_string()) }
}

/// Reject empty or whitespace-only text with the given message.
pub fn require_text(value: &str, msg: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::validation(msg));
    }
    Ok(())
}

/// Upper bound on character count.
pub fn max_chars(value: &str, max: usize, msg: &str) -> Result<(), ModelError> {
    if value.chars().count() > max {
        return Err(ModelError::validation(msg));
    }
    Ok(())
}
