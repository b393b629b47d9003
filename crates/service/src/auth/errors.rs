use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("An account with this email already exists. Please use a different email or sign in.")]
    Conflict,
    #[error("{0}")]
    UserNotFound(String),
    #[error("Password is incorrect")]
    InvalidCredentials,
    #[error("{0}")]
    TokenExpired(String),
    #[error("{0}")]
    TokenInvalid(String),
    #[error("authentication required")]
    Unauthorized,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("email delivery failed: {0}")]
    Email(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::UserNotFound(_) => 1003,
            AuthError::InvalidCredentials => 1004,
            AuthError::TokenExpired(_) => 1005,
            AuthError::TokenInvalid(_) => 1006,
            AuthError::Unauthorized => 1007,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Email(_) => 1103,
            AuthError::Repository(_) => 1200,
        }
    }

    /// Failure caused by the caller's input rather than by infrastructure.
    pub fn is_client_error(&self) -> bool {
        self.code() < 1100
    }
}

impl From<models::errors::ModelError> for AuthError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => AuthError::Validation(msg),
            models::errors::ModelError::Db(msg) => AuthError::Repository(msg),
        }
    }
}
