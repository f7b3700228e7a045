use freight_types::FieldErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Invalid(FieldErrors),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Locked(String),
    #[error("Password change required")]
    PasswordChangeRequired,
    #[error("password hashing failed: {0}")]
    Hash(String),
}

impl From<FieldErrors> for StoreError {
    fn from(errors: FieldErrors) -> Self {
        StoreError::Invalid(errors)
    }
}

impl StoreError {
    pub(crate) fn not_found(what: &str, id: u64) -> Self {
        StoreError::NotFound(format!("{what} {id}"))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
