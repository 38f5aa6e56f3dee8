use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Media decode failed: {0}")]
    Decode(String),
}
