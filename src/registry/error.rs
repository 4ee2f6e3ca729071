use thiserror::Error;

use super::validation::{CodeValidationError, UrlValidationError};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(UrlValidationError),
    #[error("{0}")]
    InvalidCode(CodeValidationError),
    #[error("This custom code is already taken")]
    CodeTaken(String),
    #[error("URL not found")]
    NotFound(String),
    #[error("Failed to generate a unique short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },
    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

impl From<UrlValidationError> for RegistryError {
    fn from(err: UrlValidationError) -> Self {
        Self::InvalidUrl(err)
    }
}

impl From<CodeValidationError> for RegistryError {
    fn from(err: CodeValidationError) -> Self {
        Self::InvalidCode(err)
    }
}
