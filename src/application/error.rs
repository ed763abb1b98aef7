// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    /// The audit store rejected an append. The business mutation that
    /// triggered the write has already been committed.
    #[error("audit failure: {message}")]
    Audit {
        message: String,
        #[source]
        source: DomainError,
    },

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn audit(msg: impl Into<String>, source: DomainError) -> Self {
        Self::Audit {
            message: msg.into(),
            source,
        }
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    /// Turn a domain validation failure into a client error while leaving
    /// every other domain failure intact.
    pub fn from_input(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            other => Self::Domain(other),
        }
    }
}
