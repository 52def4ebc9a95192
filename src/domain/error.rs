use thiserror::Error;

use super::token::TokenError;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{0}")]
    Signing(#[from] TokenError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
