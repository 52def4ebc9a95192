//! HTTP request and response types

pub mod error;
pub mod json;
pub mod token;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use token::{GenerateTokenRequest, GenerateTokenResponse};
