//! Domain layer - Core token types and errors

pub mod error;
pub mod token;

pub use error::DomainError;
pub use token::{
    Credentials, Privilege, PrivilegeMap, Role, TokenClaims, TokenError, TokenRequest,
    UserIdentity, VerifiedToken, VerifyError,
};
