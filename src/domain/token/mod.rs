//! Channel token domain
//!
//! Types describing what a channel access token grants: the signing
//! credentials, the requested identity and role, and the privileges the
//! role expands to.

mod claims;
mod credentials;
mod error;
mod identity;
mod privilege;
mod request;
mod role;

pub use claims::{TokenClaims, VerifiedToken};
pub use credentials::Credentials;
pub use error::{TokenError, VerifyError};
pub use identity::UserIdentity;
pub use privilege::{privileges_for_role, role_from_privileges, Privilege, PrivilegeMap};
pub use request::{TokenRequest, CHANNEL_NAME_REQUIRED, DEFAULT_EXPIRATION_SECS};
pub use role::Role;
