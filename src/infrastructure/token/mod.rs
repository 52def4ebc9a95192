//! Channel access token signing and verification

mod builder;
mod packer;
mod verifier;

pub use builder::{AccessTokenBuilder, MESSAGE_TTL_SECS, TOKEN_VERSION};
pub use verifier::AccessTokenVerifier;
