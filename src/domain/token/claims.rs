//! Signing input and verified output

use serde::Serialize;

use super::{PrivilegeMap, Role, UserIdentity};

/// Everything the signer binds into a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub channel_name: String,
    pub identity: UserIdentity,
    pub role: Role,
    /// Absolute Unix timestamp after which the join privilege lapses
    pub privilege_expired_ts: i64,
}

/// Decoded contents of a token that passed verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedToken {
    pub channel_name: String,
    pub identity: UserIdentity,
    pub role: Role,
    pub privilege_expired_ts: i64,
    pub salt: u32,
    /// Outer validity of the signed message, independent of privileges
    pub message_expires_at: i64,
    pub privileges: PrivilegeMap,
}
