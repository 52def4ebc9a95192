//! Token issuance request

use super::{Role, UserIdentity};

pub const CHANNEL_NAME_REQUIRED: &str = "Channel name is required";

/// Default token validity window in seconds
pub const DEFAULT_EXPIRATION_SECS: i64 = 3600;

/// A request to issue a channel token.
///
/// `expiration_secs` is left unset when the caller did not ask for a window;
/// the issuing service fills in its configured default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub channel_name: String,
    pub identity: UserIdentity,
    pub role: Role,
    pub expiration_secs: Option<i64>,
}

impl TokenRequest {
    pub fn new(channel_name: impl Into<String>) -> Self {
        Self {
            channel_name: channel_name.into(),
            identity: UserIdentity::default(),
            role: Role::default(),
            expiration_secs: None,
        }
    }

    pub fn with_uid(mut self, uid: u32) -> Self {
        self.identity = UserIdentity::Uid(uid);
        self
    }

    pub fn with_identity(mut self, identity: UserIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_expiration_secs(mut self, secs: i64) -> Self {
        self.expiration_secs = Some(secs);
        self
    }

    /// A channel name counts as present only if it has non-whitespace content
    pub fn has_channel_name(&self) -> bool {
        !self.channel_name.trim().is_empty()
    }
}
