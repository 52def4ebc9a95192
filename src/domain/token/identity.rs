//! User identity bound into a token

use serde::{Deserialize, Serialize};

/// Who a token is issued to.
///
/// A numeric uid of `0` means "any user" and is encoded as an empty string,
/// so it binds no particular user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserIdentity {
    Uid(u32),
    Account(String),
}

impl UserIdentity {
    /// Build an identity from the request fields; a non-empty account wins over the uid
    pub fn from_parts(uid: u32, account: Option<String>) -> Self {
        match account.filter(|account| !account.is_empty()) {
            Some(account) => Self::Account(account),
            None => Self::Uid(uid),
        }
    }

    /// The string form that is signed and CRC'd inside the token
    pub fn as_token_string(&self) -> String {
        match self {
            Self::Uid(0) => String::new(),
            Self::Uid(uid) => uid.to_string(),
            Self::Account(account) => account.clone(),
        }
    }

}

impl Default for UserIdentity {
    fn default() -> Self {
        Self::Uid(0)
    }
}

impl std::fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uid(uid) => write!(f, "uid:{}", uid),
            Self::Account(account) => write!(f, "account:{}", account),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_uid_is_empty() {
        assert_eq!(UserIdentity::Uid(0).as_token_string(), "");
        assert_eq!(UserIdentity::default(), UserIdentity::Uid(0));
    }

    #[test]
    fn test_uid_is_decimal() {
        assert_eq!(UserIdentity::Uid(42).as_token_string(), "42");
    }

    #[test]
    fn test_account_takes_precedence() {
        let identity = UserIdentity::from_parts(42, Some("alice".to_string()));
        assert_eq!(identity, UserIdentity::Account("alice".to_string()));
        assert_eq!(identity.as_token_string(), "alice");
    }

    #[test]
    fn test_empty_account_falls_back_to_uid() {
        let identity = UserIdentity::from_parts(42, Some(String::new()));
        assert_eq!(identity, UserIdentity::Uid(42));
        assert_eq!(identity.as_token_string(), "42");
    }
}
