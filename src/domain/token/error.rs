use thiserror::Error;

/// Failures raised while signing a token
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("App ID cannot be empty")]
    EmptyAppId,

    #[error("App certificate cannot be empty")]
    EmptyAppCertificate,

    #[error("Channel name cannot be empty")]
    EmptyChannelName,

    #[error("Privilege expiry {expires_at} must be after issue time {issued_at}")]
    ExpiryNotInFuture { issued_at: i64, expires_at: i64 },

    #[error("Timestamp {0} is out of range for a token")]
    TimestampOutOfRange(i64),

    #[error("{field} is too long to encode ({len} bytes, max {max})")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

/// Failures raised while verifying a token
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Unsupported token version")]
    UnsupportedVersion,

    #[error("Token was issued for a different app ID")]
    AppIdMismatch,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token was issued for a different channel")]
    ChannelMismatch,

    #[error("Token was issued for a different user")]
    UidMismatch,

    #[error("Token signature does not match")]
    SignatureMismatch,

    #[error("Token does not grant the join channel privilege")]
    MissingJoinPrivilege,

    #[error("Token expired at {expired_at} (now {now})")]
    Expired { expired_at: i64, now: i64 },
}

impl VerifyError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}
