//! Channel roles

use serde::{Deserialize, Serialize};

/// Role requested for a channel token.
///
/// Only `Publisher` and `Subscriber` are current. `Attendee` and `Admin` are
/// legacy values that carry the same privileges as `Publisher`. Any other
/// integer is kept as `Unknown` and passed through to the signer, which grants
/// it join-only privileges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum Role {
    Attendee,
    Publisher,
    Subscriber,
    Admin,
    Unknown(u32),
}

impl Role {
    pub const ATTENDEE: u32 = 0;
    pub const PUBLISHER: u32 = 1;
    pub const SUBSCRIBER: u32 = 2;
    pub const ADMIN: u32 = 101;

    /// Integer discriminator as carried on the wire
    pub fn as_u32(&self) -> u32 {
        match self {
            Self::Attendee => Self::ATTENDEE,
            Self::Publisher => Self::PUBLISHER,
            Self::Subscriber => Self::SUBSCRIBER,
            Self::Admin => Self::ADMIN,
            Self::Unknown(value) => *value,
        }
    }

    /// Whether the role is granted the audio, video and data publish privileges
    pub fn can_publish(&self) -> bool {
        matches!(self, Self::Attendee | Self::Publisher | Self::Admin)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Publisher
    }
}

impl From<u32> for Role {
    fn from(value: u32) -> Self {
        match value {
            Self::ATTENDEE => Self::Attendee,
            Self::PUBLISHER => Self::Publisher,
            Self::SUBSCRIBER => Self::Subscriber,
            Self::ADMIN => Self::Admin,
            other => Self::Unknown(other),
        }
    }
}

impl From<Role> for u32 {
    fn from(role: Role) -> Self {
        role.as_u32()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attendee => write!(f, "attendee"),
            Self::Publisher => write!(f, "publisher"),
            Self::Subscriber => write!(f, "subscriber"),
            Self::Admin => write!(f, "admin"),
            Self::Unknown(value) => write!(f, "unknown({})", value),
        }
    }
}
