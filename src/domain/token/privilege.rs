//! Numbered privileges embedded in an access token

use std::collections::BTreeMap;

use super::Role;

/// Capability codes understood by the RTC platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum Privilege {
    JoinChannel = 1,
    PublishAudioStream = 2,
    PublishVideoStream = 3,
    PublishDataStream = 4,
    PublishAudioCdn = 5,
    PublishVideoCdn = 6,
    RequestPublishAudioStream = 7,
    RequestPublishVideoStream = 8,
    RequestPublishDataStream = 9,
    InvitePublishAudioStream = 10,
    InvitePublishVideoStream = 11,
    InvitePublishDataStream = 12,
    AdministrateChannel = 101,
    RtmLogin = 1000,
}

impl Privilege {
    pub const PUBLISH: [Privilege; 3] = [
        Privilege::PublishAudioStream,
        Privilege::PublishVideoStream,
        Privilege::PublishDataStream,
    ];

    pub fn code(self) -> u16 {
        self as u16
    }
}

/// Privilege code to expiry timestamp, ordered by code
pub type PrivilegeMap = BTreeMap<u16, u32>;

/// Build the privilege set a role is granted, all expiring at `expires_at`
pub fn privileges_for_role(role: Role, expires_at: u32) -> PrivilegeMap {
    let mut privileges = PrivilegeMap::new();
    privileges.insert(Privilege::JoinChannel.code(), expires_at);

    if role.can_publish() {
        for privilege in Privilege::PUBLISH {
            privileges.insert(privilege.code(), expires_at);
        }
    }

    privileges
}

/// Recover the role implied by a privilege set
pub fn role_from_privileges(privileges: &PrivilegeMap) -> Role {
    let publishes = Privilege::PUBLISH
        .iter()
        .all(|p| privileges.contains_key(&p.code()));

    if publishes {
        Role::Publisher
    } else {
        Role::Subscriber
    }
}
