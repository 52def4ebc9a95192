//! Access token verification

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::Mac;

use super::builder::{signing_mac, TOKEN_VERSION};
use super::packer::Unpacker;
use crate::domain::token::role_from_privileges;
use crate::domain::{Credentials, Privilege, UserIdentity, VerifiedToken, VerifyError};

/// Checks tokens signed with the same credentials and decodes their claims
#[derive(Debug, Clone)]
pub struct AccessTokenVerifier {
    credentials: Arc<Credentials>,
}

impl AccessTokenVerifier {
    pub fn new(credentials: Arc<Credentials>) -> Self {
        Self { credentials }
    }

    /// Verify `token` for a given channel and identity at time `now`.
    ///
    /// The channel and identity are not carried in clear inside the token, so
    /// the caller supplies the ones the holder claims; the CRCs and signature
    /// must match them.
    pub fn verify(
        &self,
        token: &str,
        channel_name: &str,
        identity: &UserIdentity,
        now: i64,
    ) -> Result<VerifiedToken, VerifyError> {
        let rest = token
            .strip_prefix(TOKEN_VERSION)
            .ok_or(VerifyError::UnsupportedVersion)?;
        let encoded = rest
            .strip_prefix(self.credentials.app_id())
            .ok_or(VerifyError::AppIdMismatch)?;

        let content = STANDARD
            .decode(encoded)
            .map_err(|e| VerifyError::malformed(format!("invalid base64: {}", e)))?;

        let mut unpacker = Unpacker::new(&content);
        let signature = unpacker.get_bytes("signature")?;
        let crc_channel = unpacker.get_u32("channel crc")?;
        let crc_uid = unpacker.get_u32("uid crc")?;
        let message = unpacker.get_bytes("message")?;
        unpacker.finish()?;

        let uid = identity.as_token_string();

        if crc_channel != crc32fast::hash(channel_name.as_bytes()) {
            return Err(VerifyError::ChannelMismatch);
        }

        if crc_uid != crc32fast::hash(uid.as_bytes()) {
            return Err(VerifyError::UidMismatch);
        }

        signing_mac(
            self.credentials.app_certificate(),
            self.credentials.app_id(),
            channel_name,
            &uid,
            message,
        )
        .verify_slice(signature)
        .map_err(|_| VerifyError::SignatureMismatch)?;

        let mut fields = Unpacker::new(message);
        let salt = fields.get_u32("salt")?;
        let message_ts = i64::from(fields.get_u32("message timestamp")?);
        let privileges = fields.get_privileges()?;
        fields.finish()?;

        let privilege_expired_ts = privileges
            .get(&Privilege::JoinChannel.code())
            .map(|ts| i64::from(*ts))
            .ok_or(VerifyError::MissingJoinPrivilege)?;

        if now > privilege_expired_ts {
            return Err(VerifyError::Expired {
                expired_at: privilege_expired_ts,
                now,
            });
        }

        if now > message_ts {
            return Err(VerifyError::Expired {
                expired_at: message_ts,
                now,
            });
        }

        Ok(VerifiedToken {
            channel_name: channel_name.to_string(),
            identity: identity.clone(),
            role: role_from_privileges(&privileges),
            privilege_expired_ts,
            salt,
            message_expires_at: message_ts,
            privileges,
        })
    }
}
