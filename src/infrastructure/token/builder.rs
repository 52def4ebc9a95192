//! Access token signing
//!
//! Produces tokens in the RTC platform's "006" format:
//!
//! ```text
//! message   = u32 salt | u32 ts | u16 n | n * (u16 privilege, u32 expiry)
//! signature = HMAC-SHA256(app_certificate, app_id | channel | uid | message)
//! content   = bytes(signature) | u32 crc32(channel) | u32 crc32(uid) | bytes(message)
//! token     = "006" | app_id | base64(content)
//! ```
//!
//! Integers are little-endian and `bytes(..)` is a `u16` length prefix
//! followed by the raw bytes.

use std::ops::RangeInclusive;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use super::packer::Packer;
use crate::domain::token::privileges_for_role;
use crate::domain::{Credentials, PrivilegeMap, TokenClaims, TokenError};

pub(crate) type HmacSha256 = Hmac<Sha256>;

/// Format version tag at the start of every token
pub const TOKEN_VERSION: &str = "006";

/// How long the signed message itself stays valid after issuance
pub const MESSAGE_TTL_SECS: i64 = 24 * 3600;

const SALT_RANGE: RangeInclusive<u32> = 1..=99_999_999;

/// Signs channel access tokens with a fixed set of credentials
#[derive(Debug, Clone)]
pub struct AccessTokenBuilder {
    credentials: Arc<Credentials>,
}

impl AccessTokenBuilder {
    pub fn new(credentials: Arc<Credentials>) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Sign a token issued at `issued_at` with a freshly drawn salt
    pub fn build(&self, claims: &TokenClaims, issued_at: i64) -> Result<String, TokenError> {
        let salt = rand::thread_rng().gen_range(SALT_RANGE);
        self.build_with_salt(claims, issued_at, salt)
    }

    /// Sign a token with an explicit salt
    pub fn build_with_salt(
        &self,
        claims: &TokenClaims,
        issued_at: i64,
        salt: u32,
    ) -> Result<String, TokenError> {
        if claims.channel_name.is_empty() {
            return Err(TokenError::EmptyChannelName);
        }

        if claims.privilege_expired_ts <= issued_at {
            return Err(TokenError::ExpiryNotInFuture {
                issued_at,
                expires_at: claims.privilege_expired_ts,
            });
        }

        let expires_at = to_wire_timestamp(claims.privilege_expired_ts)?;
        let message_ts = issued_at
            .checked_add(MESSAGE_TTL_SECS)
            .ok_or(TokenError::TimestampOutOfRange(issued_at))
            .and_then(to_wire_timestamp)?;

        let privileges = privileges_for_role(claims.role, expires_at);
        let message = pack_message(salt, message_ts, &privileges)?;

        let app_id = self.credentials.app_id();
        let uid = claims.identity.as_token_string();

        let signature = signing_mac(
            self.credentials.app_certificate(),
            app_id,
            &claims.channel_name,
            &uid,
            &message,
        )
        .finalize()
        .into_bytes();

        let mut content = Packer::new();
        content
            .put_bytes("signature", &signature)?
            .put_u32(crc32fast::hash(claims.channel_name.as_bytes()))
            .put_u32(crc32fast::hash(uid.as_bytes()))
            .put_bytes("message", &message)?;

        Ok(format!(
            "{}{}{}",
            TOKEN_VERSION,
            app_id,
            STANDARD.encode(content.into_bytes())
        ))
    }
}

/// Pack the signed message: salt, message timestamp, then privileges
pub(crate) fn pack_message(
    salt: u32,
    message_ts: u32,
    privileges: &PrivilegeMap,
) -> Result<Vec<u8>, TokenError> {
    let mut packer = Packer::new();
    packer.put_u32(salt).put_u32(message_ts).put_privileges(privileges)?;
    Ok(packer.into_bytes())
}

/// HMAC keyed by the certificate over everything the signature binds
pub(crate) fn signing_mac(
    app_certificate: &str,
    app_id: &str,
    channel_name: &str,
    uid: &str,
    message: &[u8],
) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(app_certificate.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(app_id.as_bytes());
    mac.update(channel_name.as_bytes());
    mac.update(uid.as_bytes());
    mac.update(message);
    mac
}

fn to_wire_timestamp(ts: i64) -> Result<u32, TokenError> {
    u32::try_from(ts).map_err(|_| TokenError::TimestampOutOfRange(ts))
}
