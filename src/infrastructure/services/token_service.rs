//! Token issuance service

use std::fmt::Debug;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::token::{CHANNEL_NAME_REQUIRED, DEFAULT_EXPIRATION_SECS};
use crate::domain::{DomainError, Role, TokenClaims, TokenError, TokenRequest};
use crate::infrastructure::clock::{Clock, SystemClock};
use crate::infrastructure::token::AccessTokenBuilder;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Validity window applied when a request does not specify one
    pub default_expiration_secs: i64,
    /// Reject roles other than the defined ones instead of passing them through
    pub strict_roles: bool,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            default_expiration_secs: DEFAULT_EXPIRATION_SECS,
            strict_roles: false,
        }
    }
}

/// A freshly signed token and what it was signed for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Trait for token service (for dynamic dispatch in AppState)
pub trait TokenServiceTrait: Send + Sync + Debug {
    /// Validate a request and sign a token for it
    fn issue(&self, request: TokenRequest) -> Result<IssuedToken, DomainError>;
}

/// Issues channel tokens from a single set of credentials
pub struct TokenService {
    builder: AccessTokenBuilder,
    clock: Arc<dyn Clock>,
    config: TokenServiceConfig,
}

impl TokenService {
    pub fn new(builder: AccessTokenBuilder, config: TokenServiceConfig) -> Self {
        Self::with_clock(builder, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        builder: AccessTokenBuilder,
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            builder,
            clock,
            config,
        }
    }

    fn check_role(&self, role: Role) -> Result<(), DomainError> {
        if role.is_known() {
            return Ok(());
        }

        if self.config.strict_roles {
            return Err(DomainError::validation(format!(
                "Unsupported role: {}",
                role.as_u32()
            )));
        }

        warn!(role = role.as_u32(), "Passing through unrecognized role");
        Ok(())
    }
}

impl Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("app_id", &self.builder.credentials().app_id())
            .field("config", &self.config)
            .finish()
    }
}

impl TokenServiceTrait for TokenService {
    fn issue(&self, request: TokenRequest) -> Result<IssuedToken, DomainError> {
        if !request.has_channel_name() {
            return Err(DomainError::validation(CHANNEL_NAME_REQUIRED));
        }

        self.check_role(request.role)?;

        let duration = request
            .expiration_secs
            .unwrap_or(self.config.default_expiration_secs);
        let issued_at = self.clock.now_unix();
        let expires_at = issued_at
            .checked_add(duration)
            .ok_or(TokenError::TimestampOutOfRange(issued_at))?;

        let claims = TokenClaims {
            channel_name: request.channel_name,
            identity: request.identity,
            role: request.role,
            privilege_expired_ts: expires_at,
        };

        let token = self.builder.build(&claims, issued_at)?;

        info!(
            channel = %claims.channel_name,
            user = %claims.identity,
            role = %claims.role,
            expires_at,
            "Issued channel token"
        );

        Ok(IssuedToken {
            token,
            issued_at,
            expires_at,
        })
    }
}
