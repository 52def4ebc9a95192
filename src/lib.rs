//! RTC Token Server
//!
//! Issues short-lived, HMAC-signed access tokens for joining real-time
//! audio/video channels:
//! - `POST /generate-token` HTTP endpoint
//! - Offline `generate` and `verify` CLI commands
//! - Credentials loaded once from configuration and shared read-only

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use api::state::AppState;
use domain::{Credentials, DomainError};
use infrastructure::{
    services::{TokenService, TokenServiceConfig},
    token::{AccessTokenBuilder, AccessTokenVerifier},
};
use tracing::info;

/// Validate the configured credentials; empty values are a fatal startup error
pub fn load_credentials(config: &AppConfig) -> Result<Arc<Credentials>, DomainError> {
    Credentials::new(
        config.credentials.app_id.as_str(),
        config.credentials.app_certificate.as_str(),
    )
    .map(Arc::new)
    .map_err(|e| {
        DomainError::configuration(format!(
            "{}. Set AGORA_APP_ID and AGORA_APP_CERTIFICATE (or APP__CREDENTIALS__*)",
            e
        ))
    })
}

/// Build the token service from configuration
pub fn create_token_service(config: &AppConfig) -> anyhow::Result<TokenService> {
    let credentials = load_credentials(config).context("Invalid signing credentials")?;

    let service_config = TokenServiceConfig {
        default_expiration_secs: config.token.default_expiration_secs,
        strict_roles: config.token.strict_roles,
    };

    info!(
        app_id = %credentials.app_id(),
        default_expiration_secs = service_config.default_expiration_secs,
        strict_roles = service_config.strict_roles,
        "Token service configured"
    );

    Ok(TokenService::new(
        AccessTokenBuilder::new(credentials),
        service_config,
    ))
}

/// Build a verifier sharing the configured credentials
pub fn create_token_verifier(config: &AppConfig) -> anyhow::Result<AccessTokenVerifier> {
    let credentials = load_credentials(config).context("Invalid signing credentials")?;
    Ok(AccessTokenVerifier::new(credentials))
}

/// Create the application state with all services initialized
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let service = create_token_service(config)?;
    Ok(AppState::new(Arc::new(service)))
}
