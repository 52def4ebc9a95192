//! Signing credentials

use tracing::warn;

use super::TokenError;

/// Length of an app ID as issued by the RTC platform console
const EXPECTED_APP_ID_LENGTH: usize = 32;

/// App ID and app certificate pair used to sign tokens.
///
/// Built once at startup and shared read-only. The certificate is never
/// exposed through `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    app_id: String,
    app_certificate: String,
}

impl Credentials {
    /// Create credentials, rejecting empty or whitespace-only values
    pub fn new(
        app_id: impl Into<String>,
        app_certificate: impl Into<String>,
    ) -> Result<Self, TokenError> {
        let app_id = app_id.into().trim().to_string();
        let app_certificate = app_certificate.into().trim().to_string();

        if app_id.is_empty() {
            return Err(TokenError::EmptyAppId);
        }

        if app_certificate.is_empty() {
            return Err(TokenError::EmptyAppCertificate);
        }

        if app_id.len() != EXPECTED_APP_ID_LENGTH {
            warn!(
                app_id_len = app_id.len(),
                "App ID is not {} characters; the RTC platform may reject tokens",
                EXPECTED_APP_ID_LENGTH
            );
        }

        Ok(Self {
            app_id,
            app_certificate,
        })
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn app_certificate(&self) -> &str {
        &self.app_certificate
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_certificate", &"[REDACTED]")
            .finish()
    }
}
