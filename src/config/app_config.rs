use serde::Deserialize;

use crate::domain::token::DEFAULT_EXPIRATION_SECS;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub credentials: CredentialsConfig,
    pub token: TokenConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Signing credentials as read from configuration, before validation
#[derive(Clone, Deserialize, Default)]
#[serde(default)]
pub struct CredentialsConfig {
    pub app_id: String,
    pub app_certificate: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    pub default_expiration_secs: i64,
    pub strict_roles: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            default_expiration_secs: DEFAULT_EXPIRATION_SECS,
            strict_roles: false,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: Vec::new(),
        }
    }
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("app_id", &self.app_id)
            .field("app_certificate", &"[REDACTED]")
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from files and the environment.
    ///
    /// Sources, lowest precedence first: `config/default`, `config/local`,
    /// `APP__*` variables, then `AGORA_APP_ID`, `AGORA_APP_CERTIFICATE` and
    /// `PORT`.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("credentials.app_id", std::env::var("AGORA_APP_ID").ok())?
            .set_override_option(
                "credentials.app_certificate",
                std::env::var("AGORA_APP_CERTIFICATE").ok(),
            )?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;

        config.try_deserialize()
    }
}
