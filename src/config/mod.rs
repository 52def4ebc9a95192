//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CorsConfig, CredentialsConfig, LogFormat, LoggingConfig, ServerConfig, TokenConfig,
};
