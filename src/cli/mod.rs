//! CLI module for the RTC token server
//!
//! Provides subcommands:
//! - `serve`: run the HTTP token endpoint
//! - `generate`: sign a token from the command line
//! - `verify`: check a token and print what it grants

pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

/// RTC Token Server - Issues signed channel access tokens
#[derive(Parser)]
#[command(name = "rtc-token-server")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Generate a token using the configured credentials
    Generate(token::GenerateArgs),

    /// Verify a token and print its claims as JSON
    Verify(token::VerifyArgs),
}
