//! Generate and verify commands - offline token tooling

use clap::Args;

use crate::config::AppConfig;
use crate::domain::{Role, TokenRequest, UserIdentity};
use crate::infrastructure::clock::{Clock, SystemClock};
use crate::infrastructure::logging;
use crate::infrastructure::services::TokenServiceTrait;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Channel to grant access to
    #[arg(long)]
    pub channel: String,

    /// Numeric user ID; 0 allows any user
    #[arg(long, default_value_t = 0, conflicts_with = "account")]
    pub uid: u32,

    /// String user account, used instead of a numeric uid
    #[arg(long)]
    pub account: Option<String>,

    /// Role: 1 = publisher, 2 = subscriber
    #[arg(long, default_value_t = Role::PUBLISHER)]
    pub role: u32,

    /// Validity in seconds (defaults to the configured value)
    #[arg(long)]
    pub expire: Option<i64>,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Token to check
    #[arg(long)]
    pub token: String,

    /// Channel the token is presented for
    #[arg(long)]
    pub channel: String,

    /// Numeric user ID the token is presented by
    #[arg(long, default_value_t = 0, conflicts_with = "account")]
    pub uid: u32,

    /// String user account the token is presented by
    #[arg(long)]
    pub account: Option<String>,

    /// Unix time to check expiry against (defaults to now)
    #[arg(long)]
    pub at: Option<i64>,
}

impl GenerateArgs {
    fn to_request(&self) -> TokenRequest {
        let request = TokenRequest::new(self.channel.clone())
            .with_identity(UserIdentity::from_parts(self.uid, self.account.clone()))
            .with_role(Role::from(self.role));

        match self.expire {
            Some(secs) => request.with_expiration_secs(secs),
            None => request,
        }
    }
}

impl VerifyArgs {
    fn identity(&self) -> UserIdentity {
        UserIdentity::from_parts(self.uid, self.account.clone())
    }
}

fn load_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);
    Ok(config)
}

/// Sign a token and print it on stdout
pub fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = load_config()?;
    let service = crate::create_token_service(&config)?;

    let issued = service.issue(args.to_request())?;
    println!("{}", issued.token);

    Ok(())
}

/// Verify a token and print the decoded claims as JSON
pub fn verify(args: VerifyArgs) -> anyhow::Result<()> {
    let config = load_config()?;
    let verifier = crate::create_token_verifier(&config)?;

    let now = args.at.unwrap_or_else(|| SystemClock.now_unix());
    let verified = verifier.verify(&args.token, &args.channel, &args.identity(), now)?;

    println!("{}", serde_json::to_string_pretty(&verified)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Command};

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn test_generate_defaults() {
        let Command::Generate(args) = parse(&["rtc-token-server", "generate", "--channel", "room"])
        else {
            panic!("expected generate command");
        };

        let request = args.to_request();
        assert_eq!(request.channel_name, "room");
        assert_eq!(request.identity, UserIdentity::Uid(0));
        assert_eq!(request.role, Role::Publisher);
        assert_eq!(request.expiration_secs, None);
    }

    #[test]
    fn test_generate_all_options() {
        let Command::Generate(args) = parse(&[
            "rtc-token-server",
            "generate",
            "--channel",
            "room",
            "--account",
            "alice",
            "--role",
            "2",
            "--expire",
            "60",
        ]) else {
            panic!("expected generate command");
        };

        let request = args.to_request();
        assert_eq!(request.identity, UserIdentity::Account("alice".to_string()));
        assert_eq!(request.role, Role::Subscriber);
        assert_eq!(request.expiration_secs, Some(60));
    }

    #[test]
    fn test_uid_and_account_conflict() {
        let result = Cli::try_parse_from([
            "rtc-token-server",
            "generate",
            "--channel",
            "room",
            "--uid",
            "5",
            "--account",
            "alice",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_verify_args() {
        let Command::Verify(args) = parse(&[
            "rtc-token-server",
            "verify",
            "--token",
            "006abc",
            "--channel",
            "room",
            "--uid",
            "42",
            "--at",
            "1700000000",
        ]) else {
            panic!("expected verify command");
        };

        assert_eq!(args.identity(), UserIdentity::Uid(42));
        assert_eq!(args.at, Some(1_700_000_000));
    }
}
