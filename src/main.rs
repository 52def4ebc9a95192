use clap::Parser;
use rtc_token_server::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Generate(args) => cli::token::generate(args),
        Command::Verify(args) => cli::token::verify(args),
    }
}
