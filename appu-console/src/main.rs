mod cli;
mod commands;
mod output;

use appu_client::ClientConfig;
use clap::Parser;
use cli::Cli;
use commands::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries command output, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "appu_console=info,appu_client=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    if let Some(dir) = cli.session_dir {
        config = config.with_session_dir(dir);
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(timeout);
    }
    tracing::debug!(base_url = %config.base_url, session_dir = %config.session_dir.display(), "Configuration loaded");

    let ctx = Context {
        config,
        json: cli.json,
    };
    commands::run(&ctx, cli.command).await
}
