//! CLI entry point for the session client.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use session_client::{Credentials, SessionClient, SessionConfig};
use tracing::{debug, error, info, warn};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(
        username = %args.username,
        login_url = %args.login_url,
        base_url = %args.base_url,
        "CLI arguments parsed"
    );

    let mut config = SessionConfig::new(
        Credentials::new(args.username, args.password),
        args.login_url,
        args.base_url,
    );
    if let Some(secs) = args.connect_timeout {
        config = config.with_connect_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = args.read_timeout {
        config = config.with_read_timeout(Duration::from_secs(secs));
    }

    let mut client = SessionClient::new(config)?;
    if let Err(error) = client.login().await {
        if error.is_unauthorized() {
            error!(username = %client.username(), "Login rejected; check credentials");
        }
        return Err(error.into());
    }

    if client.is_authenticated() {
        info!("Authentication successful");
    } else {
        warn!("Authentication failed; check credentials and login URL");
    }

    let Some(body) = client.authenticated_get(&args.url).await? else {
        return Ok(());
    };

    tokio::fs::write(&args.output, &body)
        .await
        .with_context(|| format!("failed to write response to {}", args.output.display()))?;
    info!(path = %args.output.display(), bytes = body.len(), "Response data written");

    Ok(())
}
