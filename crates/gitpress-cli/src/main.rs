//! gitpress - API server for the gitpress headless CMS.
//!
//! This is a thin wrapper over the `gitpress-server` library: it parses
//! flags, initializes logging, and serves the router.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use gitpress_github::GithubClient;
use gitpress_server::{AppState, router};

use cli::{Cli, Commands, ServeArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Serve(args) => serve(args).await,
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let github = GithubClient::with_endpoint(args.github_endpoint);
    let app = router(AppState::new(github));

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    info!(addr = %args.listen, "serving gitpress API");

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
