//! CLI argument definitions.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};

use gitpress_github::DEFAULT_ENDPOINT;

/// Gitpress headless CMS API server.
#[derive(Parser, Debug)]
#[command(name = "gitpress")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the pages API
    Serve(ServeArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "GITPRESS_LISTEN", default_value = "127.0.0.1:3000")]
    pub listen: SocketAddr,

    /// GitHub GraphQL endpoint (override for GitHub Enterprise)
    #[arg(long, env = "GITPRESS_GITHUB_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub github_endpoint: String,
}
