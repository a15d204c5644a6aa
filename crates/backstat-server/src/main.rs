//! backstat-server
//!
//! Listens for status datagrams from proxies reporting on their backends,
//! keeps the in-flight and recently completed requests per backend, and serves
//! the whole picture as `/world.json`.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use backstat_core::error::Result;
use backstat_server::{cli::Cli, lifecycle, server::Server};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("backstat_server=info"));
    fmt().with_env_filter(filter).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "backstat-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = cli.resolve_config()?;
    tracing::info!(
        ingest = %cfg.ingest.listen,
        http = %cfg.http.listen,
        completed_capacity = cfg.registry.completed_capacity,
        "config loaded"
    );

    let server = Server::bind(cfg).await?;
    server.run(lifecycle::ctrl_c()).await
}
