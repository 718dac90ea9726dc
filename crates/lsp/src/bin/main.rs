use anyhow::Context;
use clap::Parser;
use dbt_lsp_server::{Backend, Cli, ServerConfig};
use tower_lsp::{LspService, Server};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the protocol, so logs go to stderr
    let default_level = if cli.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")?;

    tracing::info!(
        version = dbt_lsp_server::VERSION,
        fusion = ?cli.fusion,
        "starting dbt language server"
    );

    let config = ServerConfig::from_cli(&cli);
    let (service, socket) = LspService::new(move |client| Backend::new(client, config));

    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
        .concurrency_level(1)
        .serve(service)
        .await;

    Ok(())
}
