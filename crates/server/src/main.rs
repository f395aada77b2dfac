//! lmu-races server entry point.
//!
//! Boots the refresh and eviction schedulers over a shared race store and
//! serves the race queries as MCP tools on stdio transport. Logging goes to
//! stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use lmu_races_client::{FetchClient, FetchConfig, RaceExtractor};
use lmu_races_core::{AppConfig, EVICTION_PERIOD, Store};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

mod handler;
mod query;
mod schedule;
mod tools;

use query::RaceQueryService;
use schedule::{EvictionScheduler, RefreshScheduler};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let source_url = config.source_url()?;
    let extractor = RaceExtractor::new(config.timezone()?);
    let client = FetchClient::new(FetchConfig::from(&config))?;

    tracing::info!(url = %source_url, timezone = %config.timezone, "Starting lmu-races server on stdio transport");

    let store = Store::new();
    let cancel = CancellationToken::new();

    let refresh =
        RefreshScheduler::new(Arc::new(client), extractor, store.clone(), source_url, config.refresh_interval());
    let eviction = EvictionScheduler::new(store.clone(), EVICTION_PERIOD);
    let refresh_task = tokio::spawn(refresh.run(cancel.clone()));
    let eviction_task = tokio::spawn(eviction.run(cancel.clone()));

    let handler = handler::RaceServer::new(RaceQueryService::new(store));
    let server = serve_server(handler, stdio()).await?;

    let outcome = tokio::select! {
        quit = server.waiting() => quit.map(|reason| tracing::info!(?reason, "MCP session ended")),
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupt received");
            Ok(())
        }
    };

    cancel.cancel();
    let (refresh_result, eviction_result) = tokio::join!(refresh_task, eviction_task);
    refresh_result?;
    eviction_result?;
    outcome?;

    tracing::info!("lmu-races server stopped");

    Ok(())
}
