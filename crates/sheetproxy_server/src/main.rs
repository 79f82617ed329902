use anyhow::Result;
use clap::Parser;
use sheetproxy_cache::{CacheConfig, CacheGateway, InMemoryCacheStore};
use sheetproxy_server::{ProxyConfig, SheetFetcher, SheetService, create_router, init_logging};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Serve one Google Sheet as cached JSON.
#[derive(Parser, Debug)]
#[command(name = "sheetproxy", author, version, about, long_about = None)]
struct Args {
    /// Configuration file, applied over the default locations
    #[arg(short, long, env = "SHEETPROXY_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overriding the configured one
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let mut config = ProxyConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config = config.with_bind_address(bind);
    }
    if args.json_logs {
        config = config.with_json_logs(true);
    }

    init_logging(config.log_level(), *config.json_logs())?;

    info!(
        document_id = %config.document_id(),
        sheet_name = %config.sheet_name(),
        cache_ttl_seconds = config.cache_ttl_seconds(),
        cache_read_policy = %config.cache_read_policy(),
        "Starting sheetproxy"
    );

    let store = Arc::new(InMemoryCacheStore::new(
        CacheConfig::default().with_max_entries(*config.cache_max_entries()),
    ));
    let cache = CacheGateway::new(store.clone()).with_read_policy(*config.cache_read_policy());
    let fetcher = Arc::new(SheetFetcher::from_config(&config)?);
    let service = Arc::new(SheetService::new(&config, cache, fetcher));

    // Expired entries are otherwise only dropped when read.
    let sweep_every = Duration::from_secs((*config.cache_ttl_seconds()).max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_every);
        loop {
            interval.tick().await;
            store.cleanup_expired();
        }
    });

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(address = %listener.local_addr()?, "Listening");

    axum::serve(listener, create_router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
