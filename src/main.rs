//! Pingboard - Periodic Connectivity Monitoring Service
//!
//! Samples reachability of a configurable target list over HTTP and serves
//! live stats, reports, and site content through a JSON API.

mod catalog;
mod config;
mod lookup;
mod monitor;
mod probe;
mod store;
mod web;

use config::ServerConfig;
use lookup::LookupClient;
use monitor::Monitor;
use probe::{HttpProbe, Probe};
use store::{LinkStore, SiteStore};
use web::Server;

use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("pingboard=info".parse()?))
        .init();

    // Load configuration
    let cfg = ServerConfig::load();
    tracing::info!("Starting pingboard on port {}...", cfg.http_port);
    tracing::info!("Using data directory {}", cfg.data_dir);

    // Document stores
    let site = Arc::new(SiteStore::new(&cfg.data_dir));
    let links = Arc::new(LinkStore::new(&cfg.data_dir));

    // Probe and sampler
    let probe: Arc<dyn Probe> =
        Arc::new(HttpProbe::new(Duration::from_secs(cfg.probe_timeout_secs))?);
    let monitor = Arc::new(Monitor::new(probe.clone()));

    // IP metadata proxy
    let lookup = Arc::new(LookupClient::new(&cfg.lookup_url, cfg.lookup_key.clone())?);

    // Start web server
    let server = Server::new(cfg, monitor, site, links, lookup, probe);
    server.start().await?;

    Ok(())
}
