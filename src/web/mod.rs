//! Web server module.

mod handlers;

pub use handlers::*;

use crate::config::ServerConfig;
use crate::lookup::LookupClient;
use crate::monitor::Monitor;
use crate::probe::Probe;
use crate::store::{LinkStore, SiteStore};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub monitor: Arc<Monitor>,
    pub site: Arc<SiteStore>,
    pub links: Arc<LinkStore>,
    pub lookup: Arc<LookupClient>,
    pub probe: Arc<dyn Probe>,
}

/// Web server for pingboard.
pub struct Server {
    state: AppState,
}

impl Server {
    /// Create a new server with the given dependencies.
    pub fn new(
        config: ServerConfig,
        monitor: Arc<Monitor>,
        site: Arc<SiteStore>,
        links: Arc<LinkStore>,
        lookup: Arc<LookupClient>,
        probe: Arc<dyn Probe>,
    ) -> Self {
        Self {
            state: AppState {
                config,
                monitor,
                site,
                links,
                lookup,
                probe,
            },
        }
    }

    /// Build the router with all routes.
    fn routes(&self) -> Router {
        let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

        Router::new()
            // Monitor session
            .route("/api/monitor", get(handlers::handle_monitor_snapshot))
            .route("/api/monitor/targets", post(handlers::handle_set_targets))
            .route("/api/monitor/start", post(handlers::handle_start))
            .route("/api/monitor/stop", post(handlers::handle_stop))
            .route("/api/monitor/reset", post(handlers::handle_reset))
            .route("/api/monitor/interval", put(handlers::handle_set_interval))
            .route("/api/monitor/report", get(handlers::handle_report))
            // One-shot check
            .route("/api/check", post(handlers::handle_check))
            // Site content
            .route("/api/site", get(handlers::handle_get_site))
            .route("/api/site", post(handlers::handle_save_site))
            // Link applications
            .route("/api/links", get(handlers::handle_get_links))
            .route("/api/links/apply", post(handlers::handle_apply_link))
            .route("/api/links/review", put(handlers::handle_review_link))
            // IP lookup
            .route("/api/ip", get(handlers::handle_ip_lookup))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(DefaultBodyLimit::max(1024 * 1024)) // 1MB
            .with_state(self.state.clone())
    }

    /// Start the server on the configured port.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let router = self.routes();

        tracing::info!("Web server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
