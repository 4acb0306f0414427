//! Ballot Server - vote submission and tally services.
//!
//! Two binaries share this library:
//!
//! - `voting-app` accepts ballots on `POST /vote`
//! - `result-app` serves per-candidate counts on `GET /results`
//!
//! Both wait for PostgreSQL at startup with bounded retry, optionally apply the
//! schema, and then serve requests from a shared connection pool.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod html;
pub mod routes;
pub mod telemetry;

use crate::config::Config;
use crate::db::{TokioSleep, VoteStore};
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// The two deployable services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Voting,
    Results,
}

impl Service {
    pub fn name(&self) -> &'static str {
        match self {
            Service::Voting => "voting-app",
            Service::Results => "result-app",
        }
    }

    /// Listen port used when `PORT` is unset.
    pub fn default_port(&self) -> u16 {
        match self {
            Service::Voting => 5000,
            Service::Results => 5001,
        }
    }

    fn routes(&self) -> Router<AppState> {
        match self {
            Service::Voting => routes::voting_routes(),
            Service::Results => routes::results_routes(),
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VoteStore>,
    pub service: Service,
}

impl AppState {
    pub fn new(service: Service, store: Arc<dyn VoteStore>) -> Self {
        Self { store, service }
    }
}

/// Build the router for `state.service` with tracing and CORS layers.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    state.service.routes().layer(layers).with_state(state)
}

/// Start a service and block until it shuts down.
///
/// Fails before binding if configuration is invalid or the database stays
/// unreachable for every startup attempt.
pub async fn run(service: Service) -> Result<(), Box<dyn std::error::Error>> {
    // Load .env first so RUST_LOG from it reaches the filter
    dotenvy::dotenv().ok();
    telemetry::init();

    let config = Config::from_env(service.default_port())?;

    tracing::info!("Starting {} on {}", service.name(), config.server.addr());

    let db = db::connect_with_retry(&config.database, &TokioSleep).await?;

    if config.database.init_schema {
        db::run_migrations(&db).await?;
    } else {
        tracing::info!("DB_INIT_SCHEMA is off, skipping schema initialization");
    }

    let state = AppState::new(service, Arc::new(db.clone()));
    let result = serve(&config, state).await;

    db.close().await;
    result
}

async fn serve(config: &Config, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
