//! Documentation of a password-protected address explorer.
//!
//! One page: a CSV of named addresses, filtered by free text and by a country
//! read off the end of each address, shown as a table and as clustered map
//! markers.
//!
//!
//!
//! # Flow
//! - Visitor hits `/`, gets only the password prompt
//! - `POST /login` checks the shared password: a match sets a fresh session cookie,
//!   a miss redirects to `/?rejected=1` and stores nothing
//! - First unlocked request fetches the CSV, drops duplicates, extracts countries
//! - Dataset stays in memory for the life of the process, never re-fetched
//! - Every control change reloads `/` with the selection in the query string
//! - Filter + render run again against the cached dataset
//!
//!
//!
//! # Routes
//! - `GET /` prompt or explorer page
//! - `POST /login` form field `password`
//! - `GET /api/countries` country dropdown entries as JSON
//! - `GET /api/search?q=&country=&map=` filtered rows and map view as JSON
//! - `GET /health` liveness, no password
//!
//!
//!
//! # Notes
//!
//! ## Country heuristic
//! The country is whatever one or two capitalized words end the address. Nothing
//! checks it against real countries: `..., Evergreen Terrace` yields `Evergreen Terrace`.
//! Known limitation, left as is until someone decides on a lookup service.
//!
//! ## Sessions
//! Sessions live in memory only. Restarting the server locks everyone out again.
//!
//!
//!
//! # Setup
//!
//! Secrets are read from `/run/secrets/<NAME>` first, then from the environment.
//! ```sh
//! export ATLAS_PASSWORD='...'
//! export ATLAS_CSV_URL='https://drive.google.com/uc?id=...'
//! RUST_LOG=info cargo run -p atlas
//! ```
//!
//! Optional
//! - `RUST_PORT` (default `8080`)
//! - `ATLAS_BIND` (default `0.0.0.0`)
//! - `ATLAS_FETCH_TIMEOUT_SECS` (default `30`)
//! - `ATLAS_COUNTRY_PATTERN` (default [`country::DEFAULT_COUNTRY_PATTERN`])
//!
//! `ATLAS_CSV_URL` may also be a `file://` URL or a plain path.
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod country;
pub mod error;
pub mod filter;
pub mod gate;
pub mod html;
pub mod loader;
pub mod map;
pub mod models;
pub mod routes;
pub mod state;
pub mod view;

use config::Config;
use routes::{countries_handler, health_handler, index_handler, login_handler, search_handler};
use state::AppState;

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading configuration...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = AppState::new(config)?;

    let address = SocketAddr::new(state.config.bind, state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(address).await?;
    info!("Server running on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let api = Router::new()
        .route("/api/countries", get(countries_handler))
        .route("/api/search", get(search_handler))
        .layer(cors);

    Router::new()
        .route("/", get(index_handler))
        .route("/login", post(login_handler))
        .route("/health", get(health_handler))
        .merge(api)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
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
}
