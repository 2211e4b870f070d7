/*****************************************************************************************
 *
 *  PersonDB – Minimal In-Memory Person Registry in Rust
 *  ----------------------------------------------------
 *
 *  VERSION: persons collection + random pick + Basic-auth admin portal
 *
 *****************************************************************************************/

mod app;
mod config;
mod errors;
mod routes;
mod services;
mod state;

use std::path::PathBuf;

use axum::serve;
use tokio::net::TcpListener;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::FmtSubscriber;

use crate::config::{AdminSecret, AppConfig};
use crate::errors::StartupError;
use crate::services::person_service;
use crate::state::person::{new_store, PersonStore};

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    //
    // ────────────────────────────────────────────────────────
    //  Load configuration (config.json is optional)
    // ────────────────────────────────────────────────────────
    //
    let config_path = locate_config();
    let cfg = match &config_path {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default(),
    };

    //
    // ────────────────────────────────────────────────────────
    //  Configure logging
    // ────────────────────────────────────────────────────────
    //
    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&cfg.log_level))
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
    }

    match &config_path {
        Some(path) => tracing::info!("Loaded config.json from {}", path.display()),
        None => tracing::info!("No config.json found, using defaults"),
    }
    tracing::info!("Starting PersonDB…");
    tracing::info!("Loaded configuration: {:?}", cfg);

    //
    // ────────────────────────────────────────────────────────
    //  Admin secret (fatal if missing)
    // ────────────────────────────────────────────────────────
    //
    let secret = AdminSecret::from_env().inspect_err(|e| tracing::error!("{e}"))?;

    //
    // ────────────────────────────────────────────────────────
    //  Build Axum app around a fresh store
    // ────────────────────────────────────────────────────────
    //
    let store = new_store();
    let app = app::build_app(store.clone(), secret);

    //
    // ────────────────────────────────────────────────────────
    //  Bind server and start listening
    // ────────────────────────────────────────────────────────
    //
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })
        .inspect_err(|e| tracing::error!("{e}"))?;

    tracing::info!("Listening on http://{}", addr);

    serve(listener, app)
        .with_graceful_shutdown(shutdown(store))
        .await
        .map_err(StartupError::Serve)
}

/// Look for config.json next to the executable, then one directory up.
fn locate_config() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;

    [exe_dir.join("config.json"), exe_dir.join("..").join("config.json")]
        .into_iter()
        .find(|p| p.exists())
}

fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info"  => LevelFilter::INFO,
        "warn"  => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

//
// ─────────────────────────────────────────────────────────────
//  Graceful shutdown handler
// ─────────────────────────────────────────────────────────────
//
async fn shutdown(store: PersonStore) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }

    tracing::warn!(
        "CTRL+C received, discarding {} persons. Goodbye.",
        person_service::count(&store)
    );
}
