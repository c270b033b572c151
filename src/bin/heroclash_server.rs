//! heroclash HTTP server
//!
//! A standalone server binary exposing the comparison API over HTTP.

use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use heroclash::config::{Command, ServerConfig, USAGE};
use heroclash::storage::load_snapshot;
use heroclash::transport::{router, AppState};
use heroclash::{HeroEngine, SessionRegistry};

const DEFAULT_LOG_FILTER: &str = "heroclash=info,heroclash_server=info,tower_http=info";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Periodically drops sessions that have been idle longer than the TTL.
fn spawn_session_sweeper(sessions: Arc<SessionRegistry>, config: &ServerConfig) {
    let ttl = match chrono::Duration::from_std(config.session_ttl) {
        Ok(ttl) => ttl,
        Err(e) => {
            warn!(error = %e, "session TTL out of range; idle sessions will not be swept");
            return;
        }
    };
    let mut interval = tokio::time::interval(config.sweep_interval);
    tokio::spawn(async move {
        loop {
            interval.tick().await;
            if let Err(e) = sessions.evict_idle(chrono::Utc::now(), ttl) {
                warn!(error = %e, "session sweep failed");
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match ServerConfig::from_env_and_args() {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            print!("{USAGE}");
            return Ok(());
        }
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            eprint!("{USAGE}");
            std::process::exit(2);
        }
    };

    init_tracing();
    info!(version = env!("CARGO_PKG_VERSION"), "heroclash server starting");

    let snapshot = load_snapshot(&config.data_path)?;
    let engine = HeroEngine::new(Arc::new(snapshot.store));
    let sessions = Arc::new(SessionRegistry::new(config.max_sessions));
    spawn_session_sweeper(Arc::clone(&sessions), &config);

    let app = router(AppState::new(engine, sessions).with_snapshot(snapshot.info));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "listening; press Ctrl+C to stop");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
        })
        .await?;

    info!("shut down");
    Ok(())
}
