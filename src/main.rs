use habit_tracker::auth::StaticCredentials;
use habit_tracker::{load_data, resolve_data_path, router, AppState};
use std::{env, net::SocketAddr, sync::Arc};
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_path = resolve_data_path();
    if let Some(parent) = data_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let verifier = StaticCredentials::from_env();
    if verifier.is_empty() {
        warn!("no users configured; set APP_USERS=name:password[,name:password]");
    }

    let data = load_data(&data_path).await;
    let year = resolve_tracked_year();
    info!("tracking year {year}, data at {}", data_path.display());

    let state = AppState::new(data_path, year, data, Arc::new(verifier));
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn resolve_tracked_year() -> i32 {
    env::var("APP_YEAR")
        .ok()
        .and_then(|value| value.parse::<i32>().ok())
        .unwrap_or(2026)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
