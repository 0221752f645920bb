//! HTTP server for the order book.
//!
//! Env: `PORT` (default 8080), `API_KEYS`/`DISABLE_AUTH` (see [`orderflux::auth`]),
//! `SNAPSHOT_FILE` (optional JSON snapshot to seed the book at startup).

use orderflux::api::{self, AppState};
use orderflux::{AuthConfig, Snapshot};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let _ = env_logger::try_init();
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let state = AppState::new();
    if let Ok(path) = std::env::var("SNAPSHOT_FILE") {
        match load_snapshot_file(&state, &path) {
            Ok(()) => eprintln!("order book seeded from {}", path),
            Err(e) => {
                eprintln!("failed to seed order book from {}: {}", path, e);
                std::process::exit(1);
            }
        }
    }

    let app = api::create_router(state, AuthConfig::from_env());

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.expect("bind");
    eprintln!("listening on http://{}", addr);
    axum::serve(listener, app.into_make_service())
        .await
        .expect("serve");
}

fn load_snapshot_file(state: &AppState, path: &str) -> Result<(), String> {
    let data = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let snapshot: Snapshot = serde_json::from_str(&data).map_err(|e| e.to_string())?;
    state
        .engine
        .write()
        .expect("lock")
        .load_snapshot(&snapshot)
}
