pub mod api;
pub mod auth;
pub mod content;
pub mod error;
pub mod state;
pub mod storage;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

pub async fn run() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("ROBOHUB_LOG"))
        .init();

    let app = state::AppState::new(storage::init_db_from_env().await, auth::AuthClient::default());

    api::run_server(app).await
}
