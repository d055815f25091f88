use std::sync::Arc;

use chrono::Utc;
use tokio::net::TcpListener;
use tracing::{error, info};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::store::{MemoryStore, seed_default_admin};
use payroll_engine::telemetry::{get_subscriber, init_subscriber};

const DEFAULT_CONFIG_PATH: &str = "config/payroll.yaml";

#[tokio::main]
async fn main() {
    if let Err(err) = init_subscriber(get_subscriber("info")) {
        eprintln!("Failed to install tracing subscriber: {}", err);
        std::process::exit(1);
    }

    if let Err(err) = run().await {
        error!(error = %err, "Server exited with error");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path =
        std::env::var("PAYROLL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = ConfigLoader::load(&config_path)?;
    info!(path = %config_path, "Configuration loaded");

    let store = Arc::new(MemoryStore::new());
    seed_default_admin(store.as_ref(), config.admin(), Utc::now())?;

    let address = config.server().bind_address();
    let router = create_router(AppState::new(store));

    let listener = TcpListener::bind(&address).await?;
    info!(address = %address, "Payroll engine listening");
    axum::serve(listener, router).await?;

    Ok(())
}
