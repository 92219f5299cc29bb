//! Brutoneto API server.
//!
//! Environment:
//!
//! - `BRUTONETO_ADDR`: listen address, `0.0.0.0:3000` by default
//! - `BRUTONETO_PLACES`: path to a municipality table file; the table
//!   compiled into the binary is used when unset
//! - `RUST_LOG`: log filter, `info` by default

use std::env;

use brutoneto::api::{AppState, create_router};
use brutoneto::config::{TableLoader, TaxRateTable, builtin_table};
use brutoneto::error::EngineResult;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let table = load_table()?;
    info!(
        places = table.len(),
        last_updated = %table.metadata().last_updated,
        "Municipality table loaded"
    );

    let addr = env::var("BRUTONETO_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, create_router(AppState::new(table))).await?;
    Ok(())
}

fn load_table() -> EngineResult<TaxRateTable> {
    match env::var("BRUTONETO_PLACES") {
        Ok(path) => {
            info!(path = %path, "Loading municipality table from file");
            TableLoader::load(path)
        }
        Err(_) => builtin_table().cloned(),
    }
}
