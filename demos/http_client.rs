//! Table view of a running poultryd
//!
//! Usage:
//!
//! ```bash
//! POULTRY_URL=http://localhost:3000 cargo run --bin http_client
//! ```
//!
//! Loads the record list and prints it. When the service cannot be reached
//! the error flag is printed above the (empty) table instead.

use anyhow::Result;
use poultry_client::{HttpRecordApi, table};
use poultry_core::RecordSync;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let base_url = env::var("POULTRY_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let api = HttpRecordApi::new(base_url)?;
    tracing::info!("Loading records from {}", api.base_url());

    let mut client = RecordSync::new(api);
    client.load().await;
    print!("{}", table::render(client.state()));

    Ok(())
}
