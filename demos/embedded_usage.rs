//! Minimal embedding example for poultry-core
//!
//! Drives the client state container against an in-process service over the
//! memory store, printing the table after each step. No network involved.

use anyhow::Result;
use poultry_client::table;
use poultry_core::{Field, MemoryRecordStore, RecordService, RecordSync};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let service = RecordService::new(Arc::new(MemoryRecordStore::new()));
    let mut client = RecordSync::new(service);

    client.load().await;
    println!("Initial table:\n{}", table::render(client.state()));

    // Two days of production figures
    for (day, hens, eggs) in [("1", "50", "40"), ("2", "50", "43")] {
        client.set_field(Field::ProductionNumber, day);
        client.set_field(Field::NumberOfHens, hens);
        client.set_field(Field::EggsLaid, eggs);
        client.set_field(Field::FeedConsumption, "10.5");
        client.set_field(Field::VaccinationDate, "2024-01-01");
        client.submit().await;
    }
    println!("After create:\n{}", table::render(client.state()));

    // Correct the hen count of the first record
    let first = client.state().cache()[0].id.clone();
    client.begin_edit(&first);
    println!("Form mode: {}", client.state().mode().submit_label());
    client.set_field(Field::NumberOfHens, "48");
    client.submit().await;
    println!("After edit:\n{}", table::render(client.state()));

    // Non-numeric input is rejected and the form kept for correction
    client.set_field(Field::EggsLaid, "lots");
    if !client.submit().await {
        println!(
            "Rejected input, form still holds '{}'\n{}",
            client.state().form().get(Field::EggsLaid),
            table::render(client.state())
        );
    }
    client.cancel_edit();

    client.delete(&first).await;
    println!("After delete:\n{}", table::render(client.state()));

    Ok(())
}
