//! Prints a distance matrix as a table.
//!
//! ```sh
//! GOOGLE_MAPS_API_KEY=... cargo run --example distance_matrix -- "Vancouver BC|Seattle" "San Francisco|Victoria BC"
//! ```

use comfy_table::Table;
use googlemaps::{
    Context,
    distance_matrix::{DistanceMatrixOptions, TravelMode, distance_matrix},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut args = std::env::args().skip(1);
    let origins = args
        .next()
        .unwrap_or_else(|| "Vancouver BC|Seattle".to_string());
    let destinations = args
        .next()
        .unwrap_or_else(|| "San Francisco|Victoria BC".to_string());

    let origins: Vec<&str> = origins.split('|').collect();
    let destinations: Vec<&str> = destinations.split('|').collect();

    let ctx = Context::from_env()?;
    let options = DistanceMatrixOptions::default().with_mode(TravelMode::Driving);
    let matrix = distance_matrix(&ctx, &origins, &destinations, options).await?;

    info!(
        "Received {} rows for {} destinations",
        matrix.rows.len(),
        matrix.destination_addresses.len()
    );

    let mut table = Table::new();
    let mut header = vec![String::new()];
    header.extend(matrix.destination_addresses.iter().cloned());
    table.set_header(header);

    for (origin, row) in matrix.origin_addresses.iter().zip(&matrix.rows) {
        let mut cells = vec![origin.clone()];
        cells.extend(row.elements.iter().map(|element| {
            match (&element.distance, &element.duration) {
                (Some(distance), Some(duration)) => format!("{} / {}", distance.text, duration.text),
                _ => element.status.clone(),
            }
        }));
        table.add_row(cells);
    }

    println!("{table}");

    Ok(())
}
