//! Client binding for the Google Maps web services.
//!
//! A [`Context`] holds the credentials and the HTTP transport. Requests are
//! built from typed parameters, locations are encoded the way the service
//! expects, and JSON bodies are parsed into plain structs.
//!
//! ```no_run
//! use googlemaps::{Context, distance_matrix::{DistanceMatrixOptions, TravelMode, distance_matrix}};
//!
//! # async fn run() -> googlemaps::Result<()> {
//! let ctx = Context::from_env()?;
//! let options = DistanceMatrixOptions::default().with_mode(TravelMode::Bicycling);
//! let matrix = distance_matrix(&ctx, &["Vancouver BC", "Seattle"], &["San Francisco"], options).await?;
//! println!("{}", matrix.rows.len());
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod distance_matrix;
pub mod error;
pub mod location;
pub mod params;
pub mod signing;

pub use context::{Context, ContextParams, Credentials};
pub use error::{GoogleMapsError, Result};
pub use location::{LatLng, Location};
