use serde::{Deserialize, Serialize};

use crate::{
    distance_matrix::response::DistanceMatrixResponse,
    error::{GoogleMapsError, Result},
};

/// TravelMatrices holds the travel distance, time, and cost matrices.
/// Stored as flat row-major vectors, `origins x destinations`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TravelMatrices {
    /// Meters
    pub distances: Vec<f64>,
    /// Seconds
    pub times: Vec<f64>,

    // The distance matrix service doesn't give us a cost
    pub costs: Option<Vec<f64>>,
}

impl TryFrom<&DistanceMatrixResponse> for TravelMatrices {
    type Error = GoogleMapsError;

    fn try_from(response: &DistanceMatrixResponse) -> Result<Self> {
        let expected = match response.destination_addresses.len() {
            0 => response.rows.first().map_or(0, |row| row.elements.len()),
            len => len,
        };

        let mut distances = Vec::with_capacity(expected * response.rows.len());
        let mut times = Vec::with_capacity(expected * response.rows.len());

        for (origin, row) in response.rows.iter().enumerate() {
            if row.elements.len() != expected {
                return Err(GoogleMapsError::RaggedMatrix {
                    origin,
                    expected,
                    actual: row.elements.len(),
                });
            }

            for (destination, element) in row.elements.iter().enumerate() {
                let unroutable = || GoogleMapsError::UnroutableElement {
                    origin,
                    destination,
                    status: element.status.clone(),
                };

                if !element.is_ok() {
                    return Err(unroutable());
                }

                let distance = element.distance.as_ref().ok_or_else(unroutable)?;
                let duration = element.duration.as_ref().ok_or_else(unroutable)?;

                distances.push(distance.value);
                times.push(duration.value);
            }
        }

        Ok(TravelMatrices {
            distances,
            times,
            costs: None,
        })
    }
}
