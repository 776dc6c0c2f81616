//! Distance Matrix API: travel distance and time for every origin/destination
//! pair.
//!
//! Origins and destinations are encoded with [`join_locations`], optional
//! parameters come from [`DistanceMatrixOptions`], and the body is parsed into
//! a [`DistanceMatrixResponse`]. Everything that can be rejected locally is
//! rejected before a request is sent.

pub mod options;
pub mod response;
pub mod travel_matrices;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    context::Context,
    error::{GoogleMapsError, Result},
    location::{Location, join_locations},
    params::QueryParams,
};

pub use options::{
    Avoid, DepartureTime, DistanceMatrixOptions, TrafficModel, TransitMode,
    TransitRoutingPreference, TravelMode, Units,
};
pub use response::{DistanceMatrixResponse, Element, Fare, Row, TextValue};
pub use travel_matrices::TravelMatrices;

pub const DISTANCE_MATRIX_API_PATH: &str = "/maps/api/distancematrix/json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DistanceMatrixRequest {
    pub origins: Vec<Location>,
    pub destinations: Vec<Location>,

    #[serde(default)]
    pub options: DistanceMatrixOptions,
}

impl DistanceMatrixRequest {
    pub fn new<O, D>(origins: &[O], destinations: &[D]) -> Self
    where
        O: Clone + Into<Location>,
        D: Clone + Into<Location>,
    {
        Self {
            origins: origins.iter().cloned().map(Into::into).collect(),
            destinations: destinations.iter().cloned().map(Into::into).collect(),
            options: DistanceMatrixOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DistanceMatrixOptions) -> Self {
        self.options = options;
        self
    }

    /// All parameters except the credentials, which the context adds.
    pub fn query_params(&self) -> Result<QueryParams> {
        let mut params = QueryParams::new();
        params.insert("origins", join_locations(&self.origins)?);
        params.insert("destinations", join_locations(&self.destinations)?);
        self.options.write_params(&mut params)?;
        Ok(params)
    }
}

impl Context {
    pub async fn distance_matrix(
        &self,
        request: &DistanceMatrixRequest,
    ) -> Result<DistanceMatrixResponse> {
        let params = request.query_params()?;

        debug!(
            "GoogleMapsApi: Requesting distance matrix {}x{}",
            request.origins.len(),
            request.destinations.len()
        );

        let response: DistanceMatrixResponse =
            self.get_json(DISTANCE_MATRIX_API_PATH, &params).await?;

        response.check_status().inspect_err(|err| {
            if let GoogleMapsError::RemoteService { status, .. } = err {
                warn!("GoogleMapsApi: Distance matrix failed with status {}", status);
            }
        })
    }

    /// Fetches the matrix and flattens it into [`TravelMatrices`].
    pub async fn travel_matrices(&self, request: &DistanceMatrixRequest) -> Result<TravelMatrices> {
        let response = self.distance_matrix(request).await?;
        TravelMatrices::try_from(&response)
    }
}

/// Requests the distance matrix between `origins` and `destinations`.
pub async fn distance_matrix<O, D>(
    ctx: &Context,
    origins: &[O],
    destinations: &[D],
    options: DistanceMatrixOptions,
) -> Result<DistanceMatrixResponse>
where
    O: Clone + Into<Location>,
    D: Clone + Into<Location>,
{
    let request = DistanceMatrixRequest::new(origins, destinations).with_options(options);
    ctx.distance_matrix(&request).await
}
