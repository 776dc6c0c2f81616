use serde::{Deserialize, Serialize};

use crate::error::{GoogleMapsError, Result};

pub const STATUS_OK: &str = "OK";

/// Distance Matrix body, mirroring the service's JSON.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DistanceMatrixResponse {
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    #[serde(default)]
    pub origin_addresses: Vec<String>,

    #[serde(default)]
    pub destination_addresses: Vec<String>,

    /// One row per origin, in request order
    #[serde(default)]
    pub rows: Vec<Row>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Row {
    /// One element per destination, in request order
    pub elements: Vec<Element>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Element {
    /// OK, NOT_FOUND, ZERO_RESULTS or MAX_ROUTE_LENGTH_EXCEEDED
    pub status: String,

    /// Meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<TextValue>,

    /// Seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TextValue>,

    /// Only present for driving requests with a departure time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_in_traffic: Option<TextValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fare: Option<Fare>,
}

impl Element {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TextValue {
    pub text: String,
    pub value: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Fare {
    pub currency: String,
    pub value: f64,
    pub text: String,
}

impl DistanceMatrixResponse {
    /// Parses a body and fails with [`GoogleMapsError::RemoteService`] when
    /// the service reports a non-OK status.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let response: DistanceMatrixResponse = serde_json::from_slice(body)?;
        response.check_status()
    }

    pub fn check_status(self) -> Result<Self> {
        if self.status == STATUS_OK {
            Ok(self)
        } else {
            Err(GoogleMapsError::RemoteService {
                status: self.status,
                message: self.error_message,
            })
        }
    }

    pub fn element(&self, origin: usize, destination: usize) -> Option<&Element> {
        self.rows.get(origin)?.elements.get(destination)
    }
}
