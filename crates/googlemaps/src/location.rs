use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{GoogleMapsError, Result};

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(GoogleMapsError::invalid_argument(format!(
                "coordinates must be finite, got ({}, {})",
                self.lat, self.lng
            )));
        }

        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(GoogleMapsError::invalid_argument(format!(
                "latitude {} is outside [-90, 90]",
                self.lat
            )));
        }

        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(GoogleMapsError::invalid_argument(format!(
                "longitude {} is outside [-180, 180]",
                self.lng
            )));
        }

        Ok(())
    }
}

/// Rounded to 6 decimal places, comma separated, no spaces.
impl Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<geo_types::Point> for LatLng {
    fn from(point: geo_types::Point) -> Self {
        Self {
            lat: point.y(),
            lng: point.x(),
        }
    }
}

/// A place, either as free text or as coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Location {
    Address(String),
    LatLng(LatLng),
}

impl Location {
    /// The token the service expects for this location.
    pub fn encode(&self) -> Result<String> {
        match self {
            Location::Address(address) => {
                if address.trim().is_empty() {
                    return Err(GoogleMapsError::invalid_argument(
                        "address must not be empty",
                    ));
                }
                Ok(address.clone())
            }
            Location::LatLng(latlng) => {
                latlng.validate()?;
                Ok(latlng.to_string())
            }
        }
    }
}

impl From<&str> for Location {
    fn from(address: &str) -> Self {
        Location::Address(address.to_owned())
    }
}

impl From<String> for Location {
    fn from(address: String) -> Self {
        Location::Address(address)
    }
}

impl From<LatLng> for Location {
    fn from(latlng: LatLng) -> Self {
        Location::LatLng(latlng)
    }
}

impl From<(f64, f64)> for Location {
    fn from(pair: (f64, f64)) -> Self {
        Location::LatLng(pair.into())
    }
}

impl From<[f64; 2]> for Location {
    fn from(pair: [f64; 2]) -> Self {
        Location::LatLng(pair.into())
    }
}

impl From<geo_types::Point> for Location {
    fn from(point: geo_types::Point) -> Self {
        Location::LatLng(point.into())
    }
}

/// Accepts a string, a `[lat, lng]` array or a `{"lat": .., "lng": ..}` object.
impl TryFrom<&serde_json::Value> for Location {
    type Error = GoogleMapsError;

    fn try_from(value: &serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        match value {
            Value::String(address) => Ok(Location::Address(address.clone())),
            Value::Array(items) => match items.as_slice() {
                [lat, lng] => match (lat.as_f64(), lng.as_f64()) {
                    (Some(lat), Some(lng)) => Ok(Location::LatLng(LatLng { lat, lng })),
                    _ => Err(GoogleMapsError::invalid_argument(format!(
                        "expected a numeric [lat, lng] pair, got {value}"
                    ))),
                },
                _ => Err(GoogleMapsError::invalid_argument(format!(
                    "expected a two-element [lat, lng] pair, got {} elements",
                    items.len()
                ))),
            },
            Value::Object(map) => {
                let lat = map.get("lat").and_then(Value::as_f64);
                let lng = map.get("lng").and_then(Value::as_f64);
                match (lat, lng) {
                    (Some(lat), Some(lng)) => Ok(Location::LatLng(LatLng { lat, lng })),
                    _ => Err(GoogleMapsError::invalid_argument(format!(
                        "expected an object with numeric lat and lng, got {value}"
                    ))),
                }
            }
            other => Err(GoogleMapsError::invalid_argument(format!(
                "unsupported location: {other}"
            ))),
        }
    }
}

/// Joins location tokens with `|`, keeping input order.
pub fn join_locations<L>(locations: &[L]) -> Result<String>
where
    L: Clone + Into<Location>,
{
    if locations.is_empty() {
        return Err(GoogleMapsError::invalid_argument(
            "at least one location is required",
        ));
    }

    let tokens = locations
        .iter()
        .map(|location| location.clone().into().encode())
        .collect::<Result<Vec<_>>>()?;

    Ok(tokens.join("|"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_encode_pair_rounds_to_six_decimals() {
        let location = Location::from((41.43206, -81.38992));
        assert_eq!(location.encode().unwrap(), "41.432060,-81.389920");

        let location = Location::from([43.012486, -83.6964149]);
        assert_eq!(location.encode().unwrap(), "43.012486,-83.696415");
    }

    #[test]
    fn test_encode_address_passes_through() {
        let location = Location::from("Perth, Australia");
        assert_eq!(location.encode().unwrap(), "Perth, Australia");
    }

    #[test]
    fn test_encode_geo_point_swaps_axes() {
        let location = Location::from(geo_types::Point::new(-78.8781627, 42.8863855));
        assert_eq!(location.encode().unwrap(), "42.886386,-78.878163");
    }

    #[test]
    fn test_encode_rejects_bad_coordinates() {
        for latlng in [
            LatLng::new(f64::NAN, 0.0),
            LatLng::new(0.0, f64::INFINITY),
            LatLng::new(91.0, 0.0),
            LatLng::new(0.0, -180.5),
        ] {
            let result = Location::from(latlng).encode();
            assert!(matches!(result, Err(GoogleMapsError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_encode_rejects_empty_address() {
        let result = Location::from("  ").encode();
        assert!(matches!(result, Err(GoogleMapsError::InvalidArgument(_))));
    }

    #[test]
    fn test_from_json_variants() {
        let address = Location::try_from(&json!("Bobcaygeon ON")).unwrap();
        assert_eq!(address, Location::Address("Bobcaygeon ON".to_string()));

        let pair = Location::try_from(&json!([41.43206, -81.38992])).unwrap();
        assert_eq!(pair.encode().unwrap(), "41.432060,-81.389920");

        let mapping = Location::try_from(&json!({"lat": 42.8863855, "lng": -78.8781627})).unwrap();
        assert_eq!(mapping.encode().unwrap(), "42.886386,-78.878163");
    }

    #[test]
    fn test_from_json_rejects_unsupported_variants() {
        for value in [
            json!(null),
            json!(true),
            json!(12.5),
            json!([1.0]),
            json!([1.0, 2.0, 3.0]),
            json!(["a", "b"]),
            json!({"lat": 1.0}),
            json!({"latitude": 1.0, "longitude": 2.0}),
        ] {
            let result = Location::try_from(&value);
            assert!(
                matches!(result, Err(GoogleMapsError::InvalidArgument(_))),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_deserialize_untagged() {
        let locations: Vec<Location> =
            serde_json::from_value(json!(["Seattle", {"lat": 1.5, "lng": 2.25}])).unwrap();

        assert_eq!(locations[0], Location::from("Seattle"));
        assert_eq!(locations[1], Location::from(LatLng::new(1.5, 2.25)));
    }

    #[test]
    fn test_location_schema_lists_coordinates() {
        let schema = serde_json::to_value(schemars::schema_for!(Location)).unwrap();
        let schema = schema.to_string();
        assert!(schema.contains("\"lat\""));
        assert!(schema.contains("\"lng\""));
    }

    #[test]
    fn test_join_preserves_order() {
        let locations = vec![
            Location::from("Bobcaygeon ON"),
            Location::from((41.43206, -81.38992)),
            Location::from("Seattle"),
        ];

        assert_eq!(
            join_locations(&locations).unwrap(),
            "Bobcaygeon ON|41.432060,-81.389920|Seattle"
        );
    }

    #[test]
    fn test_join_accepts_plain_values() {
        assert_eq!(
            join_locations(&["San Francisco", "Victoria BC"]).unwrap(),
            "San Francisco|Victoria BC"
        );
        assert_eq!(
            join_locations(&[(1.0, 2.0), (3.0, 4.0)]).unwrap(),
            "1.000000,2.000000|3.000000,4.000000"
        );
    }

    #[test]
    fn test_join_rejects_empty() {
        let empty: Vec<Location> = Vec::new();
        assert!(matches!(
            join_locations(&empty),
            Err(GoogleMapsError::InvalidArgument(_))
        ));
    }
}
