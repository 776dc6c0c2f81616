use std::{borrow::Cow, fmt::Display, str::FromStr};

use jiff::Timestamp;
use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};

use crate::{
    error::{GoogleMapsError, Result},
    params::QueryParams,
};

/// Defines an enum whose variants map one to one onto the service's strings.
macro_rules! define_wire_enum {
    ($(#[$meta:meta])* $name:ident, $param:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Deserialize, Serialize, JsonSchema, Debug, Copy, Clone, PartialEq, Eq, Hash)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = GoogleMapsError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(GoogleMapsError::invalid_argument(format!(
                        "invalid {} {:?}, expected one of: {}",
                        $param,
                        other,
                        [$($wire),+].join(", ")
                    ))),
                }
            }
        }
    };
}

define_wire_enum!(
    TravelMode, "mode", {
        Driving => "driving",
        Walking => "walking",
        Bicycling => "bicycling",
        Transit => "transit",
    }
);

define_wire_enum!(
    /// Route features to avoid, several can be combined.
    Avoid, "avoid", {
        Tolls => "tolls",
        Highways => "highways",
        Ferries => "ferries",
        Indoor => "indoor",
    }
);

define_wire_enum!(
    Units, "units", {
        Metric => "metric",
        Imperial => "imperial",
    }
);

define_wire_enum!(
    /// Assumptions used when computing `duration_in_traffic`.
    TrafficModel, "traffic_model", {
        BestGuess => "best_guess",
        Pessimistic => "pessimistic",
        Optimistic => "optimistic",
    }
);

define_wire_enum!(
    TransitMode, "transit_mode", {
        Bus => "bus",
        Subway => "subway",
        Train => "train",
        Tram => "tram",
        Rail => "rail",
    }
);

define_wire_enum!(
    TransitRoutingPreference, "transit_routing_preference", {
        LessWalking => "less_walking",
        FewerTransfers => "fewer_transfers",
    }
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DepartureTime {
    Now,
    At(Timestamp),
}

impl Display for DepartureTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepartureTime::Now => f.write_str("now"),
            DepartureTime::At(timestamp) => write!(f, "{timestamp}"),
        }
    }
}

impl FromStr for DepartureTime {
    type Err = GoogleMapsError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "now" {
            return Ok(DepartureTime::Now);
        }
        parse_timestamp(s, "departure_time").map(DepartureTime::At)
    }
}

impl TryFrom<String> for DepartureTime {
    type Error = GoogleMapsError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DepartureTime> for String {
    fn from(value: DepartureTime) -> Self {
        value.to_string()
    }
}

impl JsonSchema for DepartureTime {
    fn schema_name() -> Cow<'static, str> {
        "DepartureTime".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "description": "\"now\", an RFC 3339 timestamp or unix seconds"
        })
    }
}

impl From<Timestamp> for DepartureTime {
    fn from(timestamp: Timestamp) -> Self {
        DepartureTime::At(timestamp)
    }
}

/// Accepts RFC 3339 timestamps or unix seconds.
fn parse_timestamp(s: &str, param: &str) -> Result<Timestamp> {
    if let Ok(timestamp) = s.parse::<Timestamp>() {
        return Ok(timestamp);
    }

    s.parse::<i64>()
        .ok()
        .and_then(|seconds| Timestamp::from_second(seconds).ok())
        .ok_or_else(|| {
            GoogleMapsError::invalid_argument(format!("invalid {param} {s:?}, expected a timestamp"))
        })
}

fn parse_list<T>(value: &str) -> Result<Vec<T>>
where
    T: FromStr<Err = GoogleMapsError> + PartialEq,
{
    let mut items = Vec::new();
    for part in value.split('|') {
        let item = part.trim().parse::<T>()?;
        if !items.contains(&item) {
            items.push(item);
        }
    }
    Ok(items)
}

/// Joins with `|`, dropping repeats.
fn join_list<T: Display + PartialEq>(items: &[T]) -> String {
    let mut unique: Vec<&T> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }

    unique
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join("|")
}

fn validate_language(language: &str) -> Result<()> {
    let valid = !language.is_empty()
        && language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(GoogleMapsError::invalid_argument(format!(
            "invalid language {language:?}, expected a locale tag such as en-AU"
        )))
    }
}

fn validate_region(region: &str) -> Result<()> {
    if !region.is_empty() && region.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(GoogleMapsError::invalid_argument(format!(
            "invalid region {region:?}, expected a ccTLD code such as uk"
        )))
    }
}

/// Names accepted by [`DistanceMatrixOptions::set`].
pub const OPTION_NAMES: [&str; 10] = [
    "mode",
    "language",
    "avoid",
    "units",
    "region",
    "departure_time",
    "arrival_time",
    "traffic_model",
    "transit_mode",
    "transit_routing_preference",
];

/// Optional Distance Matrix parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DistanceMatrixOptions {
    pub mode: Option<TravelMode>,
    pub language: Option<String>,
    #[serde(default)]
    pub avoid: Vec<Avoid>,
    pub units: Option<Units>,
    pub region: Option<String>,
    pub departure_time: Option<DepartureTime>,
    pub arrival_time: Option<Timestamp>,
    pub traffic_model: Option<TrafficModel>,
    #[serde(default, rename = "transit_mode")]
    pub transit_modes: Vec<TransitMode>,
    pub transit_routing_preference: Option<TransitRoutingPreference>,
}

impl DistanceMatrixOptions {
    /// Builds options from name/value pairs, as they would arrive from a
    /// query string or a config file.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();
        for (name, value) in pairs {
            options.set(name.as_ref(), value.as_ref())?;
        }
        Ok(options)
    }

    /// Sets an option by its wire name.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "mode" => self.mode = Some(value.parse()?),
            "language" => {
                validate_language(value)?;
                self.language = Some(value.to_string());
            }
            "avoid" => self.avoid = parse_list(value)?,
            "units" => self.units = Some(value.parse()?),
            "region" => {
                validate_region(value)?;
                self.region = Some(value.to_string());
            }
            "departure_time" => self.departure_time = Some(value.parse()?),
            "arrival_time" => self.arrival_time = Some(parse_timestamp(value, name)?),
            "traffic_model" => self.traffic_model = Some(value.parse()?),
            "transit_mode" => self.transit_modes = parse_list(value)?,
            "transit_routing_preference" => {
                self.transit_routing_preference = Some(value.parse()?)
            }
            other => {
                return Err(GoogleMapsError::invalid_argument(format!(
                    "unrecognized option {other:?}, expected one of: {}",
                    OPTION_NAMES.join(", ")
                )));
            }
        }
        Ok(())
    }

    pub fn with_mode(mut self, mode: TravelMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_avoid(mut self, avoid: Avoid) -> Self {
        if !self.avoid.contains(&avoid) {
            self.avoid.push(avoid);
        }
        self
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = Some(units);
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_departure_time(mut self, departure_time: impl Into<DepartureTime>) -> Self {
        self.departure_time = Some(departure_time.into());
        self
    }

    pub fn with_arrival_time(mut self, arrival_time: Timestamp) -> Self {
        self.arrival_time = Some(arrival_time);
        self
    }

    pub fn with_traffic_model(mut self, traffic_model: TrafficModel) -> Self {
        self.traffic_model = Some(traffic_model);
        self
    }

    pub fn with_transit_mode(mut self, transit_mode: TransitMode) -> Self {
        if !self.transit_modes.contains(&transit_mode) {
            self.transit_modes.push(transit_mode);
        }
        self
    }

    pub fn with_transit_routing_preference(mut self, preference: TransitRoutingPreference) -> Self {
        self.transit_routing_preference = Some(preference);
        self
    }

    /// Checks values set through the typed setters and the combinations the
    /// service rejects.
    pub fn validate(&self) -> Result<()> {
        if let Some(language) = &self.language {
            validate_language(language)?;
        }

        if let Some(region) = &self.region {
            validate_region(region)?;
        }

        if self.departure_time.is_some() && self.arrival_time.is_some() {
            return Err(GoogleMapsError::invalid_argument(
                "departure_time and arrival_time cannot both be set",
            ));
        }

        if self.traffic_model.is_some() && self.departure_time.is_none() {
            return Err(GoogleMapsError::invalid_argument(
                "traffic_model requires departure_time",
            ));
        }

        let is_transit = self.mode == Some(TravelMode::Transit);
        if !is_transit && !self.transit_modes.is_empty() {
            return Err(GoogleMapsError::invalid_argument(
                "transit_mode requires mode=transit",
            ));
        }
        if !is_transit && self.transit_routing_preference.is_some() {
            return Err(GoogleMapsError::invalid_argument(
                "transit_routing_preference requires mode=transit",
            ));
        }

        Ok(())
    }

    /// Validates and writes the options that are set into `params`.
    pub fn write_params(&self, params: &mut QueryParams) -> Result<()> {
        self.validate()?;

        if let Some(mode) = self.mode {
            params.insert("mode", mode.as_str());
        }
        if let Some(language) = &self.language {
            params.insert("language", language.as_str());
        }
        if !self.avoid.is_empty() {
            params.insert("avoid", join_list(&self.avoid));
        }
        if let Some(units) = self.units {
            params.insert("units", units.as_str());
        }
        if let Some(region) = &self.region {
            params.insert("region", region.as_str());
        }
        match self.departure_time {
            Some(DepartureTime::Now) => params.insert("departure_time", "now"),
            Some(DepartureTime::At(timestamp)) => {
                params.insert("departure_time", timestamp.as_second().to_string())
            }
            None => {}
        }
        if let Some(arrival_time) = self.arrival_time {
            params.insert("arrival_time", arrival_time.as_second().to_string());
        }
        if let Some(traffic_model) = self.traffic_model {
            params.insert("traffic_model", traffic_model.as_str());
        }
        if !self.transit_modes.is_empty() {
            params.insert("transit_mode", join_list(&self.transit_modes));
        }
        if let Some(preference) = self.transit_routing_preference {
            params.insert("transit_routing_preference", preference.as_str());
        }

        Ok(())
    }
}
