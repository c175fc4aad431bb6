//! Typed query predicates.
//!
//! A [`Criteria`] is an AND-combined list of per-field equality checks
//! evaluated against decoded [`Aircraft`] values, so every backend filters
//! the same way regardless of how it serializes fields.

use serde_json::Value;
use skywatch_types::{Aircraft, AircraftMap};

/// Equality check on a single record field.
#[derive(Clone, Debug, PartialEq)]
pub enum Criterion {
    Callsign(String),
    OriginCountry(String),
    Icao24(String),
    Velocity(f64),
    Altitude(f64),
    Longitude(f64),
    Latitude(f64),
    OnGround(bool),
    VerticalRate(f64),
    /// A check that can never hold: an unknown field, or a value whose type
    /// does not fit the field.
    Unsatisfiable { field: String },
}

impl Criterion {
    /// Build a criterion from an untyped key/value pair.
    ///
    /// Strings must be JSON strings, numeric fields JSON numbers and
    /// `on_ground` a JSON bool; anything else is [`Criterion::Unsatisfiable`].
    pub fn from_pair(field: &str, value: &Value) -> Self {
        let parsed = match field {
            "callsign" => value.as_str().map(|s| Self::Callsign(s.to_string())),
            "origin_country" => value.as_str().map(|s| Self::OriginCountry(s.to_string())),
            "icao24" => value.as_str().map(|s| Self::Icao24(s.to_string())),
            "velocity" => value.as_f64().map(Self::Velocity),
            "altitude" => value.as_f64().map(Self::Altitude),
            "longitude" => value.as_f64().map(Self::Longitude),
            "latitude" => value.as_f64().map(Self::Latitude),
            "vertical_rate" => value.as_f64().map(Self::VerticalRate),
            "on_ground" => value.as_bool().map(Self::OnGround),
            _ => None,
        };
        parsed.unwrap_or_else(|| Self::Unsatisfiable {
            field: field.to_string(),
        })
    }

    pub fn matches(&self, aircraft: &Aircraft) -> bool {
        match self {
            Self::Callsign(v) => aircraft.callsign() == v.as_str(),
            Self::OriginCountry(v) => aircraft.origin_country() == v.as_str(),
            Self::Icao24(v) => aircraft.icao24() == v.as_str(),
            Self::Velocity(v) => aircraft.velocity() == *v,
            Self::Altitude(v) => aircraft.altitude() == *v,
            Self::Longitude(v) => aircraft.longitude() == *v,
            Self::Latitude(v) => aircraft.latitude() == *v,
            Self::OnGround(v) => aircraft.on_ground() == *v,
            Self::VerticalRate(v) => aircraft.vertical_rate() == *v,
            Self::Unsatisfiable { .. } => false,
        }
    }
}

/// AND-combined set of [`Criterion`] checks. Empty criteria match everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Criteria {
    checks: Vec<Criterion>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate an untyped mapping, one criterion per entry.
    pub fn from_mapping(mapping: &AircraftMap) -> Self {
        mapping
            .iter()
            .map(|(field, value)| Criterion::from_pair(field, value))
            .collect()
    }

    pub fn with(mut self, criterion: Criterion) -> Self {
        self.checks.push(criterion);
        self
    }

    pub fn callsign(self, callsign: impl Into<String>) -> Self {
        self.with(Criterion::Callsign(callsign.into()))
    }

    pub fn origin_country(self, country: impl Into<String>) -> Self {
        self.with(Criterion::OriginCountry(country.into()))
    }

    pub fn icao24(self, icao24: impl Into<String>) -> Self {
        self.with(Criterion::Icao24(icao24.into()))
    }

    pub fn velocity(self, velocity: f64) -> Self {
        self.with(Criterion::Velocity(velocity))
    }

    pub fn altitude(self, altitude: f64) -> Self {
        self.with(Criterion::Altitude(altitude))
    }

    pub fn longitude(self, longitude: f64) -> Self {
        self.with(Criterion::Longitude(longitude))
    }

    pub fn latitude(self, latitude: f64) -> Self {
        self.with(Criterion::Latitude(latitude))
    }

    pub fn on_ground(self, on_ground: bool) -> Self {
        self.with(Criterion::OnGround(on_ground))
    }

    pub fn vertical_rate(self, vertical_rate: f64) -> Self {
        self.with(Criterion::VerticalRate(vertical_rate))
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.checks.iter()
    }

    /// Returns `true` if every check holds for `aircraft`.
    pub fn matches(&self, aircraft: &Aircraft) -> bool {
        self.checks.iter().all(|c| c.matches(aircraft))
    }
}

impl FromIterator<Criterion> for Criteria {
    fn from_iter<I: IntoIterator<Item = Criterion>>(iter: I) -> Self {
        Self {
            checks: iter.into_iter().collect(),
        }
    }
}
