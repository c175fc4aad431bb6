//! The aircraft record.
//!
//! An [`Aircraft`] is a value object built from either explicit field values
//! or a flat [`AircraftMap`]. Construction is tolerant: strings are trimmed
//! and fall back to [`UNKNOWN`], numbers are clamped or defaulted. The
//! resulting invariants hold for every instance:
//!
//! - `callsign` and `origin_country` are never empty.
//! - `velocity >= 0.0`.
//! - `altitude >= -1000.0`.
//! - every floating point field is finite.

use std::cmp::Ordering;
use std::fmt;

use serde_json::{Map, Value};

/// Sentinel used for missing or unusable text fields.
pub const UNKNOWN: &str = "Unknown";

/// Lowest altitude a record may carry, in meters.
pub const ALTITUDE_FLOOR: f64 = -1000.0;

/// Velocities closer than this (m/s) compare equal.
pub const VELOCITY_TOLERANCE: f64 = 0.1;

/// Altitudes closer than this (m) compare equal.
pub const ALTITUDE_TOLERANCE: f64 = 1.0;

/// Field names in their canonical serialization order.
pub const FIELD_NAMES: [&str; 9] = [
    "callsign",
    "origin_country",
    "velocity",
    "altitude",
    "icao24",
    "longitude",
    "latitude",
    "on_ground",
    "vertical_rate",
];

/// Flat, untyped key/value representation of a record.
pub type AircraftMap = Map<String, Value>;

/// A single observed aircraft.
///
/// The callsign is the record's identity and cannot change after
/// construction. Velocity and altitude may be updated through validated
/// setters; the remaining fields are fixed at construction.
///
/// # Comparison
///
/// - `==` holds when callsign and origin country match exactly and velocity
///   and altitude agree within [`VELOCITY_TOLERANCE`] and
///   [`ALTITUDE_TOLERANCE`]. Use [`Aircraft::identical_to`] for exact
///   field-by-field comparison.
/// - `<`, `<=`, `>`, `>=` order by velocity only. Two records can therefore
///   be neither `<` nor `>` each other without being `==`.
#[derive(Clone, Debug)]
pub struct Aircraft {
    callsign: String,
    origin_country: String,
    velocity: f64,
    altitude: f64,
    icao24: String,
    longitude: f64,
    latitude: f64,
    on_ground: bool,
    vertical_rate: f64,
}

impl Aircraft {
    /// Create a record from the four required fields.
    ///
    /// Auxiliary fields take their defaults: `icao24 = "Unknown"`, position
    /// `(0.0, 0.0)`, `on_ground = true`, `vertical_rate = 0.0`.
    pub fn new(
        callsign: impl AsRef<str>,
        origin_country: impl AsRef<str>,
        velocity: f64,
        altitude: f64,
    ) -> Self {
        Self {
            callsign: text_or_unknown(callsign.as_ref()),
            origin_country: text_or_unknown(origin_country.as_ref()),
            velocity: sanitize_velocity(velocity),
            altitude: sanitize_altitude(altitude),
            icao24: UNKNOWN.to_string(),
            longitude: 0.0,
            latitude: 0.0,
            on_ground: true,
            vertical_rate: 0.0,
        }
    }

    pub fn with_icao24(mut self, icao24: impl AsRef<str>) -> Self {
        self.icao24 = text_or_unknown(icao24.as_ref());
        self
    }

    pub fn with_position(mut self, longitude: f64, latitude: f64) -> Self {
        self.longitude = finite_or_zero(longitude);
        self.latitude = finite_or_zero(latitude);
        self
    }

    pub fn with_on_ground(mut self, on_ground: bool) -> Self {
        self.on_ground = on_ground;
        self
    }

    pub fn with_vertical_rate(mut self, vertical_rate: f64) -> Self {
        self.vertical_rate = finite_or_zero(vertical_rate);
        self
    }

    /// Build a record from an untyped mapping.
    ///
    /// Missing keys, `null` values and values of the wrong shape fall back to
    /// the same defaults as [`Aircraft::new`]. Numeric fields also accept
    /// numeric strings, and `on_ground` accepts `"true"`/`"false"` in any
    /// case. Keys outside [`FIELD_NAMES`] are ignored.
    pub fn from_mapping(data: &AircraftMap) -> Self {
        let text = |key: &str| data.get(key).and_then(Value::as_str).unwrap_or(UNKNOWN);
        let number = |key: &str| data.get(key).and_then(coerce_number).unwrap_or(0.0);

        Self::new(
            text("callsign"),
            text("origin_country"),
            number("velocity"),
            number("altitude"),
        )
        .with_icao24(text("icao24"))
        .with_position(number("longitude"), number("latitude"))
        .with_on_ground(data.get("on_ground").and_then(coerce_bool).unwrap_or(true))
        .with_vertical_rate(number("vertical_rate"))
    }

    /// Build one record per mapping.
    pub fn from_mappings(data: &[AircraftMap]) -> Vec<Self> {
        data.iter().map(Self::from_mapping).collect()
    }

    /// Flatten into a mapping with exactly the nine [`FIELD_NAMES`], in order.
    ///
    /// `Aircraft::from_mapping(&a.to_mapping())` is identical to `a`.
    pub fn to_mapping(&self) -> AircraftMap {
        let mut map = Map::with_capacity(FIELD_NAMES.len());
        map.insert("callsign".into(), Value::from(self.callsign.as_str()));
        map.insert("origin_country".into(), Value::from(self.origin_country.as_str()));
        map.insert("velocity".into(), Value::from(self.velocity));
        map.insert("altitude".into(), Value::from(self.altitude));
        map.insert("icao24".into(), Value::from(self.icao24.as_str()));
        map.insert("longitude".into(), Value::from(self.longitude));
        map.insert("latitude".into(), Value::from(self.latitude));
        map.insert("on_ground".into(), Value::from(self.on_ground));
        map.insert("vertical_rate".into(), Value::from(self.vertical_rate));
        map
    }

    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    pub fn origin_country(&self) -> &str {
        &self.origin_country
    }

    /// Ground speed in m/s.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Barometric altitude in meters.
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    pub fn icao24(&self) -> &str {
        &self.icao24
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// `(longitude, latitude)` in degrees.
    pub fn position(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    /// Climb (positive) or descent rate in m/s.
    pub fn vertical_rate(&self) -> f64 {
        self.vertical_rate
    }

    /// Update the velocity; negative values clamp to zero, non-finite ones reset it.
    pub fn set_velocity(&mut self, velocity: f64) {
        self.velocity = sanitize_velocity(velocity);
    }

    /// Update the altitude; values below the floor clamp to it, non-finite ones reset it.
    pub fn set_altitude(&mut self, altitude: f64) {
        self.altitude = sanitize_altitude(altitude);
    }

    /// Returns `true` if this aircraft flies strictly higher than `other`.
    pub fn higher_than(&self, other: &Self) -> bool {
        self.altitude > other.altitude
    }

    /// Returns `true` if this aircraft flies strictly faster than `other`.
    pub fn faster_than(&self, other: &Self) -> bool {
        self.velocity > other.velocity
    }

    /// Exact comparison of all nine fields.
    pub fn identical_to(&self, other: &Self) -> bool {
        self.callsign == other.callsign
            && self.origin_country == other.origin_country
            && self.velocity == other.velocity
            && self.altitude == other.altitude
            && self.icao24 == other.icao24
            && self.longitude == other.longitude
            && self.latitude == other.latitude
            && self.on_ground == other.on_ground
            && self.vertical_rate == other.vertical_rate
    }
}

impl PartialEq for Aircraft {
    fn eq(&self, other: &Self) -> bool {
        self.callsign == other.callsign
            && self.origin_country == other.origin_country
            && (self.velocity - other.velocity).abs() < VELOCITY_TOLERANCE
            && (self.altitude - other.altitude).abs() < ALTITUDE_TOLERANCE
    }
}

impl PartialOrd for Aircraft {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.velocity.partial_cmp(&other.velocity)
    }
}

impl fmt::Display for Aircraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.on_ground { "on ground" } else { "airborne" };
        write!(
            f,
            "{} ({}) | velocity: {:.1} m/s | altitude: {:.0} m | {}",
            self.callsign, self.origin_country, self.velocity, self.altitude, status
        )
    }
}

fn text_or_unknown(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNKNOWN.to_string()
    } else {
        trimmed.to_string()
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn sanitize_velocity(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn sanitize_altitude(value: f64) -> f64 {
    if value.is_finite() {
        value.max(ALTITUDE_FLOOR)
    } else {
        0.0
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapping(value: Value) -> AircraftMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn sample() -> Aircraft {
        Aircraft::new("AFL101", "Russia", 250.0, 11000.0)
            .with_icao24("4b1805")
            .with_position(37.6, 55.7)
            .with_on_ground(false)
            .with_vertical_rate(-2.5)
    }

    // -----------------------------------------------------------------------
    // Construction and validation
    // -----------------------------------------------------------------------

    #[test]
    fn new_applies_defaults() {
        let a = Aircraft::new("SU100", "Russia", 200.0, 9000.0);
        assert_eq!(a.icao24(), UNKNOWN);
        assert_eq!(a.position(), (0.0, 0.0));
        assert!(a.on_ground());
        assert_eq!(a.vertical_rate(), 0.0);
    }

    #[test]
    fn strings_are_trimmed() {
        let a = Aircraft::new("  DLH4  ", " Germany\t", 1.0, 1.0);
        assert_eq!(a.callsign(), "DLH4");
        assert_eq!(a.origin_country(), "Germany");
    }

    #[test]
    fn blank_strings_become_unknown() {
        let a = Aircraft::new("", "   ", 1.0, 1.0);
        assert_eq!(a.callsign(), UNKNOWN);
        assert_eq!(a.origin_country(), UNKNOWN);
    }

    #[test]
    fn negative_velocity_clamps_to_zero() {
        let a = Aircraft::new("X", "Y", -50.0, 0.0);
        assert_eq!(a.velocity(), 0.0);
    }

    #[test]
    fn altitude_below_sea_level_is_kept() {
        let a = Aircraft::new("X", "Y", 0.0, -500.0);
        assert_eq!(a.altitude(), -500.0);
    }

    #[test]
    fn altitude_clamps_at_floor() {
        let a = Aircraft::new("X", "Y", 0.0, -5000.0);
        assert_eq!(a.altitude(), ALTITUDE_FLOOR);
    }

    #[test]
    fn non_finite_numbers_default_to_zero() {
        let a = Aircraft::new("X", "Y", f64::NAN, f64::INFINITY)
            .with_position(f64::NAN, f64::NEG_INFINITY)
            .with_vertical_rate(f64::NAN);
        assert_eq!(a.velocity(), 0.0);
        assert_eq!(a.altitude(), 0.0);
        assert_eq!(a.position(), (0.0, 0.0));
        assert_eq!(a.vertical_rate(), 0.0);
    }

    #[test]
    fn setters_validate() {
        let mut a = sample();
        a.set_velocity(-1.0);
        a.set_altitude(-2000.0);
        assert_eq!(a.velocity(), 0.0);
        assert_eq!(a.altitude(), ALTITUDE_FLOOR);

        a.set_velocity(310.5);
        a.set_altitude(12000.0);
        assert_eq!(a.velocity(), 310.5);
        assert_eq!(a.altitude(), 12000.0);
    }

    // -----------------------------------------------------------------------
    // Mapping conversion
    // -----------------------------------------------------------------------

    #[test]
    fn from_mapping_reads_all_fields() {
        let a = Aircraft::from_mapping(&mapping(json!({
            "callsign": "UAL202",
            "origin_country": "United States",
            "velocity": 240.5,
            "altitude": 10500,
            "icao24": "a1b2c3",
            "longitude": -87.9,
            "latitude": 41.97,
            "on_ground": false,
            "vertical_rate": 3.25,
        })));
        assert_eq!(a.callsign(), "UAL202");
        assert_eq!(a.origin_country(), "United States");
        assert_eq!(a.velocity(), 240.5);
        assert_eq!(a.altitude(), 10500.0);
        assert_eq!(a.icao24(), "a1b2c3");
        assert_eq!(a.position(), (-87.9, 41.97));
        assert!(!a.on_ground());
        assert_eq!(a.vertical_rate(), 3.25);
    }

    #[test]
    fn from_mapping_missing_keys_use_defaults() {
        let a = Aircraft::from_mapping(&AircraftMap::new());
        assert_eq!(a.callsign(), UNKNOWN);
        assert_eq!(a.origin_country(), UNKNOWN);
        assert_eq!(a.velocity(), 0.0);
        assert_eq!(a.altitude(), 0.0);
        assert_eq!(a.icao24(), UNKNOWN);
        assert!(a.on_ground());
    }

    #[test]
    fn from_mapping_tolerates_bad_values() {
        let a = Aircraft::from_mapping(&mapping(json!({
            "callsign": null,
            "origin_country": 42,
            "velocity": "fast",
            "altitude": [1, 2],
            "on_ground": "maybe",
            "longitude": null,
        })));
        assert_eq!(a.callsign(), UNKNOWN);
        assert_eq!(a.origin_country(), UNKNOWN);
        assert_eq!(a.velocity(), 0.0);
        assert_eq!(a.altitude(), 0.0);
        assert!(a.on_ground());
        assert_eq!(a.longitude(), 0.0);
    }

    #[test]
    fn from_mapping_coerces_text_values() {
        let a = Aircraft::from_mapping(&mapping(json!({
            "callsign": "BAW303",
            "origin_country": "United Kingdom",
            "velocity": " 120.25 ",
            "altitude": "9500",
            "on_ground": "FALSE",
        })));
        assert_eq!(a.velocity(), 120.25);
        assert_eq!(a.altitude(), 9500.0);
        assert!(!a.on_ground());
    }

    #[test]
    fn from_mapping_ignores_extra_keys() {
        let a = Aircraft::from_mapping(&mapping(json!({
            "callsign": "KLM7",
            "origin_country": "Netherlands",
            "velocity": 1.0,
            "altitude": 2.0,
            "true_track": 180.0,
            "geo_altitude": 2.5,
        })));
        assert_eq!(a.callsign(), "KLM7");
        assert_eq!(a.to_mapping().len(), FIELD_NAMES.len());
    }

    #[test]
    fn to_mapping_uses_canonical_order_and_native_types() {
        let map = sample().to_mapping();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, FIELD_NAMES);
        assert!(map["velocity"].is_f64());
        assert!(map["on_ground"].is_boolean());
        assert!(map["icao24"].is_string());
    }

    #[test]
    fn mapping_roundtrip_is_exact() {
        let a = sample();
        let b = Aircraft::from_mapping(&a.to_mapping());
        assert!(a.identical_to(&b));
    }

    #[test]
    fn from_mappings_builds_one_per_entry() {
        let maps = vec![sample().to_mapping(), AircraftMap::new()];
        let list = Aircraft::from_mappings(&maps);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].callsign(), "AFL101");
        assert_eq!(list[1].callsign(), UNKNOWN);
    }

    // -----------------------------------------------------------------------
    // Comparison
    // -----------------------------------------------------------------------

    #[test]
    fn equality_is_fuzzy_on_velocity_and_altitude() {
        let a = Aircraft::new("AFL101", "Russia", 250.0, 11000.0);
        let b = Aircraft::new("AFL101", "Russia", 250.05, 11000.5);
        let c = Aircraft::new("AFL101", "Russia", 250.2, 11000.0);
        let d = Aircraft::new("AFL101", "Russia", 250.0, 11001.5);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn equality_ignores_auxiliary_fields() {
        let a = sample();
        let b = Aircraft::new("AFL101", "Russia", 250.0, 11000.0);
        assert_eq!(a, b);
        assert!(!a.identical_to(&b));
    }

    #[test]
    fn equality_requires_matching_identity() {
        let a = Aircraft::new("AFL101", "Russia", 250.0, 11000.0);
        assert_ne!(a, Aircraft::new("AFL102", "Russia", 250.0, 11000.0));
        assert_ne!(a, Aircraft::new("AFL101", "Latvia", 250.0, 11000.0));
    }

    #[test]
    fn ordering_is_by_velocity() {
        let slow = Aircraft::new("A", "X", 100.0, 12000.0);
        let fast = Aircraft::new("B", "X", 200.0, 1000.0);
        assert!(slow < fast);
        assert!(fast > slow);
        assert!(slow <= slow.clone());
        assert!(fast >= slow);
    }

    #[test]
    fn higher_and_faster_are_independent() {
        let slow_high = Aircraft::new("A", "X", 100.0, 12000.0);
        let fast_low = Aircraft::new("B", "X", 200.0, 1000.0);
        assert!(slow_high.higher_than(&fast_low));
        assert!(!fast_low.higher_than(&slow_high));
        assert!(fast_low.faster_than(&slow_high));
        assert!(!slow_high.faster_than(&fast_low));
    }

    #[test]
    fn display_format() {
        let text = sample().to_string();
        assert_eq!(
            text,
            "AFL101 (Russia) | velocity: 250.0 m/s | altitude: 11000 m | airborne"
        );
        let grounded = Aircraft::new("BAW303", "United Kingdom", 3.14, 9.6);
        assert!(grounded.to_string().ends_with("velocity: 3.1 m/s | altitude: 10 m | on ground"));
    }

    // -----------------------------------------------------------------------
    // Property: mapping roundtrip
    // -----------------------------------------------------------------------

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_record_survives_mapping_roundtrip(
                callsign in "[A-Z0-9 ]{0,8}",
                country in "\\PC{0,12}",
                velocity in -500.0f64..2000.0,
                altitude in -3000.0f64..20000.0,
                longitude in -180.0f64..180.0,
                latitude in -90.0f64..90.0,
                on_ground in any::<bool>(),
                vertical_rate in -50.0f64..50.0,
            ) {
                let a = Aircraft::new(callsign, country, velocity, altitude)
                    .with_position(longitude, latitude)
                    .with_on_ground(on_ground)
                    .with_vertical_rate(vertical_rate);
                let b = Aircraft::from_mapping(&a.to_mapping());
                prop_assert!(a.identical_to(&b));
                prop_assert!(!b.callsign().is_empty());
                prop_assert!(b.velocity() >= 0.0);
                prop_assert!(b.altitude() >= ALTITUDE_FLOOR);
            }
        }
    }
}
