//! Standalone field checks.
//!
//! Unlike record construction, these never coerce: they answer whether a
//! value lies in its realistic range. Non-finite numbers fail every check.

/// Lowest realistic altitude (m).
pub const MIN_ALTITUDE: f64 = -1000.0;
/// Highest realistic altitude (m).
pub const MAX_ALTITUDE: f64 = 50_000.0;
/// Highest realistic ground speed (m/s).
pub const MAX_VELOCITY: f64 = 1000.0;

/// A country name is usable if it is non-blank and not purely numeric.
pub fn validate_country(country: &str) -> bool {
    let country = country.trim();
    !country.is_empty() && !country.chars().all(|c| c.is_ascii_digit())
}

pub fn validate_altitude(altitude: f64) -> bool {
    (MIN_ALTITUDE..=MAX_ALTITUDE).contains(&altitude)
}

pub fn validate_velocity(velocity: f64) -> bool {
    (0.0..=MAX_VELOCITY).contains(&velocity)
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}

/// Parse `"min - max"` into an altitude range.
///
/// Anything that is not exactly two numbers separated by `-` yields the
/// full realistic range `(0.0, 50000.0)`.
pub fn parse_altitude_range(input: &str) -> (f64, f64) {
    let parts: Vec<&str> = input.split('-').collect();
    if let [min, max] = parts.as_slice() {
        if let (Ok(min), Ok(max)) = (min.trim().parse::<f64>(), max.trim().parse::<f64>()) {
            return (min, max);
        }
    }
    (0.0, MAX_ALTITUDE)
}
