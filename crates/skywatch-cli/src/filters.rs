//! In-memory list operations used by the menu and subcommands.
//!
//! These work on an already-loaded snapshot and never touch the store.

use skywatch_types::Aircraft;

/// Aircraft whose registration country contains any of `countries`,
/// compared case-insensitively.
pub fn filter_by_country<S: AsRef<str>>(aircraft: &[Aircraft], countries: &[S]) -> Vec<Aircraft> {
    let needles: Vec<String> = countries.iter().map(|c| c.as_ref().to_lowercase()).collect();
    aircraft
        .iter()
        .filter(|a| {
            let country = a.origin_country().to_lowercase();
            needles.iter().any(|n| country.contains(n.as_str()))
        })
        .cloned()
        .collect()
}

/// Aircraft with `min <= altitude <= max`.
pub fn filter_by_altitude_range(aircraft: &[Aircraft], min: f64, max: f64) -> Vec<Aircraft> {
    aircraft
        .iter()
        .filter(|a| (min..=max).contains(&a.altitude()))
        .cloned()
        .collect()
}

pub fn sort_by_velocity(aircraft: &[Aircraft], descending: bool) -> Vec<Aircraft> {
    let mut sorted = aircraft.to_vec();
    if descending {
        sorted.sort_by(|a, b| b.velocity().total_cmp(&a.velocity()));
    } else {
        sorted.sort_by(|a, b| a.velocity().total_cmp(&b.velocity()));
    }
    sorted
}

pub fn airborne(aircraft: &[Aircraft]) -> Vec<Aircraft> {
    aircraft.iter().filter(|a| !a.on_ground()).cloned().collect()
}

pub fn grounded(aircraft: &[Aircraft]) -> Vec<Aircraft> {
    aircraft.iter().filter(|a| a.on_ground()).cloned().collect()
}

/// Aircraft whose callsign contains `needle`, upper-cased first.
pub fn search_callsign(aircraft: &[Aircraft], needle: &str) -> Vec<Aircraft> {
    let needle = needle.trim().to_uppercase();
    aircraft
        .iter()
        .filter(|a| a.callsign().contains(needle.as_str()))
        .cloned()
        .collect()
}
