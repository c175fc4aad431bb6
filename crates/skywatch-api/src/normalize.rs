//! OpenSky state-vector normalization.
//!
//! A state vector is a positional array:
//!
//! | index | field | | index | field |
//! |---|---|---|---|---|
//! | 0 | icao24 | | 8 | on_ground |
//! | 1 | callsign | | 9 | velocity |
//! | 2 | origin_country | | 10 | true_track |
//! | 5 | longitude | | 11 | vertical_rate |
//! | 6 | latitude | | 13 | geo_altitude |
//! | 7 | baro_altitude | | | |

use serde_json::Value;
use skywatch_types::{Aircraft, AircraftMap, UNKNOWN};
use tracing::debug;

/// Vectors shorter than this are dropped.
pub const MIN_STATE_LEN: usize = 14;

/// Convert raw state vectors into flat record mappings.
///
/// Besides the record fields the mappings carry `true_track` and
/// `geo_altitude`, which [`Aircraft::from_mapping`] ignores.
pub fn normalize_states(states: &[Vec<Value>]) -> Vec<AircraftMap> {
    let normalized: Vec<AircraftMap> = states
        .iter()
        .filter(|state| state.len() >= MIN_STATE_LEN)
        .map(|state| normalize_state(state))
        .collect();
    if normalized.len() < states.len() {
        debug!(
            dropped = states.len() - normalized.len(),
            "skipped short state vectors"
        );
    }
    normalized
}

/// Normalize and convert straight into records.
pub fn states_to_aircraft(states: &[Vec<Value>]) -> Vec<Aircraft> {
    Aircraft::from_mappings(&normalize_states(states))
}

fn normalize_state(state: &[Value]) -> AircraftMap {
    let mut map = AircraftMap::new();
    map.insert("icao24".into(), state[0].clone());
    map.insert("callsign".into(), text_or_unknown(&state[1]));
    map.insert("origin_country".into(), text_or_unknown(&state[2]));
    map.insert("longitude".into(), state[5].clone());
    map.insert("latitude".into(), state[6].clone());
    map.insert("altitude".into(), number_or_zero(&state[7]));
    map.insert("on_ground".into(), state[8].clone());
    map.insert("velocity".into(), number_or_zero(&state[9]));
    map.insert("true_track".into(), state[10].clone());
    map.insert("vertical_rate".into(), number_or_zero(&state[11]));
    map.insert("geo_altitude".into(), number_or_zero(&state[13]));
    map
}

fn text_or_unknown(value: &Value) -> Value {
    match value.as_str().map(str::trim) {
        Some(text) if !text.is_empty() => Value::from(text),
        _ => Value::from(UNKNOWN),
    }
}

fn number_or_zero(value: &Value) -> Value {
    if value.is_null() {
        Value::from(0.0)
    } else {
        value.clone()
    }
}
