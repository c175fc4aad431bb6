//! Remote collaborators for skywatch.
//!
//! Looking up the aircraft over a country takes two services: a geocoder that
//! turns the country name into a bounding box, and a flight-state source that
//! lists the state vectors inside that box. Both sit behind async traits so
//! the console can be driven by in-process fakes.
//!
//! # Collaborators
//!
//! - [`Geocoder`] -- implemented by [`NominatimClient`]
//! - [`FlightStateSource`] -- implemented by [`OpenSkyClient`]
//! - [`AircraftFeed`] -- implemented by [`AircraftTracker`], which chains the two
//!
//! Requests use a fixed timeout from [`ApiConfig`] and are never retried.

pub mod config;
pub mod error;
pub mod nominatim;
pub mod normalize;
pub mod opensky;
pub mod tracker;
pub mod traits;

#[cfg(test)]
mod testing;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use nominatim::NominatimClient;
pub use normalize::{normalize_states, states_to_aircraft};
pub use opensky::OpenSkyClient;
pub use tracker::AircraftTracker;
pub use traits::{AircraftFeed, FlightStateSource, Geocoder};
