use async_trait::async_trait;
use skywatch_types::{Aircraft, BoundingBox};
use tracing::{debug, info};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::nominatim::NominatimClient;
use crate::normalize::states_to_aircraft;
use crate::opensky::OpenSkyClient;
use crate::traits::{AircraftFeed, FlightStateSource, Geocoder};

/// Combines a [`Geocoder`] and a [`FlightStateSource`] into an [`AircraftFeed`]:
/// country name, then bounding box, then state vectors, then records.
pub struct AircraftTracker<G, S> {
    geocoder: G,
    states: S,
}

impl AircraftTracker<NominatimClient, OpenSkyClient> {
    /// Nominatim + OpenSky tracker sharing one HTTP client.
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        let client = config.http_client()?;
        Ok(Self::new(
            NominatimClient::with_client(client.clone(), config),
            OpenSkyClient::with_client(client, &config.flight_states_url),
        ))
    }
}

impl<G: Geocoder, S: FlightStateSource> AircraftTracker<G, S> {
    pub fn new(geocoder: G, states: S) -> Self {
        Self { geocoder, states }
    }

    /// Bounding box of `country`, or [`ApiError::CountryNotFound`].
    pub async fn locate(&self, country: &str) -> ApiResult<BoundingBox> {
        self.geocoder
            .bounding_box(country)
            .await?
            .ok_or_else(|| ApiError::CountryNotFound(country.to_string()))
    }

    /// Aircraft currently inside `area`.
    pub async fn fetch_area(&self, area: &BoundingBox) -> ApiResult<Vec<Aircraft>> {
        let raw = self.states.states(area).await?;
        let aircraft = states_to_aircraft(&raw);
        debug!(%area, raw = raw.len(), kept = aircraft.len(), "normalized flight states");
        Ok(aircraft)
    }
}

#[async_trait]
impl<G: Geocoder, S: FlightStateSource> AircraftFeed for AircraftTracker<G, S> {
    async fn fetch_country(&self, country: &str) -> ApiResult<Vec<Aircraft>> {
        let area = self.locate(country).await?;
        let aircraft = self.fetch_area(&area).await?;
        info!(country, count = aircraft.len(), "fetched aircraft");
        Ok(aircraft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeGeocoder {
        boxes: HashMap<String, BoundingBox>,
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn bounding_box(&self, country: &str) -> ApiResult<Option<BoundingBox>> {
            Ok(self.boxes.get(country).copied())
        }
    }

    #[derive(Default)]
    struct FakeStates {
        states: Vec<Vec<Value>>,
        fail: bool,
        requested: Mutex<Vec<BoundingBox>>,
    }

    #[async_trait]
    impl FlightStateSource for FakeStates {
        async fn states(&self, area: &BoundingBox) -> ApiResult<Vec<Vec<Value>>> {
            self.requested.lock().unwrap().push(*area);
            if self.fail {
                return Err(ApiError::InvalidResponse("boom".into()));
            }
            Ok(self.states.clone())
        }
    }

    fn poland() -> BoundingBox {
        BoundingBox::new(49.0, 55.0, 14.1, 24.1)
    }

    fn geocoder() -> FakeGeocoder {
        FakeGeocoder {
            boxes: HashMap::from([("Poland".to_string(), poland())]),
        }
    }

    fn state(callsign: &str, altitude: f64) -> Vec<Value> {
        json!([
            "48ae01", callsign, "Poland", 0, 0, 21.0, 52.2, altitude, false, 230.0, 90.0, 0.0, null, altitude
        ])
        .as_array()
        .cloned()
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_country_normalizes_states() {
        let source = FakeStates {
            states: vec![state("LOT1 ", 10000.0), vec![json!("short")], state("LOT2", 9000.0)],
            ..Default::default()
        };
        let tracker = AircraftTracker::new(geocoder(), source);

        let aircraft = tracker.fetch_country("Poland").await.unwrap();
        let callsigns: Vec<&str> = aircraft.iter().map(Aircraft::callsign).collect();
        assert_eq!(callsigns, ["LOT1", "LOT2"]);
        assert_eq!(aircraft[0].altitude(), 10000.0);
        assert_eq!(*tracker.states.requested.lock().unwrap(), [poland()]);
    }

    #[tokio::test]
    async fn unknown_country_is_not_found() {
        let tracker = AircraftTracker::new(geocoder(), FakeStates::default());
        let err = tracker.fetch_country("Atlantis").await.unwrap_err();
        assert!(matches!(err, ApiError::CountryNotFound(ref c) if c == "Atlantis"));
        assert!(tracker.states.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_airspace_is_empty_list() {
        let tracker = AircraftTracker::new(geocoder(), FakeStates::default());
        assert!(tracker.fetch_country("Poland").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn source_errors_propagate() {
        let source = FakeStates {
            fail: true,
            ..Default::default()
        };
        let tracker = AircraftTracker::new(geocoder(), source);
        let err = tracker.fetch_area(&poland()).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn usable_as_trait_object() {
        let tracker = AircraftTracker::new(
            geocoder(),
            FakeStates {
                states: vec![state("LOT9", 100.0)],
                ..Default::default()
            },
        );
        let feed: &dyn AircraftFeed = &tracker;
        assert_eq!(feed.fetch_country("Poland").await.unwrap().len(), 1);
    }

    #[test]
    fn builds_from_default_config() {
        assert!(AircraftTracker::from_config(&ApiConfig::default()).is_ok());
    }
}
