use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use skywatch_types::BoundingBox;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::traits::FlightStateSource;

/// Flight-state source backed by the OpenSky `states/all` endpoint.
pub struct OpenSkyClient {
    client: Client,
    url: String,
}

impl OpenSkyClient {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        Ok(Self::with_client(config.http_client()?, &config.flight_states_url))
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl FlightStateSource for OpenSkyClient {
    async fn states(&self, area: &BoundingBox) -> ApiResult<Vec<Vec<Value>>> {
        debug!(%area, url = %self.url, "requesting flight states");
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("lamin", area.south),
                ("lamax", area.north),
                ("lomin", area.west),
                ("lomax", area.east),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status(),
            });
        }
        let body: Value = response.json().await?;
        let states = states_from_response(body)?;
        debug!(count = states.len(), "received flight states");
        Ok(states)
    }
}

/// Pull the state vectors out of a `states/all` response.
///
/// OpenSky answers `"states": null` when nothing is airborne in the area; that
/// and a missing key both yield an empty list. Entries that are not arrays are
/// skipped.
pub fn states_from_response(body: Value) -> ApiResult<Vec<Vec<Value>>> {
    match body.get("states") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(states)) => Ok(states
            .iter()
            .filter_map(|s| s.as_array().cloned())
            .collect()),
        Some(other) => Err(ApiError::InvalidResponse(format!(
            "`states` is not an array: {other}"
        ))),
    }
}
