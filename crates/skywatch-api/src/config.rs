use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;

/// Endpoints and HTTP settings for the remote collaborators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Nominatim-compatible search endpoint.
    pub geocoder_url: String,
    /// OpenSky-compatible `states/all` endpoint.
    pub flight_states_url: String,
    /// Per-request timeout in seconds. Requests are never retried.
    pub timeout_secs: u64,
    /// `User-Agent` sent with every request; Nominatim rejects anonymous clients.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            geocoder_url: "https://nominatim.openstreetmap.org/search".to_string(),
            flight_states_url: "https://opensky-network.org/api/states/all".to_string(),
            timeout_secs: 10,
            user_agent: "aircraft-tracker/1.0".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the HTTP client shared by the collaborators.
    pub fn http_client(&self) -> ApiResult<Client> {
        let client = Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout())
            .build()?;
        Ok(client)
    }
}
