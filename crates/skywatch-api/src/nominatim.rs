use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde_json::Value;
use skywatch_types::BoundingBox;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::traits::Geocoder;

/// Geocoder backed by a Nominatim search endpoint.
pub struct NominatimClient {
    client: Client,
    url: String,
    user_agent: String,
}

impl NominatimClient {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        Ok(Self::with_client(config.http_client()?, config))
    }

    /// Reuse an existing HTTP client; endpoint and `User-Agent` come from `config`.
    pub fn with_client(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            url: config.geocoder_url.clone(),
            user_agent: config.user_agent.clone(),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn bounding_box(&self, country: &str) -> ApiResult<Option<BoundingBox>> {
        debug!(country, url = %self.url, "geocoding country");
        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, self.user_agent.as_str())
            .query(&[("country", country), ("format", "json"), ("limit", "1")])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status(),
            });
        }
        let places: Value = response.json().await?;
        Ok(bounding_box_from_places(&places))
    }
}

/// Extract the first place's `boundingbox` from a search response.
///
/// Nominatim reports boxes as `[south, north, west, east]` strings. An empty
/// result, a missing box, or one that does not parse as four numbers yields
/// `None`.
pub fn bounding_box_from_places(places: &Value) -> Option<BoundingBox> {
    let raw = places.as_array()?.first()?.get("boundingbox")?.as_array()?;
    let parts: Vec<String> = raw
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();
    match BoundingBox::from_strings(&parts) {
        Ok(bbox) => Some(bbox),
        Err(e) => {
            warn!(error = %e, "unusable bounding box in geocoder response");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{direct_client, serve_once};
    use serde_json::json;

    #[test]
    fn parses_first_place() {
        let places = json!([
            {"display_name": "Polska", "boundingbox": ["49.0020468", "55.0336963", "14.1229707", "24.1458936"]},
            {"display_name": "other", "boundingbox": ["0", "1", "2", "3"]}
        ]);
        let bbox = bounding_box_from_places(&places).unwrap();
        assert_eq!(bbox, BoundingBox::new(49.0020468, 55.0336963, 14.1229707, 24.1458936));
    }

    #[test]
    fn numeric_box_entries_are_accepted() {
        let places = json!([{"boundingbox": [1.5, 2.5, 3.5, 4.5]}]);
        assert_eq!(bounding_box_from_places(&places), Some(BoundingBox::new(1.5, 2.5, 3.5, 4.5)));
    }

    #[test]
    fn unusable_responses_are_not_found() {
        for places in [
            json!([]),
            json!({}),
            json!([{"display_name": "no box"}]),
            json!([{"boundingbox": ["1", "2", "3"]}]),
            json!([{"boundingbox": ["1", "north", "3", "4"]}]),
        ] {
            assert_eq!(bounding_box_from_places(&places), None, "{places}");
        }
    }

    #[tokio::test]
    async fn sends_search_query_with_user_agent() {
        let (url, request) = serve_once(
            "/search",
            "200 OK",
            r#"[{"boundingbox": ["49.0", "55.0", "14.1", "24.1"]}]"#,
        )
        .await;
        let config = ApiConfig {
            geocoder_url: url,
            ..Default::default()
        };
        let client = NominatimClient::with_client(direct_client(), &config);

        let bbox = client.bounding_box("Poland").await.unwrap();
        assert_eq!(bbox, Some(BoundingBox::new(49.0, 55.0, 14.1, 24.1)));

        let head = request.await.unwrap().to_lowercase();
        assert!(head.starts_with("get /search?"), "{head}");
        assert!(head.contains("country=poland"));
        assert!(head.contains("format=json"));
        assert!(head.contains("limit=1"));
        assert!(head.contains("user-agent: aircraft-tracker/1.0"));
    }

    #[tokio::test]
    async fn unparsable_box_is_not_an_error() {
        let (url, _request) = serve_once("/search", "200 OK", r#"[{"boundingbox": ["a", "b", "c", "d"]}]"#).await;
        let config = ApiConfig {
            geocoder_url: url,
            ..Default::default()
        };
        let client = NominatimClient::with_client(direct_client(), &config);
        assert_eq!(client.bounding_box("Poland").await.unwrap(), None);
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let (url, _request) = serve_once("/search", "503 Service Unavailable", "{}").await;
        let config = ApiConfig {
            geocoder_url: url,
            ..Default::default()
        };
        let client = NominatimClient::with_client(direct_client(), &config);
        let err = client.bounding_box("Poland").await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status } if status.as_u16() == 503));
    }
}
