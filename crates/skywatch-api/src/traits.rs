use async_trait::async_trait;
use serde_json::Value;
use skywatch_types::{Aircraft, BoundingBox};

use crate::error::ApiResult;

/// Resolves a country name to the rectangle enclosing it.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` when the service knows no such country or returns no
    /// usable bounding box.
    async fn bounding_box(&self, country: &str) -> ApiResult<Option<BoundingBox>>;
}

/// Source of raw flight state vectors.
#[async_trait]
pub trait FlightStateSource: Send + Sync {
    /// Raw state vectors for every aircraft currently inside `area`.
    async fn states(&self, area: &BoundingBox) -> ApiResult<Vec<Vec<Value>>>;
}

/// Country-level aircraft lookup, as consumed by the console.
#[async_trait]
pub trait AircraftFeed: Send + Sync {
    /// Aircraft currently inside the airspace of `country`.
    ///
    /// Fails with [`ApiError::CountryNotFound`] when the country cannot be
    /// geocoded.
    ///
    /// [`ApiError::CountryNotFound`]: crate::ApiError::CountryNotFound
    async fn fetch_country(&self, country: &str) -> ApiResult<Vec<Aircraft>>;
}
