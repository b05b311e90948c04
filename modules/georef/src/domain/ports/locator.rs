use async_trait::async_trait;
use serde_json::Value;

use crate::contract::model::Location;
use crate::domain::error::BackendError;

/// Door-number boundaries used to interpolate along a street.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorRange {
    pub start_right: f64,
    pub end_left: f64,
}

/// Spatial backend port: linear referencing along a street geometry.
#[async_trait]
pub trait StreetLocator: Send + Sync {
    async fn street_number_location(
        &self,
        geometry: &Value,
        number: f64,
        range: DoorRange,
    ) -> Result<Location, BackendError>;
}
