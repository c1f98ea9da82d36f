use crate::common::{DomainResult, FetchError};
use async_trait::async_trait;

use super::types::{City, CurrentWeather};

/// Port for the static list of cities feeding a pipeline run.
pub trait CitySource: Send + Sync {
    fn load_cities(&self) -> DomainResult<Vec<City>>;
}

/// Port for the external weather provider. One call per city.
/// Timeouts belong to the implementation's transport.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, city: &City) -> Result<CurrentWeather, FetchError>;
}
