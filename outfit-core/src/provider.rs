use crate::{
    Config,
    error::ServiceError,
    model::{City, ForecastResponse},
    provider::open_meteo::OpenMeteoClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

/// Resolves a partial city name into ranked candidates.
#[async_trait]
pub trait GeocodingService: Send + Sync + Debug {
    /// An empty vector means the lookup succeeded with no matches.
    async fn search(&self, query: &str) -> Result<Vec<City>, ServiceError>;
}

/// Fetches the short daily forecast for a coordinate pair.
#[async_trait]
pub trait ForecastService: Send + Sync + Debug {
    async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastResponse, ServiceError>;
}

/// Construct the Open-Meteo client described by `config`.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenMeteoClient> {
    OpenMeteoClient::new(config)
}
