use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::instrument;

use crate::{
    config::{Config, ForecastConfig, SearchConfig},
    error::ServiceError,
    model::{City, ForecastResponse},
};

use super::{ForecastService, GeocodingService};

const GEOCODING: &str = "Open-Meteo geocoding";
const FORECAST: &str = "Open-Meteo forecast";

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_probability_max,wind_speed_10m_max,weather_code";

/// Open-Meteo geocoding and forecast client. No API key is required.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
    search: SearchConfig,
    forecast: ForecastConfig,
}

impl OpenMeteoClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            geocoding_url: config.http.geocoding_url.clone(),
            forecast_url: config.http.forecast_url.clone(),
            search: config.search.clone(),
            forecast: config.forecast.clone(),
        })
    }

    #[instrument(skip(self), level = "debug")]
    async fn fetch_candidates(&self, query: &str) -> Result<Vec<City>, ServiceError> {
        let params = [
            ("name", query.to_string()),
            ("count", self.search.count.to_string()),
            ("language", self.search.language.clone()),
            ("format", "json".to_string()),
            ("countryCode", self.search.country_code.clone()),
        ];

        let parsed: GeocodingResponse = self.get_json(GEOCODING, &self.geocoding_url, &params).await?;
        let cities = parsed.results.unwrap_or_default();

        tracing::debug!(count = cities.len(), "geocoding returned candidates");
        Ok(cities)
    }

    #[instrument(skip(self), level = "debug")]
    async fn fetch_daily(&self, latitude: f64, longitude: f64) -> Result<ForecastResponse, ServiceError> {
        let params = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", self.forecast.timezone.clone()),
            ("forecast_days", self.forecast.forecast_days.to_string()),
            ("temperature_unit", "celsius".to_string()),
            ("wind_speed_unit", "kmh".to_string()),
        ];

        self.get_json(FORECAST, &self.forecast_url, &params).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        service: &'static str,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, ServiceError> {
        let res = self
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|source| ServiceError::Transport { service, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| ServiceError::Transport { service, source })?;

        if !status.is_success() {
            return Err(ServiceError::Status {
                service,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| ServiceError::Malformed { service, source })
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<City>>,
}

#[async_trait]
impl GeocodingService for OpenMeteoClient {
    async fn search(&self, query: &str) -> Result<Vec<City>, ServiceError> {
        self.fetch_candidates(query).await
    }
}

#[async_trait]
impl ForecastService for OpenMeteoClient {
    async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastResponse, ServiceError> {
        self.fetch_daily(latitude, longitude).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::model::TOMORROW;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenMeteoClient {
        let config = Config {
            http: HttpConfig {
                geocoding_url: format!("{}/v1/search", server.uri()),
                forecast_url: format!("{}/v1/forecast", server.uri()),
                timeout_secs: 5,
            },
            ..Config::default()
        };
        OpenMeteoClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_search_maps_results() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "부산"))
            .and(query_param("count", "8"))
            .and(query_param("language", "ko"))
            .and(query_param("countryCode", "KR"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"id": 1, "name": "부산", "admin1": "부산광역시", "latitude": 35.1, "longitude": 129.04, "country": "대한민국"},
                    {"id": 2, "name": "부산진구", "admin1": "부산광역시", "admin2": "부산진구", "latitude": 35.16, "longitude": 129.05}
                ],
                "generationtime_ms": 0.5
            })))
            .mount(&mock_server)
            .await;

        let cities = client_for(&mock_server).search("부산").await.unwrap();

        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].name, "부산");
        assert_eq!(cities[0].admin2, None);
        assert_eq!(cities[1].admin2.as_deref(), Some("부산진구"));
    }

    #[tokio::test]
    async fn test_search_without_results_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "generationtime_ms": 0.2
            })))
            .mount(&mock_server)
            .await;

        let cities = client_for(&mock_server).search("없는도시").await.unwrap();
        assert!(cities.is_empty());
    }

    #[tokio::test]
    async fn test_search_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": true, "reason": "Parameter count must be between 1 and 100."
            })))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).search("서울").await.unwrap_err();
        match err {
            ServiceError::Status { status, body, .. } => {
                assert_eq!(status.as_u16(), 400);
                assert!(body.contains("Parameter count"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_malformed_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).search("서울").await.unwrap_err();
        assert!(matches!(err, ServiceError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_daily_forecast_request_and_parse() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "37.5665"))
            .and(query_param("longitude", "126.978"))
            .and(query_param("daily", DAILY_FIELDS))
            .and(query_param("timezone", "Asia/Seoul"))
            .and(query_param("forecast_days", "3"))
            .and(query_param("wind_speed_unit", "kmh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": 37.55,
                "longitude": 127.0,
                "daily": {
                    "time": ["2026-10-16", "2026-10-17", "2026-10-18"],
                    "temperature_2m_max": [21.3, 19.8, 17.0],
                    "temperature_2m_min": [12.1, 10.4, 9.9],
                    "precipitation_probability_max": [10, 55, 0],
                    "wind_speed_10m_max": [8.4, 27.1, 5.0],
                    "weather_code": [1, 80, 0]
                }
            })))
            .mount(&mock_server)
            .await;

        let forecast = client_for(&mock_server)
            .daily_forecast(37.5665, 126.978)
            .await
            .unwrap();

        let tomorrow = forecast.day(TOMORROW).unwrap();
        assert_eq!(tomorrow.date, "2026-10-17");
        assert_eq!(tomorrow.wind_speed_kmh, Some(27.1));
        assert_eq!(tomorrow.weather_code, Some(80));
    }

    #[tokio::test]
    async fn test_daily_forecast_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server)
            .daily_forecast(35.1, 129.04)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "가".repeat(300);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
