//! Error types for the two outbound services and the recommendation step.

use reqwest::StatusCode;
use thiserror::Error;

/// A single geocoding or forecast call failed.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Failed to send request to {service}: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse {service} JSON: {source}")]
    Malformed {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a recommendation could not be produced for the committed city.
#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Forecast unavailable: {0}")]
    Forecast(#[from] ServiceError),

    #[error("Forecast response has no usable entry for tomorrow")]
    DataMissing,
}

impl RecommendError {
    /// Status line shown in place of a fresh result.
    pub fn user_message(&self) -> &'static str {
        match self {
            RecommendError::Forecast(_) => {
                "날씨 정보를 불러오지 못했습니다. 잠시 후 다시 시도해주세요."
            }
            RecommendError::DataMissing => "내일 날씨 데이터를 찾을 수 없습니다.",
        }
    }
}
