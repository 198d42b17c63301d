//! Core library for the `outfit` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - Geocoding and forecast service abstractions, with an Open-Meteo client
//! - The feels-like, outfit-band and tips rules
//! - The interactive city search session and the recommendation pipeline
//!
//! It is used by `outfit-cli`, but holds no terminal code and can back any
//! other front end.

pub mod advice;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod search;

pub use config::Config;
pub use error::{RecommendError, ServiceError};
pub use model::{City, DailyForecast, DayForecast, ForecastResponse, Gender};
pub use pipeline::{Recommendation, RecommendationPipeline, derive_recommendation};
pub use provider::{ForecastService, GeocodingService, open_meteo::OpenMeteoClient};
pub use search::{Key, ListEntry, SearchSession, SearchState, SearchTicket};
