//! Committed city → tomorrow's forecast → outfit and tips.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    advice::{
        TipInputs, condition::CONDITION_FALLBACK, condition_label, feels_like, pick_outfit,
        round_half_up, tips,
    },
    error::RecommendError,
    model::{City, ForecastResponse, Gender, TOMORROW},
    provider::ForecastService,
};

pub const STATUS_IDLE: &str = "도시를 선택하면 내일 추천이 나타납니다.";
pub const STATUS_LOADING: &str = "내일 날씨를 불러오는 중...";
pub const STATUS_READY: &str = "내일 추천이 준비됐어요.";
pub const FEELS_NOTE: &str = "체감 온도는 바람(추위)과 습도(더위)를 고려해 계산했어요.";

/// Everything a presentation layer needs to show tomorrow's advice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub city: String,
    pub date: String,
    pub gender: Gender,
    /// Rounded perceived temperature.
    pub feels_like: i64,
    pub feels_like_exact: f64,
    pub temperature_max: i64,
    pub temperature_min: i64,
    pub range: String,
    pub condition: String,
    pub summary: String,
    pub note: String,
    pub outfit: Vec<String>,
    pub tips: Vec<String>,
    pub status: String,
}

/// Build tomorrow's recommendation from an already-fetched forecast.
pub fn derive_recommendation(
    city: &City,
    forecast: &ForecastResponse,
    gender: Gender,
) -> Result<Recommendation, RecommendError> {
    let day = forecast.day(TOMORROW).ok_or(RecommendError::DataMissing)?;

    let precipitation = non_negative(day.precipitation_probability);
    let wind = non_negative(day.wind_speed_kmh);
    let average = (day.temperature_max + day.temperature_min) / 2.0;
    let perceived = feels_like(average, wind, precipitation);

    let condition = day
        .weather_code
        .map(condition_label)
        .unwrap_or(CONDITION_FALLBACK);
    let max = round_half_up(day.temperature_max);
    let min = round_half_up(day.temperature_min);

    Ok(Recommendation {
        city: city.display_label(),
        date: format_date(&day.date),
        gender,
        feels_like: round_half_up(perceived),
        feels_like_exact: perceived,
        temperature_max: max,
        temperature_min: min,
        range: format!("체감 기준 · 실제 최고 {max}° / 최저 {min}°"),
        condition: condition.to_string(),
        summary: format!(
            "{condition} · 강수확률 {precipitation}% · 최대 풍속 {} km/h",
            round_half_up(wind)
        ),
        note: FEELS_NOTE.to_string(),
        outfit: pick_outfit(perceived, gender),
        tips: tips(&TipInputs {
            precipitation_pct: precipitation,
            wind_kmh: wind,
            min_temperature: day.temperature_min,
            max_temperature: day.temperature_max,
        }),
        status: STATUS_READY.to_string(),
    })
}

/// `2026-10-17` → `2026.10.17 (KST)`.
pub fn format_date(iso: &str) -> String {
    match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(date) => date.format("%Y.%m.%d (KST)").to_string(),
        Err(_) => format!("{iso} (KST)"),
    }
}

fn non_negative(value: Option<f64>) -> f64 {
    value.filter(|v| *v >= 0.0).unwrap_or(0.0)
}

/// Holds the last committed city and its forecast so a gender change can
/// re-derive the outfit without another fetch.
///
/// A failed call only updates [`status`](Self::status); the last good
/// recommendation stays available through [`current`](Self::current).
#[derive(Debug)]
pub struct RecommendationPipeline<F> {
    forecast: F,
    city: Option<City>,
    fetched: Option<ForecastResponse>,
    current: Option<Recommendation>,
    status: &'static str,
}

impl<F: ForecastService> RecommendationPipeline<F> {
    pub fn new(forecast: F) -> Self {
        Self {
            forecast,
            city: None,
            fetched: None,
            current: None,
            status: STATUS_IDLE,
        }
    }

    pub fn status(&self) -> &'static str {
        self.status
    }

    pub fn current(&self) -> Option<&Recommendation> {
        self.current.as_ref()
    }

    pub fn city(&self) -> Option<&City> {
        self.city.as_ref()
    }

    pub fn service(&self) -> &F {
        &self.forecast
    }

    /// Fetch the forecast for `city` and derive a fresh recommendation.
    pub async fn recommend(
        &mut self,
        city: City,
        gender: Gender,
    ) -> Result<&Recommendation, RecommendError> {
        self.status = STATUS_LOADING;
        tracing::info!(city = %city.display_label(), %gender, "fetching forecast");

        let response = match self.forecast.daily_forecast(city.latitude, city.longitude).await {
            Ok(response) => response,
            Err(err) => {
                let err = RecommendError::from(err);
                tracing::warn!(error = %err, "forecast fetch failed");
                self.status = err.user_message();
                return Err(err);
            }
        };

        self.city = Some(city);
        self.fetched = Some(response);
        self.refresh(gender)
    }

    /// Re-derive from the cached forecast. `None` until a fetch has succeeded.
    pub fn regender(&mut self, gender: Gender) -> Option<Result<&Recommendation, RecommendError>> {
        if self.fetched.is_none() {
            return None;
        }
        Some(self.refresh(gender))
    }

    fn refresh(&mut self, gender: Gender) -> Result<&Recommendation, RecommendError> {
        let (Some(city), Some(forecast)) = (self.city.as_ref(), self.fetched.as_ref()) else {
            return Err(RecommendError::DataMissing);
        };

        match derive_recommendation(city, forecast, gender) {
            Ok(recommendation) => {
                self.status = STATUS_READY;
                Ok(&*self.current.insert(recommendation))
            }
            Err(err) => {
                tracing::warn!(error = %err, "forecast has no entry for tomorrow");
                self.status = err.user_message();
                Err(err)
            }
        }
    }
}
