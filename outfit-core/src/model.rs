use serde::{Deserialize, Deserializer, Serialize};
use std::{convert::TryFrom, fmt};

/// Day offset the recommendation is built for (0 = today).
pub const TOMORROW: usize = 1;

/// Whose garment list the outfit selector returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Female,
    Male,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
        }
    }

    pub const fn all() -> &'static [Gender] {
        &[Gender::Female, Gender::Male]
    }

    pub fn toggled(self) -> Self {
        match self {
            Gender::Female => Gender::Male,
            Gender::Male => Gender::Female,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Gender {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "female" | "f" => Ok(Gender::Female),
            "male" | "m" => Ok(Gender::Male),
            _ => Err(anyhow::anyhow!(
                "Unknown gender preference '{value}'. Supported values: female, male."
            )),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::try_from(s)
    }
}

/// A resolved city. Forecasts are keyed by its coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin2: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    /// Quick-pick shortcut that skips geocoding.
    pub fn seoul() -> Self {
        Self {
            name: "서울".to_string(),
            admin1: Some("서울특별시".to_string()),
            admin2: None,
            latitude: 37.5665,
            longitude: 126.978,
        }
    }

    /// Heading shown above a recommendation, e.g. `서울 · 서울특별시`.
    pub fn display_label(&self) -> String {
        match self.admin1.as_deref().filter(|a| !a.is_empty()) {
            Some(admin1) => format!("{} · {}", self.name, admin1),
            None => self.name.clone(),
        }
    }

    /// Text written back into the search box once committed.
    pub fn input_label(&self) -> String {
        match self.admin1.as_deref().filter(|a| !a.is_empty()) {
            Some(admin1) => format!("{}, {}", self.name, admin1),
            None => self.name.clone(),
        }
    }

    /// Secondary line of a candidate entry (`admin1 admin2`), empty when unknown.
    pub fn region_label(&self) -> String {
        format!(
            "{} {}",
            self.admin1.as_deref().unwrap_or_default(),
            self.admin2.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let region = self.region_label();
        if region.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{} ({})", self.name, region)
        }
    }
}

/// Body of a forecast response. `daily` may be absent on a degraded reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub daily: Option<DailyForecast>,
}

impl ForecastResponse {
    pub fn day(&self, index: usize) -> Option<DayForecast> {
        self.daily.as_ref().and_then(|daily| daily.day(index))
    }
}

/// Parallel per-day sequences, all indexed by day offset. A missing or
/// `null` array reads as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyForecast {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub time: Vec<Option<String>>,
    #[serde(default, deserialize_with = "null_as_empty", rename = "temperature_2m_max")]
    pub temperature_max: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty", rename = "temperature_2m_min")]
    pub temperature_min: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub precipitation_probability_max: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty", rename = "wind_speed_10m_max")]
    pub wind_speed_max: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub weather_code: Vec<Option<i32>>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl DailyForecast {
    /// Row at `index`. Requires a non-empty date and both temperature
    /// extremes; the remaining fields stay optional.
    pub fn day(&self, index: usize) -> Option<DayForecast> {
        let date = self
            .time
            .get(index)
            .cloned()
            .flatten()
            .filter(|d| !d.trim().is_empty())?;
        let temperature_max = self.temperature_max.get(index).copied().flatten()?;
        let temperature_min = self.temperature_min.get(index).copied().flatten()?;

        Some(DayForecast {
            date,
            temperature_max,
            temperature_min,
            precipitation_probability: self
                .precipitation_probability_max
                .get(index)
                .copied()
                .flatten(),
            wind_speed_kmh: self.wind_speed_max.get(index).copied().flatten(),
            weather_code: self.weather_code.get(index).copied().flatten(),
        })
    }
}

/// One day of the daily forecast, read out of the parallel sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct DayForecast {
    pub date: String,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub precipitation_probability: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub weather_code: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_as_str_roundtrip() {
        for gender in Gender::all() {
            let parsed = Gender::try_from(gender.as_str()).expect("roundtrip should succeed");
            assert_eq!(*gender, parsed);
        }
    }

    #[test]
    fn unknown_gender_error() {
        let err = Gender::try_from("other").unwrap_err();
        assert!(err.to_string().contains("Unknown gender preference"));
    }

    #[test]
    fn gender_defaults_to_female_and_toggles() {
        assert_eq!(Gender::default(), Gender::Female);
        assert_eq!(Gender::Female.toggled(), Gender::Male);
        assert_eq!(Gender::Male.toggled(), Gender::Female);
    }

    #[test]
    fn city_labels() {
        let seoul = City::seoul();
        assert_eq!(seoul.display_label(), "서울 · 서울특별시");
        assert_eq!(seoul.input_label(), "서울, 서울특별시");
        assert_eq!(seoul.region_label(), "서울특별시");

        let bare = City {
            name: "독도".into(),
            admin1: None,
            admin2: None,
            latitude: 37.24,
            longitude: 131.86,
        };
        assert_eq!(bare.display_label(), "독도");
        assert_eq!(bare.region_label(), "");
        assert_eq!(bare.to_string(), "독도");
    }

    #[test]
    fn day_reads_aligned_row() {
        let json = serde_json::json!({
            "daily": {
                "time": ["2026-10-16", "2026-10-17", "2026-10-18"],
                "temperature_2m_max": [20.0, 30.0, 18.0],
                "temperature_2m_min": [10.0, 22.0, 8.0],
                "precipitation_probability_max": [0, 70, null],
                "wind_speed_10m_max": [5.0, 10.0, 3.0],
                "weather_code": [0, 61, 3]
            }
        });
        let parsed: ForecastResponse = serde_json::from_value(json).unwrap();

        let tomorrow = parsed.day(TOMORROW).unwrap();
        assert_eq!(tomorrow.date, "2026-10-17");
        assert_eq!(tomorrow.temperature_max, 30.0);
        assert_eq!(tomorrow.precipitation_probability, Some(70.0));
        assert_eq!(tomorrow.weather_code, Some(61));

        let after = parsed.day(2).unwrap();
        assert_eq!(after.precipitation_probability, None);
    }

    #[test]
    fn day_is_none_for_short_or_blank_dates() {
        let short: ForecastResponse = serde_json::from_value(serde_json::json!({
            "daily": { "time": ["2026-10-16"], "temperature_2m_max": [1.0], "temperature_2m_min": [0.0] }
        }))
        .unwrap();
        assert!(short.day(TOMORROW).is_none());

        let blank: ForecastResponse = serde_json::from_value(serde_json::json!({
            "daily": {
                "time": ["2026-10-16", ""],
                "temperature_2m_max": [1.0, 2.0],
                "temperature_2m_min": [0.0, 1.0]
            }
        }))
        .unwrap();
        assert!(blank.day(TOMORROW).is_none());

        let absent: ForecastResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(absent.day(TOMORROW).is_none());
    }

    #[test]
    fn null_arrays_read_as_empty() {
        let parsed: ForecastResponse = serde_json::from_value(serde_json::json!({
            "daily": {
                "time": null,
                "temperature_2m_max": [1.0, 2.0],
                "temperature_2m_min": null,
                "weather_code": null
            }
        }))
        .unwrap();

        let daily = parsed.daily.as_ref().unwrap();
        assert!(daily.time.is_empty());
        assert!(daily.temperature_min.is_empty());
        assert_eq!(daily.temperature_max, vec![Some(1.0), Some(2.0)]);
        assert!(parsed.day(TOMORROW).is_none());
    }
}
