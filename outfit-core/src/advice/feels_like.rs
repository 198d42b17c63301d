/// At or below this the wind-chill formula applies.
pub const WIND_CHILL_MAX_C: f64 = 10.0;
/// At or above this the humidity-proxy adjustment applies.
pub const HEAT_MIN_C: f64 = 24.0;

const HUMIDITY_PROXY_MIN: f64 = 30.0;
const HUMIDITY_PROXY_MAX: f64 = 85.0;

/// Perceived temperature in °C, unrounded.
///
/// Cold days use the standard wind-chill approximation with wind in m/s.
/// Hot days have no humidity signal, so precipitation probability stands in
/// for it, clamped to `[30, 85]`. In between the raw temperature is kept.
///
/// Callers substitute 0 for missing or negative wind and precipitation.
pub fn feels_like(temperature: f64, wind_kmh: f64, precipitation_pct: f64) -> f64 {
    if temperature <= WIND_CHILL_MAX_C {
        let wind_factor = (wind_kmh / 3.6).powf(0.16);
        13.12 + 0.6215 * temperature - 11.37 * wind_factor + 0.3965 * temperature * wind_factor
    } else if temperature >= HEAT_MIN_C {
        let humidity = precipitation_pct.clamp(HUMIDITY_PROXY_MIN, HUMIDITY_PROXY_MAX);
        temperature + 0.05 * (humidity - 50.0)
    } else {
        temperature
    }
}
