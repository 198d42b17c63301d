pub const TIP_RAIN: &str = "우산 또는 방수 아우터 챙기기";
pub const TIP_WIND: &str = "바람이 강해 바람막이나 스카프 추천";
pub const TIP_COLD: &str = "아침/밤 기온이 낮아 레이어드 추천";
pub const TIP_SUN: &str = "햇볕이 강하니 선크림/모자 준비";
pub const TIP_NONE: &str = "큰 이슈 없이 편하게 입어도 좋아요";

const RAIN_PCT: f64 = 50.0;
const WIND_KMH: f64 = 25.0;
const COLD_MIN_C: f64 = 5.0;
const HEAT_MAX_C: f64 = 28.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TipInputs {
    pub precipitation_pct: f64,
    pub wind_kmh: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
}

/// Advisories in fixed order: rain, wind, cold, sun. Each triggers on its
/// own; when none does a single no-concerns line is returned.
pub fn tips(inputs: &TipInputs) -> Vec<String> {
    let checks = [
        (inputs.precipitation_pct >= RAIN_PCT, TIP_RAIN),
        (inputs.wind_kmh >= WIND_KMH, TIP_WIND),
        (inputs.min_temperature <= COLD_MIN_C, TIP_COLD),
        (inputs.max_temperature >= HEAT_MAX_C, TIP_SUN),
    ];

    let mut out: Vec<String> = checks
        .into_iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, tip)| tip.to_string())
        .collect();

    if out.is_empty() {
        out.push(TIP_NONE.to_string());
    }
    out
}
