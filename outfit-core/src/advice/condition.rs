/// Used for codes missing from the table.
pub const CONDITION_FALLBACK: &str = "날씨 정보";

/// Human-readable label for a WMO weather code.
/// See: https://open-meteo.com/en/docs#weathervariables
pub fn condition_label(code: i32) -> &'static str {
    match code {
        0 => "맑음",
        1 => "대체로 맑음",
        2 => "부분적으로 흐림",
        3 => "흐림",
        45 => "안개",
        48 => "착빙 안개",
        51 => "약한 이슬비",
        53 => "이슬비",
        55 => "강한 이슬비",
        56 => "약한 어는 이슬비",
        57 => "강한 어는 이슬비",
        61 => "약한 비",
        63 => "비",
        65 => "강한 비",
        66 => "약한 어는 비",
        67 => "강한 어는 비",
        71 => "약한 눈",
        73 => "눈",
        75 => "강한 눈",
        77 => "싸락눈",
        80 => "약한 소나기",
        81 => "소나기",
        82 => "강한 소나기",
        85 => "약한 눈 소나기",
        86 => "강한 눈 소나기",
        95 => "천둥번개",
        96 => "우박 동반 천둥번개",
        99 => "강한 우박 동반 천둥번개",
        _ => CONDITION_FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(condition_label(0), "맑음");
        assert_eq!(condition_label(48), "착빙 안개");
        assert_eq!(condition_label(61), "약한 비");
        assert_eq!(condition_label(86), "강한 눈 소나기");
        assert_eq!(condition_label(99), "강한 우박 동반 천둥번개");
    }

    #[test]
    fn unknown_codes_fall_back() {
        for code in [-1, 4, 50, 100, 999] {
            assert_eq!(condition_label(code), CONDITION_FALLBACK);
        }
    }
}
