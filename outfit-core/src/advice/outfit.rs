use crate::model::Gender;

/// Returned when no band matches, which only a NaN temperature can cause.
pub const OUTFIT_UNAVAILABLE: &str = "기온 정보를 불러오지 못했습니다.";

/// A temperature interval with a garment list per gender.
///
/// `min` is inclusive and `max` exclusive; `None` leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutfitBand {
    pub label: &'static str,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub female: &'static [&'static str],
    pub male: &'static [&'static str],
}

impl OutfitBand {
    pub fn contains(&self, temperature: f64) -> bool {
        let above_min = self.min.is_none_or(|min| temperature >= min);
        let below_max = self.max.is_none_or(|max| temperature < max);
        above_min && below_max
    }

    pub fn garments(&self, gender: Gender) -> &'static [&'static str] {
        match gender {
            Gender::Female => self.female,
            Gender::Male => self.male,
        }
    }

    pub fn header(&self) -> String {
        format!("{} 체감", self.label)
    }
}

/// Warmest first. Each `max` equals the `min` of the band above it, so the
/// list covers the whole real line without overlap.
pub const OUTFIT_BANDS: &[OutfitBand] = &[
    OutfitBand {
        label: "한여름",
        min: Some(28.0),
        max: None,
        female: &["민소매 또는 얇은 반팔", "린넨 셔츠/원피스", "숏팬츠 또는 가벼운 스커트", "샌들/뮬"],
        male: &["반팔 티셔츠", "린넨 셔츠", "숏팬츠", "샌들/슬립온"],
    },
    OutfitBand {
        label: "초여름",
        min: Some(23.0),
        max: Some(28.0),
        female: &["반팔/얇은 블라우스", "가벼운 와이드 팬츠", "얇은 가디건(실내 대비)"],
        male: &["반팔 셔츠/티", "면 팬츠", "얇은 셔츠 아우터"],
    },
    OutfitBand {
        label: "따뜻",
        min: Some(20.0),
        max: Some(23.0),
        female: &["긴팔 티/셔츠", "얇은 니트", "가벼운 재킷"],
        male: &["긴팔 티/셔츠", "가벼운 니트", "얇은 자켓"],
    },
    OutfitBand {
        label: "선선",
        min: Some(17.0),
        max: Some(20.0),
        female: &["니트/맨투맨", "트렌치나 얇은 코트"],
        male: &["맨투맨/니트", "가벼운 바람막이"],
    },
    OutfitBand {
        label: "쌀쌀",
        min: Some(12.0),
        max: Some(17.0),
        female: &["자켓/가디건", "긴바지", "얇은 머플러"],
        male: &["자켓", "긴바지", "얇은 머플러"],
    },
    OutfitBand {
        label: "초겨울",
        min: Some(9.0),
        max: Some(12.0),
        female: &["코트", "니트", "레깅스 또는 두꺼운 팬츠"],
        male: &["코트", "니트", "두꺼운 팬츠"],
    },
    OutfitBand {
        label: "춥다",
        min: Some(5.0),
        max: Some(9.0),
        female: &["두꺼운 코트", "니트/기모", "히트텍 레이어드"],
        male: &["두꺼운 코트", "기모 상의", "히트텍 레이어드"],
    },
    OutfitBand {
        label: "한겨울",
        min: None,
        max: Some(5.0),
        female: &["롱패딩", "두꺼운 니트", "방한 부츠"],
        male: &["롱패딩", "두꺼운 니트", "방한 부츠"],
    },
];

/// First band, scanning warmest to coldest, that contains `temperature`.
pub fn band_for(temperature: f64) -> Option<&'static OutfitBand> {
    OUTFIT_BANDS.iter().find(|band| band.contains(temperature))
}

/// Header line (`<label> 체감`) followed by the garments for `gender`.
pub fn pick_outfit(temperature: f64, gender: Gender) -> Vec<String> {
    let Some(band) = band_for(temperature) else {
        return vec![OUTFIT_UNAVAILABLE.to_string()];
    };

    std::iter::once(band.header())
        .chain(band.garments(gender).iter().map(|item| item.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label_at(temperature: f64) -> &'static str {
        band_for(temperature).map(|band| band.label).unwrap_or("none")
    }

    #[test]
    fn boundaries_land_in_adjacent_bands() {
        let cases = [
            (28.0, "한여름"),
            (27.999, "초여름"),
            (23.0, "초여름"),
            (22.999, "따뜻"),
            (20.0, "따뜻"),
            (19.999, "선선"),
            (17.0, "선선"),
            (16.999, "쌀쌀"),
            (12.0, "쌀쌀"),
            (11.999, "초겨울"),
            (9.0, "초겨울"),
            (8.999, "춥다"),
            (5.0, "춥다"),
            (4.999, "한겨울"),
        ];

        for (temperature, expected) in cases {
            assert_eq!(label_at(temperature), expected, "at {temperature}");
        }
    }

    #[test]
    fn exactly_one_band_matches_across_the_line() {
        let mut t = -60.0;
        while t <= 60.0 {
            let matches = OUTFIT_BANDS.iter().filter(|band| band.contains(t)).count();
            assert_eq!(matches, 1, "at {t}");
            t += 0.125;
        }
        assert_eq!(label_at(f64::INFINITY), "한여름");
        assert_eq!(label_at(f64::NEG_INFINITY), "한겨울");
    }

    #[test]
    fn header_precedes_gendered_items() {
        let female = pick_outfit(25.0, Gender::Female);
        assert_eq!(female[0], "초여름 체감");
        assert_eq!(&female[1..], ["반팔/얇은 블라우스", "가벼운 와이드 팬츠", "얇은 가디건(실내 대비)"]);

        let male = pick_outfit(25.0, Gender::Male);
        assert_eq!(male[0], "초여름 체감");
        assert_eq!(&male[1..], ["반팔 셔츠/티", "면 팬츠", "얇은 셔츠 아우터"]);
    }

    #[test]
    fn nan_falls_back_to_unavailable() {
        assert_eq!(pick_outfit(f64::NAN, Gender::Female), vec![OUTFIT_UNAVAILABLE.to_string()]);
    }
}
