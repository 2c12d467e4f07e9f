//! Pure lookups used while rendering: AQI tiers, AQI colors and icon URLs.

/// Severity tier of an air quality reading, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AqiLevel {
    Good,
    Moderate,
    Poor,
    VeryPoor,
    Hazardous,
    VeryHazardous,
    Unknown,
}

impl AqiLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Хорошо",
            Self::Moderate => "Умеренно",
            Self::Poor => "Плохо",
            Self::VeryPoor => "Очень плохо",
            Self::Hazardous => "Опасно",
            Self::VeryHazardous => "Очень опасно",
            Self::Unknown => "Неизвестно",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Good => "Качество воздуха удовлетворительное",
            Self::Moderate => "Качество воздуха приемлемое",
            Self::Poor => "Может влиять на чувствительных людей",
            Self::VeryPoor => "Может влиять на всех",
            Self::Hazardous => "Серьезный риск для здоровья",
            Self::VeryHazardous => "Чрезвычайные условия",
            Self::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AqiClassification {
    pub level: AqiLevel,
    pub description: &'static str,
    pub color_hex: &'static str,
}

struct AqiRange {
    min: i32,
    max: i32,
    level: AqiLevel,
}

const AQI_RANGES: [AqiRange; 6] = [
    AqiRange { min: 0, max: 50, level: AqiLevel::Good },
    AqiRange { min: 51, max: 100, level: AqiLevel::Moderate },
    AqiRange { min: 101, max: 150, level: AqiLevel::Poor },
    AqiRange { min: 151, max: 200, level: AqiLevel::VeryPoor },
    AqiRange { min: 201, max: 300, level: AqiLevel::Hazardous },
    AqiRange { min: 301, max: 500, level: AqiLevel::VeryHazardous },
];

/// Color shown for an unknown reading; never produced by [`color_for_aqi`].
pub const UNKNOWN_AQI_COLOR: &str = "";

/// Map an index onto the six-tier table. Absent or out-of-range indices are `Unknown`.
pub fn classify_aqi(index: Option<i32>) -> AqiClassification {
    let level = index
        .and_then(|v| AQI_RANGES.iter().find(|r| v >= r.min && v <= r.max))
        .map_or(AqiLevel::Unknown, |r| r.level);

    let color_hex = match (level, index) {
        (AqiLevel::Unknown, _) | (_, None) => UNKNOWN_AQI_COLOR,
        (_, Some(v)) => color_for_aqi(v),
    };

    AqiClassification { level, description: level.description(), color_hex }
}

/// Background color for an index. Uses the same thresholds as [`classify_aqi`];
/// anything above 300 gets the last color.
pub fn color_for_aqi(index: i32) -> &'static str {
    match index {
        i32::MIN..=50 => "#4CAF50",
        51..=100 => "#FFEB3B",
        101..=150 => "#FF9800",
        151..=200 => "#F44336",
        201..=300 => "#9C27B0",
        _ => "#795548",
    }
}

/// Turn the icon path the API returns (usually `//cdn.weatherapi.com/...`) into a full URL.
///
/// Empty input stays empty: there is no icon.
pub fn normalize_icon_url(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    if has_scheme(path) {
        return path.to_string();
    }
    match path.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => format!("https://{path}"),
    }
}

fn has_scheme(path: &str) -> bool {
    match path.split_once("://") {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_index_in_range_gets_a_known_level() {
        for v in 0..=500 {
            assert_ne!(classify_aqi(Some(v)).level, AqiLevel::Unknown, "index {v}");
        }
    }

    #[test]
    fn severity_never_decreases() {
        let mut prev = classify_aqi(Some(0)).level;
        for v in 1..=500 {
            let level = classify_aqi(Some(v)).level;
            assert!(level >= prev, "index {v} went from {prev:?} to {level:?}");
            prev = level;
        }
    }

    #[test]
    fn absent_and_out_of_range_are_unknown() {
        for index in [None, Some(-1), Some(501), Some(10_000)] {
            let c = classify_aqi(index);
            assert_eq!(c.level, AqiLevel::Unknown);
            assert_eq!(c.level.label(), "Неизвестно");
            assert_eq!(c.description, "");
            assert_eq!(c.color_hex, UNKNOWN_AQI_COLOR);
        }
    }

    #[test]
    fn boundaries_fall_on_documented_side() {
        let cases = [
            (50, AqiLevel::Good, "#4CAF50"),
            (51, AqiLevel::Moderate, "#FFEB3B"),
            (100, AqiLevel::Moderate, "#FFEB3B"),
            (101, AqiLevel::Poor, "#FF9800"),
            (150, AqiLevel::Poor, "#FF9800"),
            (151, AqiLevel::VeryPoor, "#F44336"),
            (200, AqiLevel::VeryPoor, "#F44336"),
            (201, AqiLevel::Hazardous, "#9C27B0"),
            (300, AqiLevel::Hazardous, "#9C27B0"),
            (301, AqiLevel::VeryHazardous, "#795548"),
        ];
        for (v, level, color) in cases {
            assert_eq!(classify_aqi(Some(v)).level, level, "index {v}");
            assert_eq!(color_for_aqi(v), color, "index {v}");
        }
    }

    #[test]
    fn classification_color_agrees_with_color_table() {
        for v in 0..=500 {
            assert_eq!(classify_aqi(Some(v)).color_hex, color_for_aqi(v));
        }
    }

    #[test]
    fn epa_scale_values_are_good() {
        // The API reports 1..=6; on this table they all land in the first tier.
        for v in 1..=6 {
            assert_eq!(classify_aqi(Some(v)).level, AqiLevel::Good);
        }
    }

    #[test]
    fn icon_urls() {
        assert_eq!(normalize_icon_url(""), "");
        assert_eq!(normalize_icon_url("//cdn.x/a.png"), "https://cdn.x/a.png");
        assert_eq!(normalize_icon_url("cdn.x/a.png"), "https://cdn.x/a.png");
        assert_eq!(normalize_icon_url("https://cdn.x/a.png"), "https://cdn.x/a.png");
        assert_eq!(normalize_icon_url("http://cdn.x/a.png"), "http://cdn.x/a.png");
    }
}
