//! Plain-text drawing of a rendered [`Screen`].

use weather_core::{Panel, Screen, Slot, Theme};

const RESET: &str = "\x1b[0m";

pub fn draw(screen: &Screen) -> String {
    let mut lines = Vec::new();
    let bold = match screen.theme {
        Theme::Light => "\x1b[1;30m",
        Theme::Dark => "\x1b[1;97m",
    };

    match &screen.panel {
        Some(Panel::Weather(p)) => {
            lines.push(format!("{bold}{}{RESET}", p.heading));
            lines.push(format!("  {}  {}", p.temperature, p.condition));
            if !p.icon_url.is_empty() {
                lines.push(format!("  {}", p.icon_url));
            }
            lines.push(format!(
                "Ощущается как: {}  Влажность: {}  Давление: {}  Ветер: {}",
                screen.text(Slot::FeelsLike),
                screen.text(Slot::Humidity),
                screen.text(Slot::Pressure),
                screen.text(Slot::Wind),
            ));
        }
        Some(Panel::Error(e)) => {
            lines.push(e.message.clone());
            lines.push(e.prompt.clone());
        }
        None => {}
    }

    if !screen.aqi_value.is_empty() {
        let value = match screen.aqi_color.and_then(hex_to_rgb) {
            Some((r, g, b)) => format!("\x1b[48;2;{r};{g};{b}m {} {RESET}", screen.aqi_value),
            None => screen.aqi_value.clone(),
        };
        lines.push(format!(
            "Качество воздуха: {value} {}. {}",
            screen.aqi_level, screen.aqi_description
        ));
    }

    if !screen.forecast.is_empty() {
        lines.push(format!("{bold}Прогноз{RESET}"));
        lines.extend(screen.forecast.iter().map(|card| {
            format!(
                "  {:<3} {:>7}  {}  {}  {}",
                card.day_name, card.avg_temp, card.max_temp, card.min_temp, card.condition
            )
        }));
    }

    if !screen.last_updated.is_empty() {
        lines.push(format!("Обновлено: {}", screen.last_updated));
    }

    lines.into_iter().map(|line| line + "\n").collect()
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::render::{CurrentPanel, ErrorPanel, ForecastCard};

    #[test]
    fn hex_colors() {
        assert_eq!(hex_to_rgb("#4CAF50"), Some((0x4C, 0xAF, 0x50)));
        assert_eq!(hex_to_rgb(""), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
    }

    #[test]
    fn weather_screen_lists_forecast_in_order() {
        let screen = Screen {
            panel: Some(Panel::Weather(CurrentPanel {
                heading: "Paris, France".into(),
                icon_url: String::new(),
                temperature: "12°C".into(),
                condition: "Облачно".into(),
            })),
            forecast: ["Пн", "Вт", "Ср"]
                .iter()
                .map(|d| ForecastCard {
                    day_name: d.to_string(),
                    icon_url: String::new(),
                    condition: "Ясно".into(),
                    avg_temp: "1°C".into(),
                    max_temp: "↑ 2°C".into(),
                    min_temp: "↓ 0°C".into(),
                })
                .collect(),
            aqi_value: "--".into(),
            last_updated: "09:30".into(),
            ..Screen::default()
        };

        let text = draw(&screen);
        let mon = text.find("Пн").expect("monday");
        let tue = text.find("Вт").expect("tuesday");
        let wed = text.find("Ср").expect("wednesday");
        assert!(mon < tue && tue < wed);
        assert!(text.contains("Paris, France"));
        assert!(text.contains("Обновлено: 09:30"));
    }

    #[test]
    fn error_screen_shows_both_lines_and_no_details() {
        let screen = Screen {
            panel: Some(Panel::Error(ErrorPanel {
                message: "Ошибка: Город не найден".into(),
                prompt: "Попробуйте другой город".into(),
            })),
            ..Screen::default()
        };

        let text = draw(&screen);
        assert_eq!(text, "Ошибка: Город не найден\nПопробуйте другой город\n");
    }
}
