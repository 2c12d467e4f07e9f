#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn current_body(city: &str) -> Value {
    json!({
        "location": { "name": city, "country": "France", "localtime_epoch": 1792400000 },
        "current": {
            "last_updated_epoch": 1792399500,
            "temp_c": 12.0,
            "feelslike_c": 10.5,
            "humidity": 81,
            "pressure_mb": 1017.0,
            "wind_kph": 14.4,
            "wind_dir": "SW",
            "condition": {
                "text": "Облачно",
                "icon": "//cdn.weatherapi.com/weather/64x64/day/119.png",
                "code": 1006
            }
        }
    })
}

pub fn forecast_body(city: &str) -> Value {
    let day = |date: &str, avg: f64, max: f64, min: f64, text: &str| {
        json!({
            "date": date,
            "day": {
                "avgtemp_c": avg,
                "maxtemp_c": max,
                "mintemp_c": min,
                "condition": { "text": text, "icon": "//cdn.weatherapi.com/weather/64x64/day/113.png" }
            },
            "hour": []
        })
    };

    json!({
        "location": { "name": city, "country": "France" },
        "current": current_body(city)["current"].clone(),
        "forecast": {
            "forecastday": [
                day("2026-10-19", 10.1, 14.0, 6.0, "Солнечно"),
                day("2026-10-20", 7.4, 11.0, 4.0, "Дождь"),
                day("2026-10-21", 6.0, 9.5, 2.5, "Пасмурно"),
            ]
        }
    })
}

pub fn aqi_body(city: &str, index: Option<i32>) -> Value {
    let mut body = current_body(city);
    body["current"]["air_quality"] = match index {
        Some(i) => json!({ "co": 230.3, "pm2_5": 7.1, "us-epa-index": i, "gb-defra-index": 1 }),
        None => json!({}),
    };
    body
}

/// Mount all three endpoints for `city` with successful fixtures.
pub async fn mount_city(server: &MockServer, city: &str, aqi: Option<i32>) {
    mount_city_delayed(server, city, aqi, std::time::Duration::ZERO).await;
}

pub async fn mount_city_delayed(
    server: &MockServer,
    city: &str,
    aqi: Option<i32>,
    delay: std::time::Duration,
) {
    let ok = |body: Value| ResponseTemplate::new(200).set_body_json(body).set_delay(delay);

    mount_current(server, city, ok(current_body(city))).await;
    mount_forecast(server, city, ok(forecast_body(city))).await;
    mount_aqi(server, city, ok(aqi_body(city, aqi))).await;
}

pub async fn mount_current(server: &MockServer, city: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", city))
        .and(query_param("lang", "ru"))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_forecast(server: &MockServer, city: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", city))
        .and(query_param("days", "3"))
        .and(query_param("lang", "ru"))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_aqi(server: &MockServer, city: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", city))
        .and(query_param("aqi", "yes"))
        .respond_with(response)
        .mount(server)
        .await;
}

pub fn ok_json(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}
