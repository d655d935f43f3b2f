//! Canned OpenWeatherMap payloads for tests.

use super::types::ForecastSample;
use chrono::{DateTime, Timelike};
use serde_json::{json, Value};

/// 2024-06-01T00:00:00Z
pub const JUNE_FIRST: i64 = 1_717_200_000;
pub const HOUR: i64 = 3600;
pub const DAY: i64 = 24 * HOUR;

pub fn current_body(name: &str, dt: i64) -> Value {
    json!({
        "coord": {"lon": 36.8172, "lat": -1.2864},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "main": {
            "temp": 22.4,
            "feels_like": 22.1,
            "pressure": 1019,
            "humidity": 57
        },
        "wind": {"speed": 4.6, "deg": 80},
        "clouds": {"all": 75},
        "dt": dt,
        "sys": {"country": "KE"},
        "timezone": 10800,
        "name": name,
        "cod": 200
    })
}

pub fn forecast_item(dt: i64) -> Value {
    let ts = DateTime::from_timestamp(dt, 0).unwrap_or_default();
    let hour = ts.hour() as f64;
    let temp = 18.0 + 6.0 * ((hour - 9.0) * std::f64::consts::PI / 12.0).sin();
    let rainy = ts.hour() % 12 == 0;
    let condition = if rainy {
        json!({"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"})
    } else {
        json!({"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"})
    };
    let clouds = if rainy { 80 } else { 10 };
    let pop = if rainy { 0.6 } else { 0.0 };
    let pod = if (6..18).contains(&ts.hour()) { "d" } else { "n" };

    json!({
        "dt": dt,
        "main": {
            "temp": temp,
            "feels_like": temp - 0.5,
            "temp_min": temp - 1.0,
            "temp_max": temp + 1.0,
            "pressure": 1016,
            "humidity": 65
        },
        "weather": [condition],
        "clouds": {"all": clouds},
        "wind": {"speed": 3.2, "deg": 120, "gust": 5.1},
        "visibility": 10000,
        "pop": pop,
        "sys": {"pod": pod},
        "dt_txt": ts.format("%Y-%m-%d %H:%M:%S").to_string()
    })
}

pub fn forecast_body(timestamps: &[i64]) -> Value {
    json!({
        "cod": "200",
        "message": 0,
        "cnt": timestamps.len(),
        "list": timestamps.iter().map(|dt| forecast_item(*dt)).collect::<Vec<_>>(),
        "city": {
            "id": 184745,
            "name": "Nairobi",
            "coord": {"lat": -1.2864, "lon": 36.8172},
            "country": "KE",
            "timezone": 10800
        }
    })
}

/// `count` timestamps spaced three hours apart, starting at `start`.
pub fn three_hourly(start: i64, count: usize) -> Vec<i64> {
    (0..count as i64).map(|i| start + i * 3 * HOUR).collect()
}

pub fn samples(timestamps: &[i64]) -> Vec<ForecastSample> {
    timestamps
        .iter()
        .map(|dt| serde_json::from_value(forecast_item(*dt)).unwrap())
        .collect()
}
