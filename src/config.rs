use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} not set")]
    MissingVar(&'static str),
    #[error("Invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub openweather_api_key: String,
    pub openweather_base_url: String,
    pub openweather_current_path: String,
    pub openweather_forecast_path: String,
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
    pub forecast_days: usize,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENWEATHER_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingVar("OPENWEATHER_API_KEY"))?;

        Ok(Config {
            openweather_api_key: api_key,
            openweather_base_url: env::var("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|_| "https://api.openweathermap.org".to_string()),
            openweather_current_path: env::var("OPENWEATHER_CURRENT_PATH")
                .unwrap_or_else(|_| "/data/2.5/weather".to_string()),
            openweather_forecast_path: env::var("OPENWEATHER_FORECAST_PATH")
                .unwrap_or_else(|_| "/data/2.5/forecast".to_string()),
            request_timeout: Duration::from_secs(parse_var("OPENWEATHER_TIMEOUT_SECS", 5)?),
            cache_ttl: Duration::from_secs(parse_var("WEATHER_CACHE_TTL_SECS", 30 * 60)?),
            forecast_days: parse_var("WEATHER_FORECAST_DAYS", 3)?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        })
    }

    /// Defaults for everything except the credential. Used when the upstream
    /// origin is supplied by the caller, e.g. a local mock server.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Config {
            openweather_api_key: api_key.into(),
            openweather_base_url: base_url.into(),
            openweather_current_path: "/data/2.5/weather".to_string(),
            openweather_forecast_path: "/data/2.5/forecast".to_string(),
            request_timeout: Duration::from_secs(5),
            cache_ttl: Duration::from_secs(30 * 60),
            forecast_days: 3,
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidVar { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global; keep every mutation inside one test.
    #[test]
    fn test_from_env() {
        env::remove_var("OPENWEATHER_API_KEY");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::MissingVar("OPENWEATHER_API_KEY"))
        ));

        env::set_var("OPENWEATHER_API_KEY", "   ");
        assert!(Config::from_env().is_err());

        env::set_var("OPENWEATHER_API_KEY", "secret");
        let config = Config::from_env().unwrap();
        assert_eq!(config.openweather_api_key, "secret");
        assert_eq!(config.cache_ttl, Duration::from_secs(1800));
        assert_eq!(config.forecast_days, 3);

        env::set_var("WEATHER_FORECAST_DAYS", "many");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidVar { name: "WEATHER_FORECAST_DAYS", .. })
        ));
        env::remove_var("WEATHER_FORECAST_DAYS");
        env::remove_var("OPENWEATHER_API_KEY");
    }

    #[test]
    fn test_with_base_url_defaults() {
        let config = Config::with_base_url("key", "http://127.0.0.1:9000");
        assert_eq!(config.openweather_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.openweather_forecast_path, "/data/2.5/forecast");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }
}
