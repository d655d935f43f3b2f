use super::query::Query;
use super::types::*;
use crate::config::Config;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    fn fallback_message(&self) -> &'static str {
        match self {
            Endpoint::Current => "Failed to fetch weather data from OpenWeatherMap",
            Endpoint::Forecast => "Failed to fetch forecast data from OpenWeatherMap",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Current => f.write_str("current weather"),
            Endpoint::Forecast => f.write_str("forecast"),
        }
    }
}

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("{message}")]
    Api {
        endpoint: Endpoint,
        status: StatusCode,
        message: String,
    },
    #[error("Malformed {endpoint} response: {source}")]
    Malformed {
        endpoint: Endpoint,
        source: serde_json::Error,
    },
}

// The request URL carries `appid`, so it never travels with the error.
impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Request(err.without_url())
    }
}

/// Thin client for the OpenWeatherMap current and 3-hour forecast endpoints.
/// One network request per call; no retries, no caching.
pub struct OpenWeatherClient {
    client: Client,
    config: Config,
}

impl OpenWeatherClient {
    pub fn new(config: Config) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .user_agent(concat!("WeatherAggregator/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client, config })
    }

    pub async fn fetch_current(&self, query: &Query) -> Result<CurrentWeather, UpstreamError> {
        self.get_json(Endpoint::Current, &self.config.openweather_current_path, query)
            .await
    }

    pub async fn fetch_forecast(&self, query: &Query) -> Result<Vec<ForecastSample>, UpstreamError> {
        let forecast: ForecastResponse = self
            .get_json(Endpoint::Forecast, &self.config.openweather_forecast_path, query)
            .await?;
        Ok(forecast.list)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        path: &str,
        query: &Query,
    ) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.config.openweather_base_url, path);
        let mut params = query.upstream_params();
        params.push(("appid", self.config.openweather_api_key.clone()));

        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ProviderErrorBody>(&body)
                .ok()
                .and_then(|err| err.message)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| endpoint.fallback_message().to_string());

            tracing::warn!("OpenWeather {} request failed with HTTP {}: {}", endpoint, status, message);
            return Err(UpstreamError::Api {
                endpoint,
                status,
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|source| UpstreamError::Malformed { endpoint, source })
    }
}
