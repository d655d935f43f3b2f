use super::cache::WeatherCache;
use super::digest::daily_digest;
use super::openweather::{OpenWeatherClient, UpstreamError};
use super::query::{Query, Target};
use super::types::AggregatedWeather;
use crate::utils::format_coordinate;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_FORECAST_DAYS: usize = 3;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Deterministic cache key for a query. City names are compared
/// case-insensitively, and `Query` has already collapsed their whitespace.
pub fn cache_key(query: &Query) -> String {
    match query.target() {
        Target::City(name) => format!("weather:city:{}:{}", name.to_lowercase(), query.units()),
        Target::Coordinates { lat, lon } => format!(
            "weather:coord:{}:{}:{}",
            format_coordinate(*lat),
            format_coordinate(*lon),
            query.units()
        ),
    }
}

/// Current conditions plus a daily forecast digest, memoized per query.
///
/// The cache is only read before the upstream calls and only written after
/// both succeed, so a failed or cancelled call leaves it untouched.
pub struct WeatherService {
    client: OpenWeatherClient,
    cache: WeatherCache,
    forecast_days: usize,
    ttl: Duration,
}

impl WeatherService {
    pub fn new(client: OpenWeatherClient, cache: WeatherCache) -> Self {
        Self {
            client,
            cache,
            forecast_days: DEFAULT_FORECAST_DAYS,
            ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn with_forecast_days(mut self, days: usize) -> Self {
        self.forecast_days = days;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn cache(&self) -> &WeatherCache {
        &self.cache
    }

    pub async fn get_weather(&self, query: &Query) -> Result<Arc<AggregatedWeather>, UpstreamError> {
        let key = cache_key(query);

        if let Some(entry) = self.cache.get(&key).await {
            tracing::debug!("Cache hit for {}", key);
            return Ok(entry.value);
        }
        tracing::debug!("Cache miss for {}, fetching upstream", key);

        let current = self.client.fetch_current(query).await?;
        let samples = self.client.fetch_forecast(query).await?;
        let forecast = daily_digest(samples, self.forecast_days);

        let weather = Arc::new(AggregatedWeather { current, forecast });
        self.cache.put(key.clone(), weather.clone(), self.ttl).await;
        tracing::info!(
            "Cached weather for {} ({} forecast days, ttl {}s)",
            key,
            weather.forecast.len(),
            self.ttl.as_secs()
        );

        Ok(weather)
    }
}
