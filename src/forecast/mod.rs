pub mod cache;
pub mod digest;
pub mod openweather;
pub mod query;
pub mod service;
pub mod types;

#[cfg(test)]
pub mod mock;

pub use cache::WeatherCache;
pub use openweather::{OpenWeatherClient, UpstreamError};
pub use query::{Query, Units, ValidationError};
pub use service::WeatherService;
