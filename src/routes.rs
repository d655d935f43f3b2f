use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::forecast::{
    types::AggregatedWeather, Query as WeatherQuery, Units, UpstreamError, ValidationError,
    WeatherService,
};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<WeatherService>,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Upstream(e) = &self {
            tracing::warn!("Weather aggregation failed: {}", e);
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

// Request/Response types
#[derive(Debug, Deserialize)]
pub struct CityParams {
    pub city: Option<String>,
    pub units: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoordinateParams {
    pub lat: f64,
    pub lon: f64,
    pub units: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    pub cache_entries: u64,
}

fn parse_units(units: Option<&str>) -> Result<Units, ValidationError> {
    units.map_or(Ok(Units::default()), str::parse)
}

// Route handlers
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache_entries: state.weather.cache().entry_count(),
    })
}

pub async fn weather_by_city(
    State(state): State<AppState>,
    params: Result<Query<CityParams>, QueryRejection>,
) -> Result<Json<Arc<AggregatedWeather>>, ApiError> {
    let Query(params) = params?;
    let units = parse_units(params.units.as_deref())?;
    let query = WeatherQuery::city(params.city.as_deref().unwrap_or_default(), units)?;

    let weather = state.weather.get_weather(&query).await?;
    Ok(Json(weather))
}

pub async fn weather_by_coordinates(
    State(state): State<AppState>,
    params: Result<Query<CoordinateParams>, QueryRejection>,
) -> Result<Json<Arc<AggregatedWeather>>, ApiError> {
    let Query(params) = params?;
    let units = parse_units(params.units.as_deref())?;
    let query = WeatherQuery::coordinates(params.lat, params.lon, units)?;

    let weather = state.weather.get_weather(&query).await?;
    Ok(Json(weather))
}

// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/weather/city", get(weather_by_city))
        .route("/weather/coordinates", get(weather_by_coordinates))
        .with_state(state)
}
