use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod forecast;
mod routes;
mod utils;

use config::Config;
use forecast::{OpenWeatherClient, WeatherCache, WeatherService};
use routes::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_aggregator=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing credentials are fatal here, never per request
    let config = Config::from_env()?;

    let client = OpenWeatherClient::new(config.clone())?;
    let weather = WeatherService::new(client, WeatherCache::new())
        .with_forecast_days(config.forecast_days)
        .with_ttl(config.cache_ttl);

    let state = AppState {
        weather: Arc::new(weather),
    };

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server starting on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
