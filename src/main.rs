use std::error::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use weather_clusters::adapters::outbound::{init_combined_logger, init_tracing_logger};
use weather_clusters::application::WeatherLayerService;
use weather_clusters::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr, the layer GeoJSON to stdout.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting weather-clusters");

    let config = Config::load_or_default("config.toml").await?;
    info!("Buffer radius: {} km, merge strategy: {:?}", config.buffer.radius_km, config.merge.strategy);

    let logger = match &config.logging.file {
        Some(path) => init_combined_logger(path),
        None => init_tracing_logger(),
    };

    let mut service = WeatherLayerService::from_config(&config, logger)?;
    match service.refresh().await {
        Ok(output) => {
            info!("Layer ready: {} points, {} clusters", output.points.len(), output.clusters.len());
            println!("{}", output.to_feature_collection());
        }
        Err(e) => {
            error!("Failed to build weather layer: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
