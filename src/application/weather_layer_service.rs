use std::sync::Arc;

use crate::adapters::outbound::{FileCitySource, WeatherApiProvider};
use crate::common::{ApplicationError, ApplicationResult, DomainError};
use crate::config::Config;
use crate::domains::weather::{run_pipeline, CitySource, LayerOutput, PipelineSettings, WeatherProvider};
use crate::domains::DynLogger;

/// Owns the collaborators of the weather layer and its latest output.
pub struct WeatherLayerService {
    source: Arc<dyn CitySource>,
    provider: Arc<dyn WeatherProvider>,
    settings: PipelineSettings,
    logger: DynLogger,
    current: Option<LayerOutput>,
}

impl WeatherLayerService {
    pub fn new(
        source: Arc<dyn CitySource>,
        provider: Arc<dyn WeatherProvider>,
        settings: PipelineSettings,
        logger: DynLogger,
    ) -> Self {
        Self { source, provider, settings, logger, current: None }
    }

    /// Wire the file source and the weatherapi.com provider from `config`.
    pub fn from_config(config: &Config, logger: DynLogger) -> ApplicationResult<Self> {
        config.validate()?;
        if config.provider.api_key.is_empty() {
            logger.warn("no weather API key configured; every lookup will come back N/A");
        }
        let source = FileCitySource::new(config.source.data_dir.clone(), config.source.file.clone());
        logger.info(&format!("reading cities from {}", source.path().display()));
        let provider = WeatherApiProvider::new(&config.provider)
            .map_err(|e| ApplicationError::Domain(DomainError::InfrastructureError(e.to_string())))?;
        Ok(Self::new(Arc::new(source), Arc::new(provider), config.pipeline_settings(), logger))
    }

    /// Run the whole pipeline and replace the previous output.
    /// On error the previous output is left in place.
    pub async fn refresh(&mut self) -> ApplicationResult<&LayerOutput> {
        let cities = self.source.load_cities()?;
        let output = run_pipeline(self.provider.as_ref(), cities, self.settings, &self.logger).await?;
        self.logger.info(&format!(
            "layer refreshed: {} points, {} clusters",
            output.points.len(),
            output.clusters.len()
        ));
        Ok(&*self.current.insert(output))
    }

    pub fn current(&self) -> Option<&LayerOutput> {
        self.current.as_ref()
    }
}
