use geo::MultiPolygon;

use crate::common::{DomainResult, GeometryError};
use crate::domains::logger::DynLogger;

use super::buffer::{geodesic_buffer, DEFAULT_RADIUS_KM, DEFAULT_SEGMENTS};
use super::merge::{merge_overlapping, MergeStrategy};
use super::output::LayerOutput;
use super::ports::WeatherProvider;
use super::types::{City, CurrentWeather, EnrichedCity};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineSettings {
    pub radius_m: f64,
    pub segments: usize,
    pub strategy: MergeStrategy,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_RADIUS_KM * 1_000.0,
            segments: DEFAULT_SEGMENTS,
            strategy: MergeStrategy::default(),
        }
    }
}

/// Fetch weather for each city one at a time, in input order.
///
/// A failed lookup never aborts the run: the city gets `N/A` readings and is
/// passed on like any other.
pub async fn enrich_all(
    provider: &dyn WeatherProvider,
    cities: Vec<City>,
    logger: &DynLogger,
) -> Vec<EnrichedCity> {
    let mut enriched = Vec::with_capacity(cities.len());
    for city in cities {
        let weather = match provider.current(&city).await {
            Ok(weather) => {
                logger.debug(&format!("{}: {}", city.name, weather));
                weather
            }
            Err(e) => {
                logger.warn(&format!("weather lookup failed for {}: {}", city.name, e));
                CurrentWeather::unavailable()
            }
        };
        enriched.push(EnrichedCity { city, weather });
    }
    enriched
}

/// One full run: enrich, buffer, merge, assemble.
///
/// Only an invalid radius is rejected. A city whose buffer cannot be built
/// keeps its point marker but joins no cluster.
pub async fn run_pipeline(
    provider: &dyn WeatherProvider,
    cities: Vec<City>,
    settings: PipelineSettings,
    logger: &DynLogger,
) -> DomainResult<LayerOutput> {
    if !settings.radius_m.is_finite() || settings.radius_m <= 0.0 {
        return Err(GeometryError::InvalidRadius(settings.radius_m).into());
    }

    let total = cities.len();
    let enriched = enrich_all(provider, cities, logger).await;
    let unavailable = enriched.iter().filter(|e| e.weather.is_unavailable()).count();
    logger.info(&format!("enriched {} cities ({} unavailable)", total, unavailable));

    let mut buffered = Vec::with_capacity(enriched.len());
    let mut shapes = Vec::with_capacity(enriched.len());
    for (index, record) in enriched.iter().enumerate() {
        match geodesic_buffer(record.city.location(), settings.radius_m, settings.segments) {
            Ok(polygon) => {
                buffered.push(index);
                shapes.push(MultiPolygon::from(polygon));
            }
            Err(e) => logger.warn(&format!("no buffer for {}: {}", record.city.name, e)),
        }
    }

    let (groups, stats) = merge_overlapping(shapes, settings.strategy);
    logger.info(&format!(
        "merged {} buffers into {} clusters ({} sweeps, {} pair tests)",
        buffered.len(),
        groups.len(),
        stats.sweeps,
        stats.pair_tests
    ));

    Ok(LayerOutput::assemble(enriched, &buffered, groups))
}
