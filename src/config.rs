use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::domains::weather::{MergeStrategy, PipelineSettings, DEFAULT_RADIUS_KM, DEFAULT_SEGMENTS};

pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub buffer: BufferConfig,
    pub merge: MergeConfig,
    pub source: SourceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    pub radius_km: f64,
    pub segments: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub strategy: MergeStrategy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Falls back to the data dir resolution of the file source when unset.
    pub data_dir: Option<PathBuf>,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.weatherapi.com/v1".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self { radius_km: DEFAULT_RADIUS_KM, segments: DEFAULT_SEGMENTS }
    }
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load `path` when it exists, otherwise defaults (with env overrides).
    pub async fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::from_file(path).await;
        }
        let mut config = Config::default();
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = env::var(API_KEY_ENV) {
            if !key.is_empty() {
                self.provider.api_key = key;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.buffer.radius_km.is_finite() || self.buffer.radius_km <= 0.0 {
            bail!("buffer.radius_km must be positive, got {}", self.buffer.radius_km);
        }
        if self.provider.timeout_secs == 0 {
            bail!("provider.timeout_secs must be at least 1");
        }
        Ok(())
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            radius_m: self.buffer.radius_km * 1_000.0,
            segments: self.buffer.segments,
            strategy: self.merge.strategy,
        }
    }
}
