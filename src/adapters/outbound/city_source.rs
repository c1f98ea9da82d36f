use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::{DomainError, DomainResult};
use crate::domains::weather::buffer::validate_coordinate;
use crate::domains::weather::{City, CitySource};

pub const DATA_DIR_ENV: &str = "WEATHER_CLUSTERS_DATA_DIR";
pub const DEFAULT_CITY_FILE: &str = "city.json";

/// Resolve the data directory.
/// Precedence: WEATHER_CLUSTERS_DATA_DIR env var -> ./resources -> /usr/share/weather-clusters
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(v) = env::var(DATA_DIR_ENV) {
        return PathBuf::from(v);
    }
    let cwd_default = Path::new("resources");
    if cwd_default.exists() {
        return cwd_default.to_path_buf();
    }
    PathBuf::from("/usr/share/weather-clusters")
}

/// Reads `cities/<file>` below the data directory.
pub struct FileCitySource {
    base: PathBuf,
    file: String,
}

impl FileCitySource {
    pub fn new(base: Option<PathBuf>, file: Option<String>) -> Self {
        Self {
            base: base.unwrap_or_else(resolve_data_dir),
            file: file.unwrap_or_else(|| DEFAULT_CITY_FILE.to_string()),
        }
    }

    pub fn path(&self) -> PathBuf {
        let mut p = self.base.clone();
        p.push("cities");
        p.push(&self.file);
        p
    }
}

impl CitySource for FileCitySource {
    fn load_cities(&self) -> DomainResult<Vec<City>> {
        let path = self.path();
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DomainError::SourceNotFound { path: path.display().to_string() },
            _ => DomainError::InfrastructureError(format!("{}: {}", path.display(), e)),
        })?;
        parse_cities(&content)
    }
}

/// In-memory source.
pub struct StaticCitySource {
    cities: Vec<City>,
}

impl StaticCitySource {
    pub fn new(cities: Vec<City>) -> Self {
        Self { cities }
    }
}

impl CitySource for StaticCitySource {
    fn load_cities(&self) -> DomainResult<Vec<City>> {
        Ok(self.cities.clone())
    }
}

/// Coordinates in the city file come either as numbers or as numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn value(&self, city: &str, field: &str) -> DomainResult<f64> {
        match self {
            Degrees::Number(v) => Ok(*v),
            Degrees::Text(s) => s.trim().parse::<f64>().map_err(|_| DomainError::InvalidSource {
                reason: format!("{city}: {field} {s:?} is not a number"),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CityRecord {
    city: String,
    lat: Degrees,
    lng: Degrees,
    #[serde(default)]
    admin_name: Option<String>,
}

/// Parse a JSON array of city records, keeping file order.
pub fn parse_cities(content: &str) -> DomainResult<Vec<City>> {
    let records: Vec<CityRecord> = serde_json::from_str(content)?;
    records
        .into_iter()
        .map(|r| -> DomainResult<City> {
            let lat = r.lat.value(&r.city, "lat")?;
            let lng = r.lng.value(&r.city, "lng")?;
            let city = City {
                name: r.city,
                lat,
                lng,
                admin: r.admin_name.filter(|a| !a.trim().is_empty()),
            };
            validate_coordinate(city.location()).map_err(|e| DomainError::InvalidSource {
                reason: format!("{}: {}", city.name, e),
            })?;
            Ok(city)
        })
        .collect()
}
