use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder rendered wherever a live reading is missing.
pub const UNAVAILABLE: &str = "N/A";

/// Display unit for the numeric reading.
pub const TEMPERATURE_UNIT: &str = "°C";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<String>,
}

impl City {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self { name: name.into(), lat, lng, admin: None }
    }

    pub fn with_admin(mut self, admin: impl Into<String>) -> Self {
        self.admin = Some(admin.into());
        self
    }

    /// Location as a geo point (x = longitude, y = latitude).
    pub fn location(&self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }

    /// `"<name>"` or `"<name>, <admin>"`.
    pub fn label(&self) -> String {
        match self.admin.as_deref().filter(|a| !a.is_empty()) {
            Some(admin) => format!("{}, {}", self.name, admin),
            None => self.name.clone(),
        }
    }
}

/// Live attributes for one city. Each field falls back to `N/A` on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temp_c: Option<f64>,
    pub condition: Option<String>,
}

impl CurrentWeather {
    pub fn new(temp_c: f64, condition: impl Into<String>) -> Self {
        Self { temp_c: Some(temp_c), condition: Some(condition.into()) }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_unavailable(&self) -> bool {
        self.temp_c.is_none() && self.condition.is_none()
    }

    pub fn value_label(&self) -> String {
        match self.temp_c {
            Some(t) => t.to_string(),
            None => UNAVAILABLE.to_string(),
        }
    }

    pub fn category_label(&self) -> &str {
        self.condition.as_deref().unwrap_or(UNAVAILABLE)
    }
}

impl fmt::Display for CurrentWeather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, {}", self.value_label(), TEMPERATURE_UNIT, self.category_label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCity {
    pub city: City,
    pub weather: CurrentWeather,
}

impl EnrichedCity {
    /// One summary line: `"<name>[, <admin>]: <value> °C, <category>"`.
    pub fn summary_line(&self) -> String {
        format!("{}: {}", self.city.label(), self.weather)
    }
}
