use geo::{MultiPolygon, Point};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

use super::merge::Group;
use super::types::{EnrichedCity, TEMPERATURE_UNIT};

pub const CLUSTER_TITLE: &str = "Affected Area";

/// Marker for one enriched city.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMarker {
    pub location: Point<f64>,
    pub record: EnrichedCity,
}

impl PointMarker {
    pub fn title(&self) -> &str {
        &self.record.city.name
    }

    pub fn content(&self) -> String {
        format!(
            "{} {}, {}",
            self.record.weather.value_label(),
            TEMPERATURE_UNIT,
            self.record.weather.category_label()
        )
    }
}

/// Filled region for one final cluster with its members in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterShape {
    pub shape: MultiPolygon<f64>,
    pub members: Vec<EnrichedCity>,
}

impl ClusterShape {
    pub fn summary(&self) -> String {
        summarize(&self.members)
    }
}

/// One line per member, newline separated.
pub fn summarize(members: &[EnrichedCity]) -> String {
    members
        .iter()
        .map(EnrichedCity::summary_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Everything handed to the presentation layer after one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerOutput {
    pub points: Vec<PointMarker>,
    pub clusters: Vec<ClusterShape>,
}

impl LayerOutput {
    /// `groups` index into `buffered`, which maps each buffered entity back to
    /// its position in `enriched`. Every group member must be a valid index
    /// into `buffered`, and every `buffered` entry into `enriched`.
    pub(crate) fn assemble(enriched: Vec<EnrichedCity>, buffered: &[usize], groups: Vec<Group>) -> Self {
        let clusters = groups
            .into_iter()
            .map(|group| ClusterShape {
                members: group
                    .members
                    .iter()
                    .map(|&m| enriched[buffered[m]].clone())
                    .collect(),
                shape: group.shape,
            })
            .collect();

        let points = enriched
            .into_iter()
            .map(|record| PointMarker { location: record.city.location(), record })
            .collect();

        Self { points, clusters }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.clusters.is_empty()
    }

    pub fn to_feature_collection(&self) -> FeatureCollection {
        let points = self.points.iter().map(|p| {
            let mut properties = record_properties(&p.record);
            properties.insert("kind".to_string(), json!("city"));
            properties.insert("title".to_string(), json!(p.title()));
            properties.insert("content".to_string(), json!(p.content()));
            feature(Value::from(&p.location), properties)
        });

        let clusters = self.clusters.iter().map(|c| {
            let mut properties = JsonObject::new();
            properties.insert("kind".to_string(), json!("cluster"));
            properties.insert("title".to_string(), json!(CLUSTER_TITLE));
            properties.insert(
                "members".to_string(),
                c.members.iter().map(|m| serde_json::Value::Object(record_properties(m))).collect(),
            );
            properties.insert("summary".to_string(), json!(c.summary()));
            feature(Value::from(&c.shape), properties)
        });

        FeatureCollection {
            bbox: None,
            features: points.chain(clusters).collect(),
            foreign_members: None,
        }
    }
}

fn feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn record_properties(record: &EnrichedCity) -> JsonObject {
    let mut properties = JsonObject::new();
    properties.insert("city".to_string(), json!(record.city.name));
    if let Some(admin) = &record.city.admin {
        properties.insert("admin_name".to_string(), json!(admin));
    }
    properties.insert("lat".to_string(), json!(record.city.lat));
    properties.insert("lng".to_string(), json!(record.city.lng));
    properties.insert(
        "temp".to_string(),
        match record.weather.temp_c {
            Some(t) => json!(t),
            None => json!(record.weather.value_label()),
        },
    );
    properties.insert("condition".to_string(), json!(record.weather.category_label()));
    properties
}
