use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use weather_clusters::adapters::outbound::{init_noop_logger, MultiLogger};
use weather_clusters::domains::logger::DomainLogger;
use weather_clusters::domains::weather::{run_pipeline, City, CurrentWeather, PipelineSettings, WeatherProvider};
use weather_clusters::FetchError;

struct BridgeCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl BridgeCapture {
    fn new() -> Self { Self { messages: Arc::new(Mutex::new(Vec::new())) } }
}

impl DomainLogger for BridgeCapture {
    fn info(&self, msg: &str) { self.messages.lock().unwrap().push(format!("INFO:{}", msg)); }
    fn warn(&self, msg: &str) { self.messages.lock().unwrap().push(format!("WARN:{}", msg)); }
    fn error(&self, msg: &str) { self.messages.lock().unwrap().push(format!("ERR:{}", msg)); }
}

struct Unreachable;

#[async_trait]
impl WeatherProvider for Unreachable {
    async fn current(&self, _city: &City) -> Result<CurrentWeather, FetchError> {
        Err(FetchError::Transport("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_failed_lookups_are_logged_as_warnings() {
    let capture = Arc::new(BridgeCapture::new());
    let bridge = capture.clone() as Arc<dyn DomainLogger>;

    let cities = vec![City::new("Agra", 27.18, 78.02), City::new("Kanpur", 26.45, 80.33)];
    let out = run_pipeline(&Unreachable, cities, PipelineSettings::default(), &bridge).await.unwrap();
    assert_eq!(out.points.len(), 2);

    let msgs = capture.messages.lock().unwrap();
    assert!(msgs.iter().any(|m| m.starts_with("WARN:") && m.contains("Agra") && m.contains("connection refused")));
    assert!(msgs.iter().any(|m| m.starts_with("WARN:") && m.contains("Kanpur")));
    assert!(msgs.iter().any(|m| m.contains("INFO:enriched 2 cities (2 unavailable)")));
    assert!(msgs.iter().any(|m| m.contains("into 2 clusters")));
}

#[test]
fn test_multi_logger_forwards_to_both() {
    let first = Arc::new(BridgeCapture::new());
    let second = Arc::new(BridgeCapture::new());
    let multi = MultiLogger::new(first.clone(), Some(second.clone()));

    multi.info("one");
    multi.warn("two");
    multi.error("three");
    multi.debug("dropped by default");

    for capture in [&first, &second] {
        let msgs = capture.messages.lock().unwrap();
        assert_eq!(*msgs, vec!["INFO:one", "WARN:two", "ERR:three"]);
    }
}

#[tokio::test]
async fn test_silent_logger_accepts_every_level_during_a_run() {
    let silent = init_noop_logger();
    silent.info("ignored");
    silent.warn("ignored-warn");
    silent.error("ignored-err");
    silent.debug("ignored-debug");

    let cities = vec![City::new("Agra", 27.18, 78.02)];
    let out = run_pipeline(&Unreachable, cities, PipelineSettings::default(), &silent).await.unwrap();
    assert_eq!(out.clusters.len(), 1);
    assert!(out.points[0].record.weather.is_unavailable());
}
