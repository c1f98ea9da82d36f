use weather_clusters::domains::weather::MergeStrategy;
use weather_clusters::Config;

#[test]
fn test_defaults_use_five_km_buffers() {
    let config = Config::default();
    assert_eq!(config.buffer.radius_km, 5.0);
    assert_eq!(config.merge.strategy, MergeStrategy::UnionFind);
    assert_eq!(config.pipeline_settings().radius_m, 5_000.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = Config::from_toml(
        r#"
[buffer]
radius_km = 2.5

[merge]
strategy = "sweep"
"#,
    )
    .unwrap();
    assert_eq!(config.buffer.radius_km, 2.5);
    assert_eq!(config.buffer.segments, 64);
    assert_eq!(config.merge.strategy, MergeStrategy::Sweep);
    assert_eq!(config.provider.base_url, "https://api.weatherapi.com/v1");
    assert_eq!(config.provider.timeout_secs, 10);
}

#[test]
fn test_invalid_values_are_rejected() {
    assert!(Config::from_toml("[buffer]\nradius_km = 0.0\n").is_err());
    assert!(Config::from_toml("[provider]\ntimeout_secs = 0\n").is_err());
    assert!(Config::from_toml("[merge]\nstrategy = \"quadtree\"\n").is_err());
}

#[tokio::test]
async fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    tokio::fs::write(&path, "[source]\nfile = \"towns.json\"\n").await.unwrap();

    let config = Config::from_file(&path).await.unwrap();
    assert_eq!(config.source.file.as_deref(), Some("towns.json"));

    let missing = Config::load_or_default(dir.path().join("absent.toml")).await.unwrap();
    assert_eq!(missing.buffer.radius_km, 5.0);
}
