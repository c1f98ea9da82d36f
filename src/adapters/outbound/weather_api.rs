use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::common::FetchError;
use crate::config::ProviderConfig;
use crate::domains::weather::{City, CurrentWeather, WeatherProvider};

/// weatherapi.com `current.json` client.
pub struct WeatherApiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Transport(format!("http client init failed: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/current.json", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current(&self, city: &City) -> Result<CurrentWeather, FetchError> {
        let query = format!("{},{}", city.lat, city.lng);
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("key", self.api_key.as_str()), ("q", query.as_str()), ("aqi", "no")])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(format!("invalid body: {e}")))?;
        parse_current(&body)
    }
}

/// Extract `current.temp_c` and `current.condition.text`. Either may be
/// missing on its own; a payload without a `current` object is malformed.
pub fn parse_current(body: &str) -> Result<CurrentWeather, FetchError> {
    let payload: Value = serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;
    let current = payload
        .get("current")
        .filter(|c| c.is_object())
        .ok_or_else(|| FetchError::Malformed("missing `current` object".to_string()))?;

    Ok(CurrentWeather {
        temp_c: current.get("temp_c").and_then(Value::as_f64),
        condition: current
            .pointer("/condition/text")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_payload() {
        let body = r#"{"location":{"name":"Pune"},"current":{"temp_c":29.1,"condition":{"text":"Mist","code":1030}}}"#;
        assert_eq!(parse_current(body).unwrap(), CurrentWeather::new(29.1, "Mist"));
    }

    #[test]
    fn missing_fields_fall_back_individually() {
        let w = parse_current(r#"{"current":{"temp_c":18}}"#).unwrap();
        assert_eq!(w.temp_c, Some(18.0));
        assert_eq!(w.condition, None);
    }

    #[test]
    fn error_payloads_are_malformed() {
        let body = r#"{"error":{"code":1006,"message":"No matching location found."}}"#;
        assert!(matches!(parse_current(body), Err(FetchError::Malformed(_))));
        assert!(matches!(parse_current("<html>"), Err(FetchError::Malformed(_))));
    }
}
