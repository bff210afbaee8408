use crate::error::{CheckError, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

pub const DEFAULT_WAVE_ENDPOINT: &str = "https://wave.webaim.org/api/request";
pub const WAVE_API_KEY_ENV: &str = "WAVE_API_KEY";
pub const WAVE_ENDPOINT_ENV: &str = "WAVE_API_ENDPOINT";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct WaveConfig {
    pub api_key: String,
    pub endpoint: String,
}

impl WaveConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_WAVE_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Loads `.env` (when present) and then the process environment. The key
    /// must be present and non-empty before any request is attempted.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var(WAVE_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(CheckError::MissingEnv(WAVE_API_KEY_ENV))?;

        let endpoint = env::var(WAVE_ENDPOINT_ENV)
            .ok()
            .filter(|endpoint| !endpoint.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WAVE_ENDPOINT.to_string());

        Ok(Self { api_key, endpoint })
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CategoryCount {
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaveCategories {
    #[serde(default)]
    pub error: CategoryCount,
    #[serde(default)]
    pub alert: CategoryCount,
    #[serde(default)]
    pub feature: CategoryCount,
    #[serde(default)]
    pub structure: CategoryCount,
    #[serde(default)]
    pub contrast: CategoryCount,
}

#[derive(Debug, Deserialize)]
struct WaveResponse {
    #[serde(default)]
    categories: WaveCategories,
}

pub struct WaveClient {
    http: reqwest::blocking::Client,
    config: WaveConfig,
}

impl WaveClient {
    pub fn new(config: WaveConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, config })
    }

    /// One GET against the scanning service; no retries.
    pub fn scan(&self, url: &str) -> Result<WaveCategories> {
        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("url", url),
                ("format", "json"),
            ])
            .send()?
            .error_for_status()?;

        let body: WaveResponse = serde_json::from_str(&response.text()?)?;
        Ok(body.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "status": { "success": true, "httpstatuscode": 200 },
        "statistics": { "pagetitle": "Exemplo", "waveurl": "https://wave.webaim.org/report?url=exemplo.com" },
        "categories": {
            "error": { "description": "Errors", "count": 7 },
            "contrast": { "description": "Contrast Errors", "count": 2 },
            "alert": { "description": "Alerts", "count": 11 },
            "feature": { "description": "Features", "count": 5 },
            "structure": { "description": "Structural Elements", "count": 31 }
        }
    }"#;

    #[test]
    fn parses_category_counts() {
        let response: WaveResponse = serde_json::from_str(SAMPLE).expect("sample parses");
        let categories = response.categories;
        assert_eq!(categories.error.count, 7);
        assert_eq!(categories.alert.count, 11);
        assert_eq!(categories.feature.count, 5);
        assert_eq!(categories.structure.count, 31);
        assert_eq!(categories.contrast.count, 2);
    }

    #[test]
    fn missing_categories_default_to_zero() {
        let response: WaveResponse =
            serde_json::from_str(r#"{"categories": {"error": {"count": 3}}}"#).expect("parses");
        assert_eq!(response.categories.error.count, 3);
        assert_eq!(response.categories.alert.count, 0);
        assert_eq!(response.categories.contrast.count, 0);
    }

    #[test]
    fn endpoint_defaults_to_wave_and_can_be_overridden() {
        let config = WaveConfig::new("test-key");
        assert_eq!(config.endpoint, DEFAULT_WAVE_ENDPOINT);

        let config = WaveConfig::new("test-key").with_endpoint("http://localhost:8080/api");
        assert_eq!(config.endpoint, "http://localhost:8080/api");
    }

    #[test]
    fn from_env_requires_a_non_empty_key() {
        let original = env::var(WAVE_API_KEY_ENV).ok();

        env::remove_var(WAVE_ENDPOINT_ENV);
        env::remove_var(WAVE_API_KEY_ENV);
        let err = WaveConfig::from_env().expect_err("missing key must fail");
        assert!(matches!(err, CheckError::MissingEnv(WAVE_API_KEY_ENV)));

        env::set_var(WAVE_API_KEY_ENV, "   ");
        let err = WaveConfig::from_env().expect_err("blank key must fail");
        assert!(matches!(err, CheckError::MissingEnv(WAVE_API_KEY_ENV)));

        env::set_var(WAVE_API_KEY_ENV, "test-key");
        let config = WaveConfig::from_env().expect("key present");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.endpoint, DEFAULT_WAVE_ENDPOINT);

        match original {
            Some(value) => env::set_var(WAVE_API_KEY_ENV, value),
            None => env::remove_var(WAVE_API_KEY_ENV),
        }
    }
}
