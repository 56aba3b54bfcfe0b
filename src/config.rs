//! Provider configuration injected into the app at startup

use std::time::Duration;

pub const DEFAULT_CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Everything the provider client needs: credential, endpoints and timeout.
#[derive(Clone, PartialEq, Eq)]
pub struct WeatherConfig {
    pub api_key: String,
    pub current_url: String,
    pub forecast_url: String,
    pub timeout: Duration,
}

impl WeatherConfig {
    /// Config pointing at the public OpenWeatherMap endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            current_url: DEFAULT_CURRENT_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Point both endpoints at a different base (e.g. a local mock server).
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.current_url = format!("{}/weather", base);
        self.forecast_url = format!("{}/forecast", base);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Keep the key out of logs and debug dumps.
impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &"<redacted>")
            .field("current_url", &self.current_url)
            .field("forecast_url", &self.forecast_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let config = WeatherConfig::new("key").with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.current_url, "http://127.0.0.1:9000/weather");
        assert_eq!(config.forecast_url, "http://127.0.0.1:9000/forecast");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = WeatherConfig::new("super-secret");
        let dump = format!("{:?}", config);
        assert!(!dump.contains("super-secret"));
        assert!(dump.contains("redacted"));
    }
}
