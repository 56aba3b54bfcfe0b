//! OpenWeatherMap client

use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::WeatherConfig;
use crate::forecast;
use crate::state::{FetchFailure, WeatherReport, WeatherSnapshot};

// ============================================================================
// Response payloads
// ============================================================================

/// `GET /weather` response (only the fields we render)
#[derive(Clone, Debug, Deserialize)]
pub struct CurrentResponse {
    pub name: String,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Condition {
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

/// `GET /forecast` response: 5 days in 3-hour slots
#[derive(Clone, Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastItem>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ForecastItem {
    pub dt: i64,
    /// `"2024-05-01 12:00:00"`
    pub dt_txt: String,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

/// First condition of a `weather` array, or a placeholder when the provider sent none.
pub(crate) fn primary_condition(conditions: &[Condition]) -> (String, String) {
    conditions
        .first()
        .map(|c| (c.description.clone(), c.icon.clone()))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()))
}

impl From<CurrentResponse> for WeatherSnapshot {
    fn from(data: CurrentResponse) -> Self {
        let (description, icon) = primary_condition(&data.weather);
        WeatherSnapshot {
            city: data.name,
            temperature: forecast::round_temperature(data.main.temp),
            description,
            icon,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("city not found: {0}")]
    NotFound(String),
    #[error("provider returned HTTP {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl From<FetchError> for FetchFailure {
    fn from(error: FetchError) -> Self {
        match error {
            FetchError::NotFound(_) => FetchFailure::NotFound,
            other => FetchFailure::Failed(other.to_string()),
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// `{endpoint}?q={city}&appid={key}&units=metric`, with city and key percent-encoded.
pub fn request_url(endpoint: &str, city: &str, api_key: &str) -> String {
    format!(
        "{}?q={}&appid={}&units=metric",
        endpoint,
        urlencoding::encode(city),
        urlencoding::encode(api_key)
    )
}

#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: reqwest::Client,
    config: Arc<WeatherConfig>,
}

impl WeatherClient {
    pub fn new(config: WeatherConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Current conditions for `city`
    pub async fn fetch_current(&self, city: &str) -> Result<CurrentResponse, FetchError> {
        self.get_json(&self.config.current_url, city).await
    }

    /// Raw 5-day / 3-hour forecast for `city`
    pub async fn fetch_forecast(&self, city: &str) -> Result<ForecastResponse, FetchError> {
        self.get_json(&self.config.forecast_url, city).await
    }

    /// Both requests at once; fails as soon as either fails.
    pub async fn fetch_weather_and_forecast(&self, city: &str) -> Result<WeatherReport, FetchError> {
        let (current, forecast) =
            tokio::try_join!(self.fetch_current(city), self.fetch_forecast(city))?;

        Ok(WeatherReport {
            current: current.into(),
            forecast: forecast::daily_entries(&forecast),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<T, FetchError> {
        tracing::debug!(endpoint, city, "provider request");
        let url = request_url(endpoint, city, &self.config.api_key);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(city.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.json().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Decode(e)
            } else {
                FetchError::Request(e)
            }
        })
    }
}
