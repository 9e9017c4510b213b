//! OpenWeatherMap forecast lookup.

use async_trait::async_trait;
use serde::Deserialize;

use super::SuggestError;

/// Default OpenWeatherMap API base.
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Something that can describe the weather at a location.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Short description of the first forecast period, e.g. "light rain".
    ///
    /// `Ok(None)` means the lookup worked but had nothing to say.
    async fn forecast_summary(&self, location: &str) -> Result<Option<String>, SuggestError>;
}

/// Client for `GET {base}/forecast?q=&appid=&units=metric`.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_WEATHER_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn forecast_summary(&self, location: &str) -> Result<Option<String>, SuggestError> {
        if self.api_key.is_empty() {
            return Err(SuggestError::NotConfigured("weather.api_key"));
        }

        let response = self
            .http
            .get(self.forecast_url())
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SuggestError::Status(response.status().as_u16()));
        }

        let forecast: ForecastResponse = response.json().await?;
        Ok(forecast.first_description())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastPeriod>,
}

#[derive(Debug, Default, Deserialize)]
struct ForecastPeriod {
    #[serde(default)]
    weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    #[serde(default)]
    description: String,
}

impl ForecastResponse {
    fn first_description(&self) -> Option<String> {
        self.list
            .first()
            .and_then(|period| period.weather.first())
            .map(|w| w.description.trim().to_string())
            .filter(|d| !d.is_empty())
    }
}
