//! Client for the date-keyed weather feed embedded into new tasks.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct WeatherEntry {
    date: String,
    weather: String,
}

#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// Weather description for today (UTC).
    async fn today(&self) -> Result<String, AppError>;
}

/// Fetches a JSON array of `{date: "MM-DD", weather}` entries and picks the
/// one matching today's date. Upstream failures and gaps in the feed are
/// server errors, not client errors.
pub struct WeatherClient {
    http: reqwest::Client,
    url: String,
}

impl WeatherClient {
    pub fn new(url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl WeatherLookup for WeatherClient {
    async fn today(&self) -> Result<String, AppError> {
        let response = self.http.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::InternalServerError(format!(
                "weather upstream returned {}",
                response.status()
            )));
        }

        let entries: Vec<WeatherEntry> = response.json().await?;
        let today = Utc::now().format("%m-%d").to_string();
        pick_for_date(&entries, &today)
    }
}

fn pick_for_date(entries: &[WeatherEntry], date: &str) -> Result<String, AppError> {
    if entries.is_empty() {
        return Err(AppError::InternalServerError(
            "weather data is empty".to_string(),
        ));
    }
    entries
        .iter()
        .find(|entry| entry.date == date)
        .map(|entry| entry.weather.clone())
        .ok_or_else(|| AppError::InternalServerError(format!("no weather entry for {}", date)))
}
