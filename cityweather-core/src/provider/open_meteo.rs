use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    config::AppConfig,
    error::{Result, WeatherError},
    model::{CityLocation, DailyEntry, DailySeries, DateRange},
    provider::truncate_body,
};

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weather_code";

/// Daily history from the Open-Meteo archive.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    config: Arc<AppConfig>,
}

impl OpenMeteoClient {
    pub fn new(http: Client, config: Arc<AppConfig>) -> Self {
        Self { http, config }
    }

    /// Fetch the series for `range`. Transport and status failures share one
    /// message; the archive answers bad ranges with a non-success status.
    pub async fn daily(&self, location: &CityLocation, range: &DateRange) -> Result<DailySeries> {
        debug!(
            url = %self.config.time_url,
            start = %range.start_date,
            end = %range.end_date,
            "fetching daily history"
        );

        let lat = location.lat.to_string();
        let lon = location.lon.to_string();
        let res = self
            .http
            .get(&self.config.time_url)
            .query(&[
                ("latitude", lat.as_str()),
                ("longitude", lon.as_str()),
                ("start_date", range.start_date.as_str()),
                ("end_date", range.end_date.as_str()),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "history request failed");
                check_dates()
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|_| check_dates())?;

        if !status.is_success() {
            warn!(%status, body = %truncate_body(&body), "history returned non-success");
            return Err(check_dates());
        }

        let parsed: OmArchiveResponse = serde_json::from_str(&body).map_err(|e| {
            WeatherError::Parse(format!("Unexpected weather archive response: {e}"))
        })?;

        parsed.daily.map(OmDaily::into_series).unwrap_or_else(|| Ok(DailySeries::default()))
    }
}

fn check_dates() -> WeatherError {
    WeatherError::Transport("Check dates, no response from the weather archive".into())
}

#[derive(Debug, Deserialize)]
struct OmArchiveResponse {
    daily: Option<OmDaily>,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    weather_code: Vec<Option<i32>>,
}

impl OmDaily {
    fn into_series(self) -> Result<DailySeries> {
        let n = self.time.len();
        if self.temperature_2m_max.len() != n
            || self.temperature_2m_min.len() != n
            || self.weather_code.len() != n
        {
            return Err(WeatherError::Parse(format!(
                "Weather archive returned {n} days but {}/{}/{} values",
                self.temperature_2m_max.len(),
                self.temperature_2m_min.len(),
                self.weather_code.len(),
            )));
        }

        let days = self
            .time
            .into_iter()
            .zip(self.temperature_2m_max)
            .zip(self.temperature_2m_min)
            .zip(self.weather_code)
            .map(|(((date, max_c), min_c), weather_code)| DailyEntry {
                date,
                max_c,
                min_c,
                weather_code,
            })
            .collect();

        Ok(DailySeries { days })
    }
}
