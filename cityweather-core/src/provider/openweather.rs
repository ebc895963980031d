use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    config::AppConfig,
    error::{Result, WeatherError},
    model::{CityLocation, CurrentWeather},
    provider::truncate_body,
};

const GEOCODE_LIMIT: &str = "5";

/// Geocoding and current conditions from OpenWeather.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: Client,
    config: Arc<AppConfig>,
}

impl OpenWeatherClient {
    pub fn new(http: Client, config: Arc<AppConfig>) -> Self {
        Self { http, config }
    }

    /// First match for `name`. The name is sent as typed; callers validate it.
    pub async fn resolve_city(&self, name: &str) -> Result<CityLocation> {
        debug!(url = %self.config.location_url, city = name, "geocoding city");

        let res = self
            .http
            .get(&self.config.location_url)
            .query(&[
                ("q", name),
                ("limit", GEOCODE_LIMIT),
                ("appid", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "geocoding request failed");
                WeatherError::Transport(format!("Failed to reach the geocoding service: {e}"))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::Transport(format!("Failed to read geocoding response: {e}"))
        })?;

        if !status.is_success() {
            warn!(%status, body = %truncate_body(&body), "geocoding returned non-success");
            return Err(WeatherError::Transport(format!(
                "Geocoding request failed with status {status}"
            )));
        }

        let matches: Vec<serde_json::Value> = serde_json::from_str(&body).map_err(|e| {
            WeatherError::Parse(format!("Unexpected geocoding response: {e}"))
        })?;

        // Only the first match is used; later ones are never inspected.
        let first = matches
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::city_not_found(name))?;

        serde_json::from_value(first)
            .map_err(|e| WeatherError::Parse(format!("Unexpected geocoding match: {e}")))
    }

    pub async fn current(&self, location: &CityLocation) -> Result<CurrentWeather> {
        debug!(url = %self.config.api_url, lat = location.lat, lon = location.lon, "fetching current weather");

        let lat = location.lat.to_string();
        let lon = location.lon.to_string();
        let res = self
            .http
            .get(&self.config.api_url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("units", "metric"),
                ("appid", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "current weather request failed");
                fetch_failed()
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|_| fetch_failed())?;

        if !status.is_success() {
            warn!(%status, body = %truncate_body(&body), "current weather returned non-success");
            return Err(fetch_failed());
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| {
            WeatherError::Parse(format!("Unexpected current weather response: {e}"))
        })?;

        let description = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(CurrentWeather {
            name: parsed.name,
            country: parsed.sys.country.unwrap_or_default(),
            temperature_c: parsed.main.temp,
            description,
        })
    }
}

fn fetch_failed() -> WeatherError {
    WeatherError::Transport("Failed to fetch current weather, check internet connection".into())
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}
