use crate::{
    config::AppConfig,
    error::Result,
    model::{CityLocation, CurrentWeather, DailySeries, DateRange},
    provider::{open_meteo::OpenMeteoClient, openweather::OpenWeatherClient},
};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, sync::Arc};

pub mod open_meteo;
pub mod openweather;

/// Every network call the page makes. Views and the controller only talk to
/// this trait, so tests can substitute an in-memory provider.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a city name to the first geocoding match.
    async fn resolve_city(&self, name: &str) -> Result<CityLocation>;

    /// Current conditions at an already-resolved location.
    async fn current(&self, location: &CityLocation) -> Result<CurrentWeather>;

    /// Daily max/min temperature and weather code for every day in `range`.
    async fn history(&self, location: &CityLocation, range: &DateRange) -> Result<DailySeries>;
}

/// Provider backed by the configured HTTP endpoints.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    openweather: OpenWeatherClient,
    open_meteo: OpenMeteoClient,
}

impl HttpProvider {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let http = Client::new();
        Self {
            openweather: OpenWeatherClient::new(http.clone(), Arc::clone(&config)),
            open_meteo: OpenMeteoClient::new(http, config),
        }
    }
}

#[async_trait]
impl WeatherProvider for HttpProvider {
    async fn resolve_city(&self, name: &str) -> Result<CityLocation> {
        self.openweather.resolve_city(name).await
    }

    async fn current(&self, location: &CityLocation) -> Result<CurrentWeather> {
        self.openweather.current(location).await
    }

    async fn history(&self, location: &CityLocation, range: &DateRange) -> Result<DailySeries> {
        self.open_meteo.daily(location, range).await
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
