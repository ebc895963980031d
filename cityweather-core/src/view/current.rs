use tracing::warn;

use crate::{
    error::Result,
    model::{CityLocation, CurrentWeather, TemperatureUnit},
    provider::WeatherProvider,
    view::{FetchState, RequestToken, TokenCounter},
};

/// Current conditions for one resolved location.
#[derive(Debug, Clone)]
pub struct CurrentView {
    location: CityLocation,
    unit: TemperatureUnit,
    state: FetchState<CurrentWeather>,
    tokens: TokenCounter,
}

impl CurrentView {
    pub fn new(location: CityLocation) -> Self {
        Self {
            location,
            unit: TemperatureUnit::default(),
            state: FetchState::Idle,
            tokens: TokenCounter::default(),
        }
    }

    pub fn state(&self) -> &FetchState<CurrentWeather> {
        &self.state
    }

    /// Enter `Loading` and issue the token the result must carry.
    pub fn begin_load(&mut self) -> RequestToken {
        self.state = FetchState::Loading;
        self.tokens.issue()
    }

    /// Apply a fetch result. Returns `false` if `token` was superseded.
    pub fn finish_load(&mut self, token: RequestToken, result: Result<CurrentWeather>) -> bool {
        if !self.tokens.is_latest(token) {
            warn!(?token, "discarding stale current weather response");
            return false;
        }

        self.state = match result {
            Ok(weather) => FetchState::Loaded(weather),
            Err(e) => FetchState::Failed(e.message().to_string()),
        };
        true
    }

    pub async fn load(&mut self, provider: &dyn WeatherProvider) -> bool {
        let token = self.begin_load();
        let result = provider.current(&self.location).await;
        self.finish_load(token, result)
    }

    /// Switch display unit. Never fetches.
    pub fn toggle_unit(&mut self) {
        self.unit = self.unit.toggle();
    }

    pub fn render(&self) -> Vec<String> {
        match &self.state {
            FetchState::Idle => vec!["You have not entered a city.".to_string()],
            FetchState::Loading => vec!["Loading the data...".to_string()],
            FetchState::Failed(msg) => vec![format!("Error: {msg}")],
            FetchState::Loaded(weather) => vec![
                format!("{}, {}", weather.name, weather.country),
                self.unit.format(weather.temperature_c),
                weather.description.clone(),
            ],
        }
    }
}
