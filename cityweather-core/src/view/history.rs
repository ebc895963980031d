use tracing::warn;

use crate::{
    error::Result,
    model::{
        CityLocation, DailyEntry, DailySeries, DateRange, TemperatureUnit, describe_weather_code,
        format_day,
    },
    provider::WeatherProvider,
    view::{FetchState, RequestToken, TokenCounter},
};

/// One rendered day of history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCard {
    /// `DD/MM/YYYY`
    pub date: String,
    pub max: String,
    pub min: String,
    pub condition: String,
}

impl DayCard {
    fn from_entry(entry: &DailyEntry, unit: TemperatureUnit) -> Self {
        let temp = |value: Option<f64>| match value {
            Some(c) => unit.format(c),
            None => "--".to_string(),
        };

        Self {
            date: format_day(&entry.date),
            max: temp(entry.max_c),
            min: temp(entry.min_c),
            condition: entry
                .weather_code
                .map(describe_weather_code)
                .unwrap_or("Unknown")
                .to_string(),
        }
    }
}

/// Daily history for a resolved location over a date range.
#[derive(Debug, Clone)]
pub struct HistoryView {
    location: CityLocation,
    range: DateRange,
    unit: TemperatureUnit,
    state: FetchState<DailySeries>,
    tokens: TokenCounter,
}

impl HistoryView {
    pub fn new(location: CityLocation, range: DateRange) -> Self {
        Self {
            location,
            range,
            unit: TemperatureUnit::default(),
            state: FetchState::Idle,
            tokens: TokenCounter::default(),
        }
    }

    pub fn state(&self) -> &FetchState<DailySeries> {
        &self.state
    }

    /// Enter `Loading`, or `None` while either date is missing.
    pub fn begin_load(&mut self) -> Option<RequestToken> {
        if !self.range.is_complete() {
            return None;
        }
        self.state = FetchState::Loading;
        Some(self.tokens.issue())
    }

    /// Apply a fetch result. Returns `false` if `token` was superseded.
    pub fn finish_load(&mut self, token: RequestToken, result: Result<DailySeries>) -> bool {
        if !self.tokens.is_latest(token) {
            warn!(?token, "discarding stale history response");
            return false;
        }

        self.state = match result {
            Ok(series) => FetchState::Loaded(series),
            Err(e) => FetchState::Failed(e.message().to_string()),
        };
        true
    }

    pub async fn load(&mut self, provider: &dyn WeatherProvider) -> bool {
        let Some(token) = self.begin_load() else {
            return false;
        };
        let result = provider.history(&self.location, &self.range).await;
        self.finish_load(token, result)
    }

    pub fn toggle_unit(&mut self) {
        self.unit = self.unit.toggle();
    }

    /// One card per day, in the order returned.
    pub fn cards(&self) -> Vec<DayCard> {
        self.state
            .data()
            .map(|series| {
                series
                    .days
                    .iter()
                    .map(|day| DayCard::from_entry(day, self.unit))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Empty while idle or when the archive returned no days.
    pub fn render(&self) -> Vec<String> {
        match &self.state {
            FetchState::Idle => Vec::new(),
            FetchState::Loading => vec!["Loading historical data...".to_string()],
            FetchState::Failed(msg) => vec![format!("Error: {msg}")],
            FetchState::Loaded(series) if series.is_empty() => Vec::new(),
            FetchState::Loaded(_) => {
                let mut lines = vec![format!(
                    "{} from {} to {}",
                    self.location.label(),
                    self.range.start_date,
                    self.range.end_date
                )];
                lines.extend(self.cards().into_iter().map(|card| {
                    format!(
                        "{}  Max: {}  Min: {}  {}",
                        card.date, card.max, card.min, card.condition
                    )
                }));
                lines
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeatherError;

    fn pune() -> CityLocation {
        CityLocation {
            name: "Pune".into(),
            lat: 18.52,
            lon: 73.85,
            country: "IN".into(),
            state: None,
        }
    }

    fn three_days() -> DailySeries {
        let day = |date: &str, max, min, code| DailyEntry {
            date: date.into(),
            max_c: Some(max),
            min_c: Some(min),
            weather_code: Some(code),
        };
        DailySeries {
            days: vec![
                day("2024-01-01", 20.0, 10.0, 0),
                day("2024-01-02", 22.4, 11.6, 3),
                day("2024-01-03", -40.0, -41.0, 71),
            ],
        }
    }

    fn loaded() -> HistoryView {
        let mut view = HistoryView::new(pune(), DateRange::new("2024-01-01", "2024-01-03"));
        let token = view.begin_load().expect("dates are set");
        view.finish_load(token, Ok(three_days()));
        view
    }

    #[test]
    fn one_card_per_day_with_formatted_dates() {
        let cards = loaded().cards();

        assert_eq!(cards.len(), 3);
        let dates: Vec<_> = cards.iter().map(|c| c.date.as_str()).collect();
        assert_eq!(dates, ["01/01/2024", "02/01/2024", "03/01/2024"]);
        assert_eq!(cards[1].max, "22°C");
        assert_eq!(cards[1].min, "12°C");
        assert_eq!(cards[2].condition, "Snow");
    }

    #[test]
    fn fahrenheit_converts_max_and_min() {
        let mut view = loaded();
        view.toggle_unit();
        let cards = view.cards();

        assert_eq!(cards[0].max, "68°F");
        assert_eq!(cards[0].min, "50°F");
        assert_eq!(cards[2].max, "-40°F");

        view.toggle_unit();
        assert_eq!(view.cards()[0].max, "20°C");
    }

    #[test]
    fn render_has_header_and_three_cards() {
        let lines = loaded().render();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("01/01/2024"));
        assert!(lines[1].contains("Clear sky"));
    }

    #[test]
    fn missing_temperature_renders_placeholder() {
        let mut view = HistoryView::new(pune(), DateRange::new("2024-01-01", "2024-01-01"));
        let token = view.begin_load().expect("dates are set");
        view.finish_load(
            token,
            Ok(DailySeries {
                days: vec![DailyEntry {
                    date: "2024-01-01".into(),
                    max_c: None,
                    min_c: Some(3.0),
                    weather_code: None,
                }],
            }),
        );

        let card = &view.cards()[0];
        assert_eq!(card.max, "--");
        assert_eq!(card.condition, "Unknown");
    }

    #[test]
    fn incomplete_range_never_loads() {
        let mut view = HistoryView::new(pune(), DateRange::new("2024-01-01", ""));
        assert!(view.begin_load().is_none());
        assert_eq!(view.state(), &FetchState::Idle);
        assert!(view.render().is_empty());
    }

    #[test]
    fn empty_series_renders_nothing_and_error_renders_message() {
        let mut view = HistoryView::new(pune(), DateRange::new("2024-01-01", "2024-01-02"));
        let token = view.begin_load().expect("dates are set");
        view.finish_load(token, Ok(DailySeries::default()));
        assert!(view.render().is_empty());

        let token = view.begin_load().expect("dates are set");
        view.finish_load(token, Err(WeatherError::Transport("Check dates".into())));
        assert_eq!(view.render(), vec!["Error: Check dates"]);
        assert!(view.cards().is_empty());
    }
}
