use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A geocoded place, as returned by the geocoding endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl CityLocation {
    pub fn label(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {}, {}", self.name, state, self.country),
            None => format!("{}, {}", self.name, self.country),
        }
    }
}

/// Inclusive day range for historical lookups, as `YYYY-MM-DD` strings.
///
/// Bounds are not checked against each other; the archive rejects bad ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

impl DateRange {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// Both bounds set to the local current date.
    pub fn today() -> Self {
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        Self::new(today.clone(), today)
    }

    pub fn is_complete(&self) -> bool {
        !self.start_date.trim().is_empty() && !self.end_date.trim().is_empty()
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::today()
    }
}

/// Current conditions for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub name: String,
    pub country: String,
    pub temperature_c: f64,
    pub description: String,
}

/// One day of the historical series.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyEntry {
    pub date: String,
    pub max_c: Option<f64>,
    pub min_c: Option<f64>,
    pub weather_code: Option<i32>,
}

/// Daily history, one entry per calendar day in request order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailySeries {
    pub days: Vec<DailyEntry>,
}

impl DailySeries {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }
}

/// Which weather view the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Current,
    History,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SearchMode::Current => "current",
            SearchMode::History => "history",
        })
    }
}

/// Display unit for temperatures. Values are always fetched in Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggle(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Rounded value in this unit for a Celsius reading.
    pub fn convert(self, celsius: f64) -> i64 {
        match self {
            TemperatureUnit::Celsius => round_half_up(celsius),
            TemperatureUnit::Fahrenheit => to_fahrenheit(celsius),
        }
    }

    pub fn format(self, celsius: f64) -> String {
        format!("{}{}", self.convert(celsius), self.symbol())
    }
}

/// `round(c * 1.8 + 32)`, halves rounded up.
pub fn to_fahrenheit(celsius: f64) -> i64 {
    round_half_up(celsius * 1.8 + 32.0)
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// `YYYY-MM-DD` to `DD/MM/YYYY`; unparseable input is returned as is.
pub fn format_day(date: &str) -> String {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Short description for a WMO weather code.
pub fn describe_weather_code(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 => "Snow",
        77 => "Snow grains",
        80..=82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}
