//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Configuration loaded once at startup
//! - City validation and geocoding
//! - Typed clients for current conditions and daily history
//! - The current / history views and the page controller that mounts them
//!
//! It is used by `cityweather-cli`, but holds no terminal code of its own.

pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod model;
pub mod provider;
pub mod validate;
pub mod view;

pub use config::{AppConfig, ConfigFile};
pub use controller::{MountedView, PageController, PageStatus};
pub use error::WeatherError;
pub use form::{FormAction, InputForm, PageInput};
pub use model::{
    CityLocation, CurrentWeather, DailyEntry, DailySeries, DateRange, SearchMode, TemperatureUnit,
};
pub use provider::{HttpProvider, WeatherProvider};
pub use validate::is_valid_city;
pub use view::{CurrentView, DayCard, FetchState, HistoryView};
