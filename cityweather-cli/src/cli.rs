use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cityweather_core::{
    AppConfig, FormAction, HttpProvider, PageController, PageInput, WeatherProvider,
};
use tracing::debug;

use crate::{configure, interactive};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current and historical weather by city name")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and endpoint URLs in the config file.
    Configure,

    /// Prompt for a city and dates, then search repeatedly (default).
    Interactive,

    /// Show current conditions for a city.
    Current {
        /// City name, letters and spaces only.
        city: String,

        /// Show temperatures in Fahrenheit.
        #[arg(long, short)]
        fahrenheit: bool,
    },

    /// Show daily max/min temperatures for a city over a date range.
    History {
        /// City name, letters and spaces only.
        city: String,

        /// First day, YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        start: Option<String>,

        /// Last day, YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Show temperatures in Fahrenheit.
        #[arg(long, short)]
        fahrenheit: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure::run(),
            None | Some(Command::Interactive) => {
                let provider = load_provider()?;
                interactive::run(&provider).await
            }
            Some(Command::Current { city, fahrenheit }) => {
                let provider = load_provider()?;
                let mut page = PageController::with_input(PageInput {
                    city,
                    ..PageInput::default()
                });
                search_once(&mut page, &provider, FormAction::SearchCurrent, fahrenheit).await;
                Ok(())
            }
            Some(Command::History {
                city,
                start,
                end,
                fahrenheit,
            }) => {
                let provider = load_provider()?;
                let mut page = PageController::with_input(PageInput {
                    city,
                    ..PageInput::default()
                });
                {
                    let mut form = page.form();
                    if let Some(start) = start {
                        form.set_start_date(start);
                    }
                    if let Some(end) = end {
                        form.set_end_date(end);
                    }
                }
                search_once(&mut page, &provider, FormAction::SearchHistory, fahrenheit).await;
                Ok(())
            }
        }
    }
}

fn load_provider() -> anyhow::Result<HttpProvider> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    debug!(
        api_url = %config.api_url,
        location_url = %config.location_url,
        time_url = %config.time_url,
        "configuration loaded"
    );
    Ok(HttpProvider::new(Arc::new(config)))
}

async fn search_once(
    page: &mut PageController,
    provider: &dyn WeatherProvider,
    action: FormAction,
    fahrenheit: bool,
) {
    if !page.form().is_enabled(action) {
        println!("{}", interactive::disabled_hint(page));
        return;
    }

    page.submit(provider, action).await;
    if fahrenheit {
        page.toggle_unit();
    }
    print_page(page);
}

pub fn print_page(page: &PageController) {
    for line in page.render() {
        println!("{line}");
    }
}
