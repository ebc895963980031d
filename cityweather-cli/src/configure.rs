use anyhow::Context;
use cityweather_core::{
    ConfigFile,
    config::{DEFAULT_API_URL, DEFAULT_LOCATION_URL, DEFAULT_TIME_URL},
};
use inquire::{Password, PasswordDisplayMode, Text};

/// Prompt for every setting, pre-filled from the existing file, and save it.
pub fn run() -> anyhow::Result<()> {
    let existing = ConfigFile::load()?;

    let mut key_prompt = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked);
    if existing.api_key.is_some() {
        key_prompt = key_prompt.with_help_message("Leave empty to keep the stored key");
    }
    let api_key = key_prompt.prompt().context("Failed to read API key")?;
    let api_key = if api_key.trim().is_empty() {
        existing.api_key.clone()
    } else {
        Some(api_key.trim().to_string())
    };

    let api_url = prompt_url("Current weather URL:", existing.api_url.as_deref(), DEFAULT_API_URL)?;
    let location_url = prompt_url(
        "Geocoding URL:",
        existing.location_url.as_deref(),
        DEFAULT_LOCATION_URL,
    )?;
    let time_url = prompt_url("Daily history URL:", existing.time_url.as_deref(), DEFAULT_TIME_URL)?;

    let file = ConfigFile {
        api_key,
        api_url: Some(api_url),
        location_url: Some(location_url),
        time_url: Some(time_url),
    };
    let path = file.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

fn prompt_url(message: &str, stored: Option<&str>, default: &str) -> anyhow::Result<String> {
    Text::new(message)
        .with_default(stored.unwrap_or(default))
        .prompt()
        .with_context(|| format!("Failed to read '{message}'"))
}
