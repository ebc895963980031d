use thiserror::Error;

/// Failure kinds surfaced by the lookup pipeline.
///
/// Every variant carries the text shown inline to the user; none of them is
/// fatal, the caller keeps running and renders the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// Request could not be sent, or the provider answered with a non-success status.
    #[error("{0}")]
    Transport(String),

    /// Geocoder returned an empty list for the requested name.
    #[error("{0}")]
    NotFound(String),

    /// Response body did not match the endpoint schema.
    #[error("{0}")]
    Parse(String),

    /// Input refused before reaching the network.
    #[error("{0}")]
    Rejected(String),
}

impl WeatherError {
    pub fn city_not_found(city: &str) -> Self {
        WeatherError::NotFound(format!(
            "Unable to find city '{}', check the city name",
            city.trim()
        ))
    }

    /// Human-readable text for inline display.
    pub fn message(&self) -> &str {
        match self {
            WeatherError::Transport(msg)
            | WeatherError::NotFound(msg)
            | WeatherError::Parse(msg)
            | WeatherError::Rejected(msg) => msg,
        }
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_mentions_trimmed_city() {
        let err = WeatherError::city_not_found("  Atlantis ");
        assert_eq!(err.message(), "Unable to find city 'Atlantis', check the city name");
        assert_eq!(err.to_string(), err.message());
    }
}
