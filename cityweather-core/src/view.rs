//! Weather views: per-instance fetch state, unit toggle and text rendering.
//!
//! A view never re-resolves a city; it is mounted with a resolved
//! [`CityLocation`](crate::model::CityLocation) and performs its own fetch.

pub mod current;
pub mod history;

pub use current::CurrentView;
pub use history::{DayCard, HistoryView};

/// Identifies one issued request. Only the latest token of a counter is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Monotonic request token source, one per view instance or controller.
#[derive(Debug, Clone, Default)]
pub struct TokenCounter {
    latest: u64,
}

impl TokenCounter {
    /// Issue a new token, superseding every earlier one.
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

/// Transient fetch state owned by a mounted view.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_token_supersedes_older() {
        let mut tokens = TokenCounter::default();
        let first = tokens.issue();
        assert!(tokens.is_latest(first));

        let second = tokens.issue();
        assert!(second > first);
        assert!(!tokens.is_latest(first));
        assert!(tokens.is_latest(second));
    }

    #[test]
    fn fetch_state_accessors() {
        let loaded: FetchState<u8> = FetchState::Loaded(7);
        assert_eq!(loaded.data(), Some(&7));
        assert!(loaded.error().is_none());

        let failed: FetchState<u8> = FetchState::Failed("boom".into());
        assert_eq!(failed.error(), Some("boom"));
        assert!(!failed.is_loading());
    }
}
