//! Page controller: owns the form input, the search status and the mounted view.

use tracing::{debug, info, warn};

use crate::{
    error::Result,
    form::{FormAction, InputForm, PageInput},
    model::{CityLocation, SearchMode},
    provider::WeatherProvider,
    validate::is_blank,
    view::{CurrentView, HistoryView, RequestToken, TokenCounter},
};

/// Search status. `Ready` is the only state that carries a location.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PageStatus {
    #[default]
    Idle,
    Locating {
        mode: SearchMode,
    },
    Ready {
        mode: SearchMode,
        location: CityLocation,
    },
    Error {
        message: String,
    },
}

/// The weather view currently shown below the form.
#[derive(Debug, Clone)]
pub enum MountedView {
    Current(CurrentView),
    History(HistoryView),
}

impl MountedView {
    pub fn mode(&self) -> SearchMode {
        match self {
            MountedView::Current(_) => SearchMode::Current,
            MountedView::History(_) => SearchMode::History,
        }
    }

    pub async fn load(&mut self, provider: &dyn WeatherProvider) -> bool {
        match self {
            MountedView::Current(view) => view.load(provider).await,
            MountedView::History(view) => view.load(provider).await,
        }
    }

    pub fn toggle_unit(&mut self) {
        match self {
            MountedView::Current(view) => view.toggle_unit(),
            MountedView::History(view) => view.toggle_unit(),
        }
    }

    pub fn render(&self) -> Vec<String> {
        match self {
            MountedView::Current(view) => view.render(),
            MountedView::History(view) => view.render(),
        }
    }
}

#[derive(Debug, Default)]
pub struct PageController {
    input: PageInput,
    status: PageStatus,
    view: Option<MountedView>,
    tokens: TokenCounter,
}

impl PageController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: PageInput) -> Self {
        Self {
            input,
            ..Self::default()
        }
    }

    pub fn input(&self) -> &PageInput {
        &self.input
    }

    pub fn form(&mut self) -> InputForm<'_> {
        InputForm::new(&mut self.input)
    }

    pub fn status(&self) -> &PageStatus {
        &self.status
    }

    pub fn view(&self) -> Option<&MountedView> {
        self.view.as_ref()
    }

    /// Resolved coordinates of the last successful search, if any.
    pub fn location(&self) -> Option<&CityLocation> {
        match &self.status {
            PageStatus::Ready { location, .. } => Some(location),
            _ => None,
        }
    }

    /// Start a search. A blank city is a no-op and returns `None`.
    pub fn begin_search(&mut self, mode: SearchMode) -> Option<RequestToken> {
        if is_blank(&self.input.city) {
            debug!("ignoring search with blank city");
            return None;
        }

        self.status = PageStatus::Locating { mode };
        self.view = None;
        Some(self.tokens.issue())
    }

    /// Apply a geocoding result. Returns `false` if `token` was superseded.
    ///
    /// Success mounts a fresh view for the requested mode; failure clears the
    /// location and keeps only the message.
    pub fn finish_search(&mut self, token: RequestToken, result: Result<CityLocation>) -> bool {
        let PageStatus::Locating { mode } = self.status else {
            return false;
        };
        if !self.tokens.is_latest(token) {
            warn!(?token, "discarding stale geocoding response");
            return false;
        }

        match result {
            Ok(location) => {
                info!(city = %location.name, lat = location.lat, lon = location.lon, %mode, "city located");
                self.view = Some(match mode {
                    SearchMode::Current => MountedView::Current(CurrentView::new(location.clone())),
                    SearchMode::History => MountedView::History(HistoryView::new(
                        location.clone(),
                        self.input.range.clone(),
                    )),
                });
                self.status = PageStatus::Ready { mode, location };
            }
            Err(e) => {
                self.view = None;
                self.status = PageStatus::Error {
                    message: e.message().to_string(),
                };
            }
        }
        true
    }

    /// Locate the city, mount the view for `mode`, then load it.
    ///
    /// Returns `false` when the search was a no-op.
    pub async fn search(&mut self, provider: &dyn WeatherProvider, mode: SearchMode) -> bool {
        let Some(token) = self.begin_search(mode) else {
            return false;
        };

        let result = provider.resolve_city(self.input.city.trim()).await;
        if self.finish_search(token, result) {
            if let Some(view) = self.view.as_mut() {
                view.load(provider).await;
            }
        }
        true
    }

    /// Run a form action if the form has it enabled.
    pub async fn submit(&mut self, provider: &dyn WeatherProvider, action: FormAction) -> bool {
        match self.form().submit(action) {
            Some(action) => self.search(provider, action.mode()).await,
            None => false,
        }
    }

    pub fn toggle_unit(&mut self) {
        if let Some(view) = self.view.as_mut() {
            view.toggle_unit();
        }
    }

    pub fn status_line(&self) -> Option<String> {
        match &self.status {
            PageStatus::Locating { .. } => Some("Locating city...".to_string()),
            PageStatus::Error { message } => Some(message.clone()),
            PageStatus::Idle | PageStatus::Ready { .. } => None,
        }
    }

    /// Status line followed by the mounted view.
    pub fn render(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.status_line().into_iter().collect();
        if let Some(view) = &self.view {
            lines.extend(view.render());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::WeatherError,
        model::{CurrentWeather, DailyEntry, DailySeries, DateRange},
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct FakeProvider {
        known: Option<CityLocation>,
        geocode_calls: AtomicUsize,
        current_calls: AtomicUsize,
        history_calls: AtomicUsize,
    }

    impl FakeProvider {
        fn knowing(location: CityLocation) -> Self {
            Self {
                known: Some(location),
                ..Self::default()
            }
        }

        fn total_calls(&self) -> usize {
            self.geocode_calls.load(Ordering::SeqCst)
                + self.current_calls.load(Ordering::SeqCst)
                + self.history_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn resolve_city(&self, name: &str) -> Result<CityLocation> {
            self.geocode_calls.fetch_add(1, Ordering::SeqCst);
            self.known.clone().ok_or_else(|| WeatherError::city_not_found(name))
        }

        async fn current(&self, location: &CityLocation) -> Result<CurrentWeather> {
            self.current_calls.fetch_add(1, Ordering::SeqCst);
            Ok(CurrentWeather {
                name: location.name.clone(),
                country: location.country.clone(),
                temperature_c: 20.0,
                description: "clear sky".into(),
            })
        }

        async fn history(&self, _: &CityLocation, range: &DateRange) -> Result<DailySeries> {
            self.history_calls.fetch_add(1, Ordering::SeqCst);
            Ok(DailySeries {
                days: [range.start_date.clone(), range.end_date.clone()]
                    .into_iter()
                    .map(|date| DailyEntry {
                        date,
                        max_c: Some(10.0),
                        min_c: Some(0.0),
                        weather_code: Some(0),
                    })
                    .collect(),
            })
        }
    }

    fn pune() -> CityLocation {
        CityLocation {
            name: "Pune".into(),
            lat: 18.52,
            lon: 73.85,
            country: "IN".into(),
            state: None,
        }
    }

    fn controller(city: &str) -> PageController {
        PageController::with_input(PageInput {
            city: city.into(),
            range: DateRange::new("2024-01-01", "2024-01-02"),
        })
    }

    #[tokio::test]
    async fn blank_city_is_a_no_op() {
        let provider = FakeProvider::knowing(pune());

        for city in ["", "   "] {
            let mut page = controller(city);
            assert!(!page.search(&provider, SearchMode::History).await);
            assert_eq!(page.status(), &PageStatus::Idle);
            assert!(page.location().is_none());
            assert!(page.view().is_none());
        }
        assert_eq!(provider.total_calls(), 0);
    }

    #[tokio::test]
    async fn current_search_mounts_and_loads_current_view() {
        let provider = FakeProvider::knowing(pune());
        let mut page = controller("Pune");

        assert!(page.search(&provider, SearchMode::Current).await);

        assert_eq!(
            page.status(),
            &PageStatus::Ready {
                mode: SearchMode::Current,
                location: pune()
            }
        );
        assert_eq!(page.view().map(MountedView::mode), Some(SearchMode::Current));
        assert_eq!(page.render(), vec!["Pune, IN", "20°C", "clear sky"]);
        assert_eq!(provider.geocode_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.current_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn toggling_unit_does_not_refetch() {
        let provider = FakeProvider::knowing(pune());
        let mut page = controller("Pune");
        page.search(&provider, SearchMode::Current).await;
        let calls = provider.total_calls();

        page.toggle_unit();
        assert_eq!(page.render()[1], "68°F");
        page.toggle_unit();
        assert_eq!(page.render()[1], "20°C");

        assert_eq!(provider.total_calls(), calls);
    }

    #[tokio::test]
    async fn history_search_mounts_history_view() {
        let provider = FakeProvider::knowing(pune());
        let mut page = controller("Pune");

        page.search(&provider, SearchMode::History).await;

        let Some(MountedView::History(view)) = page.view() else {
            panic!("expected history view");
        };
        assert_eq!(view.cards().len(), 2);
        assert_eq!(provider.history_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.current_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_search_replaces_previous_location() {
        let mut page = controller("Pune");
        page.search(&FakeProvider::knowing(pune()), SearchMode::Current).await;
        assert!(page.location().is_some());

        page.form().set_city("Atlantis");
        page.search(&FakeProvider::default(), SearchMode::Current).await;

        assert!(page.location().is_none());
        assert!(page.view().is_none());
        assert_eq!(
            page.status_line().as_deref(),
            Some("Unable to find city 'Atlantis', check the city name")
        );
    }

    #[test]
    fn stale_geocoding_result_is_ignored() {
        let mut page = controller("Pune");
        let stale = page.begin_search(SearchMode::Current).expect("city set");
        let fresh = page.begin_search(SearchMode::History).expect("city set");
        assert_eq!(page.status_line().as_deref(), Some("Locating city..."));

        assert!(!page.finish_search(stale, Ok(pune())));
        assert_eq!(page.status(), &PageStatus::Locating { mode: SearchMode::History });

        assert!(page.finish_search(fresh, Ok(pune())));
        assert_eq!(page.view().map(MountedView::mode), Some(SearchMode::History));

        // A late duplicate of the applied token is dropped too.
        assert!(!page.finish_search(fresh, Err(WeatherError::Transport("late".into()))));
    }

    #[tokio::test]
    async fn disabled_form_action_issues_no_request() {
        let provider = FakeProvider::knowing(pune());
        let mut page = controller("Pune 2");

        assert!(!page.submit(&provider, FormAction::SearchCurrent).await);
        assert_eq!(provider.total_calls(), 0);

        page.form().set_city("Pune");
        assert!(page.submit(&provider, FormAction::SearchCurrent).await);
        assert_eq!(provider.total_calls(), 2);
    }
}
