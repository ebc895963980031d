use crate::{
    model::{DateRange, SearchMode},
    validate::is_valid_city,
};

/// What the user has typed so far. Owned by the page controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInput {
    pub city: String,
    pub range: DateRange,
}

/// The two submit buttons of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    SearchCurrent,
    SearchHistory,
}

impl FormAction {
    pub fn mode(self) -> SearchMode {
        match self {
            FormAction::SearchCurrent => SearchMode::Current,
            FormAction::SearchHistory => SearchMode::History,
        }
    }
}

/// Controlled view over the controller's [`PageInput`]. It edits the input
/// and decides which actions are enabled; it never performs I/O.
#[derive(Debug)]
pub struct InputForm<'a> {
    input: &'a mut PageInput,
}

impl<'a> InputForm<'a> {
    pub fn new(input: &'a mut PageInput) -> Self {
        Self { input }
    }

    pub fn city(&self) -> &str {
        &self.input.city
    }

    pub fn range(&self) -> &DateRange {
        &self.input.range
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.input.city = city.into();
    }

    pub fn set_start_date(&mut self, date: impl Into<String>) {
        self.input.range.start_date = date.into();
    }

    pub fn set_end_date(&mut self, date: impl Into<String>) {
        self.input.range.end_date = date.into();
    }

    pub fn can_search_current(&self) -> bool {
        is_valid_city(&self.input.city)
    }

    pub fn can_search_history(&self) -> bool {
        is_valid_city(&self.input.city) && self.input.range.is_complete()
    }

    pub fn is_enabled(&self, action: FormAction) -> bool {
        match action {
            FormAction::SearchCurrent => self.can_search_current(),
            FormAction::SearchHistory => self.can_search_history(),
        }
    }

    /// `Some(action)` when the button is enabled, `None` otherwise.
    pub fn submit(&self, action: FormAction) -> Option<FormAction> {
        self.is_enabled(action).then_some(action)
    }

    pub fn history_label(&self) -> String {
        format!(
            "Get weather from {} to {}",
            self.input.range.start_date, self.input.range.end_date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(city: &str, start: &str, end: &str) -> PageInput {
        PageInput {
            city: city.into(),
            range: DateRange::new(start, end),
        }
    }

    #[test]
    fn current_requires_valid_city() {
        let mut page = input("Pune1", "2024-01-01", "2024-01-02");
        let mut form = InputForm::new(&mut page);
        assert_eq!(form.submit(FormAction::SearchCurrent), None);

        form.set_city("Pune");
        assert_eq!(form.submit(FormAction::SearchCurrent), Some(FormAction::SearchCurrent));
    }

    #[test]
    fn history_requires_city_and_both_dates() {
        let mut page = input("Pune", "2024-01-01", "");
        let mut form = InputForm::new(&mut page);
        assert!(!form.can_search_history());
        assert!(form.can_search_current());

        form.set_end_date("2024-01-03");
        assert_eq!(form.submit(FormAction::SearchHistory), Some(FormAction::SearchHistory));
        assert_eq!(form.history_label(), "Get weather from 2024-01-01 to 2024-01-03");

        form.set_city("   ");
        assert_eq!(form.submit(FormAction::SearchHistory), None);
    }

    #[test]
    fn setters_write_through_to_page_input() {
        let mut page = PageInput::default();
        {
            let mut form = InputForm::new(&mut page);
            form.set_city("Oslo");
            form.set_start_date("2024-02-01");
        }
        assert_eq!(page.city, "Oslo");
        assert_eq!(page.range.start_date, "2024-02-01");
    }

    #[test]
    fn actions_map_to_modes() {
        assert_eq!(FormAction::SearchCurrent.mode(), SearchMode::Current);
        assert_eq!(FormAction::SearchHistory.mode(), SearchMode::History);
    }
}
