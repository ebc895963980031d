use std::fmt;

use cityweather_core::{FormAction, PageController, WeatherProvider};
use inquire::{InquireError, Select, Text};

use crate::cli::print_page;

#[derive(Debug, Clone, PartialEq, Eq)]
enum MenuItem {
    Search(FormAction, String),
    ToggleUnit,
    EditCity,
    EditDates,
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::Search(_, label) => f.write_str(label),
            MenuItem::ToggleUnit => f.write_str("Change unit"),
            MenuItem::EditCity => f.write_str("Edit city"),
            MenuItem::EditDates => f.write_str("Edit dates"),
            MenuItem::Quit => f.write_str("Quit"),
        }
    }
}

/// Why neither search is offered for the current input.
pub fn disabled_hint(page: &mut PageController) -> String {
    let form = page.form();
    if !form.can_search_current() {
        format!(
            "'{}' is not a valid city name: use letters and spaces only.",
            form.city().trim()
        )
    } else {
        "Both start and end dates are needed for historical weather.".to_string()
    }
}

fn menu(page: &mut PageController) -> Vec<MenuItem> {
    let mut items = Vec::new();
    let form = page.form();
    if form.can_search_current() {
        items.push(MenuItem::Search(
            FormAction::SearchCurrent,
            "Fetch current weather".to_string(),
        ));
    }
    if form.can_search_history() {
        items.push(MenuItem::Search(FormAction::SearchHistory, form.history_label()));
    }
    if page.view().is_some() {
        items.push(MenuItem::ToggleUnit);
    }
    items.extend([MenuItem::EditCity, MenuItem::EditDates, MenuItem::Quit]);
    items
}

/// `None` when the user cancelled the prompt.
fn answered<T>(result: Result<T, InquireError>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn edit_city(page: &mut PageController) -> anyhow::Result<bool> {
    let current = page.input().city.clone();
    let Some(city) = answered(
        Text::new("City name:")
            .with_placeholder("e.g. Pune")
            .with_initial_value(&current)
            .prompt(),
    )?
    else {
        return Ok(false);
    };
    page.form().set_city(city);
    Ok(true)
}

fn edit_dates(page: &mut PageController) -> anyhow::Result<bool> {
    let range = page.input().range.clone();
    let Some(start) = answered(
        Text::new("Start date:")
            .with_help_message("YYYY-MM-DD")
            .with_initial_value(&range.start_date)
            .prompt(),
    )?
    else {
        return Ok(false);
    };
    let Some(end) = answered(
        Text::new("End date:")
            .with_help_message("YYYY-MM-DD")
            .with_initial_value(&range.end_date)
            .prompt(),
    )?
    else {
        return Ok(false);
    };

    let mut form = page.form();
    form.set_start_date(start);
    form.set_end_date(end);
    Ok(true)
}

pub async fn run(provider: &dyn WeatherProvider) -> anyhow::Result<()> {
    let mut page = PageController::new();
    if !edit_city(&mut page)? || !edit_dates(&mut page)? {
        return Ok(());
    }

    loop {
        let items = menu(&mut page);
        if !items.iter().any(|item| matches!(item, MenuItem::Search(..))) {
            println!("{}", disabled_hint(&mut page));
        }

        let Some(choice) = answered(Select::new("What next?", items).prompt())? else {
            return Ok(());
        };

        match choice {
            MenuItem::Search(action, _) => {
                page.submit(provider, action).await;
                print_page(&page);
            }
            MenuItem::ToggleUnit => {
                page.toggle_unit();
                print_page(&page);
            }
            MenuItem::EditCity => {
                if !edit_city(&mut page)? {
                    return Ok(());
                }
            }
            MenuItem::EditDates => {
                if !edit_dates(&mut page)? {
                    return Ok(());
                }
            }
            MenuItem::Quit => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityweather_core::{DateRange, PageInput};

    fn page(city: &str, start: &str, end: &str) -> PageController {
        PageController::with_input(PageInput {
            city: city.into(),
            range: DateRange::new(start, end),
        })
    }

    #[test]
    fn menu_offers_only_enabled_searches() {
        let items = menu(&mut page("Pune", "2024-01-01", "2024-01-02"));
        assert_eq!(
            items[..2],
            [
                MenuItem::Search(FormAction::SearchCurrent, "Fetch current weather".into()),
                MenuItem::Search(
                    FormAction::SearchHistory,
                    "Get weather from 2024-01-01 to 2024-01-02".into()
                ),
            ]
        );
        assert!(!items.contains(&MenuItem::ToggleUnit));

        let items = menu(&mut page("Pune", "", "2024-01-02"));
        assert_eq!(items.iter().filter(|i| matches!(i, MenuItem::Search(..))).count(), 1);

        let items = menu(&mut page("Pune 42", "2024-01-01", "2024-01-02"));
        assert!(!items.iter().any(|i| matches!(i, MenuItem::Search(..))));
    }

    #[test]
    fn hint_explains_what_is_missing() {
        assert!(disabled_hint(&mut page("42", "", "")).contains("not a valid city"));
        assert!(disabled_hint(&mut page("Pune", "", "")).contains("dates"));
    }
}
