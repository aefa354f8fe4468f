//! # Filter Engine
//!
//! Pure row selection over the loaded dataset. Two independent predicates,
//! combined with AND:
//! - country: exact, case-sensitive match on the extracted country unless the
//!   choice is `All`; rows without a country only survive under `All`
//! - search: case-insensitive substring match on `Name` OR `Address`, skipped
//!   when the text is empty
//!
//! The result borrows from the dataset and keeps its order. Every call scans
//! the full dataset; a country to row-index map would avoid that if datasets
//! ever grow large.
use crate::models::{Dataset, Row};

pub const ALL_COUNTRIES: &str = "All";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CountryChoice {
    #[default]
    All,
    Country(String),
}

impl CountryChoice {
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw == ALL_COUNTRIES {
            CountryChoice::All
        } else {
            CountryChoice::Country(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CountryChoice::All => ALL_COUNTRIES,
            CountryChoice::Country(country) => country,
        }
    }

    fn accepts(&self, row: &Row) -> bool {
        match self {
            CountryChoice::All => true,
            CountryChoice::Country(country) => row.country.as_deref() == Some(country.as_str()),
        }
    }
}

/// Everything one render pass needs from the controls. Rebuilt per request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub country: CountryChoice,
    pub search: String,
    pub show_map: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            country: CountryChoice::All,
            search: String::new(),
            show_map: true,
        }
    }
}

pub fn filter<'a>(dataset: &'a Dataset, country: &CountryChoice, search: &str) -> Vec<&'a Row> {
    let needle = search.to_lowercase();

    dataset
        .rows()
        .iter()
        .filter(|row| country.accepts(row))
        .filter(|row| needle.is_empty() || matches_text(row, &needle))
        .collect()
}

fn matches_text(row: &Row, needle: &str) -> bool {
    row.name.to_lowercase().contains(needle) || row.address.to_lowercase().contains(needle)
}

/// Dropdown entries: the `All` sentinel, then every distinct country in order.
pub fn country_choices(dataset: &Dataset) -> Vec<String> {
    std::iter::once(ALL_COUNTRIES)
        .chain(dataset.countries())
        .map(str::to_string)
        .collect()
}
