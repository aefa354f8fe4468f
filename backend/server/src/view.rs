use serde::{Deserialize, Serialize};

use crate::{
    filter::{CountryChoice, Selection, country_choices, filter},
    map::MapView,
    models::{Dataset, Row},
};

/// Query string of the explorer page and the search API.
///
/// Browsers omit unchecked checkboxes, so `submitted` tells "map unchecked" apart
/// from "first visit" (where the map defaults to on).
#[derive(Deserialize, Debug, Default)]
pub struct SelectionParams {
    pub q: Option<String>,
    pub country: Option<String>,
    pub map: Option<String>,
    pub submitted: Option<String>,
}

impl SelectionParams {
    pub fn into_selection(self) -> Selection {
        let show_map = match (self.map.as_deref(), self.submitted.is_some()) {
            (Some("off" | "false" | "0"), _) => false,
            (Some(_), _) => true,
            (None, submitted) => !submitted,
        };

        Selection {
            country: CountryChoice::parse(self.country.as_deref().unwrap_or_default()),
            search: self.q.unwrap_or_default(),
            show_map,
        }
    }
}

/// One render pass: filtered rows plus the map, if it should be drawn.
pub struct Explorer<'a> {
    pub selection: Selection,
    pub countries: Vec<String>,
    pub total: usize,
    pub rows: Vec<&'a Row>,
    pub map: Option<MapView>,
}

impl<'a> Explorer<'a> {
    pub fn build(dataset: &'a Dataset, selection: Selection) -> Self {
        let rows = filter(dataset, &selection.country, &selection.search);
        let map = if selection.show_map {
            MapView::build(&rows)
        } else {
            None
        };

        Self {
            countries: country_choices(dataset),
            total: dataset.len(),
            selection,
            rows,
            map,
        }
    }
}

#[derive(Serialize)]
pub struct SearchResponse<'a> {
    pub count: usize,
    pub rows: &'a [&'a Row],
    pub map: Option<&'a MapView>,
}

impl<'a> From<&'a Explorer<'a>> for SearchResponse<'a> {
    fn from(explorer: &'a Explorer<'a>) -> Self {
        Self {
            count: explorer.rows.len(),
            rows: &explorer.rows,
            map: explorer.map.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_data::located;

    fn params(q: Option<&str>, country: Option<&str>, map: Option<&str>, submitted: bool) -> SelectionParams {
        SelectionParams {
            q: q.map(str::to_string),
            country: country.map(str::to_string),
            map: map.map(str::to_string),
            submitted: submitted.then(|| "1".to_string()),
        }
    }

    fn sample() -> Dataset {
        let mut springfield = located("Diner", 40.0, -90.0);
        springfield.address = "12 Main St, Springfield, United States".to_string();
        springfield.country = Some("United States".to_string());

        let mut paris = located("Le Bistro", 48.0, 2.0);
        paris.address = "4 Rue de Rivoli, Paris, France".to_string();
        paris.country = Some("France".to_string());

        Dataset::new(vec![springfield, paris])
    }

    #[test]
    fn test_first_visit_defaults() {
        let selection = SelectionParams::default().into_selection();
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn test_unchecked_map_after_submit() {
        assert!(!params(None, None, None, true).into_selection().show_map);
        assert!(params(None, None, Some("on"), true).into_selection().show_map);
        assert!(!params(None, None, Some("off"), false).into_selection().show_map);
    }

    #[test]
    fn test_params_to_selection() {
        let selection = params(Some("spring"), Some("France"), Some("on"), true).into_selection();

        assert_eq!(selection.search, "spring");
        assert_eq!(selection.country, CountryChoice::Country("France".to_string()));
    }

    #[test]
    fn test_explorer_with_map() {
        let dataset = sample();
        let explorer = Explorer::build(&dataset, Selection::default());

        assert_eq!(explorer.rows.len(), 2);
        assert_eq!(explorer.countries, vec!["All", "France", "United States"]);
        assert_eq!(explorer.map.as_ref().unwrap().center, [44.0, -44.0]);
    }

    #[test]
    fn test_explorer_map_hidden() {
        let dataset = sample();
        let selection = Selection {
            show_map: false,
            ..Selection::default()
        };

        let explorer = Explorer::build(&dataset, selection);

        assert_eq!(explorer.rows.len(), 2);
        assert!(explorer.map.is_none());
    }

    #[test]
    fn test_country_with_no_search_hits_has_no_map() {
        let dataset = sample();
        let selection = Selection {
            country: CountryChoice::parse("France"),
            search: "springfield".to_string(),
            show_map: true,
        };

        let explorer = Explorer::build(&dataset, selection);

        assert!(explorer.countries.iter().any(|country| country == "France"));
        assert!(explorer.rows.is_empty());
        assert!(explorer.map.is_none());
    }

    #[test]
    fn test_search_response_shape() {
        let dataset = sample();
        let explorer = Explorer::build(
            &dataset,
            Selection {
                country: CountryChoice::parse("United States"),
                ..Selection::default()
            },
        );

        let json = serde_json::to_value(SearchResponse::from(&explorer)).unwrap();

        assert_eq!(json["count"], 1);
        assert_eq!(json["rows"][0]["Name"], "Diner");
        assert_eq!(json["rows"][0]["Country"], "United States");
        assert_eq!(json["map"]["zoom"], 3);
    }
}
