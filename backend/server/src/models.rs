use std::collections::BTreeSet;

use serde::Serialize;

pub const COLUMN_NAME: &str = "Name";
pub const COLUMN_ADDRESS: &str = "Address";
pub const COLUMN_LATITUDE: &str = "Latitude";
pub const COLUMN_LONGITUDE: &str = "Longitude";

/// One address record from the source CSV.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Row {
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: Option<String>,
}

impl Row {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Deduplicated rows in load order. Never mutated after loading.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct extracted countries, sorted, rows without one skipped.
    pub fn countries(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|row| row.country.as_deref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
