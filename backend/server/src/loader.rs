//! # Data Loader
//!
//! Fetches the address CSV once, parses it and drops exact duplicate records.
//!
//! ## Source
//! - `http://` / `https://`: fetched with the shared `reqwest` client, redirects
//!   followed so hosted-file share links resolve to the raw file
//! - `file://` or a bare path: read from disk
//!
//! ## Parsing
//! - First line is the header, must name `Name`, `Address`, `Latitude`, `Longitude`
//! - Column order is free, extra columns are allowed
//! - Duplicates are judged on the parsed record, extra columns included, so
//!   `41.9` and `41.90` are the same coordinate
//! - Empty coordinates mean "not on the map", garbage coordinates are an error
use std::{collections::HashSet, hash::Hash, path::PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use reqwest::Client;
use tracing::info;

use crate::{
    country::CountryExtractor,
    error::LoadError,
    models::{COLUMN_ADDRESS, COLUMN_LATITUDE, COLUMN_LONGITUDE, COLUMN_NAME, Dataset, Row},
};

#[derive(Clone, Debug, PartialEq)]
pub enum CsvSource {
    Remote(String),
    Local(PathBuf),
}

impl CsvSource {
}

/// Dedup key of one record: coordinates by value, every other column by its trimmed text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordKey {
    text: Vec<String>,
    latitude: Option<u64>,
    longitude: Option<u64>,
}

impl RecordKey {
    pub fn new(row: &Row, extras: &[String]) -> Self {
        let mut text = Vec::with_capacity(extras.len() + 2);
        text.push(row.name.clone());
        text.push(row.address.clone());
        text.extend_from_slice(extras);

        Self {
            text,
            latitude: row.latitude.map(coordinate_bits),
            longitude: row.longitude.map(coordinate_bits),
        }
    }
}

// `-0.0 == 0.0`, so both map to the same bits.
fn coordinate_bits(value: f64) -> u64 {
    if value == 0.0 { 0.0f64.to_bits() } else { value.to_bits() }
}

pub fn parse(bytes: &[u8], extractor: &dyn CountryExtractor) -> Result<Dataset, LoadError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(bytes);
    let columns = Columns::locate(reader.headers()?)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |position| position.line());
        let row = to_row(&record, line, &columns, extractor)?;
        let key = RecordKey::new(&row, &columns.extras(&record));
        records.push((row, key));
    }

    let total = records.len();
    let records = dedupe_by(records, |(_, key)| key.clone());
    if records.len() < total {
        info!("Dropped {} duplicate rows", total - records.len());
    }

    Ok(Dataset::new(records.into_iter().map(|(row, _)| row).collect()))
}

fn to_row(
    record: &StringRecord,
    line: u64,
    columns: &Columns,
    extractor: &dyn CountryExtractor,
) -> Result<Row, LoadError> {
    let address = field(record, columns.address).to_string();
    let country = extractor.extract(&address);

    Ok(Row {
        name: field(record, columns.name).to_string(),
        latitude: coordinate(field(record, columns.latitude), COLUMN_LATITUDE, line)?,
        longitude: coordinate(field(record, columns.longitude), COLUMN_LONGITUDE, line)?,
        address,
        country,
    })
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or_default()
}

fn coordinate(raw: &str, column: &'static str, line: u64) -> Result<Option<f64>, LoadError> {
    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(Some)
        .ok_or_else(|| LoadError::InvalidCoordinate {
            line,
            column,
            value: raw.to_string(),
        })
}

/// Keeps the first occurrence of every key, preserving order.
pub fn dedupe_by<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::with_capacity(items.len());

    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}
