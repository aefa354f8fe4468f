use serde::Serialize;

use crate::{html::escape, models::Row};

/// World/continent scale.
pub const INITIAL_ZOOM: u8 = 3;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub tooltip: String,
    pub popup: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

impl MapView {
    /// `None` when no row has coordinates, so the mean is never taken over nothing.
    pub fn build(rows: &[&Row]) -> Option<Self> {
        let markers: Vec<Marker> = rows
            .iter()
            .filter_map(|row| row.coordinates().map(|(lat, lon)| marker(row, lat, lon)))
            .collect();

        if markers.is_empty() {
            return None;
        }

        let count = markers.len() as f64;
        let lat = markers.iter().map(|marker| marker.lat).sum::<f64>() / count;
        let lon = markers.iter().map(|marker| marker.lon).sum::<f64>() / count;

        Some(Self {
            center: [lat, lon],
            zoom: INITIAL_ZOOM,
            markers,
        })
    }
}

fn marker(row: &Row, lat: f64, lon: f64) -> Marker {
    let name = escape(&row.name);

    Marker {
        lat,
        lon,
        popup: format!(
            "<div style='width: 250px; font-size: 14px;'><strong>{name}</strong><br>{}</div>",
            escape(&row.address)
        ),
        tooltip: name.into_owned(),
    }
}
