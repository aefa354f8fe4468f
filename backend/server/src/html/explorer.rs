use super::{MAP_ASSETS, escape, page};
use crate::{map::MapView, view::Explorer};

const NO_RESULTS: &str = "No matching results.";
const MAP_HIDDEN: &str = "Map is hidden. Check the 'Show Map' option in the sidebar to display it.";
const MAP_EMPTY: &str = "Nothing to place on the map for the current filters.";

/// Debounced so typing does not reload the page on every keystroke.
const CONTROLS_SCRIPT: &str = r#"
<script>
  (() => {
    const form = document.getElementById('filters');
    let timer = null;
    form.querySelectorAll('select, input[type="checkbox"]').forEach((el) => {
      el.addEventListener('change', () => form.requestSubmit());
    });
    form.querySelector('input[name="q"]').addEventListener('input', () => {
      clearTimeout(timer);
      timer = setTimeout(() => form.requestSubmit(), 400);
    });
  })();
</script>
"#;

const MAP_SCRIPT: &str = r#"
<script>
  (() => {
    const view = JSON.parse(document.getElementById('map-view').textContent);
    const map = L.map('map').setView(view.center, view.zoom);
    L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
      maxZoom: 19,
      attribution: '&copy; OpenStreetMap contributors',
    }).addTo(map);

    const cluster = L.markerClusterGroup();
    for (const marker of view.markers) {
      L.marker([marker.lat, marker.lon])
        .bindTooltip(marker.tooltip)
        .bindPopup(marker.popup)
        .addTo(cluster);
    }
    map.addLayer(cluster);
  })();
</script>
"#;

pub fn explorer_page(explorer: &Explorer<'_>) -> Result<String, serde_json::Error> {
    let mut body = String::with_capacity(8 * 1024);

    body.push_str(r#"<div class="layout">"#);
    sidebar(&mut body, explorer);

    body.push_str("\n<main>\n  <h1>📍 Address Explorer &amp; Map</h1>\n");
    results(&mut body, explorer);

    let head = match (&explorer.map, explorer.selection.show_map) {
        (Some(map), _) => {
            map_section(&mut body, map)?;
            MAP_ASSETS
        }
        (None, false) => {
            notice(&mut body, "info", MAP_HIDDEN);
            ""
        }
        (None, true) => {
            notice(&mut body, "info", MAP_EMPTY);
            ""
        }
    };

    body.push_str("</main>\n</div>\n");
    body.push_str(CONTROLS_SCRIPT);

    Ok(page(head, &body))
}

fn sidebar(body: &mut String, explorer: &Explorer<'_>) {
    let selection = &explorer.selection;

    body.push_str(&format!(
        r#"
<aside>
  <h2>Search &amp; Filter</h2>
  <form id="filters" method="get" action="/">
    <input type="hidden" name="submitted" value="1" />
    <label for="q">🔍 Search name or address:</label>
    <input id="q" name="q" type="text" value="{}" autocomplete="off" />
    <label for="country">🌍 Filter by Country:</label>
    <select id="country" name="country">
"#,
        escape(&selection.search)
    ));

    for country in &explorer.countries {
        let selected = if country == selection.country.as_str() {
            " selected"
        } else {
            ""
        };
        let country = escape(country);
        body.push_str(&format!(
            "      <option value=\"{country}\"{selected}>{country}</option>\n"
        ));
    }

    let checked = if selection.show_map { " checked" } else { "" };
    body.push_str(&format!(
        r#"    </select>
    <div class="toggle">
      <input id="show-map" name="map" type="checkbox" value="on"{checked} />
      <label for="show-map">🗺️ Show Map</label>
    </div>
    <noscript><button type="submit">Apply</button></noscript>
  </form>
</aside>"#
    ));
}

fn results(body: &mut String, explorer: &Explorer<'_>) {
    body.push_str("  <h2>📋 Filtered Results</h2>\n");

    if explorer.rows.is_empty() {
        notice(body, "warning", NO_RESULTS);
        return;
    }

    body.push_str(&format!(
        "  <p>{} of {} addresses</p>\n",
        explorer.rows.len(),
        explorer.total
    ));
    body.push_str(
        r#"  <div class="table-wrap">
  <table>
    <thead><tr><th>Name</th><th>Address</th><th>Country</th></tr></thead>
    <tbody>
"#,
    );

    for row in &explorer.rows {
        body.push_str(&format!(
            "      <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&row.name),
            escape(&row.address),
            escape(row.country.as_deref().unwrap_or_default())
        ));
    }

    body.push_str("    </tbody>\n  </table>\n  </div>\n");
}

fn map_section(body: &mut String, map: &MapView) -> Result<(), serde_json::Error> {
    // `<` can only appear inside JSON strings, where `\u003c` decodes to the same text.
    let json = serde_json::to_string(map)?.replace('<', "\\u003c");

    body.push_str(&format!(
        r#"  <h2>🗺️ Map</h2>
  <div id="map"></div>
  <script id="map-view" type="application/json">{json}</script>
{MAP_SCRIPT}"#
    ));

    Ok(())
}

fn notice(body: &mut String, kind: &str, message: &str) {
    body.push_str(&format!(
        "  <div class=\"notice {kind}\">{}</div>\n",
        escape(message)
    ));
}
