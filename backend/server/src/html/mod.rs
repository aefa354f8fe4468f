//! Server-rendered pages.
//!
//! Static chrome (styles, CDN assets) lives in `&'static str` constants so it is
//! bundled with the binary. Dynamic text always goes through [`escape`].

pub mod explorer;
pub mod login;

use std::borrow::Cow;

pub use explorer::explorer_page;
pub use login::login_page;

pub const PAGE_TITLE: &str = "Address Map Viewer";

const STYLE: &str = r#"
  <style>
    * { box-sizing: border-box; }
    body {
      margin: 0;
      font-family: "Source Sans Pro", ui-sans-serif, system-ui, sans-serif;
      color: #31333f;
      background: #ffffff;
    }
    .layout { display: flex; min-height: 100vh; }
    aside {
      width: 300px;
      flex-shrink: 0;
      padding: 2rem 1.25rem;
      background: #f0f2f6;
    }
    aside h2 { margin-top: 0; font-size: 1.25rem; }
    aside label { display: block; margin: 1rem 0 0.35rem; font-size: 0.9rem; }
    aside input[type="text"], aside select {
      width: 100%;
      padding: 0.5rem;
      border: 1px solid #d5d8de;
      border-radius: 6px;
      font-size: 0.95rem;
    }
    aside .toggle { display: flex; gap: 0.5rem; align-items: center; margin-top: 1.25rem; }
    aside .toggle label { margin: 0; }
    main { flex: 1; min-width: 0; padding: 2rem 3rem; }
    table { width: 100%; border-collapse: collapse; font-size: 0.9rem; }
    th, td { padding: 0.45rem 0.6rem; border-bottom: 1px solid #e6e9ef; text-align: left; }
    th { background: #fafafa; font-weight: 600; }
    .table-wrap { max-height: 420px; overflow: auto; border: 1px solid #e6e9ef; border-radius: 6px; }
    .notice { padding: 0.9rem 1rem; border-radius: 6px; margin: 0.5rem 0 1.5rem; }
    .notice.warning { background: #fffce7; color: #926c05; }
    .notice.info { background: #e8f2fc; color: #004280; }
    .notice.error { background: #ffecec; color: #7d353b; }
    #map { width: 100%; max-width: 1000px; height: 600px; border-radius: 6px; }
    .gate { max-width: 420px; margin: 12vh auto; padding: 0 1rem; }
    .gate input[type="password"] {
      width: 100%;
      padding: 0.6rem;
      border: 1px solid #d5d8de;
      border-radius: 6px;
      font-size: 1rem;
    }
    .gate button {
      margin-top: 0.75rem;
      padding: 0.5rem 1.1rem;
      border: 1px solid #d5d8de;
      border-radius: 6px;
      background: #ffffff;
      cursor: pointer;
    }
  </style>
"#;

/// Leaflet 1.9.4 and Leaflet.markercluster 1.4.1.
pub const MAP_ASSETS: &str = r#"
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous"
    referrerpolicy="no-referrer" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous"
    referrerpolicy="no-referrer"></script>
  <link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.4.1/dist/MarkerCluster.css" />
  <link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.4.1/dist/MarkerCluster.Default.css" />
  <script src="https://unpkg.com/leaflet.markercluster@1.4.1/dist/leaflet.markercluster.js"></script>
"#;

pub fn page(head_extra: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{PAGE_TITLE}</title>
{STYLE}{head_extra}</head>
<body>
{body}
</body>
</html>
"#
    )
}

pub fn error_page(message: &str) -> String {
    page(
        "",
        &format!(
            r#"<main>
  <h1>📍 Address Explorer &amp; Map</h1>
  <div class="notice error">{}</div>
  <p>Reload the page to try again.</p>
</main>"#,
            escape(message)
        ),
    )
}

pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }

    Cow::Owned(escaped)
}
