//! Template engine module for exporting the map as a standalone HTML page
//!
//! Uses the Tera templating engine. The page loads Leaflet from a CDN and
//! draws the session's tile layer, legend, markers and route lines; the
//! results panel, notices and weather popup are rendered server-side.
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::templates::TemplateEngine;
//!
//! let engine = TemplateEngine::new()?;
//! let html = engine.render_map_page(&session, Some(&weather_panel))?;
//! ```

mod map_page;

use std::path::Path;
use std::sync::Arc;

use application::services::{MapSession, WeatherPanel};
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};
use thiserror::Error;
use tracing::{debug, info};

use map_page::MapPageData;

/// Name of the embedded map page template
pub const MAP_PAGE_TEMPLATE: &str = "map/page.html";

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Render(String),

    /// Template compilation failed
    #[error("Template compilation failed: {0}")]
    Compile(String),

    /// Invalid template context
    #[error("Invalid context: {0}")]
    Context(String),

    /// Writing the rendered page failed
    #[error("Failed to write page: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => Self::Render(e.to_string()),
        }
    }
}

/// Template context wrapper for type-safe context building
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    inner: Context,
}

impl TemplateContext {
    /// Create a new empty template context
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Context::new(),
        }
    }

    /// Insert a value into the context
    pub fn insert<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        self.inner.insert(key, value);
    }
}

/// Template engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Page `<title>`
    #[serde(default = "default_page_title")]
    pub page_title: String,

    /// Whether to auto-escape HTML by default
    #[serde(default = "default_true")]
    pub auto_escape: bool,
}

fn default_page_title() -> String {
    "Wayfare Route Planner".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            page_title: default_page_title(),
            auto_escape: true,
        }
    }
}

/// Embedded templates - compiled into the binary
mod embedded {
    pub const MAP_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ page_title }}</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
    <style>
        html, body { margin: 0; height: 100%; font-family: Arial, sans-serif; }
        #map { position: absolute; inset: 0; }
        #sidebar { position: absolute; top: 0; left: -320px; width: 300px; height: 100%;
                   background: #fff; z-index: 1000; padding: 10px; box-shadow: 2px 0 6px rgba(0,0,0,.3);
                   transition: left .3s; overflow-y: auto; }
        #sidebar.active { left: 0; }
        #open-sidebar { position: absolute; top: 10px; left: 50px; z-index: 999; }
        #close-sidebar { float: right; }
        .notices { color: #b00020; }
        .legend { background: #fff; padding: 6px 8px; border-radius: 4px; line-height: 18px; }
        .legend i { display: inline-block; width: 18px; height: 4px; margin-right: 6px; vertical-align: middle; }
        #weather-popup { position: absolute; top: 10px; right: 10px; z-index: 999; background: #fff;
                         padding: 8px 12px; border-radius: 4px; box-shadow: 0 1px 5px rgba(0,0,0,.4); }
        #weather-popup .temperature { font-size: 2em; margin: 0; }
    </style>
</head>
<body>
    <div id="sidebar"{% if sidebar_active %} class="active"{% endif %}>
        <button id="close-sidebar" type="button">&times;</button>
        <h2>Route</h2>
        {% if start_label %}<p>{{ start_label }}</p>{% endif %}
        {% if end_label %}<p>{{ end_label }}</p>{% endif %}
        <div id="results">
            {% if distance_text %}<p>Distance: <span id="distance">{{ distance_text }}</span></p>{% endif %}
            {% if cost_text %}<p>Estimated Cost: <span id="cost">{{ cost_text }}</span></p>{% endif %}
        </div>
        {% if notices %}
        <ul class="notices">
            {% for notice in notices %}<li>{{ notice }}</li>
            {% endfor %}
        </ul>
        {% endif %}
    </div>
    <button id="open-sidebar" type="button">&#9776;</button>
    <div id="map"></div>
    {% if show_weather %}
    <div id="weather-popup">
        <h3>{{ weather.header }}</h3>
        <p class="temperature">{{ weather.temperature }}</p>
        <p>{{ weather.feels_like }}</p>
        <p>{{ weather.description }}</p>
        <p>Humidity: {{ weather.humidity }}%</p>
        <p>Wind: {{ weather.wind }} km/h</p>
    </div>
    {% endif %}
    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <script>
        const data = {{ map_data | safe }};
        const map = L.map('map').setView(data.center, data.zoom);
        L.tileLayer(data.tiles.url, {
            maxZoom: data.tiles.max_zoom,
            attribution: data.tiles.attribution
        }).addTo(map);

        const legend = L.control({ position: data.legend.position });
        legend.onAdd = function () {
            const div = L.DomUtil.create('div', 'legend');
            const title = document.createElement('strong');
            title.textContent = data.legend.title;
            div.appendChild(title);
            data.legend.entries.forEach(function (entry) {
                const row = document.createElement('div');
                const swatch = document.createElement('i');
                swatch.style.background = entry.color;
                row.appendChild(swatch);
                row.appendChild(document.createTextNode(entry.label));
                div.appendChild(row);
            });
            return div;
        };
        legend.addTo(map);

        data.markers.forEach(function (m) {
            const icon = L.icon({
                iconUrl: m.icon_url,
                iconSize: m.icon_size,
                iconAnchor: m.icon_anchor,
                popupAnchor: [1, -34]
            });
            const popup = document.createElement('span');
            popup.textContent = m.popup;
            const marker = L.marker(m.position, { icon: icon }).addTo(map)
                .bindPopup(popup, { autoClose: false });
            if (m.popup_open) { marker.openPopup(); }
        });

        const bounds = [];
        data.routes.slice().reverse().forEach(function (r) {
            L.polyline(r.points, {
                color: r.color,
                opacity: r.opacity,
                weight: r.weight,
                dashArray: r.dash_array
            }).bindTooltip(r.label + ': ' + r.distance).addTo(map);
            r.points.forEach(function (p) { bounds.push(p); });
        });
        if (bounds.length > 0) { map.fitBounds(bounds, { padding: [30, 30] }); }

        const sidebar = document.getElementById('sidebar');
        document.getElementById('open-sidebar').addEventListener('click', function () {
            sidebar.classList.toggle('active');
        });
        document.getElementById('close-sidebar').addEventListener('click', function () {
            sidebar.classList.remove('active');
        });
    </script>
</body>
</html>
"#;
}

/// Template engine using Tera
#[derive(Clone)]
pub struct TemplateEngine {
    tera: Arc<Tera>,
    config: TemplateConfig,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TemplateEngine {
    /// Create a new template engine with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded template fails to compile.
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_config(TemplateConfig::default())
    }

    /// Create a new template engine with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded template fails to compile.
    pub fn with_config(config: TemplateConfig) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        tera.autoescape_on(if config.auto_escape {
            vec![".html", ".htm"]
        } else {
            vec![]
        });

        tera.add_raw_template(MAP_PAGE_TEMPLATE, embedded::MAP_PAGE)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;

        debug!("Template engine initialized");

        Ok(Self {
            tera: Arc::new(tera),
            config,
        })
    }

    /// Render a template with the given context
    ///
    /// # Errors
    ///
    /// Returns an error if the template is unknown or rendering fails.
    pub fn render(
        &self,
        template_name: &str,
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        self.tera
            .render(template_name, &context.inner)
            .map_err(TemplateError::from)
    }

    /// Render the session as a standalone Leaflet page
    ///
    /// The weather popup is included only when `weather` is given and has
    /// been filled at least once.
    ///
    /// # Errors
    ///
    /// Returns an error if the page data cannot be serialized or rendering
    /// fails.
    pub fn render_map_page(
        &self,
        session: &MapSession,
        weather: Option<&WeatherPanel>,
    ) -> Result<String, TemplateError> {
        let data = MapPageData::from_session(session);
        let map_data = data
            .to_script_json()
            .map_err(|e| TemplateError::Context(e.to_string()))?;

        let popup_for = |index: usize| session.markers().get(index).map(|m| m.popup.as_str());
        let weather_panel = weather.cloned().unwrap_or_default();

        let mut ctx = TemplateContext::new();
        ctx.insert("page_title", &self.config.page_title);
        ctx.insert("map_data", &map_data);
        ctx.insert("sidebar_active", &session.sidebar().is_active());
        ctx.insert("start_label", &popup_for(0));
        ctx.insert("end_label", &popup_for(1));
        ctx.insert("distance_text", &session.results().distance_text);
        ctx.insert("cost_text", &session.results().cost_text);
        ctx.insert("notices", session.notices());
        ctx.insert("show_weather", &weather_panel.visible);
        ctx.insert("weather", &weather_panel);

        let html = self.render(MAP_PAGE_TEMPLATE, &ctx)?;
        debug!(
            routes = data.route_count(),
            bytes = html.len(),
            "Rendered map page"
        );
        Ok(html)
    }

    /// Render the session and write it to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the file cannot be written.
    pub fn export_map_page(
        &self,
        path: &Path,
        session: &MapSession,
        weather: Option<&WeatherPanel>,
    ) -> Result<(), TemplateError> {
        let html = self.render_map_page(session, weather)?;
        std::fs::write(path, html)?;
        info!(path = %path.display(), "Map page written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use application::services::{Marker, MarkerKind};
    use chrono::Utc;
    use domain::{Coordinate, Humidity, WeatherSnapshot, WindSpeed};

    use super::*;

    fn weather_panel() -> WeatherPanel {
        let mut panel = WeatherPanel::default();
        panel.apply(
            "Mumbai",
            &WeatherSnapshot {
                city: "Mumbai".into(),
                temperature_c: 28.6,
                feels_like_c: 31.2,
                description: "haze".into(),
                humidity: Humidity::from_percent(74),
                wind_speed: WindSpeed::from_meters_per_second(5.0),
                observed_at: Utc::now(),
            },
        );
        panel
    }

    #[test]
    fn engine_compiles_embedded_templates() {
        let engine = TemplateEngine::new();
        assert!(engine.is_ok());
    }

    #[test]
    fn unknown_template_is_not_found() {
        let engine = TemplateEngine::new().unwrap();
        let result = engine.render("missing.html", &TemplateContext::new());
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn empty_session_renders_shell() {
        let engine = TemplateEngine::new().unwrap();
        let html = engine
            .render_map_page(&MapSession::default(), None)
            .unwrap();

        assert!(html.contains("<title>Wayfare Route Planner</title>"));
        assert!(html.contains("leaflet.js"));
        assert!(html.contains("\"position\":\"bottomright\""));
        assert!(html.contains("Route Legend"));
        assert!(!html.contains("id=\"weather-popup\""));
        assert!(!html.contains("id=\"distance\""));
    }

    #[test]
    fn results_and_weather_are_rendered() {
        let engine = TemplateEngine::new().unwrap();
        let mut session = MapSession::default();
        session
            .results_mut()
            .show("150.00 km".into(), "₹1500.00".into());
        session.open_sidebar_clicked();

        let html = engine
            .render_map_page(&session, Some(&weather_panel()))
            .unwrap();

        assert!(html.contains("<span id=\"distance\">150.00 km</span>"));
        assert!(html.contains("<span id=\"cost\">₹1500.00</span>"));
        assert!(html.contains("<div id=\"sidebar\" class=\"active\">"));
        assert!(html.contains("Weather in Mumbai"));
        assert!(html.contains("Feels Like: 31°"));
        assert!(html.contains("Wind: 18.0 km/h"));
    }

    #[test]
    fn hidden_weather_panel_is_omitted() {
        let engine = TemplateEngine::new().unwrap();
        let html = engine
            .render_map_page(&MapSession::default(), Some(&WeatherPanel::default()))
            .unwrap();
        assert!(!html.contains("id=\"weather-popup\""));
    }

    #[test]
    fn user_text_is_escaped() {
        let engine = TemplateEngine::new().unwrap();
        let mut session = MapSession::default();
        session.add_marker(Marker::new(
            MarkerKind::Start,
            Coordinate::mumbai(),
            "Start: <b>Mumbai</b>",
        ));
        session.push_notice("<script>alert(1)</script>");

        let html = engine.render_map_page(&session, None).unwrap();

        assert!(html.contains("Start: &lt;b&gt;Mumbai&lt;&#x2F;b&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn export_writes_file() {
        let engine = TemplateEngine::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.html");

        engine
            .export_map_page(&path, &MapSession::default(), None)
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let engine = TemplateEngine::new().unwrap();
        let result = engine.export_map_page(
            Path::new("/nonexistent/dir/map.html"),
            &MapSession::default(),
            None,
        );
        assert!(matches!(result, Err(TemplateError::Io(_))));
    }
}
