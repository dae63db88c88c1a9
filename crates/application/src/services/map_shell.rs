//! Headless map session
//!
//! Holds everything a rendered map would show: viewport, tile layer, legend,
//! sidebar, search markers, the single routing control and the results
//! panel. The session is plain owned data; the route coordinator mutates it
//! through `&mut` and the HTML exporter reads it.

use domain::{Coordinate, DomainError, RoutesFound};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// OpenStreetMap standard tile server
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution required by the OpenStreetMap tile usage policy
pub const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Initial map setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapShellConfig {
    /// Initial viewport center
    pub center: Coordinate,
    /// Initial zoom level
    pub zoom: u8,
    /// Tile URL template with `{s}`, `{z}`, `{x}`, `{y}` placeholders
    pub tile_url: String,
    /// Highest zoom level the tile server provides
    pub max_zoom: u8,
    /// Tile attribution HTML
    pub attribution: String,
}

impl Default for MapShellConfig {
    fn default() -> Self {
        Self {
            center: Coordinate::mumbai(),
            zoom: 10,
            tile_url: DEFAULT_TILE_URL.to_string(),
            max_zoom: 19,
            attribution: DEFAULT_ATTRIBUTION.to_string(),
        }
    }
}

/// Visible map region
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// Center point
    pub center: Coordinate,
    /// Zoom level
    pub zoom: u8,
}

/// Base tile layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileLayer {
    /// URL template
    pub url_template: String,
    /// Maximum zoom
    pub max_zoom: u8,
    /// Attribution HTML
    pub attribution: String,
}

/// Corner a map control is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LegendPosition {
    /// Top left corner
    TopLeft,
    /// Top right corner
    TopRight,
    /// Bottom left corner
    BottomLeft,
    /// Bottom right corner
    BottomRight,
}

impl LegendPosition {
    /// Leaflet control position name
    #[must_use]
    pub const fn as_leaflet(&self) -> &'static str {
        match self {
            Self::TopLeft => "topleft",
            Self::TopRight => "topright",
            Self::BottomLeft => "bottomleft",
            Self::BottomRight => "bottomright",
        }
    }
}

/// One legend row: a color swatch and its label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    /// Label text
    pub label: String,
    /// CSS color of the swatch
    pub color: String,
}

impl LegendEntry {
    fn new(label: &str, color: &str) -> Self {
        Self {
            label: label.to_string(),
            color: color.to_string(),
        }
    }
}

/// Route color legend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    /// Heading
    pub title: String,
    /// Anchor corner
    pub position: LegendPosition,
    /// Rows, main route first
    pub entries: Vec<LegendEntry>,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            title: "Route Legend".to_string(),
            position: LegendPosition::BottomRight,
            entries: vec![
                LegendEntry::new("Main Route", "blue"),
                LegendEntry::new("Alternative Route 1", "green"),
                LegendEntry::new("Alternative Route 2", "orange"),
            ],
        }
    }
}

/// Collapsible side navigation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    active: bool,
}

impl Sidebar {
    /// Whether the sidebar is expanded
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// Which end of the search a marker belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarkerKind {
    /// Search origin
    Start,
    /// Search destination
    End,
}

/// Marker image and its placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerIcon {
    /// Image URL
    pub icon_url: String,
    /// Width and height in pixels
    pub size: [u32; 2],
    /// Pixel of the image that sits on the coordinate
    pub anchor: [u32; 2],
}

impl MarkerKind {
    /// Icon used for this kind of marker
    #[must_use]
    pub fn icon(&self) -> MarkerIcon {
        let color = match self {
            Self::Start => "green",
            Self::End => "red",
        };
        MarkerIcon {
            icon_url: format!(
                "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-{color}.png"
            ),
            size: [25, 41],
            anchor: [12, 41],
        }
    }
}

/// A marker placed by a route search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Start or end
    pub kind: MarkerKind,
    /// Location
    pub position: Coordinate,
    /// Popup label
    pub popup: String,
    /// Whether the popup is shown
    pub popup_open: bool,
}

impl Marker {
    /// Create a marker with its popup open
    #[must_use]
    pub fn new(kind: MarkerKind, position: Coordinate, popup: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            popup: popup.into(),
            popup_open: true,
        }
    }

    /// Icon for this marker
    #[must_use]
    pub fn icon(&self) -> MarkerIcon {
        self.kind.icon()
    }
}

/// Polyline style for a drawn route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    /// CSS color
    pub color: String,
    /// Stroke opacity, 0.0 to 1.0
    pub opacity: f64,
    /// Stroke width in pixels
    pub weight: u32,
    /// SVG dash pattern; solid when `None`
    pub dash_array: Option<String>,
}

impl LineStyle {
    /// Solid blue line for the primary route
    #[must_use]
    pub fn main_route() -> Self {
        Self {
            color: "blue".to_string(),
            opacity: 0.9,
            weight: 5,
            dash_array: None,
        }
    }

    /// Dashed, lighter line for an alternative route
    #[must_use]
    pub fn alternative(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            opacity: 0.6,
            weight: 4,
            dash_array: Some("5,10".to_string()),
        }
    }
}

/// Behaviour of the routing control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingOptions {
    /// Recompute while a waypoint is being dragged
    pub route_while_dragging: bool,
    /// Ask the engine for alternatives
    pub show_alternatives: bool,
    /// Let the control draw its own waypoint markers
    pub create_markers: bool,
    /// Styles for the primary route
    pub line_styles: Vec<LineStyle>,
    /// Styles for alternatives, applied in order
    pub alt_line_styles: Vec<LineStyle>,
}

impl Default for RoutingOptions {
    fn default() -> Self {
        Self {
            route_while_dragging: true,
            show_alternatives: true,
            create_markers: false,
            line_styles: vec![LineStyle::main_route()],
            alt_line_styles: vec![
                LineStyle::alternative("green"),
                LineStyle::alternative("orange"),
            ],
        }
    }
}

impl RoutingOptions {
    /// Style for the route at `index` (0 is the primary route)
    ///
    /// Alternatives cycle through `alt_line_styles`.
    #[must_use]
    pub fn style_for_route(&self, index: usize) -> Option<&LineStyle> {
        if index == 0 {
            return self.line_styles.first();
        }
        if self.alt_line_styles.is_empty() {
            return None;
        }
        self.alt_line_styles
            .get((index - 1) % self.alt_line_styles.len())
    }
}

/// The active route-rendering session on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingControl {
    waypoints: Vec<Coordinate>,
    options: RoutingOptions,
    routes: Option<RoutesFound>,
}

impl RoutingControl {
    /// Create a control that has not yet received routes
    #[must_use]
    pub const fn new(waypoints: Vec<Coordinate>, options: RoutingOptions) -> Self {
        Self {
            waypoints,
            options,
            routes: None,
        }
    }

    /// Waypoints in travel order
    #[must_use]
    pub fn waypoints(&self) -> &[Coordinate] {
        &self.waypoints
    }

    /// Control options
    #[must_use]
    pub const fn options(&self) -> &RoutingOptions {
        &self.options
    }

    /// Routes from the last successful computation
    #[must_use]
    pub const fn routes(&self) -> Option<&RoutesFound> {
        self.routes.as_ref()
    }

    /// Store freshly computed routes
    pub fn set_routes(&mut self, routes: RoutesFound) {
        self.routes = Some(routes);
    }

    /// Move one waypoint
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if `index` is out of range.
    pub fn set_waypoint(&mut self, index: usize, coordinate: Coordinate) -> Result<(), DomainError> {
        let count = self.waypoints.len();
        let slot = self.waypoints.get_mut(index).ok_or_else(|| {
            DomainError::validation(format!(
                "waypoint index {index} out of range for {count} waypoints"
            ))
        })?;
        *slot = coordinate;
        Ok(())
    }
}

/// Distance and cost text of the last rendered search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultsPanel {
    /// e.g. "150.00 km"
    pub distance_text: Option<String>,
    /// e.g. "₹1500.00"
    pub cost_text: Option<String>,
}

impl ResultsPanel {
    /// Replace both texts
    pub fn show(&mut self, distance_text: String, cost_text: String) {
        self.distance_text = Some(distance_text);
        self.cost_text = Some(cost_text);
    }

    /// Blank both texts
    pub fn clear(&mut self) {
        self.distance_text = None;
        self.cost_text = None;
    }

    /// Whether anything is displayed
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.distance_text.is_none() && self.cost_text.is_none()
    }
}

/// One map, as a user would see it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSession {
    viewport: Viewport,
    tile_layer: TileLayer,
    legend: Legend,
    sidebar: Sidebar,
    markers: Vec<Marker>,
    routing_control: Option<RoutingControl>,
    results: ResultsPanel,
    notices: Vec<String>,
}

impl Default for MapSession {
    fn default() -> Self {
        Self::new(&MapShellConfig::default())
    }
}

impl MapSession {
    /// Initialise the map shell
    #[must_use]
    pub fn new(config: &MapShellConfig) -> Self {
        Self {
            viewport: Viewport {
                center: config.center,
                zoom: config.zoom,
            },
            tile_layer: TileLayer {
                url_template: config.tile_url.clone(),
                max_zoom: config.max_zoom,
                attribution: config.attribution.clone(),
            },
            legend: Legend::default(),
            sidebar: Sidebar::default(),
            markers: Vec::new(),
            routing_control: None,
            results: ResultsPanel::default(),
            notices: Vec::new(),
        }
    }

    /// Current viewport
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Base tile layer
    #[must_use]
    pub const fn tile_layer(&self) -> &TileLayer {
        &self.tile_layer
    }

    /// Route legend
    #[must_use]
    pub const fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Sidebar state
    #[must_use]
    pub const fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    /// Markers placed by the current search
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// The routing control, if a search is active
    #[must_use]
    pub const fn routing_control(&self) -> Option<&RoutingControl> {
        self.routing_control.as_ref()
    }

    /// Mutable access to the routing control
    pub const fn routing_control_mut(&mut self) -> Option<&mut RoutingControl> {
        self.routing_control.as_mut()
    }

    /// Results panel
    #[must_use]
    pub const fn results(&self) -> &ResultsPanel {
        &self.results
    }

    /// Mutable results panel
    pub const fn results_mut(&mut self) -> &mut ResultsPanel {
        &mut self.results
    }

    /// User-visible notices not yet consumed
    #[must_use]
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Remove the overlay of the previous search: markers, routing control
    /// and results text
    pub fn clear_search(&mut self) {
        if self.routing_control.take().is_some() {
            debug!("Removed routing control");
        }
        self.markers.clear();
        self.results.clear();
    }

    /// Place a marker
    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// Install `control` as the only routing control, dropping any other
    pub fn set_routing_control(&mut self, control: RoutingControl) {
        self.routing_control = Some(control);
    }

    /// Detach the routing control
    pub const fn remove_routing_control(&mut self) -> Option<RoutingControl> {
        self.routing_control.take()
    }

    /// Show a message to the user
    pub fn push_notice(&mut self, notice: impl Into<String>) {
        self.notices.push(notice.into());
    }

    /// Drain pending notices
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// The sidebar's open button toggles it
    pub const fn open_sidebar_clicked(&mut self) {
        self.sidebar.active = !self.sidebar.active;
    }

    /// The sidebar's close button always collapses it
    pub const fn close_sidebar_clicked(&mut self) {
        self.sidebar.active = false;
    }
}
