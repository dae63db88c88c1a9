//! Page model for the Leaflet export
//!
//! Flattens a `MapSession` into the plain JSON the page script consumes.

use application::services::{MapSession, Marker};
use domain::{Coordinate, RouteSummary};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct MapPageData {
    center: [f64; 2],
    zoom: u8,
    tiles: TilesData,
    legend: LegendData,
    markers: Vec<MarkerData>,
    routes: Vec<RouteLayerData>,
}

#[derive(Debug, Serialize)]
struct TilesData {
    url: String,
    max_zoom: u8,
    attribution: String,
}

#[derive(Debug, Serialize)]
struct LegendData {
    title: String,
    position: &'static str,
    entries: Vec<LegendEntryData>,
}

#[derive(Debug, Serialize)]
struct LegendEntryData {
    label: String,
    color: String,
}

#[derive(Debug, Serialize)]
struct MarkerData {
    position: [f64; 2],
    popup: String,
    popup_open: bool,
    icon_url: String,
    icon_size: [u32; 2],
    icon_anchor: [u32; 2],
}

#[derive(Debug, Serialize)]
struct RouteLayerData {
    label: String,
    distance: String,
    color: String,
    opacity: f64,
    weight: u32,
    dash_array: Option<String>,
    points: Vec<[f64; 2]>,
}

impl From<&Marker> for MarkerData {
    fn from(marker: &Marker) -> Self {
        let icon = marker.icon();
        Self {
            position: marker.position.as_lat_lng(),
            popup: marker.popup.clone(),
            popup_open: marker.popup_open,
            icon_url: icon.icon_url,
            icon_size: icon.size,
            icon_anchor: icon.anchor,
        }
    }
}

fn route_label(index: usize) -> String {
    if index == 0 {
        "Main Route".to_string()
    } else {
        format!("Alternative Route {index}")
    }
}

fn route_points(route: &RouteSummary, waypoints: &[Coordinate]) -> Vec<[f64; 2]> {
    // Straight segments between waypoints when the engine sent no geometry
    let source = if route.geometry.is_empty() {
        waypoints
    } else {
        route.geometry.as_slice()
    };
    source.iter().map(Coordinate::as_lat_lng).collect()
}

impl MapPageData {
    pub(crate) fn from_session(session: &MapSession) -> Self {
        let viewport = session.viewport();
        let tiles = session.tile_layer();
        let legend = session.legend();

        let routes = session
            .routing_control()
            .and_then(|control| {
                control.routes().map(|found| {
                    found
                        .all()
                        .iter()
                        .enumerate()
                        .filter_map(|(i, route)| {
                            let style = control.options().style_for_route(i)?;
                            Some(RouteLayerData {
                                label: route_label(i),
                                distance: route.total_distance.to_string(),
                                color: style.color.clone(),
                                opacity: style.opacity,
                                weight: style.weight,
                                dash_array: style.dash_array.clone(),
                                points: route_points(route, control.waypoints()),
                            })
                        })
                        .collect()
                })
            })
            .unwrap_or_default();

        Self {
            center: viewport.center.as_lat_lng(),
            zoom: viewport.zoom,
            tiles: TilesData {
                url: tiles.url_template.clone(),
                max_zoom: tiles.max_zoom,
                attribution: tiles.attribution.clone(),
            },
            legend: LegendData {
                title: legend.title.clone(),
                position: legend.position.as_leaflet(),
                entries: legend
                    .entries
                    .iter()
                    .map(|e| LegendEntryData {
                        label: e.label.clone(),
                        color: e.color.clone(),
                    })
                    .collect(),
            },
            markers: session.markers().iter().map(MarkerData::from).collect(),
            routes,
        }
    }

    /// JSON safe to embed inside a `<script>` element
    pub(crate) fn to_script_json(&self) -> Result<String, serde_json::Error> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }

    pub(crate) fn route_count(&self) -> usize {
        self.routes.len()
    }
}

#[cfg(test)]
mod tests {
    use application::services::{MarkerKind, RoutingControl, RoutingOptions};
    use domain::{Distance, RoutesFound};

    use super::*;

    fn session_with_routes() -> MapSession {
        let start = Coordinate::mumbai();
        let end = Coordinate::new(18.5204, 73.8567).unwrap();
        let mut session = MapSession::default();
        session.add_marker(Marker::new(MarkerKind::Start, start, "Start: Mumbai"));
        session.add_marker(Marker::new(MarkerKind::End, end, "End: Pune"));

        let mut control = RoutingControl::new(vec![start, end], RoutingOptions::default());
        control.set_routes(
            RoutesFound::new(vec![
                RouteSummary::new(Distance::from_kilometers(150.0), 10_800.0),
                RouteSummary::new(Distance::from_kilometers(162.3), 11_500.0)
                    .with_geometry(vec![start, Coordinate::new(18.9, 73.3).unwrap(), end]),
            ])
            .unwrap(),
        );
        session.set_routing_control(control);
        session
    }

    #[test]
    fn empty_session_has_no_layers() {
        let data = MapPageData::from_session(&MapSession::default());
        assert_eq!(data.route_count(), 0);
        assert!(data.markers.is_empty());
        assert_eq!(data.legend.position, "bottomright");
        assert_eq!(data.center, [19.076, 72.8777]);
    }

    #[test]
    fn routes_get_labels_and_styles() {
        let data = MapPageData::from_session(&session_with_routes());

        assert_eq!(data.route_count(), 2);
        assert_eq!(data.routes[0].label, "Main Route");
        assert_eq!(data.routes[0].color, "blue");
        assert_eq!(data.routes[0].distance, "150.00 km");
        assert_eq!(data.routes[1].label, "Alternative Route 1");
        assert_eq!(data.routes[1].color, "green");
        assert_eq!(data.routes[1].dash_array.as_deref(), Some("5,10"));
    }

    #[test]
    fn missing_geometry_falls_back_to_waypoints() {
        let data = MapPageData::from_session(&session_with_routes());
        assert_eq!(data.routes[0].points.len(), 2);
        assert_eq!(data.routes[1].points.len(), 3);
    }

    #[test]
    fn script_json_cannot_close_script_tag() {
        let mut session = MapSession::default();
        session.add_marker(Marker::new(
            MarkerKind::Start,
            Coordinate::mumbai(),
            "Start: </script><script>alert(1)",
        ));
        let json = MapPageData::from_session(&session).to_script_json().unwrap();
        assert!(!json.contains("</script>"));
    }
}
