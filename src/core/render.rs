//! HTML rendering of a [`MapDocument`].
//!
//! The page is a single file: Leaflet is pulled from a CDN and every piece of
//! route data is inlined, so the artifact can be opened or shared as is.
//! User-supplied text goes through Tera's HTML autoescaping.

use crate::domain::model::{MapDocument, Marker, MarkerKind};
use crate::utils::error::Result;
use serde::Serialize;
use std::sync::Arc;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "route_map.html";

const ROUTE_MAP_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{ title }}</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" crossorigin="">
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" crossorigin=""></script>
  <style>
    html, body { height: 100%; margin: 0; }
    #map { position: absolute; top: 0; bottom: 0; width: 100%; }
    .distance {
      position: absolute; top: 10px; right: 10px; z-index: 1000;
      background: #fff; padding: 6px 10px; border-radius: 4px;
      font: 14px sans-serif; box-shadow: 0 1px 4px rgba(0, 0, 0, 0.3);
    }
  </style>
</head>
<body>
  <div id="map"></div>
  <div class="distance">Total Distance: {{ distance_text }} km</div>
  {% for marker in markers %}
  <div id="popup-{{ marker.kind }}" hidden><b>{{ marker.tooltip }}:</b> {{ marker.name }}<br><b>Lat:</b> {{ marker.raw_lat }}<br><b>Lon:</b> {{ marker.raw_lon }}</div>
  {% endfor %}
  <script>
    var map = L.map('map').setView({{ center | json_encode | safe }}, {{ zoom }});
    L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
      maxZoom: 19,
      attribution: '&copy; OpenStreetMap contributors'
    }).addTo(map);

    L.polyline({{ points | json_encode | safe }}, {
      color: {{ style.color | json_encode | safe }},
      weight: {{ style.weight }},
      opacity: {{ style.opacity }}
    }).addTo(map);
    {% for marker in markers %}
    L.circleMarker({{ marker.position | json_encode | safe }}, {
      radius: 9, color: {{ marker.color | json_encode | safe }}, fillColor: {{ marker.color | json_encode | safe }}, fillOpacity: 0.9
    })
      .bindTooltip({{ marker.tooltip | json_encode | safe }})
      .bindPopup(document.getElementById('popup-{{ marker.kind }}').innerHTML)
      .addTo(map);
    {% endfor %}
  </script>
</body>
</html>
"#;

#[derive(Serialize)]
struct MarkerView<'a> {
    kind: &'static str,
    position: [f64; 2],
    name: &'a str,
    raw_lat: &'a str,
    raw_lon: &'a str,
    tooltip: &'a str,
    color: &'a str,
}

impl<'a> MarkerView<'a> {
    fn from_marker(marker: &'a Marker) -> Self {
        Self {
            kind: match marker.kind {
                MarkerKind::Start => "start",
                MarkerKind::End => "end",
            },
            position: [marker.position.lat(), marker.position.lon()],
            name: &marker.name,
            raw_lat: &marker.raw_lat,
            raw_lon: &marker.raw_lon,
            tooltip: &marker.tooltip,
            color: &marker.color,
        }
    }
}

#[derive(Clone)]
pub struct HtmlRenderer {
    tera: Arc<Tera>,
}

impl std::fmt::Debug for HtmlRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlRenderer").finish_non_exhaustive()
    }
}

impl HtmlRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.add_raw_template(TEMPLATE_NAME, ROUTE_MAP_TEMPLATE)?;

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    pub fn render(&self, doc: &MapDocument) -> Result<String> {
        let points: Vec<[f64; 2]> = doc
            .overlay
            .path
            .points
            .iter()
            .map(|p| [p.lat(), p.lon()])
            .collect();
        let markers = [
            MarkerView::from_marker(&doc.start),
            MarkerView::from_marker(&doc.end),
        ];

        let mut ctx = Context::new();
        ctx.insert(
            "title",
            &format!("Route: {} to {}", doc.start.name, doc.end.name),
        );
        ctx.insert("center", &[doc.center.lat(), doc.center.lon()]);
        ctx.insert("zoom", &doc.zoom);
        ctx.insert("points", &points);
        ctx.insert("style", &doc.overlay.style);
        ctx.insert("markers", &markers);
        ctx.insert("distance_text", &format!("{:.2}", doc.distance_km()));

        let html = self.tera.render(TEMPLATE_NAME, &ctx)?;
        tracing::debug!(bytes = html.len(), "Rendered route map");
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::composer::MapComposer;
    use crate::domain::model::{Coordinate, NamedPoint, RoutePath};

    fn document(start_label: &str) -> MapDocument {
        let c = |lat, lon| Coordinate::new(lat, lon).unwrap();
        let path = RoutePath::new(
            vec![c(48.8566, 2.3522), c(50.0, 0.0), c(51.5074, -0.1278)],
            343.0,
        );
        let start = NamedPoint::with_raw_text(start_label, c(48.8566, 2.3522), "48.8566", "2.3522")
            .unwrap();
        let end = NamedPoint::with_raw_text("London", c(51.5074, -0.1278), "51.5074", "-0.1278")
            .unwrap();
        MapComposer::default().build(&path, &start, &end).unwrap()
    }

    #[test]
    fn test_render_contains_map_data() {
        let html = HtmlRenderer::new().unwrap().render(&document("Paris")).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("setView([50.0,0.0], 12)"));
        assert!(html.contains("[[48.8566,2.3522],[50.0,0.0],[51.5074,-0.1278]]"));
        assert!(html.contains("Total Distance: 343.00 km"));
        assert!(html.contains("<b>Start:</b> Paris<br><b>Lat:</b> 48.8566<br><b>Lon:</b> 2.3522"));
        assert!(html.contains("<b>End:</b> London"));
        assert!(html.contains(r#"color: "blue""#));
    }

    #[test]
    fn test_render_escapes_labels() {
        let html = HtmlRenderer::new()
            .unwrap()
            .render(&document("<script>alert(1)</script>"))
            .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;&#x2F;script&gt;"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = HtmlRenderer::new().unwrap();
        let doc = document("Paris");
        assert_eq!(renderer.render(&doc).unwrap(), renderer.render(&doc).unwrap());
    }
}
