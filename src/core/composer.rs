use crate::domain::model::{
    Coordinate, MapDocument, Marker, MarkerKind, NamedPoint, PathOverlay, PathStyle, RoutePath,
};
use crate::utils::error::{Result, RouteMapError};

pub const DEFAULT_ZOOM: u8 = 12;

/// Turns a routed path and its two endpoints into a [`MapDocument`].
#[derive(Debug, Clone)]
pub struct MapComposer {
    zoom: u8,
    style: PathStyle,
}

impl Default for MapComposer {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM)
    }
}

impl MapComposer {
    pub fn new(zoom: u8) -> Self {
        Self {
            zoom,
            style: PathStyle::default(),
        }
    }

    pub fn build(&self, path: &RoutePath, start: &NamedPoint, end: &NamedPoint) -> Result<MapDocument> {
        let (first, last) = match (path.first(), path.last()) {
            (Some(first), Some(last)) if path.len() >= 2 => (first, last),
            _ => return Err(RouteMapError::EmptyPath { points: path.len() }),
        };

        // Index midpoint, not a geographic centre.
        let center = path.points[path.len() / 2];

        tracing::debug!(
            points = path.len(),
            center_lat = center.lat(),
            center_lon = center.lon(),
            "Composing route map"
        );

        Ok(MapDocument {
            center,
            zoom: self.zoom,
            overlay: PathOverlay {
                path: path.clone(),
                style: self.style.clone(),
            },
            start: marker(MarkerKind::Start, first, start),
            end: marker(MarkerKind::End, last, end),
        })
    }
}

fn marker(kind: MarkerKind, position: Coordinate, point: &NamedPoint) -> Marker {
    Marker {
        kind,
        position,
        label: format!(
            "{}: {} / Lat: {} / Lon: {}",
            kind.title(),
            point.label,
            point.raw_lat,
            point.raw_lon
        ),
        name: point.label.clone(),
        source: point.coordinate,
        raw_lat: point.raw_lat.clone(),
        raw_lon: point.raw_lon.clone(),
        tooltip: kind.title().to_string(),
        color: kind.color().to_string(),
    }
}
