use crate::utils::error::{Result, RouteMapError};
use serde::{Deserialize, Serialize};

/// A geographic point in (latitude, longitude) order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

/// Unchecked wire form; deserialization goes through [`Coordinate::new`].
#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = RouteMapError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Self::new(raw.lat, raw.lon)
    }
}

impl Coordinate {
    pub const LAT_RANGE: (f64, f64) = (-90.0, 90.0);
    pub const LON_RANGE: (f64, f64) = (-180.0, 180.0);

    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        Self::checked(("latitude", lat), ("longitude", lon))
    }

    /// Like [`Coordinate::new`], with the given field names in any error.
    pub(crate) fn checked(lat: (&str, f64), lon: (&str, f64)) -> Result<Self> {
        check_axis(lat.0, lat.1, Self::LAT_RANGE)?;
        check_axis(lon.0, lon.1, Self::LON_RANGE)?;
        Ok(Self {
            lat: lat.1,
            lon: lon.1,
        })
    }

    /// Builds a coordinate from a routing-service pair, which is `[lon, lat]`.
    pub fn from_lon_lat(lon: f64, lat: f64) -> Result<Self> {
        Self::new(lat, lon)
    }

    /// The `[lon, lat]` order the routing service expects.
    pub fn to_lon_lat(self) -> (f64, f64) {
        (self.lon, self.lat)
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

fn check_axis(field: &str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    if !value.is_finite() {
        return Err(RouteMapError::input(field, "must be a finite number"));
    }
    if value < min || value > max {
        return Err(RouteMapError::input(
            field,
            format!("must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// A labeled route endpoint. The raw text is what the user typed and is shown
/// on the marker even when the routed point was snapped elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPoint {
    pub label: String,
    pub coordinate: Coordinate,
    pub raw_lat: String,
    pub raw_lon: String,
}

impl NamedPoint {
    pub fn new(label: impl Into<String>, coordinate: Coordinate) -> Result<Self> {
        Self::with_raw_text(
            label,
            coordinate,
            coordinate.lat().to_string(),
            coordinate.lon().to_string(),
        )
    }

    pub fn with_raw_text(
        label: impl Into<String>,
        coordinate: Coordinate,
        raw_lat: impl Into<String>,
        raw_lon: impl Into<String>,
    ) -> Result<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(RouteMapError::input("label", "cannot be empty"));
        }
        Ok(Self {
            label,
            coordinate,
            raw_lat: raw_lat.into(),
            raw_lon: raw_lon.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    pub points: Vec<Coordinate>,
    pub distance_km: f64,
}

impl RoutePath {
    pub fn new(points: Vec<Coordinate>, distance_km: f64) -> Self {
        Self {
            points,
            distance_km,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Coordinate> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Coordinate> {
        self.points.last().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Start,
    End,
}

impl MarkerKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::End => "End",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Start => "green",
            Self::End => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub kind: MarkerKind,
    /// Routed (snapped) position the marker is drawn at.
    pub position: Coordinate,
    pub label: String,
    pub name: String,
    /// Coordinate of the endpoint as it was requested.
    pub source: Coordinate,
    pub raw_lat: String,
    pub raw_lon: String,
    pub tooltip: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: "blue".to_string(),
            weight: 5,
            opacity: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathOverlay {
    pub path: RoutePath,
    pub style: PathStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    pub center: Coordinate,
    pub zoom: u8,
    pub overlay: PathOverlay,
    pub start: Marker,
    pub end: Marker,
}

impl MapDocument {
    pub fn distance_km(&self) -> f64 {
        self.overlay.path.distance_km
    }
}

/// The six raw strings collected by the input form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteForm {
    pub start_name: String,
    pub start_lat: String,
    pub start_lon: String,
    pub end_name: String,
    pub end_lat: String,
    pub end_lon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanOutcome {
    pub artifact_path: String,
    pub distance_km: f64,
    pub document: MapDocument,
}
