use crate::domain::model::{Coordinate, NamedPoint, RouteForm};
use crate::utils::error::{Result, RouteMapError};

/// Validated endpoints of a route request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: NamedPoint,
    pub end: NamedPoint,
}

impl RouteForm {
    pub fn new(
        start_name: impl Into<String>,
        start_lat: impl Into<String>,
        start_lon: impl Into<String>,
        end_name: impl Into<String>,
        end_lat: impl Into<String>,
        end_lon: impl Into<String>,
    ) -> Self {
        Self {
            start_name: start_name.into(),
            start_lat: start_lat.into(),
            start_lon: start_lon.into(),
            end_name: end_name.into(),
            end_lat: end_lat.into(),
            end_lon: end_lon.into(),
        }
    }

    /// Checks every field before anything touches the network.
    pub fn validate(&self) -> Result<RouteRequest> {
        let fields = [
            ("start_name", &self.start_name),
            ("start_lat", &self.start_lat),
            ("start_lon", &self.start_lon),
            ("end_name", &self.end_name),
            ("end_lat", &self.end_lat),
            ("end_lon", &self.end_lon),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(RouteMapError::input(field, "is required"));
            }
        }

        let start = endpoint(
            &self.start_name,
            ("start_lat", self.start_lat.as_str()),
            ("start_lon", self.start_lon.as_str()),
        )?;
        let end = endpoint(
            &self.end_name,
            ("end_lat", self.end_lat.as_str()),
            ("end_lon", self.end_lon.as_str()),
        )?;

        Ok(RouteRequest { start, end })
    }
}

fn endpoint(name: &str, lat: (&str, &str), lon: (&str, &str)) -> Result<NamedPoint> {
    let lat_value = parse_axis(lat.0, lat.1)?;
    let lon_value = parse_axis(lon.0, lon.1)?;

    let coordinate = Coordinate::checked((lat.0, lat_value), (lon.0, lon_value))?;
    NamedPoint::with_raw_text(name.trim(), coordinate, lat.1.trim(), lon.1.trim())
}

fn parse_axis(field: &str, raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RouteMapError::input(field, "must be numeric")),
    }
}
