//! Client for OSRM-compatible routing services.
//!
//! OSRM speaks `lon,lat` everywhere, in the request path as well as in the
//! GeoJSON geometry it returns. All conversion to the domain's `lat,lon`
//! order goes through [`Coordinate::to_lon_lat`] and
//! [`Coordinate::from_lon_lat`].

use crate::domain::model::{Coordinate, RoutePath};
use crate::domain::ports::{ConfigProvider, RouteClient};
use crate::utils::error::{Result, RouteMapError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://router.project-osrm.org";
pub const DEFAULT_PROFILE: &str = "driving";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: Option<String>,
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: Option<OsrmGeometry>,
    distance: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Option<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    client: Client,
    base_url: String,
    profile: String,
}

impl OsrmClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_options(
            base_url,
            DEFAULT_PROFILE,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn with_options(
        base_url: impl Into<String>,
        profile: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("route-mapper/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RouteMapError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            profile: profile.into(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::with_options(
            config.routing_base_url(),
            config.routing_profile(),
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    pub fn route_url(&self, origin: Coordinate, destination: Coordinate) -> String {
        let (origin_lon, origin_lat) = origin.to_lon_lat();
        let (dest_lon, dest_lat) = destination.to_lon_lat();
        format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.base_url, self.profile, origin_lon, origin_lat, dest_lon, dest_lat
        )
    }

    fn parse_route(body: &str) -> Result<RoutePath> {
        let response: OsrmResponse = serde_json::from_str(body)
            .map_err(|e| RouteMapError::malformed(format!("invalid JSON body: {}", e)))?;

        let route = match response.routes.and_then(|routes| routes.into_iter().next()) {
            Some(route) => route,
            None => {
                tracing::debug!(code = ?response.code, "Routing service returned no routes");
                return Err(RouteMapError::NoRouteFound);
            }
        };

        let coordinates = route
            .geometry
            .and_then(|g| g.coordinates)
            .ok_or_else(|| RouteMapError::malformed("route is missing geometry.coordinates"))?;
        let distance_m = route
            .distance
            .ok_or_else(|| RouteMapError::malformed("route is missing distance"))?;

        if !distance_m.is_finite() || distance_m < 0.0 {
            return Err(RouteMapError::malformed(format!(
                "distance {} is not a non-negative number",
                distance_m
            )));
        }
        if coordinates.is_empty() {
            return Err(RouteMapError::malformed("route geometry has no coordinates"));
        }

        let points = coordinates
            .iter()
            .enumerate()
            .map(|(i, pair)| match pair.as_slice() {
                [lon, lat, ..] => Coordinate::from_lon_lat(*lon, *lat).map_err(|e| {
                    RouteMapError::malformed(format!("coordinate #{} is invalid: {}", i, e))
                }),
                _ => Err(RouteMapError::malformed(format!(
                    "coordinate #{} is not a [lon, lat] pair",
                    i
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RoutePath::new(points, distance_m / 1000.0))
    }
}

#[async_trait]
impl RouteClient for OsrmClient {
    async fn fetch_route(&self, origin: Coordinate, destination: Coordinate) -> Result<RoutePath> {
        let url = self.route_url(origin, destination);
        tracing::debug!("Making routing request to: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await
            .map_err(|e| RouteMapError::RouteUnavailable {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        tracing::debug!("Routing response status: {}", status);

        if status != reqwest::StatusCode::OK {
            return Err(RouteMapError::RouteUnavailable {
                status: Some(status.as_u16()),
                message: format!("routing service responded with {}", status),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RouteMapError::RouteUnavailable {
                status: Some(status.as_u16()),
                message: format!("failed to read response body: {}", e),
            })?;

        let path = Self::parse_route(&body)?;
        tracing::info!(
            points = path.len(),
            distance_km = path.distance_km,
            "Route fetched"
        );
        Ok(path)
    }
}
