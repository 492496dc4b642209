use httpmock::prelude::*;
use route_mapper::domain::ports::RouteClient;
use route_mapper::{Coordinate, OsrmClient, RouteMapError};

const PARIS_LONDON_PATH: &str = "/route/v1/driving/2.3522,48.8566;-0.1278,51.5074";

fn paris() -> Coordinate {
    Coordinate::new(48.8566, 2.3522).unwrap()
}

fn london() -> Coordinate {
    Coordinate::new(51.5074, -0.1278).unwrap()
}

#[tokio::test]
async fn test_fetch_route_converts_geometry_and_distance() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path(PARIS_LONDON_PATH)
            .query_param("overview", "full")
            .query_param("geometries", "geojson");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "code": "Ok",
                "routes": [{
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[2.3522, 48.8566], [0.0, 50.0], [-0.1278, 51.5074]]
                    },
                    "distance": 343000.0,
                    "duration": 18000.0
                }]
            }));
    });

    let client = OsrmClient::new(server.base_url()).unwrap();
    let path = client.fetch_route(paris(), london()).await.unwrap();

    api_mock.assert();
    assert_eq!(path.len(), 3);
    assert_eq!(path.points[0], paris());
    assert_eq!(path.points[1], Coordinate::new(50.0, 0.0).unwrap());
    assert_eq!(path.points[2], london());
    assert_eq!(path.distance_km, 343.0);
}

#[tokio::test]
async fn test_server_error_is_route_unavailable() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(PARIS_LONDON_PATH);
        then.status(500);
    });

    let client = OsrmClient::new(server.base_url()).unwrap();
    let result = client.fetch_route(paris(), london()).await;

    // one attempt, no retry
    api_mock.assert_hits(1);
    match result {
        Err(RouteMapError::RouteUnavailable { status, .. }) => assert_eq!(status, Some(500)),
        other => panic!("expected RouteUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_ok_success_status_is_route_unavailable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(PARIS_LONDON_PATH);
        then.status(203)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "routes": [{
                    "geometry": {"coordinates": [[2.3522, 48.8566], [-0.1278, 51.5074]]},
                    "distance": 1000.0
                }]
            }));
    });

    let client = OsrmClient::new(server.base_url()).unwrap();
    let result = client.fetch_route(paris(), london()).await;

    match result {
        Err(RouteMapError::RouteUnavailable { status, .. }) => assert_eq!(status, Some(203)),
        other => panic!("expected RouteUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_bad_request_is_route_unavailable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(PARIS_LONDON_PATH);
        then.status(400)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"code": "InvalidQuery", "message": "bad"}));
    });

    let client = OsrmClient::new(server.base_url()).unwrap();
    let result = client.fetch_route(paris(), london()).await;

    assert!(matches!(
        result,
        Err(RouteMapError::RouteUnavailable {
            status: Some(400),
            ..
        })
    ));
}

#[tokio::test]
async fn test_unreachable_service_is_route_unavailable() {
    let client = OsrmClient::new("http://127.0.0.1:1").unwrap();
    let result = client.fetch_route(paris(), london()).await;

    assert!(matches!(
        result,
        Err(RouteMapError::RouteUnavailable { status: None, .. })
    ));
}

#[tokio::test]
async fn test_empty_routes_is_no_route_found() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(PARIS_LONDON_PATH);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"code": "Ok", "routes": []}));
    });

    let client = OsrmClient::new(server.base_url()).unwrap();
    let result = client.fetch_route(paris(), london()).await;

    api_mock.assert();
    assert!(matches!(result, Err(RouteMapError::NoRouteFound)));
}

#[tokio::test]
async fn test_missing_geometry_is_malformed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(PARIS_LONDON_PATH);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"routes": [{"distance": 1000.0}]}));
    });

    let client = OsrmClient::new(server.base_url()).unwrap();
    let result = client.fetch_route(paris(), london()).await;

    assert!(matches!(result, Err(RouteMapError::MalformedResponse { .. })));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(PARIS_LONDON_PATH);
        then.status(200).body("<html>maintenance</html>");
    });

    let client = OsrmClient::new(server.base_url()).unwrap();
    let result = client.fetch_route(paris(), london()).await;

    assert!(matches!(result, Err(RouteMapError::MalformedResponse { .. })));
}

#[tokio::test]
async fn test_custom_profile_in_path() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/route/v1/car/2.3522,48.8566;-0.1278,51.5074");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "routes": [{
                    "geometry": {"coordinates": [[2.3522, 48.8566], [-0.1278, 51.5074]]},
                    "distance": 500.0
                }]
            }));
    });

    let client = OsrmClient::with_options(
        server.base_url(),
        "car",
        std::time::Duration::from_secs(5),
    )
    .unwrap();
    let path = client.fetch_route(paris(), london()).await.unwrap();

    api_mock.assert();
    assert_eq!(path.distance_km, 0.5);
}
