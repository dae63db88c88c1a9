//! Integration tests for the OSRM client (wiremock-based)

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_routing::{LatLng, OsrmConfig, OsrmRoutingClient, RoutingClient, RoutingError};

const ROUTE_PATH: &str = "/route/v1/driving/72.8777,19.076;73.8567,18.5204";

fn mumbai_pune() -> [LatLng; 2] {
    [LatLng::new(19.076, 72.8777), LatLng::new(18.5204, 73.8567)]
}

fn client_for(server: &MockServer) -> OsrmRoutingClient {
    OsrmRoutingClient::new(&OsrmConfig::for_testing(server.uri())).unwrap()
}

fn three_routes_json() -> serde_json::Value {
    serde_json::json!({
        "code": "Ok",
        "routes": [
            {
                "distance": 150000.0,
                "duration": 10800.0,
                "geometry": {"type": "LineString", "coordinates": [[72.8777, 19.076], [73.2, 18.8], [73.8567, 18.5204]]}
            },
            {
                "distance": 162500.0,
                "duration": 11700.0,
                "geometry": {"type": "LineString", "coordinates": [[72.8777, 19.076], [73.8567, 18.5204]]}
            },
            {
                "distance": 171000.0,
                "duration": 12600.0,
                "geometry": {"type": "LineString", "coordinates": [[72.8777, 19.076], [73.8567, 18.5204]]}
            }
        ],
        "waypoints": []
    })
}

#[tokio::test]
async fn test_route_with_alternatives() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .and(query_param("alternatives", "true"))
        .and(query_param("overview", "full"))
        .and(query_param("geometries", "geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_routes_json()))
        .expect(1)
        .mount(&server)
        .await;

    let routes = client_for(&server).route(&mumbai_pune(), true).await.unwrap();

    assert_eq!(routes.len(), 3);
    assert!((routes[0].distance_meters - 150_000.0).abs() < f64::EPSILON);
    assert!((routes[1].distance_meters - 162_500.0).abs() < f64::EPSILON);
    assert_eq!(routes[0].geometry.len(), 3);
    assert_eq!(routes[0].geometry[0], LatLng::new(19.076, 72.8777));
}

#[tokio::test]
async fn test_no_route_from_400_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": "NoRoute",
            "message": "Impossible route between points"
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).route(&mumbai_pune(), true).await;
    match result {
        Err(RoutingError::NoRoute(message)) => assert!(message.contains("Impossible")),
        other => panic!("expected NoRoute, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_query_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": "InvalidValue",
            "message": "Invalid coordinate value."
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).route(&mumbai_pune(), true).await;
    assert!(matches!(result, Err(RoutingError::InvalidQuery { code, .. }) if code == "InvalidValue"));
}

#[tokio::test]
async fn test_ok_code_with_no_routes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"code": "Ok", "routes": []})),
        )
        .mount(&server)
        .await;

    let result = client_for(&server).route(&mumbai_pune(), true).await;
    assert!(matches!(result, Err(RoutingError::NoRoute(_))));
}

#[tokio::test]
async fn test_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let result = client_for(&server).route(&mumbai_pune(), true).await;
    assert!(matches!(result, Err(RoutingError::RequestFailed(_))));
}

#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = client_for(&server).route(&mumbai_pune(), true).await;
    assert!(matches!(result, Err(RoutingError::RateLimitExceeded)));
}

#[tokio::test]
async fn test_malformed_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client_for(&server).route(&mumbai_pune(), true).await;
    assert!(matches!(result, Err(RoutingError::ParseError(_))));
}

#[tokio::test]
async fn test_alternatives_disabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .and(query_param("alternatives", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": "Ok",
            "routes": [{"distance": 150000.0, "duration": 10800.0}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let routes = client_for(&server).route(&mumbai_pune(), false).await.unwrap();
    assert_eq!(routes.len(), 1);
}
