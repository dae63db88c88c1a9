//! Integration tests for the Nominatim client (wiremock-based)

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_nominatim::{
    GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient,
};

fn client_for(server: &MockServer) -> NominatimGeocodingClient {
    NominatimGeocodingClient::new(&NominatimConfig::for_testing(server.uri())).unwrap()
}

const fn mumbai_json() -> &'static str {
    r#"[
        {"lat": "19.0759899", "lon": "72.8773928", "display_name": "Mumbai, Maharashtra, India"},
        {"lat": "18.9387711", "lon": "72.8353355", "display_name": "Mumbai Port, India"}
    ]"#
}

#[tokio::test]
async fn test_geocode_returns_first_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Mumbai"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(mumbai_json()))
        .expect(1)
        .mount(&server)
        .await;

    let place = client_for(&server).geocode("Mumbai").await.unwrap().unwrap();
    assert!((place.latitude - 19.075_989_9).abs() < 1e-9);
    assert!((place.longitude - 72.877_392_8).abs() < 1e-9);
    assert_eq!(
        place.display_name.as_deref(),
        Some("Mumbai, Maharashtra, India")
    );
}

#[tokio::test]
async fn test_empty_result_is_no_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let result = client_for(&server).geocode("Nowhere Town").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_address_is_url_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Navi Mumbai & Thane, India"))
        .respond_with(ResponseTemplate::new(200).set_body_string(mumbai_json()))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .geocode("Navi Mumbai & Thane, India")
        .await
        .unwrap();
    assert!(result.is_some());
}

#[tokio::test]
async fn test_address_sent_as_typed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "  Pune "))
        .respond_with(ResponseTemplate::new(200).set_body_string(mumbai_json()))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).geocode("  Pune ").await.unwrap();
    assert!(result.is_some());
}

#[tokio::test]
async fn test_country_filter_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("countrycodes", "in"))
        .respond_with(ResponseTemplate::new(200).set_body_string(mumbai_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = NominatimConfig {
        country_filter: "in".to_string(),
        ..NominatimConfig::for_testing(server.uri())
    };
    let client = NominatimGeocodingClient::new(&config).unwrap();
    assert!(client.geocode("Pune").await.unwrap().is_some());
}

#[tokio::test]
async fn test_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = client_for(&server).geocode("Pune").await;
    assert!(matches!(result, Err(GeocodingError::RequestFailed(_))));
}

#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = client_for(&server).geocode("Pune").await;
    assert!(matches!(result, Err(GeocodingError::RateLimitExceeded)));
}

#[tokio::test]
async fn test_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server).geocode("Pune").await;
    assert!(matches!(result, Err(GeocodingError::ParseError(_))));
}

#[tokio::test]
async fn test_each_call_issues_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(mumbai_json()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.geocode("Mumbai").await.unwrap();
    client.geocode("Mumbai").await.unwrap();
}
