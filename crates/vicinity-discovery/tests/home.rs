//! Home recommendation loading against a mock backend.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vicinity_core::GeoLocation;
use vicinity_discovery::load_home;
use vicinity_search::SearchClient;

fn service_row(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Service {id}"),
        "providerId": "prov-1"
    })
}

fn provider_row(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("Provider {id}")
    })
}

fn test_client(server: &MockServer) -> SearchClient {
    SearchClient::new(&server.uri(), 30, "vicinity-test/0.1")
        .expect("client construction should not fail")
}

fn here() -> GeoLocation {
    GeoLocation {
        latitude: -15.41,
        longitude: 28.28,
    }
}

#[tokio::test]
async fn with_location_both_sections_use_nearby_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/services/nearby"))
        .and(query_param("lat", "-15.41"))
        .and(query_param("lng", "28.28"))
        .and(query_param("limit", "10"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([service_row("s1"), service_row("s2")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/nearby"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([provider_row("p1")])))
        .expect(1)
        .mount(&server)
        .await;
    // The location-free fallbacks must not be touched.
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/providers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let home = load_home(&test_client(&server), Some(here())).await;

    assert_eq!(home.popular_services.len(), 2);
    assert_eq!(home.popular_services[0].id, "s1");
    assert_eq!(home.recommended_providers.len(), 1);
    assert_eq!(home.recommended_providers[0].id, "p1");
}

#[tokio::test]
async fn nearby_failures_fall_back_per_section() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/services/nearby"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/nearby"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    // Listing returns more rows than one section shows.
    let listing: Vec<_> = (0..15).map(|i| service_row(&format!("s{i}"))).collect();
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(listing)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/providers"))
        .and(query_param("sortBy", "rating"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [provider_row("p1"), provider_row("p2")],
            "pagination": { "page": 1, "limit": 10, "total": 2, "totalPages": 1, "hasMore": false }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = load_home(&test_client(&server), Some(here())).await;

    assert_eq!(home.popular_services.len(), 10, "listing is capped per section");
    assert_eq!(home.recommended_providers.len(), 2);
}

#[tokio::test]
async fn without_location_nearby_endpoints_are_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/services/nearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/nearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([service_row("s1")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/providers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [provider_row("p1")],
            "pagination": { "page": 1, "limit": 10, "total": 1, "totalPages": 1, "hasMore": false }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = load_home(&test_client(&server), None).await;

    assert_eq!(home.popular_services.len(), 1);
    assert_eq!(home.recommended_providers.len(), 1);
}

#[tokio::test]
async fn total_backend_failure_degrades_both_sections_to_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let home = load_home(&test_client(&server), Some(here())).await;

    assert!(home.popular_services.is_empty());
    assert!(home.recommended_providers.is_empty());
}
