//! Integration tests for `SearchClient` and the fallback chain using
//! wiremock HTTP mocks.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use vicinity_core::{build_query, FilterState, GeoLocation, UrlSeed};
use vicinity_search::{EntityLookup, FallbackFetcher, SearchBackend, SearchClient, SearchError};

fn test_client(base_url: &str) -> SearchClient {
    SearchClient::new(base_url, 30, "vicinity-test/0.1")
        .expect("client construction should not fail")
}

/// Matches only requests that do NOT carry the given query parameter.
struct NoQueryParam(&'static str);

impl wiremock::Match for NoQueryParam {
    fn matches(&self, request: &Request) -> bool {
        request.url.query_pairs().all(|(key, _)| key != self.0)
    }
}

fn provider_json(id: &str, name: &str, distance: Option<f64>) -> serde_json::Value {
    let mut body = serde_json::json!({
        "id": id,
        "name": name,
        "ratingAverage": 4.2,
        "ratingCount": 7,
        "latitude": -15.40,
        "longitude": 28.30
    });
    if let Some(d) = distance {
        body["distance"] = serde_json::json!(d);
    }
    body
}

#[tokio::test]
async fn scoped_search_parses_envelope() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "results": [provider_json("p1", "Kwik Plumbing", None)],
        "pagination": { "page": 1, "limit": 12, "total": 1, "totalPages": 1, "hasMore": false }
    });

    Mock::given(method("GET"))
        .and(path("/search/providers"))
        .and(query_param("keyword", "plumber"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let filters = FilterState {
        keyword: Some("plumber".into()),
        ..FilterState::default()
    };
    let query = build_query(&filters, &UrlSeed::default(), 1, None);
    let result = client
        .search_providers(&query)
        .await
        .expect("should parse search envelope");

    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].id(), "p1");
    assert_eq!(result.pagination.total, 1);
    assert!(!result.pagination.has_more);
}

#[tokio::test]
async fn nearby_success_reshapes_into_single_page() {
    let server = MockServer::start().await;

    let rows: Vec<_> = (1..=5)
        .map(|i| provider_json(&format!("p{i}"), &format!("Provider {i}"), Some(f64::from(i))))
        .collect();

    Mock::given(method("GET"))
        .and(path("/search/nearby"))
        .and(query_param("lat", "-15.41"))
        .and(query_param("lng", "28.28"))
        .and(query_param("radius", "10"))
        .and(query_param("limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&rows))
        .expect(1)
        .mount(&server)
        .await;

    // The scoped endpoint must not be consulted on nearby success.
    Mock::given(method("GET"))
        .and(path("/search/providers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [], "pagination": { "page": 1, "limit": 12, "total": 0, "totalPages": 0, "hasMore": false }
        })))
        .expect(0)
        .mount(&server)
        .await;

    let fetcher = FallbackFetcher::new(test_client(&server.uri()));
    let filters = FilterState {
        keyword: Some("plumber".into()),
        ..FilterState::default()
    };
    let here = GeoLocation {
        latitude: -15.41,
        longitude: 28.28,
    };
    let query = build_query(&filters, &UrlSeed::default(), 1, Some(here));

    let result = fetcher.fetch_page(&query).await.expect("nearby should succeed");
    assert_eq!(result.items.len(), 5);
    assert_eq!(result.pagination.total_pages, 1);
    assert_eq!(result.pagination.total, 5);
    assert!(!result.pagination.has_more);
    assert_eq!(result.items[0].distance_km(), Some(1.0));
}

#[tokio::test]
async fn nearby_zero_rows_is_terminal_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/nearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/providers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [provider_json("stale", "Should Not Appear", None)],
            "pagination": { "page": 1, "limit": 12, "total": 1, "totalPages": 1, "hasMore": false }
        })))
        .expect(0)
        .mount(&server)
        .await;

    let fetcher = FallbackFetcher::new(test_client(&server.uri()));
    let here = GeoLocation {
        latitude: -15.41,
        longitude: 28.28,
    };
    let query = build_query(&FilterState::default(), &UrlSeed::default(), 1, Some(here));

    let result = fetcher
        .fetch_page(&query)
        .await
        .expect("zero nearby rows is a valid terminal result");
    assert!(result.is_empty());
    assert_eq!(result.pagination.total_pages, 1);
}

#[tokio::test]
async fn nearby_failure_falls_back_to_scoped_without_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/nearby"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let body = serde_json::json!({
        "results": [provider_json("p9", "Fallback Plumbing", None)],
        "pagination": { "page": 1, "limit": 12, "total": 1, "totalPages": 1, "hasMore": false }
    });

    Mock::given(method("GET"))
        .and(path("/search/providers"))
        .and(query_param("keyword", "plumber"))
        .and(NoQueryParam("lat"))
        .and(NoQueryParam("lng"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = FallbackFetcher::new(test_client(&server.uri()));
    let filters = FilterState {
        keyword: Some("plumber".into()),
        ..FilterState::default()
    };
    let here = GeoLocation {
        latitude: -15.41,
        longitude: 28.28,
    };
    let query = build_query(&filters, &UrlSeed::default(), 1, Some(here));

    let result = fetcher
        .fetch_page(&query)
        .await
        .expect("scoped fallback should succeed");
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].id(), "p9");
    // No coordinates on the fallback request, so no computed distance.
    assert_eq!(result.items[0].distance_km(), None);
}

#[tokio::test]
async fn scoped_failure_propagates_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/providers"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = FallbackFetcher::new(test_client(&server.uri()));
    let query = build_query(&FilterState::default(), &UrlSeed::default(), 1, None);

    let err = fetcher
        .fetch_page(&query)
        .await
        .expect_err("scoped failure must not be masked as empty data");
    assert!(
        matches!(err, SearchError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
}

#[tokio::test]
async fn provider_by_id_parses_entity() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/providers/p42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_json("p42", "The Answer Co", None)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let provider = client
        .provider_by_id("p42")
        .await
        .expect("should parse provider");
    assert_eq!(provider.id, "p42");
    assert_eq!(provider.name, "The Answer Co");
}

#[tokio::test]
async fn missing_provider_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/providers/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .provider_by_id("ghost")
        .await
        .expect_err("missing provider should error");
    assert!(
        matches!(err, SearchError::NotFound { .. }),
        "expected NotFound, got: {err:?}"
    );
}

#[tokio::test]
async fn entity_lookup_wraps_both_kinds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/providers/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_json("p1", "Prov", None)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/services/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "s1", "title": "Drain unblocking", "providerId": "p1"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let provider = client.provider("p1").await.expect("provider lookup");
    assert_eq!(provider.id(), "p1");
    let service = client.service("s1").await.expect("service lookup");
    assert_eq!(service.display_name(), "Drain unblocking");
}

#[tokio::test]
async fn nearby_services_parses_rows() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        { "id": "s1", "title": "Haircut", "providerId": "p1", "distance": 0.8 },
        { "id": "s2", "title": "Massage", "providerId": "p2", "distance": 2.1 }
    ]);

    Mock::given(method("GET"))
        .and(path("/search/services/nearby"))
        .and(query_param("radius", "10"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let services = client
        .nearby_services(-15.41, 28.28, 10.0, 10)
        .await
        .expect("should parse services");
    assert_eq!(services.len(), 2);
    assert_eq!(services[0].distance_km, Some(0.8));
}

#[tokio::test]
async fn list_services_parses_rows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "s1", "title": "Haircut", "providerId": "p1" }
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let services = client.list_services().await.expect("should parse services");
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].distance_km, None);
}
