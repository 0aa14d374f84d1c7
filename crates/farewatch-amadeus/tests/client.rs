//! Integration tests for `AmadeusClient` using wiremock HTTP mocks.

use farewatch_amadeus::{select_cheapest, AmadeusClient, AmadeusError, BestOffer, OfferQuery};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> AmadeusClient {
    AmadeusClient::with_base_url("test-key", "test-secret", 30, base_url)
        .expect("client construction should not fail")
        .with_retry_policy(2, 0)
}

fn test_query() -> OfferQuery {
    OfferQuery {
        origin: "LON".to_string(),
        destination: "PAR".to_string(),
        departure_date: chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        return_date: chrono::NaiveDate::from_ymd_opt(2025, 11, 28).unwrap(),
        non_stop_only: false,
        currency: "GBP".to_string(),
        max_offers: 10,
    }
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/security/oauth2/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok-123",
            "token_type": "Bearer",
            "expires_in": 1799
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn city_code_returns_first_match() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/reference-data/locations/cities"))
        .and(query_param("keyword", "Paris"))
        .and(query_param("max", "2"))
        .and(query_param("include", "AIRPORTS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                { "iataCode": "PAR", "name": "PARIS" },
                { "iataCode": "PHT", "name": "PARIS/KY" }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let code = client.city_code("Paris").await.expect("lookup should work");
    assert_eq!(code.as_deref(), Some("PAR"));
}

#[tokio::test]
async fn city_code_with_no_match_is_none() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/reference-data/locations/cities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let code = client
        .city_code("Atlantis")
        .await
        .expect("empty result is not an error");
    assert!(code.is_none());
}

#[tokio::test]
async fn search_offers_parses_offers_and_selector_picks_cheapest() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/shopping/flight-offers"))
        .and(query_param("originLocationCode", "LON"))
        .and(query_param("destinationLocationCode", "PAR"))
        .and(query_param("departureDate", "2025-06-01"))
        .and(query_param("returnDate", "2025-11-28"))
        .and(query_param("adults", "1"))
        .and(query_param("nonStop", "false"))
        .and(query_param("currencyCode", "GBP"))
        .and(query_param("max", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "price": { "grandTotal": "120.50", "currency": "GBP" },
                    "itineraries": [
                        { "segments": [ {
                            "departure": { "iataCode": "LON", "at": "2025-06-01T09:15:00" },
                            "arrival": { "iataCode": "PAR", "at": "2025-06-01T11:30:00" }
                        } ] },
                        { "segments": [ {
                            "departure": { "iataCode": "PAR", "at": "2025-11-28T17:00:00" },
                            "arrival": { "iataCode": "LON", "at": "2025-11-28T18:15:00" }
                        } ] }
                    ]
                },
                {
                    "price": { "grandTotal": "95.00", "currency": "GBP" },
                    "itineraries": [
                        { "segments": [ {
                            "departure": { "iataCode": "LON", "at": "2025-06-01T06:40:00" },
                            "arrival": { "iataCode": "PAR", "at": "2025-06-01T08:55:00" }
                        } ] },
                        { "segments": [ {
                            "departure": { "iataCode": "PAR", "at": "2025-11-28T20:30:00" },
                            "arrival": { "iataCode": "LON", "at": "2025-11-28T21:45:00" }
                        } ] }
                    ]
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client
        .search_offers(&test_query())
        .await
        .expect("search should parse");
    assert_eq!(response.data.len(), 2);

    match select_cheapest(Some(&response)) {
        BestOffer::Found(fare) => {
            assert_eq!(fare.price.to_string(), "95.00");
            assert_eq!(fare.origin, "LON");
            assert_eq!(fare.destination, "PAR");
            assert_eq!(fare.stops, 0);
        }
        BestOffer::Unavailable => panic!("expected a fare"),
    }
}

#[tokio::test]
async fn search_offers_empty_data_is_ok_and_unavailable() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/shopping/flight-offers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client.search_offers(&test_query()).await.expect("valid response");
    assert_eq!(select_cheapest(Some(&response)), BestOffer::Unavailable);
}

#[tokio::test]
async fn search_offers_surfaces_api_errors_with_body() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/shopping/flight-offers"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "errors": [ { "status": 400, "title": "INVALID DATE" } ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_offers(&test_query())
        .await
        .expect_err("400 should be an error");
    match err {
        AmadeusError::Api { status, body, .. } => {
            assert_eq!(status, 400);
            assert!(body.contains("INVALID DATE"), "body should be preserved: {body}");
        }
        other => panic!("expected Api error, got: {other}"),
    }
}

#[tokio::test]
async fn rejected_credentials_surface_as_token_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/security/oauth2/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "invalid_client"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .city_code("Paris")
        .await
        .expect_err("rejected credentials should fail");
    assert!(matches!(err, AmadeusError::Token(_)), "got: {err}");
}

#[tokio::test]
async fn token_is_fetched_once_and_reused() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/security/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok-once",
            "token_type": "Bearer",
            "expires_in": 1799
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/reference-data/locations/cities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client.city_code("Paris").await.expect("first call");
    client.city_code("Berlin").await.expect("second call");
}

#[tokio::test]
async fn transient_server_errors_are_retried() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/reference-data/locations/cities"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/reference-data/locations/cities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [ { "iataCode": "BER" } ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let code = client
        .city_code("Berlin")
        .await
        .expect("should succeed after one retry");
    assert_eq!(code.as_deref(), Some("BER"));
}
