//! End-to-end selection against a mock photos API

use chrono::NaiveDate;
use mockito::{Matcher, Server};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rover_core::{
    fetcher::{ApiClient, FetcherConfig, PhotoSource},
    query::Query,
    report::{report, EXIT_FAILURE, EXIT_SUCCESS},
    selector::{PhotoSelector, SelectionSettings},
    Error, ErrorKind, Rover,
};
use std::time::Duration;
use url::Url;

const PHOTOS: &str = r#"{"photos": [
    {"id": 1, "sol": 1000, "img_src": "https://mars.nasa.gov/a.jpg", "earth_date": "2015-05-30",
     "camera": {"id": 20, "name": "FHAZ", "rover_id": 5, "full_name": "Front Hazard Avoidance Camera"}}
]}"#;

const EMPTY: &str = r#"{"photos": []}"#;

fn client(server: &Server) -> ApiClient {
    let config = FetcherConfig::new(Url::parse(&server.url()).unwrap(), "TEST_KEY")
        .with_timeout(Duration::from_secs(5));
    ApiClient::new(config).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

#[tokio::test]
async fn test_curiosity_success_prints_url() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/rovers/curiosity/photos")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("earth_date".into(), "2024-05-17".into()),
            Matcher::UrlEncoded("api_key".into(), "TEST_KEY".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PHOTOS)
        .expect(1)
        .create_async()
        .await;

    let mut selector = PhotoSelector::with_rover(
        client(&server),
        StdRng::seed_from_u64(1),
        Rover::Curiosity,
        SelectionSettings::default(),
    );
    let outcome = selector.run(today()).await;

    let (mut out, mut err) = (Vec::new(), Vec::new());
    assert_eq!(report(&outcome, &mut out, &mut err), EXIT_SUCCESS);
    assert_eq!(String::from_utf8(out).unwrap(), "https://mars.nasa.gov/a.jpg\n");
    assert!(err.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_spirit_falls_back_to_sol_queries() {
    let mut server = Server::new_async().await;
    let by_date = server
        .mock("GET", "/rovers/spirit/photos")
        .match_query(Matcher::Regex("earth_date=".into()))
        .with_status(200)
        .with_body(EMPTY)
        .expect(1)
        .create_async()
        .await;
    let by_sol = server
        .mock("GET", "/rovers/spirit/photos")
        .match_query(Matcher::Regex("sol=".into()))
        .with_status(200)
        .with_body(EMPTY)
        .expect(2)
        .create_async()
        .await;

    let mut selector = PhotoSelector::with_rover(
        client(&server),
        StdRng::seed_from_u64(2),
        Rover::Spirit,
        SelectionSettings::default(),
    );
    let err = selector.run(today()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NoPhotosFound);
    by_date.assert_async().await;
    by_sol.assert_async().await;
}

#[tokio::test]
async fn test_malformed_json_is_api_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rovers/opportunity/photos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>gateway hiccup</html>")
        .create_async()
        .await;

    let mut selector = PhotoSelector::with_rover(
        client(&server),
        StdRng::seed_from_u64(3),
        Rover::Opportunity,
        SelectionSettings::default(),
    );
    let outcome = selector.run(today()).await;

    let (mut out, mut err) = (Vec::new(), Vec::new());
    assert_eq!(report(&outcome, &mut out, &mut err), EXIT_FAILURE);
    assert!(out.is_empty());
    assert!(String::from_utf8(err)
        .unwrap()
        .starts_with("Error [ApiFailure]: Invalid JSON response"));
}

#[tokio::test]
async fn test_status_classification() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rovers/spirit/photos")
        .match_query(Matcher::Any)
        .with_status(429)
        .create_async()
        .await;
    server
        .mock("GET", "/rovers/opportunity/photos")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;
    server
        .mock("GET", "/rovers/curiosity/photos")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let api = client(&server);
    let err = api.fetch(Rover::Spirit, &Query::sol(5)).await.unwrap_err();
    assert!(matches!(err, Error::Api(ref m) if m.contains("rate limit")));

    let err = api.fetch(Rover::Opportunity, &Query::sol(5)).await.unwrap_err();
    assert!(matches!(err, Error::Api(ref m) if m.contains("not found")));

    let err = api.fetch(Rover::Curiosity, &Query::sol(5)).await.unwrap_err();
    assert!(matches!(err, Error::Api(ref m) if m.contains("503")));
}

#[tokio::test]
async fn test_error_field_on_success_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rovers/spirit/photos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"error": {"code": "API_KEY_MISSING", "message": "No api_key was supplied."}}"#)
        .create_async()
        .await;

    let err = client(&server)
        .fetch(Rover::Spirit, &Query::sol(1))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ApiFailure);
    assert_eq!(err.to_string(), "API error: No api_key was supplied.");
}

#[tokio::test]
async fn test_connection_refused_is_network_failure() {
    // Nothing listens on the discard port
    let config = FetcherConfig::new(Url::parse("http://127.0.0.1:9").unwrap(), "TEST_KEY")
        .with_timeout(Duration::from_secs(5));
    let api = ApiClient::new(config).unwrap();

    let err = api.fetch(Rover::Spirit, &Query::sol(1)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NetworkFailure);
}
