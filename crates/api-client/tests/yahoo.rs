//! HTTP tests for the Yahoo chart client against a mocked endpoint.

use api_client::{Error, PriceSource, YahooClient};
use app_config::MarketDataSettings;
use chrono::NaiveDate;
use core_types::Symbol;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn client_for(server: &MockServer, use_adjusted_close: bool) -> YahooClient {
    YahooClient::new(&MarketDataSettings {
        base_url: server.uri(),
        timeout_secs: 5,
        use_adjusted_close,
        user_agent: "macross-tests".to_string(),
    })
    .expect("client builds")
}

fn chart_body() -> serde_json::Value {
    json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "GOOGL", "currency": "USD", "gmtoffset": -18000 },
                "timestamp": [1704205800, 1704292200, 1704378600, 1704465000],
                "indicators": {
                    "quote": [{ "close": [139.56, 138.92, null, 135.73] }],
                    "adjclose": [{ "adjclose": [139.30, 138.66, null, 135.47] }]
                }
            }],
            "error": null
        }
    })
}

#[tokio::test]
async fn fetches_closes_for_the_requested_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/GOOGL"))
        .and(query_param("interval", "1d"))
        .and(query_param("period1", "1704067200"))
        .and(query_param("period2", "1704499200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, false);
    let series = client
        .fetch_daily_closes(&Symbol("GOOGL".to_string()), date(2024, 1, 1), date(2024, 1, 5))
        .await
        .expect("fetch succeeds");

    let dates: Vec<NaiveDate> = series.points().iter().map(|p| p.timestamp).collect();
    assert_eq!(dates, vec![date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 5)]);
    assert_eq!(series.first().unwrap().close, 139.56);
}

#[tokio::test]
async fn uses_adjusted_closes_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/GOOGL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body()))
        .mount(&server)
        .await;

    let client = client_for(&server, true);
    let series = client
        .fetch_daily_closes(&Symbol("GOOGL".to_string()), date(2024, 1, 1), date(2024, 1, 5))
        .await
        .expect("fetch succeeds");

    assert_eq!(series.len(), 3);
    assert_eq!(series.last().unwrap().close, 135.47);
}

#[tokio::test]
async fn unknown_symbol_yields_an_empty_series() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/NOPE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, true);
    let series = client
        .fetch_daily_closes(&Symbol("NOPE".to_string()), date(2024, 1, 1), date(2024, 1, 5))
        .await
        .expect("unknown symbol is not an error");

    assert!(series.is_empty());
}

#[tokio::test]
async fn other_api_errors_are_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/GOOGL"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "chart": {
                "result": null,
                "error": { "code": "Bad Request", "description": "Invalid input - interval=1d is not supported" }
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, true);
    let err = client
        .fetch_daily_closes(&Symbol("GOOGL".to_string()), date(2024, 1, 1), date(2024, 1, 5))
        .await
        .unwrap_err();

    match err {
        Error::ApiError { code, .. } => assert_eq!(code, "Bad Request"),
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_range_result_yields_an_empty_series() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/GOOGL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "chart": {
                "result": [{
                    "meta": { "symbol": "GOOGL", "gmtoffset": -18000 },
                    "indicators": { "quote": [{}] }
                }],
                "error": null
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, true);
    let series = client
        .fetch_daily_closes(&Symbol("GOOGL".to_string()), date(2024, 1, 6), date(2024, 1, 7))
        .await
        .expect("fetch succeeds");

    assert!(series.is_empty());
}

#[tokio::test]
async fn garbage_body_is_a_deserialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, true);
    let result = client
        .fetch_daily_closes(&Symbol("GOOGL".to_string()), date(2024, 1, 1), date(2024, 1, 5))
        .await;

    assert!(matches!(result, Err(Error::DeserializationFailed(_))));
}
