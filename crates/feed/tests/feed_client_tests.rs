use axum::Router;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Json;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;
use stockpick_core::feed::error::FeedError;
use stockpick_core::stock::entity::Rating;
use stockpick_core::stock::port::StockFeed;
use stockpick_feed::client::AnalystFeedClient;
use tokio::net::TcpListener;

const TOKEN: &str = "test-token";

fn item(ticker: &str, from: &str, to: &str) -> Value {
    json!({
        "ticker": ticker,
        "target_from": from,
        "target_to": to,
        "company": format!("{ticker} Inc."),
        "action": "target raised by",
        "brokerage": "Morgan Stanley",
        "rating_from": "Hold",
        "rating_to": "Buy",
        "time": "2026-09-01T12:30:00Z"
    })
}

/// 两页数据的模拟评级接口，校验 Bearer 令牌
async fn paged_list(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"));
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let body = match params.get("next_page").map(String::as_str) {
        None => json!({
            "items": [item("AAPL", "$1,234.50", "$1,300.00"), item("TSLA", "$200", "$250")],
            "next_page": "TSLA"
        }),
        Some("TSLA") => json!({
            "items": [item("SAP", "180 EUR", "210 EUR")],
            "next_page": ""
        }),
        Some(_) => return StatusCode::BAD_REQUEST.into_response(),
    };
    Json(body).into_response()
}

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str, token: &str) -> AnalystFeedClient {
    AnalystFeedClient::new(base_url, token, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_follows_pagination() -> anyhow::Result<()> {
    let base = spawn(Router::new().route("/list", get(paged_list))).await;

    let stocks = client(&base, TOKEN).fetch_stocks().await?;
    let tickers: Vec<_> = stocks.iter().map(|s| s.ticker.as_str()).collect();
    assert_eq!(tickers, ["AAPL", "TSLA", "SAP"]);

    let aapl = &stocks[0];
    assert_eq!(aapl.target.from.amount, dec!(1234.50));
    assert_eq!(aapl.target.to.currency, "USD");
    assert_eq!(aapl.rating.to, Rating::Buy);
    assert_eq!(aapl.brokerage, "Morgan Stanley");
    assert_eq!(aapl.observed_at.to_rfc3339(), "2026-09-01T12:30:00+00:00");

    assert_eq!(stocks[2].target.to.currency, "EUR");
    Ok(())
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let base = spawn(Router::new().route("/list", get(paged_list))).await;
    let stocks = client(&format!("{base}/"), TOKEN).fetch_stocks().await.unwrap();
    assert_eq!(stocks.len(), 3);
}

#[tokio::test]
async fn test_wrong_token_is_network_error() {
    let base = spawn(Router::new().route("/list", get(paged_list))).await;
    let result = client(&base, "wrong").fetch_stocks().await;
    match result {
        Err(FeedError::Network(msg)) => assert!(msg.contains("401"), "{msg}"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_bad_money_is_parse_error() {
    let app = Router::new().route(
        "/list",
        get(|| async { Json(json!({ "items": [item("BAD", "n/a", "$10")] })) }),
    );
    let base = spawn(app).await;
    let result = client(&base, TOKEN).fetch_stocks().await;
    assert!(matches!(result, Err(FeedError::Parse(_))));
}

#[tokio::test]
async fn test_empty_ticker_is_parse_error() {
    let app = Router::new().route(
        "/list",
        get(|| async { Json(json!({ "items": [item("", "$10", "$12")] })) }),
    );
    let base = spawn(app).await;
    let result = client(&base, TOKEN).fetch_stocks().await;
    assert!(matches!(result, Err(FeedError::Parse(_))));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let app = Router::new().route("/list", get(|| async { "not json" }));
    let base = spawn(app).await;
    let result = client(&base, TOKEN).fetch_stocks().await;
    assert!(matches!(result, Err(FeedError::Parse(_))));
}

#[test]
fn test_empty_base_url_is_config_error() {
    let result = AnalystFeedClient::new("", TOKEN, Duration::from_secs(1));
    assert!(matches!(result, Err(FeedError::Config(_))));
}
