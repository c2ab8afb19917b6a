use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use news_lens::{
    analysis::Query as BatchQuery,
    data::{gnews, newsapi, SortBy},
    AnalysisOptions, Analyzer, FetchResult, NewsClient, Provider, Settings,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

#[derive(Clone)]
struct Stub {
    seen: Seen,
    status: StatusCode,
    body: Value,
}

async fn record(
    State(stub): State<Stub>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    stub.seen.lock().expect("lock").push(params);
    (stub.status, Json(stub.body.clone()))
}

async fn spawn_stub(status: StatusCode, body: Value) -> (String, Seen) {
    let seen: Seen = Arc::default();
    let stub = Stub {
        seen: seen.clone(),
        status,
        body,
    };
    let router = Router::new()
        .route("/top-headlines", get(record))
        .route("/search", get(record))
        .with_state(stub);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve stub");
    });
    (format!("http://{addr}"), seen)
}

fn settings(base_url: &str, key: Option<&str>) -> Settings {
    Settings {
        gnews_base_url: base_url.to_string(),
        gnews_api_key: key.map(str::to_string),
        ..Settings::default()
    }
}

fn headlines_body() -> Value {
    json!({
        "totalArticles": 2,
        "articles": [
            {
                "title": "Chip makers rally",
                "description": "Shares of chip makers rallied on Monday.",
                "content": "Shares of chip makers rallied on Monday after strong earnings.",
                "url": "https://example.com/chips",
                "image": "https://example.com/chips.png",
                "publishedAt": "2024-05-06T09:30:00Z",
                "source": { "name": "Example Wire", "url": "https://example.com" }
            },
            {
                "title": "Rain expected",
                "description": null,
                "content": "Forecasters expect heavy rain across the coast.",
                "url": "https://example.com/rain",
                "publishedAt": "2024-05-06T10:00:00Z",
                "source": { "name": "Weather Desk" }
            }
        ]
    })
}

#[tokio::test]
async fn headlines_are_normalised_and_parameters_clamped() {
    let (base, seen) = spawn_stub(StatusCode::OK, headlines_body()).await;
    let client = NewsClient::new(&settings(&base, Some("secret")), Provider::GNews).expect("client");

    let result = client.fetch_top_headlines("us", Some("general"), 50).await;

    let FetchResult::Ok {
        total_results,
        articles,
    } = &result
    else {
        panic!("expected ok result, got {result:?}");
    };
    assert_eq!(*total_results, 2);
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].source_name, "Example Wire");
    assert_eq!(articles[0].image_url, "https://example.com/chips.png");
    assert_eq!(articles[0].published_date(), "2024-05-06");
    assert_eq!(articles[1].description, "");
    assert_eq!(articles[1].image_url, "");

    let seen = seen.lock().expect("lock");
    assert_eq!(seen.len(), 1);
    let params = &seen[0];
    assert_eq!(params["token"], "secret");
    assert_eq!(params["country"], "us");
    assert_eq!(params["max"], "10");
    assert_eq!(params["lang"], "en");
    assert!(!params.contains_key("category"));
}

#[tokio::test]
async fn search_sends_query_and_sort_order() {
    let (base, seen) = spawn_stub(StatusCode::OK, json!({ "totalArticles": 0, "articles": [] })).await;
    let client = NewsClient::new(&settings(&base, Some("secret")), Provider::GNews).expect("client");

    let result = client
        .search("rust lang", Some("2024-05-01"), SortBy::PublishedAt)
        .await;

    assert!(result.is_ok());
    assert!(result.articles().is_empty());
    let seen = seen.lock().expect("lock");
    assert_eq!(seen[0]["q"], "rust lang");
    assert_eq!(seen[0]["from"], "2024-05-01");
    assert_eq!(seen[0]["sortby"], "publishedAt");
}

#[tokio::test]
async fn http_failure_becomes_error_result_without_analysis() {
    let (base, _seen) = spawn_stub(
        StatusCode::UNAUTHORIZED,
        json!({ "errors": ["You did not provide an API key."] }),
    )
    .await;
    let client = NewsClient::new(&settings(&base, Some("bad")), Provider::GNews).expect("client");

    let result = client.fetch_top_headlines("us", None, 5).await;

    let message = result.message().expect("error message");
    assert!(message.starts_with("HTTP Error 401"), "{message}");

    let report = Analyzer::default().analyze_fetch(
        BatchQuery::Text,
        &result,
        &AnalysisOptions::default(),
    );
    assert!(report.is_error());
    assert!(report.articles.is_empty());
    assert!(report.topics.is_empty());
}

#[tokio::test]
async fn missing_key_short_circuits_before_any_request() {
    let (base, seen) = spawn_stub(StatusCode::OK, headlines_body()).await;
    let client = NewsClient::new(&settings(&base, None), Provider::GNews).expect("client");

    let result = client.fetch_top_headlines("us", None, 5).await;

    let message = result.message().expect("error message");
    assert!(message.contains("GNEWS_API_KEY"), "{message}");
    assert!(seen.lock().expect("lock").is_empty());
}

#[test]
fn gnews_error_payloads_are_folded_into_messages() {
    let result = gnews::normalize(&json!({ "errors": ["Daily quota exceeded"] }));
    assert_eq!(result, FetchResult::error("Daily quota exceeded"));

    let result = gnews::normalize(&json!({ "errors": { "country": "invalid value" } }));
    assert_eq!(result.message(), Some("country: invalid value"));

    let result = gnews::normalize(&json!([1, 2]));
    assert_eq!(result.status(), "error");
}

#[test]
fn newsapi_payloads_are_normalised() {
    let result = newsapi::normalize(&json!({
        "status": "ok",
        "totalResults": 1,
        "articles": [{
            "source": { "id": null, "name": "Daily Planet" },
            "author": "Lois Lane",
            "title": "City council votes",
            "description": "The council voted on the budget.",
            "url": "https://example.com/council",
            "urlToImage": null,
            "publishedAt": "2024-05-06T08:00:00Z",
            "content": null
        }]
    }));
    let articles = result.articles();
    assert_eq!(result.total_results(), 1);
    assert_eq!(articles[0].author.as_deref(), Some("Lois Lane"));
    assert_eq!(articles[0].content, "The council voted on the budget.");

    let result = newsapi::normalize(&json!({
        "status": "error",
        "code": "apiKeyInvalid",
        "message": "Your API key is invalid."
    }));
    assert_eq!(result.message(), Some("Your API key is invalid."));
}

#[test]
fn newsapi_page_size_is_clamped() {
    let params = newsapi::headline_params("k", "gb", Some("sports"), 500);
    assert!(params.contains(&("pageSize", "100".to_string())));
    assert!(params.contains(&("category", "sports".to_string())));
}
