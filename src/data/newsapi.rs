//! NewsAPI.org v2 request parameters and response normalisation.

use serde_json::Value;

use super::{str_field, Article, FetchResult, SortBy};

pub const MAX_PAGE_SIZE: usize = 100;
pub const DEFAULT_CATEGORY: &str = "general";

pub const HEADLINES_ENDPOINT: &str = "top-headlines";
pub const SEARCH_ENDPOINT: &str = "everything";

pub fn headline_params(
    api_key: &str,
    country: &str,
    category: Option<&str>,
    page_size: usize,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("apiKey", api_key.to_string()),
        ("country", country.to_string()),
        ("pageSize", page_size.clamp(1, MAX_PAGE_SIZE).to_string()),
    ];
    if let Some(category) = category.filter(|c| !c.is_empty() && *c != DEFAULT_CATEGORY) {
        params.push(("category", category.to_string()));
    }
    params
}

pub fn search_params(
    api_key: &str,
    query: &str,
    from_date: Option<&str>,
    sort_by: SortBy,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("apiKey", api_key.to_string()),
        ("q", query.to_string()),
        ("language", "en".to_string()),
        ("sortBy", sort_token(sort_by).to_string()),
    ];
    if let Some(from) = from_date.filter(|f| !f.is_empty()) {
        params.push(("from", from.to_string()));
    }
    params
}

pub fn sort_token(sort_by: SortBy) -> &'static str {
    match sort_by {
        SortBy::Relevancy => "relevancy",
        SortBy::PublishedAt => "publishedAt",
    }
}

/// Map a decoded NewsAPI body into the shared [`FetchResult`] shape.
pub fn normalize(payload: &Value) -> FetchResult {
    let Some(body) = payload.as_object() else {
        return FetchResult::error("malformed provider payload: expected a JSON object");
    };
    let failed = body.get("status").and_then(Value::as_str) == Some("error");
    if failed || body.contains_key("error") {
        let message = str_field(payload, "message")
            .or_else(|| str_field(payload, "error"))
            .unwrap_or_else(|| "Unknown error from NewsAPI".to_string());
        return FetchResult::error(message);
    }

    let articles = body
        .get("articles")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(convert_article).collect())
        .unwrap_or_default();
    FetchResult::Ok {
        total_results: body
            .get("totalResults")
            .and_then(Value::as_u64)
            .unwrap_or(0),
        articles,
    }
}

fn convert_article(item: &Value) -> Article {
    let description = str_field(item, "description").unwrap_or_default();
    let content = str_field(item, "content").unwrap_or_else(|| description.clone());
    Article {
        source_name: item
            .get("source")
            .and_then(|s| str_field(s, "name"))
            .unwrap_or_else(|| "Unknown".to_string()),
        author: str_field(item, "author").filter(|a| !a.trim().is_empty()),
        title: str_field(item, "title").unwrap_or_default(),
        description,
        url: str_field(item, "url").unwrap_or_default(),
        image_url: str_field(item, "urlToImage").unwrap_or_default(),
        published_at: str_field(item, "publishedAt").unwrap_or_default(),
        content,
    }
}
