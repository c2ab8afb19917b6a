//! GNews v4 request parameters and response normalisation.

use serde_json::Value;

use super::{str_field, Article, FetchResult, SortBy, SourceInfo};

/// Hard cap on `max` for the GNews free tier.
pub const MAX_PAGE_SIZE: usize = 10;
/// Category value GNews treats as "all categories".
pub const DEFAULT_CATEGORY: &str = "general";

pub const HEADLINES_ENDPOINT: &str = "top-headlines";
pub const SEARCH_ENDPOINT: &str = "search";

/// Categories accepted by the top-headlines endpoint.
pub const CATEGORIES: &[&str] = &[
    "general",
    "world",
    "nation",
    "business",
    "technology",
    "entertainment",
    "sports",
    "science",
    "health",
];

pub fn headline_params(
    token: &str,
    country: &str,
    category: Option<&str>,
    page_size: usize,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("token", token.to_string()),
        ("country", country.to_string()),
        ("max", page_size.min(MAX_PAGE_SIZE).to_string()),
        ("lang", "en".to_string()),
    ];
    if let Some(category) = category.filter(|c| !c.is_empty() && *c != DEFAULT_CATEGORY) {
        params.push(("category", category.to_string()));
    }
    params
}

pub fn search_params(
    token: &str,
    query: &str,
    from_date: Option<&str>,
    sort_by: SortBy,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("token", token.to_string()),
        ("q", query.to_string()),
        ("lang", "en".to_string()),
        ("max", MAX_PAGE_SIZE.to_string()),
        ("sortby", sort_token(sort_by).to_string()),
    ];
    if let Some(from) = from_date.filter(|f| !f.is_empty()) {
        params.push(("from", from.to_string()));
    }
    params
}

pub fn sort_token(sort_by: SortBy) -> &'static str {
    match sort_by {
        SortBy::Relevancy => "relevance",
        SortBy::PublishedAt => "publishedAt",
    }
}

/// Map a decoded GNews body into the shared [`FetchResult`] shape.
pub fn normalize(payload: &Value) -> FetchResult {
    let Some(body) = payload.as_object() else {
        return FetchResult::error("malformed provider payload: expected a JSON object");
    };
    if let Some(err) = body.get("error") {
        let message = err
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| "Unknown error from GNews API".to_string());
        return FetchResult::error(message);
    }
    if let Some(errors) = body.get("errors") {
        return FetchResult::error(provider_errors(errors));
    }

    let articles = body
        .get("articles")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(convert_article).collect())
        .unwrap_or_default();
    FetchResult::Ok {
        total_results: body
            .get("totalArticles")
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
        author: None,
        title: str_field(item, "title").unwrap_or_default(),
        description,
        url: str_field(item, "url").unwrap_or_default(),
        image_url: str_field(item, "image").unwrap_or_default(),
        published_at: str_field(item, "publishedAt").unwrap_or_default(),
        content,
    }
}

// GNews reports failures as `{"errors": [...]}` or `{"errors": {"field": "..."}}`.
fn provider_errors(errors: &Value) -> String {
    let parts: Vec<String> = match errors {
        Value::Array(items) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
            .collect(),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{k}: {}", v.as_str().unwrap_or(&v.to_string())))
            .collect(),
        Value::String(s) => vec![s.clone()],
        other => vec![other.to_string()],
    };
    if parts.is_empty() {
        "Unknown error from GNews API".to_string()
    } else {
        parts.join("; ")
    }
}

/// GNews has no sources endpoint, so the aggregator itself is the only source.
pub fn sources() -> Vec<SourceInfo> {
    vec![SourceInfo {
        id: "gnews",
        name: "GNews",
        description: "GNews aggregated sources",
    }]
}
