//! HTTP route handlers for Axum.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tokio::task;
use tracing::warn;

use crate::{
    analysis::{self, ArticleReport, BatchReport},
    data::{NewsClient, Provider, SourceInfo},
    nlp::DictionaryEntry,
};

use super::{
    types::{AnalysisParams, AnalyzeRequest, HeadlinesParams, ProviderParams, SearchParams},
    AppState,
};

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

pub async fn headlines(
    State(state): State<AppState>,
    Query(params): Query<HeadlinesParams>,
    Query(overrides): Query<AnalysisParams>,
) -> ApiResult<BatchReport> {
    let client = client(&state, params.provider)?;
    let country = params
        .country
        .unwrap_or_else(|| state.settings.default_country.clone());
    let page_size = params.page_size.unwrap_or(state.settings.default_page_size);
    let result = client
        .fetch_top_headlines(&country, params.category.as_deref(), page_size)
        .await;

    let query = analysis::Query::Headlines {
        country,
        requested_category: params.category,
        page_size,
    };
    let options = overrides.options();
    let analyzer = state.analyzer.clone();
    let report = task::spawn_blocking(move || analyzer.analyze_fetch(query, &result, &options))
        .await
        .map_err(internal)?;
    Ok(Json(report))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
    Query(overrides): Query<AnalysisParams>,
) -> ApiResult<BatchReport> {
    if params.q.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "query parameter q must not be empty".into()));
    }
    let client = client(&state, params.provider)?;
    let result = client
        .search(&params.q, params.from.as_deref(), params.sort_by)
        .await;

    let query = analysis::Query::Search {
        query: params.q,
        from_date: params.from,
        sort_by: params.sort_by,
    };
    let options = overrides.options();
    let analyzer = state.analyzer.clone();
    let report = task::spawn_blocking(move || analyzer.analyze_fetch(query, &result, &options))
        .await
        .map_err(internal)?;
    Ok(Json(report))
}

pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<ArticleReport> {
    let options = request.options.normalized();
    let analyzer = state.analyzer.clone();
    let report = task::spawn_blocking(move || analyzer.analyze_text(&request.text, &options))
        .await
        .map_err(internal)?;
    Ok(Json(report))
}

pub async fn define(
    State(state): State<AppState>,
    Path(word): Path<String>,
) -> ApiResult<DictionaryEntry> {
    Ok(Json(state.analyzer.lexical().entry(word.trim())))
}

pub async fn sources(
    State(state): State<AppState>,
    Query(params): Query<ProviderParams>,
) -> ApiResult<Vec<SourceInfo>> {
    Ok(Json(client(&state, params.provider)?.sources()))
}

fn client(state: &AppState, provider: Option<Provider>) -> Result<NewsClient, (StatusCode, String)> {
    let provider = provider.unwrap_or(state.settings.provider);
    NewsClient::new(&state.settings, provider).map_err(internal)
}

fn internal(err: impl std::fmt::Display) -> (StatusCode, String) {
    warn!(error = %err, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
