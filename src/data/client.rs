//! HTTP client for the news providers.
//!
//! Every request is a single GET bounded by the configured timeout. Transport,
//! status and payload failures are folded into [`FetchResult::Error`]; nothing
//! past this boundary sees a raised error.

use reqwest::Client;
use serde_json::Value;
use tracing::{info, instrument, warn};
use urlencoding::encode;

use crate::{config::Settings, error::FetchError};

use super::{gnews, newsapi, FetchResult, Provider, SortBy, SourceInfo};

/// Provider client holding the resolved key, endpoint and HTTP pool.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: Client,
    provider: Provider,
    base_url: String,
    api_key: Option<String>,
}

impl NewsClient {
    pub fn new(settings: &Settings, provider: Provider) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(concat!("news-lens/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .timeout(settings.http_timeout())
            .build()?;
        Ok(Self {
            http,
            provider,
            base_url: settings.base_url(provider).trim_end_matches('/').to_string(),
            api_key: settings.api_key(provider).map(str::to_string),
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Top headlines for a country, optionally narrowed to one category.
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn fetch_top_headlines(
        &self,
        country: &str,
        category: Option<&str>,
        page_size: usize,
    ) -> FetchResult {
        let key = match self.key() {
            Ok(key) => key,
            Err(err) => return failed(err),
        };
        let (endpoint, params) = match self.provider {
            Provider::GNews => (
                gnews::HEADLINES_ENDPOINT,
                gnews::headline_params(key, country, category, page_size),
            ),
            Provider::NewsApi => (
                newsapi::HEADLINES_ENDPOINT,
                newsapi::headline_params(key, country, category, page_size),
            ),
        };
        self.fetch(endpoint, &params).await
    }

    /// Free-text search across the provider's index.
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn search(
        &self,
        query: &str,
        from_date: Option<&str>,
        sort_by: SortBy,
    ) -> FetchResult {
        let key = match self.key() {
            Ok(key) => key,
            Err(err) => return failed(err),
        };
        let (endpoint, params) = match self.provider {
            Provider::GNews => (
                gnews::SEARCH_ENDPOINT,
                gnews::search_params(key, query, from_date, sort_by),
            ),
            Provider::NewsApi => (
                newsapi::SEARCH_ENDPOINT,
                newsapi::search_params(key, query, from_date, sort_by),
            ),
        };
        self.fetch(endpoint, &params).await
    }

    /// Sources exposed by the provider.
    pub fn sources(&self) -> Vec<SourceInfo> {
        match self.provider {
            Provider::GNews => gnews::sources(),
            Provider::NewsApi => vec![SourceInfo {
                id: "newsapi",
                name: "NewsAPI",
                description: "NewsAPI.org aggregated sources",
            }],
        }
    }

    fn key(&self) -> Result<&str, FetchError> {
        self.api_key
            .as_deref()
            .ok_or(FetchError::MissingApiKey {
                provider: self.provider.name(),
                env_var: self.provider.env_var(),
            })
    }

    async fn fetch(&self, endpoint: &str, params: &[(&'static str, String)]) -> FetchResult {
        let payload = match self.get_json(endpoint, params).await {
            Ok(payload) => payload,
            Err(err) => return failed(err),
        };
        let result = match self.provider {
            Provider::GNews => gnews::normalize(&payload),
            Provider::NewsApi => newsapi::normalize(&payload),
        };
        match &result {
            FetchResult::Ok {
                total_results,
                articles,
            } => info!(total_results, count = articles.len(), "fetched articles"),
            FetchResult::Error { message } => warn!(%message, "provider returned an error"),
        }
        result
    }

    async fn get_json(
        &self,
        endpoint: &str,
        params: &[(&'static str, String)],
    ) -> Result<Value, FetchError> {
        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={}", encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("{base}/{endpoint}?{query}", base = self.base_url);
        // Drop the URL from transport errors so the key never reaches the logs.
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.without_url()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                code: status.as_u16(),
                body,
            });
        }
        let text = resp
            .text()
            .await
            .map_err(|err| FetchError::Transport(err.without_url()))?;
        serde_json::from_str(&text).map_err(|err| FetchError::Decode(err.to_string()))
    }
}

fn failed(err: FetchError) -> FetchResult {
    warn!(error = %err, "fetch failed");
    FetchResult::error(err.to_string())
}
