//! Runtime configuration utilities for news-lens.

use std::{env, path::PathBuf, time::Duration};

use anyhow::bail;
use serde::Deserialize;

use crate::data::Provider;

pub const GNEWS_BASE_URL: &str = "https://gnews.io/api/v4";
pub const NEWS_API_BASE_URL: &str = "https://newsapi.org/v2";

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Token for the GNews API.
    pub gnews_api_key: Option<String>,
    /// Key for the NewsAPI.org API.
    pub news_api_key: Option<String>,
    /// Provider queried when the CLI does not override it.
    pub provider: Provider,
    pub gnews_base_url: String,
    pub news_api_base_url: String,
    /// Timeout applied uniformly to every provider request.
    pub http_timeout_secs: u64,
    pub default_country: String,
    pub default_page_size: usize,
    /// Folder holding the WordNet database files (`index.noun`, `data.noun`, ...).
    pub wordnet_dir: Option<PathBuf>,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let provider = match env::var("NEWS_PROVIDER") {
            Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "gnews" => Provider::GNews,
                "newsapi" => Provider::NewsApi,
                other => bail!("unknown NEWS_PROVIDER {other:?}; expected gnews or newsapi"),
            },
            Err(_) => Provider::GNews,
        };
        let http_timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        let default_page_size = env::var("DEFAULT_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            gnews_api_key: secret("GNEWS_API_KEY"),
            news_api_key: secret("NEWS_API_KEY"),
            provider,
            gnews_base_url: env::var("GNEWS_BASE_URL")
                .unwrap_or_else(|_| GNEWS_BASE_URL.to_string()),
            news_api_base_url: env::var("NEWS_API_BASE_URL")
                .unwrap_or_else(|_| NEWS_API_BASE_URL.to_string()),
            http_timeout_secs,
            default_country: env::var("DEFAULT_COUNTRY").unwrap_or_else(|_| "in".to_string()),
            default_page_size,
            wordnet_dir: env::var("WORDNET_DIR").ok().map(PathBuf::from),
        })
    }

    /// Convenience helper for the request timeout.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }

    /// Key for the given provider, if one was configured.
    pub fn api_key(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::GNews => self.gnews_api_key.as_deref(),
            Provider::NewsApi => self.news_api_key.as_deref(),
        }
    }

    /// Base URL for the given provider.
    pub fn base_url(&self, provider: Provider) -> &str {
        match provider {
            Provider::GNews => &self.gnews_base_url,
            Provider::NewsApi => &self.news_api_base_url,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gnews_api_key: None,
            news_api_key: None,
            provider: Provider::GNews,
            gnews_base_url: GNEWS_BASE_URL.to_string(),
            news_api_base_url: NEWS_API_BASE_URL.to_string(),
            http_timeout_secs: 30,
            default_country: "in".to_string(),
            default_page_size: 10,
            wordnet_dir: None,
        }
    }
}

fn secret(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
