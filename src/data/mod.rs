//! Article ingestion layer: provider clients and the normalised article schema.

pub mod client;
pub mod gnews;
pub mod newsapi;

use chrono::DateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use client::NewsClient;

/// Upstream aggregation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// gnews.io v4, the default provider.
    #[value(name = "gnews")]
    GNews,
    /// newsapi.org v2.
    #[value(name = "newsapi")]
    NewsApi,
}

impl Provider {
    pub fn name(self) -> &'static str {
        match self {
            Self::GNews => "GNews",
            Self::NewsApi => "NewsAPI",
        }
    }

    pub fn env_var(self) -> &'static str {
        match self {
            Self::GNews => "GNEWS_API_KEY",
            Self::NewsApi => "NEWS_API_KEY",
        }
    }
}

/// Ordering requested from the search endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum SortBy {
    #[default]
    #[serde(rename = "relevancy")]
    #[value(name = "relevancy")]
    Relevancy,
    #[serde(rename = "publishedAt")]
    #[value(name = "publishedAt", alias = "published-at")]
    PublishedAt,
}

/// Normalised article record shared by every provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub source_name: String,
    pub author: Option<String>,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
    pub published_at: String,
    pub content: String,
}

impl Article {
    /// Publication day as `YYYY-MM-DD`.
    pub fn published_date(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.published_at) {
            Ok(ts) => ts.date_naive().to_string(),
            Err(_) => self.published_at.chars().take(10).collect(),
        }
    }

    /// Text used for per-article analysis: the description, else the content.
    pub fn analysis_text(&self) -> &str {
        if self.description.trim().is_empty() {
            &self.content
        } else {
            &self.description
        }
    }

    /// Text used for cross-article topic modelling: the content, else the description.
    pub fn corpus_text(&self) -> &str {
        if self.content.trim().is_empty() {
            &self.description
        } else {
            &self.content
        }
    }
}

/// Outcome of a single provider request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FetchResult {
    Ok {
        total_results: u64,
        articles: Vec<Article>,
    },
    Error {
        message: String,
    },
}

impl FetchResult {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Ok { .. } => "ok",
            Self::Error { .. } => "error",
        }
    }

    /// Articles of a successful fetch; always empty for errors.
    pub fn articles(&self) -> &[Article] {
        match self {
            Self::Ok { articles, .. } => articles,
            Self::Error { .. } => &[],
        }
    }

    pub fn total_results(&self) -> u64 {
        match self {
            Self::Ok { total_results, .. } => *total_results,
            Self::Error { .. } => 0,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Ok { .. } => None,
            Self::Error { message } => Some(message),
        }
    }
}

/// Static description of an upstream source.
#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Read a string field from a provider object, treating `null` as absent.
pub(crate) fn str_field(value: &serde_json::Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}
