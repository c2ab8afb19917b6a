//! Request parameters for the JSON API.

use serde::Deserialize;

use crate::{
    analysis::AnalysisOptions,
    data::{Provider, SortBy},
    nlp::SummaryMethod,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeadlinesParams {
    pub country: Option<String>,
    pub category: Option<String>,
    pub page_size: Option<usize>,
    pub provider: Option<Provider>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub from: Option<String>,
    #[serde(default)]
    pub sort_by: SortBy,
    pub provider: Option<Provider>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderParams {
    pub provider: Option<Provider>,
}

/// Optional analysis overrides accepted as query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisParams {
    pub summary_method: Option<SummaryMethod>,
    pub summary_count: Option<usize>,
    pub keyword_count: Option<usize>,
    pub max_articles: Option<usize>,
    pub lexical: Option<bool>,
    pub topics: Option<bool>,
}

impl AnalysisParams {
    pub fn options(&self) -> AnalysisOptions {
        let defaults = AnalysisOptions::default();
        AnalysisOptions {
            summary_method: self.summary_method.unwrap_or(defaults.summary_method),
            summary_count: self.summary_count.unwrap_or(defaults.summary_count),
            keyword_count: self.keyword_count.unwrap_or(defaults.keyword_count),
            max_articles: self.max_articles.unwrap_or(defaults.max_articles),
            lexical: self.lexical.unwrap_or(defaults.lexical),
            topics: self.topics.unwrap_or(defaults.topics),
            ..defaults
        }
        .normalized()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub options: AnalysisOptions,
}
