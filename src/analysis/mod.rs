//! Per-article and per-batch analysis over fetched news.

use std::{collections::BTreeMap, sync::Arc};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{
    config::Settings,
    data::{Article, FetchResult, SortBy},
    nlp::{
        clean, vectorize::corpus_term_weights, Category, Entity, ImportantWord, LexicalAnalysis,
        LexicalAnalyzer, Summarizer, SummaryMethod, TextProcessor, Topic, TopicExtractor,
    },
};

pub const SUMMARY_COUNT_RANGE: (usize, usize) = (2, 5);
pub const KEYWORD_COUNT_RANGE: (usize, usize) = (5, 15);

/// Knobs for one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    pub summary_method: SummaryMethod,
    pub summary_count: usize,
    pub keyword_count: usize,
    pub max_articles: usize,
    pub lexical: bool,
    pub topics: bool,
    /// How many of the top keywords get synonym/antonym lookups.
    pub lexical_words: usize,
    pub n_topics: usize,
    pub words_per_topic: usize,
    pub key_phrase_count: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            summary_method: SummaryMethod::TextRank,
            summary_count: 3,
            keyword_count: 10,
            max_articles: 3,
            lexical: true,
            topics: true,
            lexical_words: 5,
            n_topics: 3,
            words_per_topic: 5,
            key_phrase_count: 5,
        }
    }
}

impl AnalysisOptions {
    /// Clamp user-facing counts into their supported ranges.
    pub fn normalized(mut self) -> Self {
        self.summary_count = self
            .summary_count
            .clamp(SUMMARY_COUNT_RANGE.0, SUMMARY_COUNT_RANGE.1);
        self.keyword_count = self
            .keyword_count
            .clamp(KEYWORD_COUNT_RANGE.0, KEYWORD_COUNT_RANGE.1);
        self
    }
}

/// The parameters a batch was fetched with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Query {
    Headlines {
        country: String,
        requested_category: Option<String>,
        page_size: usize,
    },
    Search {
        query: String,
        from_date: Option<String>,
        sort_by: SortBy,
    },
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleReport {
    pub article: Article,
    pub clean_content: String,
    /// Absent when the article carries no text.
    pub summary: Option<String>,
    pub important_words: Vec<ImportantWord>,
    pub entities: Vec<Entity>,
    pub lexical: Vec<LexicalAnalysis>,
    pub definitions: IndexMap<String, Vec<String>>,
    pub detected_category: Option<Category>,
    pub key_phrases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub query: Query,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub total_results: u64,
    pub articles: Vec<ArticleReport>,
    pub topics: Vec<Topic>,
    pub term_weights: BTreeMap<usize, BTreeMap<String, f64>>,
}

impl BatchReport {
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

/// Read-only NLP components built once per process.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    processor: TextProcessor,
    summarizer: Arc<Summarizer>,
    lexical: LexicalAnalyzer,
    topics: TopicExtractor,
}

impl Analyzer {
    pub fn new(
        processor: TextProcessor,
        summarizer: Summarizer,
        lexical: LexicalAnalyzer,
        topics: TopicExtractor,
    ) -> Self {
        Self {
            processor,
            summarizer: Arc::new(summarizer),
            lexical,
            topics,
        }
    }

    /// Default components with the lexicon taken from `WORDNET_DIR`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            lexical: LexicalAnalyzer::from_optional_dir(settings.wordnet_dir.as_deref()),
            ..Self::default()
        }
    }

    pub fn lexical(&self) -> &LexicalAnalyzer {
        &self.lexical
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    pub fn topics(&self) -> &TopicExtractor {
        &self.topics
    }

    /// Clean, summarise, extract keywords and entities, and optionally look up
    /// lexical relations and categorise one article.
    #[instrument(skip_all, fields(title = %article.title))]
    pub fn analyze_article(&self, article: &Article, options: &AnalysisOptions) -> ArticleReport {
        let mut report = ArticleReport {
            article: article.clone(),
            clean_content: String::new(),
            summary: None,
            important_words: Vec::new(),
            entities: Vec::new(),
            lexical: Vec::new(),
            definitions: IndexMap::new(),
            detected_category: None,
            key_phrases: Vec::new(),
        };
        let content = article.analysis_text();
        if content.trim().is_empty() {
            warn!("article has no content to analyse");
            return report;
        }

        report.clean_content = clean(content);
        let (words, entities) = self
            .processor
            .extract_important_words(&report.clean_content, options.keyword_count);
        report.summary = Some(self.summarizer.summarize(
            &report.clean_content,
            options.summary_count,
            options.summary_method,
        ));

        if options.lexical && !words.is_empty() {
            let lookups: Vec<&str> = words
                .iter()
                .take(options.lexical_words)
                .map(|w| w.word.as_str())
                .collect();
            report.lexical = self.lexical.analyze_batch(&lookups);
            for word in lookups {
                let definitions = self.lexical.definitions(word);
                if !definitions.is_empty() {
                    report.definitions.insert(word.to_string(), definitions);
                }
            }
        }

        if options.topics && !report.clean_content.is_empty() {
            report.detected_category = Some(self.topics.categorize(&report.clean_content));
            report.key_phrases = self
                .topics
                .key_phrases(&report.clean_content, options.key_phrase_count);
        }

        report.important_words = words;
        report.entities = entities;
        report
    }

    /// Analyse a local text as though it were the body of a single article.
    pub fn analyze_text(&self, text: &str, options: &AnalysisOptions) -> ArticleReport {
        let article = Article {
            title: "Local text".to_string(),
            source_name: "local".to_string(),
            content: text.to_string(),
            ..Article::default()
        };
        self.analyze_article(&article, options)
    }

    /// Analyse the first `max_articles` of a fetch and model topics across all
    /// of them. An error result is reported without any analysis.
    #[instrument(skip_all, fields(status = result.status()))]
    pub fn analyze_fetch(
        &self,
        query: Query,
        result: &FetchResult,
        options: &AnalysisOptions,
    ) -> BatchReport {
        let options = options.clone().normalized();
        let articles = match result {
            FetchResult::Error { message } => {
                warn!(%message, "fetch failed; skipping analysis");
                return BatchReport {
                    query,
                    status: result.status().to_string(),
                    message: Some(message.clone()),
                    total_results: 0,
                    articles: Vec::new(),
                    topics: Vec::new(),
                    term_weights: BTreeMap::new(),
                };
            }
            FetchResult::Ok { articles, .. } => articles,
        };

        let reports: Vec<ArticleReport> = articles
            .iter()
            .take(options.max_articles)
            .map(|article| self.analyze_article(article, &options))
            .collect();

        let corpus: Vec<&str> = articles
            .iter()
            .map(Article::corpus_text)
            .filter(|text| !text.trim().is_empty())
            .collect();
        let topics = if options.topics && corpus.len() >= 2 {
            self.topics
                .extract_topics(&corpus, options.n_topics, options.words_per_topic)
        } else {
            Vec::new()
        };
        let term_weights = if corpus.is_empty() {
            BTreeMap::new()
        } else {
            corpus_term_weights(&corpus)
        };

        info!(
            analysed = reports.len(),
            fetched = articles.len(),
            topics = topics.len(),
            "batch analysed"
        );
        BatchReport {
            query,
            status: result.status().to_string(),
            message: None,
            total_results: result.total_results(),
            articles: reports,
            topics,
            term_weights,
        }
    }
}
