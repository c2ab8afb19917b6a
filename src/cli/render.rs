//! Plain-text and JSON rendering of reports for the terminal.

use std::fmt;

use anyhow::Result;
use serde::Serialize;

use crate::{
    analysis::{ArticleReport, BatchReport},
    nlp::{Category, DictionaryEntry},
};

pub fn print_batch(report: &BatchReport, json: bool) -> Result<()> {
    emit(report, json, BatchText(report))
}

pub fn print_article(report: &ArticleReport, json: bool) -> Result<()> {
    emit(report, json, ArticleText { index: None, report })
}

pub fn print_definition(entry: &DictionaryEntry, json: bool) -> Result<()> {
    emit(entry, json, EntryText(entry))
}

fn emit<T: Serialize, D: fmt::Display>(value: &T, json: bool, text: D) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{text}");
    }
    Ok(())
}

/// Human-readable batch report.
pub struct BatchText<'a>(pub &'a BatchReport);

impl fmt::Display for BatchText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        if report.is_error() {
            let message = report.message.as_deref().unwrap_or("Unknown error");
            return writeln!(f, "API Error: {message}");
        }
        if report.articles.is_empty() {
            return writeln!(f, "No articles found");
        }
        writeln!(f, "{} result(s) available", report.total_results)?;
        for (idx, article) in report.articles.iter().enumerate() {
            writeln!(f)?;
            write!(
                f,
                "{}",
                ArticleText {
                    index: Some(idx + 1),
                    report: article,
                }
            )?;
        }
        if !report.topics.is_empty() {
            writeln!(f)?;
            writeln!(f, "Overall topics")?;
            for topic in &report.topics {
                writeln!(
                    f,
                    "  Topic {}: {} (weight {:.3})",
                    topic.topic_id + 1,
                    topic.words.join(", "),
                    topic.weight
                )?;
            }
        }
        Ok(())
    }
}

/// Human-readable single article report.
pub struct ArticleText<'a> {
    pub index: Option<usize>,
    pub report: &'a ArticleReport,
}

impl fmt::Display for ArticleText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let article = &report.article;
        match self.index {
            Some(idx) => writeln!(f, "Article {idx}: {}", article.title)?,
            None => writeln!(f, "{}", article.title)?,
        }
        if !article.published_at.is_empty() {
            writeln!(
                f,
                "Source: {} | Published: {}",
                article.source_name,
                article.published_date()
            )?;
        }
        if !article.url.is_empty() {
            writeln!(f, "URL: {}", article.url)?;
        }

        let Some(summary) = &report.summary else {
            return writeln!(f, "No content available for this article");
        };
        writeln!(f, "Summary:\n  {summary}")?;

        if !report.important_words.is_empty() {
            writeln!(f, "Key words:")?;
            for word in &report.important_words {
                writeln!(
                    f,
                    "  {:<20} {:>3}  {:.3}",
                    word.word, word.frequency, word.importance_score
                )?;
            }
        }
        if !report.entities.is_empty() {
            writeln!(f, "Named entities:")?;
            for entity in &report.entities {
                writeln!(f, "  {} [{}]", entity.text, entity.label)?;
            }
        }
        if !report.lexical.is_empty() {
            writeln!(f, "Synonyms & antonyms:")?;
            for analysis in &report.lexical {
                writeln!(
                    f,
                    "  {}: synonyms: {}; antonyms: {}",
                    analysis.word,
                    list_or_none(&analysis.synonyms),
                    list_or_none(&analysis.antonyms)
                )?;
            }
        }
        if let Some(category) = report.detected_category {
            writeln!(f, "Category: {}", capitalized(category))?;
        }
        if !report.key_phrases.is_empty() {
            writeln!(f, "Key phrases: {}", report.key_phrases.join(", "))?;
        }
        Ok(())
    }
}

/// Human-readable dictionary entry.
pub struct EntryText<'a>(pub &'a DictionaryEntry);

impl fmt::Display for EntryText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry = self.0;
        writeln!(f, "{}", entry.relations.word)?;
        if entry.definitions.is_empty() {
            writeln!(f, "  No definitions found")?;
        }
        for (idx, definition) in entry.definitions.iter().enumerate() {
            writeln!(f, "  {}. {definition}", idx + 1)?;
        }
        writeln!(f, "Synonyms: {}", list_or_none(&entry.relations.synonyms))?;
        writeln!(f, "Antonyms: {}", list_or_none(&entry.relations.antonyms))
    }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn capitalized(category: Category) -> String {
    let name = category.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
