//! Text processing: cleaning, tagging, keywords, summaries, lexical lookups and topics.

pub mod clean;
pub mod keywords;
pub mod lexical;
pub mod summarize;
pub mod tagger;
pub mod tokenize;
pub mod topics;
pub mod vectorize;

pub use clean::clean;
pub use keywords::{ImportantWord, TextProcessor};
pub use lexical::{DictionaryEntry, LexicalAnalysis, LexicalAnalyzer, Lexicon};
pub use summarize::{SummaryMethod, Summarizer};
pub use tagger::Entity;
pub use topics::{Category, CategoryTable, Topic, TopicExtractor};
