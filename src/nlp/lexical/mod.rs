//! Synonym, antonym and definition lookups against an injected [`Lexicon`].

mod morphy;
mod wordnet;

use std::{path::Path, sync::Arc};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use wordnet::{Lexicon, LexiconBuilder, Synset, WordClass};

/// Cap on synonyms and on antonyms per word.
pub const MAX_RELATED: usize = 5;
pub const MAX_DEFINITIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalAnalysis {
    pub word: String,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
}

impl LexicalAnalysis {
    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty() && self.antonyms.is_empty()
    }
}

/// Definitions plus relations for a single looked-up word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    #[serde(flatten)]
    pub relations: LexicalAnalysis,
    pub definitions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LexicalAnalyzer {
    lexicon: Arc<Lexicon>,
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new(Lexicon::empty())
    }
}

impl LexicalAnalyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon: Arc::new(lexicon),
        }
    }

    /// Load the WordNet database at `dir`, or run on an empty lexicon when it is
    /// unset or unreadable.
    pub fn from_optional_dir(dir: Option<&Path>) -> Self {
        let Some(dir) = dir else {
            warn!("WORDNET_DIR not set; synonyms, antonyms and definitions will be empty");
            return Self::default();
        };
        match Lexicon::from_wordnet_dir(dir) {
            Ok(lexicon) => Self::new(lexicon),
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "failed to load WordNet; using an empty lexicon");
                Self::default()
            }
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Synonyms and antonyms of `word` across all of its senses.
    ///
    /// Synonyms exclude the word itself (case-insensitively); underscores in
    /// lemma names become spaces. Both lists keep first-seen order.
    pub fn analyze(&self, word: &str) -> LexicalAnalysis {
        let query = word.to_lowercase();
        let mut synonyms = IndexSet::new();
        let mut antonyms = IndexSet::new();
        for synset in self.lexicon.synsets(word) {
            for (idx, lemma) in synset.lemmas.iter().enumerate() {
                let name = lemma.replace('_', " ");
                if name.to_lowercase() != query {
                    synonyms.insert(name);
                }
                for antonym in synset.antonyms(idx) {
                    antonyms.insert(antonym.replace('_', " "));
                }
            }
        }
        LexicalAnalysis {
            word: word.to_string(),
            synonyms: synonyms.into_iter().take(MAX_RELATED).collect(),
            antonyms: antonyms.into_iter().take(MAX_RELATED).collect(),
        }
    }

    /// [`LexicalAnalyzer::analyze`] over `words`, omitting words with no relations.
    pub fn analyze_batch<S: AsRef<str>>(&self, words: &[S]) -> Vec<LexicalAnalysis> {
        words
            .iter()
            .map(|word| self.analyze(word.as_ref()))
            .filter(|analysis| !analysis.is_empty())
            .collect()
    }

    pub fn entry(&self, word: &str) -> DictionaryEntry {
        DictionaryEntry {
            relations: self.analyze(word),
            definitions: self.definitions(word),
        }
    }

    /// Definitions of the first senses of `word`.
    pub fn definitions(&self, word: &str) -> Vec<String> {
        self.lexicon
            .synsets(word)
            .into_iter()
            .take(MAX_DEFINITIONS)
            .map(|synset| synset.definition.clone())
            .collect()
    }
}
