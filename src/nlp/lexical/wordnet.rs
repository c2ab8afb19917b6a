//! In-memory lexical database loaded from WordNet 3.x files.

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
    str::{FromStr, SplitWhitespace},
};

use tracing::{debug, info};

use crate::error::LexiconError;

use super::morphy;

const ANTONYM_POINTER: &str = "!";

/// Syntactic category of a sense. Adjective satellites fold into [`WordClass::Adjective`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WordClass {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl WordClass {
    /// Lookup order used when a word is queried without a class.
    pub const ALL: [WordClass; 4] = [Self::Noun, Self::Verb, Self::Adjective, Self::Adverb];

    fn file_suffix(self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adj",
            Self::Adverb => "adv",
        }
    }

    fn from_pos(pos: &str) -> Option<Self> {
        match pos {
            "n" => Some(Self::Noun),
            "v" => Some(Self::Verb),
            "a" | "s" => Some(Self::Adjective),
            "r" => Some(Self::Adverb),
            _ => None,
        }
    }
}

/// One sense: its member lemmas, definition and per-lemma antonyms.
#[derive(Debug, Clone, PartialEq)]
pub struct Synset {
    pub class: WordClass,
    /// Lemma names as stored, with underscores for spaces.
    pub lemmas: Vec<String>,
    pub definition: String,
    antonyms: Vec<Vec<String>>,
}

impl Synset {
    /// Antonyms of the lemma at `lemma` within this synset.
    pub fn antonyms(&self, lemma: usize) -> &[String] {
        self.antonyms.get(lemma).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    synsets: Vec<Synset>,
    index: HashMap<WordClass, HashMap<String, Vec<usize>>>,
    exceptions: HashMap<WordClass, HashMap<String, Vec<String>>>,
}

impl Lexicon {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.synsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synsets.is_empty()
    }

    /// Every sense of `word` across all classes, in sense-ranking order.
    ///
    /// The query is lowercased and spaces become underscores; inflected forms
    /// are reduced to their base forms first.
    pub fn synsets(&self, word: &str) -> Vec<&Synset> {
        let key = normalize_lemma(word);
        if key.is_empty() {
            return Vec::new();
        }
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for class in WordClass::ALL {
            for form in morphy::base_forms(self, class, &key) {
                for &id in self.senses(class, &form) {
                    if seen.insert(id) {
                        found.push(&self.synsets[id]);
                    }
                }
            }
        }
        found
    }

    pub(super) fn contains(&self, class: WordClass, lemma: &str) -> bool {
        !self.senses(class, lemma).is_empty()
    }

    pub(super) fn exceptions(&self, class: WordClass, form: &str) -> Option<&[String]> {
        self.exceptions
            .get(&class)
            .and_then(|by_form| by_form.get(form))
            .map(Vec::as_slice)
    }

    fn senses(&self, class: WordClass, lemma: &str) -> &[usize] {
        self.index
            .get(&class)
            .and_then(|by_lemma| by_lemma.get(lemma))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Parse `index.*`, `data.*` and (when present) `*.exc` files from a WordNet `dict/` directory.
    pub fn from_wordnet_dir(dir: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let dir = dir.as_ref();
        let mut raw = Vec::new();
        let mut by_offset: HashMap<(WordClass, u64), usize> = HashMap::new();
        for class in WordClass::ALL {
            let name = format!("data.{}", class.file_suffix());
            let text = read(dir, &name)?;
            for (line_no, line) in database_lines(&text) {
                let synset = parse_data_line(&name, line_no, line, class)?;
                by_offset.insert((class, synset.offset), raw.len());
                raw.push(synset);
            }
        }

        let mut synsets: Vec<Synset> = raw
            .iter()
            .map(|r| Synset {
                class: r.class,
                lemmas: r.lemmas.clone(),
                definition: r.definition.clone(),
                antonyms: vec![Vec::new(); r.lemmas.len()],
            })
            .collect();
        for (id, synset) in raw.iter().enumerate() {
            for pointer in &synset.antonyms {
                let Some(&target) = by_offset.get(&(pointer.class, pointer.offset)) else {
                    debug!(offset = pointer.offset, "dangling antonym pointer");
                    continue;
                };
                let names: Vec<String> = match pointer.target {
                    0 => synsets[target].lemmas.clone(),
                    n => synsets[target].lemmas.get(n - 1).cloned().into_iter().collect(),
                };
                let sources: Vec<usize> = match pointer.source {
                    0 => (0..synset.lemmas.len()).collect(),
                    n => vec![n - 1],
                };
                for source in sources {
                    if let Some(slot) = synsets[id].antonyms.get_mut(source) {
                        slot.extend(names.iter().cloned());
                    }
                }
            }
        }

        let mut index: HashMap<WordClass, HashMap<String, Vec<usize>>> = HashMap::new();
        for class in WordClass::ALL {
            let name = format!("index.{}", class.file_suffix());
            let text = read(dir, &name)?;
            let by_lemma = index.entry(class).or_default();
            for (line_no, line) in database_lines(&text) {
                let (lemma, offsets) = parse_index_line(&name, line_no, line)?;
                let ids = offsets
                    .into_iter()
                    .filter_map(|offset| by_offset.get(&(class, offset)).copied())
                    .collect();
                by_lemma.insert(lemma, ids);
            }
        }

        let mut exceptions: HashMap<WordClass, HashMap<String, Vec<String>>> = HashMap::new();
        for class in WordClass::ALL {
            let path = dir.join(format!("{}.exc", class.file_suffix()));
            if !path.exists() {
                continue;
            }
            let text = fs::read_to_string(&path).map_err(|source| LexiconError::Io {
                path: path.clone(),
                source,
            })?;
            let by_form = exceptions.entry(class).or_default();
            for line in text.lines() {
                let mut words = line.split_whitespace();
                if let Some(inflected) = words.next() {
                    by_form
                        .entry(inflected.to_string())
                        .or_default()
                        .extend(words.map(str::to_string));
                }
            }
        }

        info!(dir = %dir.display(), synsets = synsets.len(), "loaded WordNet lexicon");
        Ok(Self {
            synsets,
            index,
            exceptions,
        })
    }
}

/// Assembles a [`Lexicon`] in memory; senses rank in insertion order.
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    lexicon: Lexicon,
}

impl LexiconBuilder {
    /// Add a sense and return its id for use with [`LexiconBuilder::antonyms`].
    pub fn synset(&mut self, class: WordClass, lemmas: &[&str], definition: &str) -> usize {
        let id = self.lexicon.synsets.len();
        let by_lemma = self.lexicon.index.entry(class).or_default();
        for lemma in lemmas {
            by_lemma.entry(normalize_lemma(lemma)).or_default().push(id);
        }
        self.lexicon.synsets.push(Synset {
            class,
            lemmas: lemmas.iter().map(|l| l.trim().replace(' ', "_")).collect(),
            definition: definition.to_string(),
            antonyms: vec![Vec::new(); lemmas.len()],
        });
        id
    }

    /// Link two `(synset id, lemma)` pairs as antonyms of each other.
    pub fn antonyms(&mut self, first: (usize, &str), second: (usize, &str)) -> &mut Self {
        self.link(first, second);
        self.link(second, first);
        self
    }

    /// Register an irregular inflection, e.g. `("ran", "run")` for verbs.
    pub fn exception(&mut self, class: WordClass, inflected: &str, base: &str) -> &mut Self {
        self.lexicon
            .exceptions
            .entry(class)
            .or_default()
            .entry(normalize_lemma(inflected))
            .or_default()
            .push(normalize_lemma(base));
        self
    }

    pub fn build(self) -> Lexicon {
        self.lexicon
    }

    fn link(&mut self, (from, from_lemma): (usize, &str), (to, to_lemma): (usize, &str)) {
        let target = match self.lexicon.synsets.get(to) {
            Some(synset) => match lemma_position(synset, to_lemma) {
                Some(pos) => synset.lemmas[pos].clone(),
                None => return,
            },
            None => return,
        };
        if let Some(synset) = self.lexicon.synsets.get_mut(from) {
            if let Some(pos) = lemma_position(synset, from_lemma) {
                synset.antonyms[pos].push(target);
            }
        }
    }
}

fn lemma_position(synset: &Synset, lemma: &str) -> Option<usize> {
    let key = normalize_lemma(lemma);
    synset.lemmas.iter().position(|l| l.to_lowercase() == key)
}

fn normalize_lemma(word: &str) -> String {
    word.trim().to_lowercase().replace(' ', "_")
}

fn read(dir: &Path, name: &str) -> Result<String, LexiconError> {
    let path = dir.join(name);
    fs::read_to_string(&path).map_err(|source| LexiconError::Io { path, source })
}

/// Non-empty lines with 1-based numbers, skipping the indented license header.
fn database_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.starts_with("  ") && !line.trim().is_empty())
}

struct RawSynset {
    offset: u64,
    class: WordClass,
    lemmas: Vec<String>,
    definition: String,
    antonyms: Vec<RawPointer>,
}

struct RawPointer {
    class: WordClass,
    offset: u64,
    source: usize,
    target: usize,
}

/// Whitespace-separated fields of one database line with located parse errors.
struct Fields<'a> {
    iter: SplitWhitespace<'a>,
    file: &'a str,
    line: usize,
}

impl<'a> Fields<'a> {
    fn new(text: &'a str, file: &'a str, line: usize) -> Self {
        Self {
            iter: text.split_whitespace(),
            file,
            line,
        }
    }

    fn next(&mut self, what: &str) -> Result<&'a str, LexiconError> {
        self.iter
            .next()
            .ok_or_else(|| LexiconError::parse(self.file, self.line, format!("missing {what}")))
    }

    fn number<T: FromStr>(&mut self, what: &str) -> Result<T, LexiconError> {
        let raw = self.next(what)?;
        raw.parse()
            .map_err(|_| LexiconError::parse(self.file, self.line, format!("invalid {what} {raw:?}")))
    }

    fn hex(&mut self, what: &str) -> Result<usize, LexiconError> {
        let raw = self.next(what)?;
        self.hex_value(raw, what)
    }

    fn hex_value(&self, raw: &str, what: &str) -> Result<usize, LexiconError> {
        usize::from_str_radix(raw, 16)
            .map_err(|_| LexiconError::parse(self.file, self.line, format!("invalid {what} {raw:?}")))
    }
}

/// `offset lex_filenum ss_type w_cnt [word lex_id]... p_cnt [ptr offset pos src/tgt]... | gloss`
fn parse_data_line(
    file: &str,
    line_no: usize,
    line: &str,
    class: WordClass,
) -> Result<RawSynset, LexiconError> {
    let (head, gloss) = line.split_once('|').unwrap_or((line, ""));
    let mut fields = Fields::new(head, file, line_no);

    let offset: u64 = fields.number("synset offset")?;
    fields.next("lexicographer file")?;
    fields.next("synset type")?;
    let word_count = fields.hex("word count")?;
    let mut lemmas = Vec::with_capacity(word_count);
    for _ in 0..word_count {
        let word = fields.next("word")?;
        fields.next("lex id")?;
        // Adjective position markers such as "galore(ip)".
        let word = word.split_once('(').map_or(word, |(bare, _)| bare);
        lemmas.push(word.to_string());
    }

    let pointer_count: usize = fields.number("pointer count")?;
    let mut antonyms = Vec::new();
    for _ in 0..pointer_count {
        let symbol = fields.next("pointer symbol")?;
        let target_offset: u64 = fields.number("pointer offset")?;
        let pos = fields.next("pointer pos")?;
        let source_target = fields.next("pointer source/target")?;
        if symbol != ANTONYM_POINTER {
            continue;
        }
        let target_class = WordClass::from_pos(pos)
            .ok_or_else(|| LexiconError::parse(file, line_no, format!("unknown pos {pos:?}")))?;
        if source_target.len() != 4 || !source_target.is_ascii() {
            return Err(LexiconError::parse(
                file,
                line_no,
                format!("invalid source/target {source_target:?}"),
            ));
        }
        antonyms.push(RawPointer {
            class: target_class,
            offset: target_offset,
            source: fields.hex_value(&source_target[..2], "source word")?,
            target: fields.hex_value(&source_target[2..], "target word")?,
        });
    }

    Ok(RawSynset {
        offset,
        class,
        lemmas,
        definition: definition_of(gloss),
        antonyms,
    })
}

/// `lemma pos synset_cnt p_cnt [ptr_symbol]... sense_cnt tagsense_cnt synset_offset...`
fn parse_index_line(file: &str, line_no: usize, line: &str) -> Result<(String, Vec<u64>), LexiconError> {
    let mut fields = Fields::new(line, file, line_no);
    let lemma = fields.next("lemma")?.to_string();
    fields.next("pos")?;
    let synset_count: usize = fields.number("synset count")?;
    let pointer_count: usize = fields.number("pointer count")?;
    for _ in 0..pointer_count {
        fields.next("pointer symbol")?;
    }
    fields.next("sense count")?;
    fields.next("tagged sense count")?;
    let offsets = (0..synset_count)
        .map(|_| fields.number("synset offset"))
        .collect::<Result<_, _>>()?;
    Ok((lemma, offsets))
}

/// Gloss minus its quoted usage examples.
fn definition_of(gloss: &str) -> String {
    gloss
        .trim()
        .split("; ")
        .map(str::trim)
        .filter(|part| !part.starts_with('"') && !part.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_line_with_antonym_pointer() {
        let line = "01123148 00 a 02 good 0 well(p) 0 002 ! 01125429 a 0101 & 01123879 a 0000 | having desirable or positive qualities; \"a good report card\"";
        let synset = parse_data_line("data.adj", 1, line, WordClass::Adjective).unwrap();
        assert_eq!(synset.offset, 1123148);
        assert_eq!(synset.lemmas, vec!["good", "well"]);
        assert_eq!(synset.definition, "having desirable or positive qualities");
        assert_eq!(synset.antonyms.len(), 1);
        assert_eq!(synset.antonyms[0].offset, 1125429);
        assert_eq!((synset.antonyms[0].source, synset.antonyms[0].target), (1, 1));
    }

    #[test]
    fn index_line_lists_offsets_in_sense_order() {
        let line = "dog n 2 3 @ ~ + 2 1 02084071 10114209";
        let (lemma, offsets) = parse_index_line("index.noun", 7, line).unwrap();
        assert_eq!(lemma, "dog");
        assert_eq!(offsets, vec![2084071, 10114209]);
    }

    #[test]
    fn truncated_line_reports_location() {
        let err = parse_index_line("index.noun", 12, "dog n").unwrap_err();
        assert_eq!(err.to_string(), "index.noun:12: missing synset count");
    }
}
