//! Lexicon-and-heuristic part-of-speech tagging and named-entity recognition.
//!
//! Both stages sit behind traits so a model-backed implementation can replace
//! the bundled rules without touching the keyword extractor.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Universal part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Noun,
    #[serde(rename = "PROPN")]
    ProperNoun,
    Verb,
    #[serde(rename = "ADJ")]
    Adjective,
    #[serde(rename = "ADV")]
    Adverb,
    #[serde(rename = "PRON")]
    Pronoun,
    #[serde(rename = "DET")]
    Determiner,
    #[serde(rename = "ADP")]
    Adposition,
    #[serde(rename = "CCONJ")]
    Conjunction,
    #[serde(rename = "AUX")]
    Auxiliary,
    #[serde(rename = "PART")]
    Particle,
    #[serde(rename = "NUM")]
    Numeral,
    #[serde(rename = "PUNCT")]
    Punctuation,
}

impl PosTag {
    /// Content classes kept by the keyword extractor.
    pub fn is_keyword_class(self) -> bool {
        matches!(self, Self::Noun | Self::ProperNoun | Self::Verb)
    }

    pub fn is_closed_class(self) -> bool {
        matches!(
            self,
            Self::Pronoun
                | Self::Determiner
                | Self::Adposition
                | Self::Conjunction
                | Self::Auxiliary
                | Self::Particle
        )
    }
}

/// A token with its byte span and tag.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedToken<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
    pub pos: PosTag,
    pub sentence_start: bool,
}

/// Named entity with a type label such as `PERSON`, `ORG` or `GPE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Trait for part-of-speech taggers.
pub trait Tagger: Send + Sync {
    fn tag<'a>(&self, text: &'a str) -> Vec<TaggedToken<'a>>;
}

/// Trait for named-entity recognisers working over tagged tokens.
pub trait Ner: Send + Sync {
    fn extract(&self, text: &str, tokens: &[TaggedToken<'_>]) -> Vec<Entity>;
}

fn set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

static DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "a", "an", "the", "this", "that", "these", "those", "some", "any", "each", "every", "no",
        "another", "either", "neither", "all", "both", "such", "what", "which", "whose",
    ])
});

static PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
        "your", "his", "its", "our", "their", "mine", "yours", "hers", "ours", "theirs", "myself",
        "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who", "whom",
        "someone", "something", "anyone", "anything", "everyone", "everything", "nobody",
        "nothing",
    ])
});

static ADPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "of", "to", "in", "for", "on", "with", "at", "from", "by", "about", "as", "into", "like",
        "through", "after", "over", "between", "out", "against", "during", "without", "before",
        "under", "around", "among", "across", "behind", "beyond", "near", "since", "toward",
        "towards", "upon", "within", "via", "amid", "despite", "per", "than", "off", "onto",
    ])
});

static CONJUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "and", "or", "but", "nor", "so", "yet", "if", "because", "while", "though", "although",
        "when", "unless", "until", "whether", "where", "whereas", "once",
    ])
});

static AUXILIARIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had", "having",
        "do", "does", "did", "will", "would", "can", "could", "shall", "should", "may", "might",
        "must",
    ])
});

static MODALS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "will", "would", "can", "could", "shall", "should", "may", "might", "must", "to",
    ])
});

static PARTICLES: Lazy<HashSet<&'static str>> = Lazy::new(|| set(&["not", "n't", "up", "'s"]));

static ADVERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "very", "also", "just", "now", "then", "still", "already", "soon", "again", "never",
        "always", "often", "here", "there", "too", "almost", "even", "ever", "well", "how", "why",
        "only", "much", "more", "most", "less", "least", "later", "ago",
    ])
});

static ADJECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "new", "old", "big", "small", "large", "good", "bad", "great", "high", "low", "long",
        "short", "young", "early", "late", "major", "top", "key", "many", "few", "other", "same",
        "last", "next", "first", "second", "third", "former", "latest", "own", "recent", "several",
        "strong", "weak", "full", "free", "real", "hard", "easy", "open", "close", "certain",
        "likely", "main", "global", "local", "national", "public", "private", "best", "worst",
        "higher", "lower", "larger", "smaller", "better", "worse",
    ])
});

static VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "say", "says", "said", "make", "makes", "made", "take", "takes", "took", "taken", "get",
        "gets", "got", "go", "goes", "went", "gone", "come", "comes", "came", "see", "sees", "saw",
        "seen", "know", "knows", "knew", "known", "give", "gives", "gave", "given", "find",
        "finds", "found", "tell", "tells", "told", "become", "becomes", "became", "leave",
        "leaves", "left", "keep", "keeps", "kept", "begin", "begins", "began", "show", "shows",
        "win", "wins", "won", "lose", "loses", "lost", "hold", "holds", "held", "bring", "brings",
        "brought", "rise", "rises", "rose", "fall", "falls", "fell", "grow", "grows", "grew",
        "meet", "meets", "met", "pay", "pays", "paid", "run", "runs", "ran", "set", "sets", "put",
        "puts", "cut", "cuts", "hit", "hits", "build", "builds", "built", "buy", "buys", "bought",
        "sell", "sells", "sold", "send", "sends", "sent", "spend", "spends", "spent", "lead",
        "leads", "led", "seek", "seeks", "sought", "warn", "warns", "plan", "plans", "launch",
        "launches", "announce", "announces", "unveil", "unveils", "claim", "claims", "urge",
        "urges", "vow", "vows", "face", "faces", "reach", "reaches", "remain", "remains",
    ])
});

static MONTHS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "january", "february", "march", "april", "may", "june", "july", "august", "september",
        "october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
        "sept", "oct", "nov", "dec",
    ])
});

static DAY_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "today",
        "yesterday", "tomorrow", "tonight", "weekend",
    ])
});

static NUMBER_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
        "twelve", "twenty", "thirty", "forty", "fifty", "hundred", "hundreds", "thousand",
        "thousands", "million", "millions", "billion", "billions", "trillion", "dozen",
    ])
});

static CURRENCY_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "dollar", "dollars", "euro", "euros", "pound", "pounds", "rupee", "rupees", "yen", "yuan",
        "usd", "eur", "gbp", "inr", "cents",
    ])
});

static PERSON_TITLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "mr", "mrs", "ms", "dr", "prof", "sir", "president", "senator", "minister", "chancellor",
        "governor", "judge", "pope", "king", "queen", "prince", "princess", "ceo", "chief",
        "secretary", "rep", "gen", "coach", "mayor",
    ])
});

static ORG_MARKERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "corporation", "corp", "inc", "ltd", "llc", "plc", "company", "co", "group", "bank",
        "university", "institute", "agency", "association", "council", "committee", "party",
        "ministry", "department", "federation", "foundation", "commission", "authority", "club",
        "fc", "united", "holdings", "technologies", "systems", "motors", "airlines", "labs",
        "studios", "news", "times", "post", "journal", "court", "congress", "parliament",
        "senate", "police", "army", "navy", "board", "fund", "reserve", "exchange", "network",
    ])
});

static PLACES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "afghanistan", "argentina", "australia", "austria", "bangladesh", "belgium", "brazil",
        "canada", "chile", "china", "colombia", "cuba", "denmark", "egypt", "england", "ethiopia",
        "europe", "africa", "asia", "america", "finland", "france", "germany", "greece", "india",
        "indonesia", "iran", "iraq", "ireland", "israel", "italy", "japan", "kenya", "korea",
        "mexico", "netherlands", "nigeria", "norway", "pakistan", "palestine", "peru",
        "philippines", "poland", "portugal", "qatar", "russia", "scotland", "singapore", "spain",
        "sweden", "switzerland", "syria", "taiwan", "thailand", "turkey", "uganda", "ukraine",
        "vietnam", "wales", "britain", "gaza", "us", "usa", "uk", "uae", "eu", "new york",
        "london", "paris", "berlin", "tokyo", "beijing", "moscow", "delhi", "new delhi", "mumbai",
        "washington", "california", "texas", "florida", "chicago", "los angeles", "san francisco",
        "boston", "seattle", "toronto", "sydney", "melbourne", "dubai", "rome", "madrid",
        "brussels", "geneva", "hong kong", "shanghai", "seoul", "kyiv", "jerusalem", "cairo",
        "lagos", "nairobi", "bangalore", "bengaluru", "kolkata", "chennai", "hyderabad",
        "silicon valley", "united states", "united kingdom", "south korea", "north korea",
        "south africa", "saudi arabia", "new zealand", "new jersey", "wall street",
    ])
});

static NATIONALITIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "american", "americans", "british", "chinese", "indian", "indians", "russian", "russians",
        "ukrainian", "ukrainians", "french", "german", "germans", "japanese", "korean", "israeli",
        "israelis", "palestinian", "palestinians", "european", "europeans", "african", "asian",
        "canadian", "mexican", "brazilian", "australian", "italian", "spanish", "iranian",
        "democrat", "democrats", "republican", "republicans", "muslim", "muslims", "christian",
        "christians", "hindu", "hindus", "jewish",
    ])
});

fn is_capitalized(word: &str) -> bool {
    word.chars().next().map(char::is_uppercase).unwrap_or(false)
}

fn is_acronym(word: &str) -> bool {
    let letters = word.chars().filter(|c| c.is_alphabetic()).count();
    letters >= 2 && word.chars().all(|c| c.is_uppercase() || c.is_ascii_digit())
}

fn is_numeric(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
}

/// Determiners, pronouns, auxiliaries, adpositions, conjunctions and particles.
pub fn is_function_word(word: &str) -> bool {
    closed_class(&word.to_lowercase()).is_some()
}

fn closed_class(lower: &str) -> Option<PosTag> {
    if DETERMINERS.contains(lower) {
        Some(PosTag::Determiner)
    } else if PRONOUNS.contains(lower) {
        Some(PosTag::Pronoun)
    } else if AUXILIARIES.contains(lower) {
        Some(PosTag::Auxiliary)
    } else if ADPOSITIONS.contains(lower) {
        Some(PosTag::Adposition)
    } else if CONJUNCTIONS.contains(lower) {
        Some(PosTag::Conjunction)
    } else if PARTICLES.contains(lower) {
        Some(PosTag::Particle)
    } else {
        None
    }
}

/// Suffix and word-list tagger for lowercase open-class words.
fn open_class(lower: &str, previous: Option<&TaggedToken<'_>>) -> PosTag {
    if NUMBER_WORDS.contains(lower) {
        return PosTag::Numeral;
    }
    if ADVERBS.contains(lower) {
        return PosTag::Adverb;
    }
    if ADJECTIVES.contains(lower) {
        return PosTag::Adjective;
    }
    if VERBS.contains(lower) {
        return PosTag::Verb;
    }
    let after_verb_marker = previous
        .map(|p| {
            p.pos == PosTag::Pronoun || MODALS.contains(p.text.to_lowercase().as_str())
        })
        .unwrap_or(false);
    if after_verb_marker {
        return PosTag::Verb;
    }
    let len = lower.chars().count();
    if len > 4 && lower.ends_with("ly") {
        return PosTag::Adverb;
    }
    if lower.ends_with("ing")
        || lower.ends_with("ed")
        || lower.ends_with("ize")
        || lower.ends_with("ise")
        || lower.ends_with("ify")
    {
        return PosTag::Verb;
    }
    if len > 4
        && (lower.ends_with("ful")
            || lower.ends_with("less")
            || lower.ends_with("ous")
            || lower.ends_with("ive")
            || lower.ends_with("able")
            || lower.ends_with("ible")
            || lower.ends_with("ical")
            || lower.ends_with("ish"))
    {
        return PosTag::Adjective;
    }
    PosTag::Noun
}

/// Rule-based tagger over Unicode word boundaries.
#[derive(Debug, Clone, Default)]
pub struct RuleTagger;

impl Tagger for RuleTagger {
    fn tag<'a>(&self, text: &'a str) -> Vec<TaggedToken<'a>> {
        let mut tokens: Vec<TaggedToken<'a>> = Vec::new();
        let mut at_sentence_start = true;
        let pieces: Vec<(usize, &'a str)> = text
            .split_word_bound_indices()
            .filter(|(_, piece)| !piece.trim().is_empty())
            .collect();

        for (idx, (start, piece)) in pieces.iter().enumerate() {
            let is_word = piece.chars().any(char::is_alphanumeric);
            if !is_word {
                tokens.push(TaggedToken {
                    text: piece,
                    start: *start,
                    end: start + piece.len(),
                    pos: PosTag::Punctuation,
                    sentence_start: false,
                });
                if matches!(*piece, "." | "!" | "?") {
                    at_sentence_start = true;
                }
                continue;
            }

            let lower = piece.to_lowercase();
            let previous = tokens.iter().rev().find(|t| t.pos != PosTag::Punctuation);
            let next_capitalized = pieces
                .get(idx + 1)
                .map(|(_, next)| is_capitalized(next))
                .unwrap_or(false);

            let pos = if is_numeric(piece) {
                PosTag::Numeral
            } else if is_acronym(piece) {
                PosTag::ProperNoun
            } else if is_capitalized(piece) {
                match closed_class(&lower) {
                    Some(tag) => tag,
                    None if !at_sentence_start => PosTag::ProperNoun,
                    None if next_capitalized || PLACES.contains(lower.as_str()) => {
                        PosTag::ProperNoun
                    }
                    // Sentence-initial capitals say nothing about the word class.
                    None => open_class(&lower, previous),
                }
            } else {
                closed_class(&lower).unwrap_or_else(|| open_class(&lower, previous))
            };

            tokens.push(TaggedToken {
                text: piece,
                start: *start,
                end: start + piece.len(),
                pos,
                sentence_start: at_sentence_start,
            });
            at_sentence_start = false;
        }
        tokens
    }
}

/// Gazetteer and capitalisation driven entity recogniser.
#[derive(Debug, Clone, Default)]
pub struct GazetteerNer;

impl GazetteerNer {
    fn label_span(&self, words: &[&str], preceding: Option<&str>) -> &'static str {
        let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let joined = lower.join(" ");
        if PLACES.contains(joined.as_str()) {
            return "GPE";
        }
        if lower.iter().any(|w| ORG_MARKERS.contains(w.as_str())) {
            return "ORG";
        }
        if words.len() == 1 {
            if NATIONALITIES.contains(joined.as_str()) {
                return "NORP";
            }
            if is_acronym(words[0]) {
                return "ORG";
            }
        }
        let titled = preceding
            .map(|p| PERSON_TITLES.contains(p.to_lowercase().trim_end_matches('.')))
            .unwrap_or(false);
        if titled || (2..=3).contains(&words.len()) {
            return "PERSON";
        }
        "ORG"
    }
}

impl Ner for GazetteerNer {
    fn extract(&self, text: &str, tokens: &[TaggedToken<'_>]) -> Vec<Entity> {
        let words: Vec<&TaggedToken<'_>> = tokens
            .iter()
            .filter(|t| t.pos != PosTag::Punctuation)
            .collect();
        let mut entities = Vec::new();
        let mut idx = 0;
        while idx < words.len() {
            let token = words[idx];
            let lower = token.text.to_lowercase();

            if DAY_WORDS.contains(lower.as_str())
                || (MONTHS.contains(lower.as_str()) && is_capitalized(token.text))
            {
                let mut end = idx + 1;
                while end < words.len()
                    && (words[end].pos == PosTag::Numeral
                        || MONTHS.contains(words[end].text.to_lowercase().as_str()))
                {
                    end += 1;
                }
                // The numeral branch leaves a day number before a month unclaimed.
                let begin = if idx > 0 && day_before_month(&words, idx - 1) {
                    idx - 1
                } else {
                    idx
                };
                entities.push(Entity::new(&text[words[begin].start..words[end - 1].end], "DATE"));
                idx = end;
                continue;
            }

            if token.pos == PosTag::Numeral {
                if day_before_month(&words, idx) {
                    idx += 1;
                    continue;
                }
                let mut end = idx + 1;
                while end < words.len()
                    && words[end].pos == PosTag::Numeral
                    && !day_before_month(&words, end)
                {
                    end += 1;
                }
                let follower = words.get(end).map(|t| t.text.to_lowercase());
                let (label, last) = match follower.as_deref() {
                    Some("percent") => ("PERCENT", end),
                    Some(w) if CURRENCY_WORDS.contains(w) => ("MONEY", end),
                    _ if is_year(token.text) && end == idx + 1 => ("DATE", idx),
                    _ => ("CARDINAL", end - 1),
                };
                entities.push(Entity::new(&text[token.start..words[last].end], label));
                idx = last + 1;
                continue;
            }

            let starts_span = matches!(token.pos, PosTag::ProperNoun)
                || (is_capitalized(token.text)
                    && !token.sentence_start
                    && !token.pos.is_closed_class());
            if !starts_span {
                idx += 1;
                continue;
            }

            let mut end = idx + 1;
            loop {
                match words.get(end) {
                    Some(next) if next.pos == PosTag::ProperNoun => end += 1,
                    // "Bank of America": a lowercase connector between capitalised words.
                    Some(next)
                        if matches!(next.text, "of" | "and" | "&" | "for")
                            && words
                                .get(end + 1)
                                .map(|w| w.pos == PosTag::ProperNoun)
                                .unwrap_or(false) =>
                    {
                        end += 2
                    }
                    _ => break,
                }
            }
            let span_words: Vec<&str> = words[idx..end].iter().map(|t| t.text).collect();
            let preceding = idx.checked_sub(1).map(|p| words[p].text);
            let label = self.label_span(&span_words, preceding);
            entities.push(Entity::new(&text[token.start..words[end - 1].end], label));
            idx = end;
        }
        entities
    }
}

fn is_year(word: &str) -> bool {
    word.len() == 4
        && word
            .parse::<u32>()
            .map(|y| (1900..=2100).contains(&y))
            .unwrap_or(false)
}

/// A day number directly followed by a capitalised month name, as in "31 June".
fn day_before_month(words: &[&TaggedToken<'_>], idx: usize) -> bool {
    is_day_number(words[idx].text)
        && words
            .get(idx + 1)
            .map(|next| is_month(next.text))
            .unwrap_or(false)
}

fn is_month(word: &str) -> bool {
    MONTHS.contains(word.to_lowercase().as_str()) && is_capitalized(word)
}

fn is_day_number(word: &str) -> bool {
    word.parse::<u32>()
        .map(|d| (1..=31).contains(&d))
        .unwrap_or(false)
}
