use news_lens::nlp::{
    summarize::{truncate_fallback, MIN_SUMMARY_CHARS},
    tokenize::{english_stemmer, StopWords},
    Summarizer, SummaryMethod,
};
use proptest::prelude::*;

const ARTICLE: &str = "The city council approved a new budget for public transport on Tuesday. \
Bus fares will stay frozen for another year under the budget. \
Council members argued for hours about the cost of new trams. \
Local businesses welcomed the decision to keep fares low. \
Critics said the transport budget ignores cyclists entirely. \
The mayor promised a separate plan for cycling lanes next spring.";

const METHODS: [SummaryMethod; 3] = [
    SummaryMethod::TextRank,
    SummaryMethod::Lsa,
    SummaryMethod::LexRank,
];

#[test]
fn short_text_is_returned_unchanged() {
    let summarizer = Summarizer::default();
    let text = "Markets were quiet today.";
    assert!(text.len() < MIN_SUMMARY_CHARS);
    for method in METHODS {
        assert_eq!(summarizer.summarize(text, 3, method), text);
        assert_eq!(summarizer.summarize("", 3, method), "");
    }
}

#[test]
fn every_method_picks_sentences_in_document_order() {
    let summarizer = Summarizer::default();
    for method in METHODS {
        let sentences = summarizer
            .select(ARTICLE, 3, method)
            .unwrap_or_else(|err| panic!("{method:?} failed: {err}"));
        assert_eq!(sentences.len(), 3, "{method:?}");
        let positions: Vec<usize> = sentences
            .iter()
            .map(|s| ARTICLE.find(s.as_str()).expect("sentence comes from the input"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{method:?}: {positions:?}");
    }
}

#[test]
fn summary_joins_selected_sentences() {
    let summarizer = Summarizer::default();
    let summary = summarizer.summarize(ARTICLE, 2, SummaryMethod::TextRank);
    let selected = summarizer
        .select(ARTICLE, 2, SummaryMethod::TextRank)
        .expect("textrank ranks the article");
    assert_eq!(summary, selected.join(" "));
}

#[test]
fn asking_for_more_sentences_than_exist_returns_all() {
    let text = "Rain fell across the northern hills overnight. \
Rivers rose quickly near the old mill town. \
Farmers moved cattle to higher ground before dawn.";
    let sentences = Summarizer::default()
        .select(text, 5, SummaryMethod::Lsa)
        .expect("lsa ranks the text");
    assert_eq!(sentences.len(), 3);
}

#[test]
fn fallback_truncates_on_periods() {
    assert_eq!(truncate_fallback("One. Two. Three. Four", 2), "One.  Two.");
    assert_eq!(truncate_fallback("No periods here", 3), "No periods here.");
}

#[test]
fn content_free_text_falls_back_to_truncation() {
    let stop_words = StopWords::from_words(
        ARTICLE
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty()),
    );
    let summarizer = Summarizer::new(english_stemmer(), stop_words);
    for method in METHODS {
        assert_eq!(
            summarizer.summarize(ARTICLE, 2, method),
            truncate_fallback(ARTICLE, 2)
        );
    }
}

#[test]
fn key_sentences_use_textrank() {
    let summarizer = Summarizer::default();
    let key = summarizer.extract_key_sentences(ARTICLE, 2);
    assert_eq!(
        key,
        summarizer
            .select(ARTICLE, 2, SummaryMethod::TextRank)
            .expect("textrank ranks the article")
    );
}

const POOL: &[&str] = &[
    "market", "river", "council", "engine", "garden", "budget", "player", "doctor", "storm",
    "harbour", "signal", "factory",
];

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(POOL), 3..8).prop_map(|words| {
        let mut sentence = words.join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn selection_is_bounded_and_drawn_from_input(
        sentences in prop::collection::vec(sentence(), 1..10),
        count in 1usize..6,
        method_idx in 0usize..3,
    ) {
        let text = sentences.join(" ");
        let method = METHODS[method_idx];
        if let Ok(selected) = Summarizer::default().select(&text, count, method) {
            prop_assert!(selected.len() <= count);
            prop_assert!(selected.len() <= sentences.len());
            for s in &selected {
                prop_assert!(text.contains(s.as_str()));
            }
        }
    }
}
