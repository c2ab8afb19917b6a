use news_lens::nlp::{
    tagger::Entity, tokenize::StopWords, vectorize::corpus_term_weights, TextProcessor,
};
use proptest::prelude::*;

const ACME: &str = "The Acme Corporation announced a new AI product today in New York.";

#[test]
fn entities_are_labelled_in_document_order() {
    let (_, entities) = TextProcessor::default().extract_important_words(ACME, 10);
    assert_eq!(
        entities,
        vec![
            Entity::new("Acme Corporation", "ORG"),
            Entity::new("AI", "ORG"),
            Entity::new("today", "DATE"),
            Entity::new("New York", "GPE"),
        ]
    );
}

#[test]
fn most_frequent_noun_comes_first() {
    let text = "Markets rallied. Markets fell. Investors watched markets closely.";
    let (words, _) = TextProcessor::default().extract_important_words(text, 5);
    let top = &words[0];
    assert_eq!(top.word, "markets");
    assert_eq!(top.frequency, 3);
    assert!(top.importance_score > 0.0 && top.importance_score <= 1.0);
}

#[test]
fn common_news_nouns_are_kept() {
    let text = "The world watched the show. The world cheered the show at home. \
Work on the case resumed this year.";
    let (words, _) = TextProcessor::default().extract_important_words(text, 15);
    let ranked: Vec<(&str, usize)> = words.iter().map(|w| (w.word.as_str(), w.frequency)).collect();
    assert_eq!(&ranked[..2], &[("world", 2), ("show", 2)]);
    for expected in ["home", "work", "case", "year"] {
        assert!(ranked.iter().any(|(w, _)| *w == expected), "{expected} missing from {ranked:?}");
    }
}

#[test]
fn term_weights_keep_common_news_nouns() {
    let docs = [
        "New world record set this year at the world show.",
        "New home sales rose this year as work resumed.",
    ];
    let weights = corpus_term_weights(&docs);
    for (doc, term) in [(0, "world"), (0, "year"), (1, "home"), (1, "work")] {
        assert!(weights[&doc].contains_key(term), "{term} missing from document {doc}");
    }
}

#[test]
fn day_month_date_keeps_preceding_cardinal() {
    let (_, entities) =
        TextProcessor::default().extract_important_words("Sales hit 12 31 June figures.", 10);
    assert_eq!(
        entities,
        vec![Entity::new("12", "CARDINAL"), Entity::new("31 June", "DATE")]
    );
}

#[test]
fn day_month_date_after_text() {
    let (_, entities) =
        TextProcessor::default().extract_important_words("Results arrive on 5 March.", 10);
    assert_eq!(entities, vec![Entity::new("5 March", "DATE")]);
}

#[test]
fn text_without_candidates_yields_nothing() {
    let (words, entities) = TextProcessor::default().extract_important_words("It is what it is.", 10);
    assert!(words.is_empty());
    assert!(entities.is_empty());
}

#[test]
fn keywords_respect_stop_words_and_length() {
    let (words, _) = TextProcessor::default().extract_important_words(ACME, 10);
    let stop_words = StopWords::english();
    assert!(words.iter().any(|w| w.word == "acme"));
    for word in &words {
        assert!(word.word.chars().count() > 2, "{}", word.word);
        assert!(!stop_words.contains(&word.word), "{}", word.word);
        assert_eq!(word.word, word.word.to_lowercase());
    }
}

proptest! {
    #[test]
    fn ranking_is_bounded_and_sorted(
        text in "[A-Za-z]{1,9}( [A-Za-z]{1,9}){0,30}\\.",
        top_n in 1usize..15,
    ) {
        let (words, _) = TextProcessor::default().extract_important_words(&text, top_n);
        prop_assert!(words.len() <= top_n);
        prop_assert!(words.windows(2).all(|w| w[0].frequency >= w[1].frequency));
        let total: f64 = words.iter().map(|w| w.importance_score).sum();
        prop_assert!(total <= 1.0 + 1e-9);
    }
}
