use news_lens::nlp::{tokenize::StopWords, Category, CategoryTable, TopicExtractor};
use proptest::prelude::*;

const ACME: &str = "The Acme Corporation announced a new AI product today in New York.";

#[test]
fn acme_story_is_technology_with_named_phrases() {
    let extractor = TopicExtractor::default();
    assert_eq!(extractor.categorize(ACME), Category::Technology);
    assert_eq!(
        extractor.key_phrases(ACME, 5),
        vec!["Acme Corporation".to_string(), "New York".to_string()]
    );
}

#[test]
fn key_phrases_rank_by_frequency() {
    let text = "Berlin hosted the summit. Leaders from Paris arrived late. Berlin police closed roads.";
    let phrases = TopicExtractor::default().key_phrases(text, 1);
    assert_eq!(phrases, vec!["Berlin".to_string()]);
}

#[test]
fn text_without_keywords_is_general() {
    let extractor = TopicExtractor::default();
    assert_eq!(extractor.categorize("nothing to see here"), Category::General);
    assert_eq!(extractor.categorize(""), Category::General);
}

#[test]
fn custom_table_replaces_defaults() {
    let table = CategoryTable::new([
        (Category::Sports, vec!["wicket", "innings"]),
        (Category::Science, vec!["telescope"]),
    ]);
    let extractor = TopicExtractor::new(table, StopWords::english().clone());
    assert_eq!(
        extractor.categorize("A late wicket ended the innings."),
        Category::Sports
    );
    assert_eq!(extractor.categorize("The software update shipped."), Category::General);
}

#[test]
fn single_document_has_no_topics() {
    let topics = TopicExtractor::default().extract_topics(&[ACME], 3, 5);
    assert!(topics.is_empty());
}

#[test]
fn two_documents_give_two_topics() {
    let docs = [
        "The stock market rallied as investors bought technology shares and bond yields fell sharply.",
        "The central bank announced a fresh economic policy to curb inflation and support wage growth.",
    ];
    let topics = TopicExtractor::default().extract_topics(&docs, 2, 5);
    assert_eq!(topics.len(), 2);
    for (idx, topic) in topics.iter().enumerate() {
        assert_eq!(topic.topic_id, idx);
        assert_eq!(topic.words.len(), 5);
        assert!(topic.weight > 0.0);
    }
}

#[test]
fn topic_count_follows_request() {
    let docs = [
        "Football clubs signed new strikers before the transfer window closed.",
        "Doctors reported fewer flu cases at the regional hospital this winter.",
        "Engineers tested a faster battery for electric delivery vans.",
    ];
    let extractor = TopicExtractor::default();
    let topics = extractor.extract_topics(&docs, 3, 5);
    assert_eq!(topics.len(), 3);
    assert_eq!(topics, extractor.extract_topics(&docs, 3, 5));
}

#[test]
fn stop_word_corpus_has_no_topics() {
    let docs = ["It is what it is.", "They were there and then."];
    assert!(TopicExtractor::default().extract_topics(&docs, 2, 5).is_empty());
}

proptest! {
    #[test]
    fn categorize_is_deterministic(text in "[a-z ]{0,80}") {
        let extractor = TopicExtractor::default();
        prop_assert_eq!(extractor.categorize(&text), extractor.categorize(&text));
    }
}
