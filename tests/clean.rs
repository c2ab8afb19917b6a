use news_lens::nlp::clean;
use proptest::prelude::*;

#[test]
fn urls_tags_and_symbols_are_removed() {
    let cleaned = clean("<p>Read more at https://example.com/x!!</p>   Big   news &amp; more");
    insta::assert_snapshot!(cleaned, @"Read more at Big news amp; more");
}

#[test]
fn sentence_punctuation_survives() {
    assert_eq!(
        clean("Prices rose 5% today; analysts (mostly) agreed: it's early!"),
        "Prices rose 5 today; analysts mostly agreed: its early!"
    );
}

#[test]
fn empty_input_stays_empty() {
    assert_eq!(clean(""), "");
    assert_eq!(clean("   \n\t "), "");
}

proptest! {
    #[test]
    fn cleaning_is_idempotent(text in ".{0,200}") {
        let once = clean(&text);
        prop_assert_eq!(clean(&once), once.clone());
    }

    #[test]
    fn output_has_no_markup_or_links(text in "[a-zA-Z <>/:.!&]{0,120}") {
        let cleaned = clean(&text);
        prop_assert!(!cleaned.contains('<'));
        prop_assert!(!cleaned.contains("http:"));
        prop_assert!(!cleaned.contains("  "));
    }
}
