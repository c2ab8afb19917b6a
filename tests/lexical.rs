use std::{fs, path::Path};

use news_lens::{
    nlp::{
        lexical::{Lexicon, WordClass},
        LexicalAnalyzer,
    },
    LexiconError,
};
use proptest::prelude::*;
use tempfile::TempDir;

const LICENSE: &str = "  1 This software and database is being provided to you, the LICENSEE,\n  2 by Princeton University under the following license.\n";

fn write(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), format!("{LICENSE}{body}")).expect("write fixture");
}

fn mini_wordnet() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path();
    write(
        root,
        "data.noun",
        "00003000 03 n 02 market 0 marketplace 0 000 | the world of commercial activity; \"the market for software\"\n\
         00005000 13 n 02 ice_cream 0 frozen_dessert 0 000 | a frozen dessert made from cream\n",
    );
    write(
        root,
        "index.noun",
        "ice_cream n 1 0 1 0 00005000\n\
         market n 1 0 1 0 00003000\n\
         marketplace n 1 0 1 0 00003000\n\
         frozen_dessert n 1 0 1 0 00005000\n",
    );
    write(
        root,
        "data.verb",
        "00004000 38 v 02 run 0 race 0 000 01 + 02 00 | move fast by using one's feet\n",
    );
    write(
        root,
        "index.verb",
        "race v 1 0 1 0 00004000\n\
         run v 1 0 1 0 00004000\n",
    );
    write(
        root,
        "data.adj",
        "00001740 00 a 02 good 0 full 0 001 ! 00002098 a 0101 | having desirable or positive qualities; \"a good report card\"\n\
         00002098 00 a 01 bad 0 001 ! 00001740 a 0101 | having undesirable or negative qualities\n",
    );
    write(
        root,
        "index.adj",
        "bad a 1 1 ! 1 0 00002098\n\
         full a 1 0 1 0 00001740\n\
         good a 1 1 ! 1 0 00001740\n",
    );
    write(root, "data.adv", "");
    write(root, "index.adv", "");
    fs::write(root.join("verb.exc"), "ran run\n").expect("write exceptions");
    dir
}

fn analyzer() -> (TempDir, LexicalAnalyzer) {
    let dir = mini_wordnet();
    let lexicon = Lexicon::from_wordnet_dir(dir.path()).expect("fixture parses");
    (dir, LexicalAnalyzer::new(lexicon))
}

#[test]
fn database_loads_every_synset() {
    let (_dir, analyzer) = analyzer();
    assert_eq!(analyzer.lexicon().len(), 5);
}

#[test]
fn antonym_pointers_resolve_in_both_directions() {
    let (_dir, analyzer) = analyzer();

    let good = analyzer.analyze("good");
    assert_eq!(good.synonyms, vec!["full"]);
    assert_eq!(good.antonyms, vec!["bad"]);

    let bad = analyzer.analyze("Bad");
    assert!(bad.synonyms.is_empty());
    assert_eq!(bad.antonyms, vec!["good"]);
}

#[test]
fn inflected_forms_reach_their_base() {
    let (_dir, analyzer) = analyzer();
    assert_eq!(analyzer.analyze("markets").synonyms, vec!["marketplace"]);
    assert_eq!(analyzer.analyze("ran").synonyms, vec!["run", "race"]);
}

#[test]
fn collocations_use_spaces() {
    let (_dir, analyzer) = analyzer();
    let analysis = analyzer.analyze("ice cream");
    assert_eq!(analysis.synonyms, vec!["frozen dessert"]);
}

#[test]
fn definitions_drop_usage_examples() {
    let (_dir, analyzer) = analyzer();
    assert_eq!(
        analyzer.definitions("good"),
        vec!["having desirable or positive qualities"]
    );
    let entry = analyzer.entry("market");
    assert_eq!(entry.definitions, vec!["the world of commercial activity"]);
    assert_eq!(entry.relations.synonyms, vec!["marketplace"]);
}

#[test]
fn batch_omits_words_without_relations() {
    let (_dir, analyzer) = analyzer();
    let batch = analyzer.analyze_batch(&["good", "zzzz", "market"]);
    let words: Vec<&str> = batch.iter().map(|a| a.word.as_str()).collect();
    assert_eq!(words, vec!["good", "market"]);
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = TempDir::new().expect("tempdir");
    let err = Lexicon::from_wordnet_dir(dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, LexiconError::Io { .. }), "{err}");
}

#[test]
fn malformed_line_reports_file_and_line() {
    let dir = mini_wordnet();
    write(dir.path(), "data.verb", "00004000 38 v\n");
    let err = Lexicon::from_wordnet_dir(dir.path()).unwrap_err();
    assert_eq!(err.to_string(), "data.verb:3: missing word count");
}

#[test]
fn unset_directory_gives_empty_results() {
    let analyzer = LexicalAnalyzer::from_optional_dir(None);
    assert!(analyzer.lexicon().is_empty());
    assert!(analyzer.analyze("good").is_empty());
    assert!(analyzer.definitions("good").is_empty());
}

#[test]
fn builder_links_antonyms_symmetrically() {
    let mut builder = Lexicon::builder();
    let hot = builder.synset(WordClass::Adjective, &["hot", "scorching"], "high in temperature");
    let cold = builder.synset(WordClass::Adjective, &["cold"], "low in temperature");
    builder
        .antonyms((hot, "hot"), (cold, "cold"))
        .exception(WordClass::Adjective, "hotter", "hot");
    let analyzer = LexicalAnalyzer::new(builder.build());

    let hotter = analyzer.analyze("hotter");
    assert_eq!(hotter.synonyms, vec!["hot", "scorching"]);
    assert_eq!(hotter.antonyms, vec!["cold"]);
    assert_eq!(analyzer.analyze("cold").antonyms, vec!["hot"]);
    assert!(analyzer.analyze("scorching").antonyms.is_empty());
}

#[test]
fn related_words_are_capped() {
    let mut builder = Lexicon::builder();
    builder.synset(
        WordClass::Noun,
        &["car", "auto", "automobile", "machine", "motorcar", "ride", "wheels"],
        "a motor vehicle",
    );
    let analyzer = LexicalAnalyzer::new(builder.build());
    assert_eq!(
        analyzer.analyze("car").synonyms,
        vec!["auto", "automobile", "machine", "motorcar", "ride"]
    );
}

proptest! {
    #[test]
    fn batch_never_grows(words in prop::collection::vec("[a-z]{1,8}", 0..12)) {
        let mut builder = Lexicon::builder();
        let up = builder.synset(WordClass::Adverb, &["up", "upward"], "toward a higher place");
        let down = builder.synset(WordClass::Adverb, &["down"], "toward a lower place");
        builder.antonyms((up, "up"), (down, "down"));
        let analyzer = LexicalAnalyzer::new(builder.build());

        let batch = analyzer.analyze_batch(&words);
        prop_assert!(batch.len() <= words.len());
        for analysis in &batch {
            prop_assert!(!analysis.is_empty());
            prop_assert!(analysis.synonyms.len() <= 5 && analysis.antonyms.len() <= 5);
            prop_assert!(!analysis.synonyms.iter().any(|s| s.eq_ignore_ascii_case(&analysis.word)));
        }
    }
}
