//! Raw article text normalisation.

use once_cell::sync::Lazy;
use regex::Regex;

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+|www.\S+").expect("valid regex"));
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").expect("valid regex"));
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.!?,;:\-]").expect("valid regex"));

/// Strip URLs, HTML tags and non-sentence punctuation, then collapse whitespace.
///
/// `clean(clean(x)) == clean(x)` for every input.
pub fn clean(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut current = clean_pass(text);
    // Dropping characters can splice a new URL together ("ht*tp://"), so repeat until stable.
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_pass(text: &str) -> String {
    let without_urls = URL.replace_all(text, "");
    let without_tags = HTML_TAG.replace_all(&without_urls, "");
    let filtered = DISALLOWED.replace_all(&without_tags, "");
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}
