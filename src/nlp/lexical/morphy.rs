//! WordNet morphological reduction: exception lists, then suffix detachment.

use super::wordnet::{Lexicon, WordClass};

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJECTIVE_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

const MAX_ROUNDS: usize = 8;

fn rules(class: WordClass) -> &'static [(&'static str, &'static str)] {
    match class {
        WordClass::Noun => NOUN_RULES,
        WordClass::Verb => VERB_RULES,
        WordClass::Adjective => ADJECTIVE_RULES,
        WordClass::Adverb => &[],
    }
}

/// Base forms of `form` known to `lexicon` for `class`, original form first.
pub(super) fn base_forms(lexicon: &Lexicon, class: WordClass, form: &str) -> Vec<String> {
    let known = |candidates: Vec<String>| -> Vec<String> {
        let mut kept: Vec<String> = Vec::new();
        for candidate in candidates {
            if lexicon.contains(class, &candidate) && !kept.contains(&candidate) {
                kept.push(candidate);
            }
        }
        kept
    };

    if let Some(bases) = lexicon.exceptions(class, form) {
        let mut candidates = vec![form.to_string()];
        candidates.extend(bases.iter().cloned());
        return known(candidates);
    }

    let mut forms = detach(class, &[form.to_string()]);
    let mut candidates = vec![form.to_string()];
    candidates.extend(forms.iter().cloned());
    let found = known(candidates);
    if !found.is_empty() {
        return found;
    }

    for _ in 0..MAX_ROUNDS {
        if forms.is_empty() {
            break;
        }
        forms = detach(class, &forms);
        let found = known(forms.clone());
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}

fn detach(class: WordClass, forms: &[String]) -> Vec<String> {
    forms
        .iter()
        .flat_map(|form| {
            rules(class)
                .iter()
                .filter(move |(suffix, _)| form.ends_with(suffix))
                .map(move |(suffix, ending)| format!("{}{}", &form[..form.len() - suffix.len()], ending))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        let mut builder = Lexicon::builder();
        builder.synset(WordClass::Noun, &["church"], "a place of worship");
        builder.synset(WordClass::Noun, &["woman"], "an adult female person");
        builder.synset(WordClass::Verb, &["run"], "move fast by using one's feet");
        builder.synset(WordClass::Adjective, &["great"], "relatively large in size");
        builder.exception(WordClass::Verb, "ran", "run");
        builder.build()
    }

    #[test]
    fn suffix_rules_reduce_regular_inflections() {
        let lexicon = lexicon();
        assert_eq!(base_forms(&lexicon, WordClass::Noun, "churches"), vec!["church"]);
        assert_eq!(base_forms(&lexicon, WordClass::Noun, "women"), vec!["woman"]);
        assert_eq!(base_forms(&lexicon, WordClass::Adjective, "greatest"), vec!["great"]);
    }

    #[test]
    fn exception_list_wins_over_rules() {
        let lexicon = lexicon();
        assert_eq!(base_forms(&lexicon, WordClass::Verb, "ran"), vec!["run"]);
    }

    #[test]
    fn unknown_words_have_no_base_form() {
        let lexicon = lexicon();
        assert!(base_forms(&lexicon, WordClass::Noun, "zyzzyvas").is_empty());
        assert!(base_forms(&lexicon, WordClass::Adverb, "quickly").is_empty());
    }
}
