//! Enumeration of (prefixes, stem, suffixes) decompositions of a word.
use itertools::iproduct;
use serde::Serialize;
use smol_str::SmolStr;

use super::pattern::PatternMatch;
use crate::constants::{CONJUNCTIONS, DEFINITE_ARTICLE, PARTICLES, PLURAL_MARKERS, PRONOUNS};
use crate::tokenizer::is_arabic;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub prefixes: Vec<SmolStr>,
    pub stem: SmolStr,
    pub suffixes: Vec<SmolStr>,
}

impl Candidate {
    pub fn has_prefix(&self, affix: &str) -> bool {
        self.prefixes.iter().any(|p| p == affix)
    }

    pub fn has_definite_article(&self) -> bool {
        self.has_prefix(DEFINITE_ARTICLE)
    }

    pub fn has_plural(&self) -> bool {
        self.suffixes
            .iter()
            .any(|s| PLURAL_MARKERS.contains(&s.as_str()))
    }

    pub fn has_pronoun(&self) -> bool {
        self.suffixes.iter().any(|s| PRONOUNS.contains(&s.as_str()))
    }

    /// Prefixes, stem and suffixes joined back together.
    pub fn surface(&self) -> String {
        let mut out = String::new();
        self.prefixes.iter().for_each(|p| out.push_str(p));
        out.push_str(&self.stem);
        self.suffixes.iter().for_each(|s| out.push_str(s));
        out
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub score: i32,
    pub pattern_matches: Vec<PatternMatch>,
}

fn non_empty(parts: &[&'static str]) -> Vec<SmolStr> {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| SmolStr::new(*p))
        .collect()
}

/// Prefix sequences that literally start `word`, conjunction then particle
/// then article, with the empty sequence last.
fn prefix_splits(word: &str) -> Vec<(Vec<SmolStr>, &str)> {
    let conjunctions = CONJUNCTIONS.iter().copied().chain(Some(""));
    let particles = PARTICLES.iter().copied().chain(Some(""));
    let articles = [DEFINITE_ARTICLE, ""];

    let mut splits = iproduct!(conjunctions, particles, articles.iter().copied())
        .filter_map(|(c, p, a)| {
            let seq = non_empty(&[c, p, a]);
            if seq.is_empty() {
                return None;
            }
            let joined = seq.iter().map(SmolStr::as_str).collect::<String>();
            word.strip_prefix(joined.as_str()).map(|rest| (seq, rest))
        })
        .collect::<Vec<_>>();

    splits.push((vec![], word));
    splits
}

/// Suffix sequences that literally end `rest`, plural marker then pronoun.
fn suffix_splits(rest: &str) -> impl Iterator<Item = (Vec<SmolStr>, &str)> {
    let plurals = PLURAL_MARKERS.iter().copied().chain(Some(""));
    let pronouns = PRONOUNS.iter().copied().chain(Some(""));

    iproduct!(plurals, pronouns).filter_map(move |(pl, pr)| {
        let seq = non_empty(&[pl, pr]);
        let joined = seq.iter().map(SmolStr::as_str).collect::<String>();
        rest.strip_suffix(joined.as_str()).map(|stem| (seq, stem))
    })
}

/// All decompositions of `word` (already stripped of diacritics) whose stem
/// has at least `min_stem_length` characters, all in the Arabic block.
pub fn generate(word: &str, min_stem_length: usize) -> Vec<Candidate> {
    let mut candidates = vec![];

    for (prefixes, rest) in prefix_splits(word) {
        if rest.is_empty() {
            continue;
        }

        for (suffixes, stem) in suffix_splits(rest) {
            if stem.chars().count() < min_stem_length || !stem.chars().all(is_arabic) {
                continue;
            }

            candidates.push(Candidate {
                prefixes: prefixes.clone(),
                stem: SmolStr::new(stem),
                suffixes,
            });
        }
    }

    candidates
}
