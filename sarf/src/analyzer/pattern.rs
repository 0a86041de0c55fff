//! Root extraction by matching a stem against pattern templates.
use serde::Serialize;
use smol_str::SmolStr;

use crate::constants::{DEFINITE_ARTICLE, MAX_ROOT_LENGTH, MIN_ROOT_LENGTH, ROOT_SLOTS};
use crate::database::LexicalDatabase;
use crate::tokenizer::is_arabic_letter;
use crate::types::PatternEntry;

/// A root read off a stem through one pattern template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
    /// Radicals joined by spaces, e.g. `ك ت ب`
    pub root: SmolStr,
    pub pattern_id: SmolStr,
    /// Stripped template, e.g. `فاعل`
    pub template: SmolStr,
    #[serde(rename = "type")]
    pub kind: SmolStr,
    /// The root exists in the root table
    pub verified: bool,
    pub case: SmolStr,
    pub number_gender: SmolStr,
    pub transitivity: SmolStr,
}

/// Letters of `stem` sitting in the template's root slots, or `None` when
/// the stem doesn't fit the template.
fn capture(template: &str, stem: &str) -> Option<Vec<char>> {
    let mut slots = Vec::with_capacity(MAX_ROOT_LENGTH);
    let mut template = template.chars();
    let mut stem = stem.chars();

    loop {
        match (template.next(), stem.next()) {
            (None, None) => return Some(slots),
            (Some(t), Some(s)) => {
                if ROOT_SLOTS.contains(&t) {
                    if !is_arabic_letter(s) {
                        return None;
                    }
                    slots.push(s);
                } else if t != s {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

fn match_one(db: &LexicalDatabase, pattern: &PatternEntry, stem: &str) -> Option<PatternMatch> {
    let template = pattern.stripped();
    if template.is_empty() {
        return None;
    }

    let slots = capture(template, stem)?;
    if slots.len() < MIN_ROOT_LENGTH {
        return None;
    }

    let radicals = &slots[..slots.len().min(MAX_ROOT_LENGTH)];
    let compact = radicals.iter().collect::<String>();
    let root = radicals
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    Some(PatternMatch {
        root: root.into(),
        pattern_id: pattern.id.clone(),
        template: template.into(),
        kind: pattern.kind.clone(),
        verified: db.has_root(&compact),
        case: pattern.case.clone(),
        number_gender: pattern.number_gender.clone(),
        transitivity: pattern.transitivity.clone(),
    })
}

/// Matches `stem`, and the stem without a leading article, against every
/// pattern. Verified roots come first; at most `limit` matches are kept.
pub fn match_patterns(db: &LexicalDatabase, stem: &str, limit: usize) -> Vec<PatternMatch> {
    let mut stems = vec![stem];
    if let Some(rest) = stem.strip_prefix(DEFINITE_ARTICLE) {
        if !rest.is_empty() {
            stems.push(rest);
        }
    }

    let mut matches = stems
        .into_iter()
        .flat_map(|s| db.patterns().iter().filter_map(move |p| match_one(db, p, s)))
        .collect::<Vec<_>>();

    matches.sort_by_key(|m| !m.verified);
    matches.truncate(limit);
    matches
}
