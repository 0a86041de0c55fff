//! Candidate scoring and selection.
//!
//! Scores are plain integers, higher is better. Every magnitude comes from
//! [`ScoringWeights`] except the class compatibility terms, which are fixed.
use super::candidate::{Candidate, ScoredCandidate};
use super::config::{AnalyzerConfig, ScoringWeights};
use super::pattern::{match_patterns, PatternMatch};
use crate::constants::{
    CONJUNCTIONS, DEFINITE_ARTICLE, IMPERFECT_MARKERS, MIN_ROOT_LENGTH, PARTICLES, PLURAL_MARKERS,
};
use crate::database::LexicalDatabase;
use crate::tokenizer::weak::weak_variants;

#[inline(always)]
fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut rest = haystack.chars();
    needle.chars().all(|c| rest.any(|h| h == c))
}

/// 100 per radical of the longest root spelled, in order, inside `stem`.
pub fn root_plausibility(db: &LexicalDatabase, stem: &str) -> i32 {
    let best = db
        .roots()
        .iter()
        .filter(|r| r.len() >= MIN_ROOT_LENGTH)
        .filter(|r| is_subsequence(r.compact(), stem))
        .map(|r| r.len())
        .max()
        .unwrap_or(0);

    best as i32 * 100
}

fn weak_plausibility(db: &LexicalDatabase, stem: &str) -> i32 {
    weak_variants(stem)
        .iter()
        .map(|v| root_plausibility(db, v))
        .max()
        .unwrap_or(0)
        / 2
}

#[derive(Default)]
struct Signals {
    noun: i32,
    verb: i32,
}

/// How well the chosen affixes, their classes and the matched pattern types
/// agree with each other.
pub fn class_compatibility(
    db: &LexicalDatabase,
    candidate: &Candidate,
    matches: &[PatternMatch],
) -> i32 {
    let prefix_classes = candidate
        .prefixes
        .iter()
        .map(|p| db.prefix_class(p).unwrap_or(""))
        .collect::<Vec<_>>();
    let suffix_classes = candidate
        .suffixes
        .iter()
        .map(|s| db.suffix_class(s).unwrap_or(""))
        .collect::<Vec<_>>();

    let has_article = candidate.has_definite_article();
    let mut score = 0;

    if let Some(first) = candidate.prefixes.first() {
        if CONJUNCTIONS.contains(&first.as_str()) {
            score += 10;
        }
        if candidate.prefixes[1..]
            .iter()
            .any(|p| PARTICLES.contains(&p.as_str()))
        {
            score += 8;
        }
        if candidate.prefixes.last().map(|p| p == DEFINITE_ARTICLE) == Some(true) {
            score += 12;
        }
    }

    let any_class = |family: char| {
        prefix_classes
            .iter()
            .chain(suffix_classes.iter())
            .any(|c| c.starts_with(family))
    };

    let mut signals = Signals::default();
    if has_article {
        signals.noun += 2;
    }
    if candidate.has_plural() {
        signals.noun += 2;
    }
    if any_class('N') {
        signals.noun += 1;
    }
    if any_class('V') {
        signals.verb += 1;
    }

    let starts_imperfect = candidate
        .stem
        .chars()
        .next()
        .map(|c| IMPERFECT_MARKERS.contains(&c))
        .unwrap_or(false);
    if starts_imperfect && candidate.stem.chars().count() >= 3 && !has_article {
        signals.verb += 1;
    }

    if matches.iter().any(|m| m.kind.to_lowercase().contains("verb")) {
        signals.verb += 2;
    }
    if matches.iter().any(|m| m.kind.to_lowercase().contains("noun")) {
        signals.noun += 2;
    }

    if signals.noun != 0 && signals.verb != 0 {
        score -= 8;
    } else if signals.noun != signals.verb {
        score += 10;
    }

    let mut families = suffix_classes.iter().filter_map(|c| c.chars().next());
    if let Some(family) = families.next() {
        if families.all(|f| f == family) {
            score += 6;
        }
    }

    if has_article && suffix_classes.iter().any(|c| c.starts_with('V')) {
        score -= 15;
    }

    let unresolved = prefix_classes
        .iter()
        .chain(suffix_classes.iter())
        .filter(|c| c.is_empty())
        .count();
    score -= 2 * unresolved as i32;

    score
}

/// Bonuses for detached affixes and penalties for affixes left in the stem.
fn segmentation(weights: &ScoringWeights, candidate: &Candidate) -> i32 {
    let stem = candidate.stem.as_str();
    let has_article = candidate.has_definite_article();
    let has_plural = candidate.has_plural();
    let mut score = 0;

    if !candidate.prefixes.is_empty() {
        score += weights.prefix_present;
    }
    if has_plural {
        score += weights.plural_suffix;
    }
    if candidate.has_pronoun() {
        score += weights.pronoun_suffix;
    }
    if has_article {
        score += weights.definite_article;
    }

    let has_conjunction = CONJUNCTIONS.iter().any(|c| candidate.has_prefix(c));
    let has_particle = PARTICLES.iter().any(|p| candidate.has_prefix(p));
    if has_conjunction && has_particle && has_article && has_plural {
        score += weights.rich_segmentation;
    }

    if !has_article {
        let starts_with_after = |lead: &[&str]| {
            lead.iter().any(|l| {
                stem.strip_prefix(l)
                    .map(|rest| rest.starts_with(DEFINITE_ARTICLE))
                    .unwrap_or(false)
            })
        };

        if stem.starts_with(DEFINITE_ARTICLE) {
            score -= weights.undetached_article;
        }
        if starts_with_after(PARTICLES) {
            score -= weights.undetached_particle_article;
        }
        if starts_with_after(CONJUNCTIONS) {
            score -= weights.undetached_conjunction_article;
        }
    }

    if !has_plural && PLURAL_MARKERS.iter().any(|m| stem.ends_with(m)) {
        score -= weights.undetached_plural;
    }

    score
}

pub fn score(db: &LexicalDatabase, config: &AnalyzerConfig, candidate: Candidate) -> ScoredCandidate {
    let weights = &config.weights;
    let stem = candidate.stem.as_str();
    let length = stem.chars().count();
    let mut score = 0;

    if (3..=6).contains(&length) {
        score += weights.length_prior;
    }

    score += root_plausibility(db, stem);
    score += weak_plausibility(db, stem);

    let matches = match_patterns(db, stem, config.max_pattern_matches);
    if matches.iter().any(|m| m.verified) {
        score += weights.pattern_verified;
    } else if !matches.is_empty() {
        score += weights.pattern_unverified;
    }

    score += class_compatibility(db, &candidate, &matches);
    score += segmentation(weights, &candidate);

    log::trace!(
        "{:?} + {} + {:?}: {}",
        candidate.prefixes,
        candidate.stem,
        candidate.suffixes,
        score
    );

    ScoredCandidate {
        candidate,
        score,
        pattern_matches: matches,
    }
}

/// Picks the first candidate, by descending score, that reaches `threshold`,
/// else the best one. Equal scores keep their enumeration order. The flag
/// tells whether the threshold was reached.
pub fn select(mut scored: Vec<ScoredCandidate>, threshold: i32) -> Option<(ScoredCandidate, bool)> {
    if scored.is_empty() {
        return None;
    }

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    let accepted = scored.iter().position(|c| c.score >= threshold);

    Some((scored.swap_remove(accepted.unwrap_or(0)), accepted.is_some()))
}
