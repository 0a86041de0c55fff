//! Words of a text built on a given root.
//!
//! A query is the root's letters, optionally followed by letters to exclude
//! in parentheses: `كتب (ن،ي)`.
use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use serde::Serialize;
use smol_str::SmolStr;
use thiserror::Error;

use crate::constants::{
    AUGMENT_LETTERS, HAMZA_FORMS, MAX_BRANCH_LENGTH, MIN_BRANCH_LENGTH, WEAK_RADICAL_FORMS,
};
use crate::tokenizer::{is_arabic, strip_diacritics, Tokenize};

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BranchQueryError {
    #[error("No root letters in query {0:?}")]
    NoRootLetters(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchQuery {
    letters: Vec<char>,
    excluded: Vec<SmolStr>,
}

/// A word found in the text and how often it occurs, as written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub word: SmolStr,
    pub count: usize,
}

#[inline(always)]
fn is_weak_radical(ch: char) -> bool {
    matches!(ch, 'و' | 'ي')
}

#[inline(always)]
fn radical_matches(radical: char, ch: char) -> bool {
    match radical {
        'ء' => HAMZA_FORMS.contains(&ch),
        r if is_weak_radical(r) => WEAK_RADICAL_FORMS.contains(&ch),
        r => r == ch,
    }
}

fn split_exclusions(input: &str) -> (&str, Option<&str>) {
    if let Some(open) = input.find('(') {
        let rest = &input[open + 1..];
        if let Some(close) = rest.find(')') {
            return (&input[..open], Some(&rest[..close]));
        }
    }
    (input, None)
}

impl BranchQuery {
    pub fn parse(input: &str) -> Result<BranchQuery, BranchQueryError> {
        let (root, excluded) = split_exclusions(input);

        let letters = strip_diacritics(root)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<Vec<_>>();
        if letters.is_empty() {
            return Err(BranchQueryError::NoRootLetters(input.to_string()));
        }

        let excluded = excluded
            .map(|list| {
                list.split(|c| c == '،' || c == ',')
                    .map(str::trim)
                    .filter(|x| !x.is_empty())
                    .map(SmolStr::new)
                    .collect()
            })
            .unwrap_or_default();

        Ok(BranchQuery { letters, excluded })
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn excluded(&self) -> &[SmolStr] {
        &self.excluded
    }

    fn allows(&self, ch: char) -> bool {
        self.letters.contains(&ch)
            || AUGMENT_LETTERS.contains(&ch)
            || (self.letters.contains(&'ء') && HAMZA_FORMS.contains(&ch))
            || (self.letters.iter().any(|&l| is_weak_radical(l))
                && WEAK_RADICAL_FORMS.contains(&ch))
    }

    fn contains_root(&self, chars: &[char]) -> bool {
        chars.windows(self.letters.len()).any(|window| {
            window
                .iter()
                .zip(&self.letters)
                .all(|(&ch, &radical)| radical_matches(radical, ch))
        })
    }

    /// Whether `word` is a branch of the root. Diacritics are ignored.
    pub fn matches(&self, word: &str) -> bool {
        let word = strip_diacritics(word);
        let chars = word.chars().collect::<Vec<_>>();

        (MIN_BRANCH_LENGTH..=MAX_BRANCH_LENGTH).contains(&chars.len())
            && chars.iter().all(|&c| is_arabic(c))
            && !self.excluded.iter().any(|x| word.contains(x.as_str()))
            && chars.iter().all(|&c| self.allows(c))
            && self.contains_root(&chars)
    }
}

/// Branches of the root in `text`, most frequent first. Equal counts keep
/// the order of first appearance.
pub fn search(text: &str, query: &BranchQuery) -> Vec<Branch> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut branches: Vec<Branch> = vec![];

    for (_, token) in text.word_indices() {
        if !query.matches(token) {
            continue;
        }

        match positions.entry(token) {
            Entry::Occupied(e) => branches[*e.get()].count += 1,
            Entry::Vacant(e) => {
                e.insert(branches.len());
                branches.push(Branch {
                    word: token.into(),
                    count: 1,
                });
            }
        }
    }

    branches.sort_by(|a, b| b.count.cmp(&a.count));
    log::debug!(
        "{} distinct branches of {}",
        branches.len(),
        query.letters.iter().collect::<String>()
    );

    branches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(input: &str) -> BranchQuery {
        BranchQuery::parse(input).unwrap()
    }

    #[test]
    fn parse_root_and_exclusions() {
        let q = query("ك ت بَ (ن، ي)");
        assert_eq!(q.letters(), &['ك', 'ت', 'ب']);
        assert_eq!(q.excluded(), &[SmolStr::new("ن"), SmolStr::new("ي")]);

        assert!(query("كتب").excluded().is_empty());
    }

    #[test]
    fn query_needs_root_letters() {
        assert_eq!(
            BranchQuery::parse("  "),
            Err(BranchQueryError::NoRootLetters("  ".to_string()))
        );
        assert!(BranchQuery::parse("(ا)").is_err());
    }

    #[test]
    fn root_must_be_contiguous() {
        let q = query("كتب");
        assert!(q.matches("كتب"));
        assert!(q.matches("مكتب"));
        assert!(q.matches("يكتبون"));
        assert!(q.matches("يَكْتُبُونَ"));
        assert!(!q.matches("مكتوب"));
    }

    #[test]
    fn only_augment_letters_around_the_root() {
        let q = query("كتب");
        // ة is not an augment letter
        assert!(!q.matches("مكتبة"));
        assert!(!q.matches("كتابة"));
    }

    #[test]
    fn hamza_and_weak_radicals() {
        assert!(query("سءل").matches("يسألون"));
        assert!(query("سءل").matches("سئل"));
        assert!(query("قول").matches("قال"));
        assert!(query("قول").matches("يقولون"));
        assert!(!query("قول").matches("قتل"));
    }

    #[test]
    fn exclusions_and_length() {
        assert!(!query("كتب (ن)").matches("يكتبون"));
        assert!(query("كتب (ن)").matches("مكتب"));

        assert!(!query("كت").matches("كت"));
        assert!(!query("كتب").matches("وسيكتبونهااااا"));
        assert!(!query("كتب").matches("كتبx"));
    }

    #[test]
    fn counts_by_frequency() {
        let text = "ومكتب يكتبون الدرس، ويكتبون يكتبون يَكْتُبُونَ.";
        let branches = search(text, &query("كتب"));

        assert_eq!(
            branches,
            vec![
                Branch { word: "يكتبون".into(), count: 2 },
                Branch { word: "ومكتب".into(), count: 1 },
                Branch { word: "ويكتبون".into(), count: 1 },
                Branch { word: "يَكْتُبُونَ".into(), count: 1 },
            ]
        );
        assert!(search("الدرس", &query("كتب")).is_empty());
    }
}
