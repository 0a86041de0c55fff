//! Analysis results.
use std::fmt;

use serde::Serialize;
use smol_str::SmolStr;

use super::pattern::PatternMatch;
use crate::types::{PatternEntry, RootEntry};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ToolwordAnalysis {
    pub word: SmolStr,
    pub voweled: SmolStr,
    pub word_class: SmolStr,
    pub prefix_class: SmolStr,
    pub suffix_class: SmolStr,
}

/// Lookups run against the selected stem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StemAnalysis {
    /// Length in characters
    pub length: usize,
    /// Roots spelled exactly like the stem
    pub candidate_roots: Vec<RootEntry>,
    /// Patterns whose stripped template is exactly the stem
    pub candidate_patterns: Vec<PatternEntry>,
    /// Template matches of the selected candidate
    pub pattern_roots: Vec<PatternMatch>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MorphologicalAnalysis {
    pub word: SmolStr,
    pub prefixes: Vec<SmolStr>,
    pub stem: SmolStr,
    pub suffixes: Vec<SmolStr>,
    pub score: i32,
    /// The score reached the acceptance threshold
    pub accepted: bool,
    pub stem_analysis: StemAnalysis,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RootAnalysis {
    pub word: SmolStr,
    pub root: SmolStr,
    pub vector: SmolStr,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisResult {
    Toolword(ToolwordAnalysis),
    Morphological(MorphologicalAnalysis),
    RootDirect(RootAnalysis),
}

impl AnalysisResult {
    /// The normalized word that was analyzed.
    pub fn word(&self) -> &str {
        match self {
            AnalysisResult::Toolword(t) => &t.word,
            AnalysisResult::Morphological(m) => &m.word,
            AnalysisResult::RootDirect(r) => &r.word,
        }
    }

    pub fn as_morphological(&self) -> Option<&MorphologicalAnalysis> {
        match self {
            AnalysisResult::Morphological(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_toolword(&self) -> bool {
        matches!(self, AnalysisResult::Toolword(_))
    }
}

fn join_or_none(parts: &[SmolStr]) -> String {
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.iter().map(SmolStr::as_str).collect::<Vec<_>>().join("+")
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AnalysisResult::Toolword(t) => write!(f, "tool word: {} ({})", t.word, t.word_class),
            AnalysisResult::Morphological(m) => write!(
                f,
                "prefixes: {} + stem: {} + suffixes: {}",
                join_or_none(&m.prefixes),
                m.stem,
                join_or_none(&m.suffixes)
            ),
            AnalysisResult::RootDirect(r) => write!(f, "root: {}", r.root),
        }
    }
}
