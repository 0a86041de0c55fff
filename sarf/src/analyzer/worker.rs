use std::sync::Arc;

use smol_str::SmolStr;

use super::candidate::generate;
use super::config::AnalyzerConfig;
use super::result::{
    AnalysisResult, MorphologicalAnalysis, RootAnalysis, StemAnalysis, ToolwordAnalysis,
};
use super::scoring::{score, select};
use crate::database::LexicalDatabase;

/// Analysis of one normalized word: tool word check, then morphological
/// analysis, then a direct root lookup if no stem survived.
pub struct AnalysisWorker {
    db: Arc<LexicalDatabase>,
    word: SmolStr,
    config: AnalyzerConfig,
}

impl AnalysisWorker {
    #[inline(always)]
    pub(crate) fn new(db: Arc<LexicalDatabase>, word: SmolStr, config: AnalyzerConfig) -> AnalysisWorker {
        AnalysisWorker { db, word, config }
    }

    pub fn analyze(self) -> Vec<AnalysisResult> {
        let toolwords = self.toolwords();
        if !toolwords.is_empty() {
            return toolwords;
        }

        if let Some(result) = self.morphological() {
            return vec![result];
        }

        self.direct_root().into_iter().collect()
    }

    fn toolwords(&self) -> Vec<AnalysisResult> {
        self.db
            .toolwords_for(&self.word)
            .map(|t| {
                AnalysisResult::Toolword(ToolwordAnalysis {
                    word: self.word.clone(),
                    voweled: t.voweled.clone(),
                    word_class: t.kind.clone(),
                    prefix_class: t.prefix_class.clone(),
                    suffix_class: t.suffix_class.clone(),
                })
            })
            .collect()
    }

    fn morphological(&self) -> Option<AnalysisResult> {
        let candidates = generate(&self.word, self.config.min_stem_length);
        log::trace!("{}: {} candidates", self.word, candidates.len());

        let scored = candidates
            .into_iter()
            .map(|c| score(&self.db, &self.config, c))
            .collect::<Vec<_>>();

        let (best, accepted) = select(scored, self.config.acceptance_threshold)?;
        log::debug!(
            "{}: selected {:?} + {} + {:?} ({}, accepted: {})",
            self.word,
            best.candidate.prefixes,
            best.candidate.stem,
            best.candidate.suffixes,
            best.score,
            accepted
        );

        let stem = best.candidate.stem;
        let stem_analysis = StemAnalysis {
            length: stem.chars().count(),
            candidate_roots: self.db.roots_for(&stem).cloned().collect(),
            candidate_patterns: self.db.patterns_for(&stem).cloned().collect(),
            pattern_roots: best.pattern_matches,
        };

        Some(AnalysisResult::Morphological(MorphologicalAnalysis {
            word: self.word.clone(),
            prefixes: best.candidate.prefixes,
            stem,
            suffixes: best.candidate.suffixes,
            score: best.score,
            accepted,
            stem_analysis,
        }))
    }

    /// First root spelled by the whole word, in table order. The same root
    /// often sits in both the noun and the verb shards.
    fn direct_root(&self) -> Option<AnalysisResult> {
        let root = self.db.roots_for(&self.word).next()?;

        Some(AnalysisResult::RootDirect(RootAnalysis {
            word: self.word.clone(),
            root: root.radicals.clone(),
            vector: root.vector.clone(),
        }))
    }
}
