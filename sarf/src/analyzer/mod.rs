//! Morphological analysis of single words and running text.
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use smol_str::SmolStr;

use self::worker::AnalysisWorker;
use crate::database::{DatabaseLoadError, LexicalDatabase};
use crate::tokenizer::{strip_diacritics, Tokenize};

pub mod candidate;
pub mod config;
pub mod pattern;
pub mod result;
pub mod scoring;
mod worker;

pub use self::config::{AnalyzerConfig, ConfigError, ScoringWeights};
pub use self::result::{
    AnalysisResult, MorphologicalAnalysis, RootAnalysis, StemAnalysis, ToolwordAnalysis,
};

/// A token of running text and its best analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenAnalysis {
    /// Byte offset of the token in the text
    pub offset: usize,
    pub token: SmolStr,
    pub best: Option<AnalysisResult>,
}

/// Analyzes words against a shared, read-only [`LexicalDatabase`].
#[derive(Clone, Debug)]
pub struct Analyzer {
    db: Arc<LexicalDatabase>,
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Loads the database at `path`, a directory or a zip archive.
    pub fn build<P: AsRef<Path>>(path: P) -> Result<Analyzer, DatabaseLoadError> {
        let db = LexicalDatabase::open(path)?;
        Ok(Analyzer::new(Arc::new(db)))
    }

    pub fn new(db: Arc<LexicalDatabase>) -> Analyzer {
        Analyzer::with_config(db, AnalyzerConfig::default())
    }

    pub fn with_config(db: Arc<LexicalDatabase>, config: AnalyzerConfig) -> Analyzer {
        Analyzer { db, config }
    }

    pub fn database(&self) -> &Arc<LexicalDatabase> {
        &self.db
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    #[inline]
    pub fn analyze(&self, word: &str) -> Vec<AnalysisResult> {
        self.analyze_with_config(word, &self.config)
    }

    /// Tool word entries if the word is one, else the selected
    /// decomposition, else roots spelled exactly like the word. Empty input
    /// gives no results.
    pub fn analyze_with_config(&self, word: &str, config: &AnalyzerConfig) -> Vec<AnalysisResult> {
        let word = word.trim();
        if word.is_empty() {
            return vec![];
        }

        let normalized = strip_diacritics(word);
        if normalized.is_empty() {
            return vec![];
        }

        AnalysisWorker::new(Arc::clone(&self.db), normalized.into(), config.clone()).analyze()
    }

    /// Analyzes every word of `text`, keeping the first result of each.
    pub fn analyze_text(&self, text: &str) -> Vec<TokenAnalysis> {
        text.word_indices()
            .map(|(offset, token)| TokenAnalysis {
                offset,
                token: token.into(),
                best: self.analyze(token).into_iter().next(),
            })
            .collect()
    }
}
