use std::path::Path;

use serde::{Deserialize, Serialize};

/// Score magnitudes. Positive fields are bonuses, the `undetached_*` fields
/// are subtracted when an affix was left inside the stem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub length_prior: i32,
    pub pattern_verified: i32,
    pub pattern_unverified: i32,
    pub prefix_present: i32,
    pub plural_suffix: i32,
    pub pronoun_suffix: i32,
    pub definite_article: i32,
    /// Conjunction, particle, article and plural marker all detached
    pub rich_segmentation: i32,
    pub undetached_article: i32,
    pub undetached_particle_article: i32,
    pub undetached_conjunction_article: i32,
    pub undetached_plural: i32,
}

impl ScoringWeights {
    pub const fn new() -> ScoringWeights {
        ScoringWeights {
            length_prior: 15,
            pattern_verified: 140,
            pattern_unverified: 70,
            prefix_present: 10,
            plural_suffix: 60,
            pronoun_suffix: 30,
            definite_article: 30,
            rich_segmentation: 40,
            undetached_article: 120,
            undetached_particle_article: 50,
            undetached_conjunction_article: 60,
            undetached_plural: 50,
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights::new()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// The first candidate scoring at least this much is selected
    pub acceptance_threshold: i32,
    pub max_pattern_matches: usize,
    pub min_stem_length: usize,
    pub weights: ScoringWeights,
}

impl AnalyzerConfig {
    pub const fn new() -> AnalyzerConfig {
        AnalyzerConfig {
            acceptance_threshold: 170,
            max_pattern_matches: 3,
            min_stem_length: 2,
            weights: ScoringWeights::new(),
        }
    }

    /// Reads a JSON config. Missing fields keep their defaults.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<AnalyzerConfig, ConfigError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig::new()
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Failed to read config")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: AnalyzerConfig =
            serde_json::from_str(r#"{"acceptance_threshold": 200, "weights": {"plural_suffix": 80}}"#)
                .unwrap();

        assert_eq!(config.acceptance_threshold, 200);
        assert_eq!(config.max_pattern_matches, 3);
        assert_eq!(config.weights.plural_suffix, 80);
        assert_eq!(config.weights.pattern_verified, 140);
    }

    #[test]
    fn from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sarf.json");
        std::fs::write(&path, serde_json::to_string(&AnalyzerConfig::default()).unwrap()).unwrap();

        assert_eq!(AnalyzerConfig::from_path(&path).unwrap(), AnalyzerConfig::new());

        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            AnalyzerConfig::from_path(&path),
            Err(ConfigError::Json(_))
        ));
    }
}
