use crate::module::{simple_score, weighted_score, CalculateScore, ScoreWeights};
use serde::Deserialize;

/// Main configuration structure for Ripple-Core
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub analyzer: AnalyzerConfig,
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub score: ScoreConfig,
}

/// Response analyzer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    /// Identifier of the analyzer instance
    pub id: String,

    /// Built-in parser names, in the order they run
    pub parsers: Vec<String>,
}

/// Item pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Identifier of the pipeline instance
    pub id: String,

    /// Stop at the first processor error
    #[serde(rename = "fail-fast", default)]
    pub fail_fast: bool,

    /// Built-in processor names, in the order they run
    pub processors: Vec<String>,

    /// Fields checked by the `require-fields` processor
    #[serde(rename = "required-fields", default)]
    pub required_fields: Vec<String>,
}

/// How stage scores are computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreStrategy {
    #[default]
    Simple,
    Weighted,
}

/// Score calculator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreConfig {
    #[serde(default)]
    pub strategy: ScoreStrategy,

    /// Only read by the weighted strategy
    #[serde(flatten)]
    pub weights: ScoreWeights,
}

impl ScoreConfig {
    /// Builds the score calculator this configuration describes
    pub fn calculator(&self) -> CalculateScore {
        match self.strategy {
            ScoreStrategy::Simple => simple_score(),
            ScoreStrategy::Weighted => weighted_score(self.weights),
        }
    }
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            strategy: ScoreStrategy::Simple,
            weights: ScoreWeights::default(),
        }
    }
}
