//! Configuration structures for the predictor.
//!
//! Settings are read from a TOML file with one table per concern:
//!
//! ```toml
//! [data]
//! csv_path = "data/mbti_1.csv"
//! questions_path = "data/questions.json"
//!
//! [scoring]
//! min_matched_answers = 0
//!
//! [classifier]
//! embedder = "tfidf"        # or "bert" (requires the `bert` feature)
//! max_features = 1000
//! learning_rate = 0.5
//! max_iterations = 300
//! tolerance = 1e-6
//! l2_penalty = 1e-4
//! model_path = "models/classifier.json"
//!
//! [evaluation]
//! train_split = 0.8
//! seed = 42
//! ```
//!
//! Every table and key is optional; missing values take the defaults above
//! (`model_path` and `questions_path` default to unset).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Main configuration structure loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Data loading configuration
    pub data: DataConfig,
    /// Trait scoring configuration
    pub scoring: ScoringConfig,
    /// Fallback classifier configuration
    pub classifier: ClassifierConfig,
    /// Offline evaluation configuration
    pub evaluation: EvaluationConfig,
}

/// Data loading configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Path to the labeled `type,posts` CSV corpus
    pub csv_path: String,
    /// Path to a question catalog; the bundled catalog is used when unset
    pub questions_path: Option<String>,
}

/// Trait scoring configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Minimum number of matched answers before trait scores are trusted.
    /// `0` disables the check, so scoring never fails.
    pub min_matched_answers: usize,
}

/// Text embedding used by the fallback classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedderKind {
    /// TF-IDF vectorizer fitted on the training corpus
    #[default]
    Tfidf,
    /// Pretrained sentence embeddings (all-MiniLM-L6-v2)
    Bert,
}

/// Fallback classifier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Embedding function
    pub embedder: EmbedderKind,
    /// Maximum number of TF-IDF features
    pub max_features: usize,
    /// Gradient descent step size
    pub learning_rate: f64,
    /// Maximum number of full-batch iterations
    pub max_iterations: usize,
    /// Stop once the loss improves by less than this
    pub tolerance: f64,
    /// L2 regularization strength
    pub l2_penalty: f64,
    /// Where a trained TF-IDF model is cached between runs
    pub model_path: Option<String>,
}

/// Offline evaluation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluationConfig {
    /// Train/test split ratio (e.g., 0.8 = 80% train, 20% test)
    pub train_split: f64,
    /// Seed for the shuffle before splitting
    pub seed: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            csv_path: "data/mbti_1.csv".to_string(),
            questions_path: None,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            embedder: EmbedderKind::Tfidf,
            max_features: 1000,
            learning_rate: 0.5,
            max_iterations: 300,
            tolerance: 1e-6,
            l2_penalty: 1e-4,
            model_path: None,
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            train_split: 0.8,
            seed: 42,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `path`, or use the defaults with a warning when it does not exist.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "config file not found, using defaults");
                Ok(Config::default())
            }
            other => other,
        }
    }
}
