//! High-level API for MBTI personality prediction
//!
//! [`Predictor`] owns everything a prediction needs: the question catalog,
//! the explanation table and the trained fallback classifier. All of it is
//! immutable after construction, so one predictor can serve any number of
//! threads.
//!
//! # Quick Start
//!
//! ```no_run
//! use mbti_predictor::{Config, Predictor};
//!
//! let predictor = Predictor::from_config(&Config::default())?;
//! let result = predictor.predict(&["I go out or call friends — I need people."]);
//! println!("{}: {}", result.mbti, result.explanation); // ENFP: ...
//! # Ok::<(), mbti_predictor::Error>(())
//! ```
//!
//! # Prediction Policy
//!
//! 1. Trait scoring against the catalog.
//! 2. Only if scoring fails, the embedding classifier on the joined answers.
//! 3. The type's explanation, or a generic sentence naming the type.
//!
//! With the default configuration trait scoring cannot fail, so step 2
//! only runs when `scoring.min_matched_answers` is set.

use crate::classifier::{build_classifier, join_answers, TextClassifier};
use crate::config::{Config, EmbedderKind};
use crate::corpus::load_corpus;
use crate::error::Result;
use crate::explanations::ExplanationTable;
use crate::mbti::MbtiType;
use crate::questions::QuestionCatalog;
use crate::scoring::{tally, TraitScorer};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, warn};

/// Which path produced a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PredictionMethod {
    /// Deterministic trait scoring
    TraitBased,
    /// Embedding classifier fallback
    Classifier,
    /// Both paths failed; tie-break defaults over the partial scores
    Degraded,
}

impl fmt::Display for PredictionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PredictionMethod::TraitBased => "trait-based",
            PredictionMethod::Classifier => "classifier",
            PredictionMethod::Degraded => "degraded",
        };
        write!(f, "{}", name)
    }
}

/// Prediction result returned to the serving layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// The predicted MBTI type (e.g., "INTJ")
    pub mbti: MbtiType,

    /// Description of the type
    pub explanation: String,

    /// Path that produced `mbti`
    pub method: PredictionMethod,
}

/// Main predictor interface for MBTI personality classification
pub struct Predictor {
    catalog: QuestionCatalog,
    explanations: ExplanationTable,
    scorer: TraitScorer,
    classifier: Box<dyn TextClassifier>,
}

impl Predictor {
    /// Assemble a predictor from already-built parts.
    pub fn new(
        catalog: QuestionCatalog,
        explanations: ExplanationTable,
        classifier: Box<dyn TextClassifier>,
    ) -> Self {
        Predictor {
            catalog,
            explanations,
            scorer: TraitScorer::new(),
            classifier,
        }
    }

    pub fn with_scorer(mut self, scorer: TraitScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Load the catalog and corpus named by `config` and train the fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The question catalog cannot be read or is invalid
    /// - The corpus cannot be read or has invalid labels
    /// - The classifier cannot be built
    ///
    /// None of these are recoverable; callers should not serve predictions.
    pub fn from_config(config: &Config) -> Result<Self> {
        let start = Instant::now();
        info!("starting MBTI predictor");

        let catalog = match &config.data.questions_path {
            Some(path) => QuestionCatalog::load(path)?,
            None => QuestionCatalog::builtin()?,
        };
        info!(questions = catalog.len(), "question catalog ready");

        let cached = config.classifier.embedder == EmbedderKind::Tfidf
            && config
                .classifier
                .model_path
                .as_deref()
                .is_some_and(|path| Path::new(path).exists());
        let records = if cached {
            Vec::new()
        } else {
            load_corpus(&config.data.csv_path)?
        };
        let classifier = build_classifier(&records, &config.classifier)?;

        let predictor = Predictor::new(catalog, ExplanationTable::standard(), classifier)
            .with_scorer(
                TraitScorer::new().with_min_matched_answers(config.scoring.min_matched_answers),
            );
        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "MBTI predictor ready"
        );
        Ok(predictor)
    }

    /// Predict a type from answers aligned with the catalog's questions.
    ///
    /// Never fails: scoring errors route to the classifier, classifier errors
    /// degrade to the tie-break defaults.
    pub fn predict<S: AsRef<str>>(&self, answers: &[S]) -> Prediction {
        info!(answers = answers.len(), "predicting personality");

        let (mbti, method) = match self.scorer.score(&self.catalog, answers) {
            Ok(card) => (card.mbti, PredictionMethod::TraitBased),
            Err(e) => {
                warn!(error = %e, "trait-based prediction failed, falling back to classifier");
                match self.classifier.classify_text(&join_answers(answers)) {
                    Ok(mbti) => (mbti, PredictionMethod::Classifier),
                    Err(e) => {
                        error!(error = %e, "classifier fallback failed");
                        (tally(&self.catalog, answers).resolve(), PredictionMethod::Degraded)
                    }
                }
            }
        };

        let explanation = self.explanations.describe(mbti).into_owned();
        info!(method = %method, mbti = %mbti, "prediction completed");

        Prediction {
            mbti,
            explanation,
            method,
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn explanations(&self) -> &ExplanationTable {
        &self.explanations
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MBTI Type: {}", self.mbti)?;
        writeln!(f, "Method: {}", self.method)?;
        write!(f, "\n{}", self.explanation)
    }
}
