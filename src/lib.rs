//! # MBTI Predictor
//!
//! Predicts a Myers-Briggs type from answers to a fixed multiple-choice
//! questionnaire.
//!
//! ## How It Works
//!
//! - **Trait scoring**: every answer that exactly matches an option text
//!   counts one vote for that option's trait. Each axis takes the letter with
//!   more votes; ties go to I, N, F and P.
//! - **Classifier fallback**: when scoring is configured to require a
//!   minimum number of matched answers and too few match, the answers are
//!   joined and classified by an embedding model (TF-IDF by default, BERT
//!   with the `bert` feature) trained on a labeled corpus.
//! - **Explanations**: each of the 16 types has a fixed description.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mbti_predictor::{Config, Predictor};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_or_default("config.toml")?;
//!     let predictor = Predictor::from_config(&config)?;
//!
//!     let result = predictor.predict(&[
//!         "I go out or call friends — I need people.",
//!         "Plan everything carefully before starting.",
//!     ]);
//!
//!     println!("MBTI Type: {}", result.mbti); // ENFJ
//!     println!("{}", result.explanation);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `cli` | Include CLI binary | ✓ |
//! | `bert` | Sentence embeddings via rust-bert (requires libtorch) | ✗ |
//!
//! ## Training Data
//!
//! The fallback trains on a CSV with `type` and `posts` columns, such as the
//! Kaggle MBTI dataset (`data/mbti_1.csv`). A small sample corpus ships with
//! the crate at `data/sample_corpus.csv`.

pub mod classifier;
pub mod config;
pub mod corpus;
pub mod error;
pub mod explanations;
pub mod mbti;
pub mod predictor;
pub mod questions;
pub mod scoring;

pub use config::Config;
pub use corpus::{load_corpus, MbtiRecord};
pub use error::{Error, Result, ScoringError};
pub use explanations::ExplanationTable;
pub use mbti::{Axis, MbtiType, Trait};
pub use predictor::{Prediction, PredictionMethod, Predictor};
pub use questions::{AnswerOption, Question, QuestionCatalog};
pub use scoring::{ScoreCard, TraitScorer, TraitScores};
