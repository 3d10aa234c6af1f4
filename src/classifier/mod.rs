//! Fallback MBTI classifier for free text.
//!
//! Built once at startup from a labeled corpus and shared read-only by all
//! predictions afterwards:
//!
//! 1. An [`Embedder`] turns text into a fixed-length vector
//!    ([`TfidfVectorizer`] by default, [`BertEmbedder`] with the `bert`
//!    feature).
//! 2. A [`LogisticRegression`] maps the vector to one of the labels seen in
//!    the corpus.
//!
//! At inference time the questionnaire answers are joined with spaces and
//! classified as one text.
//!
//! ## Module Structure
//!
//! - [`embedder`] - Embedding trait and the BERT backend
//! - [`tfidf`] - TF-IDF vectorizer
//! - [`linear`] - Multinomial logistic regression
//! - [`labels`] - Label encoding
//! - [`model`] - Trained classifier, persistence and startup build
//! - [`evaluate`] - Train/test evaluation

pub mod embedder;
pub mod evaluate;
pub mod labels;
pub mod linear;
pub mod model;
pub mod tfidf;

#[cfg(feature = "bert")]
pub use embedder::BertEmbedder;
pub use embedder::Embedder;
pub use evaluate::{evaluate, EvaluationReport};
pub use labels::LabelEncoder;
pub use linear::{LogisticRegression, TrainingOptions};
pub use model::{build_classifier, EmbeddingClassifier};
pub use tfidf::TfidfVectorizer;

use crate::error::Result;
use crate::mbti::MbtiType;

/// Anything that can label free text with an MBTI type.
///
/// Implementations are immutable once built and shared across threads.
pub trait TextClassifier: Send + Sync {
    fn classify_text(&self, text: &str) -> Result<MbtiType>;
}

/// Join answers into one text, in order, separated by single spaces.
pub fn join_answers<S: AsRef<str>>(answers: &[S]) -> String {
    answers
        .iter()
        .map(|a| a.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}
