//! Offline evaluation of the fallback classifier.

use super::embedder::Embedder;
#[cfg(feature = "bert")]
use super::linear::TrainingOptions;
use super::model::EmbeddingClassifier;
use crate::config::{Config, EmbedderKind};
use crate::corpus::MbtiRecord;
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::info;

/// Accuracy on the train and test parts of a seeded split.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub embedder: &'static str,
    pub train_size: usize,
    pub test_size: usize,
    pub train_accuracy: f64,
    pub test_accuracy: f64,
    pub elapsed: Duration,
}

impl EvaluationReport {
    /// Test accuracy relative to guessing one of 16 types uniformly.
    pub fn vs_random(&self) -> f64 {
        self.test_accuracy / (1.0 / 16.0)
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Embedder: {}", self.embedder)?;
        writeln!(f, "Train: {} | Test: {}", self.train_size, self.test_size)?;
        writeln!(f, "  Train accuracy: {:.2}%", self.train_accuracy * 100.0)?;
        writeln!(f, "  Test accuracy:  {:.2}%", self.test_accuracy * 100.0)?;
        writeln!(f, "  vs Random: {:.1}x better", self.vs_random())?;
        write!(f, "  Time: {:.2}s", self.elapsed.as_secs_f64())
    }
}

/// Shuffle, split, train on the first part and score both parts.
pub fn evaluate(records: &[MbtiRecord], config: &Config) -> Result<EvaluationReport> {
    let (train, test) = split_records(
        records,
        config.evaluation.train_split,
        config.evaluation.seed,
    )?;
    info!(train = train.len(), test = test.len(), "evaluating classifier");

    let start = Instant::now();
    match config.classifier.embedder {
        EmbedderKind::Tfidf => {
            let classifier = EmbeddingClassifier::train_tfidf(&train, &config.classifier)?;
            score(&classifier, &train, &test, start)
        }
        EmbedderKind::Bert => evaluate_bert(&train, &test, config, start),
    }
}

#[cfg(feature = "bert")]
fn evaluate_bert(
    train: &[MbtiRecord],
    test: &[MbtiRecord],
    config: &Config,
    start: Instant,
) -> Result<EvaluationReport> {
    let embedder = super::embedder::BertEmbedder::new()?;
    let options = TrainingOptions::from(&config.classifier);
    let classifier = EmbeddingClassifier::train(embedder, train, &options)?;
    score(&classifier, train, test, start)
}

#[cfg(not(feature = "bert"))]
fn evaluate_bert(
    _train: &[MbtiRecord],
    _test: &[MbtiRecord],
    _config: &Config,
    _start: Instant,
) -> Result<EvaluationReport> {
    Err(Error::Embedding(
        "BERT not enabled. Compile with: cargo build --features bert".to_string(),
    ))
}

fn score<E: Embedder>(
    classifier: &EmbeddingClassifier<E>,
    train: &[MbtiRecord],
    test: &[MbtiRecord],
    start: Instant,
) -> Result<EvaluationReport> {
    let train_accuracy = accuracy(classifier, train)?;
    let test_accuracy = accuracy(classifier, test)?;
    info!(train_accuracy, test_accuracy, "evaluation finished");

    Ok(EvaluationReport {
        embedder: classifier.embedder().name(),
        train_size: train.len(),
        test_size: test.len(),
        train_accuracy,
        test_accuracy,
        elapsed: start.elapsed(),
    })
}

/// Fraction of `records` whose label is predicted exactly.
pub fn accuracy<E: Embedder>(
    classifier: &EmbeddingClassifier<E>,
    records: &[MbtiRecord],
) -> Result<f64> {
    if records.is_empty() {
        return Ok(0.0);
    }
    let mut correct = 0;
    for record in records {
        if classifier.predict_text(&record.posts)? == record.mbti_type {
            correct += 1;
        }
    }
    Ok(correct as f64 / records.len() as f64)
}

/// Seeded shuffle followed by a `train_ratio` split. Both parts must be non-empty.
pub fn split_records(
    records: &[MbtiRecord],
    train_ratio: f64,
    seed: u64,
) -> Result<(Vec<MbtiRecord>, Vec<MbtiRecord>)> {
    if !(0.0..=1.0).contains(&train_ratio) {
        return Err(Error::Dataset(format!(
            "train split must be within [0, 1], got {}",
            train_ratio
        )));
    }

    let mut shuffled = records.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let train_size = (records.len() as f64 * train_ratio) as usize;
    if train_size == 0 || train_size == records.len() {
        return Err(Error::Dataset(format!(
            "split of {} records at {} leaves an empty part",
            records.len(),
            train_ratio
        )));
    }
    let test = shuffled.split_off(train_size);
    Ok((shuffled, test))
}
