//! Embedding classifier: an [`Embedder`] followed by a linear model.

use super::embedder::Embedder;
use super::labels::LabelEncoder;
use super::linear::{LogisticRegression, TrainingOptions};
use super::tfidf::TfidfVectorizer;
use super::{join_answers, TextClassifier};
use crate::config::{ClassifierConfig, EmbedderKind};
use crate::corpus::MbtiRecord;
use crate::error::{Error, Result};
use crate::mbti::MbtiType;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Texts embedded per batch while building the training matrix.
const EMBED_BATCH_SIZE: usize = 64;

/// A trained text classifier. Never mutated after training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingClassifier<E> {
    embedder: E,
    labels: LabelEncoder,
    model: LogisticRegression,
}

impl<E: Embedder> EmbeddingClassifier<E> {
    /// Embed every record's posts with `embedder` and fit the linear model.
    pub fn train(embedder: E, records: &[MbtiRecord], options: &TrainingOptions) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::Dataset("training corpus is empty".to_string()));
        }

        let start = Instant::now();
        let texts: Vec<String> = records.iter().map(|r| r.posts.clone()).collect();
        let features = embed_matrix(&embedder, &texts)?;
        info!(
            embedder = embedder.name(),
            samples = features.nrows(),
            dimension = features.ncols(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "corpus encoded"
        );

        let labels = LabelEncoder::fit(records.iter().map(|r| r.mbti_type));
        let targets: Vec<usize> = records
            .iter()
            .map(|r| {
                labels
                    .encode(r.mbti_type)
                    .ok_or_else(|| Error::Dataset(format!("unknown label {}", r.mbti_type)))
            })
            .collect::<Result<_>>()?;

        let start = Instant::now();
        let (model, report) = LogisticRegression::fit(&features, &targets, labels.len(), options)?;
        info!(
            classes = labels.len(),
            iterations = report.iterations,
            loss = report.loss,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "classifier trained"
        );

        Ok(EmbeddingClassifier {
            embedder,
            labels,
            model,
        })
    }

    /// Classify questionnaire answers, joined with spaces.
    pub fn classify<S: AsRef<str>>(&self, answers: &[S]) -> Result<MbtiType> {
        self.predict_text(&join_answers(answers))
    }

    pub fn predict_text(&self, text: &str) -> Result<MbtiType> {
        let features = self.embedder.embed(text)?;
        let class = self.model.predict(&features)?;
        self.labels
            .decode(class)
            .ok_or_else(|| Error::Training(format!("class index {} has no label", class)))
    }

    /// Labels the model can produce, sorted.
    pub fn labels(&self) -> &[MbtiType] {
        self.labels.classes()
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }
}

impl<E: Embedder> TextClassifier for EmbeddingClassifier<E> {
    fn classify_text(&self, text: &str) -> Result<MbtiType> {
        self.predict_text(text)
    }
}

impl EmbeddingClassifier<TfidfVectorizer> {
    /// Fit a TF-IDF vectorizer on the corpus, then train on it.
    pub fn train_tfidf(records: &[MbtiRecord], config: &ClassifierConfig) -> Result<Self> {
        let texts: Vec<String> = records.iter().map(|r| r.posts.clone()).collect();
        let mut vectorizer = TfidfVectorizer::new(config.max_features);
        vectorizer.fit(&texts);
        if vectorizer.vocabulary.is_empty() {
            return Err(Error::Training("TF-IDF vocabulary is empty".to_string()));
        }
        debug!(vocabulary = vectorizer.vocabulary.len(), "TF-IDF vectorizer fitted");
        Self::train(vectorizer, records, &TrainingOptions::from(config))
    }

    /// Save the vectorizer, labels and weights to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), "classifier saved");
        Ok(())
    }

    /// Load a classifier written by [`EmbeddingClassifier::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let classifier: Self = serde_json::from_str(&json)?;
        classifier.embedder.validate()?;
        classifier.model.validate()?;
        if classifier.embedder.dimension() != classifier.model.n_features() {
            return Err(Error::DimensionMismatch {
                expected: classifier.model.n_features(),
                actual: classifier.embedder.dimension(),
            });
        }
        if classifier.labels.len() != classifier.model.n_classes() {
            return Err(Error::DimensionMismatch {
                expected: classifier.model.n_classes(),
                actual: classifier.labels.len(),
            });
        }
        info!(path = %path.display(), "classifier loaded");
        Ok(classifier)
    }

    /// Load from `model_path` when present, otherwise train and save there.
    fn load_or_train(records: &[MbtiRecord], config: &ClassifierConfig) -> Result<Self> {
        match config.model_path.as_deref() {
            Some(path) if Path::new(path).exists() => Self::load(path),
            Some(path) => {
                let classifier = Self::train_tfidf(records, config)?;
                classifier.save(path)?;
                Ok(classifier)
            }
            None => Self::train_tfidf(records, config),
        }
    }
}

/// Build the fallback classifier described by `config`.
///
/// This is the one expensive startup step; any error here must stop the
/// process before it serves predictions.
pub fn build_classifier(
    records: &[MbtiRecord],
    config: &ClassifierConfig,
) -> Result<Box<dyn TextClassifier>> {
    match config.embedder {
        EmbedderKind::Tfidf => Ok(Box::new(EmbeddingClassifier::load_or_train(records, config)?)),
        EmbedderKind::Bert => build_bert_classifier(records, config),
    }
}

#[cfg(feature = "bert")]
fn build_bert_classifier(
    records: &[MbtiRecord],
    config: &ClassifierConfig,
) -> Result<Box<dyn TextClassifier>> {
    if config.model_path.is_some() {
        warn!("model_path is ignored for BERT classifiers, retraining");
    }
    let embedder = super::embedder::BertEmbedder::new()?;
    let classifier = EmbeddingClassifier::train(embedder, records, &TrainingOptions::from(config))?;
    Ok(Box::new(classifier))
}

#[cfg(not(feature = "bert"))]
fn build_bert_classifier(
    _records: &[MbtiRecord],
    _config: &ClassifierConfig,
) -> Result<Box<dyn TextClassifier>> {
    warn!("BERT embeddings requested but the `bert` feature is disabled");
    Err(Error::Embedding(
        "BERT not enabled. Compile with: cargo build --features bert".to_string(),
    ))
}

/// Embed `texts` in batches into a `samples x dimension` matrix.
pub(crate) fn embed_matrix<E: Embedder>(embedder: &E, texts: &[String]) -> Result<Array2<f64>> {
    let dimension = embedder.dimension();
    let mut flat = Vec::with_capacity(texts.len() * dimension);

    for (batch_idx, chunk) in texts.chunks(EMBED_BATCH_SIZE).enumerate() {
        for vector in embedder.embed_batch(chunk)? {
            if vector.len() != dimension {
                return Err(Error::DimensionMismatch {
                    expected: dimension,
                    actual: vector.len(),
                });
            }
            flat.extend(vector);
        }
        if (batch_idx + 1) % 10 == 0 {
            debug!(
                embedded = ((batch_idx + 1) * EMBED_BATCH_SIZE).min(texts.len()),
                total = texts.len(),
                "embedding corpus"
            );
        }
    }

    Array2::from_shape_vec((texts.len(), dimension), flat)
        .map_err(|e| Error::Embedding(format!("bad feature matrix: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::sample_corpus;

    fn trained() -> EmbeddingClassifier<TfidfVectorizer> {
        let records = sample_corpus().unwrap();
        EmbeddingClassifier::train_tfidf(&records, &ClassifierConfig::default()).unwrap()
    }

    #[test]
    fn test_learns_every_sample_type() {
        let records = sample_corpus().unwrap();
        let classifier = trained();
        assert_eq!(classifier.labels().len(), 16);
        for record in &records {
            assert_eq!(classifier.predict_text(&record.posts).unwrap(), record.mbti_type);
        }
    }

    #[test]
    fn test_classify_joins_answers() {
        let classifier = trained();
        let answers = [
            "I really enjoy solitude and reading quietly alone,",
            "ideas, possibilities and theories,",
            "logic and objective analysis,",
            "planning schedules and checklists.",
        ];
        let joined = classifier.predict_text(&answers.join(" ")).unwrap();
        assert_eq!(classifier.classify(&answers).unwrap(), joined);
    }

    #[test]
    fn test_inference_is_deterministic() {
        let classifier = trained();
        let text = "I am not sure what to say here";
        let first = classifier.predict_text(text).unwrap();
        for _ in 0..5 {
            assert_eq!(classifier.predict_text(text).unwrap(), first);
        }
        assert!(classifier.labels().contains(&first));
    }

    #[test]
    fn test_training_is_reproducible() {
        assert_eq!(trained(), trained());
    }

    #[test]
    fn test_empty_corpus_is_fatal() {
        let err = EmbeddingClassifier::train_tfidf(&[], &ClassifierConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Training(_) | Error::Dataset(_)));
    }

    #[test]
    fn test_save_and_load() {
        let classifier = trained();
        let path = std::env::temp_dir().join(format!(
            "mbti-predictor-test-{}/classifier.json",
            std::process::id()
        ));
        classifier.save(&path).unwrap();
        let loaded = EmbeddingClassifier::load(&path).unwrap();
        let text = "I really enjoy parties and spontaneous adventures";
        assert_eq!(loaded.predict_text(text).unwrap(), classifier.predict_text(text).unwrap());
        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn test_load_rejects_corrupt_files() {
        let classifier = trained();
        let dir = std::env::temp_dir().join(format!(
            "mbti-predictor-corrupt-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let original = serde_json::to_value(&classifier).unwrap();

        let mut out_of_range = original.clone();
        out_of_range["embedder"]["vocabulary"]["parties"] = serde_json::json!(9999);
        let path = dir.join("out_of_range.json");
        std::fs::write(&path, out_of_range.to_string()).unwrap();
        assert!(matches!(
            EmbeddingClassifier::load(&path),
            Err(Error::Training(_))
        ));

        let mut short_idf = original.clone();
        short_idf["embedder"]["idf"]
            .as_array_mut()
            .unwrap()
            .pop();
        let path = dir.join("short_idf.json");
        std::fs::write(&path, short_idf.to_string()).unwrap();
        assert!(matches!(
            EmbeddingClassifier::load(&path),
            Err(Error::DimensionMismatch { .. })
        ));

        let hand_edited = serde_json::json!({
            "embedder": { "vocabulary": { "hello": 5 }, "idf": [1.0], "max_features": 10 },
            "labels": { "classes": ["ENFP", "INTJ"] },
            "model": {
                "weights": { "v": 1, "dim": [1, 2], "data": [0.0, 0.0] },
                "bias": { "v": 1, "dim": [2], "data": [0.0, 0.0] }
            }
        });
        let path = dir.join("hand_edited.json");
        std::fs::write(&path, hand_edited.to_string()).unwrap();
        assert!(EmbeddingClassifier::load(&path).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_build_classifier_caches_model() {
        let records = sample_corpus().unwrap();
        let path = std::env::temp_dir().join(format!(
            "mbti-predictor-cache-{}/model.json",
            std::process::id()
        ));
        let config = ClassifierConfig {
            model_path: Some(path.to_string_lossy().into_owned()),
            ..ClassifierConfig::default()
        };
        let built = build_classifier(&records, &config).unwrap();
        assert!(path.exists());
        let reloaded = build_classifier(&[], &config).unwrap();
        let text = &records[0].posts;
        assert_eq!(
            built.classify_text(text).unwrap(),
            reloaded.classify_text(text).unwrap()
        );
        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }

    #[cfg(not(feature = "bert"))]
    #[test]
    fn test_bert_requires_feature() {
        let records = sample_corpus().unwrap();
        let config = ClassifierConfig {
            embedder: EmbedderKind::Bert,
            ..ClassifierConfig::default()
        };
        assert!(matches!(
            build_classifier(&records, &config),
            Err(Error::Embedding(_))
        ));
    }
}
