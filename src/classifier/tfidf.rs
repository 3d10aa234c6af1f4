//! TF-IDF (Term Frequency-Inverse Document Frequency) vectorizer implementation.
//!
//! This is the default embedding function of the fallback classifier. It is
//! fitted on the training corpus and turns any text into a fixed-length,
//! L2-normalized vector.

use super::embedder::Embedder;
use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static NON_LETTERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z\s]+").unwrap());

/// Lower-case `text`, replace everything but letters with spaces and keep
/// the words longer than two characters.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowercase = text.to_lowercase();
    NON_LETTERS
        .replace_all(&lowercase, " ")
        .split_whitespace()
        .filter(|w| w.len() > 2)
        .map(|s| s.to_string())
        .collect()
}

/// TF-IDF vectorizer for converting text to numerical features.
///
/// This implementation:
/// - Keeps the top N words by document frequency (ties alphabetical)
/// - Applies TF-IDF weighting and L2 normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Word to feature index mapping
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each feature
    pub idf: Vec<f64>,
    /// Maximum number of features to keep
    pub max_features: usize,
}

impl TfidfVectorizer {
    /// Create a new TF-IDF vectorizer.
    ///
    /// # Arguments
    ///
    /// * `max_features` - Maximum number of features (words) to keep
    pub fn new(max_features: usize) -> Self {
        TfidfVectorizer {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            max_features,
        }
    }

    /// Fit the vectorizer on a collection of documents.
    ///
    /// This builds the vocabulary and calculates IDF values. Fitting the same
    /// documents always yields the same vocabulary and feature order.
    pub fn fit(&mut self, documents: &[String]) {
        let mut word_doc_count: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let unique_words: HashSet<String> = tokenize(doc).into_iter().collect();
            for word in unique_words {
                *word_doc_count.entry(word).or_insert(0) += 1;
            }
        }

        // Select top max_features by document frequency
        let mut ranked: Vec<(&String, &usize)> = word_doc_count.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        self.vocabulary.clear();
        for (idx, (word, _)) in ranked.iter().take(self.max_features).enumerate() {
            self.vocabulary.insert((*word).clone(), idx);
        }

        // Calculate IDF
        self.idf = vec![0.0; self.vocabulary.len()];
        let n_docs = documents.len() as f64;

        for (word, &idx) in &self.vocabulary {
            let doc_freq = *word_doc_count.get(word).unwrap_or(&1) as f64;
            self.idf[idx] = (n_docs / doc_freq).ln();
        }
    }

    /// Check that every vocabulary index addresses its own IDF entry.
    pub fn validate(&self) -> Result<()> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(Error::DimensionMismatch {
                expected: self.vocabulary.len(),
                actual: self.idf.len(),
            });
        }
        let mut seen = vec![false; self.idf.len()];
        for (word, &idx) in &self.vocabulary {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(Error::Training(format!(
                        "vocabulary index {} of {:?} is out of range or repeated",
                        idx, word
                    )))
                }
            }
        }
        Ok(())
    }

    /// Transform a document into a TF-IDF feature vector.
    ///
    /// Returns a vector of length `vocabulary.len()`; a document without
    /// known words maps to the zero vector.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut tf = vec![0.0; self.vocabulary.len()];

        for word in tokenize(document) {
            if let Some(&idx) = self.vocabulary.get(&word) {
                tf[idx] += 1.0;
            }
        }

        // Normalize TF
        let total: f64 = tf.iter().sum();
        if total > 0.0 {
            for val in &mut tf {
                *val /= total;
            }
        }

        // Apply IDF and L2 normalize
        let mut tfidf: Vec<f64> = tf
            .iter()
            .zip(self.idf.iter())
            .map(|(&t, &i)| t * i)
            .collect();

        let norm = tfidf.iter().map(|&x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for val in &mut tfidf {
                *val /= norm;
            }
        }

        tfidf
    }
}

impl Embedder for TfidfVectorizer {
    fn embed(&self, text: &str) -> Result<Vec<f64>> {
        Ok(self.transform(text))
    }

    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    fn name(&self) -> &'static str {
        "tfidf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<String> {
        vec![
            "I love parties and friends!".to_string(),
            "Quiet reading, alone with friends of mine... http://example.com".to_string(),
            "Parties parties PARTIES".to_string(),
        ]
    }

    #[test]
    fn test_tokenize_strips_punctuation_and_short_words() {
        assert_eq!(
            tokenize("I'm SO happy!!! go-to ideas|||more"),
            vec!["happy", "ideas", "more"]
        );
    }

    #[test]
    fn test_fit_is_deterministic() {
        let mut a = TfidfVectorizer::new(100);
        let mut b = TfidfVectorizer::new(100);
        a.fit(&docs());
        b.fit(&docs());
        assert_eq!(a, b);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let mut vectorizer = TfidfVectorizer::new(2);
        vectorizer.fit(&docs());
        assert_eq!(vectorizer.vocabulary.len(), 2);
        // "friends" and "parties" both occur in two documents
        assert_eq!(vectorizer.vocabulary.get("friends"), Some(&0));
        assert_eq!(vectorizer.vocabulary.get("parties"), Some(&1));
    }

    #[test]
    fn test_transform_is_normalized() {
        let mut vectorizer = TfidfVectorizer::new(100);
        vectorizer.fit(&docs());
        let features = vectorizer.transform("quiet reading and parties");
        assert_eq!(features.len(), vectorizer.dimension());
        let norm: f64 = features.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_bad_indices() {
        let mut vectorizer = TfidfVectorizer::new(100);
        vectorizer.fit(&docs());
        assert!(vectorizer.validate().is_ok());

        let mut shifted = vectorizer.clone();
        shifted.vocabulary.insert("parties".to_string(), shifted.idf.len());
        assert!(matches!(shifted.validate(), Err(Error::Training(_))));

        let mut short = vectorizer.clone();
        short.idf.pop();
        assert!(matches!(short.validate(), Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_unknown_words_give_zero_vector() {
        let mut vectorizer = TfidfVectorizer::new(100);
        vectorizer.fit(&docs());
        let features = vectorizer.embed("zebra xylophone").unwrap();
        assert!(features.iter().all(|&x| x == 0.0));
    }
}
