//! Text embedding functions for the fallback classifier.
//!
//! An [`Embedder`] maps text to a fixed-length vector. The TF-IDF
//! vectorizer is always available; pretrained sentence embeddings are
//! provided by [`BertEmbedder`] when the `bert` feature is enabled.

use crate::error::Result;

/// Fixed-length text embedding.
///
/// Implementations are shared by concurrent predictions and must not
/// change observable state while embedding.
pub trait Embedder: Send + Sync {
    /// Embed a single text.
    fn embed(&self, text: &str) -> Result<Vec<f64>>;

    /// Embed many texts at once.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    /// Length of every vector returned by [`Embedder::embed`].
    fn dimension(&self) -> usize;

    fn name(&self) -> &'static str;
}

#[cfg(feature = "bert")]
pub use self::bert::BertEmbedder;

/// Real BERT using rust-bert (Rust API, libtorch backend)
#[cfg(feature = "bert")]
mod bert {
    use super::Embedder;
    use crate::error::{Error, Result};
    use rust_bert::pipelines::sentence_embeddings::{
        SentenceEmbeddingsBuilder, SentenceEmbeddingsModel, SentenceEmbeddingsModelType,
    };
    use std::sync::Mutex;
    use tracing::info;

    /// all-MiniLM-L6-v2 sentence embeddings (384 dimensions).
    pub struct BertEmbedder {
        // rust-bert models are not Sync; inference is serialized.
        model: Mutex<SentenceEmbeddingsModel>,
    }

    impl BertEmbedder {
        pub const DIMENSION: usize = 384;

        /// Load the model, downloading it on first use.
        pub fn new() -> Result<Self> {
            info!("loading sentence embedding model all-MiniLM-L6-v2");
            let model = SentenceEmbeddingsBuilder::remote(SentenceEmbeddingsModelType::AllMiniLmL6V2)
                .create_model()
                .map_err(|e| Error::Embedding(format!("model creation failed: {}", e)))?;
            info!("sentence embedding model ready");

            Ok(BertEmbedder {
                model: Mutex::new(model),
            })
        }

        fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f64>>> {
            let model = self
                .model
                .lock()
                .map_err(|_| Error::Embedding("embedding model lock poisoned".to_string()))?;
            let embeddings = model
                .encode(texts)
                .map_err(|e| Error::Embedding(format!("encoding failed: {}", e)))?;
            Ok(embeddings
                .iter()
                .map(|emb| emb.iter().map(|&x| x as f64).collect())
                .collect())
        }
    }

    impl Embedder for BertEmbedder {
        fn embed(&self, text: &str) -> Result<Vec<f64>> {
            self.encode(&[text])?
                .into_iter()
                .next()
                .ok_or_else(|| Error::Embedding("no embedding generated".to_string()))
        }

        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
            let text_refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
            self.encode(&text_refs)
        }

        fn dimension(&self) -> usize {
            Self::DIMENSION
        }

        fn name(&self) -> &'static str {
            "bert"
        }
    }

}
