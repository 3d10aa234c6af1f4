//! Labeled training corpus.
//!
//! The corpus is a CSV file with a `type` column holding the MBTI label and
//! a `posts` column holding the user's free text (posts are usually joined
//! with `|||`).

use crate::error::{Error, Result};
use crate::mbti::MbtiType;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// A small corpus bundled with the crate, two samples per type.
pub const SAMPLE_CORPUS: &str = include_str!("../data/sample_corpus.csv");

/// MBTI record structure from training data
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MbtiRecord {
    /// MBTI personality type (e.g., "INTJ", "ENFP")
    #[serde(rename = "type")]
    pub mbti_type: MbtiType,

    /// User's posts/text content
    pub posts: String,
}

/// Read records from any CSV source with a header row.
///
/// Rows with a label outside the 16 types are rejected with
/// [`Error::Dataset`] naming the row.
pub fn read_corpus<R: Read>(reader: R) -> Result<Vec<MbtiRecord>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut records = Vec::new();
    for (row, result) in reader.deserialize().enumerate() {
        let record: MbtiRecord = result.map_err(|e| {
            if matches!(e.kind(), csv::ErrorKind::Deserialize { .. }) {
                Error::Dataset(format!("row {}: {}", row + 1, e))
            } else {
                Error::Csv(e)
            }
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Load MBTI data from CSV file
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<MbtiRecord>> {
    let path = path.as_ref();
    let start = Instant::now();
    let records = read_corpus(File::open(path)?)?;
    info!(
        path = %path.display(),
        records = records.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "dataset loaded"
    );
    Ok(records)
}

/// Parse the bundled sample corpus.
pub fn sample_corpus() -> Result<Vec<MbtiRecord>> {
    read_corpus(SAMPLE_CORPUS.as_bytes())
}
