//! Mapping between MBTI types and class indices.

use crate::mbti::MbtiType;
use serde::{Deserialize, Serialize};

/// Sorted set of the labels seen at training time.
///
/// Class `i` of the linear model is `classes[i]`; the same encoder is used
/// to encode training targets and to decode predictions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<MbtiType>,
}

impl LabelEncoder {
    pub fn fit(labels: impl IntoIterator<Item = MbtiType>) -> Self {
        let mut classes: Vec<MbtiType> = labels.into_iter().collect();
        classes.sort();
        classes.dedup();
        LabelEncoder { classes }
    }

    pub fn encode(&self, label: MbtiType) -> Option<usize> {
        self.classes.binary_search(&label).ok()
    }

    pub fn decode(&self, index: usize) -> Option<MbtiType> {
        self.classes.get(index).copied()
    }

    pub fn classes(&self) -> &[MbtiType] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
