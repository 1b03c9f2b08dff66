// ============================================================
// Layer 3 — Sample Domain Type
// ============================================================
// One row of the preprocessed dataset: the numeric feature
// vector extracted from a hand frame, plus the integer id of
// the sign it shows. Keeping features and label in one struct
// means a shuffle or split can never misalign them.

use serde::{Deserialize, Serialize};

/// A single labelled training sample.
/// By the time a SignSample exists, all feature extraction has
/// already happened upstream — this is plain numbers only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignSample {
    /// Numeric features, one fixed-width row of the feature matrix
    pub features: Vec<f32>,

    /// Class id — an index into the LabelCodec's class list
    pub label: usize,
}

impl SignSample {
    pub fn new(features: Vec<f32>, label: usize) -> Self {
        Self { features, label }
    }

    /// Number of features in this row
    pub fn width(&self) -> usize {
        self.features.len()
    }
}
