// ============================================================
// Layer 3 — Label Codec
// ============================================================
// Maps integer class ids to human-readable sign names and back.
// The id of a class is its position in the ordered class list,
// so the codec is just a Vec<String> with lookup helpers.
//
// The class count drives the width of the model's output layer:
// every label id in the dataset must be a valid index here.

use serde::{Deserialize, Serialize};

/// Bidirectional mapping between class ids and sign names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCodec {
    /// Ordered class names — index == class id
    classes: Vec<String>,
}

impl LabelCodec {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Number of distinct classes known to the codec
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// Look up the name for a class id, if the id is in range
    pub fn name_of(&self, id: usize) -> Option<&str> {
        self.classes.get(id).map(String::as_str)
    }

    /// Look up the id for a class name, if the name is known
    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == name)
    }

    /// True if `id` is a valid class id
    pub fn contains_id(&self, id: usize) -> bool {
        id < self.classes.len()
    }

    /// The ordered class names
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}
