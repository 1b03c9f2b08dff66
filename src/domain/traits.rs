// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// implementations can be swapped without changing the code
// that uses them:
//   - PickleLoader implements DatasetSource
//   - a future CSV or Parquet loader could implement it too,
//     and the application layer would not change

use anyhow::Result;
use crate::domain::label_codec::LabelCodec;
use crate::domain::sample::SignSample;

/// Any component that can produce the full labelled dataset.
///
/// The returned samples and codec must agree: every sample's
/// label id is a valid index into the codec's class list.
pub trait DatasetSource {
    /// Load all samples and the label codec from this source.
    fn load(&self) -> Result<(Vec<SignSample>, LabelCodec)>;
}
