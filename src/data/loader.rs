// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Decodes the preprocessed training artifact: a pickle-encoded
// 3-tuple of
//
//   (features: list of float rows,
//    labels:   list of integer class ids,
//    classes:  list of class names)
//
// produced by the upstream preprocessing step. serde-pickle
// maps the pickle stream onto plain serde types, so no Python
// runtime is involved.
//
// Everything that can be checked at load time is checked here,
// because it is the last moment a bad artifact can fail cheaply:
//   - the top-level value unpacks into exactly three elements
//   - feature and label row counts agree
//   - all feature rows have the same non-zero width
//   - every label id is a valid index into the class list
//
// Any violation is a fatal startup error; there is no retry.

use anyhow::{bail, Context, Result};
use std::{fs::File, io::BufReader, path::PathBuf};
use serde_pickle::{DeOptions, Value};

use crate::domain::label_codec::LabelCodec;
use crate::domain::sample::SignSample;
use crate::domain::traits::DatasetSource;

/// Loads the pickled dataset artifact from a fixed path.
/// Implements the DatasetSource trait from Layer 3.
pub struct PickleLoader {
    /// Path to the .pkl artifact
    path: PathBuf,
}

impl PickleLoader {
    /// Create a new PickleLoader pointed at an artifact file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for PickleLoader {
    fn load(&self) -> Result<(Vec<SignSample>, LabelCodec)> {
        // Scope the file handle to the deserialization: it is
        // released as soon as the pickle stream has been decoded.
        let value = {
            let file = File::open(&self.path)
                .with_context(|| format!("Cannot open dataset '{}'", self.path.display()))?;
            serde_pickle::value_from_reader(BufReader::new(file), DeOptions::new())
                .with_context(|| format!("'{}' is not a valid pickle file", self.path.display()))?
        };

        // The artifact must unpack into exactly (features, labels, classes)
        let parts: [Value; 3] = match value {
            Value::Tuple(parts) | Value::List(parts) => {
                parts.try_into().map_err(|parts: Vec<Value>| {
                    anyhow::anyhow!(
                        "'{}' must unpack into exactly 3 elements \
                         (features, labels, classes), found {}",
                        self.path.display(),
                        parts.len(),
                    )
                })?
            }
            _ => bail!(
                "'{}' does not contain a tuple at the top level",
                self.path.display()
            ),
        };
        let [features_v, labels_v, classes_v] = parts;

        let features: Vec<Vec<f64>> = serde_pickle::from_value(features_v)
            .context("First element is not a feature matrix (list of float rows)")?;
        let labels: Vec<i64> = serde_pickle::from_value(labels_v)
            .context("Second element is not a label vector (list of integers)")?;
        let classes: Vec<String> = serde_pickle::from_value(classes_v)
            .context("Third element is not a class name list (list of strings)")?;

        let codec = LabelCodec::new(classes);
        let samples = build_samples(features, labels, &codec)?;

        tracing::info!(
            "Loaded {} samples, {} features each, {} classes from '{}'",
            samples.len(),
            samples[0].width(),
            codec.num_classes(),
            self.path.display(),
        );

        Ok((samples, codec))
    }
}

/// Zip the feature matrix and label vector into samples,
/// enforcing the row-alignment and label-range invariants.
fn build_samples(
    features: Vec<Vec<f64>>,
    labels:   Vec<i64>,
    codec:    &LabelCodec,
) -> Result<Vec<SignSample>> {
    if features.len() != labels.len() {
        bail!(
            "Feature/label row counts differ: {} features vs {} labels",
            features.len(),
            labels.len(),
        );
    }
    if features.is_empty() {
        bail!("Dataset is empty");
    }

    let width = features[0].len();
    if width == 0 {
        bail!("Feature rows are empty");
    }

    let mut samples = Vec::with_capacity(features.len());
    for (i, (row, label)) in features.into_iter().zip(labels).enumerate() {
        if row.len() != width {
            bail!(
                "Feature row {} has width {}, expected {}",
                i, row.len(), width,
            );
        }
        // A label outside the class list would make the output
        // layer shape-inconsistent with the data.
        if label < 0 || !codec.contains_id(label as usize) {
            bail!(
                "Label {} at row {} is not a known class id (0..{})",
                label, i, codec.num_classes(),
            );
        }
        let row: Vec<f32> = row.into_iter().map(|v| v as f32).collect();
        samples.push(SignSample::new(row, label as usize));
    }

    Ok(samples)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use serde_pickle::SerOptions;
    use std::fs;

    type Artifact = (Vec<Vec<f64>>, Vec<i64>, Vec<String>);

    /// Serialize an artifact to a temp .pkl file and return its path.
    fn write_pickle<T: serde::Serialize>(name: &str, artifact: &T) -> PathBuf {
        let path = std::env::temp_dir().join(format!("asl_loader_test_{name}.pkl"));
        let bytes = serde_pickle::to_vec(artifact, SerOptions::new()).unwrap();
        fs::write(&path, bytes).unwrap();
        path
    }

    fn small_artifact() -> Artifact {
        (
            vec![vec![0.1, 0.2], vec![0.3, 0.4], vec![0.5, 0.6]],
            vec![0, 1, 0],
            vec!["A".into(), "B".into()],
        )
    }

    #[test]
    fn test_well_formed_artifact_loads() {
        let path = write_pickle("ok", &small_artifact());
        let (samples, codec) = PickleLoader::new(&path).load().unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].width(), 2);
        assert_eq!(samples[1].label, 1);
        assert_eq!(codec.num_classes(), 2);
        assert_eq!(codec.name_of(1), Some("B"));
    }

    #[test]
    fn test_missing_file_fails() {
        let loader = PickleLoader::new("no_such_dir/no_such_file.pkl");
        assert!(loader.load().is_err());
    }

    #[test]
    fn test_rejects_wrong_arity() {
        // Only two elements — the loader must refuse to unpack it
        let artifact = (vec![vec![0.1]], vec![0i64]);
        let path = write_pickle("arity", &artifact);
        let result = PickleLoader::new(&path).load();
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_row_count_mismatch() {
        let mut artifact = small_artifact();
        artifact.1.pop(); // 3 feature rows, 2 labels
        let path = write_pickle("mismatch", &artifact);
        let result = PickleLoader::new(&path).load();
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_ragged_feature_rows() {
        let mut artifact = small_artifact();
        artifact.0[2] = vec![0.5]; // width 1, others width 2
        let path = write_pickle("ragged", &artifact);
        let result = PickleLoader::new(&path).load();
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_out_of_range_label() {
        let mut artifact = small_artifact();
        artifact.1[1] = 2; // only classes 0 and 1 exist
        let path = write_pickle("label_range", &artifact);
        let result = PickleLoader::new(&path).load();
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
