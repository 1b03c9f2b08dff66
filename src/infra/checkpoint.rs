// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores the trained model using Burn's
// CompactRecorder (MessagePack + gzip), plus a JSON manifest.
//
// What gets saved into the model directory:
//   asl_model.mpk.gz  — all learned parameters
//   train_config.json — manifest: hyperparameters, data-derived
//                       dimensions, and the class name list
//
// Why save the manifest separately?
//   Weights alone cannot be loaded — the exact architecture
//   (feature width, hidden sizes, class count) must be known to
//   rebuild the model first. The class names ride along so a
//   later consumer can decode predicted ids back to sign names.
//
// Saving overwrites any previous artifact in place — there is
// no backup and no atomic rename.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};
use serde::{Deserialize, Serialize};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::{SignModel, SignModelConfig};

/// File stem of the saved weights — the recorder adds `.mpk.gz`
const MODEL_STEM: &str = "asl_model";

/// Everything needed to rebuild the trained model from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelManifest {
    /// Feature width the model was trained on
    pub num_features: usize,

    /// Output layer width == number of classes
    pub num_classes: usize,

    /// Ordered class names from the label codec
    pub classes: Vec<String>,

    /// The full training configuration of the run
    pub config: TrainConfig,
}

impl ModelManifest {
    /// Rebuild the architecture config this manifest describes.
    pub fn model_config(&self) -> SignModelConfig {
        SignModelConfig::new(
            self.num_features,
            self.num_classes,
            self.config.hidden1,
            self.config.hidden2,
            self.config.dropout,
        )
    }
}

/// Manages saving and loading of the model artifact and manifest.
/// All files are stored in the configured directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager.
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Save the trained weights to `{dir}/asl_model.mpk.gz`.
    pub fn save_model<B: AutodiffBackend>(&self, model: &SignModel<B>) -> Result<()> {
        // Build the file path (without extension — recorder adds it)
        let path = self.dir.join(MODEL_STEM);

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save model to '{}'", path.display())
            })?;

        tracing::debug!("Saved model weights to '{}'", path.display());
        Ok(())
    }

    /// Load saved weights into a freshly built model.
    ///
    /// The model parameter must have the correct architecture
    /// (matching the saved weights) or loading will fail.
    pub fn load_model<B: Backend>(
        &self,
        model:  SignModel<B>,
        device: &B::Device,
    ) -> Result<SignModel<B>> {
        let path = self.dir.join(MODEL_STEM);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load model '{}'. Have you trained it first?",
                    path.display())
            })?;

        // load_record() returns a new model with the loaded weights
        Ok(model.load_record(record))
    }

    /// Save the manifest to `{dir}/train_config.json`.
    /// Must be called during training so the model can be rebuilt.
    pub fn save_manifest(&self, manifest: &ModelManifest) -> Result<()> {
        let path = self.dir.join("train_config.json");
        let json = serde_json::to_string_pretty(manifest)?;

        fs::write(&path, json)
            .with_context(|| {
                format!("Cannot write manifest to '{}'", path.display())
            })?;

        tracing::debug!("Saved manifest to '{}'", path.display());
        Ok(())
    }

    /// Load the manifest from `{dir}/train_config.json`.
    pub fn load_manifest(&self) -> Result<ModelManifest> {
        let path = self.dir.join("train_config.json");

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read manifest from '{}'. \
                     Make sure you have run 'train' before 'evaluate'.",
                    path.display()
                )
            })?;

        Ok(serde_json::from_str(&json)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::module::AutodiffModule;

    type TestBackend      = burn::backend::Autodiff<burn::backend::NdArray>;
    type TestInnerBackend = burn::backend::NdArray;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("asl_ckpt_test_{name}"));
        fs::remove_dir_all(&dir).ok();
        dir
    }

    fn manifest() -> ModelManifest {
        ModelManifest {
            num_features: 6,
            num_classes:  3,
            classes:      vec!["A".into(), "B".into(), "C".into()],
            config:       TrainConfig::default(),
        }
    }

    #[test]
    fn test_save_then_load_preserves_weights() {
        let dir    = temp_dir("weights");
        let ckpt   = CheckpointManager::new(&dir);
        let device = Default::default();

        let model_cfg = manifest().model_config();
        let trained: SignModel<TestBackend> = model_cfg.init(&device);
        ckpt.save_model(&trained).unwrap();

        // A freshly initialised model has different random weights;
        // loading must replace them with the saved ones.
        let fresh: SignModel<TestInnerBackend> = model_cfg.init(&device);
        let loaded = ckpt.load_model(fresh, &device).unwrap();

        let input = Tensor::<TestInnerBackend, 2>::ones([2, 6], &device);
        let expected: Vec<f32> = trained.valid()
            .forward(input.clone()).into_data().to_vec().unwrap();
        let actual: Vec<f32> = loaded
            .forward(input).into_data().to_vec().unwrap();
        assert_eq!(expected, actual);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_manifest_round_trip() {
        let dir  = temp_dir("manifest");
        let ckpt = CheckpointManager::new(&dir);

        let saved = manifest();
        ckpt.save_manifest(&saved).unwrap();
        let loaded = ckpt.load_manifest().unwrap();

        assert_eq!(loaded.num_features, saved.num_features);
        assert_eq!(loaded.num_classes,  saved.num_classes);
        assert_eq!(loaded.classes,      saved.classes);
        assert_eq!(loaded.config.epochs, saved.config.epochs);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_without_training_fails() {
        let dir  = temp_dir("missing");
        let ckpt = CheckpointManager::new(&dir);
        assert!(ckpt.load_manifest().is_err());
        fs::remove_dir_all(&dir).ok();
    }
}
