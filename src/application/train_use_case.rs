// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the pickled dataset    (Layer 4 - data)
//   Step 2: Derive model dimensions     (here)
//   Step 3: Split train/validation      (Layer 4 - data)
//   Step 4: Build datasets              (Layer 4 - data)
//   Step 5: Save the manifest           (Layer 6 - infra)
//   Step 6: Run training loop           (Layer 5 - ml)
//   Step 7: Report final accuracy       (here)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::SignDataset,
    loader::PickleLoader,
    splitter::split_train_val,
};
use crate::domain::traits::DatasetSource;
use crate::infra::{
    checkpoint::{CheckpointManager, ModelManifest},
    metrics::MetricsLogger,
};
use crate::ml::model::SignModelConfig;
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run.
// Serialisable so it can be saved to disk inside the manifest.
// The defaults are the canonical fixed values of the training
// routine; the CLI only exists to override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:    String,
    pub model_dir:    String,
    pub val_fraction: f64,
    pub seed:         u64,
    pub epochs:       usize,
    pub batch_size:   usize,
    pub lr:           f64,
    pub hidden1:      usize,
    pub hidden2:      usize,
    pub dropout:      f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:    "processed_train.pkl".to_string(),
            model_dir:    "model".to_string(),
            val_fraction: 0.2,
            seed:         42,
            epochs:       10,
            batch_size:   32,
            lr:           1e-3,
            hidden1:      128,
            hidden2:      64,
            dropout:      0.5,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    /// Create a new TrainUseCase with the given configuration
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load the preprocessed dataset ─────────────────────────────
        // The loader validates arity, row alignment, and label range;
        // any violation aborts the run here.
        let loader = PickleLoader::new(&cfg.data_path);
        let (samples, codec) = loader.load()?;

        // ── Step 2: Derive model dimensions from the data ─────────────────────
        // The output layer width must equal the class count known to
        // the codec, and the input width comes from the feature rows.
        let num_features = samples
            .first()
            .map(|s| s.width())
            .context("Dataset contains no samples")?;
        let num_classes = codec.num_classes();

        // ── Step 3: Train / validation split (80/20, fixed seed) ──────────────
        let (train_samples, val_samples) =
            split_train_val(samples, cfg.val_fraction, cfg.seed);

        println!("Training samples: {}", train_samples.len());
        println!("Validation samples: {}", val_samples.len());

        // ── Step 4: Build Burn datasets ───────────────────────────────────────
        let train_dataset = SignDataset::new(train_samples);
        let val_dataset   = SignDataset::new(val_samples);

        // ── Step 5: Save the manifest ─────────────────────────────────────────
        // Written before training so a crash mid-run still leaves a
        // readable record of what was attempted.
        let model_cfg = SignModelConfig::new(
            num_features, num_classes,
            cfg.hidden1, cfg.hidden2, cfg.dropout,
        );
        model_cfg.summary();

        let ckpt_manager = CheckpointManager::new(&cfg.model_dir);
        ckpt_manager.save_manifest(&ModelManifest {
            num_features,
            num_classes,
            classes: codec.classes().to_vec(),
            config:  cfg.clone(),
        })?;

        let metrics = MetricsLogger::new(&cfg.model_dir)?;

        // ── Step 6: Run training loop (Layer 5) ───────────────────────────────
        let val_accuracy = run_training(
            cfg, &model_cfg, train_dataset, val_dataset, &ckpt_manager, &metrics,
        )?;

        // ── Step 7: Report ────────────────────────────────────────────────────
        println!(
            "Model training complete and saved to '{}/asl_model.mpk.gz'",
            cfg.model_dir,
        );
        println!("Validation Accuracy: {:.2}%", val_accuracy * 100.0);

        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use serde_pickle::SerOptions;
    use std::fs;
    use std::path::PathBuf;

    /// Write a small pickled artifact: 30 samples, 4 features, 2 classes.
    fn write_toy_artifact(name: &str) -> PathBuf {
        let features: Vec<Vec<f64>> = (0..30)
            .map(|i| {
                let centre = (i % 2) as f64;
                vec![centre, centre, centre, centre]
            })
            .collect();
        let labels: Vec<i64> = (0..30).map(|i| i % 2).collect();
        let classes: Vec<String> = vec!["hello".into(), "thanks".into()];

        let path = std::env::temp_dir().join(format!("asl_train_uc_{name}.pkl"));
        let bytes = serde_pickle::to_vec(&(features, labels, classes), SerOptions::new()).unwrap();
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_execute_trains_and_persists() {
        let data_path = write_toy_artifact("e2e");
        let model_dir = std::env::temp_dir().join("asl_train_uc_model");
        fs::remove_dir_all(&model_dir).ok();

        let config = TrainConfig {
            data_path: data_path.to_string_lossy().into_owned(),
            model_dir: model_dir.to_string_lossy().into_owned(),
            epochs:    2,
            ..TrainConfig::default()
        };

        TrainUseCase::new(config).execute().unwrap();

        assert!(model_dir.join("asl_model.mpk.gz").exists());
        assert!(model_dir.join("train_config.json").exists());
        assert!(model_dir.join("metrics.csv").exists());

        fs::remove_file(&data_path).ok();
        fs::remove_dir_all(&model_dir).ok();
    }

    #[test]
    fn test_execute_fails_on_missing_artifact() {
        let config = TrainConfig {
            data_path: "no_such_artifact.pkl".to_string(),
            ..TrainConfig::default()
        };
        assert!(TrainUseCase::new(config).execute().is_err());
    }
}
