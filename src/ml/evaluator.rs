// ============================================================
// Layer 5 — Evaluator
// ============================================================
use anyhow::Result;
use burn::prelude::*;

use burn::data::dataloader::batcher::Batcher;

use crate::data::batcher::SignBatcher;
use crate::domain::sample::SignSample;
use crate::infra::checkpoint::{CheckpointManager, ModelManifest};
use crate::ml::model::SignModel;

type InferBackend = burn::backend::NdArray;

/// Runs a saved model over labelled samples and scores it.
/// Uses the non-autodiff backend: no gradients, dropout inactive.
pub struct Evaluator {
    model:      SignModel<InferBackend>,
    batcher:    SignBatcher<InferBackend>,
    batch_size: usize,
}

impl Evaluator {
    /// Rebuild the model described by the manifest and load the
    /// saved weights into it.
    pub fn from_checkpoint(
        ckpt_manager: &CheckpointManager,
        manifest:     &ModelManifest,
    ) -> Result<Self> {
        let device = burn::backend::ndarray::NdArrayDevice::default();

        let model: SignModel<InferBackend> = manifest.model_config().init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint");

        Ok(Self {
            model,
            batcher:    SignBatcher::new(device),
            batch_size: manifest.config.batch_size,
        })
    }

    /// Fraction of samples whose predicted class matches the label.
    pub fn accuracy(&self, samples: &[SignSample]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }

        let mut correct = 0usize;
        for chunk in samples.chunks(self.batch_size) {
            let batch  = self.batcher.batch(chunk.to_vec());
            let logits = self.model.forward(batch.features);

            let predicted = logits.argmax(1).flatten::<1>(0, 1);
            let batch_correct: i64 = predicted
                .equal(batch.labels)
                .int().sum().into_scalar().elem::<i64>();
            correct += batch_correct as usize;
        }

        correct as f64 / samples.len() as f64
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::TrainConfig;
    use std::fs;

    type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;

    #[test]
    fn test_accuracy_is_a_fraction() {
        let dir = std::env::temp_dir().join("asl_evaluator_test");
        fs::remove_dir_all(&dir).ok();

        let manifest = ModelManifest {
            num_features: 4,
            num_classes:  2,
            classes:      vec!["A".into(), "B".into()],
            config:       TrainConfig::default(),
        };

        // Save an (untrained) model so the evaluator has weights to load
        let ckpt   = CheckpointManager::new(&dir);
        let device = Default::default();
        let model: SignModel<TrainBackend> = manifest.model_config().init(&device);
        ckpt.save_model(&model).unwrap();

        let evaluator = Evaluator::from_checkpoint(&ckpt, &manifest).unwrap();

        let samples = vec![
            SignSample::new(vec![0.0, 0.0, 0.0, 0.0], 0),
            SignSample::new(vec![1.0, 1.0, 1.0, 1.0], 1),
            SignSample::new(vec![0.5, 0.5, 0.5, 0.5], 0),
        ];
        let acc = evaluator.accuracy(&samples);
        assert!((0.0..=1.0).contains(&acc));

        assert_eq!(evaluator.accuracy(&[]), 0.0);

        fs::remove_dir_all(&dir).ok();
    }
}
