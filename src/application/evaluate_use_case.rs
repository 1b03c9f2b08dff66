// ============================================================
// Layer 2 — Evaluate Use Case
// ============================================================
// Offline evaluation of a saved model:
//   1. Load the manifest and rebuild the exact architecture
//   2. Reload the dataset and check it still matches the model
//   3. Re-derive the identical validation split from the saved
//      seed and fraction (the split is deterministic, so this
//      is the same held-out data the run was validated on)
//   4. Score the model and return its accuracy

use anyhow::{bail, Result};

use crate::data::{loader::PickleLoader, splitter::split_train_val};
use crate::domain::traits::DatasetSource;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::evaluator::Evaluator;

pub struct EvaluateUseCase {
    model_dir: String,
    data_path: String,
}

impl EvaluateUseCase {
    pub fn new(model_dir: String, data_path: String) -> Self {
        Self { model_dir, data_path }
    }

    /// Returns the saved model's accuracy on the validation split.
    pub fn execute(&self) -> Result<f64> {
        let ckpt_manager = CheckpointManager::new(&self.model_dir);
        let manifest     = ckpt_manager.load_manifest()?;

        let loader = PickleLoader::new(&self.data_path);
        let (samples, codec) = loader.load()?;

        // The dataset must still describe the world the model was
        // trained in: same classes, same feature width.
        if codec.classes() != manifest.classes.as_slice() {
            bail!(
                "Class list in '{}' does not match the trained model \
                 ({} classes now vs {} at training time)",
                self.data_path,
                codec.num_classes(),
                manifest.num_classes,
            );
        }
        if samples[0].width() != manifest.num_features {
            bail!(
                "Feature width {} does not match the trained model ({})",
                samples[0].width(),
                manifest.num_features,
            );
        }

        let (_train, val_samples) = split_train_val(
            samples,
            manifest.config.val_fraction,
            manifest.config.seed,
        );
        tracing::info!("Evaluating on {} validation samples", val_samples.len());

        let evaluator = Evaluator::from_checkpoint(&ckpt_manager, &manifest)?;
        Ok(evaluator.accuracy(&val_samples))
    }
}
