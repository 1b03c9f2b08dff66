// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + validation loop using Burn's DataLoader and Adam.
//
// Backend note:
//   - Training uses MyBackend (Autodiff<NdArray>) for gradients
//   - model.valid() returns the model on MyInnerBackend (NdArray)
//   - Validation batcher must also use MyInnerBackend
//   - argmax(1) returns [batch,1] so we flatten before .equal()
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::SignBatcher, dataset::SignDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{SignModel, SignModelConfig};

type MyBackend      = burn::backend::Autodiff<burn::backend::NdArray>;
type MyInnerBackend = burn::backend::NdArray;

/// Run the full training loop and save the final model.
/// Returns the validation accuracy after the last epoch.
pub fn run_training(
    cfg:           &TrainConfig,
    model_cfg:     &SignModelConfig,
    train_dataset: SignDataset,
    val_dataset:   SignDataset,
    ckpt_manager:  &CheckpointManager,
    metrics:       &MetricsLogger,
) -> Result<f64> {
    let device = burn::backend::ndarray::NdArrayDevice::default();

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: SignModel<MyBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: {} -> {} -> {} -> {} ({} params)",
        model_cfg.num_features, model_cfg.hidden1,
        model_cfg.hidden2, model_cfg.num_classes,
        model_cfg.num_parameters(),
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = SignBatcher::<MyBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (InnerBackend — no autodiff overhead) ──────────
    let val_batcher = SignBatcher::<MyInnerBackend>::new(device.clone());
    let val_loader  = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let mut final_val_acc = 0.0f64;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(batch.features, batch.labels);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches  += 1;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };

        // ── Validation phase ──────────────────────────────────────────────────
        // model.valid() → SignModel<MyInnerBackend>
        // dropout disabled for deterministic evaluation
        let model_valid = model.valid();

        let mut val_loss_sum  = 0.0f64;
        let mut val_batches   = 0usize;
        let mut correct       = 0usize;
        let mut total_samples = 0usize;

        for batch in val_loader.iter() {
            let logits = model_valid.forward(batch.features);

            let ce = burn::nn::loss::CrossEntropyLossConfig::new()
                .init(&logits.device());
            let batch_loss: f64 = ce
                .forward(logits.clone(), batch.labels.clone())
                .into_scalar().elem::<f64>();
            val_loss_sum += batch_loss;
            val_batches  += 1;

            // argmax(1) returns shape [batch, 1] — flatten to [batch]
            // before comparing with labels which is [batch]
            let predicted = logits.argmax(1).flatten::<1>(0, 1);

            total_samples += batch.labels.dims()[0];
            let batch_correct: i64 = predicted
                .equal(batch.labels)
                .int().sum().into_scalar().elem::<i64>();
            correct += batch_correct as usize;
        }

        let avg_val_loss = if val_batches   > 0 { val_loss_sum / val_batches as f64 } else { f64::NAN };
        let val_acc      = if total_samples > 0 { correct as f64 / total_samples as f64 } else { 0.0 };
        final_val_acc    = val_acc;

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4} | val_acc={:.1}%",
            epoch, cfg.epochs, avg_train_loss, avg_val_loss, val_acc * 100.0,
        );

        metrics.log(&EpochMetrics::new(epoch, avg_train_loss, avg_val_loss, val_acc))?;
    }

    // Single final save — any previous artifact is overwritten in place
    ckpt_manager.save_model(&model)?;
    tracing::info!("Training complete, model saved");

    Ok(final_val_acc)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::SignSample;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::fs;
    use std::path::PathBuf;

    /// Two linearly separable clusters: class 0 near 0.0, class 1 near 1.0.
    fn toy_samples(n: usize, num_features: usize) -> Vec<SignSample> {
        let mut rng = StdRng::seed_from_u64(7);
        (0..n)
            .map(|i| {
                let label  = i % 2;
                let centre = label as f32;
                let features = (0..num_features)
                    .map(|_| centre + rng.gen_range(-0.1..0.1))
                    .collect();
                SignSample::new(features, label)
            })
            .collect()
    }

    fn temp_model_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("asl_trainer_test_{name}"));
        fs::remove_dir_all(&dir).ok();
        dir
    }

    #[test]
    fn test_end_to_end_toy_training() {
        let dir = temp_model_dir("e2e");
        let cfg = TrainConfig {
            model_dir: dir.to_string_lossy().into_owned(),
            ..TrainConfig::default()
        };
        let model_cfg = SignModelConfig::new(10, 2, cfg.hidden1, cfg.hidden2, cfg.dropout);

        let samples = toy_samples(100, 10);
        let (train, val) = crate::data::splitter::split_train_val(samples, cfg.val_fraction, cfg.seed);
        assert_eq!(val.len(), 20);

        let ckpt    = CheckpointManager::new(&cfg.model_dir);
        let metrics = MetricsLogger::new(&cfg.model_dir).unwrap();

        let accuracy = run_training(
            &cfg,
            &model_cfg,
            SignDataset::new(train),
            SignDataset::new(val),
            &ckpt,
            &metrics,
        )
        .unwrap();

        // All epochs completed and the reported accuracy is a fraction
        assert!((0.0..=1.0).contains(&accuracy));

        // One metrics row per epoch, plus the header
        let csv = fs::read_to_string(dir.join("metrics.csv")).unwrap();
        assert_eq!(csv.lines().count(), cfg.epochs + 1);

        // The trained weights landed on disk
        assert!(dir.join("asl_model.mpk.gz").exists());

        fs::remove_dir_all(&dir).ok();
    }
}
