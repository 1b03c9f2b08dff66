// ============================================================
// Layer 4 — Sign Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<SignSample>
// into tensors the model can consume.
//
// Input:  Vec of N SignSamples, each with F features
// Output: SignBatch with a [N, F] float tensor and a [N] label
//         tensor
//
// All rows already have the same width (the loader enforces it),
// so batching is flatten-then-reshape with no padding step.

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::sample::SignSample;

// ─── SignBatch ────────────────────────────────────────────────────────────────
/// A batch of samples ready for the model forward pass.
///
/// B is the Burn Backend (e.g. NdArray, Wgpu) —
/// generic so the same batcher works on any device.
#[derive(Debug, Clone)]
pub struct SignBatch<B: Backend> {
    /// Feature rows — shape: [batch_size, num_features]
    pub features: Tensor<B, 2>,

    /// Ground truth class ids — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

// ─── SignBatcher ──────────────────────────────────────────────────────────────
/// The batcher struct — holds the target device so tensors
/// are created in the right place.
#[derive(Clone, Debug)]
pub struct SignBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> SignBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

// This is what makes SignBatcher work with Burn's DataLoader.
// The DataLoader calls .batch(items) with each mini-batch of samples.
impl<B: Backend> Batcher<SignSample, SignBatch<B>> for SignBatcher<B> {
    fn batch(&self, items: Vec<SignSample>) -> SignBatch<B> {
        let batch_size   = items.len();
        // All rows have the same width (enforced at load time)
        let num_features = items[0].features.len();

        // Flatten Vec<Vec<f32>> into one contiguous Vec<f32>, then
        // reshape into [batch_size, num_features]
        let feature_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();

        let labels_flat: Vec<i32> = items
            .iter()
            .map(|s| s.label as i32)
            .collect();

        let features = Tensor::<B, 1>::from_floats(
            feature_flat.as_slice(), &self.device,
        ).reshape([batch_size, num_features]);

        let labels = Tensor::<B, 1, Int>::from_ints(
            labels_flat.as_slice(), &self.device,
        );

        SignBatch { features, labels }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn test_batch_shapes() {
        let device  = Default::default();
        let batcher = SignBatcher::<TestBackend>::new(device);

        let items = vec![
            SignSample::new(vec![0.0, 1.0, 2.0], 0),
            SignSample::new(vec![3.0, 4.0, 5.0], 1),
        ];
        let batch = batcher.batch(items);

        assert_eq!(batch.features.dims(), [2, 3]);
        assert_eq!(batch.labels.dims(),   [2]);
    }

    #[test]
    fn test_rows_keep_their_labels() {
        let device  = Default::default();
        let batcher = SignBatcher::<TestBackend>::new(device);

        let items = vec![
            SignSample::new(vec![1.0], 1),
            SignSample::new(vec![0.0], 0),
        ];
        let batch  = batcher.batch(items);
        let labels: Vec<i64> = batch.labels.into_data().to_vec().unwrap();
        assert_eq!(labels, vec![1, 0]);
    }
}
