use burn::data::dataset::Dataset;

use crate::domain::sample::SignSample;

/// In-memory dataset over one partition (train or validation).
/// Implements Burn's Dataset trait so the DataLoader can call
/// .get(index) and .len() on it.
pub struct SignDataset {
    samples: Vec<SignSample>,
}

impl SignDataset {
    pub fn new(samples: Vec<SignSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<SignSample> for SignDataset {
    fn get(&self, index: usize) -> Option<SignSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_len() {
        let ds = SignDataset::new(vec![
            SignSample::new(vec![0.0, 1.0], 0),
            SignSample::new(vec![1.0, 0.0], 1),
        ]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(1).unwrap().label, 1);
        assert!(ds.get(2).is_none());
    }
}
