// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Shuffles samples with a seeded RNG and splits them into:
//   - Training set:   used to update model weights
//   - Validation set: used to measure performance on unseen data
//
// The shuffle uses Fisher-Yates via rand::seq::SliceRandom over
// an StdRng seeded from a fixed value, so the same input and the
// same seed always produce the same partitions. Reproducible
// splits are what make a reported validation accuracy comparable
// across runs.
//
// Validation size = round(val_fraction × N); the training set is
// everything else. No sample is lost or duplicated.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` deterministically and split into (train, validation).
///
/// # Arguments
/// * `samples`      - All available samples (consumed by this function)
/// * `val_fraction` - Proportion held out for validation, e.g. 0.2 = 20%
/// * `seed`         - RNG seed for the shuffle
///
/// # Returns
/// A tuple (train_samples, val_samples)
pub fn split_train_val<T>(
    mut samples:  Vec<T>,
    val_fraction: f64,
    seed:         u64,
) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);

    // Fisher-Yates shuffle — every permutation is equally likely
    samples.shuffle(&mut rng);

    // e.g. 100 samples * 0.2 = 20 → last 20 are validation
    let total = samples.len();
    let val_count = ((total as f64) * val_fraction).round() as usize;
    let val_count = val_count.min(total);

    // split_off(n) removes elements [n..] from the Vec and returns them
    let val = samples.split_off(total - val_count);

    tracing::debug!(
        "Dataset split: {} training, {} validation (seed {})",
        samples.len(),
        val.len(),
        seed,
    );

    (samples, val)
}
