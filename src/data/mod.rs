// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the pickled artifact on disk to tensor
// batches ready for the training loop:
//
//   processed_train.pkl
//       │
//       ▼
//   PickleLoader      → decodes the (features, labels, classes)
//       │               tuple and validates its shape
//       ▼
//   split_train_val   → seeded shuffle, 80/20 partition
//       │
//       ▼
//   SignDataset       → implements Burn's Dataset trait
//       │
//       ▼
//   SignBatcher       → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Each module is responsible for exactly one step.

/// Decodes the pickled dataset artifact
pub mod loader;

/// Seeded shuffle + train/validation split
pub mod splitter;

/// Implements Burn's Dataset trait for sign samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
