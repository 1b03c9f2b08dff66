// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns:
//
//   checkpoint.rs — Saving and loading the trained model with
//                   Burn's CompactRecorder, plus the manifest
//                   (hyperparameters, data dimensions, class
//                   names) needed to rebuild the model later.
//
//   metrics.rs    — Per-epoch training metrics appended to a
//                   CSV file for later analysis and plotting.

/// Model weights + manifest saving and loading
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;
