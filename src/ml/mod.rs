// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code apart
// from the thin Dataset/Batcher impls in Layer 4.
//
//   model.rs     — The dense classifier architecture:
//                  Linear(128) → ReLU → Dropout(0.5)
//                  → Linear(64) → ReLU → Dropout(0.5)
//                  → Linear(num_classes), cross-entropy loss
//
//   trainer.rs   — The training loop: forward pass, loss,
//                  backward pass, Adam step, per-epoch
//                  validation, metrics row, final save
//
//   evaluator.rs — Loads the saved model and computes accuracy
//                  over a sample set

/// Dense sign classifier architecture
pub mod model;

/// Full training loop with per-epoch validation
pub mod trainer;

/// Offline evaluation of a saved model
pub mod evaluator;
