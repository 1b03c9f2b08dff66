// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish a specific goal
// (training the classifier, or evaluating a saved one).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No argument parsing here (that's Layer 1)
//   - Only workflow coordination

// The training workflow
pub mod train_use_case;

// The offline evaluation workflow
pub mod evaluate_use_case;
