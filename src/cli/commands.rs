// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `evaluate`
// and all their configurable flags.
//
// Every default below matches the fixed constant the training
// routine was originally written with, so running `train` with
// no flags reproduces the canonical run exactly.

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the sign classifier on the preprocessed dataset
    Train(TrainArgs),

    /// Evaluate a saved model on the held-out validation split
    Evaluate(EvaluateArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Pickled dataset: a 3-tuple of (features, labels, class names)
    #[arg(long, default_value = "processed_train.pkl")]
    pub data_path: String,

    /// Directory to save the trained model, manifest, and metrics
    #[arg(long, default_value = "model")]
    pub model_dir: String,

    /// Fraction of samples held out for validation
    #[arg(long, default_value_t = 0.2)]
    pub val_fraction: f64,

    /// Seed for the shuffle that precedes the split —
    /// the same seed always produces the same partitions
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// Number of samples processed together in one forward pass
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Width of the first hidden layer
    #[arg(long, default_value_t = 128)]
    pub hidden1: usize,

    /// Width of the second hidden layer
    #[arg(long, default_value_t = 64)]
    pub hidden2: usize,

    /// Dropout probability applied after each hidden layer —
    /// randomly zeroes activations during training to prevent overfitting
    #[arg(long, default_value_t = 0.5)]
    pub dropout: f64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:    a.data_path,
            model_dir:    a.model_dir,
            val_fraction: a.val_fraction,
            seed:         a.seed,
            epochs:       a.epochs,
            batch_size:   a.batch_size,
            lr:           a.lr,
            hidden1:      a.hidden1,
            hidden2:      a.hidden2,
            dropout:      a.dropout,
        }
    }
}

/// All arguments for the `evaluate` command
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Directory where the trained model was saved
    #[arg(long, default_value = "model")]
    pub model_dir: String,

    /// Pickled dataset (same artifact used during training)
    #[arg(long, default_value = "processed_train.pkl")]
    pub data_path: String,
}
