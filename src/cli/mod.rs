// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with `clap`.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`    — trains the classifier on the preprocessed dataset
//   2. `evaluate` — reloads a saved model and reports its accuracy

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, TrainArgs, EvaluateArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "asl-classifier",
    version = "0.1.0",
    about = "Train a dense neural network classifier on preprocessed ASL landmark features."
)]
pub struct Cli {
    /// The subcommand to run (train or evaluate)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => Self::run_train(args),
            Commands::Evaluate(args) => Self::run_evaluate(args),
        }
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a TrainConfig and hands off to Layer 2.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on dataset: {}", args.data_path);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        Ok(())
    }

    /// Handles the `evaluate` subcommand.
    /// Reloads the saved model and prints validation accuracy.
    fn run_evaluate(args: EvaluateArgs) -> Result<()> {
        use crate::application::evaluate_use_case::EvaluateUseCase;

        let use_case = EvaluateUseCase::new(args.model_dir, args.data_path);
        let accuracy = use_case.execute()?;

        println!("Validation Accuracy: {:.2}%", accuracy * 100.0);
        Ok(())
    }
}
