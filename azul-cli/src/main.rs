//! Azul CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the move-decision HTTP server
//! - decide: Choose a move for a saved game state
//! - play: Self-play a full game between two MCTS agents

mod decide;
mod play;
mod server;

use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use azul_mcts::{MctsConfig, SearchBudget, SelectionPolicy};

#[derive(Parser)]
#[command(name = "azul")]
#[command(about = "Monte Carlo tree search agent for a two-player tile-drafting game")]
struct Cli {
    /// Random seed for reproducible searches and deals
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the move-decision server
    Serve(server::ServerArgs),
    /// Choose a move for a game state stored as JSON
    Decide(decide::DecideArgs),
    /// Play a full game, MCTS against MCTS
    Play(play::PlayArgs),
}

// ============================================================================
// SHARED SEARCH ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args, Clone, Debug)]
pub struct SearchArgs {
    /// Wall-clock learning time per decision, in milliseconds
    #[arg(long, default_value = "900")]
    pub learning_ms: u64,

    /// Run a fixed number of iterations instead of a time budget
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Descend past the root's children during selection
    #[arg(long)]
    pub recursive: bool,
}

impl SearchArgs {
    pub fn to_config(&self, seed: Option<u64>) -> MctsConfig {
        let budget = match self.iterations {
            Some(count) => SearchBudget::Iterations(count),
            None => SearchBudget::Time(Duration::from_millis(self.learning_ms)),
        };
        let selection = if self.recursive {
            SelectionPolicy::Recursive
        } else {
            SelectionPolicy::SingleLevel
        };

        let config = MctsConfig::default()
            .with_budget(budget)
            .with_selection(selection);
        match seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args, cli.seed),
        Commands::Decide(args) => decide::run(args, cli.seed),
        Commands::Play(args) => play::run(args, cli.seed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_args_time_budget() {
        let args = SearchArgs {
            learning_ms: 250,
            iterations: None,
            recursive: false,
        };
        let config = args.to_config(None);
        assert_eq!(config.budget, SearchBudget::Time(Duration::from_millis(250)));
        assert_eq!(config.selection, SelectionPolicy::SingleLevel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_search_args_iterations_override_time() {
        let args = SearchArgs {
            learning_ms: 250,
            iterations: Some(400),
            recursive: true,
        };
        let config = args.to_config(Some(3));
        assert_eq!(config.budget, SearchBudget::Iterations(400));
        assert_eq!(config.selection, SelectionPolicy::Recursive);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_cli_parses_global_seed() {
        let cli = Cli::try_parse_from(["azul", "play", "--seed", "9", "--iterations", "10"]).unwrap();
        assert_eq!(cli.seed, Some(9));
        assert!(matches!(cli.command, Commands::Play(_)));
    }
}
