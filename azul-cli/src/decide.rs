//! Decide command - choose a move for a saved game state
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_state(), report_move()
//! - Level 3: (delegated to azul-mcts)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use azul_core::{GameState, Move};
use azul_mcts::decide;

use crate::SearchArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct DecideArgs {
    /// Game state JSON file (same format as the server's request body)
    #[arg(value_name = "FILE")]
    pub state: PathBuf,

    #[command(flatten)]
    pub search: SearchArgs,

    /// Print the move as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run decide command
///
/// 1. Load and validate the state
/// 2. Search for a move
/// 3. Print it
pub fn run(args: DecideArgs, seed: Option<u64>) -> Result<()> {
    let state = load_state(&args.state)?;
    let config = args.search.to_config(seed);

    tracing::info!(
        "Deciding for player {} in round {} ({:?})",
        state.current_seat(),
        state.round,
        config.budget
    );

    let mv = decide(&state, &config).context("Search failed to choose a move")?;

    report_move(&mv, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_state(path: &Path) -> Result<GameState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file: {}", path.display()))?;

    GameState::from_json(&content)
        .with_context(|| format!("Failed to parse state file: {}", path.display()))
}

fn report_move(mv: &Move, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(mv)?);
    } else {
        println!("{}", mv);
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
