//! Play command - self-play a full game between two MCTS agents
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_game(), report_results()
//! - Level 3: play_turn(), close_round()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use azul_core::{GameState, Move, Seat, Simulator};
use azul_mcts::{decide, MctsConfig};

use crate::SearchArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Stop after this many rounds even if no wall row is complete
    #[arg(long, default_value = "20")]
    pub max_rounds: u32,

    /// Output the game record as JSON
    #[arg(long)]
    pub json: bool,
}

/// Scores after one round
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub round: u32,
    pub moves: usize,
    pub scores: [i32; 2],
}

/// Result of a single self-play game
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub rounds: Vec<RoundSummary>,
    pub moves: Vec<Move>,
    pub final_scores: [i32; 2],
    /// None on a tie
    pub winner: Option<usize>,
    pub game_over: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Deal a fresh game
/// 2. Alternate MCTS decisions until a wall row completes
/// 3. Report results
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = args.search.to_config(seed);
    let mut rng = create_rng(seed);

    tracing::info!(
        "Starting self-play ({:?}, max {} rounds)",
        config.budget,
        args.max_rounds
    );

    let record = play_game(&config, args.max_rounds, &mut rng)?;

    report_results(&record, args.json);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play one game from a fresh deal
pub fn play_game(config: &MctsConfig, max_rounds: u32, rng: &mut ChaCha8Rng) -> Result<GameRecord> {
    let mut state = GameState::new_game(["mcts-0", "mcts-1"], rng);
    let mut moves = Vec::new();
    let mut rounds = Vec::new();
    let mut round_moves = 0;
    let mut game_over = false;

    while !game_over && state.round <= max_rounds {
        if state.legal_moves().is_empty() {
            tracing::warn!("No legal moves in round {}, stopping", state.round);
            break;
        }

        let round = state.round;
        let (mv, ended) = play_turn(&mut state, config, rng)?;
        moves.push(mv);
        round_moves += 1;
        game_over = ended;

        if state.round != round || game_over {
            rounds.push(close_round(&state, round, round_moves));
            round_moves = 0;
        }
    }

    let final_scores = scores(&state);
    Ok(GameRecord {
        rounds,
        moves,
        final_scores,
        winner: winner(final_scores),
        game_over,
    })
}

/// Report game results
fn report_results(record: &GameRecord, json: bool) {
    if json {
        if let Ok(out) = serde_json::to_string_pretty(record) {
            println!("{}", out);
        }
        return;
    }

    println!("\n=== Self-Play Results ===");
    for summary in &record.rounds {
        println!(
            "Round {:>2}: {:>3} moves   {:>3} - {:<3}",
            summary.round, summary.moves, summary.scores[0], summary.scores[1]
        );
    }
    println!(
        "Final score: {} - {} ({})",
        record.final_scores[0],
        record.final_scores[1],
        format_winner(record.winner)
    );
    if !record.game_over {
        println!("Stopped at the round limit before any wall row was complete");
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Decide and apply one move for the player on turn
fn play_turn(state: &mut GameState, config: &MctsConfig, rng: &mut ChaCha8Rng) -> Result<(Move, bool)> {
    let seat = state.current_seat();

    // Seeded runs stay reproducible with a fresh seed per decision
    let turn_config = match config.seed {
        Some(_) => config.clone().with_seed(rng.gen()),
        None => config.clone(),
    };

    let mv = decide(state, &turn_config)
        .with_context(|| format!("Player {} failed to choose a move", seat))?;
    let game_over = Simulator::new(state, rng)
        .apply_move(seat, mv)
        .with_context(|| format!("Player {} chose an unplayable move: {}", seat, mv))?;

    tracing::debug!("Player {} plays {}", seat, mv);

    Ok((mv, game_over))
}

fn close_round(state: &GameState, round: u32, moves: usize) -> RoundSummary {
    let summary = RoundSummary {
        round,
        moves,
        scores: scores(state),
    };
    tracing::info!(
        "Round {} done after {} moves: {} - {}",
        round,
        moves,
        summary.scores[0],
        summary.scores[1]
    );
    summary
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn scores(state: &GameState) -> [i32; 2] {
    [state.score(Seat::First), state.score(Seat::Second)]
}

fn winner(scores: [i32; 2]) -> Option<usize> {
    match scores[0].cmp(&scores[1]) {
        std::cmp::Ordering::Greater => Some(0),
        std::cmp::Ordering::Less => Some(1),
        std::cmp::Ordering::Equal => None,
    }
}

fn format_winner(winner: Option<usize>) -> String {
    match winner {
        Some(seat) => format!("player {} wins", seat),
        None => "tie".to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
