//! MCTS Agent - chooses one move per decision
//!
//! ## Architecture
//! - Level 1: `decide` entry point (state in, move out)
//! - Level 2: `MctsAgent::select_action`
//! - Level 3: Final child ranking

use crate::config::MctsConfig;
use crate::search::run_search;
use crate::tree::{ChildStatistics, SearchTree};
use azul_core::{AzulError, GameState, Move, Result, Seat};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// DECISION ENTRY POINT (Level 1)
// ============================================================================

/// Choose a move for whoever is on turn in `state`
pub fn decide(state: &GameState, config: &MctsConfig) -> Result<Move> {
    let legal = state.legal_moves();
    if legal.is_empty() {
        tracing::warn!(round = state.round, "decision requested with no legal moves");
        return Err(AzulError::NoLegalMoves);
    }

    MctsAgent::new(state.current_seat(), config.clone()).select_action(&legal, state)
}

// ============================================================================
// AGENT (Level 2)
// ============================================================================

/// Search-backed player bound to one seat
#[derive(Clone, Debug)]
pub struct MctsAgent {
    pub id: Seat,
    config: MctsConfig,
}

impl MctsAgent {
    pub fn new(id: Seat, config: MctsConfig) -> Self {
        Self { id, config }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Pick a move from `legal` for the position in `state`.
    ///
    /// A single legal move is returned without searching.
    pub fn select_action(&self, legal: &[Move], state: &GameState) -> Result<Move> {
        if let [only] = legal {
            tracing::debug!(player = %self.id, mv = %only, "single legal move");
            return Ok(*only);
        }

        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut tree = SearchTree::new(state.clone(), self.id, &self.config);
        let report = run_search(&mut tree, &self.config, &mut rng)?;

        let stats = tree.child_statistics(self.id, self.config.aggression_factor);
        let best = best_child(&stats).ok_or(AzulError::NoValidAction)?;

        tracing::info!(
            player = %self.id,
            mv = %best.mv,
            value = best.value,
            visits = best.visits,
            iterations = report.iterations,
            nodes = report.nodes,
            "move selected"
        );

        Ok(best.mv)
    }
}

// ============================================================================
// FINAL RANKING (Level 3)
// ============================================================================

/// Highest value wins; the earliest child keeps ties
fn best_child(stats: &[ChildStatistics]) -> Option<&ChildStatistics> {
    let mut best: Option<&ChildStatistics> = None;
    for candidate in stats {
        if best.map_or(true, |b| candidate.value > b.value) {
            best = Some(candidate);
        }
    }
    best
}

// ============================================================================
// TESTS
// ============================================================================
