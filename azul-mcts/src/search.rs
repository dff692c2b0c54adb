//! MCTS Search Loop
//!
//! Implements the core MCTS algorithm:
//! 1. Selection - Use UCB1 to pick a node
//! 2. Expansion - Materialise all children of that node
//! 3. Simulation - Rollout to the next round boundary
//! 4. Backpropagation - Update statistics up to the root
//!
//! ## Architecture
//! - Level 2: Search loop coordination
//! - Level 3: Individual MCTS phases
//! - Level 4: Budget checks

use crate::bandit::Ucb1;
use crate::config::{MctsConfig, SearchBudget, SelectionPolicy};
use crate::tree::SearchTree;
use azul_core::Result;
use rand::Rng;
use std::time::{Duration, Instant};

// ============================================================================
// SEARCH REPORT
// ============================================================================

/// Summary of one driver run
#[derive(Clone, Debug)]
pub struct SearchReport {
    /// Full Select-Expand-Simulate-Backpropagate cycles completed
    pub iterations: u32,
    /// Nodes in the tree afterwards
    pub nodes: usize,
    pub elapsed: Duration,
}

// ============================================================================
// SEARCH LOOP (Level 2 - Main Coordination)
// ============================================================================

/// Grow `tree` until the budget is spent.
///
/// The budget is checked before each cycle and never inside one, so a time
/// budget can overshoot by up to one cycle and a zero budget runs nothing.
pub fn run_search<R: Rng + ?Sized>(
    tree: &mut SearchTree,
    config: &MctsConfig,
    rng: &mut R,
) -> Result<SearchReport> {
    let bandit = Ucb1::new(config.exploration);
    let start = Instant::now();
    let mut iterations = 0;

    while within_budget(config.budget, start, iterations) {
        run_single_iteration(tree, &bandit, config.selection, rng)?;
        iterations += 1;
    }

    let report = SearchReport {
        iterations,
        nodes: tree.len(),
        elapsed: start.elapsed(),
    };

    tracing::debug!(
        iterations = report.iterations,
        nodes = report.nodes,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "search finished"
    );

    Ok(report)
}

// ============================================================================
// SINGLE ITERATION (Level 3)
// ============================================================================

/// One complete MCTS cycle
fn run_single_iteration<R: Rng + ?Sized>(
    tree: &mut SearchTree,
    bandit: &Ucb1,
    policy: SelectionPolicy,
    rng: &mut R,
) -> Result<()> {
    // Phase 1: Selection
    let selected = tree.select(tree.root(), bandit, policy);

    // Phase 2: Expansion (no-op if already expanded)
    tree.expand(selected, rng)?;

    // Phase 3: Simulation from the selected node itself
    let reward = tree.simulate(selected, rng)?;

    // Phase 4: Backpropagation
    tree.backpropagate(selected, reward);

    Ok(())
}

// ============================================================================
// BUDGET (Level 4)
// ============================================================================

fn within_budget(budget: SearchBudget, start: Instant, iterations: u32) -> bool {
    match budget {
        SearchBudget::Time(limit) => start.elapsed() < limit,
        SearchBudget::Iterations(limit) => iterations < limit,
    }
}

// ============================================================================
// TESTS
// ============================================================================
