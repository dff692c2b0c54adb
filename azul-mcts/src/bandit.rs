//! UCB1 scoring for child selection

use std::f64::consts::FRAC_1_SQRT_2;

/// Upper Confidence Bound rule with a fixed exploration constant
#[derive(Clone, Copy, Debug)]
pub struct Ucb1 {
    pub exploration: f64,
}

impl Default for Ucb1 {
    fn default() -> Self {
        Self::new(FRAC_1_SQRT_2)
    }
}

impl Ucb1 {
    pub fn new(exploration: f64) -> Self {
        Self { exploration }
    }

    /// UCB1 = q + C * sqrt(ln(parent_visits) / visits)
    ///
    /// Unvisited children score +inf. `q` is the raw accumulated reward, not
    /// normalised to [0, 1].
    pub fn score(&self, q: f64, visits: u32, parent_visits: u32) -> f64 {
        if visits == 0 {
            return f64::INFINITY;
        }

        let exploration_term =
            self.exploration * ((parent_visits as f64).ln() / visits as f64).sqrt();

        q + exploration_term
    }
}
