//! Search configuration
//!
//! Level 4 - Utilities and configuration

use std::f64::consts::FRAC_1_SQRT_2;
use std::time::Duration;

/// Wall-clock learning time used for a real decision
pub const DEFAULT_LEARNING_TIME: Duration = Duration::from_millis(900);

/// When the driver stops iterating
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchBudget {
    /// Keep going while elapsed time is below the limit
    Time(Duration),
    /// Run exactly this many iterations
    Iterations(u32),
}

/// How far selection descends on each iteration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Stop at the best direct child of the root
    #[default]
    SingleLevel,
    /// Follow best children until an unexpanded or terminal node
    Recursive,
}

/// MCTS configuration
#[derive(Clone, Debug)]
pub struct MctsConfig {
    /// UCB1 exploration constant
    pub exploration: f64,
    /// Scale applied to rewards accumulated at each node (alpha)
    pub learning_rate: f64,
    /// Multiplier applied per level during backpropagation
    pub discount_factor: f64,
    /// Dampening in the final child value
    pub aggression_factor: f64,
    pub budget: SearchBudget,
    pub selection: SelectionPolicy,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration: FRAC_1_SQRT_2,
            learning_rate: 0.2,
            discount_factor: 1.0,
            aggression_factor: 0.2,
            budget: SearchBudget::Time(DEFAULT_LEARNING_TIME),
            selection: SelectionPolicy::SingleLevel,
            seed: None,
        }
    }
}

impl MctsConfig {
    /// Create config searching for a fixed wall-clock time
    pub fn time_limited(limit: Duration) -> Self {
        Self {
            budget: SearchBudget::Time(limit),
            ..Default::default()
        }
    }

    /// Create config running a fixed number of iterations
    pub fn iterations(count: u32) -> Self {
        Self {
            budget: SearchBudget::Iterations(count),
            ..Default::default()
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_selection(mut self, selection: SelectionPolicy) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }
}
