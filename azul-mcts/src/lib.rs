//! Azul MCTS - Monte Carlo Tree Search for the drafting game
//!
//! This crate provides a time-boxed UCB1 search:
//! - Tree policy (UCB1 over accumulated reward)
//! - All-at-once expansion in an arena tree
//! - Random rollouts to the next round boundary
//! - Discounted backpropagation
//! - An agent that turns search statistics into one move

pub mod agent;
pub mod bandit;
pub mod config;
pub mod rollout;
pub mod search;
pub mod tree;

pub use agent::{decide, MctsAgent};
pub use bandit::Ucb1;
pub use config::{MctsConfig, SearchBudget, SelectionPolicy, DEFAULT_LEARNING_TIME};
pub use rollout::{rollout, Rewards, RolloutResult};
pub use search::{run_search, SearchReport};
pub use tree::{ChildStatistics, NodeId, SearchNode, SearchTree};
