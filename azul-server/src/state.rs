//! Server state management
//!
//! Decisions are stateless; the only shared data is the search configuration.

use azul_mcts::MctsConfig;

/// Server-wide shared state
#[derive(Clone, Debug)]
pub struct ServerState {
    pub mcts: MctsConfig,
}

impl ServerState {
    pub fn new(mcts: MctsConfig) -> Self {
        Self { mcts }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(MctsConfig::default())
    }
}
