//! MCTS Tree structure and node management
//!
//! Uses arena allocation: children are owned by the arena and referenced by
//! index, the parent link is a plain `NodeId`.
//!
//! ## Architecture
//! - Level 2: Tree operations (select, expand, simulate, backpropagate)
//! - Level 3: UCB1 child ranking, node accessors
//! - Level 4: Statistics, utilities

use crate::bandit::Ucb1;
use crate::config::{MctsConfig, SelectionPolicy};
use crate::rollout::{rollout, Rewards};
use azul_core::{GameState, Move, Result, Seat, Simulator};
use rand::Rng;

// ============================================================================
// TYPES
// ============================================================================

/// Node identifier (index into arena)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// A node in the search tree
#[derive(Clone, Debug)]
pub struct SearchNode {
    /// Game state at this node
    pub state: GameState,
    /// Parent node (None for root)
    pub parent: Option<NodeId>,
    /// Move that led to this node (None for root)
    pub incoming_move: Option<Move>,
    pub children: Vec<NodeId>,
    /// Accumulated (not averaged) reward per seat
    pub rewards: Rewards,
    pub visits: u32,
    /// Children materialised; set once, never cleared
    pub expanded: bool,
    /// Seat acting when this node expands; alternates with depth
    pub agent: Seat,
}

impl SearchNode {
    pub fn new(
        state: GameState,
        parent: Option<NodeId>,
        incoming_move: Option<Move>,
        agent: Seat,
    ) -> Self {
        Self {
            state,
            parent,
            incoming_move,
            children: Vec::new(),
            rewards: Rewards::default(),
            visits: 0,
            expanded: false,
            agent,
        }
    }

    pub fn opponent(&self) -> Seat {
        self.agent.opponent()
    }

    /// Every factory is empty: the round boundary within the tree's horizon
    pub fn is_terminal(&self) -> bool {
        self.state.all_factories_empty()
    }

    /// Child count matches the legal moves from this state
    pub fn is_fully_expanded(&self) -> bool {
        self.children.len() == self.state.legal_moves().len()
    }

    /// `(r - a * r) / visits` for the perspective seat, 0 when unvisited.
    ///
    /// The opponent's reward is not consulted.
    pub fn value(&self, perspective: Seat, aggression_factor: f64) -> f64 {
        if self.visits == 0 {
            return 0.0;
        }
        let reward = self.rewards[perspective];
        (reward - aggression_factor * reward) / self.visits as f64
    }
}

/// Per-child statistics at the root
#[derive(Clone, Debug)]
pub struct ChildStatistics {
    pub mv: Move,
    pub visits: u32,
    pub value: f64,
}

// ============================================================================
// SEARCH TREE (Level 2 - Tree Operations)
// ============================================================================

/// Search tree with arena allocation, built for one decision and then dropped
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    learning_rate: f64,
    discount_factor: f64,
}

impl SearchTree {
    /// Create a tree whose root expands on behalf of `agent`
    pub fn new(root_state: GameState, agent: Seat, config: &MctsConfig) -> Self {
        Self {
            nodes: vec![SearchNode::new(root_state, None, None, agent)],
            learning_rate: config.learning_rate,
            discount_factor: config.discount_factor,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0]
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ========================================================================
    // Level 2: Selection
    // ========================================================================

    /// Pick the node to work on next.
    ///
    /// Unexpanded or terminal nodes are returned unchanged. Otherwise the
    /// best child by UCB1 is taken; `SingleLevel` stops there, `Recursive`
    /// keeps descending.
    pub fn select(&self, from: NodeId, bandit: &Ucb1, policy: SelectionPolicy) -> NodeId {
        let mut current = from;

        loop {
            let node = self.get(current);
            if !node.expanded || node.is_terminal() {
                return current;
            }

            let Some(best) = self.select_best_child(current, bandit) else {
                return current;
            };

            match policy {
                SelectionPolicy::SingleLevel => return best,
                SelectionPolicy::Recursive => current = best,
            }
        }
    }

    // ========================================================================
    // Level 2: Expansion
    // ========================================================================

    /// Materialise one child per legal move, all at once.
    ///
    /// No-op if already expanded. Each child is produced by applying the move
    /// as this node's agent and expands later as the other seat. If any move
    /// fails to apply, no children are added.
    pub fn expand<R: Rng + ?Sized>(&mut self, id: NodeId, rng: &mut R) -> Result<()> {
        let node = self.get(id);
        if node.expanded {
            return Ok(());
        }

        let agent = node.agent;
        let opponent = node.opponent();
        let children = node
            .state
            .legal_moves()
            .into_iter()
            .map(|mv| -> Result<(Move, GameState)> {
                let mut child_state = node.state.clone();
                Simulator::new(&mut child_state, &mut *rng).apply_move(agent, mv)?;
                Ok((mv, child_state))
            })
            .collect::<Result<Vec<_>>>()?;

        for (mv, child_state) in children {
            let child_id = NodeId(self.nodes.len());
            self.nodes
                .push(SearchNode::new(child_state, Some(id), Some(mv), opponent));
            self.get_mut(id).children.push(child_id);
        }
        self.get_mut(id).expanded = true;

        Ok(())
    }

    // ========================================================================
    // Level 2: Simulation and Backpropagation
    // ========================================================================

    /// Random rollout from the node's state to the next round boundary
    pub fn simulate<R: Rng + ?Sized>(&self, id: NodeId, rng: &mut R) -> Result<Rewards> {
        Ok(rollout(&self.get(id).state, rng)?.rewards)
    }

    /// Add `alpha * reward` at `leaf` and every ancestor, discounting per level
    pub fn backpropagate(&mut self, leaf: NodeId, reward: Rewards) {
        let alpha = self.learning_rate;
        let discount = self.discount_factor;
        let mut reward = reward;
        let mut current = Some(leaf);

        while let Some(node_id) = current {
            let node = self.get_mut(node_id);
            node.visits += 1;
            for seat in Seat::BOTH {
                node.rewards[seat] += alpha * reward[seat];
            }

            reward = reward.scaled(discount);
            current = node.parent;
        }
    }

    // ========================================================================
    // Level 3: Selection Helpers
    // ========================================================================

    /// Child with the highest UCB1 score for the node's own agent.
    ///
    /// Ties go to the earliest child.
    fn select_best_child(&self, id: NodeId, bandit: &Ucb1) -> Option<NodeId> {
        let node = self.get(id);
        let mut best: Option<(NodeId, f64)> = None;

        for &child_id in &node.children {
            let child = self.get(child_id);
            let score = bandit.score(child.rewards[node.agent], child.visits, node.visits);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((child_id, score));
            }
        }

        best.map(|(child_id, _)| child_id)
    }

    // ========================================================================
    // Level 4: Statistics
    // ========================================================================

    /// Statistics for each direct child of the root, from `perspective`
    pub fn child_statistics(&self, perspective: Seat, aggression_factor: f64) -> Vec<ChildStatistics> {
        self.get(self.root())
            .children
            .iter()
            .filter_map(|&id| {
                let child = self.get(id);
                child.incoming_move.map(|mv| ChildStatistics {
                    mv,
                    visits: child.visits,
                    value: child.value(perspective, aggression_factor),
                })
            })
            .collect()
    }

    /// Total iterations that reached the root
    pub fn total_visits(&self) -> u32 {
        self.get(self.root()).visits
    }
}

// ============================================================================
// TESTS
// ============================================================================
