//! Random rollouts to the next round boundary
//!
//! ## Architecture
//! - Level 3: Single rollout implementation
//! - Level 4: Reward map

use azul_core::{GameState, Result, Seat, Simulator};
use rand::Rng;
use std::ops::{Index, IndexMut};

// ============================================================================
// REWARDS (Level 4)
// ============================================================================

/// Reward per fixed agent identifier
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rewards([f64; 2]);

impl Rewards {
    pub fn new(first: f64, second: f64) -> Self {
        Self([first, second])
    }

    /// Each seat's current score
    pub fn from_scores(state: &GameState) -> Self {
        Self::new(
            state.score(Seat::First) as f64,
            state.score(Seat::Second) as f64,
        )
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self([self.0[0] * factor, self.0[1] * factor])
    }
}

impl Index<Seat> for Rewards {
    type Output = f64;

    fn index(&self, seat: Seat) -> &f64 {
        &self.0[seat.index()]
    }
}

impl IndexMut<Seat> for Rewards {
    fn index_mut(&mut self, seat: Seat) -> &mut f64 {
        &mut self.0[seat.index()]
    }
}

// ============================================================================
// ROLLOUT RESULT
// ============================================================================

/// Result of a rollout simulation
#[derive(Clone, Debug)]
pub struct RolloutResult {
    /// Scores at the end of the rollout
    pub rewards: Rewards,
    /// Number of moves played
    pub moves_played: u32,
    /// Round counter when the rollout stopped
    pub final_round: u32,
    pub game_over: bool,
}

// ============================================================================
// ROLLOUT (Level 3)
// ============================================================================

/// Play uniformly random moves on a copy of `state` until the round counter
/// advances or the game ends.
///
/// Full-game rollouts are too expensive; the first round boundary is the
/// horizon. The acting seat alternates locally starting from the state's
/// current player.
pub fn rollout<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Result<RolloutResult> {
    let mut current = state.clone();
    let start_round = state.round;
    let mut seat = state.current_seat();
    let mut moves_played = 0;
    let mut game_over = false;

    let mut sim = Simulator::new(&mut current, rng);

    while sim.state().round <= start_round && !game_over {
        let Some(mv) = sim.random_move() else {
            // Nothing left to draft and no refill happened
            break;
        };

        game_over = sim.apply_move(seat, mv)?;
        seat = seat.opponent();
        moves_played += 1;
    }

    Ok(RolloutResult {
        rewards: Rewards::from_scores(sim.state()),
        moves_played,
        final_round: sim.state().round,
        game_over,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use azul_core::{Color, Tile};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn opening() -> GameState {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        GameState::new_game(["a", "b"], &mut rng)
    }

    #[test]
    fn test_rewards_index_and_scale() {
        let mut rewards = Rewards::new(2.0, 4.0);
        rewards[Seat::Second] += 1.0;
        assert_eq!(rewards[Seat::First], 2.0);
        assert_eq!(rewards[Seat::Second], 5.0);
        assert_eq!(rewards.scaled(0.5), Rewards::new(1.0, 2.5));
    }

    #[test]
    fn test_rollout_stops_at_round_boundary() {
        let state = opening();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let result = rollout(&state, &mut rng).unwrap();

        assert_eq!(result.final_round, state.round + 1);
        assert!(!result.game_over);
        // 20 tiles on the table; every move takes at least one
        assert!(result.moves_played >= 5 && result.moves_played <= 20);
        assert!(result.rewards[Seat::First] >= 0.0);
        assert!(result.rewards[Seat::Second] >= 0.0);
    }

    #[test]
    fn test_rollout_leaves_input_untouched() {
        let state = opening();
        let before = state.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        rollout(&state, &mut rng).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_rollout_is_deterministic_for_seed() {
        let state = opening();
        let a = rollout(&state, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        let b = rollout(&state, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        assert_eq!(a.rewards, b.rewards);
        assert_eq!(a.moves_played, b.moves_played);
    }

    #[test]
    fn test_rollout_on_empty_table_returns_scores() {
        let mut state = opening();
        state.factories.iter_mut().for_each(|f| f.tiles.clear());
        state.players[1].score = 9;
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let result = rollout(&state, &mut rng).unwrap();
        assert_eq!(result.moves_played, 0);
        assert_eq!(result.rewards, Rewards::new(0.0, 9.0));
    }

    #[test]
    fn test_rollout_last_tile_closes_round() {
        let mut state = opening();
        state.factories.truncate(1);
        state.factories[0].tiles = vec![Tile::new(Color::Blue)];
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let result = rollout(&state, &mut rng).unwrap();
        assert_eq!(result.moves_played, 1);
        assert_eq!(result.final_round, state.round + 1);
    }
}
