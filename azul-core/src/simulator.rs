//! Rules engine: applies a move and advances the game to its next consistent state
//!
//! ## Architecture
//! - Level 2: apply_move (validate, draft, place, advance, round end)
//! - Level 3: drafting, round-end scoring, factory refill
//! - Level 4: tile bag

use crate::error::{AzulError, Result};
use crate::game::{GameState, Move, Target};
use crate::model::{Color, Seat, Tile, ALL_COLORS, FACTORY_CAPACITY};
use rand::seq::SliceRandom;
use rand::Rng;

// ============================================================================
// TILE BAG (Level 4)
// ============================================================================

/// Tiles of each color in a freshly generated bag
pub const TILES_PER_COLOR: usize = 20;

/// Undrawn tiles used for factory refills.
///
/// When fewer tiles remain than a factory needs, the bag is replaced by a
/// fresh, shuffled full set.
#[derive(Clone, Debug, Default)]
pub struct TileBag {
    tiles: Vec<Tile>,
}

impl TileBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Draw one factory's worth of tiles
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Tile> {
        if self.tiles.len() < FACTORY_CAPACITY {
            self.regenerate(rng);
        }
        let at = self.tiles.len() - FACTORY_CAPACITY;
        self.tiles.split_off(at)
    }

    fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tiles = ALL_COLORS
            .iter()
            .flat_map(|&color| std::iter::repeat(Tile::new(color)).take(TILES_PER_COLOR))
            .collect();
        self.tiles.shuffle(rng);
    }
}

// ============================================================================
// SIMULATOR (Level 2)
// ============================================================================

/// Applies moves to a borrowed game state.
///
/// Randomness (bag shuffling at round end) comes from the injected RNG.
pub struct Simulator<'a, R: Rng + ?Sized> {
    state: &'a mut GameState,
    bag: TileBag,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Simulator<'a, R> {
    pub fn new(state: &'a mut GameState, rng: &'a mut R) -> Self {
        Self {
            state,
            bag: TileBag::new(),
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &*self.state
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.state.legal_moves()
    }

    /// Uniformly random legal move, drawn from the injected RNG
    pub fn random_move(&mut self) -> Option<Move> {
        self.state.legal_moves().choose(&mut *self.rng).copied()
    }

    /// Apply `mv` on behalf of `player`; returns whether the game has ended.
    ///
    /// All validation happens before the state is touched, so an error leaves
    /// the state exactly as it was.
    pub fn apply_move(&mut self, player: Seat, mv: Move) -> Result<bool> {
        self.check_move(player, &mv)?;

        let drafted = self.draft(mv.factory_id, mv.color);
        self.place(player, mv.pattern_line, drafted);

        self.state.current_player_index = player.opponent();

        if self.state.is_round_over() {
            self.end_round();
        }

        Ok(self.state.is_game_over())
    }

    // ========================================================================
    // Level 3: Move steps
    // ========================================================================

    fn check_move(&self, player: Seat, mv: &Move) -> Result<()> {
        let current = self.state.current_player_index;
        if player != current {
            return Err(AzulError::InvalidTurn { player, current });
        }

        let present = match mv.factory_id {
            Some(id) => self
                .state
                .factory(id)
                .ok_or(AzulError::UnknownFactory(id))?
                .count(mv.color),
            None => self.state.center.iter().filter(|t| t.color == mv.color).count(),
        };
        if present == 0 {
            return Err(AzulError::ColorNotInSource { color: mv.color });
        }

        Ok(())
    }

    /// Take every tile of `color` from the source; factory leftovers go to the center
    fn draft(&mut self, factory_id: Option<u32>, color: Color) -> Vec<Tile> {
        let state = &mut *self.state;
        match factory_id {
            Some(id) => {
                let Some(factory) = state.factories.iter_mut().find(|f| f.id == id) else {
                    return Vec::new();
                };
                let (drafted, leftover): (Vec<Tile>, Vec<Tile>) =
                    factory.tiles.drain(..).partition(|t| t.color == color);
                state.center.extend(leftover);
                drafted
            }
            None => {
                let (drafted, rest): (Vec<Tile>, Vec<Tile>) =
                    state.center.drain(..).partition(|t| t.color == color);
                state.center = rest;
                drafted
            }
        }
    }

    /// Stage on the target line if legal, otherwise everything hits the floor
    fn place(&mut self, player: Seat, target: Target, tiles: Vec<Tile>) {
        let Some(color) = tiles.first().map(|t| t.color) else {
            return;
        };
        let board = &mut self.state.player_mut(player).board;

        match target {
            Target::Line(row) if board.can_place(row, color) => board.place(row, tiles),
            _ => board.discard(tiles),
        }
    }

    fn end_round(&mut self) {
        for player in self.state.players.iter_mut() {
            player.score_round();
        }
        self.refill_factories();
        self.state.round += 1;

        tracing::trace!(
            round = self.state.round,
            scores = ?[self.state.players[0].score, self.state.players[1].score],
            "round complete"
        );
    }

    fn refill_factories(&mut self) {
        for factory in self.state.factories.iter_mut() {
            factory.tiles = self.bag.draw(&mut *self.rng);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
