//! Game state, moves and legal-move generation

use crate::board::{PlayerBoard, WALL_SIZE};
use crate::error::{AzulError, Result};
use crate::model::{distinct_colors, Color, Factory, Seat, Tile};
use crate::simulator::TileBag;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Factories on the table in a two-player game
pub const TWO_PLAYER_FACTORIES: u32 = 5;

// ============================================================================
// MOVES
// ============================================================================

/// Where drafted tiles go: a pattern line (0..=4) or the floor line (-1 on the wire)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Target {
    Line(usize),
    Floor,
}

impl TryFrom<i8> for Target {
    type Error = String;

    fn try_from(value: i8) -> std::result::Result<Self, Self::Error> {
        match value {
            -1 => Ok(Target::Floor),
            row if (0..WALL_SIZE as i8).contains(&row) => Ok(Target::Line(row as usize)),
            other => Err(format!("pattern line must be -1..=4, got {other}")),
        }
    }
}

impl From<Target> for i8 {
    fn from(target: Target) -> i8 {
        match target {
            Target::Line(row) => row as i8,
            Target::Floor => -1,
        }
    }
}

/// A draft: every tile of `color` from a factory (or the center when
/// `factory_id` is None), sent to `pattern_line`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub factory_id: Option<u32>,
    pub color: Color,
    pub pattern_line: Target,
}

impl Move {
    pub fn new(factory_id: Option<u32>, color: Color, pattern_line: Target) -> Self {
        Self {
            factory_id,
            color,
            pattern_line,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.factory_id {
            Some(id) => write!(f, "{} from factory {id}", self.color)?,
            None => write!(f, "{} from center", self.color)?,
        }
        match self.pattern_line {
            Target::Line(row) => write!(f, " to line {row}"),
            Target::Floor => write!(f, " to floor"),
        }
    }
}

// ============================================================================
// PLAYER
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub board: PlayerBoard,
    #[serde(default)]
    pub score: i32,
}

impl Player {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            board: PlayerBoard::default(),
            score: 0,
        }
    }

    /// Round-end scoring: tile full lines, then apply the floor penalty.
    ///
    /// Score is clamped at zero. Running it twice in one round changes nothing.
    pub fn score_round(&mut self) {
        self.score += self.board.tile_full_lines();
        self.score = (self.score + self.board.floor_line.penalty()).max(0);
        self.board.floor_line.clear();
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Full snapshot of a two-player game (clone to branch)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub players: [Player; 2],
    pub factories: Vec<Factory>,
    #[serde(default)]
    pub center: Vec<Tile>,
    pub current_player_index: Seat,
    #[serde(default)]
    pub round: u32,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Fresh game: empty boards, factories dealt from a new bag, first seat to move
    pub fn new_game<R: Rng + ?Sized>(names: [&str; 2], rng: &mut R) -> Self {
        let mut bag = TileBag::new();
        let factories = (0..TWO_PLAYER_FACTORIES)
            .map(|id| Factory {
                id,
                tiles: bag.draw(rng),
            })
            .collect();

        Self {
            players: [Player::new(0, names[0]), Player::new(1, names[1])],
            factories,
            center: Vec::new(),
            current_player_index: Seat::First,
            round: 1,
        }
    }

    /// Parse and validate a serialized state
    pub fn from_json(input: &str) -> Result<Self> {
        let state: GameState = serde_json::from_str(input)?;
        state.validate()?;
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Structural checks serde alone cannot express
    pub fn validate(&self) -> Result<()> {
        for (i, player) in self.players.iter().enumerate() {
            player
                .board
                .validate()
                .map_err(|msg| AzulError::InvalidInput(format!("player {i}: {msg}")))?;
            if player.score < 0 {
                return Err(AzulError::InvalidInput(format!(
                    "player {i} has negative score {}",
                    player.score
                )));
            }
        }

        let mut ids: Vec<u32> = self.factories.iter().map(|f| f.id).collect();
        ids.sort_unstable();
        if ids.windows(2).any(|w| w[0] == w[1]) {
            return Err(AzulError::InvalidInput("duplicate factory id".to_string()));
        }

        Ok(())
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn current_seat(&self) -> Seat {
        self.current_player_index
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn player_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat.index()]
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.current_player_index)
    }

    pub fn score(&self, seat: Seat) -> i32 {
        self.player(seat).score
    }

    pub fn factory(&self, id: u32) -> Option<&Factory> {
        self.factories.iter().find(|f| f.id == id)
    }

    pub fn all_factories_empty(&self) -> bool {
        self.factories.iter().all(Factory::is_empty)
    }

    /// No tiles left to draft anywhere
    pub fn is_round_over(&self) -> bool {
        self.all_factories_empty() && self.center.is_empty()
    }

    /// Some player has completed a wall row
    pub fn is_game_over(&self) -> bool {
        self.players.iter().any(|p| p.board.wall.has_complete_row())
    }

    /// Tiles on the table (factories plus center)
    pub fn tiles_in_play(&self) -> usize {
        self.center.len() + self.factories.iter().map(|f| f.tiles.len()).sum::<usize>()
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Legal moves for the player on turn.
    ///
    /// One candidate per (source, color, row) where the row can take the
    /// color, plus a floor candidate for every (source, color).
    pub fn legal_moves(&self) -> Vec<Move> {
        let board = &self.current_player().board;
        let mut moves = Vec::new();

        for factory in self.factories.iter().filter(|f| !f.is_empty()) {
            push_source_moves(&mut moves, board, Some(factory.id), &factory.tiles);
        }
        push_source_moves(&mut moves, board, None, &self.center);

        moves
    }
}

fn push_source_moves(
    moves: &mut Vec<Move>,
    board: &PlayerBoard,
    factory_id: Option<u32>,
    tiles: &[Tile],
) {
    for color in distinct_colors(tiles) {
        for row in 0..WALL_SIZE {
            if board.can_place(row, color) {
                moves.push(Move::new(factory_id, color, Target::Line(row)));
            }
        }
        moves.push(Move::new(factory_id, color, Target::Floor));
    }
}

// ============================================================================
// TESTS
// ============================================================================
