//! Azul Core - Game model and rules engine
//!
//! This crate provides the two-player tile-drafting game:
//! - Tiles, factories and player seats
//! - Player boards (wall mosaic, pattern lines, floor line)
//! - Game state, moves and legal-move generation
//! - Simulator applying moves, round-end scoring and factory refills

pub mod board;
pub mod error;
pub mod game;
pub mod model;
pub mod simulator;

// Re-exports for convenient access
pub use board::{wall_color, wall_column, FloorLine, PatternLine, PlayerBoard, Wall, FLOOR_PENALTIES, WALL_SIZE};
pub use error::{AzulError, Result};
pub use game::{GameState, Move, Player, Target, TWO_PLAYER_FACTORIES};
pub use model::{Color, Factory, Seat, Tile, ALL_COLORS, FACTORY_CAPACITY};
pub use simulator::{Simulator, TileBag, TILES_PER_COLOR};
