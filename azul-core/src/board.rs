//! Player board: wall mosaic, pattern lines and floor line

use crate::model::{Color, Tile, ALL_COLORS, COLOR_COUNT};
use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Wall is WALL_SIZE x WALL_SIZE; there are WALL_SIZE pattern lines
pub const WALL_SIZE: usize = 5;

/// Penalty per floor tile, in order; tiles past the end cost nothing
pub const FLOOR_PENALTIES: [i32; 7] = [-1, -1, -2, -2, -2, -3, -3];

/// Column holding `color` in wall row `row`
pub fn wall_column(row: usize, color: Color) -> usize {
    (color.index() + row) % COLOR_COUNT
}

/// Color permitted in wall cell (row, col)
pub fn wall_color(row: usize, col: usize) -> Color {
    ALL_COLORS[(col + COLOR_COUNT - row % COLOR_COUNT) % COLOR_COUNT]
}

// ============================================================================
// PATTERN LINE
// ============================================================================

/// Staging row of fixed capacity, filled left-to-right with one color
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternLine(Vec<Option<Tile>>);

impl PatternLine {
    pub fn empty(capacity: usize) -> Self {
        Self(vec![None; capacity])
    }

    pub fn capacity(&self) -> usize {
        self.0.len()
    }

    pub fn filled(&self) -> usize {
        self.0.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// Color of the staged tiles, if any
    pub fn color(&self) -> Option<Color> {
        self.0.iter().flatten().map(|t| t.color).next()
    }

    pub fn cells(&self) -> &[Option<Tile>] {
        &self.0
    }

    /// Not full and holding nothing but `color`
    pub fn accepts(&self, color: Color) -> bool {
        !self.is_full() && self.color().map_or(true, |c| c == color)
    }

    /// Fill empty cells left-to-right; returns the tiles that did not fit
    pub fn fill(&mut self, tiles: Vec<Tile>) -> Vec<Tile> {
        let mut tiles = tiles.into_iter();
        for cell in self.0.iter_mut().filter(|cell| cell.is_none()) {
            match tiles.next() {
                Some(tile) => *cell = Some(tile),
                None => break,
            }
        }
        tiles.collect()
    }

    /// Empty every cell, keeping the capacity
    pub fn reset(&mut self) {
        self.0.iter_mut().for_each(|cell| *cell = None);
    }

    fn validate(&self, row: usize) -> Result<(), String> {
        if self.capacity() != row + 1 {
            return Err(format!(
                "pattern line {row} must have {} cells, got {}",
                row + 1,
                self.capacity()
            ));
        }
        if self.0.iter().skip_while(|c| c.is_some()).any(Option::is_some) {
            return Err(format!("pattern line {row} is not filled left-to-right"));
        }
        if let Some(color) = self.color() {
            if self.0.iter().flatten().any(|t| t.color != color) {
                return Err(format!("pattern line {row} mixes colors"));
            }
        }
        Ok(())
    }
}

// ============================================================================
// WALL
// ============================================================================

/// 5x5 mosaic; cell (row, col) may only ever hold `wall_color(row, col)`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wall([[Option<Tile>; WALL_SIZE]; WALL_SIZE]);

impl Wall {
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.0[row][col]
    }

    pub fn has_color(&self, row: usize, color: Color) -> bool {
        self.0[row][wall_column(row, color)].is_some()
    }

    pub fn is_row_complete(&self, row: usize) -> bool {
        self.0[row].iter().all(Option::is_some)
    }

    pub fn has_complete_row(&self) -> bool {
        (0..WALL_SIZE).any(|row| self.is_row_complete(row))
    }

    pub fn tile_count(&self) -> usize {
        self.0.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Tile `tile` into its mosaic column of `row`.
    ///
    /// Returns the points earned, or None if the cell was already taken.
    pub fn place(&mut self, row: usize, tile: Tile) -> Option<i32> {
        let col = wall_column(row, tile.color);
        if self.0[row][col].is_some() {
            return None;
        }
        self.0[row][col] = Some(tile);
        Some(1 + self.adjacent_count(row, col) as i32)
    }

    /// Contiguous occupied cells left, right, above and below (row, col)
    pub fn adjacent_count(&self, row: usize, col: usize) -> usize {
        let occupied = |r: usize, c: usize| self.0[r][c].is_some();

        let left = (0..col).rev().take_while(|&c| occupied(row, c)).count();
        let right = (col + 1..WALL_SIZE).take_while(|&c| occupied(row, c)).count();
        let up = (0..row).rev().take_while(|&r| occupied(r, col)).count();
        let down = (row + 1..WALL_SIZE).take_while(|&r| occupied(r, col)).count();

        left + right + up + down
    }

    fn validate(&self) -> Result<(), String> {
        for (row, cells) in self.0.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if let Some(tile) = cell {
                    let expected = wall_color(row, col);
                    if tile.color != expected {
                        return Err(format!(
                            "wall cell ({row}, {col}) holds {} but only {expected} belongs there",
                            tile.color
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// FLOOR LINE
// ============================================================================

/// Overflow tiles, penalised and cleared at round end
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorLine(Vec<Tile>);

impl FloorLine {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.0
    }

    pub fn extend(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.0.extend(tiles);
    }

    /// Sum of the penalty table over the tiles present (non-positive)
    pub fn penalty(&self) -> i32 {
        FLOOR_PENALTIES.iter().take(self.0.len()).sum()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

// ============================================================================
// PLAYER BOARD
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBoard {
    pub wall: Wall,
    pub pattern_lines: [PatternLine; WALL_SIZE],
    #[serde(default)]
    pub floor_line: FloorLine,
}

impl Default for PlayerBoard {
    fn default() -> Self {
        Self {
            wall: Wall::default(),
            pattern_lines: std::array::from_fn(|row| PatternLine::empty(row + 1)),
            floor_line: FloorLine::default(),
        }
    }
}

impl PlayerBoard {
    /// Whether `color` may be staged on pattern line `row`
    pub fn can_place(&self, row: usize, color: Color) -> bool {
        row < WALL_SIZE && self.pattern_lines[row].accepts(color) && !self.wall.has_color(row, color)
    }

    /// Stage drafted tiles on `row`, spilling surplus to the floor
    pub fn place(&mut self, row: usize, tiles: Vec<Tile>) {
        let overflow = self.pattern_lines[row].fill(tiles);
        self.floor_line.extend(overflow);
    }

    pub fn discard(&mut self, tiles: Vec<Tile>) {
        self.floor_line.extend(tiles);
    }

    /// Move every full pattern line's tile to the wall and reset the line.
    ///
    /// Returns the points earned. Lines that are not full are untouched, so a
    /// second call in the same round scores nothing.
    pub fn tile_full_lines(&mut self) -> i32 {
        let mut points = 0;
        for row in 0..WALL_SIZE {
            let line = &mut self.pattern_lines[row];
            if !line.is_full() {
                continue;
            }
            if let Some(tile) = line.cells()[0] {
                points += self.wall.place(row, tile).unwrap_or(0);
            }
            line.reset();
        }
        points
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        self.wall.validate()?;
        for (row, line) in self.pattern_lines.iter().enumerate() {
            line.validate(row)?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(color: Color, n: usize) -> Vec<Tile> {
        vec![Tile::new(color); n]
    }

    #[test]
    fn test_mosaic_is_latin_square() {
        for row in 0..WALL_SIZE {
            for color in ALL_COLORS {
                assert_eq!(wall_color(row, wall_column(row, color)), color);
            }
        }
        for col in 0..WALL_SIZE {
            let mut seen: Vec<Color> = (0..WALL_SIZE).map(|row| wall_color(row, col)).collect();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), WALL_SIZE);
        }
        assert_eq!(wall_color(1, 0), Color::White);
        assert_eq!(wall_column(0, Color::White), 4);
    }

    #[test]
    fn test_pattern_line_fill_spills_surplus() {
        let mut line = PatternLine::empty(3);
        let overflow = line.fill(tiles(Color::Red, 2));
        assert!(overflow.is_empty());
        assert_eq!(line.filled(), 2);

        let overflow = line.fill(tiles(Color::Red, 3));
        assert_eq!(overflow.len(), 2);
        assert!(line.is_full());
        assert_eq!(line.color(), Some(Color::Red));
    }

    #[test]
    fn test_pattern_line_accepts() {
        let mut line = PatternLine::empty(2);
        assert!(line.accepts(Color::Blue));
        line.fill(tiles(Color::Blue, 1));
        assert!(line.accepts(Color::Blue));
        assert!(!line.accepts(Color::Red));
        line.fill(tiles(Color::Blue, 1));
        assert!(!line.accepts(Color::Blue));
    }

    #[test]
    fn test_adjacent_count_stops_at_gaps() {
        let mut wall = Wall::default();
        // Row 2: cols 0,1 then gap at 3, then 4
        wall.place(2, Tile::new(wall_color(2, 0)));
        wall.place(2, Tile::new(wall_color(2, 1)));
        wall.place(2, Tile::new(wall_color(2, 4)));
        // Column 2: rows 0,1 above
        wall.place(0, Tile::new(wall_color(0, 2)));
        wall.place(1, Tile::new(wall_color(1, 2)));

        assert_eq!(wall.adjacent_count(2, 2), 4);
        assert_eq!(wall.place(2, Tile::new(wall_color(2, 2))), Some(5));
    }

    #[test]
    fn test_wall_place_rejects_occupied_cell() {
        let mut wall = Wall::default();
        assert_eq!(wall.place(0, Tile::new(Color::Blue)), Some(1));
        assert_eq!(wall.place(0, Tile::new(Color::Blue)), None);
        assert!(wall.has_color(0, Color::Blue));
        assert_eq!(wall.tile_count(), 1);
    }

    #[test]
    fn test_floor_penalty_table() {
        let mut floor = FloorLine::default();
        assert_eq!(floor.penalty(), 0);
        floor.extend(tiles(Color::Red, 3));
        assert_eq!(floor.penalty(), -4);
        floor.extend(tiles(Color::Red, 6));
        assert_eq!(floor.penalty(), -14);
    }

    #[test]
    fn test_tile_full_lines_is_idempotent() {
        let mut board = PlayerBoard::default();
        board.place(0, tiles(Color::White, 1));
        board.place(2, tiles(Color::Red, 2));

        assert_eq!(board.tile_full_lines(), 1);
        assert!(board.wall.has_color(0, Color::White));
        assert!(board.pattern_lines[0].is_empty());
        assert_eq!(board.pattern_lines[0].capacity(), 1);
        // Partial line untouched
        assert_eq!(board.pattern_lines[2].filled(), 2);

        assert_eq!(board.tile_full_lines(), 0);
    }

    #[test]
    fn test_can_place_respects_wall() {
        let mut board = PlayerBoard::default();
        board.wall.place(3, Tile::new(Color::Yellow));
        assert!(!board.can_place(3, Color::Yellow));
        assert!(board.can_place(3, Color::Red));
        assert!(!board.can_place(WALL_SIZE, Color::Red));
    }

    #[test]
    fn test_validate_rejects_bad_shapes() {
        let mut board = PlayerBoard::default();
        board.pattern_lines[1] = PatternLine::empty(3);
        assert!(board.validate().is_err());

        let mut board = PlayerBoard::default();
        board.pattern_lines[2] = PatternLine(vec![None, Some(Tile::new(Color::Red)), None]);
        assert!(board.validate().is_err());

        let mut board = PlayerBoard::default();
        board.wall.0[0][0] = Some(Tile::new(Color::Red));
        assert!(board.validate().is_err());
    }
}
