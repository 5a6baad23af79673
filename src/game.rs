//! Game state: scoring, the tilt transformation and game-over detection

use crate::board::{Board, Tile};
use crate::notify::{ObserverId, ObserverRegistry};
use crate::side::Side;
use std::fmt;

/// Largest tile value; building it ends the game.
pub const MAX_PIECE: u32 = 2048;

/// The state of one game: a board plus score accounting.
///
/// An external controller drives the game through [`GameState::tilt`] and
/// [`GameState::add_tile`]; frontends observe it through
/// [`GameState::subscribe`] and read back with the query methods. Where
/// the next tile spawns, and with which value, is the controller's
/// business; the core only performs placement.
#[derive(Debug)]
pub struct GameState {
    board: Board,
    score: u32,
    /// High-water mark across games, folded forward when a game-over read
    /// observes a finished game.
    max_score: u32,
    game_over: bool,
    observers: ObserverRegistry,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// A new game on an empty `size`×`size` board with score 0.
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::new(size),
            score: 0,
            max_score: 0,
            game_over: false,
            observers: ObserverRegistry::new(),
        }
    }

    /// Rebuild a game from a raw value matrix plus explicit scores, for
    /// deterministic setups. The matrix is indexed `[row][col]` with row 0
    /// at the bottom and `0` marking an empty cell.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is empty or not square.
    pub fn from_values(values: &[Vec<u32>], score: u32, max_score: u32, game_over: bool) -> Self {
        Self {
            board: Board::from_values(values),
            score,
            max_score,
            game_over,
            observers: ObserverRegistry::new(),
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// The tile at `(col, row)`, or `None` for an empty cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the board.
    pub fn tile(&self, col: usize, row: usize) -> Option<Tile> {
        self.board.tile(col, row)
    }

    /// Number of cells on one side of the board.
    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// The board itself, for read-only inspection.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The maximum score reached across games, updated when a game ends.
    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    /// Whether the game is over: a tile reached [`MAX_PIECE`], or no move
    /// remains.
    ///
    /// Recomputed on every call rather than read from a cache, and a
    /// `true` result also folds the current score into the max-score
    /// high-water mark, so this read has a side effect.
    pub fn game_over(&mut self) -> bool {
        self.refresh_game_over();
        if self.game_over {
            self.max_score = self.max_score.max(self.score);
        }
        self.game_over
    }

    // ========================================================================
    // MUTATION ENTRY POINTS
    // ========================================================================

    /// Add one tile to an empty cell and notify observers.
    ///
    /// # Panics
    ///
    /// Panics if the target cell is occupied.
    pub fn add_tile(&mut self, tile: Tile) {
        self.board.add_tile(tile);
        self.refresh_game_over();
        tracing::debug!("placed {} at ({}, {})", tile.value(), tile.col(), tile.row());
        self.observers.notify_all();
    }

    /// Reset to an empty board and zero score for a new game, then notify
    /// observers. The max-score high-water mark survives resets.
    pub fn clear(&mut self) {
        self.score = 0;
        self.game_over = false;
        self.board.clear();
        tracing::debug!("board cleared");
        self.observers.notify_all();
    }

    /// Tilt the board toward `side`, sliding every tile as far as it can
    /// go and merging equal pairs that collide.
    ///
    /// Each line perpendicular to the motion is first compacted until no
    /// gap remains, then scanned once from the target edge outward for
    /// merges. A merge replaces the colliding pair with one doubled tile
    /// in the cell nearer the edge, adds the new value to the score, and
    /// closes the gap it opened before the scan continues past the merged
    /// cell. No tile ever merges twice in one tilt, and of three equal
    /// tiles in a row the two nearest the target edge merge while the
    /// third only slides.
    ///
    /// Returns `true` if any tile moved or merged; observers are notified
    /// only in that case.
    pub fn tilt(&mut self, side: Side) -> bool {
        // The sweep starts on the target edge and walks away from it.
        let walk = side.opposite();
        let mut changed = false;

        for line in 0..self.board.size() {
            let (col, row) = self.line_origin(side, line);
            while self.compact_from(col, row, walk) {
                changed = true;
            }
            changed |= self.merge_from(col, row, walk);
        }

        self.refresh_game_over();
        if changed {
            tracing::debug!("tilt {:?} -> score {}", side, self.score);
            self.observers.notify_all();
        }
        changed
    }

    /// Re-send the change notification without touching state, so a
    /// frontend attached to an already-populated board can draw it.
    pub fn announce(&mut self) {
        self.observers.notify_all();
    }

    // ========================================================================
    // OBSERVERS
    // ========================================================================

    /// Register a change observer, invoked synchronously and without
    /// payload after every call that changes the game state.
    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) -> ObserverId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Drop a previously registered observer. Returns whether the handle
    /// was still registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ========================================================================
    // TILT SWEEPS
    // ========================================================================

    /// The target-edge cell where sweep line `line` starts for a tilt
    /// toward `side`.
    fn line_origin(&self, side: Side, line: usize) -> (usize, usize) {
        let edge = self.board.size() - 1;
        match side {
            Side::North => (line, edge),
            Side::South => (line, 0),
            Side::East => (edge, line),
            Side::West => (0, line),
        }
    }

    /// One gap-closing sweep along a line: walk outward from the edge and
    /// pull a tile one step inward wherever it sits just past an empty
    /// cell. Returns whether any tile moved; callers repeat the sweep
    /// until it moves nothing.
    fn compact_from(&mut self, col: usize, row: usize, walk: Side) -> bool {
        let (dcol, drow) = walk.delta();
        let size = self.board.size() as i32;
        let mut col = col as i32;
        let mut row = row as i32;
        let mut moved = false;

        loop {
            let next_col = col + dcol;
            let next_row = row + drow;
            if !in_bounds(next_col, next_row, size) {
                return moved;
            }

            if self.board.tile(col as usize, row as usize).is_none() {
                if let Some(next_tile) = self.board.tile(next_col as usize, next_row as usize) {
                    self.board.move_tile(col as usize, row as usize, next_tile);
                    moved = true;
                }
            }

            col = next_col;
            row = next_row;
        }
    }

    /// One merge sweep along a line, from the edge outward. Equal
    /// travel-adjacent tiles merge toward the edge; the doubled value is
    /// scored and the gap re-compacted before the scan advances past the
    /// merged cell. Returns whether any merge happened.
    fn merge_from(&mut self, col: usize, row: usize, walk: Side) -> bool {
        let (dcol, drow) = walk.delta();
        let size = self.board.size() as i32;
        let mut col = col as i32;
        let mut row = row as i32;
        let mut merged = false;

        loop {
            let next_col = col + dcol;
            let next_row = row + drow;
            if !in_bounds(next_col, next_row, size) {
                return merged;
            }

            let here = self.board.tile(col as usize, row as usize);
            let next = self.board.tile(next_col as usize, next_row as usize);
            if let (Some(here_tile), Some(next_tile)) = (here, next) {
                if here_tile.value() == next_tile.value()
                    && self.board.move_tile(col as usize, row as usize, next_tile)
                {
                    // The line past the merge was already gapless, so one
                    // sweep closes the hole the merge opened.
                    self.compact_from(next_col as usize, next_row as usize, walk);
                    let result = self
                        .board
                        .tile(col as usize, row as usize)
                        .expect("merged cell cannot be empty");
                    self.score += result.value();
                    tracing::trace!("merged to {} at ({}, {})", result.value(), col, row);
                    merged = true;
                }
            }

            col = next_col;
            row = next_row;
        }
    }

    fn refresh_game_over(&mut self) {
        let over = max_tile_exists(&self.board) || !at_least_one_move_exists(&self.board);
        if over && !self.game_over {
            tracing::debug!("game over at score {}", self.score);
        }
        self.game_over = over;
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.score == other.score
            && self.max_score == other.max_score
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        write!(f, "{}", self.board)?;
        let over = if max_tile_exists(&self.board) || !at_least_one_move_exists(&self.board) {
            "over"
        } else {
            "not over"
        };
        write!(f, "] {} (max: {}) (game is {})", self.score, self.max_score, over)
    }
}

const fn in_bounds(col: i32, row: i32, size: i32) -> bool {
    0 <= col && col < size && 0 <= row && row < size
}

// ============================================================================
// TERMINAL-STATE PREDICATES
// ============================================================================

/// True if any tile has reached [`MAX_PIECE`].
pub fn max_tile_exists(board: &Board) -> bool {
    for col in 0..board.size() {
        for row in 0..board.size() {
            if let Some(tile) = board.tile(col, row) {
                if tile.value() == MAX_PIECE {
                    return true;
                }
            }
        }
    }
    false
}

/// True if at least one cell on the board is empty.
pub fn empty_space_exists(board: &Board) -> bool {
    for col in 0..board.size() {
        for row in 0..board.size() {
            if board.tile(col, row).is_none() {
                return true;
            }
        }
    }
    false
}

/// True if the player can still change the board: an empty cell exists, or
/// two edge-adjacent cells hold equal values.
///
/// The adjacency sweep compares each cell with both indices >= 1 against
/// its col-1 and row-1 neighbors only; equal pairs lying entirely on the
/// col-0 or row-0 edges are settled by the empty-cell shortcut alone.
pub fn at_least_one_move_exists(board: &Board) -> bool {
    if empty_space_exists(board) {
        return true;
    }
    // Only reached on a full board, so every cell read yields a value.
    let value = |col: usize, row: usize| board.tile(col, row).map_or(0, |tile| tile.value());
    for col in 1..board.size() {
        for row in 1..board.size() {
            if value(col, row) == value(col - 1, row) || value(col, row) == value(col, row - 1) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_values(game: &GameState, row: usize) -> Vec<u32> {
        (0..game.size())
            .map(|col| game.tile(col, row).map_or(0, |tile| tile.value()))
            .collect()
    }

    #[test]
    fn test_new_game_is_empty_with_zero_score() {
        let mut game = GameState::new(4);
        assert_eq!(game.size(), 4);
        assert_eq!(game.score(), 0);
        assert_eq!(game.max_score(), 0);
        assert!(!game.game_over());
        assert_eq!(game.tile(0, 0), None);
    }

    #[test]
    fn test_tilt_west_compacts_and_merges() {
        let mut game = GameState::from_values(
            &[
                vec![2, 0, 2, 4],
                vec![0; 4],
                vec![0; 4],
                vec![0; 4],
            ],
            0,
            0,
            false,
        );
        let changed = game.tilt(Side::West);
        assert!(changed);
        assert_eq!(row_values(&game, 0), vec![4, 4, 0, 0]);
        assert_eq!(game.score(), 4);
    }

    #[test]
    fn test_tilt_north_moves_along_columns() {
        let mut game = GameState::from_values(
            &[
                vec![2, 0, 0, 0],
                vec![2, 0, 0, 0],
                vec![0; 4],
                vec![0, 0, 0, 8],
            ],
            0,
            0,
            false,
        );
        assert!(game.tilt(Side::North));
        assert_eq!(game.tile(0, 3).unwrap().value(), 4);
        assert_eq!(game.tile(3, 3).unwrap().value(), 8);
        assert_eq!(game.tile(0, 0), None);
        assert_eq!(game.score(), 4);
    }

    #[test]
    fn test_clear_keeps_max_score() {
        let mut game = GameState::from_values(&[vec![2, 4], vec![8, 16]], 30, 10, false);
        assert!(game.game_over());
        assert_eq!(game.max_score(), 30);

        game.clear();
        assert_eq!(game.score(), 0);
        assert_eq!(game.max_score(), 30);
        assert_eq!(game.tile(0, 0), None);
    }

    #[test]
    fn test_display_shows_grid_and_score() {
        let game = GameState::from_values(&[vec![2, 0], vec![0, 4]], 12, 20, false);
        let rendered = game.to_string();
        assert!(rendered.contains("|   2"));
        assert!(rendered.contains("|   4"));
        assert!(rendered.contains("12 (max: 20)"));
        assert!(rendered.contains("game is not over"));
    }
}
