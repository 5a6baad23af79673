//! 2048 Core - rules engine for the sliding-tile merging puzzle
//!
//! This crate provides the core game logic for 2048:
//! - Board grid with identity-tracked tile placement
//! - The tilt transformation (sliding plus single-generation merges)
//! - Score and max-score accounting
//! - Game-over detection
//! - Change notification for frontends
//!
//! Rendering, input handling, tile-spawn policy and persistence belong to
//! the embedding application: it drives the game through
//! [`GameState::tilt`] and [`GameState::add_tile`] and observes changes
//! via [`GameState::subscribe`].

pub mod board;
pub mod side;
pub mod game;
pub mod notify;

// Re-exports for convenient access
pub use board::{Board, Tile};
pub use side::{Side, ALL_SIDES};
pub use game::{
    at_least_one_move_exists, empty_space_exists, max_tile_exists, GameState, MAX_PIECE,
};
pub use notify::ObserverId;
