//! Core game logic - pure, deterministic, and testable
//!
//! All the rules and state management live here, with **zero dependencies**
//! on rendering, audio, input capture, or I/O:
//!
//! - **Deterministic**: same seed produces the same piece sequence
//! - **Synchronous**: every mutation happens inside a command handler or a
//!   single [`GameState::advance`] call; nothing blocks or suspends
//! - **Portable**: runs in any host (terminal, GUI, headless simulation)
//! - **Fast**: zero-allocation hot paths for the per-frame tick
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 playfield with collision detection and line clearing
//! - [`game_state`]: session state machine, commands, timers, events
//! - [`pieces`]: tetromino shapes and SRS rotation with wall kicks
//! - [`rng`]: seeded 7-bag piece generation
//! - [`scoring`]: score/lines/level tracking and gravity intervals
//! - [`snapshot`]: flat value views for renderers and persistence
//!
//! # Game Rules
//!
//! - **7-bag randomizer**: each shuffled group of 7 contains every kind once
//! - **SRS rotation**: wall kicks for all pieces; O rotation is a no-op
//! - **Lock delay**: 500ms once grounded, reset by any successful move
//! - **Hold**: bank the active piece, once per spawn
//! - **Gravity**: interval shrinks with level, floored at 30ms
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::GameCommand;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply(GameCommand::MoveRight);
//! game.apply(GameCommand::RotateCw);
//! game.apply(GameCommand::HardDrop);
//!
//! // Hard drop awards 2 points per cell traveled.
//! assert!(game.score() > 0);
//! ```
//!
//! Call [`GameState::advance`] once per frame with the elapsed milliseconds;
//! everything else is driven by discrete commands.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use game_state::{GameEvent, GameState, Tetromino};
pub use pieces::{get_shape, try_rotate, PieceShape};
pub use rng::{SevenBag, SimpleRng};
pub use scoring::{drop_interval_ms, LineClearOutcome, ScoreBoard};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
