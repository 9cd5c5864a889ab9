//! Core game rules - pure, deterministic, and testable
//!
//! This crate contains the whole rule set of the falling-block engine and
//! nothing else. It has **zero dependencies** on timers, I/O or rendering,
//! making it:
//!
//! - **Deterministic**: the piece source is injected and seeded, so the
//!   same inputs replay the same game
//! - **Synchronous**: every operation resolves completely before it
//!   returns, bounded by O(width x height)
//! - **Portable**: usable from any driver (terminal, GUI, headless tests)
//!
//! # Module structure
//!
//! - [`grid`]: the 12x20 occupancy table (no piece knowledge)
//! - [`pieces`]: static tetromino geometry, integer-indexed rotations
//! - [`collide`]: the one placement-legality check
//! - [`clear`]: full-row sweep and compaction after a lock
//! - [`session`]: the state machine driving ticks and commands
//! - [`rng`]: seeded uniform piece draws behind an injectable trait
//! - [`snapshot`]: the read-only view for rendering collaborators
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_core::types::Command;
//!
//! let mut session = GameSession::new(12345);
//! session.start();
//!
//! session.command(Command::MoveLeft);
//! session.command(Command::HardDrop);
//!
//! // The dropped piece is now committed to the grid
//! assert!(session.grid().cells().iter().any(|cell| cell.is_some()));
//! ```

pub mod clear;
pub mod collide;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used items for convenience
pub use clear::sweep_full_rows;
pub use collide::can_place;
pub use grid::{Grid, OutOfRange};
pub use rng::{PieceSource, ScriptedSource, SimpleRng, UniformSource};
pub use session::{ActivePiece, GameSession, SessionEvent};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
