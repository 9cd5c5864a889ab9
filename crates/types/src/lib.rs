//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making
//! them usable in any context (core rules, runtime, external collaborators).
//!
//! # Board dimensions
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the bottom)
//!
//! The grid's y axis points up: gravity moves a piece from high y toward
//! row 0, and line compaction shifts higher rows down.
//!
//! # Timing
//!
//! Gravity runs on a fixed schedule of [`GRAVITY_TICK_MS`] milliseconds.
//! The interval does not change with the number of lines cleared.

/// Board dimensions
pub const BOARD_WIDTH: u8 = 12;
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity timer interval in milliseconds (fixed, not adaptive)
pub const GRAVITY_TICK_MS: u64 = 400;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Render palette index for this kind (1-7; 0 is reserved for empty cells)
    pub fn color_index(&self) -> u8 {
        match self {
            PieceKind::Z => 1,
            PieceKind::S => 2,
            PieceKind::I => 3,
            PieceKind::T => 4,
            PieceKind::O => 5,
            PieceKind::L => 6,
            PieceKind::J => 7,
        }
    }
}

/// Cell on the board (None = empty, Some = filled with piece kind)
pub type Cell = Option<PieceKind>;

/// Commands delivered by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    TogglePause,
}

impl Command {
    /// Parse command from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "togglepause" => Some(Command::TogglePause),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::TogglePause => "togglePause",
        }
    }
}

/// Lifecycle states of one game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    GameOver,
}

impl SessionState {
    /// Convert to string (for status-label collaborators)
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Running => "running",
            SessionState::Paused => "paused",
            SessionState::GameOver => "gameOver",
        }
    }
}
