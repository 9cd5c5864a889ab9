//! Render snapshot - the read-only view handed to drawing collaborators
//!
//! A snapshot is plain data: the committed grid as palette indices, the
//! falling piece by kind/rotation/anchor, and the session status. It always
//! reflects a fully-resolved tick or command, never an intermediate sweep.

use blockfall_types::{PieceKind, SessionState, BOARD_HEIGHT, BOARD_WIDTH};

use crate::session::ActivePiece;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Committed cells as palette indices, `cells[y][x]` with row 0 at the
    /// bottom; 0 is empty. The falling piece is not painted in.
    pub cells: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub state: SessionState,
    pub lines_cleared: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.cells = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.state = SessionState::Idle;
        self.lines_cleared = 0;
    }

    pub fn playable(&self) -> bool {
        self.state == SessionState::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cells: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            state: SessionState::Idle,
            lines_cleared: 0,
        }
    }
}
