//! Game session - the state machine tying everything together
//!
//! Owns the grid, the active piece and the line counter, and drives both
//! gravity ticks and player commands through the collision engine. Every
//! operation is synchronous and resolves completely before it returns;
//! callers see either the state before an operation or the state after it,
//! never a half-applied lock or sweep.

use arrayvec::ArrayVec;

use blockfall_types::{Command, PieceKind, SessionState};

use crate::clear;
use crate::collide;
use crate::grid::Grid;
use crate::pieces;
use crate::rng::{PieceSource, UniformSource};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};

/// The falling piece. Transient; converted into grid cells on lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece at its spawn anchor in the initial rotation
    pub fn spawn(kind: PieceKind) -> Self {
        let (x, y) = pieces::spawn_anchor(kind);
        Self {
            kind,
            rotation: 0,
            x,
            y,
        }
    }

    /// Get the cell offsets for the current rotation
    pub fn shape(&self) -> pieces::PieceShape {
        pieces::offsets(self.kind, self.rotation)
    }
}

/// Observation recorded by session operations, drained by the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The line counter changed; carries the new total
    ScoreChanged(u32),
    PauseChanged(bool),
    GameOver,
}

/// Upper bound on events a single operation can record
pub const EVENT_BUFFER: usize = 4;

/// Complete state of one game
///
/// The grid and active piece are private to the session; all mutation goes
/// through [`start`](GameSession::start),
/// [`gravity_tick`](GameSession::gravity_tick) and
/// [`command`](GameSession::command).
pub struct GameSession {
    grid: Grid,
    active: Option<ActivePiece>,
    state: SessionState,
    lines_cleared: u32,
    source: Box<dyn PieceSource + Send>,
    events: ArrayVec<SessionEvent, EVENT_BUFFER>,
}

impl GameSession {
    /// Create a session drawing pieces uniformly with the given seed
    pub fn new(seed: u32) -> Self {
        Self::with_source(Box::new(UniformSource::new(seed)))
    }

    /// Create a session with an injected piece source
    pub fn with_source(source: Box<dyn PieceSource + Send>) -> Self {
        Self {
            grid: Grid::new(),
            active: None,
            state: SessionState::Idle,
            lines_cleared: 0,
            source,
            events: ArrayVec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Begin a fresh game: reset the line counter, clear the grid and
    /// spawn the first piece. Works from Idle, GameOver or Running;
    /// ignored while Paused.
    pub fn start(&mut self) {
        if self.state == SessionState::Paused {
            return;
        }
        self.lines_cleared = 0;
        self.grid.clear();
        self.active = None;
        self.state = SessionState::Running;
        self.spawn_next();
    }

    /// Flip between Running and Paused; ignored in Idle and GameOver.
    /// Pausing suspends only the tick schedule - the grid and active
    /// piece are untouched.
    pub fn toggle_pause(&mut self) {
        match self.state {
            SessionState::Running => {
                self.state = SessionState::Paused;
                self.push_event(SessionEvent::PauseChanged(true));
            }
            SessionState::Paused => {
                self.state = SessionState::Running;
                self.push_event(SessionEvent::PauseChanged(false));
            }
            SessionState::Idle | SessionState::GameOver => {}
        }
    }

    /// One gravity step: move the active piece down one row, or lock it
    /// when the move is blocked
    pub fn gravity_tick(&mut self) {
        if self.state != SessionState::Running {
            return;
        }
        if !self.try_shift(0, -1) {
            self.lock_and_advance();
        }
    }

    /// Apply a player command. Illegal moves and rotations are silently
    /// rejected; commands other than TogglePause are ignored unless the
    /// session is Running.
    pub fn command(&mut self, command: Command) {
        if command == Command::TogglePause {
            self.toggle_pause();
            return;
        }
        if self.state != SessionState::Running {
            return;
        }
        match command {
            Command::MoveLeft => {
                self.try_shift(-1, 0);
            }
            Command::MoveRight => {
                self.try_shift(1, 0);
            }
            Command::SoftDrop => {
                // Same contract as one gravity tick
                if !self.try_shift(0, -1) {
                    self.lock_and_advance();
                }
            }
            Command::HardDrop => {
                self.hard_drop();
            }
            Command::RotateCw => {
                self.try_rotate(true);
            }
            Command::RotateCcw => {
                self.try_rotate(false);
            }
            Command::TogglePause => {}
        }
    }

    /// Drain the events recorded since the last call. Call after every
    /// tick/command; the buffer holds at most one operation's worth.
    pub fn take_events(&mut self) -> ArrayVec<SessionEvent, EVENT_BUFFER> {
        std::mem::take(&mut self.events)
    }

    /// Fill a reusable snapshot buffer (no allocation)
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_color_grid(&mut out.cells);
        out.active = self.active.map(ActiveSnapshot::from);
        out.state = self.state;
        out.lines_cleared = self.lines_cleared;
    }

    /// Take a fresh snapshot of the current state
    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }

    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let x = active.x + dx;
        let y = active.y + dy;
        if collide::can_place(&self.grid, active.kind, active.rotation, x, y) {
            self.active = Some(ActivePiece { x, y, ..active });
            true
        } else {
            false
        }
    }

    /// Rotation keeps the anchor fixed; there are no wall kicks
    fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let rotation = if clockwise {
            pieces::rotate_cw_index(active.kind, active.rotation)
        } else {
            pieces::rotate_ccw_index(active.kind, active.rotation)
        };
        if rotation == active.rotation {
            // Single-state kinds (O) have nothing to rotate
            return false;
        }
        if collide::can_place(&self.grid, active.kind, rotation, active.x, active.y) {
            self.active = Some(ActivePiece { rotation, ..active });
            true
        } else {
            false
        }
    }

    fn hard_drop(&mut self) {
        if self.active.is_none() {
            return;
        }
        while self.try_shift(0, -1) {}
        self.lock_and_advance();
    }

    /// Commit the active piece into the grid, sweep full rows, then spawn
    /// the next piece. The whole sequence resolves before returning.
    fn lock_and_advance(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        // The piece only ever sits at positions the collision engine
        // accepted, so these writes are in bounds.
        for (dx, dy) in active.shape() {
            let _ = self.grid.set(active.x + dx, active.y + dy, Some(active.kind));
        }

        let removed = clear::sweep_full_rows(&mut self.grid);
        if removed > 0 {
            self.lines_cleared += removed;
            self.push_event(SessionEvent::ScoreChanged(self.lines_cleared));
        }

        self.spawn_next();
    }

    /// Draw the next piece; a blocked spawn position ends the game
    fn spawn_next(&mut self) {
        let kind = self.source.next_kind();
        let piece = ActivePiece::spawn(kind);
        if collide::can_place(&self.grid, piece.kind, piece.rotation, piece.x, piece.y) {
            self.active = Some(piece);
        } else {
            self.active = None;
            self.state = SessionState::GameOver;
            self.push_event(SessionEvent::GameOver);
        }
    }

    fn push_event(&mut self, event: SessionEvent) {
        let _ = self.events.try_push(event);
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("lines_cleared", &self.lines_cleared)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
