//! Session runtime - the serialized execution context
//!
//! Gravity ticks and player commands are posted to one queue and processed
//! strictly one at a time, so a command can never interleave with a tick's
//! lock/sweep/spawn sequence. While the session is Running and a built-in
//! interval is configured, the queue wait doubles as the gravity timer;
//! in every other state the runtime blocks, which is what stops the tick
//! schedule during Pause and after GameOver.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use blockfall_core::{GameSession, GameSnapshot, SessionEvent};
use blockfall_types::{Command, SessionState};

use crate::config::EngineConfig;

/// Everything the runtime processes, strictly in posting order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// One gravity step (posted by the built-in schedule or an external
    /// tick source)
    Tick,
    Command(Command),
    /// Begin a fresh game (also the way out of GameOver)
    Start,
    Shutdown,
}

/// Cloneable posting side of the runtime queue, handed to the input and
/// tick collaborators
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<EngineEvent>,
}

impl SessionHandle {
    /// Post a player command. Returns false once the runtime is gone.
    pub fn command(&self, command: Command) -> bool {
        self.tx.send(EngineEvent::Command(command)).is_ok()
    }

    /// Post one gravity tick (for external tick sources)
    pub fn tick(&self) -> bool {
        self.tx.send(EngineEvent::Tick).is_ok()
    }

    /// Post a game (re)start
    pub fn start(&self) -> bool {
        self.tx.send(EngineEvent::Start).is_ok()
    }

    /// Ask the runtime to return
    pub fn shutdown(&self) -> bool {
        self.tx.send(EngineEvent::Shutdown).is_ok()
    }
}

/// Callbacks for the status and drawing collaborators
///
/// All methods default to no-ops so observers implement only what they
/// display.
pub trait SessionObserver {
    /// The line counter changed; carries the new total
    fn score_changed(&mut self, _lines_cleared: u32) {}
    fn pause_changed(&mut self, _paused: bool) {}
    fn game_over(&mut self) {}
    /// Called after every fully-resolved tick or command
    fn frame(&mut self, _snapshot: &GameSnapshot) {}
}

/// An observer that displays nothing
impl SessionObserver for () {}

/// Owns one session and its event queue
pub struct SessionRuntime {
    session: GameSession,
    rx: mpsc::Receiver<EngineEvent>,
    tick_interval: Option<Duration>,
}

impl SessionRuntime {
    /// Create a runtime with a fresh session drawn from the config seed
    pub fn new(config: &EngineConfig) -> (Self, SessionHandle) {
        Self::with_session(GameSession::new(config.seed), config)
    }

    /// Create a runtime around an existing session (e.g. one with an
    /// injected piece source)
    pub fn with_session(session: GameSession, config: &EngineConfig) -> (Self, SessionHandle) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                session,
                rx,
                tick_interval: config.tick_interval,
            },
            SessionHandle { tx },
        )
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Start the session and process queue events until shutdown (or
    /// until every handle is dropped). Returns the final session for
    /// inspection.
    pub fn run(mut self, observer: &mut dyn SessionObserver) -> GameSession {
        let mut snapshot = GameSnapshot::default();

        self.session.start();
        self.flush(observer, &mut snapshot);

        let mut next_tick = self.arm_schedule();

        loop {
            let event = match next_tick {
                Some(deadline) if self.session.state() == SessionState::Running => {
                    let now = Instant::now();
                    if now >= deadline {
                        EngineEvent::Tick
                    } else {
                        match self.rx.recv_timeout(deadline - now) {
                            Ok(event) => event,
                            Err(mpsc::RecvTimeoutError::Timeout) => EngineEvent::Tick,
                            Err(mpsc::RecvTimeoutError::Disconnected) => break,
                        }
                    }
                }
                _ => match self.rx.recv() {
                    Ok(event) => event,
                    Err(mpsc::RecvError) => break,
                },
            };

            match event {
                EngineEvent::Tick => {
                    self.session.gravity_tick();
                    next_tick = self.arm_schedule();
                }
                EngineEvent::Command(command) => {
                    let was_running = self.session.state() == SessionState::Running;
                    self.session.command(command);
                    next_tick = self.rearm_after(was_running, next_tick);
                }
                EngineEvent::Start => {
                    let was_running = self.session.state() == SessionState::Running;
                    self.session.start();
                    next_tick = self.rearm_after(was_running, next_tick);
                }
                EngineEvent::Shutdown => break,
            }

            self.flush(observer, &mut snapshot);
        }

        self.session
    }

    /// Fresh deadline one interval from now
    fn arm_schedule(&self) -> Option<Instant> {
        self.tick_interval.map(|interval| Instant::now() + interval)
    }

    /// Keep the running schedule across commands; restart it when the
    /// session just (re)entered Running, drop it when it left
    fn rearm_after(&self, was_running: bool, current: Option<Instant>) -> Option<Instant> {
        let running = self.session.state() == SessionState::Running;
        match (was_running, running) {
            (true, true) => current,
            (false, true) => self.arm_schedule(),
            (_, false) => None,
        }
    }

    /// Dispatch recorded events, then hand the observer a snapshot of the
    /// resolved state
    fn flush(&mut self, observer: &mut dyn SessionObserver, snapshot: &mut GameSnapshot) {
        for event in self.session.take_events() {
            match event {
                SessionEvent::ScoreChanged(lines_cleared) => observer.score_changed(lines_cleared),
                SessionEvent::PauseChanged(paused) => observer.pause_changed(paused),
                SessionEvent::GameOver => observer.game_over(),
            }
        }
        self.session.snapshot_into(snapshot);
        observer.frame(snapshot);
    }
}
