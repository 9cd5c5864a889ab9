//! Engine runtime - wires one game session to its collaborators
//!
//! The core crate knows the rules; this crate supplies the serialized
//! execution context around them. A [`SessionRuntime`] owns a session and
//! a single event queue, processes gravity ticks and commands one at a
//! time, and reports resolved state to a [`SessionObserver`]. Collaborators
//! (key-event sources, external tick sources, render layers) hold a
//! [`SessionHandle`] and never touch the session directly.

pub mod config;
pub mod runtime;

pub use config::EngineConfig;
pub use runtime::{EngineEvent, SessionHandle, SessionObserver, SessionRuntime};
