//! Puzzle interaction-state manager for Trisk, to ensure consistent feel
//! across frontends.
//!
//! [`PuzzleSimulation`] is the integration point the rendering, input, and
//! persistence collaborators attach to: it owns the engine state, enforces
//! one-turn-in-flight, paces scrambles against the frontend's animation, and
//! talks to storage only through the [`KvStore`] port.

mod event;
mod persist;
mod simulation;

pub use crate::event::PuzzleEvent;
pub use crate::persist::{KvStore, MemoryStore, SAVED_STATE_KEY};
pub use crate::simulation::PuzzleSimulation;
