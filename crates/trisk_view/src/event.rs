//! Events the coordinator emits for its rendering/input collaborators.

use trisk_core::Turn;

/// Something the frontend may want to react to.
///
/// Queued by [`crate::PuzzleSimulation`] and drained by the frontend; this
/// replaces per-disk mutable callback fields with an explicit channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PuzzleEvent {
    /// A turn is about to start; the frontend should begin its animation and
    /// report back via
    /// [`crate::PuzzleSimulation::turn_animation_finished`].
    TurnStarted(Turn),
    /// The turn's domain update (rotation + propagation) has been applied;
    /// colors read from the puzzle now reflect it.
    TurnApplied(Turn),
    /// The puzzle was reset to its initial configuration.
    Reset,
    /// A paced scramble started.
    ScrambleStarted,
    /// The paced scramble finished or was cancelled.
    ScrambleFinished,
    /// A completed turn left the puzzle solved. Not emitted for states
    /// passed through mid-scramble.
    Solved,
}
