//! Random scramble generation: turn drawing with the anti-undo rule, bulk
//! application, and cooperative cancellation.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

use crate::geometry::{DISK_COUNT, DiskId};
use crate::puzzle::Puzzle;
use crate::turn::{Turn, TurnDirection};

/// Soft cap on the number of turns in a caller-paced scramble.
///
/// A safety bound, not a target; a human (or a cancel request) is expected to
/// stop the scramble long before this.
pub const FULL_SCRAMBLE_LENGTH: u32 = 10_000;

/// Draws uniformly random turns, redrawing any draw that would exactly undo
/// the previous one.
///
/// The random source is injected so tests and replays can use a seeded
/// generator; see [`TurnPicker::seeded`].
#[derive(Debug)]
pub struct TurnPicker<R> {
    rng: R,
    last: Option<Turn>,
}
impl TurnPicker<ChaCha12Rng> {
    /// Constructs a deterministic picker. Same seed, same turn sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha12Rng::seed_from_u64(seed))
    }
}
impl<R: Rng> TurnPicker<R> {
    /// Constructs a picker drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng, last: None }
    }

    /// Draws the next turn: disk and direction each uniform and independent.
    ///
    /// A draw that reverses the previously returned turn (same disk,
    /// opposite direction) is discarded and redrawn, so a scramble never
    /// contains a visible no-op.
    pub fn next_turn(&mut self) -> Turn {
        loop {
            let disk = DiskId::ALL[self.rng.random_range(0..DISK_COUNT)];
            let direction = if self.rng.random() {
                TurnDirection::Clockwise
            } else {
                TurnDirection::Anticlockwise
            };
            let turn = Turn { disk, direction };
            if self.last.is_some_and(|last| turn == last.rev()) {
                continue;
            }
            self.last = Some(turn);
            return turn;
        }
    }
}

/// Progress of a bulk scramble, shareable with an observing thread.
#[derive(Debug)]
pub struct ScrambleProgress {
    done: AtomicU32,
    total: AtomicU32,
    cancel_requested: AtomicBool,
}
impl Default for ScrambleProgress {
    fn default() -> Self {
        Self {
            done: AtomicU32::new(0),
            total: AtomicU32::new(1),
            cancel_requested: AtomicBool::new(false),
        }
    }
}
impl ScrambleProgress {
    /// Constructs a new `ScrambleProgress`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the progress as a fraction: turns applied / total turns.
    pub fn fraction(&self) -> (u32, u32) {
        (
            self.done.load(Ordering::Relaxed),
            self.total.load(Ordering::Relaxed),
        )
    }
    fn set_total(&self, total: u32) {
        self.total.store(total, Ordering::Relaxed);
    }
    fn set_progress(&self, turns_done: u32) {
        self.done.store(turns_done, Ordering::Relaxed);
    }

    /// Requests to cancel the scramble. Takes effect at the next iteration
    /// boundary; a turn already applied is never rolled back.
    pub fn request_cancel(&self) {
        self.cancel_requested.store(true, Ordering::Relaxed);
    }
    /// Whether a cancel has been requested.
    pub fn is_cancel_requested(&self) -> bool {
        self.cancel_requested.load(Ordering::Relaxed)
    }
}

impl Puzzle {
    /// Applies up to `length` random turns drawn from `picker`.
    ///
    /// Checks `progress` for cancellation before each iteration; cancellation
    /// is terminal, not an error, and turns already applied stay applied.
    /// Returns the turns that were applied, in order.
    pub fn scramble_with_progress<R: Rng>(
        &mut self,
        picker: &mut TurnPicker<R>,
        length: u32,
        progress: Option<&ScrambleProgress>,
    ) -> Vec<Turn> {
        if let Some(progress) = progress {
            progress.set_total(length);
        }
        let mut applied = Vec::with_capacity(length as usize);
        for i in 0..length {
            if progress.is_some_and(ScrambleProgress::is_cancel_requested) {
                log::debug!("scramble canceled after {i} turns");
                break;
            }
            let turn = picker.next_turn();
            self.twist(turn);
            applied.push(turn);
            if let Some(progress) = progress {
                progress.set_progress(i + 1);
            }
        }
        applied
    }

    /// Applies `length` random turns from a thread-local RNG.
    pub fn scramble(&mut self, length: u32) -> Vec<Turn> {
        self.scramble_with_progress(&mut TurnPicker::new(rand::rng()), length, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_turn_undoes_its_predecessor() {
        let mut picker = TurnPicker::seeded(0xf10);
        let mut last: Option<Turn> = None;
        for _ in 0..1000 {
            let turn = picker.next_turn();
            if let Some(last) = last {
                assert_ne!(turn, last.rev(), "scramble produced a visible no-op");
            }
            last = Some(turn);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let turns = |seed| -> Vec<Turn> {
            let mut picker = TurnPicker::seeded(seed);
            (0..50).map(|_| picker.next_turn()).collect()
        };
        assert_eq!(turns(42), turns(42));
        assert_ne!(turns(42), turns(43));
    }

    #[test]
    fn scramble_then_reset() {
        let mut puzzle = Puzzle::new().unwrap();
        let turns = puzzle.scramble_with_progress(&mut TurnPicker::seeded(7), 100, None);
        assert_eq!(turns.len(), 100);
        puzzle.reset();
        for disk in puzzle.disks() {
            assert_eq!(disk.colors(), disk.initial_colors());
        }
        assert!(puzzle.is_solved());
    }

    #[test]
    fn cancel_stops_before_the_next_turn() {
        let mut puzzle = Puzzle::new().unwrap();
        let progress = ScrambleProgress::new();
        progress.request_cancel();
        let turns =
            puzzle.scramble_with_progress(&mut TurnPicker::seeded(7), 100, Some(&progress));
        assert!(turns.is_empty());
        assert!(puzzle.is_solved());
    }

    #[test]
    fn progress_counts_applied_turns() {
        let mut puzzle = Puzzle::new().unwrap();
        let progress = ScrambleProgress::new();
        puzzle.scramble_with_progress(&mut TurnPicker::seeded(9), 25, Some(&progress));
        assert_eq!(progress.fraction(), (25, 25));
    }
}
