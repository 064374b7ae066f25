//! The puzzle coordinator: owns the engine state and drives the two-phase
//! turn protocol on behalf of the rendering/input collaborators.

use std::fmt;

use eyre::Result;
use rand::rngs::ThreadRng;
use trisk_core::{
    DiskId, FULL_SCRAMBLE_LENGTH, Puzzle, SavedState, Turn, TurnDirection, TurnPicker,
};

use crate::event::PuzzleEvent;
use crate::persist::{KvStore, SAVED_STATE_KEY};

/// A paced scramble in progress.
struct ActiveScramble {
    picker: TurnPicker<ThreadRng>,
    remaining: u32,
    cancel_requested: bool,
}
impl ActiveScramble {
    fn new() -> Self {
        Self {
            picker: TurnPicker::new(rand::rng()),
            remaining: FULL_SCRAMBLE_LENGTH,
            cancel_requested: false,
        }
    }
}

/// Puzzle coordinator, which manages the puzzle state, the in-flight turn,
/// scrambling, focus, and persistence.
///
/// # Turn protocol
///
/// A turn has two phases. [`begin_turn`](Self::begin_turn) applies the
/// domain update synchronously and records the turn as in flight; the
/// frontend then animates it and calls
/// [`turn_animation_finished`](Self::turn_animation_finished), at which
/// point the turn settles: state is saved, solved-ness re-evaluated, and
/// (while scrambling) the next random turn begins. At most one turn is ever
/// in flight; requests while busy are no-ops, not errors.
pub struct PuzzleSimulation {
    puzzle: Puzzle,
    /// Turn whose animation the frontend still owes us a completion for.
    pending_turn: Option<Turn>,
    scramble: Option<ActiveScramble>,
    /// Disk that keyboard-style turn requests are routed to.
    focused_disk: Option<DiskId>,
    /// Solved-ness as of the last settled turn, for edge-triggering
    /// [`PuzzleEvent::Solved`].
    was_solved: bool,
    events: Vec<PuzzleEvent>,
    store: Option<Box<dyn KvStore>>,
}

impl fmt::Debug for PuzzleSimulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PuzzleSimulation")
            .field("pending_turn", &self.pending_turn)
            .field("focused_disk", &self.focused_disk)
            .finish_non_exhaustive()
    }
}

impl PuzzleSimulation {
    /// Constructs a coordinator with a fresh solved puzzle and no
    /// persistence.
    pub fn new() -> Result<Self> {
        Ok(Self {
            puzzle: Puzzle::new()?,
            pending_turn: None,
            scramble: None,
            focused_disk: None,
            was_solved: true,
            events: vec![],
            store: None,
        })
    }

    /// Constructs a coordinator backed by `store`, restoring the state
    /// saved under [`SAVED_STATE_KEY`] if there is a trustworthy one.
    ///
    /// Malformed saved state is a warning, never an error: the puzzle keeps
    /// its initial configuration and overwrites the bad value on the next
    /// save.
    pub fn with_store(store: Box<dyn KvStore>) -> Result<Self> {
        let mut ret = Self::new()?;
        match store.get(SAVED_STATE_KEY).as_deref().map(SavedState::from_json) {
            Some(Ok(state)) => ret.puzzle.restore(&state),
            Some(Err(e)) => log::warn!("ignoring saved puzzle state: {e}"),
            None => (),
        }
        ret.was_solved = ret.puzzle.is_solved();
        ret.store = Some(store);
        Ok(ret)
    }

    /// The puzzle itself (read-only; the coordinator is its sole mutator).
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }
    /// Whether every disk matches its initial configuration.
    pub fn is_solved(&self) -> bool {
        self.puzzle.is_solved()
    }
    /// Read-only snapshot of the current 3×12 color grid.
    pub fn saved_state(&self) -> SavedState {
        self.puzzle.saved_state()
    }
    /// Whether a turn or a scramble is in flight. While this is true, new
    /// turn, reset, and scramble requests are ignored.
    pub fn is_turning(&self) -> bool {
        self.pending_turn.is_some() || self.scramble.is_some()
    }
    /// The injected store, if any.
    pub fn store(&self) -> Option<&dyn KvStore> {
        self.store.as_deref()
    }

    /// Takes all events queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<PuzzleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Requests a turn. Returns `false` (and does nothing) while another
    /// turn or a scramble is in flight.
    ///
    /// On success the domain update is already applied when this returns;
    /// the frontend animates the turn and then calls
    /// [`turn_animation_finished`](Self::turn_animation_finished).
    pub fn begin_turn(&mut self, turn: Turn) -> bool {
        if self.is_turning() {
            return false;
        }
        self.start_turn(turn);
        true
    }

    /// Requests a turn of the focused disk. No focus, no turn.
    pub fn turn_focused(&mut self, direction: TurnDirection) -> bool {
        match self.focused_disk {
            Some(disk) => self.begin_turn(Turn { disk, direction }),
            None => false,
        }
    }

    /// Routes future keyboard-style turn requests to `disk`.
    pub fn set_focus(&mut self, disk: Option<DiskId>) {
        self.focused_disk = disk;
    }
    /// Disk currently holding input focus.
    pub fn focused_disk(&self) -> Option<DiskId> {
        self.focused_disk
    }

    /// Completion signal from the rendering collaborator: the visual
    /// animation for the in-flight turn has finished.
    ///
    /// Settles the turn. Outside a scramble this saves state and
    /// re-evaluates solved-ness; during one it draws and begins the next
    /// scramble turn (or finishes the scramble if it was cancelled or hit
    /// the cap). Ignored if no turn is in flight.
    pub fn turn_animation_finished(&mut self) {
        if self.pending_turn.take().is_none() {
            return;
        }
        if self.scramble.is_some() {
            self.advance_scramble();
        } else {
            self.save();
            self.check_solved();
        }
    }

    /// Starts a paced scramble, or requests cancellation of the active one.
    ///
    /// Cancellation is cooperative: it takes effect when the in-flight
    /// turn's animation finishes, never mid-turn. Ignored while a manual
    /// turn is in flight.
    pub fn toggle_scramble(&mut self) {
        match &mut self.scramble {
            Some(scramble) => scramble.cancel_requested = true,
            None => {
                if self.pending_turn.is_some() {
                    return;
                }
                self.events.push(PuzzleEvent::ScrambleStarted);
                self.scramble = Some(ActiveScramble::new());
                self.advance_scramble();
            }
        }
    }

    /// Resets every disk to its initial configuration. Ignored while
    /// turning, like any other request.
    pub fn reset(&mut self) {
        if self.is_turning() {
            return;
        }
        self.puzzle.reset();
        self.was_solved = true;
        self.events.push(PuzzleEvent::Reset);
        self.save();
    }

    fn start_turn(&mut self, turn: Turn) {
        self.events.push(PuzzleEvent::TurnStarted(turn));
        self.puzzle.twist(turn);
        self.events.push(PuzzleEvent::TurnApplied(turn));
        self.pending_turn = Some(turn);
    }

    /// Draws and begins the next scramble turn, or finishes the scramble.
    /// Called with no turn in flight.
    fn advance_scramble(&mut self) {
        let Some(scramble) = &mut self.scramble else {
            return;
        };
        if scramble.cancel_requested || scramble.remaining == 0 {
            self.scramble = None;
            self.was_solved = self.puzzle.is_solved();
            self.events.push(PuzzleEvent::ScrambleFinished);
            self.save();
            return;
        }
        scramble.remaining -= 1;
        let turn = scramble.picker.next_turn();
        self.start_turn(turn);
    }

    fn check_solved(&mut self) {
        let solved = self.puzzle.is_solved();
        if solved && !self.was_solved {
            self.events.push(PuzzleEvent::Solved);
        }
        self.was_solved = solved;
    }

    fn save(&mut self) {
        if let Some(store) = &mut self.store {
            store.set(SAVED_STATE_KEY, self.puzzle.saved_state().to_json());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryStore;

    fn turn(disk: DiskId, direction: TurnDirection) -> Turn {
        Turn { disk, direction }
    }

    fn cw(disk: DiskId) -> Turn {
        turn(disk, TurnDirection::Clockwise)
    }

    #[test]
    fn one_turn_in_flight_at_a_time() {
        let mut sim = PuzzleSimulation::new().unwrap();
        assert!(sim.begin_turn(cw(DiskId::One)));
        assert!(sim.is_turning());
        assert!(!sim.begin_turn(cw(DiskId::Two)));

        sim.turn_animation_finished();
        assert!(!sim.is_turning());
        assert!(sim.begin_turn(cw(DiskId::Two)));
    }

    #[test]
    fn begin_turn_applies_the_domain_update_synchronously() {
        let mut sim = PuzzleSimulation::new().unwrap();
        sim.begin_turn(cw(DiskId::One));
        assert!(!sim.is_solved());
        let events = sim.drain_events();
        assert_eq!(events[0], PuzzleEvent::TurnStarted(cw(DiskId::One)));
        assert_eq!(events[1], PuzzleEvent::TurnApplied(cw(DiskId::One)));
    }

    #[test]
    fn spurious_completion_is_ignored() {
        let mut sim = PuzzleSimulation::new().unwrap();
        sim.turn_animation_finished();
        assert!(!sim.is_turning());
        assert!(sim.drain_events().is_empty());
    }

    #[test]
    fn solved_event_fires_when_a_turn_settles_solved() {
        let mut sim = PuzzleSimulation::new().unwrap();
        let t = cw(DiskId::Three);

        sim.begin_turn(t);
        sim.turn_animation_finished();
        assert!(!sim.drain_events().contains(&PuzzleEvent::Solved));

        sim.begin_turn(t.rev());
        sim.turn_animation_finished();
        assert!(sim.is_solved());
        assert!(sim.drain_events().contains(&PuzzleEvent::Solved));
    }

    #[test]
    fn reset_is_ignored_while_turning() {
        let mut sim = PuzzleSimulation::new().unwrap();
        sim.begin_turn(cw(DiskId::One));
        sim.reset();
        assert!(!sim.is_solved());

        sim.turn_animation_finished();
        sim.reset();
        assert!(sim.is_solved());
    }

    #[test]
    fn scramble_paces_one_turn_per_completion() {
        let mut sim = PuzzleSimulation::new().unwrap();
        sim.toggle_scramble();
        assert!(sim.is_turning());
        assert!(sim.drain_events().contains(&PuzzleEvent::ScrambleStarted));

        for _ in 0..5 {
            assert!(sim.pending_turn.is_some());
            sim.turn_animation_finished();
        }
        assert!(sim.is_turning());
        assert!(!sim.begin_turn(cw(DiskId::One)));

        // Cancellation takes effect at the next iteration boundary: the
        // in-flight turn still runs to completion.
        sim.toggle_scramble();
        assert!(sim.pending_turn.is_some());
        sim.turn_animation_finished();
        assert!(!sim.is_turning());
        assert!(sim.drain_events().contains(&PuzzleEvent::ScrambleFinished));
    }

    #[test]
    fn scramble_turns_never_undo_each_other() {
        let mut sim = PuzzleSimulation::new().unwrap();
        sim.toggle_scramble();
        let mut last: Option<Turn> = None;
        for _ in 0..100 {
            let applied = sim.pending_turn.unwrap();
            if let Some(last) = last {
                assert_ne!(applied, last.rev());
            }
            last = Some(applied);
            sim.turn_animation_finished();
        }
    }

    #[test]
    fn focus_routes_keyboard_turns() {
        let mut sim = PuzzleSimulation::new().unwrap();
        assert!(!sim.turn_focused(TurnDirection::Clockwise));

        sim.set_focus(Some(DiskId::Two));
        assert!(sim.turn_focused(TurnDirection::Clockwise));
        assert_eq!(sim.pending_turn, Some(cw(DiskId::Two)));

        sim.turn_animation_finished();
        sim.set_focus(None);
        assert!(!sim.turn_focused(TurnDirection::Anticlockwise));
    }

    #[test]
    fn state_survives_a_save_load_cycle() {
        let mut sim = PuzzleSimulation::with_store(Box::new(MemoryStore::new())).unwrap();
        sim.begin_turn(cw(DiskId::One));
        sim.turn_animation_finished();
        let expected = sim.saved_state();

        let json = sim.store().unwrap().get(SAVED_STATE_KEY).unwrap();
        assert_eq!(SavedState::from_json(&json).unwrap(), expected);

        let mut store = MemoryStore::new();
        store.set(SAVED_STATE_KEY, json);
        let restored = PuzzleSimulation::with_store(Box::new(store)).unwrap();
        assert_eq!(restored.saved_state(), expected);
        assert!(!restored.is_solved());
    }

    #[test]
    fn malformed_saved_state_falls_back_to_defaults() {
        for bad in [r##"[["#f10"]]"##, "[[1,2],[],[]]", "definitely not json"] {
            let mut store = MemoryStore::new();
            store.set(SAVED_STATE_KEY, bad.to_owned());
            let sim = PuzzleSimulation::with_store(Box::new(store)).unwrap();
            assert!(sim.is_solved(), "bad state {bad:?} should be ignored");
        }
    }

    #[test]
    fn absent_saved_state_is_not_an_error() {
        let sim = PuzzleSimulation::with_store(Box::new(MemoryStore::new())).unwrap();
        assert!(sim.is_solved());
    }
}
