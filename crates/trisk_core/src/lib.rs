//! State-transition engine for the Trisk puzzle: three interlocking
//! 12-piece disks arranged at the vertices of an equilateral triangle, each
//! pair sharing 3 physical pieces along a lens-shaped overlap.
//!
//! This crate is the part of the system with real invariants: the fixed
//! combinatorial model, the rotate-and-propagate step, scrambling with the
//! anti-undo rule, solved-state detection, and the saved-state codec.
//! Rendering, input, and storage live with the frontends; see `trisk_view`
//! for the coordinator they attach to.

mod disk;
pub mod geometry;
mod puzzle;
mod rotation;
mod save;
mod scramble;
mod turn;

pub use crate::disk::Disk;
pub use crate::geometry::{DISK_COUNT, DiskId, PIECES_PER_DISK, TURN_STEP};
pub use crate::puzzle::Puzzle;
pub use crate::rotation::rotated;
pub use crate::save::{SavedState, SavedStateError};
pub use crate::scramble::{FULL_SCRAMBLE_LENGTH, ScrambleProgress, TurnPicker};
pub use crate::turn::{Turn, TurnDirection};
