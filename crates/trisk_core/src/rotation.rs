//! Pure rotation of a disk's 12-element color sequence.

use crate::geometry::PIECES_PER_DISK;

/// Returns `seq` rotated left by `step` positions with wraparound, so the
/// element originally at index `step mod 12` ends up at index 0. Negative
/// steps rotate right.
///
/// Total over any integer step; the engine itself only ever passes ±2
/// (see [`crate::geometry::TURN_STEP`]).
pub fn rotated<T: Clone>(seq: &[T; PIECES_PER_DISK], step: i32) -> [T; PIECES_PER_DISK] {
    let offset = step.rem_euclid(PIECES_PER_DISK as i32) as usize;
    std::array::from_fn(|i| seq[(i + offset) % PIECES_PER_DISK].clone())
}
