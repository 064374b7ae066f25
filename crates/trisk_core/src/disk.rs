//! State of a single disk.

use crate::geometry::{DiskId, DiskSpec, PIECES_PER_DISK};
use crate::rotation::rotated;
use crate::turn::TurnDirection;

/// One wheel of the puzzle: the current piece colors plus the immutable
/// reference configuration it was constructed with.
///
/// The 12-slot length invariant is structural; both sequences are fixed-size
/// arrays. Disks are only ever constructed by [`crate::Puzzle`], which is
/// their sole mutator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disk {
    id: DiskId,
    colors: [String; PIECES_PER_DISK],
    initial_colors: [String; PIECES_PER_DISK],
}
impl Disk {
    pub(crate) fn new(spec: &DiskSpec) -> Self {
        let initial_colors = spec.initial_colors.map(str::to_owned);
        Self {
            id: spec.id,
            colors: initial_colors.clone(),
            initial_colors,
        }
    }

    /// Which disk this is.
    pub fn id(&self) -> DiskId {
        self.id
    }
    /// Current color at each slot, slot 0 first.
    pub fn colors(&self) -> &[String; PIECES_PER_DISK] {
        &self.colors
    }
    /// Reference configuration captured at construction.
    pub fn initial_colors(&self) -> &[String; PIECES_PER_DISK] {
        &self.initial_colors
    }

    /// Whether every slot matches the reference configuration.
    pub fn is_solved(&self) -> bool {
        self.colors == self.initial_colors
    }

    /// Rotates the color sequence by one turn in `direction`. Does not touch
    /// neighboring disks; that is [`crate::Puzzle::twist`]'s job.
    pub(crate) fn rotate(&mut self, direction: TurnDirection) {
        self.colors = rotated(&self.colors, direction.step());
    }

    /// Restores the reference configuration.
    pub(crate) fn reset(&mut self) {
        self.colors = self.initial_colors.clone();
    }

    pub(crate) fn set_color(&mut self, slot: usize, color: String) {
        self.colors[slot] = color;
    }

    pub(crate) fn set_colors(&mut self, colors: [String; PIECES_PER_DISK]) {
        self.colors = colors;
    }
}
