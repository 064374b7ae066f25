//! The puzzle aggregate: three disks and the rotate-and-propagate step that
//! keeps their shared pieces mutually consistent.

use eyre::Result;

use crate::disk::Disk;
use crate::geometry::{self, DISK_COUNT, DISK_SPECS, DiskId};
use crate::turn::Turn;

/// The full puzzle.
///
/// Owns the three [`Disk`]s for the lifetime of the program; they are only
/// ever mutated in place, never replaced.
#[derive(Debug, Clone)]
pub struct Puzzle {
    disks: [Disk; DISK_COUNT],
}
impl Puzzle {
    /// Constructs a solved puzzle.
    ///
    /// Validates the static overlap tables first; an error here means the
    /// geometry constants themselves are broken and is fatal.
    pub fn new() -> Result<Self> {
        geometry::validate_disk_specs()?;
        Ok(Self {
            disks: DISK_SPECS.each_ref().map(Disk::new),
        })
    }

    /// The disk with the given id.
    pub fn disk(&self, id: DiskId) -> &Disk {
        &self.disks[id.index()]
    }
    /// All three disks, in id order.
    pub fn disks(&self) -> &[Disk; DISK_COUNT] {
        &self.disks
    }

    /// Applies `turn`: rotates the disk by 2 slots, then pushes its
    /// post-rotation colors into the shared slots of both neighbors.
    ///
    /// This is the atomic domain update; it completes synchronously.
    pub fn twist(&mut self, turn: Turn) {
        self.disks[turn.disk.index()].rotate(turn.direction);
        self.propagate_from(turn.disk);
    }

    /// Overlap propagation. Reads the already-rotated colors of `id` and
    /// writes into every disk it overlaps; never mutates `id` itself. Write
    /// order is irrelevant: destination slots are disjoint.
    fn propagate_from(&mut self, id: DiskId) {
        let source = self.disks[id.index()].colors().clone();
        for table in &DISK_SPECS[id.index()].overlaps {
            let other = &mut self.disks[table.other.index()];
            for &(own_slot, other_slot) in &table.pairs {
                other.set_color(other_slot, source[own_slot].clone());
            }
        }
    }

    /// Whether every disk matches its reference configuration.
    pub fn is_solved(&self) -> bool {
        self.disks.iter().all(Disk::is_solved)
    }

    /// Restores every disk to its reference configuration.
    pub fn reset(&mut self) {
        for disk in &mut self.disks {
            disk.reset();
        }
    }

    pub(crate) fn disk_mut(&mut self, id: DiskId) -> &mut Disk {
        &mut self.disks[id.index()]
    }
}
