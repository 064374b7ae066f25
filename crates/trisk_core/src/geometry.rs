//! Fixed topology of the puzzle: disk identities, the piece color palette,
//! and the hand-authored overlap tables.
//!
//! Three disks sit at the vertices of an equilateral triangle; each pair
//! overlaps in a lens that shares 3 physical pieces. None of this is
//! configurable; it is the puzzle.

use eyre::{Result, bail, ensure};
use itertools::Itertools;

/// Number of disks in the puzzle.
pub const DISK_COUNT: usize = 3;
/// Number of angular slots (pieces) on each disk.
pub const PIECES_PER_DISK: usize = 12;
/// Number of slots a single turn moves: 60° out of 12 slots of 30° each.
pub const TURN_STEP: i32 = 2;

/// Fixed palette the authored disk configurations draw from.
///
/// Loaded states are not restricted to these labels; any non-empty string is
/// a valid piece color as far as the engine is concerned.
pub mod palette {
    /// Red.
    pub const RED: &str = "#f10";
    /// Blue.
    pub const BLUE: &str = "#43f";
    /// Green.
    pub const GREEN: &str = "#0f0";
    /// Purple.
    pub const PURPLE: &str = "#f3f";
    /// Yellow.
    pub const YELLOW: &str = "#ff0";
    /// Orange.
    pub const ORANGE: &str = "#e90";
    /// Sky blue.
    pub const SKY: &str = "#0ff";
}

/// Identifier for one of the three disks.
///
/// Displays as `1`/`2`/`3`, which is also the order of disks in the
/// saved-state grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
pub enum DiskId {
    /// Top disk.
    #[strum(serialize = "1")]
    One,
    /// Bottom-left disk.
    #[strum(serialize = "2")]
    Two,
    /// Bottom-right disk.
    #[strum(serialize = "3")]
    Three,
}
impl DiskId {
    /// All disks, in canonical id order.
    pub const ALL: [DiskId; DISK_COUNT] = [DiskId::One, DiskId::Two, DiskId::Three];

    /// Position of this disk in [`DiskId::ALL`] and in the saved-state grid.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Index correspondence for the 3 physical pieces shared between two disks.
///
/// Each disk indexes the shared pieces in its own local frame, so the same
/// lens is described twice: once from each side. The two descriptions must be
/// mutual inverses; see [`validate_disk_specs`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OverlapTable {
    /// Disk on the other side of the lens.
    pub other: DiskId,
    /// `(own_slot, other_slot)` pairs. The `other_slot`s within one table are
    /// distinct, so propagation writes are disjoint.
    pub pairs: [(usize, usize); 3],
}

/// Authored constants for one disk: identity, colors, and overlap tables.
#[derive(Debug, Copy, Clone)]
pub struct DiskSpec {
    /// Which disk this is.
    pub id: DiskId,
    /// Fill color for the disk face. Only frontends care about this.
    pub main_color: &'static str,
    /// Reference configuration; slot 0 is the disk's canonical top, indices
    /// increase counter-clockwise in the disk's local frame.
    pub initial_colors: [&'static str; PIECES_PER_DISK],
    /// One table per other disk.
    pub overlaps: [OverlapTable; 2],
}

/// The authored disk constants, in [`DiskId::ALL`] order.
pub const DISK_SPECS: [DiskSpec; DISK_COUNT] = {
    use palette::*;
    [
        DiskSpec {
            id: DiskId::One,
            main_color: RED,
            initial_colors: [
                RED, RED, RED, RED, PURPLE, PURPLE, YELLOW, ORANGE, ORANGE, RED, RED, RED,
            ],
            overlaps: [
                OverlapTable {
                    other: DiskId::Two,
                    pairs: [(4, 0), (5, 11), (6, 10)],
                },
                OverlapTable {
                    other: DiskId::Three,
                    pairs: [(8, 0), (7, 1), (6, 2)],
                },
            ],
        },
        DiskSpec {
            id: DiskId::Two,
            main_color: BLUE,
            initial_colors: [
                PURPLE, BLUE, BLUE, BLUE, BLUE, BLUE, BLUE, BLUE, SKY, SKY, YELLOW, PURPLE,
            ],
            overlaps: [
                OverlapTable {
                    other: DiskId::One,
                    pairs: [(0, 4), (11, 5), (10, 6)],
                },
                OverlapTable {
                    other: DiskId::Three,
                    pairs: [(10, 2), (9, 3), (8, 4)],
                },
            ],
        },
        DiskSpec {
            id: DiskId::Three,
            main_color: GREEN,
            initial_colors: [
                ORANGE, ORANGE, YELLOW, SKY, SKY, GREEN, GREEN, GREEN, GREEN, GREEN, GREEN, GREEN,
            ],
            overlaps: [
                OverlapTable {
                    other: DiskId::One,
                    pairs: [(0, 8), (1, 7), (2, 6)],
                },
                OverlapTable {
                    other: DiskId::Two,
                    pairs: [(2, 10), (3, 9), (4, 8)],
                },
            ],
        },
    ]
};

/// Checks the hand-authored tables in [`DISK_SPECS`] for internal
/// consistency.
///
/// A failure here is a defect in the constants above, not a runtime
/// condition; [`crate::Puzzle::new`] treats it as fatal.
pub fn validate_disk_specs() -> Result<()> {
    validate(&DISK_SPECS)
}

fn validate(specs: &[DiskSpec; DISK_COUNT]) -> Result<()> {
    for (i, spec) in specs.iter().enumerate() {
        ensure!(
            spec.id.index() == i,
            "disk {} is at index {i} of DISK_SPECS",
            spec.id,
        );

        let partners = spec.overlaps.map(|t| t.other);
        for other in DiskId::ALL {
            if other != spec.id {
                ensure!(
                    partners.contains(&other),
                    "disk {} has no overlap table for disk {other}",
                    spec.id,
                );
            }
        }

        for table in &spec.overlaps {
            ensure!(
                table.other != spec.id,
                "disk {} has an overlap table with itself",
                spec.id,
            );
            ensure!(
                table.pairs.iter().all(|&(own, other)| {
                    own < PIECES_PER_DISK && other < PIECES_PER_DISK
                }),
                "overlap table {}→{} has an out-of-range slot",
                spec.id,
                table.other,
            );
            ensure!(
                table.pairs.iter().map(|&(_, other)| other).all_unique(),
                "overlap table {}→{} writes the same destination slot twice",
                spec.id,
                table.other,
            );

            // Reverse-partner check: the other disk must describe the same
            // physical pieces, with own/other slots swapped.
            let Some(reverse) = specs[table.other.index()]
                .overlaps
                .iter()
                .find(|t| t.other == spec.id)
            else {
                bail!("disk {} has no reverse table for disk {}", table.other, spec.id);
            };
            for &(own, other) in &table.pairs {
                ensure!(
                    reverse.pairs.contains(&(other, own)),
                    "overlap tables {0}→{1} and {1}→{0} disagree on slot pair ({own}, {other})",
                    spec.id,
                    table.other,
                );
                // Shared pieces must start out a single color.
                ensure!(
                    spec.initial_colors[own] == specs[table.other.index()].initial_colors[other],
                    "initial colors disagree on the piece shared by \
                     disk {} slot {own} and disk {} slot {other}",
                    spec.id,
                    table.other,
                );
            }
        }
    }
    Ok(())
}
