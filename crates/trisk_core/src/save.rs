//! Saved-state codec: the full puzzle state as a 3×12 grid of color labels,
//! persisted as JSON.
//!
//! The persisted contract is an array of 3 arrays of 12 non-empty strings,
//! in disk-id order `1`, `2`, `3`. Anything else is rejected with a
//! [`SavedStateError`]; malformed input is never coerced.

use serde::{Deserialize, Serialize};

use crate::geometry::{DISK_COUNT, DiskId, PIECES_PER_DISK};
use crate::puzzle::Puzzle;

/// Validated snapshot of the full puzzle state: one row of 12 color labels
/// per disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
pub struct SavedState([[String; PIECES_PER_DISK]; DISK_COUNT]);

impl SavedState {
    /// Wraps an already well-shaped grid.
    pub fn new(grid: [[String; PIECES_PER_DISK]; DISK_COUNT]) -> Self {
        Self(grid)
    }

    /// Serializes to the persisted JSON form.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serializing a color grid cannot fail")
    }

    /// Parses and validates the persisted JSON form.
    pub fn from_json(s: &str) -> Result<Self, SavedStateError> {
        let rows: Vec<Vec<String>> = serde_json::from_str(s)?;
        Self::try_from(rows)
    }

    /// Rows of the grid, one per disk in id order.
    pub fn rows(&self) -> &[[String; PIECES_PER_DISK]; DISK_COUNT] {
        &self.0
    }
}

impl TryFrom<Vec<Vec<String>>> for SavedState {
    type Error = SavedStateError;

    fn try_from(rows: Vec<Vec<String>>) -> Result<Self, SavedStateError> {
        let [row1, row2, row3] = <[Vec<String>; DISK_COUNT]>::try_from(rows)
            .map_err(|rows| SavedStateError::DiskCount(rows.len()))?;
        Ok(Self([
            check_row(DiskId::One, row1)?,
            check_row(DiskId::Two, row2)?,
            check_row(DiskId::Three, row3)?,
        ]))
    }
}

fn check_row(disk: DiskId, row: Vec<String>) -> Result<[String; PIECES_PER_DISK], SavedStateError> {
    let len = row.len();
    let row: [String; PIECES_PER_DISK] = row
        .try_into()
        .map_err(|_| SavedStateError::PieceCount { disk, len })?;
    if let Some(slot) = row.iter().position(String::is_empty) {
        return Err(SavedStateError::EmptyColor { disk, slot });
    }
    Ok(row)
}

impl From<SavedState> for Vec<Vec<String>> {
    fn from(state: SavedState) -> Self {
        state.0.into_iter().map(Vec::from).collect()
    }
}

/// Why a persisted state failed validation.
#[derive(thiserror::Error, Debug)]
pub enum SavedStateError {
    /// Wrong number of disks in the outer array.
    #[error("expected 3 disks, got {0}")]
    DiskCount(usize),
    /// Wrong number of pieces in a disk's row.
    #[error("expected 12 pieces on disk {disk}, got {len}")]
    PieceCount {
        /// Disk whose row is malformed.
        disk: DiskId,
        /// Actual row length.
        len: usize,
    },
    /// A piece color was the empty string.
    #[error("empty color label at disk {disk}, slot {slot}")]
    EmptyColor {
        /// Disk whose row is malformed.
        disk: DiskId,
        /// Slot holding the empty label.
        slot: usize,
    },
    /// Not valid JSON, or leaves of the wrong type.
    #[error("malformed saved state: {0}")]
    Json(#[from] serde_json::Error),
}

impl Puzzle {
    /// Snapshot of the current colors as a [`SavedState`].
    pub fn saved_state(&self) -> SavedState {
        SavedState(self.disks().each_ref().map(|disk| disk.colors().clone()))
    }

    /// Assigns `state`'s rows to the three disks, positionally.
    pub fn restore(&mut self, state: &SavedState) {
        for (id, row) in DiskId::ALL.into_iter().zip(state.rows()) {
            self.disk_mut(id).set_colors(row.clone());
        }
    }
}
