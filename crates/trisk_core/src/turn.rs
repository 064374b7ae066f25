//! A single 60° turn of one disk.

use std::fmt;

use crate::geometry::{DiskId, TURN_STEP};

/// Direction of a turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TurnDirection {
    /// +2 slots.
    Clockwise,
    /// −2 slots.
    Anticlockwise,
}
impl TurnDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub fn rev(self) -> Self {
        match self {
            TurnDirection::Clockwise => TurnDirection::Anticlockwise,
            TurnDirection::Anticlockwise => TurnDirection::Clockwise,
        }
    }

    /// Signed slot step this direction applies to a disk's color sequence.
    pub fn step(self) -> i32 {
        match self {
            TurnDirection::Clockwise => TURN_STEP,
            TurnDirection::Anticlockwise => -TURN_STEP,
        }
    }
}

/// One 60° turn: which disk, which way.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Turn {
    /// Disk to rotate.
    pub disk: DiskId,
    /// Which way to rotate it.
    pub direction: TurnDirection,
}
impl Turn {
    /// Returns the turn that exactly undoes this one.
    #[must_use]
    pub fn rev(self) -> Self {
        Self {
            disk: self.disk,
            direction: self.direction.rev(),
        }
    }
}
impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.direction {
            TurnDirection::Clockwise => '+',
            TurnDirection::Anticlockwise => '-',
        };
        write!(f, "{}{sign}", self.disk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rev_is_an_involution() {
        let turn = Turn {
            disk: DiskId::Two,
            direction: TurnDirection::Clockwise,
        };
        assert_eq!(turn.rev().rev(), turn);
        assert_ne!(turn.rev(), turn);
        assert_eq!(turn.rev().disk, turn.disk);
    }

    #[test]
    fn display_notation() {
        let turn = Turn {
            disk: DiskId::Three,
            direction: TurnDirection::Anticlockwise,
        };
        assert_eq!(turn.to_string(), "3-");
        assert_eq!(turn.rev().to_string(), "3+");
    }
}
