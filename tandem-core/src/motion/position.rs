//! Logical axis identifiers
//!
//! The kinematics work in a 4-slot coordinate space `[x, y, z, e]` shared
//! with the toolhead. Only the first three slots are kinematic axes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of kinematic axes (X, Y, Z)
pub const NUM_AXES: usize = 3;

/// Index of the extruder slot in a toolhead position
pub const EXTRUDER_INDEX: usize = 3;

/// Logical kinematic axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// X axis (carriage travel, shared by both dual carriages)
    X,
    /// Y axis (gantry travel)
    Y,
    /// Z axis (bed or gantry lift)
    Z,
}

impl Axis {
    /// All axes in slot order
    pub const ALL: [Axis; NUM_AXES] = [Axis::X, Axis::Y, Axis::Z];

    /// Slot index in a position array
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Upper-case axis letter, as used in status reports
    pub const fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }
}

impl core::fmt::Display for Axis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
