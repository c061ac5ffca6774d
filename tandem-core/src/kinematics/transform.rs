//! Core-XY coordinate transform
//!
//! The two belt rails `a` and `b` jointly drive X and Y:
//!
//! ```text
//! a = x + y        x = (a + b) / 2
//! b = x - y        y = (a - b) / 2
//! ```
//!
//! Z is driven directly by its own rail.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Toolhead XYZ position from the `a`, `b` belt rails and the Z rail
pub fn forward(rail_a: f64, rail_b: f64, rail_z: f64) -> [f64; 3] {
    [0.5 * (rail_a + rail_b), 0.5 * (rail_a - rail_b), rail_z]
}

/// Rail positions `[a, b, z]` for a toolhead XYZ position
pub fn inverse(x: f64, y: f64, z: f64) -> [f64; 3] {
    [x + y, x - y, z]
}

/// How a rail derives its coordinate from the toolhead position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RailDrive {
    /// Driven `a` belt: `x + y`
    Plus,
    /// Driven `b` belt: `x - y`
    Minus,
    /// Parked dual carriage: follows the shared gantry in Y only
    Park,
    /// Direct cartesian Z
    Z,
}

impl RailDrive {
    /// Rail coordinate for toolhead position `coord`
    pub fn calc_position(self, coord: [f64; 3]) -> f64 {
        let [x, y, z] = coord;
        match self {
            RailDrive::Plus => x + y,
            RailDrive::Minus => x - y,
            RailDrive::Park => y,
            RailDrive::Z => z,
        }
    }
}
