//! Motion types
//!
//! Axis identifiers and the pending-move type exchanged with the planner.

pub mod planner;
pub mod position;

pub use planner::Move;
pub use position::{Axis, EXTRUDER_INDEX, NUM_AXES};
