//! Collaborator traits
//!
//! These traits define the interface between the kinematics and the
//! hardware-facing layers (rails, motion queue, homing driver).

pub mod homing;
pub mod rail;
pub mod toolhead;

#[cfg(test)]
pub(crate) mod mock;

pub use homing::{HomingDriver, HomingMove};
pub use rail::{HomingInfo, Rail};
pub use toolhead::Toolhead;
