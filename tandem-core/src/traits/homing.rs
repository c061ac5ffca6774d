//! Homing driver trait
//!
//! The homing driver performs the physical probe move towards an endstop.
//! The kinematics decide where to probe; the driver reports whether the
//! endstop triggered as expected.

use crate::error::HomingError;
use crate::motion::Axis;

use super::rail::Rail;

/// A single-rail homing request
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HomingMove {
    /// Logical axis being homed
    pub axis: Axis,
    /// Position the toolhead is assumed to start from
    ///
    /// Far enough beyond the endstop that a full probe move covers the
    /// whole travel range.
    pub probe_pos: f64,
    /// Axis position once the endstop has triggered
    pub final_pos: f64,
}

/// Trait for the physical homing collaborator
pub trait HomingDriver<R: Rail> {
    /// Probe `rail` from `homing.probe_pos` towards `homing.final_pos`
    ///
    /// Returns an error when the endstop did not trigger, or triggered
    /// before the probe started.
    fn home_rail(&mut self, rail: &mut R, homing: &HomingMove) -> Result<(), HomingError>;
}
