//! Rail trait
//!
//! A rail is one addressable drive axis: one or more mechanically linked
//! steppers, a travel range and a homing endstop. Rails are owned by the
//! hardware layer; the kinematics only reconfigure them and decide which
//! rail backs which logical axis.

use crate::kinematics::transform::RailDrive;
use crate::motion::Move;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Homing descriptor of a rail
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HomingInfo {
    /// Rail coordinate at which the endstop triggers
    pub position_endstop: f64,
    /// Endstop is approached while moving in the positive direction
    pub positive_dir: bool,
}

/// Trait for rails driven by the kinematics
///
/// Implementations wrap the stepper/endstop hardware. All methods are
/// called from the single motion-processing thread.
pub trait Rail {
    /// Handle to an endstop that can be shared with another rail
    type Endstop: Clone;

    /// Rail name (e.g., "stepper_x", "dual_carriage")
    fn name(&self) -> &str;

    /// Physical travel range `(position_min, position_max)`
    fn range(&self) -> (f64, f64);

    /// Endstop position and approach direction
    fn homing_info(&self) -> HomingInfo;

    /// Last commanded rail coordinate
    fn commanded_position(&self) -> f64;

    /// Reset the steppers to the rail coordinate of a toolhead position
    ///
    /// The rail evaluates its current [`RailDrive`] on `coord`.
    fn set_position(&mut self, coord: [f64; 3]);

    /// Enable or disable the rail's motors at `print_time`
    fn motor_enable(&mut self, print_time: f64, enable: bool);

    /// Check if every motor on the rail is enabled
    fn is_motor_enabled(&self) -> bool;

    /// Select how the rail derives its coordinate from toolhead motion
    fn set_drive_mode(&mut self, drive: RailDrive);

    /// Set the rail's halt velocity and acceleration limits
    fn set_max_jerk(&mut self, halt_velocity: f64, accel: f64);

    /// Queue a move for step generation
    fn queue_move(&mut self, print_time: f64, mv: &Move);

    /// The rail's own (first) endstop
    fn primary_endstop(&self) -> Self::Endstop;

    /// Make an endstop of another rail also stop this rail's steppers
    ///
    /// Coupled belt rails must both halt when either endstop triggers.
    fn add_shared_endstop(&mut self, endstop: Self::Endstop);
}
