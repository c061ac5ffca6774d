//! Core-XY kinematics with a dual X carriage
//!
//! [`CoreXyKinematics`] owns the rail arena and all kinematic state:
//! which carriage drives X, the homed limits of each axis and the lazy
//! motor enable flag. Collaborators (toolhead, homing driver) are passed
//! into the operations that need them.

pub mod carriage;
pub mod enable;
pub mod homing;
pub mod limits;
pub mod transform;
pub mod validator;

pub use carriage::{Carriage, DualCarriageArbiter, RailId};
pub use enable::MotorEnableTracker;
pub use homing::homing_move;
pub use limits::{AxisLimit, AxisLimitTracker};
pub use transform::RailDrive;
pub use validator::MotionValidator;

use core::f64::consts::SQRT_2;

use heapless::String;

use crate::config::KinematicsConfig;
use crate::error::{ConfigError, MoveError};
use crate::motion::{Axis, Move, NUM_AXES};
use crate::traits::{Rail, Toolhead};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The four rails handed over at construction
#[derive(Debug)]
pub struct RailSet<R> {
    /// `stepper_x`, carriage 0
    pub x: R,
    /// `stepper_y`
    pub y: R,
    /// `stepper_z`
    pub z: R,
    /// `dual_carriage`, carriage 1
    pub dual_carriage: R,
}

/// Status snapshot
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KinematicsStatus {
    /// Homed axis letters in X, Y, Z order (e.g., "XZ")
    pub homed_axes: String<NUM_AXES>,
    /// Carriage currently driving X
    pub active_carriage: Carriage,
}

/// Core-XY kinematics with a selectable second X carriage
#[derive(Debug)]
pub struct CoreXyKinematics<R: Rail> {
    rails: [R; RailId::COUNT],
    carriages: DualCarriageArbiter,
    limits: AxisLimitTracker,
    validator: MotionValidator,
    enable: MotorEnableTracker,
}

impl<R: Rail> CoreXyKinematics<R> {
    /// Build the kinematics from configured rails
    ///
    /// Validates `config` against the toolhead limits and each rail's own
    /// travel range and endstop, couples the X and Y
    /// endstops, assigns each rail its drive function and pushes the
    /// per-rail halt limits.
    pub fn new<T: Toolhead>(
        rails: RailSet<R>,
        config: &KinematicsConfig,
        toolhead: &T,
    ) -> Result<Self, ConfigError> {
        let (max_velocity, max_accel) = toolhead.max_velocity_and_accel();
        let z = match config.validate(max_velocity, max_accel) {
            Ok(z) => z,
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Kinematics config rejected: {}", err);
                return Err(err);
            }
        };

        let RailSet {
            mut x,
            mut y,
            z: mut rail_z,
            dual_carriage: mut dc,
        } = rails;

        for (rail, axis) in [(&x, Axis::X), (&y, Axis::Y), (&rail_z, Axis::Z), (&dc, Axis::X)] {
            if let Err(err) = check_rail(rail, axis) {
                #[cfg(feature = "defmt")]
                defmt::warn!("Rail {} rejected: {}", rail.name(), err);
                return Err(err);
            }
        }

        // Coupled belts: either endstop must stop both X and Y
        let x_endstop = x.primary_endstop();
        x.add_shared_endstop(y.primary_endstop());
        y.add_shared_endstop(x_endstop);

        x.set_drive_mode(RailDrive::Plus);
        y.set_drive_mode(RailDrive::Minus);
        rail_z.set_drive_mode(RailDrive::Z);
        dc.set_drive_mode(RailDrive::Park);

        let halt = toolhead.max_axis_halt_velocity();
        x.set_max_jerk(halt * SQRT_2, max_accel * SQRT_2);
        y.set_max_jerk(halt * SQRT_2, max_accel * SQRT_2);
        rail_z.set_max_jerk(halt.min(z.max_velocity), z.max_accel);
        dc.set_max_jerk(halt, max_accel);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Core-XY kinematics ready: max_z_velocity={} max_z_accel={}",
            z.max_velocity,
            z.max_accel
        );

        Ok(Self {
            rails: [x, y, rail_z, dc],
            carriages: DualCarriageArbiter::new(),
            limits: AxisLimitTracker::new(),
            validator: MotionValidator::new(z.max_velocity, z.max_accel),
            enable: MotorEnableTracker::new(),
        })
    }

    /// Current toolhead XYZ position from the commanded rail positions
    pub fn calc_position(&self) -> [f64; 3] {
        let a = self.axis_rail(Axis::X).commanded_position();
        let b = self.axis_rail(Axis::Y).commanded_position();
        let z = self.axis_rail(Axis::Z).commanded_position();
        transform::forward(a, b, z)
    }

    /// Reset the axis rails to `newpos` and mark `homing_axes` homed
    ///
    /// The parked carriage is left alone.
    pub fn set_position(&mut self, newpos: [f64; 3], homing_axes: &[Axis]) {
        for axis in Axis::ALL {
            let id = self.carriages.rail_for(axis);
            let rail = &mut self.rails[id.index()];
            rail.set_position(newpos);
            if homing_axes.contains(&axis) {
                self.limits.mark_homed(axis, rail.range());
            }
        }
    }

    /// Check a pending move, tightening its ceilings for Z motion
    pub fn check_move(&self, mv: &mut Move) -> Result<(), MoveError> {
        self.validator.check_move(&self.limits, mv)
    }

    /// Queue an accepted move on the rails it drives
    ///
    /// XY motion drives both carriages and Y: the parked carriage follows
    /// the gantry. Z motion drives the Z rail. Extruder-only moves touch
    /// no rail.
    pub fn dispatch(&mut self, print_time: f64, mv: &Move) {
        if !mv.is_kinematic() {
            return;
        }
        if self.enable.needs_enable() {
            self.enable.on_move_dispatch(&mut self.rails, print_time, mv);
        }
        if mv.has_xy() {
            for id in [RailId::CARRIAGE_0, RailId::CARRIAGE_1, RailId::Y] {
                self.rails[id.index()].queue_move(print_time, mv);
            }
        }
        if mv.has_z() {
            self.rails[RailId::Z.index()].queue_move(print_time, mv);
        }
    }

    /// Disable every motor and forget all homed limits
    pub fn motor_off(&mut self, print_time: f64) {
        self.enable
            .motor_off(&mut self.rails, &mut self.limits, print_time);

        #[cfg(feature = "defmt")]
        defmt::info!("Motors off, all axes unhomed");
    }

    /// Homed axes and active carriage
    pub fn status(&self) -> KinematicsStatus {
        let mut homed_axes = String::new();
        for axis in self.limits.homed_axes() {
            // At most three letters; capacity matches
            homed_axes.push(axis.letter()).ok();
        }
        KinematicsStatus {
            homed_axes,
            active_carriage: self.carriages.active(),
        }
    }

    /// Carriage currently driving X
    pub fn active_carriage(&self) -> Carriage {
        self.carriages.active()
    }

    /// Homed limits of each axis
    pub fn limits(&self) -> &AxisLimitTracker {
        &self.limits
    }

    /// Z speed limits applied to moves
    pub fn validator(&self) -> &MotionValidator {
        &self.validator
    }

    /// Whether the next dispatched move runs the enable check
    pub fn needs_motor_enable(&self) -> bool {
        self.enable.needs_enable()
    }

    /// All rails, including the parked carriage
    pub fn rails(&self) -> &[R] {
        &self.rails
    }

    /// Rails that move Z
    pub fn z_rails(&self) -> &[R] {
        core::slice::from_ref(&self.rails[RailId::Z.index()])
    }

    /// Rail in a given arena slot
    pub fn rail(&self, id: RailId) -> &R {
        &self.rails[id.index()]
    }

    /// Mutable rail in a given arena slot
    pub fn rail_mut(&mut self, id: RailId) -> &mut R {
        &mut self.rails[id.index()]
    }

    /// Rail currently backing a logical axis
    pub fn axis_rail(&self, axis: Axis) -> &R {
        &self.rails[self.carriages.rail_for(axis).index()]
    }
}

/// Reject a rail whose range is inverted or whose endstop lies outside it
fn check_rail<R: Rail>(rail: &R, axis: Axis) -> Result<(), ConfigError> {
    let (position_min, position_max) = rail.range();
    if position_min > position_max {
        return Err(ConfigError::InvalidRange { axis });
    }
    let endstop = rail.homing_info().position_endstop;
    if !(position_min..=position_max).contains(&endstop) {
        return Err(ConfigError::EndstopOutOfRange { axis });
    }
    Ok(())
}
