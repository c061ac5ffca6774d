//! Pending moves handed over by the motion planner
//!
//! The planner owns look-ahead and velocity profiling. The kinematics only
//! see one pending move at a time and may tighten its speed and
//! acceleration ceilings before it is queued.

use super::position::{Axis, EXTRUDER_INDEX};

/// A pending toolhead move in `[x, y, z, e]` coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Move {
    /// Position at the start of the move
    pub start_pos: [f64; 4],
    /// Position at the end of the move
    pub end_pos: [f64; 4],
    /// Per-slot displacement (`end_pos - start_pos`)
    pub axes_d: [f64; 4],
    /// Combined displacement magnitude
    ///
    /// Euclidean length of the XYZ displacement, or the extruder
    /// displacement for extrude-only moves.
    pub move_d: f64,
    /// Velocity ceiling in mm/s
    max_velocity: f64,
    /// Acceleration ceiling in mm/s²
    accel: f64,
}

impl Move {
    /// Build a move between two positions with the planner's initial ceilings
    pub fn new(start_pos: [f64; 4], end_pos: [f64; 4], speed: f64, accel: f64) -> Self {
        let mut axes_d = [0.0; 4];
        for (d, (end, start)) in axes_d.iter_mut().zip(end_pos.iter().zip(start_pos.iter())) {
            *d = end - start;
        }

        let xyz_d2 = axes_d[0] * axes_d[0] + axes_d[1] * axes_d[1] + axes_d[2] * axes_d[2];
        let move_d = if xyz_d2 > 0.0 {
            xyz_d2.sqrt()
        } else {
            axes_d[EXTRUDER_INDEX].abs()
        };

        Self {
            start_pos,
            end_pos,
            axes_d,
            move_d,
            max_velocity: speed,
            accel,
        }
    }

    /// Displacement along one kinematic axis
    pub fn axis_delta(&self, axis: Axis) -> f64 {
        self.axes_d[axis.index()]
    }

    /// End position along one kinematic axis
    pub fn axis_end(&self, axis: Axis) -> f64 {
        self.end_pos[axis.index()]
    }

    /// Whether the move has any X or Y component
    pub fn has_xy(&self) -> bool {
        self.axes_d[0] != 0.0 || self.axes_d[1] != 0.0
    }

    /// Whether the move has a Z component
    pub fn has_z(&self) -> bool {
        self.axes_d[2] != 0.0
    }

    /// Whether the move changes the toolhead's XYZ position at all
    pub fn is_kinematic(&self) -> bool {
        self.has_xy() || self.has_z()
    }

    /// Current velocity ceiling
    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    /// Current acceleration ceiling
    pub fn accel(&self) -> f64 {
        self.accel
    }

    /// Tighten the velocity and acceleration ceilings
    ///
    /// Ceilings only ever go down; a looser request leaves the current
    /// value in place.
    pub fn limit_speed(&mut self, speed: f64, accel: f64) {
        if speed < self.max_velocity {
            self.max_velocity = speed;
        }
        if accel < self.accel {
            self.accel = accel;
        }
    }
}
