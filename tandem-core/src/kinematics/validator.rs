//! Per-move boundary checks and Z speed limiting

use crate::error::MoveError;
use crate::motion::{Axis, Move};

use super::limits::AxisLimitTracker;

/// Boundary checker holding the Z axis velocity/acceleration limits
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionValidator {
    max_z_velocity: f64,
    max_z_accel: f64,
}

impl MotionValidator {
    /// Create a validator from already-validated Z limits
    pub fn new(max_z_velocity: f64, max_z_accel: f64) -> Self {
        Self {
            max_z_velocity,
            max_z_accel,
        }
    }

    /// Maximum Z velocity in mm/s
    pub fn max_z_velocity(&self) -> f64 {
        self.max_z_velocity
    }

    /// Maximum Z acceleration in mm/s²
    pub fn max_z_accel(&self) -> f64 {
        self.max_z_accel
    }

    /// Check a pending move against the homed limits
    ///
    /// Pure XY moves are accepted unmodified. Moves with a Z component
    /// have their ceilings tightened so the Z share of the move stays
    /// within the Z axis limits.
    pub fn check_move(&self, limits: &AxisLimitTracker, mv: &mut Move) -> Result<(), MoveError> {
        if !limits.check_in_bounds(Axis::X, mv.axis_end(Axis::X))
            || !limits.check_in_bounds(Axis::Y, mv.axis_end(Axis::Y))
        {
            check_endstops(limits, mv)?;
        }
        if !mv.has_z() {
            return Ok(());
        }

        check_endstops(limits, mv)?;
        let z_ratio = mv.move_d / mv.axis_delta(Axis::Z).abs();
        mv.limit_speed(self.max_z_velocity * z_ratio, self.max_z_accel * z_ratio);
        Ok(())
    }
}

/// Reject the move if any axis it actually moves ends outside its limits
fn check_endstops(limits: &AxisLimitTracker, mv: &Move) -> Result<(), MoveError> {
    for axis in Axis::ALL {
        if mv.axis_delta(axis) == 0.0 || limits.check_in_bounds(axis, mv.axis_end(axis)) {
            continue;
        }
        let end_pos = mv.end_pos;
        return Err(if limits.is_homed(axis) {
            MoveError::Boundary { axis, end_pos }
        } else {
            MoveError::NotHomed { axis, end_pos }
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn homed_limits() -> AxisLimitTracker {
        let mut limits = AxisLimitTracker::new();
        limits.mark_homed(Axis::X, (0.0, 200.0));
        limits.mark_homed(Axis::Y, (0.0, 200.0));
        limits.mark_homed(Axis::Z, (0.0, 180.0));
        limits
    }

    fn validator() -> MotionValidator {
        MotionValidator::new(25.0, 500.0)
    }

    #[test]
    fn test_valid_xy_move_unmodified() {
        let limits = homed_limits();
        let mut mv = Move::new([0.0; 4], [10.0, 10.0, 0.0, 0.0], 100.0, 3000.0);
        assert!(validator().check_move(&limits, &mut mv).is_ok());
        assert_eq!(mv.max_velocity(), 100.0);
        assert_eq!(mv.accel(), 3000.0);
    }

    #[test]
    fn test_out_of_bounds_x() {
        let limits = homed_limits();
        let mut mv = Move::new([0.0; 4], [210.0, 10.0, 0.0, 0.0], 100.0, 3000.0);
        let err = validator().check_move(&limits, &mut mv).unwrap_err();
        assert!(matches!(err, MoveError::Boundary { axis: Axis::X, .. }));
        assert_eq!(err.end_pos(), [210.0, 10.0, 0.0, 0.0]);
    }

    #[test]
    fn test_out_of_bounds_y_min() {
        let limits = homed_limits();
        let mut mv = Move::new([0.0; 4], [10.0, -10.0, 0.0, 0.0], 100.0, 3000.0);
        let err = validator().check_move(&limits, &mut mv).unwrap_err();
        assert!(matches!(err, MoveError::Boundary { axis: Axis::Y, .. }));
    }

    #[test]
    fn test_out_of_bounds_z_max() {
        let limits = homed_limits();
        let mut mv = Move::new([0.0; 4], [10.0, 10.0, 190.0, 0.0], 100.0, 3000.0);
        let err = validator().check_move(&limits, &mut mv).unwrap_err();
        assert!(matches!(err, MoveError::Boundary { axis: Axis::Z, .. }));
    }

    #[test]
    fn test_unhomed_axes_report_not_homed() {
        let limits = AxisLimitTracker::new();
        for axis in Axis::ALL {
            let mut end = [0.0; 4];
            end[axis.index()] = 10.0;
            let mut mv = Move::new([0.0; 4], end, 100.0, 3000.0);
            let err = validator().check_move(&limits, &mut mv).unwrap_err();
            assert_eq!(err, MoveError::NotHomed { axis, end_pos: end });
        }
    }

    #[test]
    fn test_stationary_unhomed_axis_is_ignored() {
        // Y moves; X is unhomed but not moving
        let mut limits = AxisLimitTracker::new();
        limits.mark_homed(Axis::Y, (0.0, 200.0));
        let mut mv = Move::new([0.0, 0.0, 0.0, 0.0], [0.0, 50.0, 0.0, 0.0], 100.0, 3000.0);
        assert!(validator().check_move(&limits, &mut mv).is_ok());
    }

    #[test]
    fn test_homed_x_range() {
        let mut limits = AxisLimitTracker::new();
        limits.mark_homed(Axis::X, (-100.0, 100.0));

        let mut outside = Move::new([0.0; 4], [150.0, 0.0, 0.0, 0.0], 100.0, 3000.0);
        assert!(matches!(
            validator().check_move(&limits, &mut outside),
            Err(MoveError::Boundary { axis: Axis::X, .. })
        ));

        let mut inside = Move::new([0.0; 4], [50.0, 0.0, 0.0, 0.0], 100.0, 3000.0);
        assert!(validator().check_move(&limits, &mut inside).is_ok());
    }

    #[test]
    fn test_z_only_move_limits_speed() {
        let limits = homed_limits();
        let mut mv = Move::new([0.0; 4], [0.0, 0.0, 10.0, 0.0], 100.0, 3000.0);
        validator().check_move(&limits, &mut mv).unwrap();
        assert_eq!(mv.max_velocity(), 25.0);
        assert_eq!(mv.accel(), 500.0);
    }

    #[test]
    fn test_z_ratio_scaling() {
        let limits = homed_limits();
        let v = MotionValidator::new(5.0, 100.0);
        let mut mv = Move::new([0.0; 4], [30.0, 0.0, 10.0, 0.0], 100.0, 3000.0);
        v.check_move(&limits, &mut mv).unwrap();

        let z_ratio = 1000.0f64.sqrt() / 10.0;
        assert!((mv.max_velocity() - 5.0 * z_ratio).abs() < 1e-9);
        assert!((mv.max_velocity() - 15.81).abs() < 0.01);
        assert!((mv.accel() - 100.0 * z_ratio).abs() < 1e-9);
    }

    #[test]
    fn test_z_ratio_never_loosens() {
        let limits = homed_limits();
        let v = MotionValidator::new(5.0, 100.0);
        let mut mv = Move::new([0.0; 4], [30.0, 0.0, 10.0, 0.0], 10.0, 50.0);
        v.check_move(&limits, &mut mv).unwrap();
        assert_eq!(mv.max_velocity(), 10.0);
        assert_eq!(mv.accel(), 50.0);
    }

    #[test]
    fn test_rejected_move_keeps_ceilings() {
        let mut limits = homed_limits();
        limits.mark_unhomed(Axis::Z);
        let mut mv = Move::new([0.0; 4], [10.0, 10.0, 10.0, 0.0], 100.0, 3000.0);
        let err = validator().check_move(&limits, &mut mv).unwrap_err();
        assert!(matches!(err, MoveError::NotHomed { axis: Axis::Z, .. }));
        assert_eq!(mv.max_velocity(), 100.0);
        assert_eq!(mv.accel(), 3000.0);
    }

    proptest! {
        #[test]
        fn prop_unhomed_target_never_boundary(
            x in -500.0f64..500.0,
            y in -500.0f64..500.0,
            z in -500.0f64..500.0,
        ) {
            prop_assume!(x != 0.0 || y != 0.0 || z != 0.0);
            let limits = AxisLimitTracker::new();
            let mut mv = Move::new([0.0; 4], [x, y, z, 0.0], 100.0, 3000.0);
            let not_homed = matches!(
                validator().check_move(&limits, &mut mv),
                Err(MoveError::NotHomed { .. })
            );
            prop_assert!(not_homed);
        }

        #[test]
        fn prop_unhomed_z_never_boundary(z in -500.0f64..500.0) {
            prop_assume!(z != 0.0);
            let mut limits = homed_limits();
            limits.mark_unhomed(Axis::Z);
            let mut mv = Move::new([0.0; 4], [10.0, 10.0, z, 0.0], 100.0, 3000.0);
            let expected = MoveError::NotHomed {
                axis: Axis::Z,
                end_pos: [10.0, 10.0, z, 0.0],
            };
            prop_assert_eq!(validator().check_move(&limits, &mut mv), Err(expected));
        }
    }
}
