//! Per-axis homed travel limits
//!
//! An axis only has usable limits once it has been homed. Until then every
//! position on that axis is rejected.

use crate::motion::{Axis, NUM_AXES};

/// Limit interval of one logical axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisLimit {
    /// Position unknown; all positions rejected
    #[default]
    Unhomed,
    /// Homed; positions within `[low, high]` accepted
    Homed {
        /// Lowest reachable position
        low: f64,
        /// Highest reachable position
        high: f64,
    },
}

impl AxisLimit {
    /// Raw `(low, high)` pair
    ///
    /// Unhomed axes report the inverted `(1.0, -1.0)` interval.
    pub fn interval(&self) -> (f64, f64) {
        match *self {
            AxisLimit::Unhomed => (1.0, -1.0),
            AxisLimit::Homed { low, high } => (low, high),
        }
    }

    /// Check if the axis has been homed
    pub fn is_homed(&self) -> bool {
        matches!(self, AxisLimit::Homed { .. })
    }

    /// Check if a position lies within the homed range
    pub fn contains(&self, pos: f64) -> bool {
        match *self {
            AxisLimit::Unhomed => false,
            AxisLimit::Homed { low, high } => pos >= low && pos <= high,
        }
    }
}

/// Homed-range state for X, Y and Z
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisLimitTracker {
    limits: [AxisLimit; NUM_AXES],
}

impl AxisLimitTracker {
    /// Create a tracker with every axis unhomed
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every homed range
    pub fn reset_all(&mut self) {
        self.limits = [AxisLimit::Unhomed; NUM_AXES];
    }

    /// Record a successful homing pass for `axis`
    ///
    /// An inverted range cannot bound any position and leaves the axis
    /// unhomed.
    pub fn mark_homed(&mut self, axis: Axis, range: (f64, f64)) {
        let (low, high) = range;
        self.limits[axis.index()] = if low <= high {
            AxisLimit::Homed { low, high }
        } else {
            AxisLimit::Unhomed
        };
    }

    /// Forget the homed range of one axis
    pub fn mark_unhomed(&mut self, axis: Axis) {
        self.limits[axis.index()] = AxisLimit::Unhomed;
    }

    /// Limit of one axis
    pub fn get(&self, axis: Axis) -> AxisLimit {
        self.limits[axis.index()]
    }

    /// Check if `axis` has been homed
    pub fn is_homed(&self, axis: Axis) -> bool {
        self.get(axis).is_homed()
    }

    /// Check if `pos` is reachable on `axis`
    pub fn check_in_bounds(&self, axis: Axis, pos: f64) -> bool {
        self.get(axis).contains(pos)
    }

    /// Iterate over the homed axes in slot order
    pub fn homed_axes(&self) -> impl Iterator<Item = Axis> + '_ {
        Axis::ALL.into_iter().filter(|axis| self.is_homed(*axis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unhomed() {
        let limits = AxisLimitTracker::new();
        for axis in Axis::ALL {
            assert!(!limits.is_homed(axis));
            assert_eq!(limits.get(axis).interval(), (1.0, -1.0));
            assert!(!limits.check_in_bounds(axis, 0.0));
            assert!(!limits.check_in_bounds(axis, 1.0));
            assert!(!limits.check_in_bounds(axis, -1.0));
        }
    }

    #[test]
    fn test_mark_homed() {
        let mut limits = AxisLimitTracker::new();
        limits.mark_homed(Axis::X, (-100.0, 100.0));

        assert!(limits.is_homed(Axis::X));
        assert!(!limits.is_homed(Axis::Y));
        assert!(limits.check_in_bounds(Axis::X, 50.0));
        assert!(limits.check_in_bounds(Axis::X, -100.0));
        assert!(limits.check_in_bounds(Axis::X, 100.0));
        assert!(!limits.check_in_bounds(Axis::X, 150.0));
        assert_eq!(limits.get(Axis::X).interval(), (-100.0, 100.0));
    }

    #[test]
    fn test_reset_all() {
        let mut limits = AxisLimitTracker::new();
        for axis in Axis::ALL {
            limits.mark_homed(axis, (0.0, 200.0));
        }
        limits.reset_all();
        assert_eq!(limits.homed_axes().count(), 0);
    }

    #[test]
    fn test_mark_unhomed() {
        let mut limits = AxisLimitTracker::new();
        limits.mark_homed(Axis::Z, (0.0, 180.0));
        limits.mark_homed(Axis::Y, (0.0, 200.0));
        limits.mark_unhomed(Axis::Z);

        let homed: Vec<Axis> = limits.homed_axes().collect();
        assert_eq!(homed, vec![Axis::Y]);
    }

    #[test]
    fn test_zero_width_range() {
        let mut limits = AxisLimitTracker::new();
        limits.mark_homed(Axis::Z, (5.0, 5.0));
        assert!(limits.is_homed(Axis::Z));
        assert!(limits.check_in_bounds(Axis::Z, 5.0));
        assert!(!limits.check_in_bounds(Axis::Z, 5.1));
    }

    #[test]
    fn test_inverted_range_stays_unhomed() {
        let mut limits = AxisLimitTracker::new();
        limits.mark_homed(Axis::X, (500.0, -500.0));
        assert!(!limits.is_homed(Axis::X));
        assert_eq!(limits.get(Axis::X), AxisLimit::Unhomed);
        assert_eq!(limits.homed_axes().count(), 0);
    }
}
