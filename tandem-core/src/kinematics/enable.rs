//! Lazy motor enable tracking
//!
//! Motors are enabled on the first move that needs them. Once every rail
//! reports enabled the check is skipped until something invalidates it
//! (motors off, carriage swap).

use crate::motion::Move;
use crate::traits::Rail;

use super::carriage::RailId;
use super::limits::AxisLimitTracker;

/// Sticky "some rail may still be disabled" flag
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorEnableTracker {
    needs_enable: bool,
}

impl Default for MotorEnableTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorEnableTracker {
    /// Create a tracker; the first move always runs the enable check
    pub fn new() -> Self {
        Self { needs_enable: true }
    }

    /// Whether the next dispatched move must run the enable check
    pub fn needs_enable(&self) -> bool {
        self.needs_enable
    }

    /// Force the enable check to run on the next move
    pub fn invalidate(&mut self) {
        self.needs_enable = true;
    }

    /// Enable the rails a move needs, then recompute the flag
    ///
    /// XY motion enables Y and both carriages (the shared belt moves them
    /// all); Z motion enables Z.
    pub fn on_move_dispatch<R: Rail>(
        &mut self,
        rails: &mut [R; RailId::COUNT],
        print_time: f64,
        mv: &Move,
    ) {
        if mv.has_xy() {
            for id in [RailId::CARRIAGE_0, RailId::CARRIAGE_1, RailId::Y] {
                rails[id.index()].motor_enable(print_time, true);
            }
        }
        if mv.has_z() {
            rails[RailId::Z.index()].motor_enable(print_time, true);
        }
        self.needs_enable = rails.iter().any(|rail| !rail.is_motor_enabled());
    }

    /// Disable every rail and forget all homed ranges
    pub fn motor_off<R: Rail>(
        &mut self,
        rails: &mut [R; RailId::COUNT],
        limits: &mut AxisLimitTracker,
        print_time: f64,
    ) {
        limits.reset_all();
        for rail in rails.iter_mut() {
            rail.motor_enable(print_time, false);
        }
        self.needs_enable = true;
    }
}
