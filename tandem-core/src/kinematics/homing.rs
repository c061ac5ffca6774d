//! Homing sequencer
//!
//! Axes are homed one at a time in request order. The X axis is backed by
//! two carriages, so homing X homes each carriage in turn and then hands
//! X back to whichever carriage was active before.

use crate::error::HomingError;
use crate::motion::Axis;
use crate::traits::{HomingDriver, HomingInfo, HomingMove, Rail, Toolhead};

use super::carriage::{Carriage, RailId};
use super::CoreXyKinematics;

/// Distance multiplier for the assumed start of a probe move
const PROBE_OVERSHOOT: f64 = 1.5;

/// Probe and final positions for homing a rail along `axis`
///
/// The probe starts 1.5 travel lengths behind the endstop so that a
/// single move towards the endstop is guaranteed to reach it.
pub fn homing_move(axis: Axis, info: HomingInfo, range: (f64, f64)) -> HomingMove {
    let (position_min, position_max) = range;
    let endstop = info.position_endstop;
    let probe_pos = if info.positive_dir {
        endstop - PROBE_OVERSHOOT * (endstop - position_min)
    } else {
        endstop + PROBE_OVERSHOOT * (position_max - endstop)
    };
    HomingMove {
        axis,
        probe_pos,
        final_pos: endstop,
    }
}

impl<R: Rail> CoreXyKinematics<R> {
    /// Home `axes` in order
    ///
    /// Stops at the first axis that fails. Axes homed earlier in the same
    /// request keep their limits; the failing axis is left unhomed.
    pub fn home<T, D>(
        &mut self,
        axes: &[Axis],
        toolhead: &mut T,
        driver: &mut D,
    ) -> Result<(), HomingError>
    where
        T: Toolhead,
        D: HomingDriver<R>,
    {
        for &axis in axes {
            #[cfg(feature = "defmt")]
            defmt::info!("Homing {}", axis);

            match axis {
                Axis::X => self.home_dual_carriage(toolhead, driver)?,
                Axis::Y => self.home_rail(axis, RailId::Y, toolhead, driver)?,
                Axis::Z => self.home_rail(axis, RailId::Z, toolhead, driver)?,
            }
        }
        Ok(())
    }

    fn home_dual_carriage<T, D>(
        &mut self,
        toolhead: &mut T,
        driver: &mut D,
    ) -> Result<(), HomingError>
    where
        T: Toolhead,
        D: HomingDriver<R>,
    {
        let restore = self.active_carriage();
        for carriage in [Carriage::Primary, Carriage::Secondary] {
            self.activate_carriage(carriage, toolhead);
            self.home_rail(Axis::X, carriage.rail(), toolhead, driver)?;
        }
        self.activate_carriage(restore, toolhead);
        Ok(())
    }

    fn home_rail<T, D>(
        &mut self,
        axis: Axis,
        id: RailId,
        toolhead: &mut T,
        driver: &mut D,
    ) -> Result<(), HomingError>
    where
        T: Toolhead,
        D: HomingDriver<R>,
    {
        let rail = &mut self.rails[id.index()];
        let homing = homing_move(axis, rail.homing_info(), rail.range());

        if let Err(err) = driver.home_rail(rail, &homing) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Homing {} failed: {}", axis, err);
            self.limits.mark_unhomed(axis);
            return Err(err);
        }

        let mut pos = toolhead.position();
        pos[axis.index()] = homing.final_pos;
        toolhead.set_position(pos);
        self.set_position([pos[0], pos[1], pos[2]], &[axis]);

        #[cfg(feature = "defmt")]
        defmt::debug!("Homed {} at {}", axis, homing.final_pos);
        Ok(())
    }
}
