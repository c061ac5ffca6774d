//! Dual carriage arbitration
//!
//! Two carriages share the logical X axis. Exactly one is driven at a
//! time; the other is parked and follows the gantry in Y.

use crate::error::KinematicsError;
use crate::motion::{Axis, EXTRUDER_INDEX};
use crate::traits::{Rail, Toolhead};

use super::transform::RailDrive;
use super::CoreXyKinematics;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index of a rail in the kinematics rail arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RailId(u8);

impl RailId {
    /// First X carriage (`stepper_x`)
    pub const CARRIAGE_0: RailId = RailId(0);
    /// Y belt rail (`stepper_y`)
    pub const Y: RailId = RailId(1);
    /// Z rail (`stepper_z`)
    pub const Z: RailId = RailId(2);
    /// Second X carriage (`dual_carriage`)
    pub const CARRIAGE_1: RailId = RailId(3);

    /// Number of rails in the arena
    pub const COUNT: usize = 4;

    /// Arena slot
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One of the two X carriages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Carriage {
    /// Carriage 0, driven by `stepper_x`
    #[default]
    Primary,
    /// Carriage 1, driven by the `dual_carriage` rail
    Secondary,
}

impl Carriage {
    /// Carriage for a `CARRIAGE=<n>` style index
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Carriage::Primary),
            1 => Some(Carriage::Secondary),
            _ => None,
        }
    }

    /// Numeric carriage index (0 or 1)
    pub const fn index(self) -> u8 {
        match self {
            Carriage::Primary => 0,
            Carriage::Secondary => 1,
        }
    }

    /// The other carriage
    pub const fn other(self) -> Self {
        match self {
            Carriage::Primary => Carriage::Secondary,
            Carriage::Secondary => Carriage::Primary,
        }
    }

    /// Rail driving this carriage
    pub const fn rail(self) -> RailId {
        match self {
            Carriage::Primary => RailId::CARRIAGE_0,
            Carriage::Secondary => RailId::CARRIAGE_1,
        }
    }
}

/// Owner of the logical-axis to rail mapping
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DualCarriageArbiter {
    active: Carriage,
}

impl DualCarriageArbiter {
    /// Create an arbiter with carriage 0 active
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently driven carriage
    pub fn active(&self) -> Carriage {
        self.active
    }

    /// Rail currently backing a logical axis
    pub fn rail_for(&self, axis: Axis) -> RailId {
        match axis {
            Axis::X => self.active.rail(),
            Axis::Y => RailId::Y,
            Axis::Z => RailId::Z,
        }
    }

    /// Point the X axis at `carriage`
    fn assign(&mut self, carriage: Carriage) {
        self.active = carriage;
    }
}

impl<R: Rail> CoreXyKinematics<R> {
    /// Make `carriage` the one driving the X axis
    ///
    /// Flushes the toolhead, swaps the rail backing X, republishes the
    /// toolhead position from the new rail set and refreshes the X limits
    /// if X was homed. Runs in full even when `carriage` is already active.
    pub fn activate_carriage<T: Toolhead>(&mut self, carriage: Carriage, toolhead: &mut T) {
        toolhead.sync_last_move_time();
        let extruder_pos = toolhead.position()[EXTRUDER_INDEX];
        self.carriages.assign(carriage);

        let [x, y, z] = self.calc_position();
        toolhead.set_position([x, y, z, extruder_pos]);

        let active = carriage.rail();
        if self.limits.is_homed(Axis::X) {
            self.limits
                .mark_homed(Axis::X, self.rails[active.index()].range());
        }

        self.rails[active.index()].set_drive_mode(RailDrive::Plus);
        self.rails[carriage.other().rail().index()].set_drive_mode(RailDrive::Park);
        self.enable.invalidate();

        #[cfg(feature = "defmt")]
        defmt::info!("Carriage {} active", carriage.index());
    }

    /// Activate a carriage by numeric index
    pub fn activate_carriage_index<T: Toolhead>(
        &mut self,
        index: u8,
        toolhead: &mut T,
    ) -> Result<(), KinematicsError> {
        let carriage = Carriage::from_index(index).ok_or(KinematicsError::InvalidCarriage(index))?;
        self.activate_carriage(carriage, toolhead);
        Ok(())
    }
}
