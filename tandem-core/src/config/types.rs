//! Kinematics configuration
//!
//! The top-level configuration for a Core-XY machine with a dual X
//! carriage. Stored either as TOML or as postcard binary data.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::motion::Axis;

use super::hardware::{DualCarriageConfig, RailConfig};

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Validated Z axis limits
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ZLimits {
    /// Maximum Z velocity (mm/s)
    pub max_velocity: f64,
    /// Maximum Z acceleration (mm/s²)
    pub max_accel: f64,
}

/// Complete kinematics configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KinematicsConfig {
    /// Configuration version for compatibility checks
    pub version: u8,
    /// Carriage 0 rail
    pub stepper_x: RailConfig,
    /// Y belt rail
    pub stepper_y: RailConfig,
    /// Z rail
    pub stepper_z: RailConfig,
    /// Z velocity limit (mm/s); defaults to the toolhead maximum
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_z_velocity: Option<f64>,
    /// Z acceleration limit (mm/s²); defaults to the toolhead maximum
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_z_accel: Option<f64>,
    /// Second X carriage; required
    #[cfg_attr(feature = "serde", serde(default))]
    pub dual_carriage: Option<DualCarriageConfig>,
}

impl KinematicsConfig {
    /// Version understood by this build
    pub const VERSION: u8 = 1;

    /// Check the configuration against the toolhead limits
    ///
    /// Returns the effective Z limits.
    pub fn validate(&self, max_velocity: f64, max_accel: f64) -> Result<ZLimits, ConfigError> {
        if self.version != Self::VERSION {
            return Err(ConfigError::VersionMismatch(self.version));
        }

        let dc = self
            .dual_carriage
            .as_ref()
            .ok_or(ConfigError::MissingDualCarriage)?;
        if dc.axis != Axis::X {
            return Err(ConfigError::UnsupportedDualCarriageAxis(dc.axis));
        }

        self.stepper_x.validate(Axis::X)?;
        self.stepper_y.validate(Axis::Y)?;
        self.stepper_z.validate(Axis::Z)?;
        dc.rail.validate(Axis::X)?;

        let max_z_velocity = self.max_z_velocity.unwrap_or(max_velocity);
        if !(max_z_velocity > 0.0 && max_z_velocity <= max_velocity) {
            return Err(ConfigError::InvalidZVelocity(max_z_velocity));
        }
        let max_z_accel = self.max_z_accel.unwrap_or(max_accel);
        if !(max_z_accel > 0.0 && max_z_accel <= max_accel) {
            return Err(ConfigError::InvalidZAccel(max_z_accel));
        }

        Ok(ZLimits {
            max_velocity: max_z_velocity,
            max_accel: max_z_accel,
        })
    }
}
