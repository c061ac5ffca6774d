//! Rail configuration types
//!
//! Per-rail travel and homing settings, as found in the `stepper_x`,
//! `stepper_y`, `stepper_z` and `dual_carriage` sections.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::motion::Axis;
use crate::traits::HomingInfo;

use super::types::MAX_LABEL_LEN;

/// Travel range and endstop of one rail
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RailConfig {
    /// Rail name (e.g., "stepper_x")
    pub name: String<MAX_LABEL_LEN>,
    /// Lowest reachable rail coordinate (mm)
    #[cfg_attr(feature = "serde", serde(default))]
    pub position_min: f64,
    /// Highest reachable rail coordinate (mm)
    pub position_max: f64,
    /// Rail coordinate at which the endstop triggers (mm)
    pub position_endstop: f64,
    /// Approach the endstop moving in the positive direction
    ///
    /// Inferred when unset: an endstop in the lowest quarter of travel is
    /// approached negatively, one in the highest quarter positively.
    #[cfg_attr(feature = "serde", serde(default))]
    pub homing_positive_dir: Option<bool>,
}

impl RailConfig {
    /// Create a rail config with an inferred homing direction
    ///
    /// Names longer than [`MAX_LABEL_LEN`] are truncated.
    pub fn new(name: &str, position_min: f64, position_max: f64, position_endstop: f64) -> Self {
        let mut label = String::new();
        for c in name.chars() {
            if label.push(c).is_err() {
                break;
            }
        }
        Self {
            name: label,
            position_min,
            position_max,
            position_endstop,
            homing_positive_dir: None,
        }
    }

    /// Travel range `(position_min, position_max)`
    pub fn range(&self) -> (f64, f64) {
        (self.position_min, self.position_max)
    }

    /// Endstop position and approach direction
    ///
    /// `axis` is only used to label the error.
    pub fn homing_info(&self, axis: Axis) -> Result<HomingInfo, ConfigError> {
        let quarter = (self.position_max - self.position_min) / 4.0;
        let positive_dir = match self.homing_positive_dir {
            Some(dir) => dir,
            None if self.position_endstop <= self.position_min + quarter => false,
            None if self.position_endstop >= self.position_max - quarter => true,
            None => return Err(ConfigError::AmbiguousHomingDirection { axis }),
        };
        Ok(HomingInfo {
            position_endstop: self.position_endstop,
            positive_dir,
        })
    }

    /// Check range ordering, endstop placement and homing direction
    pub fn validate(&self, axis: Axis) -> Result<(), ConfigError> {
        if self.position_min > self.position_max {
            return Err(ConfigError::InvalidRange { axis });
        }
        if self.position_endstop < self.position_min || self.position_endstop > self.position_max {
            return Err(ConfigError::EndstopOutOfRange { axis });
        }
        self.homing_info(axis)?;
        Ok(())
    }
}

/// The `dual_carriage` section
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DualCarriageConfig {
    /// Logical axis shared by both carriages; only X is supported
    pub axis: Axis,
    /// The second carriage's rail
    pub rail: RailConfig,
}
