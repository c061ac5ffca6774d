//! Error types
//!
//! Move rejections and homing failures are recoverable and abort only the
//! offending request. Configuration errors are fatal at setup.

use core::fmt;

use crate::motion::Axis;

/// A pending move was rejected by the boundary checks
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveError {
    /// Target axis has not been homed since the motors were last enabled
    NotHomed {
        /// Offending axis
        axis: Axis,
        /// Requested end position
        end_pos: [f64; 4],
    },
    /// Target position lies outside the homed travel range
    Boundary {
        /// Offending axis
        axis: Axis,
        /// Requested end position
        end_pos: [f64; 4],
    },
}

impl MoveError {
    /// Axis that failed the check
    pub fn axis(&self) -> Axis {
        match self {
            MoveError::NotHomed { axis, .. } | MoveError::Boundary { axis, .. } => *axis,
        }
    }

    /// End position of the rejected move
    pub fn end_pos(&self) -> [f64; 4] {
        match self {
            MoveError::NotHomed { end_pos, .. } | MoveError::Boundary { end_pos, .. } => *end_pos,
        }
    }
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.end_pos();
        let reason = match self {
            MoveError::NotHomed { .. } => "Must home axis first",
            MoveError::Boundary { .. } => "Move out of range",
        };
        write!(
            f,
            "{}: {:.3} {:.3} {:.3} [{:.3}]",
            reason, p[0], p[1], p[2], p[3]
        )
    }
}

impl std::error::Error for MoveError {}

/// A homing probe did not behave as expected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingError {
    /// The endstop never triggered during the probe move
    EndstopNotTriggered {
        /// Axis being homed
        axis: Axis,
    },
    /// The endstop was already triggered before the probe move started
    TriggeredEarly {
        /// Axis being homed
        axis: Axis,
    },
}

impl HomingError {
    /// Axis being homed when the failure happened
    pub fn axis(&self) -> Axis {
        match self {
            HomingError::EndstopNotTriggered { axis } | HomingError::TriggeredEarly { axis } => {
                *axis
            }
        }
    }
}

impl fmt::Display for HomingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomingError::EndstopNotTriggered { axis } => {
                write!(f, "No trigger on {} after full movement", axis)
            }
            HomingError::TriggeredEarly { axis } => {
                write!(f, "Endstop {} still triggered before homing move", axis)
            }
        }
    }
}

impl std::error::Error for HomingError {}

/// Configuration rejected at setup
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No `dual_carriage` section or no rail supplied for it
    MissingDualCarriage,
    /// Dual carriage configured on an axis other than X
    UnsupportedDualCarriageAxis(Axis),
    /// `max_z_velocity` must be above zero and at most the toolhead maximum
    InvalidZVelocity(f64),
    /// `max_z_accel` must be above zero and at most the toolhead maximum
    InvalidZAccel(f64),
    /// Rail `position_min` is above `position_max`
    InvalidRange {
        /// Rail slot (X, Y, Z; dual carriage reports X)
        axis: Axis,
    },
    /// Rail `position_endstop` lies outside `[position_min, position_max]`
    EndstopOutOfRange {
        /// Rail slot (X, Y, Z; dual carriage reports X)
        axis: Axis,
    },
    /// Endstop sits mid-travel and no homing direction was given
    AmbiguousHomingDirection {
        /// Rail slot (X, Y, Z; dual carriage reports X)
        axis: Axis,
    },
    /// Stored configuration version does not match this build
    VersionMismatch(u8),
    /// Binary configuration could not be decoded
    Deserialize,
    /// Binary configuration could not be encoded
    Serialize,
    /// TOML configuration could not be parsed
    TomlParse,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingDualCarriage => {
                write!(f, "Core-XY kinematics need a dual_carriage section for the X axis")
            }
            ConfigError::UnsupportedDualCarriageAxis(axis) => write!(
                f,
                "Core-XY kinematics support only a dual_carriage on the X axis (got {})",
                axis
            ),
            ConfigError::InvalidZVelocity(v) => write!(f, "Invalid max_z_velocity {:.3}", v),
            ConfigError::InvalidZAccel(v) => write!(f, "Invalid max_z_accel {:.3}", v),
            ConfigError::InvalidRange { axis } => {
                write!(f, "Rail {}: position_min above position_max", axis)
            }
            ConfigError::EndstopOutOfRange { axis } => write!(
                f,
                "Rail {}: position_endstop must be between position_min and position_max",
                axis
            ),
            ConfigError::AmbiguousHomingDirection { axis } => {
                write!(f, "Rail {}: unable to infer homing_positive_dir", axis)
            }
            ConfigError::VersionMismatch(v) => {
                write!(f, "Config version mismatch: found {}", v)
            }
            ConfigError::Deserialize => write!(f, "Invalid binary configuration"),
            ConfigError::Serialize => write!(f, "Configuration could not be encoded"),
            ConfigError::TomlParse => write!(f, "Invalid TOML configuration"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Umbrella error for the public kinematics entry points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KinematicsError {
    /// Move rejected
    Move(MoveError),
    /// Homing failed
    Homing(HomingError),
    /// Setup rejected
    Config(ConfigError),
    /// Carriage index other than 0 or 1
    InvalidCarriage(u8),
}

impl From<MoveError> for KinematicsError {
    fn from(e: MoveError) -> Self {
        KinematicsError::Move(e)
    }
}

impl From<HomingError> for KinematicsError {
    fn from(e: HomingError) -> Self {
        KinematicsError::Homing(e)
    }
}

impl From<ConfigError> for KinematicsError {
    fn from(e: ConfigError) -> Self {
        KinematicsError::Config(e)
    }
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinematicsError::Move(e) => e.fmt(f),
            KinematicsError::Homing(e) => e.fmt(f),
            KinematicsError::Config(e) => e.fmt(f),
            KinematicsError::InvalidCarriage(i) => {
                write!(f, "Invalid carriage {} (expected 0 or 1)", i)
            }
        }
    }
}

impl std::error::Error for KinematicsError {}
