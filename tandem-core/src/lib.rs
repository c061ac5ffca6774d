//! Board-agnostic Core-XY kinematics with a dual X carriage
//!
//! This crate contains the kinematic state machine of a Core-XY machine
//! whose X axis is served by two selectable carriages:
//!
//! - Coordinate transform between toolhead space and belt rails
//! - Homed travel limits and per-move boundary checks
//! - Z speed limiting for moves with a Z component
//! - Lazy motor enable tracking
//! - Carriage selection and the dual carriage homing sequence
//! - Configuration type definitions
//!
//! Hardware lives behind the [`traits`] module: rails, the toolhead motion
//! queue and the homing driver are supplied by the caller.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod kinematics;
pub mod motion;
pub mod traits;

pub use error::{ConfigError, HomingError, KinematicsError, MoveError};
pub use kinematics::{Carriage, CoreXyKinematics, KinematicsStatus, RailSet};
