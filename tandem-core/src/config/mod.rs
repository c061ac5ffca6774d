//! Configuration types
//!
//! Rail and kinematics configuration, stored as TOML or postcard binary
//! data.

#[cfg(feature = "serde")]
pub mod encoding;
pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
