//! Configuration encoding
//!
//! Binary configuration is postcard-encoded. Text configuration is TOML
//! and needs the `toml` feature.

use crate::error::ConfigError;

use super::types::KinematicsConfig;

/// Decode a postcard-encoded configuration
///
/// Rejects configurations written for a different version.
pub fn from_postcard(bytes: &[u8]) -> Result<KinematicsConfig, ConfigError> {
    let config: KinematicsConfig =
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;

    if config.version != KinematicsConfig::VERSION {
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "Config version mismatch: found {}, expected {}",
            config.version,
            KinematicsConfig::VERSION
        );
        return Err(ConfigError::VersionMismatch(config.version));
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("Decoded {} bytes of binary config", bytes.len());
    Ok(config)
}

/// Encode a configuration with postcard
pub fn to_postcard(config: &KinematicsConfig) -> Result<Vec<u8>, ConfigError> {
    postcard::to_allocvec(config).map_err(|_| ConfigError::Serialize)
}

/// Parse a TOML configuration
///
/// A missing `version` key is read as the current version.
#[cfg(feature = "toml")]
pub fn from_toml(text: &str) -> Result<KinematicsConfig, ConfigError> {
    let mut table: toml::Table = toml::from_str(text).map_err(|_e| {
        #[cfg(feature = "defmt")]
        defmt::warn!("TOML parse error: {}", defmt::Debug2Format(&_e));
        ConfigError::TomlParse
    })?;
    table
        .entry("version")
        .or_insert(toml::Value::Integer(i64::from(KinematicsConfig::VERSION)));

    let config: KinematicsConfig = table.try_into().map_err(|_| ConfigError::TomlParse)?;
    if config.version != KinematicsConfig::VERSION {
        return Err(ConfigError::VersionMismatch(config.version));
    }
    Ok(config)
}

/// Load a stored configuration
///
/// Tries TOML first, falls back to binary postcard format.
#[cfg(feature = "toml")]
pub fn load(bytes: &[u8]) -> Result<KinematicsConfig, ConfigError> {
    if let Ok(text) = core::str::from_utf8(bytes) {
        match from_toml(text) {
            Ok(config) => {
                #[cfg(feature = "defmt")]
                defmt::info!("Loaded configuration from TOML");
                return Ok(config);
            }
            Err(err @ ConfigError::VersionMismatch(_)) => return Err(err),
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Not a TOML config, trying binary");
            }
        }
    }
    from_postcard(bytes)
}
