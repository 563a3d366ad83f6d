//! Laser power configuration
//!
//! Source programs express laser intensity on a `0..=255` scale. The target
//! controller expects the same range, but the tube does not fire reliably
//! below a machine-specific floor, so the source range is remapped onto
//! `min_power..=max_power`. A zero source value parks the laser at
//! `park_power` instead of switching it off.

use crate::error::{ConvertError, Result};

/// Maximum value LightBurn writes into `M67 E0 Q<n>`
pub const SOURCE_MAX_VALUE: f64 = 255.0;

/// Largest target power that fits an `M10 Q<n>` operand
pub const MAX_TARGET_POWER: f64 = u32::MAX as f64;

/// Immutable power settings handed to the transducer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerConfig {
    /// Target power for the smallest non-zero source value
    pub min_power: f64,
    /// Target power for the largest source value
    pub max_power: f64,
    /// Target power emitted for a zero source value
    pub park_power: f64,
    /// Upper bound of the source scale
    pub source_max: f64,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            min_power: 51.0,
            max_power: 255.0,
            park_power: 51.0,
            source_max: SOURCE_MAX_VALUE,
        }
    }
}

impl PowerConfig {
    /// Build a validated configuration on the default source scale
    pub fn new(min_power: f64, max_power: f64, park_power: f64) -> Result<Self> {
        Self {
            min_power,
            max_power,
            park_power,
            source_max: SOURCE_MAX_VALUE,
        }
        .validated()
    }

    /// Replace the source scale upper bound
    pub fn with_source_max(self, source_max: f64) -> Result<Self> {
        Self { source_max, ..self }.validated()
    }

    fn validated(self) -> Result<Self> {
        for (name, value) in [
            ("min_power", self.min_power),
            ("max_power", self.max_power),
            ("park_power", self.park_power),
            ("source_max", self.source_max),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConvertError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if self.min_power > self.max_power {
            return Err(ConvertError::InvalidConfig(format!(
                "min_power {} exceeds max_power {}",
                self.min_power, self.max_power
            )));
        }
        for (name, value) in [("max_power", self.max_power), ("park_power", self.park_power)] {
            if value > MAX_TARGET_POWER {
                return Err(ConvertError::InvalidConfig(format!(
                    "{name} {value} exceeds the largest target power {MAX_TARGET_POWER}"
                )));
            }
        }
        if self.source_max == 0.0 {
            return Err(ConvertError::InvalidConfig(
                "source_max must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }
}
