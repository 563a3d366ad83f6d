//! Linear laser power remapping

use crate::config::PowerConfig;
use tracing::warn;

/// Maps source intensities onto the target controller's power range
#[derive(Debug, Clone, Copy)]
pub struct PowerMapping {
    config: PowerConfig,
}

impl PowerMapping {
    pub fn new(config: PowerConfig) -> Self {
        Self { config }
    }

    /// Target power for a non-negative source value, truncated to an integer.
    ///
    /// Zero parks the laser. Values above the source scale are clamped.
    pub fn map(&self, value: f64) -> u32 {
        let PowerConfig {
            min_power,
            max_power,
            park_power,
            source_max,
        } = self.config;

        if value == 0.0 {
            return park_power.trunc() as u32;
        }
        let value = if value > source_max {
            warn!(value, source_max, "laser power above source scale, clamping");
            source_max
        } else {
            value
        };
        let scaled = min_power + (max_power - min_power) * (value / source_max);
        scaled.trunc() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> PowerMapping {
        PowerMapping::new(PowerConfig::default())
    }

    #[test]
    fn test_zero_is_park_power() {
        assert_eq!(mapping().map(0.0), 51);
        let config = PowerConfig::new(64.0, 255.0, 10.0).unwrap();
        assert_eq!(PowerMapping::new(config).map(0.0), 10);
    }

    #[test]
    fn test_full_scale_is_max_power() {
        assert_eq!(mapping().map(255.0), 255);
        let config = PowerConfig::new(0.0, 1000.0, 0.0).unwrap();
        assert_eq!(PowerMapping::new(config).map(255.0), 1000);
    }

    #[test]
    fn test_midpoint_truncates() {
        // 51 + 204 * 128 / 255 = 153.4
        assert_eq!(mapping().map(128.0), 153);
        assert_eq!(mapping().map(1.0), 51);
    }

    #[test]
    fn test_fractional_source_value() {
        // 51 + 204 * 127.5 / 255 = 153.0
        assert_eq!(mapping().map(127.5), 153);
    }

    #[test]
    fn test_above_scale_is_clamped() {
        assert_eq!(mapping().map(300.0), 255);
    }

    #[test]
    fn test_monotonic_over_source_range() {
        let mapping = mapping();
        let mut previous = mapping.map(1.0);
        for v in 2..=255 {
            let current = mapping.map(v as f64);
            assert!(current >= previous, "not monotonic at {v}");
            previous = current;
        }
    }
}
