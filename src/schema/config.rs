//! Configuration for ocean simulations.

use serde::{Deserialize, Serialize};

use crate::error::OceanError;

/// Dimensions and shark starvation parameter for an ocean.
///
/// Both the dense [`Ocean`](crate::Ocean) grid and its
/// [`RunList`](crate::RunList) encoding are created from this configuration
/// and keep it fixed for their whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OceanConfig {
    /// Grid width in cells (X dimension).
    pub width: usize,
    /// Grid height in cells (Y dimension).
    pub height: usize,
    /// Timesteps a shark survives without eating. Newborn and just-fed
    /// sharks start their countdown here.
    pub starve_time: u32,
}

impl Default for OceanConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            starve_time: 3,
        }
    }
}

impl OceanConfig {
    /// Total number of cells (width * height).
    #[inline]
    pub fn grid_size(&self) -> usize {
        self.width * self.height
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), OceanError> {
        if self.width == 0 || self.height == 0 {
            return Err(OceanError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(OceanConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_dimension_rejected() {
        let config = OceanConfig {
            width: 0,
            height: 5,
            starve_time: 3,
        };
        assert_eq!(
            config.validate(),
            Err(OceanError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );

        let config = OceanConfig {
            width: 5,
            height: 0,
            starve_time: 3,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_json_round_trip() {
        let config = OceanConfig {
            width: 20,
            height: 10,
            starve_time: 4,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: OceanConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
