//! Persisted widget settings

use alloc::vec::Vec;
use embassy_time::Duration;
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::ui::components::ClockStyle;
use crate::ui::gesture::{DEFAULT_TOUCH_SLOP_DP, TouchSlop};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to decode config: {0}")]
    Decode(postcard::Error),
    #[error("failed to encode config: {0}")]
    Encode(postcard::Error),
}

/// Settings shared by the clock and the flow containers
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WidgetConfig {
    /// Drag distance before a scroll container takes a gesture, in dp
    pub touch_slop_dp: u32,
    /// Physical pixels per dp
    pub density: f32,
    pub redraw_interval_ms: u32,
    pub clock: ClockStyle,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            touch_slop_dp: DEFAULT_TOUCH_SLOP_DP,
            density: 1.0,
            redraw_interval_ms: 100,
            clock: ClockStyle::default(),
        }
    }
}

impl WidgetConfig {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(ConfigError::Decode)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(ConfigError::Encode)
    }

    /// Touch slop in pixels for this display
    pub fn touch_slop(&self) -> TouchSlop {
        TouchSlop::scaled(self.touch_slop_dp, self.density)
    }

    pub fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_interval_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.touch_slop(), TouchSlop(8));
        assert_eq!(config.redraw_interval(), Duration::from_millis(100));
        assert_eq!(config.clock, ClockStyle::default());
    }

    #[test]
    fn test_postcard_round_trip() {
        let config = WidgetConfig {
            touch_slop_dp: 10,
            density: 2.0,
            redraw_interval_ms: 250,
            clock: ClockStyle {
                hour_radius: 20,
                hour_width: 4,
                minute_radius: 28,
                minute_width: 3,
                second_radius: 30,
                second_width: 1,
                arrow_color: 0xF800,
            },
        };

        let bytes = config.to_vec().unwrap();
        let decoded = WidgetConfig::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, config);
        assert_eq!(decoded.touch_slop(), TouchSlop(20));
    }

    #[test]
    fn test_truncated_bytes_fail_to_decode() {
        let bytes = WidgetConfig::default().to_vec().unwrap();
        let result = WidgetConfig::from_bytes(&bytes[..2]);
        assert!(matches!(result, Err(ConfigError::Decode(_))));
    }
}
