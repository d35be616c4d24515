//! Window configuration: touchscreen calibration, debounce intervals and
//! initial appearance.
//!
//! Calibration bounds are the only state that has to survive a reboot, so they
//! can be encoded with `postcard` and stored wherever the firmware keeps its
//! settings. Everything else is compiled in through [`WindowConfig::default`].

extern crate alloc;

use alloc::vec::Vec;
use embassy_time::Duration;
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

/// Maximum number of widgets a window holds unless told otherwise.
pub const MAX_WIDGETS: usize = 20;

/// Raw X reading at the left edge of a freshly calibrated 2.8" ILI9341 panel.
pub const DEFAULT_RAW_MIN_X: i32 = 3800;
/// Raw Y reading at the top edge.
pub const DEFAULT_RAW_MIN_Y: i32 = 190;
/// Raw X reading at the right edge.
pub const DEFAULT_RAW_MAX_X: i32 = 120;
/// Raw Y reading at the bottom edge.
pub const DEFAULT_RAW_MAX_Y: i32 = 3800;

/// Debounce applied to every touch that did not land on a slider.
pub const DEFAULT_LONG_INTERVAL_MS: u64 = 250;
/// Resample interval while dragging a slider (~30 Hz).
pub const DEFAULT_SHORT_INTERVAL_MS: u64 = 33;

/// Errors raised while building or restoring configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Both ends of an axis map to the same raw reading
    #[error("Degenerate calibration on the {axis} axis (min == max)")]
    DegenerateAxis {
        /// Name of the offending axis
        axis: &'static str,
    },

    /// Calibration could not be serialized
    #[error("Failed to encode calibration bounds")]
    Encoding,

    /// Stored bytes are not a valid calibration record
    #[error("Failed to decode calibration bounds")]
    Decoding,
}

/// Raw sensor readings that correspond to the display's `(0, 0)` and
/// `(width, height)` corners.
///
/// The raw ranges do not have to be ordered: resistive panels are often
/// mounted so that one or both axes run backwards, in which case `raw_min_*`
/// is larger than `raw_max_*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationBounds {
    pub raw_min_x: i32,
    pub raw_min_y: i32,
    pub raw_max_x: i32,
    pub raw_max_y: i32,
}

impl Default for CalibrationBounds {
    fn default() -> Self {
        Self {
            raw_min_x: DEFAULT_RAW_MIN_X,
            raw_min_y: DEFAULT_RAW_MIN_Y,
            raw_max_x: DEFAULT_RAW_MAX_X,
            raw_max_y: DEFAULT_RAW_MAX_Y,
        }
    }
}

impl CalibrationBounds {
    /// Build calibration bounds, rejecting axes that cannot be interpolated.
    pub fn new(
        raw_min_x: i32,
        raw_min_y: i32,
        raw_max_x: i32,
        raw_max_y: i32,
    ) -> Result<Self, ConfigError> {
        if raw_min_x == raw_max_x {
            return Err(ConfigError::DegenerateAxis { axis: "x" });
        }
        if raw_min_y == raw_max_y {
            return Err(ConfigError::DegenerateAxis { axis: "y" });
        }

        Ok(Self {
            raw_min_x,
            raw_min_y,
            raw_max_x,
            raw_max_y,
        })
    }

    /// Whether the X axis runs from high raw values to low ones.
    pub fn x_inverted(&self) -> bool {
        self.raw_min_x > self.raw_max_x
    }

    /// Whether the Y axis runs from high raw values to low ones.
    pub fn y_inverted(&self) -> bool {
        self.raw_min_y > self.raw_max_y
    }

    /// Encode the bounds for persistent storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Encoding)
    }

    /// Restore bounds written by [`CalibrationBounds::to_bytes`].
    ///
    /// The decoded record is validated the same way [`CalibrationBounds::new`]
    /// validates fresh values.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let stored: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decoding)?;
        Self::new(
            stored.raw_min_x,
            stored.raw_min_y,
            stored.raw_max_x,
            stored.raw_max_y,
        )
    }
}

/// Minimum spacing between two accepted touch samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Interval for general touches
    pub long_interval_ms: u64,
    /// Interval applied when the previous touch was claimed by a slider
    pub short_interval_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            long_interval_ms: DEFAULT_LONG_INTERVAL_MS,
            short_interval_ms: DEFAULT_SHORT_INTERVAL_MS,
        }
    }
}

impl DebounceConfig {
    pub fn long_interval(&self) -> Duration {
        Duration::from_millis(self.long_interval_ms)
    }

    pub fn short_interval(&self) -> Duration {
        Duration::from_millis(self.short_interval_ms)
    }
}

/// Everything a [`Window`](crate::window::Window) needs at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub calibration: CalibrationBounds,
    pub debounce: DebounceConfig,
    /// Background as a packed RGB565 value
    pub background: u16,
    pub dark_mode: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            calibration: CalibrationBounds::default(),
            debounce: DebounceConfig::default(),
            background: 0xFFFF,
            dark_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds_match_reference_panel() {
        let bounds = CalibrationBounds::default();
        assert_eq!(bounds.raw_min_x, 3800);
        assert_eq!(bounds.raw_min_y, 190);
        assert_eq!(bounds.raw_max_x, 120);
        assert_eq!(bounds.raw_max_y, 3800);
        assert!(bounds.x_inverted());
        assert!(!bounds.y_inverted());
    }

    #[test]
    fn test_degenerate_axis_rejected() {
        assert!(matches!(
            CalibrationBounds::new(100, 200, 100, 3000),
            Err(ConfigError::DegenerateAxis { axis: "x" })
        ));
        assert!(matches!(
            CalibrationBounds::new(100, 200, 3000, 200),
            Err(ConfigError::DegenerateAxis { axis: "y" })
        ));
    }

    #[test]
    fn test_calibration_survives_storage() {
        let bounds = CalibrationBounds::new(3700, 250, 180, 3650).unwrap();
        let bytes = bounds.to_bytes().unwrap();
        assert_eq!(CalibrationBounds::from_bytes(&bytes).unwrap(), bounds);
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(matches!(
            CalibrationBounds::from_bytes(&[]),
            Err(ConfigError::Decoding)
        ));
    }

    #[test]
    fn test_default_debounce_intervals() {
        let debounce = DebounceConfig::default();
        assert_eq!(debounce.long_interval(), Duration::from_millis(250));
        assert_eq!(debounce.short_interval(), Duration::from_millis(33));
    }
}
