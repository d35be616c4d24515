//! Raw sensor space to display pixel space.

use embedded_graphics::prelude::Size;

use super::{RawTouch, TouchPoint};
use crate::config::CalibrationBounds;

/// Linear interpolation of `value` from `in_min..in_max` onto `0..out_max`.
///
/// Works for inverted ranges (`in_min > in_max`). The result is not clamped.
fn interpolate(value: i32, in_min: i32, in_max: i32, out_max: u32) -> i32 {
    let span = in_max as i64 - in_min as i64;
    if span == 0 {
        return 0;
    }
    ((value as i64 - in_min as i64) * out_max as i64 / span) as i32
}

/// Map a raw reading to display pixels using the calibration bounds.
///
/// Each axis is interpolated independently, pressure passes through. Touches
/// outside the calibrated area land outside `[0, width) x [0, height)`;
/// callers that care must clip.
pub fn map_to_screen(raw: RawTouch, bounds: &CalibrationBounds, display: Size) -> TouchPoint {
    TouchPoint {
        x: interpolate(raw.x, bounds.raw_min_x, bounds.raw_max_x, display.width),
        y: interpolate(raw.y, bounds.raw_min_y, bounds.raw_max_y, display.height),
        pressure: raw.pressure,
    }
}

/// Inverse of [`map_to_screen`]: the raw reading a pixel position corresponds
/// to. Used by the calibration wizard and by touch emulation on the desktop.
pub fn map_to_raw(point: TouchPoint, bounds: &CalibrationBounds, display: Size) -> RawTouch {
    fn axis(value: i32, raw_min: i32, raw_max: i32, extent: u32) -> i32 {
        if extent == 0 {
            return raw_min;
        }
        raw_min + ((raw_max as i64 - raw_min as i64) * value as i64 / extent as i64) as i32
    }

    RawTouch {
        x: axis(point.x, bounds.raw_min_x, bounds.raw_max_x, display.width),
        y: axis(point.y, bounds.raw_min_y, bounds.raw_max_y, display.height),
        pressure: point.pressure,
    }
}
