//! Touch input: raw sensor access, coordinate mapping, debouncing and
//! calibration.
//!
//! A resistive panel reports ADC readings that have nothing to do with screen
//! pixels. Each update cycle the window asks the [`TouchDebouncer`] whether a
//! new sample may be taken, reads it from the [`TouchSensor`], and converts it
//! to a [`TouchPoint`] with [`map_to_screen`].

pub mod calibration;
pub mod debounce;
pub mod mapper;

pub use calibration::{CalibrationStep, CalibrationWizard};
pub use debounce::TouchDebouncer;
pub use mapper::map_to_screen;

use embedded_graphics::prelude::Point;

/// A raw reading in sensor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawTouch {
    pub x: i32,
    pub y: i32,
    pub pressure: u16,
}

impl RawTouch {
    pub const fn new(x: i32, y: i32, pressure: u16) -> Self {
        Self { x, y, pressure }
    }
}

/// A touch in display pixel space.
///
/// Out-of-calibration touches may map outside the screen, so coordinates are
/// signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchPoint {
    pub x: i32,
    pub y: i32,
    pub pressure: u16,
}

impl TouchPoint {
    /// The point used when no touch was accepted this cycle.
    ///
    /// Zero pressure never satisfies a hit test.
    pub const NONE: Self = Self {
        x: 0,
        y: 0,
        pressure: 0,
    };

    pub const fn new(x: i32, y: i32, pressure: u16) -> Self {
        Self { x, y, pressure }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressure > 0
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Driver for the touch controller.
///
/// Implementations wrap whatever bus the controller sits on; the window only
/// needs to know whether the panel is pressed and, if so, where.
pub trait TouchSensor {
    type Error: core::fmt::Debug;

    /// Whether something is pressing the panel right now.
    fn is_touching(&mut self) -> Result<bool, Self::Error>;

    /// Read the current point in raw sensor units.
    fn sample(&mut self) -> Result<RawTouch, Self::Error>;
}

impl<T: TouchSensor> TouchSensor for &mut T {
    type Error = T::Error;

    fn is_touching(&mut self) -> Result<bool, Self::Error> {
        (**self).is_touching()
    }

    fn sample(&mut self) -> Result<RawTouch, Self::Error> {
        (**self).sample()
    }
}
