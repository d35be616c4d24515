//! Host-side doubles for the display, touch sensor and clock.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::cell::Cell;
use core::convert::Infallible;
use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::clock::Clock;
use crate::display::DisplaySurface;
use crate::touch::{RawTouch, TouchSensor};

/// In-memory panel that remembers every pixel it was sent.
pub struct RecordingSurface {
    size: Size,
    pixels: Vec<Option<Rgb565>>,
    written: usize,
    commits: usize,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![None; (size.width * size.height) as usize],
            written: 0,
            commits: 0,
        }
    }

    /// Pixels drawn inside the surface since creation or the last reset.
    pub fn pixels_written(&self) -> usize {
        self.written
    }

    pub fn commits(&self) -> usize {
        self.commits
    }

    pub fn reset_counters(&mut self) {
        self.written = 0;
        self.commits = 0;
    }

    /// Last color sent to `point`, `None` if it was never drawn.
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.index(point).and_then(|i| self.pixels[i])
    }

    /// Colors of every pixel that has been drawn.
    pub fn colors(&self) -> impl Iterator<Item = Rgb565> + '_ {
        self.pixels.iter().flatten().copied()
    }

    fn index(&self, point: Point) -> Option<usize> {
        let (w, h) = (self.size.width as i32, self.size.height as i32);
        (point.x >= 0 && point.y >= 0 && point.x < w && point.y < h)
            .then(|| (point.y * w + point.x) as usize)
    }
}

impl OriginDimensions for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for RecordingSurface {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point) {
                self.pixels[i] = Some(color);
                self.written += 1;
            }
        }
        Ok(())
    }
}

impl DisplaySurface for RecordingSurface {
    fn commit_frame(&mut self) -> Result<(), Self::Error> {
        self.commits += 1;
        Ok(())
    }
}

/// Failure reported by [`ScriptedSensor`] when told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorFault;

/// Touch sensor whose state is set by the test.
#[derive(Debug, Default)]
pub struct ScriptedSensor {
    current: Option<RawTouch>,
    failing: bool,
    samples: usize,
}

impl ScriptedSensor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold the panel down at a raw position with pressure 1.
    pub fn press(&mut self, x: i32, y: i32) {
        self.current = Some(RawTouch::new(x, y, 1));
    }

    pub fn release(&mut self) {
        self.current = None;
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Number of successful samples taken.
    pub fn samples(&self) -> usize {
        self.samples
    }
}

impl TouchSensor for ScriptedSensor {
    type Error = SensorFault;

    fn is_touching(&mut self) -> Result<bool, Self::Error> {
        if self.failing {
            return Err(SensorFault);
        }
        Ok(self.current.is_some())
    }

    fn sample(&mut self) -> Result<RawTouch, Self::Error> {
        if self.failing {
            return Err(SensorFault);
        }
        self.samples += 1;
        Ok(self.current.unwrap_or_default())
    }
}

/// Clock advanced by hand.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, millis: u64) {
        self.millis.set(self.millis.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        Instant::from_millis(self.millis.get())
    }
}
