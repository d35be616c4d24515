//! Retained-mode widget toolkit for resistive touch TFT displays
//!
//! The crate owns the part of a touchscreen UI that is independent of the
//! display controller and touch chip: mapping raw touch readings to pixels,
//! debouncing them, deciding which widget a touch belongs to, and repainting
//! every widget each frame.
//!
//! It is `#![no_std]` with `extern crate alloc` so it runs on microcontrollers
//! and on desktop hosts (for the simulator and tests) alike.
//!
//! ```ignore
//! let mut window: Window<_, _> = Window::new(
//!     BufferedDisplay::new(panel),
//!     touch,
//!     EmbassyClock,
//!     WindowConfig::default(),
//! );
//! let ok = window.add_widget(Button::new(bounds, "OK"))?;
//! loop {
//!     let report = window.update()?;
//!     if report.claim.is_some_and(|claim| claim.id == ok) {
//!         // ...
//!     }
//! }
//! ```

#![no_std]

extern crate alloc;

pub mod clock;
pub mod config;
pub mod display;
pub mod framebuffer;
pub mod touch;
pub mod ui;
pub mod window;

#[cfg(test)]
mod test_support;

pub use clock::{Clock, EmbassyClock};
pub use config::{CalibrationBounds, ConfigError, DebounceConfig, MAX_WIDGETS, WindowConfig};
pub use display::{BufferedDisplay, DisplaySurface};
pub use touch::{CalibrationStep, CalibrationWizard, RawTouch, TouchPoint, TouchSensor};
pub use window::{Claim, FrameReport, UpdateError, Window, WindowError};
