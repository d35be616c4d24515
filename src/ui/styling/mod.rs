//! Styling for widgets
//!
//! - [`colors`] - RGB565 helpers, dark/light color pairs and shading
//! - [`text`] - mono font measurement and non-destructive fitting

pub mod colors;
pub mod text;

use embedded_graphics::mono_font::{MonoFont, ascii::FONT_6X10};

pub use colors::{
    ACCENT, BACKGROUND_DARK, BACKGROUND_LIGHT, BLACK, CONTROL_DARK, CONTROL_LIGHT, ColorMode,
    ColorPair, DISABLED_TEXT, WHITE, WidgetColors, adjust_brightness, rgb565, to_raw,
};
pub use text::{fit_text, measure_text_width, text_height};

/// Font used by widgets that were not given one.
pub const DEFAULT_FONT: &MonoFont<'static> = &FONT_6X10;
