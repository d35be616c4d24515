//! Color definitions and dark/light color pairs
//!
//! Colors are RGB565 throughout, matching the 16-bit TFT panels this toolkit
//! drives.
//!
//! # RGB565 Format
//! - Red: 5 bits (0-31)
//! - Green: 6 bits (0-63)
//! - Blue: 5 bits (0-31)
//!
//! Packed 16-bit literals (`0xF79E`) convert with [`rgb565`].

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use serde::{Deserialize, Serialize};

/// Unpack a 16-bit RGB565 value.
pub const fn rgb565(raw: u16) -> Rgb565 {
    Rgb565::new(
        ((raw >> 11) & 0x1F) as u8,
        ((raw >> 5) & 0x3F) as u8,
        (raw & 0x1F) as u8,
    )
}

/// Pack a color into its 16-bit representation.
pub fn to_raw(color: Rgb565) -> u16 {
    color.into_storage()
}

// ============================================================================
// Base Colors
// ============================================================================

pub const WHITE: Rgb565 = rgb565(0xFFFF);
pub const BLACK: Rgb565 = rgb565(0x0000);

/// Default control face in light mode - warm light gray
pub const CONTROL_LIGHT: Rgb565 = rgb565(0xF79E);

/// Default control face in dark mode - charcoal
pub const CONTROL_DARK: Rgb565 = rgb565(0x3186);

/// Text drawn on a disabled control
pub const DISABLED_TEXT: Rgb565 = rgb565(0xA534);

/// Accent used for filled gauges and selections
pub const ACCENT: Rgb565 = rgb565(0x041F);

/// Window background in light mode
pub const BACKGROUND_LIGHT: Rgb565 = WHITE;

/// Window background in dark mode
pub const BACKGROUND_DARK: Rgb565 = BLACK;

// ============================================================================
// Color mode
// ============================================================================

/// Which half of a widget's color pair is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    pub fn from_dark(dark: bool) -> Self {
        if dark { ColorMode::Dark } else { ColorMode::Light }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, ColorMode::Dark)
    }

    pub fn background(self) -> Rgb565 {
        match self {
            ColorMode::Light => BACKGROUND_LIGHT,
            ColorMode::Dark => BACKGROUND_DARK,
        }
    }
}

/// Foreground and background of one widget in one mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub fore: Rgb565,
    pub back: Rgb565,
}

impl ColorPair {
    pub const fn new(fore: Rgb565, back: Rgb565) -> Self {
        Self { fore, back }
    }
}

/// A widget's colors for both modes.
///
/// The window decides which mode is active and passes it to every draw call,
/// so all widgets of a window always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetColors {
    pub light: ColorPair,
    pub dark: ColorPair,
}

impl Default for WidgetColors {
    fn default() -> Self {
        Self {
            light: ColorPair::new(BLACK, CONTROL_LIGHT),
            dark: ColorPair::new(WHITE, CONTROL_DARK),
        }
    }
}

impl WidgetColors {
    pub const fn new(light: ColorPair, dark: ColorPair) -> Self {
        Self { light, dark }
    }

    /// Colors for widgets that draw straight onto the window background.
    pub fn on_background() -> Self {
        Self {
            light: ColorPair::new(BLACK, BACKGROUND_LIGHT),
            dark: ColorPair::new(WHITE, BACKGROUND_DARK),
        }
    }

    pub fn resolve(&self, mode: ColorMode) -> ColorPair {
        match mode {
            ColorMode::Light => self.light,
            ColorMode::Dark => self.dark,
        }
    }

    pub fn set(&mut self, mode: ColorMode, pair: ColorPair) {
        match mode {
            ColorMode::Light => self.light = pair,
            ColorMode::Dark => self.dark = pair,
        }
    }
}

// ============================================================================
// Shading
// ============================================================================

/// Brighten (positive) or darken (negative) a color.
///
/// Each channel is shifted on an 8-bit scale and saturates at black/white,
/// which is how pressed and bevelled faces are shaded.
pub fn adjust_brightness(color: Rgb565, delta: i16) -> Rgb565 {
    fn channel(value: u8, scale: u8, delta: i16) -> u8 {
        let eight_bit = (value << scale) as i16;
        ((eight_bit + delta).clamp(0, 255) as u8) >> scale
    }

    Rgb565::new(
        channel(color.r(), 3, delta),
        channel(color.g(), 2, delta),
        channel(color.b(), 3, delta),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb565_unpacks_channels() {
        let color = rgb565(0xF79E);
        assert_eq!(color.r(), 30);
        assert_eq!(color.g(), 60);
        assert_eq!(color.b(), 30);
        assert_eq!(to_raw(color), 0xF79E);
    }

    #[test]
    fn test_adjust_brightness_saturates() {
        assert_eq!(adjust_brightness(WHITE, 40), WHITE);
        assert_eq!(adjust_brightness(BLACK, -40), BLACK);
    }

    #[test]
    fn test_darkening_lowers_every_channel() {
        let pressed = adjust_brightness(CONTROL_LIGHT, -40);
        assert!(pressed.r() < CONTROL_LIGHT.r());
        assert!(pressed.g() < CONTROL_LIGHT.g());
        assert!(pressed.b() < CONTROL_LIGHT.b());
    }

    #[test]
    fn test_pair_resolution_follows_mode() {
        let colors = WidgetColors::default();
        assert_eq!(colors.resolve(ColorMode::Light).fore, BLACK);
        assert_eq!(colors.resolve(ColorMode::Dark).fore, WHITE);
    }
}
