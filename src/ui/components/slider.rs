// src/ui/components/slider.rs
//! Horizontal slider

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use super::shapes;
use crate::touch::TouchPoint;
use crate::ui::core::{Control, TouchResult, WidgetBase, WidgetEvent, WidgetKind};
use crate::ui::styling::{ColorMode, WidgetColors, adjust_brightness};

/// Horizontal slider over `[min, max]`.
///
/// A touch sets the value from the horizontal offset into the track:
/// `(max - min) / width * (touch_x - x)`. The offset is not shifted by `min`,
/// so a range that does not start at zero reads as if it did.
///
/// Sliders are dragged, so after one claims a touch the window samples again
/// at the short debounce interval.
#[derive(Debug)]
pub struct Slider {
    base: WidgetBase,
    min: f32,
    max: f32,
    value: f32,
}

impl Slider {
    pub fn new(bounds: Rectangle, min: f32, max: f32) -> Self {
        Self {
            base: WidgetBase::new(bounds, WidgetColors::default()),
            min,
            max,
            value: min,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Set the value. Values outside `[min, max]` are ignored.
    pub fn set_value(&mut self, value: f32) {
        if value >= self.min && value <= self.max {
            self.value = value;
        }
    }

    /// Horizontal center of the knob.
    fn knob_x(&self) -> i32 {
        let w = self.base.width() as i32;
        let h = self.base.height() as i32;
        let span = self.max - self.min;
        let travel = if span > 0.0 {
            (w - h / 2) as f32 / span * self.value
        } else {
            0.0
        };
        self.base.x() + h / 2 + travel as i32
    }
}

impl Control for Slider {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Slider
    }

    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn on_click(&mut self, point: TouchPoint) -> TouchResult {
        let width = self.base.width();
        if width > 0 {
            let offset = (point.x - self.base.x()) as f32;
            self.value = (self.max - self.min) / width as f32 * offset;
        }
        TouchResult::Event(WidgetEvent::ValueChanged(self.value))
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ColorMode,
    ) -> Result<(), D::Error> {
        let back = self.base.back_color(mode);
        let (x, y) = (self.base.x(), self.base.y());
        let (w, h) = (self.base.width() as i32, self.base.height() as i32);
        let radius = (h / 4).max(0) as u32;

        // Track
        shapes::round_rect(
            display,
            x,
            y + h / 4,
            w,
            h / 2,
            radius,
            PrimitiveStyle::with_fill(back),
        )?;
        shapes::round_rect(
            display,
            x,
            y + h / 4,
            w,
            h / 2,
            radius,
            PrimitiveStyle::with_stroke(adjust_brightness(back, -55), 1),
        )?;

        // Knob
        let center = Point::new(self.knob_x(), y + h / 2);
        let knob_shade = if self.base.is_touched() { -21 } else { -11 };
        shapes::circle(
            display,
            center,
            h / 2,
            PrimitiveStyle::with_fill(adjust_brightness(back, knob_shade)),
        )?;
        shapes::circle(
            display,
            center,
            h / 2 - 1,
            PrimitiveStyle::with_stroke(adjust_brightness(back, 11), 1),
        )?;
        shapes::circle(
            display,
            center,
            h / 2,
            PrimitiveStyle::with_stroke(adjust_brightness(back, -55), 1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingSurface;

    fn slider() -> Slider {
        Slider::new(Rectangle::new(Point::new(10, 100), Size::new(200, 20)), 0.0, 100.0)
    }

    #[test]
    fn test_starts_at_min() {
        let slider = Slider::new(Rectangle::new(Point::zero(), Size::new(100, 20)), 5.0, 50.0);
        assert_eq!(slider.value(), 5.0);
    }

    #[test]
    fn test_touch_sets_value_from_offset() {
        let mut slider = slider();
        let result = slider.check_touched(TouchPoint::new(110, 110, 1));
        assert_eq!(result, TouchResult::Event(WidgetEvent::ValueChanged(50.0)));
        assert_eq!(slider.value(), 50.0);

        slider.check_touched(TouchPoint::new(10, 110, 1));
        assert_eq!(slider.value(), 0.0);

        slider.check_touched(TouchPoint::new(210, 110, 1));
        assert_eq!(slider.value(), 100.0);
    }

    #[test]
    fn test_set_value_rejects_out_of_range() {
        let mut slider = slider();
        slider.set_value(42.0);
        assert_eq!(slider.value(), 42.0);
        slider.set_value(150.0);
        assert_eq!(slider.value(), 42.0);
        slider.set_value(-1.0);
        assert_eq!(slider.value(), 42.0);
        slider.set_value(100.0);
        assert_eq!(slider.value(), 100.0);
    }

    #[test]
    fn test_knob_follows_value() {
        let mut slider = slider();
        let mut surface = RecordingSurface::new(Size::new(240, 140));
        slider.draw(&mut surface, ColorMode::Light).unwrap();
        let at_min = slider.knob_x();

        slider.set_value(100.0);
        slider.draw(&mut surface, ColorMode::Light).unwrap();
        assert_eq!(at_min, 20);
        assert_eq!(slider.knob_x(), 20 + 190);
    }

    #[test]
    fn test_is_continuous_kind() {
        assert!(slider().kind().is_continuous());
    }
}
