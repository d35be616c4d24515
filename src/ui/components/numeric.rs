// src/ui/components/numeric.rs
//! Integer entry with an up/down spinner

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use core::fmt::Write;

use super::shapes;
use crate::touch::TouchPoint;
use crate::ui::core::{Control, TouchResult, WidgetBase, WidgetEvent, WidgetKind};
use crate::ui::styling::{ColorMode, WidgetColors, adjust_brightness, text_height};

pub const MIN_WIDTH: u32 = 48;
pub const MIN_HEIGHT: u32 = 24;

/// Numeric up/down control.
///
/// The value is shown on the left. A square spinner as tall as the control
/// sits at the right edge: touching its upper half adds the step, the lower
/// half subtracts it, clamped to `[min, max]`. Touches on the value area are
/// still claimed but leave the value alone.
#[derive(Debug)]
pub struct NumericUpDown {
    base: WidgetBase,
    min: i32,
    max: i32,
    value: i32,
    step: i32,
}

impl NumericUpDown {
    /// Bounds smaller than 48x24 are grown to that size.
    pub fn new(bounds: Rectangle, min: i32, max: i32) -> Self {
        let size = Size::new(
            bounds.size.width.max(MIN_WIDTH),
            bounds.size.height.max(MIN_HEIGHT),
        );
        Self {
            base: WidgetBase::new(Rectangle::new(bounds.top_left, size), WidgetColors::default()),
            min,
            max,
            value: min,
            step: 1,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Set the value. Values outside `[min, max]` are ignored.
    pub fn set_value(&mut self, value: i32) {
        if (self.min..=self.max).contains(&value) {
            self.value = value;
        }
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    /// Amount added or removed per spinner touch; at least 1.
    pub fn set_step(&mut self, step: i32) {
        self.step = step.max(1);
    }
}

impl Control for NumericUpDown {
    fn kind(&self) -> WidgetKind {
        WidgetKind::NumericUpDown
    }

    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn on_click(&mut self, point: TouchPoint) -> TouchResult {
        let w = self.base.width() as i32;
        let h = self.base.height() as i32;
        let dx = point.x - self.base.x();
        let dy = point.y - self.base.y();

        if dx < w - h || dx > w {
            return TouchResult::Event(WidgetEvent::Clicked);
        }

        self.value = if dy <= h / 2 {
            self.value.saturating_add(self.step).min(self.max)
        } else {
            self.value.saturating_sub(self.step).max(self.min)
        };
        TouchResult::Event(WidgetEvent::Stepped(self.value))
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ColorMode,
    ) -> Result<(), D::Error> {
        let colors = self.base.colors(mode);
        let (x, y) = (self.base.x(), self.base.y());
        let (w, h) = (self.base.width() as i32, self.base.height() as i32);
        let border = adjust_brightness(colors.back, -55);
        let button = adjust_brightness(colors.back, -8);

        shapes::fill_rect(display, x, y, w, h, colors.back)?;
        shapes::stroke_rect(display, x, y, w, h, border)?;
        shapes::stroke_rect(
            display,
            x + 1,
            y + 1,
            w - 2,
            h - 2,
            adjust_brightness(colors.back, -20),
        )?;

        let mut digits: String<12> = String::new();
        write!(&mut digits, "{}", self.value).ok();
        let text_h = text_height(self.base.font()) as i32;
        shapes::text(
            display,
            &digits,
            Point::new(x + 5, y + (h - text_h) / 2 + 1),
            self.base.font(),
            colors.fore,
        )?;

        let left = x + w - h;
        let p = |dx: i32, dy: i32| Point::new(left + dx, y + dy);

        // Up
        shapes::fill_rect(display, left, y, h, h / 2, button)?;
        shapes::stroke_rect(display, left, y, h, h / 2, border)?;
        shapes::fill_triangle(
            display,
            p(h / 2, h / 6),
            p(h - h / 3, h / 3),
            p(h / 3, h / 3),
            colors.fore,
        )?;

        // Down
        shapes::fill_rect(display, left, y + h / 2, h, h / 2, button)?;
        shapes::stroke_rect(display, left, y + h / 2, h, h / 2, border)?;
        shapes::fill_triangle(
            display,
            p(h / 2, h * 5 / 6),
            p(h - h / 3, h * 2 / 3),
            p(h / 3, h * 2 / 3),
            colors.fore,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spinner() -> NumericUpDown {
        NumericUpDown::new(Rectangle::new(Point::new(10, 10), Size::new(80, 30)), 0, 3)
    }

    #[test]
    fn test_minimum_size_is_enforced() {
        let numeric = NumericUpDown::new(Rectangle::new(Point::zero(), Size::new(20, 10)), 0, 9);
        assert_eq!(numeric.bounds().size, Size::new(48, 24));
    }

    #[test]
    fn test_upper_half_increments_and_clamps() {
        let mut numeric = spinner();
        let up = TouchPoint::new(80, 15, 1);
        for expected in [1, 2, 3, 3, 3] {
            assert_eq!(
                numeric.check_touched(up),
                TouchResult::Event(WidgetEvent::Stepped(expected))
            );
        }
        assert_eq!(numeric.value(), 3);
    }

    #[test]
    fn test_lower_half_decrements_and_clamps() {
        let mut numeric = spinner();
        numeric.set_value(2);
        let down = TouchPoint::new(80, 35, 1);
        numeric.check_touched(down);
        numeric.check_touched(down);
        numeric.check_touched(down);
        assert_eq!(numeric.value(), 0);
    }

    #[test]
    fn test_value_area_claims_without_change() {
        let mut numeric = spinner();
        assert_eq!(
            numeric.check_touched(TouchPoint::new(20, 20, 1)),
            TouchResult::Event(WidgetEvent::Clicked)
        );
        assert_eq!(numeric.value(), 0);
    }

    #[test]
    fn test_step_and_setter() {
        let mut numeric = NumericUpDown::new(Rectangle::new(Point::zero(), Size::new(80, 30)), 0, 100);
        numeric.set_step(0);
        assert_eq!(numeric.step(), 1);
        numeric.set_step(25);
        numeric.check_touched(TouchPoint::new(70, 5, 1));
        assert_eq!(numeric.value(), 25);

        numeric.set_value(101);
        assert_eq!(numeric.value(), 25);
        numeric.set_value(100);
        numeric.check_touched(TouchPoint::new(70, 5, 1));
        assert_eq!(numeric.value(), 100);
    }
}
