// src/ui/components/checkbox.rs
//! Two-state check box with a trailing label

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::shapes;
use crate::touch::TouchPoint;
use crate::ui::core::{Control, TouchResult, WidgetBase, WidgetEvent, WidgetKind};
use crate::ui::styling::{ColorMode, DISABLED_TEXT, WidgetColors, text_height};

/// Edge length of the box, in pixels.
pub const BOX_SIZE: u32 = 16;

/// Offset of the label from the left edge of the box.
const LABEL_OFFSET: i32 = 22;

#[derive(Debug)]
pub struct CheckBox {
    base: WidgetBase,
    checked: bool,
}

impl CheckBox {
    /// Check box at `position`. Only the box itself is touch sensitive.
    pub fn new(position: Point, text: &str) -> Self {
        Self {
            base: WidgetBase::new(
                Rectangle::new(position, Size::new(BOX_SIZE, BOX_SIZE)),
                WidgetColors::default(),
            )
            .with_text(text),
            checked: false,
        }
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

impl Control for CheckBox {
    fn kind(&self) -> WidgetKind {
        WidgetKind::CheckBox
    }

    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn on_click(&mut self, _point: TouchPoint) -> TouchResult {
        self.checked = !self.checked;
        TouchResult::Event(WidgetEvent::Toggled(self.checked))
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ColorMode,
    ) -> Result<(), D::Error> {
        let colors = self.base.colors(mode);
        let (x, y) = (self.base.x(), self.base.y());
        let size = BOX_SIZE as i32;

        shapes::fill_rect(display, x, y, size, size, colors.back)?;
        shapes::stroke_rect(display, x, y, size, size, colors.fore)?;

        // Hook, two pixels thick
        if self.checked {
            let p = |dx: i32, dy: i32| Point::new(x + dx, y + dy);
            shapes::line(display, p(2, 7), p(6, 11), colors.fore)?;
            shapes::line(display, p(3, 7), p(6, 10), colors.fore)?;
            shapes::line(display, p(7, 9), p(12, 4), colors.fore)?;
            shapes::line(display, p(7, 10), p(13, 4), colors.fore)?;
        }

        // The label sits on the window background, so it uses the text color
        // of the mode rather than the box face.
        let text_color = if self.base.is_enabled() {
            mode_text_color(mode)
        } else {
            DISABLED_TEXT
        };
        let text_h = text_height(self.base.font()) as i32;
        shapes::text(
            display,
            self.base.text(),
            Point::new(x + LABEL_OFFSET, y + (size - text_h) / 2 + 1),
            self.base.font(),
            text_color,
        )
    }
}

fn mode_text_color(mode: ColorMode) -> Rgb565 {
    WidgetColors::on_background().resolve(mode).fore
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingSurface;
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use core::cell::Cell;

    #[test]
    fn test_toggles_on_each_claim() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let mut checkbox = CheckBox::new(Point::new(10, 70), "Enable");
        checkbox.set_on_click(Box::new(move || seen.set(seen.get() + 1)));

        let touch = TouchPoint::new(18, 78, 1);
        assert_eq!(
            checkbox.check_touched(touch),
            TouchResult::Event(WidgetEvent::Toggled(true))
        );
        assert!(checkbox.checked());
        assert_eq!(
            checkbox.check_touched(touch),
            TouchResult::Event(WidgetEvent::Toggled(false))
        );
        assert!(!checkbox.checked());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_label_is_not_touch_sensitive() {
        let mut checkbox = CheckBox::new(Point::new(10, 70), "Enable");
        assert!(!checkbox.check_touched(TouchPoint::new(40, 78, 1)).is_claimed());
        assert!(!checkbox.checked());
    }

    #[test]
    fn test_set_checked_draws_hook() {
        let mut checkbox = CheckBox::new(Point::new(0, 0), "");
        let hook = Point::new(4, 9);

        let mut empty = RecordingSurface::new(Size::new(20, 20));
        checkbox.draw(&mut empty, ColorMode::Light).unwrap();
        assert_eq!(empty.pixel(hook), Some(checkbox.base().back_color(ColorMode::Light)));

        checkbox.set_checked(true);
        let mut ticked = RecordingSurface::new(Size::new(20, 20));
        checkbox.draw(&mut ticked, ColorMode::Light).unwrap();
        assert_eq!(ticked.pixel(hook), Some(checkbox.base().fore_color(ColorMode::Light)));
    }
}
