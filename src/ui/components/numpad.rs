// src/ui/components/numpad.rs
//! Floating numeric keypad

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use super::shapes;
use crate::touch::TouchPoint;
use crate::ui::core::{Control, TouchResult, WidgetBase, WidgetEvent, WidgetKind};
use crate::ui::styling::{
    ColorMode, WidgetColors, adjust_brightness, measure_text_width, text_height,
};

/// A key on the [`NumPad`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumPadKey {
    /// Digit `0..=9`
    Digit(u8),
    Point,
    Backspace,
    Close,
}

impl NumPadKey {
    /// Text the key produces when typed, if any.
    pub fn as_char(self) -> Option<char> {
        match self {
            NumPadKey::Digit(d) => char::from_digit(d as u32, 10),
            NumPadKey::Point => Some('.'),
            NumPadKey::Backspace | NumPadKey::Close => None,
        }
    }

    /// Label drawn on the key.
    pub fn label(self) -> &'static str {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        match self {
            NumPadKey::Digit(d) => DIGITS.get(d as usize).copied().unwrap_or("?"),
            NumPadKey::Point => ".",
            NumPadKey::Backspace => "<-",
            NumPadKey::Close => "X",
        }
    }
}

const ROWS: [&[NumPadKey]; 3] = [
    &[
        NumPadKey::Digit(1),
        NumPadKey::Digit(2),
        NumPadKey::Digit(3),
        NumPadKey::Digit(4),
        NumPadKey::Digit(5),
    ],
    &[
        NumPadKey::Digit(6),
        NumPadKey::Digit(7),
        NumPadKey::Digit(8),
        NumPadKey::Digit(9),
        NumPadKey::Digit(0),
    ],
    &[NumPadKey::Point, NumPadKey::Backspace, NumPadKey::Close],
];

/// Numeric keypad overlay.
///
/// Created hidden (disabled); [`open`](NumPad::open) shows it. While shown it
/// is prioritized over every other widget. Digit, point and backspace keys are
/// reported through [`clicked_value`](NumPad::clicked_value) and the click
/// handler. The close key hides the keypad again and notifies nobody.
#[derive(Debug)]
pub struct NumPad {
    base: WidgetBase,
    clicked: Option<NumPadKey>,
}

impl NumPad {
    /// Keypad covering `bounds`, usually the full display width.
    pub fn new(bounds: Rectangle) -> Self {
        let mut base = WidgetBase::new(bounds, WidgetColors::default());
        base.set_enabled(false);
        Self {
            base,
            clicked: None,
        }
    }

    pub fn open(&mut self) {
        self.clicked = None;
        self.base.set_enabled(true);
    }

    pub fn is_open(&self) -> bool {
        self.base.is_enabled()
    }

    /// Last key reported to the host.
    pub fn clicked_value(&self) -> Option<NumPadKey> {
        self.clicked
    }

    fn row_height(&self) -> i32 {
        self.base.height() as i32 / ROWS.len() as i32
    }

    /// Cell rectangle of `col` in `row`.
    fn cell(&self, row: usize, col: usize) -> Rectangle {
        let keys = ROWS[row].len() as i32;
        let w = self.base.width() as i32;
        let row_h = self.row_height();
        let left = self.base.x() + w * col as i32 / keys;
        let right = self.base.x() + w * (col as i32 + 1) / keys;
        Rectangle::new(
            Point::new(left, self.base.y() + row_h * row as i32),
            Size::new((right - left).max(0) as u32, row_h.max(0) as u32),
        )
    }

    fn key_at(&self, point: TouchPoint) -> Option<NumPadKey> {
        let w = self.base.width() as i32;
        let row_h = self.row_height();
        if w <= 0 || row_h <= 0 {
            return None;
        }
        let dx = point.x - self.base.x();
        let dy = point.y - self.base.y();
        let row = (dy / row_h).clamp(0, ROWS.len() as i32 - 1) as usize;
        let keys = ROWS[row];
        let col = (dx * keys.len() as i32 / w).clamp(0, keys.len() as i32 - 1) as usize;
        Some(keys[col])
    }
}

impl Control for NumPad {
    fn kind(&self) -> WidgetKind {
        WidgetKind::NumPad
    }

    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn is_prioritized(&self) -> bool {
        self.base.is_enabled()
    }

    fn on_click(&mut self, point: TouchPoint) -> TouchResult {
        match self.key_at(point) {
            Some(NumPadKey::Close) => {
                self.base.set_enabled(false);
                TouchResult::Handled
            }
            Some(key) => {
                self.clicked = Some(key);
                TouchResult::Event(WidgetEvent::Key(key))
            }
            None => TouchResult::Handled,
        }
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ColorMode,
    ) -> Result<(), D::Error> {
        let colors = self.base.colors(mode);
        let font = self.base.font();
        let text_h = text_height(font) as i32;

        shapes::fill_rect(
            display,
            self.base.x(),
            self.base.y(),
            self.base.width() as i32,
            self.base.height() as i32,
            adjust_brightness(colors.back, -20),
        )?;

        for (row, keys) in ROWS.iter().enumerate() {
            for (col, key) in keys.iter().enumerate() {
                let cell = self.cell(row, col);
                let (x, y) = (cell.top_left.x, cell.top_left.y);
                let (w, h) = (cell.size.width as i32, cell.size.height as i32);

                shapes::round_rect(
                    display,
                    x + 1,
                    y + 1,
                    w - 2,
                    h - 2,
                    3,
                    PrimitiveStyle::with_fill(colors.back),
                )?;
                shapes::round_rect(
                    display,
                    x + 1,
                    y + 1,
                    w - 2,
                    h - 2,
                    3,
                    PrimitiveStyle::with_stroke(adjust_brightness(colors.back, -55), 1),
                )?;

                let label = key.label();
                let text_w = measure_text_width(font, label) as i32;
                shapes::text(
                    display,
                    label,
                    Point::new(x + (w - text_w) / 2, y + (h - text_h) / 2 + 1),
                    font,
                    colors.fore,
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use core::cell::Cell;

    // 300x90: rows 30 px high, 60 px keys on the digit rows, 100 px below
    fn numpad() -> NumPad {
        let mut numpad = NumPad::new(Rectangle::new(Point::new(10, 100), Size::new(300, 90)));
        numpad.open();
        numpad
    }

    fn touch(x: i32, y: i32) -> TouchPoint {
        TouchPoint::new(x, y, 1)
    }

    #[test]
    fn test_starts_hidden() {
        let mut numpad = NumPad::new(Rectangle::new(Point::zero(), Size::new(300, 90)));
        assert!(!numpad.is_open());
        assert!(!numpad.is_prioritized());
        assert!(!numpad.check_touched(touch(30, 15)).is_claimed());
    }

    #[test]
    fn test_keys_map_to_cells() {
        let mut numpad = numpad();
        let cases = [
            (touch(15, 105), NumPadKey::Digit(1)),
            (touch(305, 105), NumPadKey::Digit(5)),
            (touch(75, 135), NumPadKey::Digit(7)),
            (touch(300, 140), NumPadKey::Digit(0)),
            (touch(20, 170), NumPadKey::Point),
            (touch(160, 170), NumPadKey::Backspace),
        ];
        for (point, key) in cases {
            assert_eq!(
                numpad.check_touched(point),
                TouchResult::Event(WidgetEvent::Key(key))
            );
            assert_eq!(numpad.clicked_value(), Some(key));
        }
    }

    #[test]
    fn test_close_hides_without_notifying() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let mut numpad = numpad();
        numpad.set_on_click(Box::new(move || seen.set(seen.get() + 1)));

        numpad.check_touched(touch(15, 105));
        assert_eq!(calls.get(), 1);

        assert_eq!(numpad.check_touched(touch(290, 175)), TouchResult::Handled);
        assert_eq!(calls.get(), 1);
        assert!(!numpad.is_open());
        assert!(!numpad.is_prioritized());
    }

    #[test]
    fn test_key_text() {
        assert_eq!(NumPadKey::Digit(7).as_char(), Some('7'));
        assert_eq!(NumPadKey::Point.as_char(), Some('.'));
        assert_eq!(NumPadKey::Backspace.as_char(), None);
        assert_eq!(NumPadKey::Digit(0).label(), "0");
    }
}
