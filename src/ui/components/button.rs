// src/ui/components/button.rs
//! Push button with a bevelled two-tone face

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use super::shapes;
use crate::touch::TouchPoint;
use crate::ui::core::{ClickHandler, Control, TouchResult, WidgetBase, WidgetEvent, WidgetKind};
use crate::ui::styling::{
    ColorMode, DISABLED_TEXT, WidgetColors, adjust_brightness, fit_text, measure_text_width,
    text_height,
};

/// Horizontal room reserved around the label.
const TEXT_MARGIN: u32 = 8;

/// How much darker the face gets while pressed.
const PRESSED_SHADE: i16 = -40;

/// Button component
///
/// Fires its click handler once per accepted touch. The only visual state is
/// the pressed look for the cycle in which the touch landed.
///
/// # Examples
/// ```ignore
/// let button = Button::new(
///     Rectangle::new(Point::new(10, 10), Size::new(100, 40)),
///     "Start",
/// )
/// .with_on_click(Box::new(|| info!("start pressed")));
/// ```
#[derive(Debug)]
pub struct Button {
    base: WidgetBase,
}

impl Button {
    pub fn new(bounds: Rectangle, text: &str) -> Self {
        Self {
            base: WidgetBase::new(bounds, WidgetColors::default()).with_text(text),
        }
    }

    pub fn with_on_click(mut self, handler: ClickHandler) -> Self {
        self.base.set_on_click(handler);
        self
    }

    /// The part of the label that fits the button face.
    pub fn visible_text(&self) -> &str {
        let room = self.base.width().saturating_sub(TEXT_MARGIN);
        fit_text(self.base.font(), self.base.text(), room)
    }
}

impl Control for Button {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Button
    }

    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn on_click(&mut self, _point: TouchPoint) -> TouchResult {
        TouchResult::Event(WidgetEvent::Clicked)
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ColorMode,
    ) -> Result<(), D::Error> {
        let colors = self.base.colors(mode);
        let (x, y) = (self.base.x(), self.base.y());
        let (w, h) = (self.base.width() as i32, self.base.height() as i32);
        let darken = if self.base.is_touched() { PRESSED_SHADE } else { 0 };
        let shade = |delta: i16| adjust_brightness(colors.back, delta + darken);

        // Upper and lower halves of the face
        shapes::fill_rect(display, x + 2, y + 2, w - 4, h / 2 - 2, shade(0))?;
        shapes::fill_rect(display, x + 2, y + h / 2, w - 4, h / 2 - 2, shade(-25))?;

        // Transition between the halves
        shapes::line(
            display,
            Point::new(x + 2, y + h / 2),
            Point::new(x + w - 2, y + h / 2),
            shade(-8),
        )?;
        shapes::line(
            display,
            Point::new(x + 2, y + 1 + h / 2),
            Point::new(x + w - 2, y + 1 + h / 2),
            shade(-16),
        )?;

        // Inner and outer border
        shapes::round_rect(
            display,
            x + 1,
            y + 1,
            w - 2,
            h - 2,
            2,
            PrimitiveStyle::with_stroke(shade(11), 1),
        )?;
        shapes::round_rect(
            display,
            x,
            y,
            w,
            h,
            3,
            PrimitiveStyle::with_stroke(shade(-55), 1),
        )?;

        let label = self.visible_text();
        let font = self.base.font();
        let text_w = measure_text_width(font, label) as i32;
        let text_h = text_height(font) as i32;
        let text_color = if self.base.is_enabled() {
            colors.fore
        } else {
            DISABLED_TEXT
        };
        shapes::text(
            display,
            label,
            Point::new(x + w / 2 - text_w / 2, y + (h - text_h) / 2 + 1),
            font,
            text_color,
        )
    }
}
