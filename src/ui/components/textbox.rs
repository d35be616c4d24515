// src/ui/components/textbox.rs
//! Single line text display that accumulates input

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::shapes;
use crate::touch::TouchPoint;
use crate::ui::core::{Control, TouchResult, WidgetBase, WidgetEvent, WidgetKind};
use crate::ui::styling::{ColorMode, WidgetColors, adjust_brightness, fit_text, text_height};

/// Text box fed by a keypad or by the host.
///
/// When the text is wider than the box the end is shown, so the most recent
/// input stays visible. The stored text is never shortened for display.
#[derive(Debug)]
pub struct TextBox {
    base: WidgetBase,
}

impl TextBox {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            base: WidgetBase::new(bounds, WidgetColors::default()),
        }
    }

    /// Append text. Input beyond the buffer capacity is dropped.
    pub fn add_text(&mut self, text: &str) {
        self.base.push_text(text);
    }

    /// Remove the last character, if any.
    pub fn remove_last(&mut self) -> Option<char> {
        self.base.pop_char()
    }

    pub fn clear(&mut self) {
        self.base.clear_text();
    }

    /// The suffix of the text that fits the box.
    pub fn visible_text(&self) -> &str {
        let text = self.base.text();
        let room = self.base.width().saturating_sub(8);
        let fits = fit_text(self.base.font(), text, room).chars().count();
        let skip = text.chars().count() - fits;
        match text.char_indices().nth(skip) {
            Some((start, _)) => &text[start..],
            None => "",
        }
    }
}

impl Control for TextBox {
    fn kind(&self) -> WidgetKind {
        WidgetKind::TextBox
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

        shapes::fill_rect(display, x, y, w, h, colors.back)?;
        shapes::stroke_rect(display, x, y, w, h, adjust_brightness(colors.back, -55))?;

        let text_h = text_height(self.base.font()) as i32;
        shapes::text(
            display,
            self.visible_text(),
            Point::new(x + 4, y + (h - text_h) / 2 + 1),
            self.base.font(),
            colors.fore,
        )
    }
}
