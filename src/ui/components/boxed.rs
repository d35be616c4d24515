// src/ui/components/boxed.rs
//! Plain filled rectangle

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::shapes;
use crate::touch::TouchPoint;
use crate::ui::core::{Control, TouchResult, WidgetBase, WidgetEvent, WidgetKind};
use crate::ui::styling::{ColorMode, WidgetColors};

/// Filled rectangle with a one pixel border in the foreground color, used to
/// group or frame other widgets. Register it before the widgets it frames.
#[derive(Debug)]
pub struct BoxWidget {
    base: WidgetBase,
}

impl BoxWidget {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            base: WidgetBase::new(bounds, WidgetColors::default()),
        }
    }
}

impl Control for BoxWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Box
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
        shapes::stroke_rect(display, x, y, w, h, colors.fore)
    }
}
