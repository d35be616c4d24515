// src/ui/components/label.rs
//! Static text

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::shapes;
use crate::touch::TouchPoint;
use crate::ui::core::{
    Control, TouchResult, WidgetBase, WidgetEvent, WidgetKind, contains_inclusive,
};
use crate::ui::styling::{ColorMode, DISABLED_TEXT, WidgetColors, measure_text_width, text_height};

/// A line of text drawn on the window background.
///
/// The size always follows the current text and font, so changing either
/// moves the hit area with it.
#[derive(Debug)]
pub struct Label {
    base: WidgetBase,
}

impl Label {
    pub fn new(position: Point, text: &str, font: &'static MonoFont<'static>) -> Self {
        let mut base = WidgetBase::new(
            Rectangle::new(position, Size::zero()),
            WidgetColors::on_background(),
        )
        .with_text(text);
        base.set_font(font);
        Self { base }
    }

    fn measured_bounds(&self) -> Rectangle {
        let font = self.base.font();
        Rectangle::new(
            self.base.bounds().top_left,
            Size::new(
                measure_text_width(font, self.base.text()),
                text_height(font),
            ),
        )
    }
}

impl Control for Label {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Label
    }

    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn bounds(&self) -> Rectangle {
        self.measured_bounds()
    }

    fn hit_test(&self, point: TouchPoint) -> bool {
        contains_inclusive(&self.measured_bounds(), point)
    }

    fn on_click(&mut self, _point: TouchPoint) -> TouchResult {
        TouchResult::Event(WidgetEvent::Clicked)
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ColorMode,
    ) -> Result<(), D::Error> {
        let color = if self.base.is_enabled() {
            self.base.fore_color(mode)
        } else {
            DISABLED_TEXT
        };
        shapes::text(
            display,
            self.base.text(),
            self.base.bounds().top_left,
            self.base.font(),
            color,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingSurface;
    use crate::ui::styling::{BLACK, WHITE};
    use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};

    #[test]
    fn test_size_follows_text_and_font() {
        let mut label = Label::new(Point::new(5, 5), "Temp", &FONT_6X10);
        assert_eq!(label.bounds().size, Size::new(24, 10));

        label.set_text("Humidity");
        assert_eq!(label.bounds().size, Size::new(48, 10));

        label.set_font(&FONT_10X20);
        assert_eq!(label.bounds().size, Size::new(80, 20));
    }

    #[test]
    fn test_hit_area_is_the_text() {
        let mut label = Label::new(Point::new(5, 5), "Temp", &FONT_6X10);
        assert!(label.check_touched(TouchPoint::new(29, 15, 1)).is_claimed());
        assert!(!label.check_touched(TouchPoint::new(30, 15, 1)).is_claimed());
    }

    #[test]
    fn test_draws_in_mode_foreground() {
        let label = Label::new(Point::new(0, 0), "||||", &FONT_6X10);

        let mut light = RecordingSurface::new(Size::new(32, 16));
        label.draw(&mut light, ColorMode::Light).unwrap();
        assert!(light.pixels_written() > 0);
        assert!(light.colors().all(|c| c == BLACK));

        let mut dark = RecordingSurface::new(Size::new(32, 16));
        label.draw(&mut dark, ColorMode::Dark).unwrap();
        assert!(dark.colors().all(|c| c == WHITE));
    }
}
