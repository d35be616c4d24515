// src/ui/components/image.rs
//! Bitmap widget

use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::touch::TouchPoint;
use crate::ui::core::{Control, TouchResult, WidgetBase, WidgetEvent, WidgetKind};
use crate::ui::styling::{ColorMode, WidgetColors};

/// Raw big-endian RGB565 bitmap, two bytes per pixel, rows packed.
///
/// Height is derived from the data length; a trailing partial row is not
/// drawn.
#[derive(Debug)]
pub struct ImageWidget {
    base: WidgetBase,
    data: &'static [u8],
}

impl ImageWidget {
    pub fn new(position: Point, data: &'static [u8], width: u32) -> Self {
        let row_bytes = width as usize * 2;
        let height = if row_bytes == 0 {
            0
        } else {
            (data.len() / row_bytes) as u32
        };
        Self {
            base: WidgetBase::new(
                Rectangle::new(position, Size::new(width, height)),
                WidgetColors::on_background(),
            ),
            data,
        }
    }

    pub fn data(&self) -> &'static [u8] {
        self.data
    }
}

impl Control for ImageWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Image
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
        _mode: ColorMode,
    ) -> Result<(), D::Error> {
        let size = self.base.bounds().size;
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }
        let used = (size.width * size.height * 2) as usize;
        let raw = ImageRaw::<Rgb565>::new(&self.data[..used], size.width);
        Image::new(&raw, self.base.bounds().top_left).draw(display)?;
        Ok(())
    }
}
