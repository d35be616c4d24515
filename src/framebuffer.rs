//! RAM framebuffer with frame-to-frame change detection.
//!
//! The window repaints every widget on every update, so drawing straight to an
//! SPI panel would resend the whole screen each frame. Instead all drawing
//! targets this back buffer. On commit the buffer is compared with the last
//! committed frame and only the bounding rectangle of changed pixels is pushed
//! to the hardware display in a single `fill_contiguous` call.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::trace;

/// Bounding box of pixels that differ from the last committed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl DirtyRect {
    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }

    /// The region as an embedded-graphics rectangle.
    pub fn to_rectangle(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.min_x as i32, self.min_y as i32),
            Size::new(self.width() as u32, self.height() as u32),
        )
    }
}

/// Double-buffered RGB565 framebuffer implementing `DrawTarget`.
///
/// `back` receives drawing; `front` mirrors what the hardware currently shows.
pub struct FrameBuffer {
    size: Size,
    back: Vec<Rgb565>,
    front: Vec<Rgb565>,
    /// Forces the next flush to push the whole screen.
    invalidated: bool,
}

impl FrameBuffer {
    /// Allocate a framebuffer of the given size filled with black pixels.
    pub fn new(size: Size) -> Self {
        let count = size.width as usize * size.height as usize;
        Self {
            size,
            back: vec![Rgb565::BLACK; count],
            front: vec![Rgb565::BLACK; count],
            invalidated: true,
        }
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.size.width as usize + x
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        let idx = self.index(x, y);
        self.back[idx] = color;
    }

    /// Colour of a pixel in the back buffer, if it lies on screen.
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as usize, point.y as usize);
        if x >= self.size.width as usize || y >= self.size.height as usize {
            return None;
        }
        Some(self.back[self.index(x, y)])
    }

    /// Mark the whole screen as changed, e.g. after the panel was reset.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Bounding rectangle of the pixels that differ from the committed frame.
    pub fn changed_region(&self) -> Option<DirtyRect> {
        if self.invalidated && self.size.width > 0 && self.size.height > 0 {
            return Some(DirtyRect {
                min_x: 0,
                min_y: 0,
                max_x: self.size.width as usize - 1,
                max_y: self.size.height as usize - 1,
            });
        }

        let stride = self.size.width as usize;
        let mut dirty: Option<DirtyRect> = None;

        for (row, (back, front)) in self
            .back
            .chunks_exact(stride.max(1))
            .zip(self.front.chunks_exact(stride.max(1)))
            .enumerate()
        {
            if back == front {
                continue;
            }
            // Only the first and last differing column of a row matter
            let first = back.iter().zip(front).position(|(b, f)| b != f);
            let last = back.iter().zip(front).rposition(|(b, f)| b != f);
            if let (Some(first), Some(last)) = (first, last) {
                match &mut dirty {
                    Some(rect) => {
                        rect.expand(first, row);
                        rect.expand(last, row);
                    }
                    None => {
                        let mut rect = DirtyRect::from_point(first, row);
                        rect.expand(last, row);
                        dirty = Some(rect);
                    }
                }
            }
        }

        dirty
    }

    /// Push the changed region to a hardware display and make it the new
    /// committed frame.
    ///
    /// Returns `Ok(false)` without touching the display when nothing changed.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(rect) = self.changed_region() else {
            return Ok(false);
        };

        trace!(
            "Flushing {}x{} changed region at ({}, {})",
            rect.width(),
            rect.height(),
            rect.min_x,
            rect.min_y
        );

        let stride = self.size.width as usize;
        let width = rect.width();
        let back = &self.back;
        let pixel_iter = (rect.min_y..=rect.max_y).flat_map(move |y| {
            let row_start = y * stride + rect.min_x;
            back[row_start..row_start + width].iter().copied()
        });
        display.fill_contiguous(&rect.to_rectangle(), pixel_iter)?;

        for y in rect.min_y..=rect.max_y {
            let row_start = y * stride + rect.min_x;
            let row = row_start..row_start + width;
            self.front[row.clone()].copy_from_slice(&self.back[row]);
        }
        self.invalidated = false;

        Ok(true)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let w = self.size.width as usize;
        let h = self.size.height as usize;

        for Pixel(coord, color) in pixels {
            if coord.x >= 0 && coord.y >= 0 && (coord.x as usize) < w && (coord.y as usize) < h {
                self.set_pixel(coord.x as usize, coord.y as usize, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let w = self.size.width as i64;
        let h = self.size.height as i64;

        let left = area.top_left.x as i64;
        let top = area.top_left.y as i64;
        let x_start = left.clamp(0, w) as usize;
        let y_start = top.clamp(0, h) as usize;
        let x_end = (left + area.size.width as i64).clamp(0, w) as usize;
        let y_end = (top + area.size.height as i64).clamp(0, h) as usize;

        if x_start >= x_end {
            return Ok(());
        }

        for y in y_start..y_end {
            let row_start = self.index(x_start, y);
            let row_end = self.index(x_end, y);
            self.back[row_start..row_end].fill(color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.back.fill(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingSurface;

    #[test]
    fn test_first_flush_pushes_whole_screen() {
        let mut fb = FrameBuffer::new(Size::new(8, 4));
        let mut panel = RecordingSurface::new(Size::new(8, 4));

        assert!(fb.flush(&mut panel).unwrap());
        assert_eq!(panel.pixels_written(), 32);

        // Nothing changed since
        assert!(!fb.flush(&mut panel).unwrap());
        assert_eq!(panel.pixels_written(), 32);
    }

    #[test]
    fn test_only_changed_region_is_flushed() {
        let mut fb = FrameBuffer::new(Size::new(10, 10));
        let mut panel = RecordingSurface::new(Size::new(10, 10));
        fb.flush(&mut panel).unwrap();
        panel.reset_counters();

        Pixel(Point::new(2, 3), Rgb565::RED).draw(&mut fb).unwrap();
        Pixel(Point::new(5, 6), Rgb565::RED).draw(&mut fb).unwrap();

        let rect = fb.changed_region().unwrap();
        assert_eq!(rect, DirtyRect { min_x: 2, min_y: 3, max_x: 5, max_y: 6 });

        assert!(fb.flush(&mut panel).unwrap());
        assert_eq!(panel.pixels_written(), 16);
        assert_eq!(panel.pixel(Point::new(5, 6)), Some(Rgb565::RED));
    }

    #[test]
    fn test_redrawing_identical_frame_is_not_a_change() {
        let mut fb = FrameBuffer::new(Size::new(10, 10));
        let mut panel = RecordingSurface::new(Size::new(10, 10));
        let square = Rectangle::new(Point::new(1, 1), Size::new(3, 3));

        fb.clear(Rgb565::WHITE).unwrap();
        fb.fill_solid(&square, Rgb565::BLUE).unwrap();
        fb.flush(&mut panel).unwrap();

        fb.clear(Rgb565::WHITE).unwrap();
        fb.fill_solid(&square, Rgb565::BLUE).unwrap();
        assert_eq!(fb.changed_region(), None);
    }

    #[test]
    fn test_out_of_bounds_drawing_is_clipped() {
        let mut fb = FrameBuffer::new(Size::new(4, 4));
        Pixel(Point::new(-1, 2), Rgb565::RED).draw(&mut fb).unwrap();
        Pixel(Point::new(4, 0), Rgb565::RED).draw(&mut fb).unwrap();
        fb.fill_solid(
            &Rectangle::new(Point::new(2, 2), Size::new(10, 10)),
            Rgb565::GREEN,
        )
        .unwrap();

        assert_eq!(fb.pixel(Point::new(3, 3)), Some(Rgb565::GREEN));
        assert_eq!(fb.pixel(Point::new(1, 1)), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(Point::new(4, 4)), None);
    }
}
