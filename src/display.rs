//! Drawing surface consumed by the window.
//!
//! Widgets draw with ordinary embedded-graphics primitives, so any
//! `DrawTarget<Color = Rgb565>` can receive them. The only extra capability
//! the window needs is committing a finished frame, which is what
//! [`DisplaySurface`] adds.

use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::trace;

use crate::framebuffer::FrameBuffer;

/// A drawing target that presents frames explicitly.
///
/// The logical width and height of the surface are its bounding box.
pub trait DisplaySurface: DrawTarget<Color = Rgb565> {
    /// Make everything drawn since the last commit visible.
    fn commit_frame(&mut self) -> Result<(), Self::Error>;
}

/// Hardware display fronted by a RAM [`FrameBuffer`].
///
/// Drawing never reaches the panel directly; `commit_frame` pushes only the
/// region that changed since the previous commit.
pub struct BufferedDisplay<D> {
    panel: D,
    buffer: FrameBuffer,
}

impl<D> BufferedDisplay<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Wrap a panel, allocating a buffer matching its bounding box.
    pub fn new(panel: D) -> Self {
        let size = panel.bounding_box().size;
        Self {
            panel,
            buffer: FrameBuffer::new(size),
        }
    }

    /// The wrapped panel.
    pub fn panel(&self) -> &D {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut D {
        &mut self.panel
    }

    /// The back buffer holding the frame currently being drawn.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Force the next commit to resend the whole screen.
    pub fn invalidate(&mut self) {
        self.buffer.invalidate();
    }

    pub fn into_inner(self) -> D {
        self.panel
    }
}

fn unreachable_infallible<E>(result: Result<(), Infallible>) -> Result<(), E> {
    match result {
        Ok(()) => Ok(()),
        Err(never) => match never {},
    }
}

impl<D> OriginDimensions for BufferedDisplay<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn size(&self) -> Size {
        self.buffer.size()
    }
}

impl<D> DrawTarget for BufferedDisplay<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Color = Rgb565;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        unreachable_infallible(self.buffer.draw_iter(pixels))
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        unreachable_infallible(self.buffer.fill_solid(area, color))
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        unreachable_infallible(self.buffer.clear(color))
    }
}

impl<D> DisplaySurface for BufferedDisplay<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn commit_frame(&mut self) -> Result<(), Self::Error> {
        let pushed = self.buffer.flush(&mut self.panel)?;
        trace!("Frame committed (changed: {})", pushed);
        Ok(())
    }
}
