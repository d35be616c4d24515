//! Thin wrappers over embedded-graphics primitives used by the widget
//! renderers. Zero or negative sizes draw nothing.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, Line, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle,
};
use embedded_graphics::text::{Baseline, Text};

fn rect(x: i32, y: i32, w: i32, h: i32) -> Option<Rectangle> {
    (w > 0 && h > 0).then(|| Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32)))
}

pub(crate) fn fill_rect<D>(d: &mut D, x: i32, y: i32, w: i32, h: i32, color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    match rect(x, y, w, h) {
        Some(r) => d.fill_solid(&r, color),
        None => Ok(()),
    }
}

pub(crate) fn stroke_rect<D>(d: &mut D, x: i32, y: i32, w: i32, h: i32, color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    match rect(x, y, w, h) {
        Some(r) => r.into_styled(PrimitiveStyle::with_stroke(color, 1)).draw(d),
        None => Ok(()),
    }
}

pub(crate) fn round_rect<D>(
    d: &mut D,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    radius: u32,
    style: PrimitiveStyle<Rgb565>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    match rect(x, y, w, h) {
        Some(r) => RoundedRectangle::with_equal_corners(r, Size::new(radius, radius))
            .into_styled(style)
            .draw(d),
        None => Ok(()),
    }
}

pub(crate) fn line<D>(d: &mut D, from: Point, to: Point, color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(from, to)
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(d)
}

pub(crate) fn circle<D>(
    d: &mut D,
    center: Point,
    radius: i32,
    style: PrimitiveStyle<Rgb565>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if radius <= 0 {
        return Ok(());
    }
    Circle::with_center(center, radius as u32 * 2)
        .into_styled(style)
        .draw(d)
}

pub(crate) fn fill_triangle<D>(d: &mut D, a: Point, b: Point, c: Point, color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Triangle::new(a, b, c)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(d)
}

/// Draw `text` with its top-left corner at `position`.
pub(crate) fn text<D>(
    d: &mut D,
    text: &str,
    position: Point,
    font: &MonoFont<'_>,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if text.is_empty() {
        return Ok(());
    }
    let style = MonoTextStyle::new(font, color);
    Text::with_baseline(text, position, style, Baseline::Top).draw(d)?;
    Ok(())
}
