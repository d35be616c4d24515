// src/ui/components/gauge.rs
//! Bar and donut graphs
//!
//! Both show a single value inside `[min, max]`. The fill color is picked
//! from a small threshold table: the entry with the highest threshold that is
//! still at or below the value wins, so a table of `(0, green)`,
//! `(60, orange)`, `(85, red)` turns the gauge red from 85 upwards. Without a
//! matching entry the accent color is used.

use embedded_graphics::geometry::Angle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Arc, PrimitiveStyleBuilder, Rectangle, StrokeAlignment};
use heapless::Vec;

use super::shapes;
use crate::touch::TouchPoint;
use crate::ui::core::{Control, TouchResult, WidgetBase, WidgetError, WidgetEvent, WidgetKind};
use crate::ui::styling::{
    ACCENT, ColorMode, WidgetColors, adjust_brightness, measure_text_width, text_height,
};

/// Maximum number of threshold colors per graph.
pub const MAX_VALUE_COLORS: usize = 8;

/// Value, range and threshold table shared by the graph widgets.
#[derive(Debug, Clone)]
struct GaugeValue {
    min: f32,
    max: f32,
    value: f32,
    colors: Vec<(f32, Rgb565), MAX_VALUE_COLORS>,
}

impl GaugeValue {
    fn new(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            value: min,
            colors: Vec::new(),
        }
    }

    fn set_value(&mut self, value: f32) {
        if value >= self.min && value <= self.max {
            self.value = value;
        }
    }

    fn add_value_color(&mut self, threshold: f32, color: Rgb565) -> Result<(), WidgetError> {
        self.colors
            .push((threshold, color))
            .map_err(|_| WidgetError::ValueColorCapacityExceeded {
                max: MAX_VALUE_COLORS,
            })
    }

    fn fill_color(&self) -> Rgb565 {
        self.colors
            .iter()
            .filter(|(threshold, _)| *threshold <= self.value)
            .fold(None, |best: Option<(f32, Rgb565)>, &(threshold, color)| match best {
                Some((t, _)) if t >= threshold => best,
                _ => Some((threshold, color)),
            })
            .map(|(_, color)| color)
            .unwrap_or(ACCENT)
    }

    /// Position of the value in the range, in `[0, 1]`.
    fn fraction(&self) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.value - self.min) / span).clamp(0.0, 1.0)
    }
}

macro_rules! gauge_accessors {
    ($ty:ty) => {
        impl $ty {
            pub fn value(&self) -> f32 {
                self.gauge.value
            }

            pub fn min(&self) -> f32 {
                self.gauge.min
            }

            pub fn max(&self) -> f32 {
                self.gauge.max
            }

            /// Set the value. Values outside `[min, max]` are ignored.
            pub fn set_value(&mut self, value: f32) {
                self.gauge.set_value(value);
            }

            /// Add a threshold color. At most [`MAX_VALUE_COLORS`] are kept.
            pub fn add_value_color(
                &mut self,
                threshold: f32,
                color: Rgb565,
            ) -> Result<(), WidgetError> {
                self.gauge.add_value_color(threshold, color)
            }

            pub fn clear_value_colors(&mut self) {
                self.gauge.colors.clear();
            }

            /// Color the fill is drawn with at the current value.
            pub fn fill_color(&self) -> Rgb565 {
                self.gauge.fill_color()
            }
        }
    };
}

/// Rectangular gauge.
///
/// Fills left to right when wider than tall, bottom to top otherwise.
#[derive(Debug)]
pub struct BarGraph {
    base: WidgetBase,
    gauge: GaugeValue,
}

impl BarGraph {
    pub fn new(bounds: Rectangle, min: f32, max: f32) -> Self {
        Self {
            base: WidgetBase::new(bounds, WidgetColors::default()),
            gauge: GaugeValue::new(min, max),
        }
    }
}

gauge_accessors!(BarGraph);

impl Control for BarGraph {
    fn kind(&self) -> WidgetKind {
        WidgetKind::BarGraph
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

        let (inner_w, inner_h) = (w - 2, h - 2);
        let fraction = self.gauge.fraction();
        let fill = self.gauge.fill_color();
        if w >= h {
            let filled = (inner_w as f32 * fraction) as i32;
            shapes::fill_rect(display, x + 1, y + 1, filled, inner_h, fill)?;
        } else {
            let filled = (inner_h as f32 * fraction) as i32;
            shapes::fill_rect(display, x + 1, y + 1 + inner_h - filled, inner_w, filled, fill)?;
        }

        shapes::stroke_rect(display, x, y, w, h, adjust_brightness(colors.back, -55))
    }
}

/// Ring gauge that sweeps clockwise from twelve o'clock.
///
/// The widget text, if any, is centered in the ring.
#[derive(Debug)]
pub struct DonutGraph {
    base: WidgetBase,
    gauge: GaugeValue,
}

impl DonutGraph {
    pub fn new(bounds: Rectangle, min: f32, max: f32) -> Self {
        Self {
            base: WidgetBase::new(bounds, WidgetColors::on_background()),
            gauge: GaugeValue::new(min, max),
        }
    }

    fn diameter(&self) -> u32 {
        self.base.width().min(self.base.height())
    }
}

gauge_accessors!(DonutGraph);

impl Control for DonutGraph {
    fn kind(&self) -> WidgetKind {
        WidgetKind::DonutGraph
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
        let diameter = self.diameter();
        if diameter == 0 {
            return Ok(());
        }
        let center = self.base.bounds().center();
        let thickness = (diameter / 5).max(1);
        let ring = |color: Rgb565| {
            PrimitiveStyleBuilder::new()
                .stroke_color(color)
                .stroke_width(thickness)
                .stroke_alignment(StrokeAlignment::Inside)
                .build()
        };

        let track = adjust_brightness(colors.back, if mode.is_dark() { 40 } else { -40 });
        Arc::with_center(center, diameter, Angle::from_degrees(-90.0), Angle::from_degrees(360.0))
            .into_styled(ring(track))
            .draw(display)?;

        let sweep = 360.0 * self.gauge.fraction();
        if sweep > 0.0 {
            Arc::with_center(center, diameter, Angle::from_degrees(-90.0), Angle::from_degrees(sweep))
                .into_styled(ring(self.gauge.fill_color()))
                .draw(display)?;
        }

        let font = self.base.font();
        let label = self.base.text();
        let text_w = measure_text_width(font, label) as i32;
        let text_h = text_height(font) as i32;
        shapes::text(
            display,
            label,
            center - Point::new(text_w / 2, text_h / 2),
            font,
            colors.fore,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingSurface;
    use crate::ui::styling::rgb565;

    const GREEN: Rgb565 = rgb565(0x07E0);
    const ORANGE: Rgb565 = rgb565(0xFD20);
    const RED: Rgb565 = rgb565(0xF800);

    fn bar() -> BarGraph {
        let mut bar = BarGraph::new(Rectangle::new(Point::new(0, 0), Size::new(102, 12)), 0.0, 100.0);
        bar.add_value_color(0.0, GREEN).unwrap();
        bar.add_value_color(85.0, RED).unwrap();
        bar.add_value_color(60.0, ORANGE).unwrap();
        bar
    }

    #[test]
    fn test_highest_threshold_at_or_below_value_wins() {
        let mut bar = bar();
        assert_eq!(bar.fill_color(), GREEN);
        bar.set_value(60.0);
        assert_eq!(bar.fill_color(), ORANGE);
        bar.set_value(84.9);
        assert_eq!(bar.fill_color(), ORANGE);
        bar.set_value(100.0);
        assert_eq!(bar.fill_color(), RED);
    }

    #[test]
    fn test_no_threshold_uses_accent() {
        let mut bar = BarGraph::new(Rectangle::new(Point::zero(), Size::new(50, 10)), 0.0, 10.0);
        bar.add_value_color(5.0, RED).unwrap();
        assert_eq!(bar.fill_color(), ACCENT);
    }

    #[test]
    fn test_value_color_capacity() {
        let mut donut = DonutGraph::new(Rectangle::new(Point::zero(), Size::new(40, 40)), 0.0, 10.0);
        for i in 0..MAX_VALUE_COLORS {
            donut.add_value_color(i as f32, GREEN).unwrap();
        }
        assert_eq!(
            donut.add_value_color(9.0, RED),
            Err(WidgetError::ValueColorCapacityExceeded {
                max: MAX_VALUE_COLORS
            })
        );
    }

    #[test]
    fn test_set_value_rejects_out_of_range() {
        let mut bar = bar();
        bar.set_value(70.0);
        bar.set_value(120.0);
        assert_eq!(bar.value(), 70.0);
        bar.set_value(-5.0);
        assert_eq!(bar.value(), 70.0);
    }

    #[test]
    fn test_bar_fill_proportional_to_value() {
        let mut bar = bar();
        bar.set_value(50.0);
        let mut surface = RecordingSurface::new(Size::new(110, 16));
        bar.draw(&mut surface, ColorMode::Light).unwrap();

        assert_eq!(surface.pixel(Point::new(50, 5)), Some(GREEN));
        assert_eq!(
            surface.pixel(Point::new(51, 5)),
            Some(bar.base().back_color(ColorMode::Light))
        );
    }

    #[test]
    fn test_donut_draws_fill_color() {
        let mut donut = DonutGraph::new(Rectangle::new(Point::zero(), Size::new(40, 40)), 0.0, 10.0);
        donut.add_value_color(0.0, RED).unwrap();
        donut.set_value(10.0);
        let mut surface = RecordingSurface::new(Size::new(40, 40));
        donut.draw(&mut surface, ColorMode::Light).unwrap();
        assert!(surface.colors().any(|c| c == RED));
    }
}
