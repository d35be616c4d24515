// src/ui/components/dropdown.rs
//! Drop-down option list

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::{String, Vec};

use super::shapes;
use crate::touch::TouchPoint;
use crate::ui::core::{
    Control, TouchResult, WidgetBase, WidgetError, WidgetEvent, WidgetKind, contains_inclusive,
};
use crate::ui::styling::{ColorMode, WidgetColors, adjust_brightness, fit_text, text_height};

/// Maximum number of options.
pub const MAX_OPTIONS: usize = 10;

/// Capacity of one option label, in bytes.
pub const OPTION_CAPACITY: usize = 32;

/// Padding added to the font height for each list row.
const ROW_PADDING: u32 = 6;

/// Drop-down selector.
///
/// Closed, only the header is shown: the selected option and a trailing
/// square with an arrow. Touching the square opens the list below the header.
/// While open the widget is prioritized so the list, which overlays whatever
/// was registered after or below it, sees touches first. A touch on a row
/// selects it and closes the list, a touch on the square closes it without
/// changing the selection, and a touch elsewhere leaves the list open.
#[derive(Debug)]
pub struct DropDown {
    base: WidgetBase,
    options: Vec<String<OPTION_CAPACITY>, MAX_OPTIONS>,
    selected: usize,
    open: bool,
}

impl DropDown {
    /// `bounds` is the closed header.
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            base: WidgetBase::new(bounds, WidgetColors::default()),
            options: Vec::new(),
            selected: 0,
            open: false,
        }
    }

    /// Append an option. Labels longer than [`OPTION_CAPACITY`] are cut.
    pub fn add_option(&mut self, option: &str) -> Result<(), WidgetError> {
        let mut label = String::new();
        for c in option.chars() {
            if label.push(c).is_err() {
                break;
            }
        }
        self.options
            .push(label)
            .map_err(|_| WidgetError::OptionCapacityExceeded { max: MAX_OPTIONS })
    }

    pub fn options(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|option| option.as_str())
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_option(&self) -> Option<&str> {
        self.options.get(self.selected).map(|option| option.as_str())
    }

    /// Select by index. Indices without an option are ignored.
    pub fn set_selected_index(&mut self, index: usize) {
        if index < self.options.len() {
            self.selected = index;
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    fn row_height(&self) -> u32 {
        text_height(self.base.font()) + ROW_PADDING
    }

    fn list_bounds(&self) -> Rectangle {
        let header = self.base.bounds();
        Rectangle::new(
            header.top_left + Point::new(0, header.size.height as i32),
            Size::new(
                header.size.width,
                self.row_height() * self.options.len() as u32,
            ),
        )
    }

    fn square_bounds(&self) -> Rectangle {
        let header = self.base.bounds();
        let side = header.size.height.min(header.size.width);
        Rectangle::new(
            header.top_left + Point::new((header.size.width - side) as i32, 0),
            Size::new(side, side),
        )
    }

    /// Row under `point`, if it lies on the open list.
    fn row_at(&self, point: TouchPoint) -> Option<usize> {
        if !self.open || self.options.is_empty() {
            return None;
        }
        let list = self.list_bounds();
        if !contains_inclusive(&list, point) {
            return None;
        }
        let row = ((point.y - list.top_left.y) as u32 / self.row_height()) as usize;
        Some(row.min(self.options.len() - 1))
    }
}

impl Control for DropDown {
    fn kind(&self) -> WidgetKind {
        WidgetKind::DropDown
    }

    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn is_prioritized(&self) -> bool {
        self.open
    }

    fn hit_test(&self, point: TouchPoint) -> bool {
        self.base.contains(point) || self.row_at(point).is_some()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.base.set_enabled(enabled);
        if !enabled {
            self.open = false;
        }
    }

    fn on_click(&mut self, point: TouchPoint) -> TouchResult {
        if let Some(row) = self.row_at(point) {
            self.selected = row;
            self.open = false;
            return TouchResult::Event(WidgetEvent::OptionSelected(row));
        }

        if contains_inclusive(&self.square_bounds(), point) {
            self.open = !self.open;
            let event = if self.open {
                WidgetEvent::DropDownOpened
            } else {
                WidgetEvent::DropDownClosed
            };
            return TouchResult::Event(event);
        }

        TouchResult::Event(WidgetEvent::Clicked)
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ColorMode,
    ) -> Result<(), D::Error> {
        let colors = self.base.colors(mode);
        let font = self.base.font();
        let (x, y) = (self.base.x(), self.base.y());
        let (w, h) = (self.base.width() as i32, self.base.height() as i32);
        let border = adjust_brightness(colors.back, -55);
        let text_h = text_height(font) as i32;

        // Header
        shapes::fill_rect(display, x, y, w, h, colors.back)?;
        shapes::stroke_rect(display, x, y, w, h, border)?;
        if let Some(selected) = self.selected_option() {
            let room = (w - h - 8).max(0) as u32;
            shapes::text(
                display,
                fit_text(font, selected, room),
                Point::new(x + 4, y + (h - text_h) / 2 + 1),
                font,
                colors.fore,
            )?;
        }

        // Arrow square
        let square = self.square_bounds();
        let side = square.size.width as i32;
        let (sx, sy) = (square.top_left.x, square.top_left.y);
        shapes::fill_rect(display, sx, sy, side, side, adjust_brightness(colors.back, -8))?;
        shapes::stroke_rect(display, sx, sy, side, side, border)?;
        let p = |dx: i32, dy: i32| Point::new(sx + dx, sy + dy);
        if self.open {
            shapes::fill_triangle(
                display,
                p(side / 2, side / 3),
                p(side * 2 / 3, side * 2 / 3),
                p(side / 3, side * 2 / 3),
                colors.fore,
            )?;
        } else {
            shapes::fill_triangle(
                display,
                p(side / 3, side / 3),
                p(side * 2 / 3, side / 3),
                p(side / 2, side * 2 / 3),
                colors.fore,
            )?;
        }

        if !self.open {
            return Ok(());
        }

        // Option list
        let row_h = self.row_height() as i32;
        let list = self.list_bounds();
        let top = list.top_left.y;
        shapes::fill_rect(display, x, top, w, list.size.height as i32, colors.back)?;
        for (i, option) in self.options.iter().enumerate() {
            let row_y = top + i as i32 * row_h;
            let text_color = if i == self.selected {
                shapes::fill_rect(display, x, row_y, w, row_h, colors.fore)?;
                colors.back
            } else {
                colors.fore
            };
            shapes::text(
                display,
                fit_text(font, option, (w - 8).max(0) as u32),
                Point::new(x + 4, row_y + (row_h - text_h) / 2),
                font,
                text_color,
            )?;
        }
        shapes::stroke_rect(display, x, top, w, list.size.height as i32, border)
    }
}
