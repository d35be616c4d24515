// src/ui/core.rs
//! Core UI traits and types shared by every widget family

extern crate alloc;

use alloc::boxed::Box;
use core::fmt::{self, Write};
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use thiserror_no_std::Error;

use crate::touch::TouchPoint;
use crate::ui::components::NumPadKey;
use crate::ui::styling::{ColorMode, ColorPair, DEFAULT_FONT, WidgetColors};

/// Capacity of a widget's text buffer, in bytes.
pub const TEXT_CAPACITY: usize = 64;

/// Type tag of a widget family.
///
/// `Undefined` never belongs to a registered widget; it is what the debounce
/// gate records when an accepted touch was not claimed by anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetKind {
    #[default]
    Undefined,
    Button,
    Label,
    CheckBox,
    Slider,
    NumericUpDown,
    BarGraph,
    DonutGraph,
    Image,
    DropDown,
    TextBox,
    NumPad,
    Box,
}

impl WidgetKind {
    /// Kinds that are dragged rather than tapped and therefore resample at
    /// the short debounce interval.
    pub fn is_continuous(self) -> bool {
        matches!(self, WidgetKind::Slider)
    }
}

/// Stable handle of a registered widget: its slot index in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub(crate) usize);

impl WidgetId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// What a widget reports after claiming a touch
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetEvent {
    /// Claimed without a state change (buttons and display-only widgets)
    Clicked,
    /// Checkbox toggled to the contained state
    Toggled(bool),
    /// Slider resampled to a new value
    ValueChanged(f32),
    /// Numeric up/down stepped to a new value
    Stepped(i32),
    /// Dropdown list opened
    DropDownOpened,
    /// Dropdown list closed without a selection
    DropDownClosed,
    /// Dropdown option selected by index
    OptionSelected(usize),
    /// Keypad key pressed
    Key(NumPadKey),
}

/// Result of offering a touch to a widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchResult {
    /// Touch missed, offer it to the next widget
    NotHandled,
    /// Touch claimed without notifying the host
    Handled,
    /// Touch claimed; the click handler ran and the event is reported
    Event(WidgetEvent),
}

impl TouchResult {
    pub fn is_claimed(&self) -> bool {
        !matches!(self, TouchResult::NotHandled)
    }

    pub fn event(&self) -> Option<WidgetEvent> {
        match self {
            TouchResult::Event(event) => Some(*event),
            _ => None,
        }
    }
}

/// Errors returned by widget collection setters
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WidgetError {
    /// Dropdown option list is full
    #[error("Option capacity exceeded (max: {max})")]
    OptionCapacityExceeded {
        /// Maximum number of options
        max: usize,
    },

    /// Graph threshold table is full
    #[error("Value color capacity exceeded (max: {max})")]
    ValueColorCapacityExceeded {
        /// Maximum number of thresholds
        max: usize,
    },
}

/// Host callback invoked after a widget handles a click.
pub type ClickHandler = Box<dyn FnMut()>;

/// State shared by every widget family.
pub struct WidgetBase {
    bounds: Rectangle,
    enabled: bool,
    colors: WidgetColors,
    font: &'static MonoFont<'static>,
    text: heapless::String<TEXT_CAPACITY>,
    touched: bool,
    on_click: Option<ClickHandler>,
}

impl fmt::Debug for WidgetBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetBase")
            .field("bounds", &self.bounds)
            .field("enabled", &self.enabled)
            .field("text", &self.text)
            .field("touched", &self.touched)
            .field("has_on_click", &self.on_click.is_some())
            .finish()
    }
}

impl WidgetBase {
    pub fn new(bounds: Rectangle, colors: WidgetColors) -> Self {
        Self {
            bounds,
            enabled: true,
            colors,
            font: DEFAULT_FONT,
            text: heapless::String::new(),
            touched: false,
            on_click: None,
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rectangle) {
        self.bounds = bounds;
    }

    pub fn x(&self) -> i32 {
        self.bounds.top_left.x
    }

    pub fn y(&self) -> i32 {
        self.bounds.top_left.y
    }

    pub fn width(&self) -> u32 {
        self.bounds.size.width
    }

    pub fn height(&self) -> u32 {
        self.bounds.size.height
    }

    pub fn set_position(&mut self, position: Point) {
        self.bounds.top_left = position;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.touched = false;
        }
    }

    /// Colors for the given mode.
    pub fn colors(&self, mode: ColorMode) -> ColorPair {
        self.colors.resolve(mode)
    }

    pub fn set_colors(&mut self, mode: ColorMode, pair: ColorPair) {
        self.colors.set(mode, pair);
    }

    pub fn fore_color(&self, mode: ColorMode) -> Rgb565 {
        self.colors(mode).fore
    }

    pub fn back_color(&self, mode: ColorMode) -> Rgb565 {
        self.colors(mode).back
    }

    pub fn font(&self) -> &'static MonoFont<'static> {
        self.font
    }

    pub fn set_font(&mut self, font: &'static MonoFont<'static>) {
        self.font = font;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. Anything beyond [`TEXT_CAPACITY`] is dropped at a
    /// character boundary.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.push_text(text);
    }

    /// Append as much of `text` as fits.
    pub fn push_text(&mut self, text: &str) {
        for c in text.chars() {
            if self.text.push(c).is_err() {
                break;
            }
        }
    }

    pub fn pop_char(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn clear_text(&mut self) {
        self.text.clear();
    }

    pub fn set_text_int(&mut self, value: i32) {
        self.text.clear();
        write!(&mut self.text, "{}", value).ok();
    }

    pub fn set_text_float(&mut self, value: f32, precision: usize) {
        self.text.clear();
        write!(&mut self.text, "{:.*}", precision, value).ok();
    }

    /// Whether the current cycle's touch landed on this widget.
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub(crate) fn set_touched(&mut self, touched: bool) {
        self.touched = touched;
    }

    pub fn set_on_click(&mut self, handler: ClickHandler) {
        self.on_click = Some(handler);
    }

    pub fn clear_on_click(&mut self) {
        self.on_click = None;
    }

    pub(crate) fn notify(&mut self) {
        if let Some(handler) = self.on_click.as_mut() {
            handler();
        }
    }

    /// Inclusive rectangle test: `[x, x + w] x [y, y + h]`.
    pub fn contains(&self, point: TouchPoint) -> bool {
        contains_inclusive(&self.bounds, point)
    }
}

/// Whether `point` lies in `rect`, edges on both sides included.
pub fn contains_inclusive(rect: &Rectangle, point: TouchPoint) -> bool {
    let x = rect.top_left.x;
    let y = rect.top_left.y;
    point.x >= x
        && point.x <= x + rect.size.width as i32
        && point.y >= y
        && point.y <= y + rect.size.height as i32
}

/// Contract every widget family implements.
///
/// The window drives widgets only through this trait: it offers each cycle's
/// touch with [`check_touched`](Control::check_touched), then calls
/// [`draw`](Control::draw) with the window's color mode.
pub trait Control {
    fn kind(&self) -> WidgetKind;

    fn base(&self) -> &WidgetBase;

    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Whether `point` lies on the widget. Pressure and the enabled flag are
    /// checked by [`check_touched`](Control::check_touched).
    fn hit_test(&self, point: TouchPoint) -> bool {
        self.base().contains(point)
    }

    /// Widget-specific state change for a claimed touch.
    fn on_click(&mut self, point: TouchPoint) -> TouchResult;

    /// Whether the widget overlays the others and must see touches first.
    fn is_prioritized(&self) -> bool {
        false
    }

    /// Render the widget.
    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ColorMode,
    ) -> Result<(), D::Error>;

    /// Offer this cycle's touch to the widget.
    ///
    /// Clears the pressed flag, then claims the touch if the widget is enabled,
    /// the point carries pressure and it hits. A claim runs
    /// [`on_click`](Control::on_click) and, when that reports an event, the
    /// host's click handler.
    fn check_touched(&mut self, point: TouchPoint) -> TouchResult {
        self.base_mut().set_touched(false);

        if !self.base().is_enabled() || !point.is_pressed() || !self.hit_test(point) {
            return TouchResult::NotHandled;
        }

        self.base_mut().set_touched(true);
        let result = self.on_click(point);
        if let TouchResult::Event(_) = result {
            self.base_mut().notify();
        }
        result
    }

    /// Drop the pressed look without offering a touch.
    fn release(&mut self) {
        self.base_mut().set_touched(false);
    }

    fn is_enabled(&self) -> bool {
        self.base().is_enabled()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.base_mut().set_enabled(enabled);
    }

    fn bounds(&self) -> Rectangle {
        self.base().bounds()
    }

    fn set_position(&mut self, position: Point) {
        self.base_mut().set_position(position);
    }

    fn set_font(&mut self, font: &'static MonoFont<'static>) {
        self.base_mut().set_font(font);
    }

    fn set_text(&mut self, text: &str) {
        self.base_mut().set_text(text);
    }

    fn set_text_int(&mut self, value: i32) {
        self.base_mut().set_text_int(value);
    }

    fn set_text_float(&mut self, value: f32, precision: usize) {
        self.base_mut().set_text_float(value, precision);
    }

    fn text(&self) -> &str {
        self.base().text()
    }

    fn set_colors(&mut self, mode: ColorMode, pair: ColorPair) {
        self.base_mut().set_colors(mode, pair);
    }

    fn set_on_click(&mut self, handler: ClickHandler) {
        self.base_mut().set_on_click(handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    fn base() -> WidgetBase {
        WidgetBase::new(
            Rectangle::new(Point::new(10, 10), Size::new(100, 40)),
            WidgetColors::default(),
        )
    }

    #[test]
    fn test_hit_rectangle_is_inclusive() {
        let base = base();
        assert!(base.contains(TouchPoint::new(10, 10, 1)));
        assert!(base.contains(TouchPoint::new(110, 50, 1)));
        assert!(!base.contains(TouchPoint::new(111, 50, 1)));
        assert!(!base.contains(TouchPoint::new(9, 30, 1)));
        assert!(!base.contains(TouchPoint::new(50, 51, 1)));
    }

    #[test]
    fn test_text_setters() {
        let mut base = base();
        base.set_text_int(-42);
        assert_eq!(base.text(), "-42");
        base.set_text_float(1.23456, 2);
        assert_eq!(base.text(), "1.23");
        base.set_text("abc");
        base.push_text("def");
        assert_eq!(base.text(), "abcdef");
        assert_eq!(base.pop_char(), Some('f'));
    }

    #[test]
    fn test_text_longer_than_capacity_is_cut() {
        let mut base = base();
        let long: String = core::iter::repeat('x').take(TEXT_CAPACITY + 10).collect();
        base.set_text(&long);
        assert_eq!(base.text().len(), TEXT_CAPACITY);
    }

    #[test]
    fn test_disabling_clears_pressed_flag() {
        let mut base = base();
        base.set_touched(true);
        base.set_enabled(false);
        assert!(!base.is_touched());
    }

    #[test]
    fn test_only_slider_is_continuous() {
        assert!(WidgetKind::Slider.is_continuous());
        assert!(!WidgetKind::Button.is_continuous());
        assert!(!WidgetKind::Undefined.is_continuous());
    }
}
