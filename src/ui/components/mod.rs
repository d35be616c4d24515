// src/ui/components/mod.rs
//! Widget families
//!
//! Each family is a plain struct implementing [`Control`]. The window stores
//! them as a [`Widget`], a closed enum over every family, because
//! `Control::draw` is generic over the draw target and therefore cannot be
//! called through a trait object.

pub mod boxed;
pub mod button;
pub mod checkbox;
pub mod dropdown;
pub mod gauge;
pub mod image;
pub mod label;
pub mod numeric;
pub mod numpad;
pub(crate) mod shapes;
pub mod slider;
pub mod textbox;

pub use boxed::BoxWidget;
pub use button::Button;
pub use checkbox::CheckBox;
pub use dropdown::DropDown;
pub use gauge::{BarGraph, DonutGraph};
pub use image::ImageWidget;
pub use label::Label;
pub use numeric::NumericUpDown;
pub use numpad::{NumPad, NumPadKey};
pub use slider::Slider;
pub use textbox::TextBox;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::touch::TouchPoint;
use crate::ui::core::{Control, TouchResult, WidgetBase, WidgetKind};
use crate::ui::styling::ColorMode;

macro_rules! widgets {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        /// Any registered widget.
        #[derive(Debug)]
        pub enum Widget {
            $($variant($ty),)+
        }

        $(
            impl From<$ty> for Widget {
                fn from(widget: $ty) -> Self {
                    Widget::$variant(widget)
                }
            }

            impl WidgetVariant for $ty {
                fn from_widget(widget: &Widget) -> Option<&Self> {
                    match widget {
                        Widget::$variant(w) => Some(w),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                fn from_widget_mut(widget: &mut Widget) -> Option<&mut Self> {
                    match widget {
                        Widget::$variant(w) => Some(w),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )+
    };
}

/// Typed access to a [`Widget`] of a known family.
pub trait WidgetVariant: Sized {
    fn from_widget(widget: &Widget) -> Option<&Self>;

    fn from_widget_mut(widget: &mut Widget) -> Option<&mut Self>;
}

widgets! {
    Button(Button),
    Label(Label),
    CheckBox(CheckBox),
    Slider(Slider),
    NumericUpDown(NumericUpDown),
    BarGraph(BarGraph),
    DonutGraph(DonutGraph),
    Image(ImageWidget),
    DropDown(DropDown),
    TextBox(TextBox),
    NumPad(NumPad),
    Box(BoxWidget),
}

macro_rules! dispatch {
    ($self:expr, $w:ident => $body:expr) => {
        match $self {
            Widget::Button($w) => $body,
            Widget::Label($w) => $body,
            Widget::CheckBox($w) => $body,
            Widget::Slider($w) => $body,
            Widget::NumericUpDown($w) => $body,
            Widget::BarGraph($w) => $body,
            Widget::DonutGraph($w) => $body,
            Widget::Image($w) => $body,
            Widget::DropDown($w) => $body,
            Widget::TextBox($w) => $body,
            Widget::NumPad($w) => $body,
            Widget::Box($w) => $body,
        }
    };
}

impl Widget {
    /// Borrow as a concrete family, `None` if the widget is another kind.
    pub fn downcast_ref<T: WidgetVariant>(&self) -> Option<&T> {
        T::from_widget(self)
    }

    pub fn downcast_mut<T: WidgetVariant>(&mut self) -> Option<&mut T> {
        T::from_widget_mut(self)
    }
}

impl Control for Widget {
    fn kind(&self) -> WidgetKind {
        dispatch!(self, w => w.kind())
    }

    fn base(&self) -> &WidgetBase {
        dispatch!(self, w => w.base())
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        dispatch!(self, w => w.base_mut())
    }

    fn hit_test(&self, point: TouchPoint) -> bool {
        dispatch!(self, w => w.hit_test(point))
    }

    fn on_click(&mut self, point: TouchPoint) -> TouchResult {
        dispatch!(self, w => w.on_click(point))
    }

    fn is_prioritized(&self) -> bool {
        dispatch!(self, w => w.is_prioritized())
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ColorMode,
    ) -> Result<(), D::Error> {
        dispatch!(self, w => w.draw(display, mode))
    }

    fn check_touched(&mut self, point: TouchPoint) -> TouchResult {
        dispatch!(self, w => w.check_touched(point))
    }

    fn set_enabled(&mut self, enabled: bool) {
        dispatch!(self, w => w.set_enabled(enabled))
    }

    fn bounds(&self) -> Rectangle {
        dispatch!(self, w => w.bounds())
    }
}
