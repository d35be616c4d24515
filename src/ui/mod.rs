// src/ui/mod.rs
//! Widget toolkit
//!
//! - [`core`] - the [`Control`] contract, shared widget state and touch results
//! - [`components`] - the widget families and the [`Widget`] enum
//! - [`styling`] - colors, dark/light pairs and text measurement

pub mod components;
pub mod core;
pub mod styling;

// Re-export commonly used items
pub use components::{
    BarGraph, BoxWidget, Button, CheckBox, DonutGraph, DropDown, ImageWidget, Label, NumPad,
    NumPadKey, NumericUpDown, Slider, TextBox, Widget, WidgetVariant,
};
pub use self::core::{
    ClickHandler, Control, TEXT_CAPACITY, TouchResult, WidgetBase, WidgetError, WidgetEvent,
    WidgetId, WidgetKind,
};
pub use styling::{ColorMode, ColorPair, WidgetColors};
