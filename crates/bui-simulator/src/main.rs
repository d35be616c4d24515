//! Desktop simulator for the bui-rs widget toolkit.
//!
//! Drives a `bui_rs::Window` in an SDL2 window via
//! `embedded-graphics-simulator`. The mouse plays the resistive panel: while a
//! button is held the pointer position is converted to raw readings of a
//! panel with the default calibration, so the full map/debounce/dispatch path
//! is exercised.
//!
//! # Key bindings
//!
//! | Key | Action                       |
//! |-----|------------------------------|
//! | D   | Toggle dark mode             |
//! | C   | Run the calibration wizard   |
//! | Q   | Quit                         |

use std::cell::Cell;
use std::fmt;
use std::convert::Infallible;
use std::rc::Rc;
use std::time::{Duration, Instant};

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_9X15};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window as SdlWindow, sdl2::Keycode,
};
use log::{error, info};

use bui_rs::touch::mapper::map_to_raw;
use bui_rs::ui::styling::rgb565;
use bui_rs::ui::{
    BarGraph, BoxWidget, Button, CheckBox, Control, DonutGraph, DropDown, ImageWidget, Label,
    NumPad, NumPadKey, NumericUpDown, Slider, TextBox, WidgetError, WidgetEvent, WidgetId,
};
use bui_rs::{
    BufferedDisplay, CalibrationBounds, CalibrationStep, CalibrationWizard, EmbassyClock,
    FrameReport, RawTouch, TouchPoint, TouchSensor, Window, WindowConfig, WindowError,
};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const DISPLAY_WIDTH: u32 = 320;
const DISPLAY_HEIGHT: u32 = 240;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~60 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Pressure reported while the mouse button is held.
const MOUSE_PRESSURE: u16 = 100;

type SimWindow = Window<BufferedDisplay<SimulatorDisplay<Rgb565>>, MouseTouch, EmbassyClock>;

// ---------------------------------------------------------------------------
// Mouse-backed touch panel
// ---------------------------------------------------------------------------

/// Touch sensor fed by SDL mouse events.
struct MouseTouch {
    pressed: Rc<Cell<Option<Point>>>,
    panel: CalibrationBounds,
    size: Size,
}

impl TouchSensor for MouseTouch {
    type Error = Infallible;

    fn is_touching(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pressed.get().is_some())
    }

    fn sample(&mut self) -> Result<RawTouch, Self::Error> {
        let point = self.pressed.get().unwrap_or_default();
        Ok(map_to_raw(
            TouchPoint::new(point.x, point.y, MOUSE_PRESSURE),
            &self.panel,
            self.size,
        ))
    }
}

// ---------------------------------------------------------------------------
// Demo screen
// ---------------------------------------------------------------------------

/// Handles of the widgets the main loop reacts to.
struct Demo {
    dark_button: WidgetId,
    keypad_button: WidgetId,
    level_label: WidgetId,
    slider: WidgetId,
    bar: WidgetId,
    numeric: WidgetId,
    donut: WidgetId,
    textbox: WidgetId,
    numpad: WidgetId,
}

/// Registration failures while building the demo screen.
#[derive(Debug)]
enum SetupError {
    Window(WindowError),
    Widget(WidgetError),
}

impl From<WindowError> for SetupError {
    fn from(e: WindowError) -> Self {
        SetupError::Window(e)
    }
}

impl From<WidgetError> for SetupError {
    fn from(e: WidgetError) -> Self {
        SetupError::Widget(e)
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Window(e) => write!(f, "{}", e),
            SetupError::Widget(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SetupError {}

fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(w, h))
}

/// 24x24 color gradient in big-endian RGB565.
fn gradient_icon() -> &'static [u8] {
    let mut bytes = Vec::with_capacity(24 * 24 * 2);
    for y in 0..24u8 {
        for x in 0..24u8 {
            let color = Rgb565::new(x + 7, y * 2 + 15, 31 - x);
            bytes.extend_from_slice(&color.into_storage().to_be_bytes());
        }
    }
    bytes.leak()
}

fn build_demo(window: &mut SimWindow) -> Result<Demo, SetupError> {
    window.add_widget(BoxWidget::new(rect(4, 4, 312, 232)))?;
    window.add_widget(Label::new(Point::new(12, 10), "bui-rs demo", &FONT_9X15))?;
    window.add_widget(ImageWidget::new(Point::new(284, 8), gradient_icon(), 24))?;

    let dark_button = window.add_widget(
        Button::new(rect(12, 34, 90, 30), "Dark mode")
            .with_on_click(Box::new(|| info!("Dark mode button pressed"))),
    )?;
    let keypad_button = window.add_widget(Button::new(rect(110, 34, 90, 30), "Keypad"))?;
    window.add_widget(CheckBox::new(Point::new(212, 41), "Beep"))?;

    let level_label = window.add_widget(Label::new(Point::new(12, 74), "Level: 0", &FONT_6X10))?;
    let slider = window.add_widget(Slider::new(rect(12, 88, 180, 20), 0.0, 100.0))?;

    let mut bar = BarGraph::new(rect(12, 116, 180, 14), 0.0, 100.0);
    bar.add_value_color(0.0, rgb565(0x07E0))?;
    bar.add_value_color(60.0, rgb565(0xFD20))?;
    bar.add_value_color(85.0, rgb565(0xF800))?;
    let bar = window.add_widget(bar)?;

    let numeric = window.add_widget(NumericUpDown::new(rect(212, 80, 80, 28), 0, 10))?;
    let mut donut = DonutGraph::new(rect(222, 116, 60, 60), 0.0, 10.0);
    donut.add_value_color(0.0, rgb565(0x041F))?;
    donut.add_value_color(8.0, rgb565(0xF800))?;
    donut.set_text_int(0);
    let donut = window.add_widget(donut)?;

    let textbox = window.add_widget(TextBox::new(rect(12, 140, 180, 24)))?;

    // Registered before the keypad so the keypad paints over the list's
    // neighbours only while open
    let mut units = DropDown::new(rect(12, 172, 180, 22));
    for option in ["Celsius", "Fahrenheit", "Kelvin"] {
        units.add_option(option)?;
    }
    window.add_widget(units)?;

    let numpad = window.add_widget(NumPad::new(rect(0, 150, DISPLAY_WIDTH, 90)))?;

    Ok(Demo {
        dark_button,
        keypad_button,
        level_label,
        slider,
        bar,
        numeric,
        donut,
        textbox,
        numpad,
    })
}

/// React to the widget that claimed this frame's touch.
fn handle_report(window: &mut SimWindow, demo: &Demo, report: FrameReport) {
    let Some(claim) = report.claim else {
        return;
    };

    if claim.id == demo.dark_button {
        let dark = !window.is_dark_mode();
        window.enable_darkmode(dark);
    } else if claim.id == demo.keypad_button {
        if let Some(numpad) = window.widget_as_mut::<NumPad>(demo.numpad) {
            numpad.open();
        }
    } else if claim.id == demo.slider {
        let value = window.widget_as::<Slider>(demo.slider).map(Slider::value);
        if let Some(value) = value {
            if let Some(bar) = window.widget_as_mut::<BarGraph>(demo.bar) {
                bar.set_value(value);
            }
            if let Some(label) = window.widget_as_mut::<Label>(demo.level_label) {
                label.set_text(&format!("Level: {}", value as i32));
            }
        }
    } else if claim.id == demo.numeric {
        let value = window
            .widget_as::<NumericUpDown>(demo.numeric)
            .map(NumericUpDown::value);
        if let (Some(value), Some(donut)) =
            (value, window.widget_as_mut::<DonutGraph>(demo.donut))
        {
            donut.set_value(value as f32);
            donut.set_text_int(value);
        }
    } else if claim.id == demo.numpad {
        if let (Some(WidgetEvent::Key(key)), Some(textbox)) =
            (claim.event, window.widget_as_mut::<TextBox>(demo.textbox))
        {
            match (key, key.as_char()) {
                (NumPadKey::Backspace, _) => {
                    textbox.remove_last();
                }
                (_, Some(c)) => {
                    let mut buf = [0u8; 4];
                    textbox.add_text(c.encode_utf8(&mut buf));
                }
                _ => {}
            }
        }
    } else {
        info!("{:?} in slot {}: {:?}", claim.kind, claim.id.index(), claim.event);
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    info!("Starting bui-rs simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH, DISPLAY_HEIGHT, WINDOW_SCALE
    );
    info!("Keys: D=Dark mode  C=Calibrate  Q=Quit");

    let size = Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT);
    let pressed = Rc::new(Cell::new(None));
    let touch = MouseTouch {
        pressed: pressed.clone(),
        panel: CalibrationBounds::default(),
        size,
    };

    let display = BufferedDisplay::new(SimulatorDisplay::<Rgb565>::new(size));
    let mut window: SimWindow = Window::new(display, touch, EmbassyClock, WindowConfig::default());
    let demo = build_demo(&mut window)?;

    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut sdl = SdlWindow::new("bui-rs Simulator", &output_settings);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    window.update()?;
    sdl.update(window.display().panel());

    let mut calibration: Option<CalibrationWizard> = None;

    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in sdl.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Q | Keycode::Escape => break 'running,
                    Keycode::D => {
                        let dark = !window.is_dark_mode();
                        window.enable_darkmode(dark);
                    }
                    Keycode::C => {
                        info!("Calibration started");
                        calibration = Some(CalibrationWizard::new(size));
                    }
                    _ => {}
                },
                SimulatorEvent::MouseButtonDown { point, .. } => pressed.set(Some(point)),
                SimulatorEvent::MouseMove { point } if pressed.get().is_some() => {
                    pressed.set(Some(point))
                }
                SimulatorEvent::MouseButtonUp { .. } => pressed.set(None),
                _ => {}
            }
        }

        // --- Frame ----------------------------------------------------------
        if let Some(wizard) = calibration.as_mut() {
            match window.calibration_step(wizard) {
                Ok(CalibrationStep::Complete(bounds)) => {
                    info!("Calibrated: {:?}", bounds);
                    calibration = None;
                }
                Ok(_) => {}
                Err(e) => error!("Calibration frame failed: {}", e),
            }
        } else {
            match window.update() {
                Ok(report) => handle_report(&mut window, &demo, report),
                Err(e) => error!("Frame failed: {}", e),
            }
        }

        sdl.update(window.display().panel());

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
    Ok(())
}
