//! Widget registry and the per-frame update cycle.
//!
//! A [`Window`] owns one display, one touch sensor and a fixed table of widget
//! slots. The host calls [`Window::update`] from its main loop; each call:
//!
//! 1. asks the debounce gate whether a fresh touch may be sampled and, if so,
//!    maps it to screen coordinates,
//! 2. offers the touch to prioritized widgets (open overlays) first, then to
//!    the rest in registration order, letting only the first claimant react,
//! 3. clears the background and redraws every enabled widget, overlays last,
//! 4. commits the frame.
//!
//! Every enabled widget is redrawn every frame, so a claim never skips drawing
//! and the pressed look always matches the touch of the current cycle.

use core::fmt;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::{debug, info, trace};
use thiserror_no_std::Error;

use crate::clock::{Clock, EmbassyClock};
use crate::config::{CalibrationBounds, MAX_WIDGETS, WindowConfig};
use crate::display::DisplaySurface;
use crate::touch::{
    CalibrationStep, CalibrationWizard, TouchDebouncer, TouchPoint, TouchSensor, map_to_screen,
};
use crate::ui::styling::{ColorMode, WidgetColors, rgb565};
use crate::ui::{Control, Widget, WidgetEvent, WidgetId, WidgetKind, WidgetVariant};

/// Errors returned by widget registration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    /// Every slot is occupied
    #[error("Widget registry full (capacity: {capacity})")]
    RegistryFull {
        /// Number of slots in the window
        capacity: usize,
    },
}

/// Failure of the display or the touch sensor during a frame.
#[derive(Debug, PartialEq, Eq)]
pub enum UpdateError<DE, TE> {
    Display(DE),
    Touch(TE),
}

impl<DE: fmt::Debug, TE: fmt::Debug> fmt::Display for UpdateError<DE, TE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateError::Display(e) => write!(f, "Display error: {:?}", e),
            UpdateError::Touch(e) => write!(f, "Touch sensor error: {:?}", e),
        }
    }
}

impl<DE: fmt::Debug, TE: fmt::Debug> core::error::Error for UpdateError<DE, TE> {}

/// The widget that claimed a frame's touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Claim {
    pub id: WidgetId,
    pub kind: WidgetKind,
    /// `None` when the widget handled the touch without reporting an event
    pub event: Option<WidgetEvent>,
}

/// What happened during one [`Window::update`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    /// The touch sampled this frame, if the debounce gate let one through
    pub accepted: Option<TouchPoint>,
    /// The widget that claimed it
    pub claim: Option<Claim>,
}

type FrameResult<T, D, S> =
    core::result::Result<T, UpdateError<<D as DrawTarget>::Error, <S as TouchSensor>::Error>>;

/// Widget registry bound to one display and one touch sensor.
///
/// `N` is the number of widget slots. Slot indices are the widgets'
/// [`WidgetId`]s and never change while the widget is registered.
pub struct Window<D, S, C = EmbassyClock, const N: usize = MAX_WIDGETS>
where
    D: DisplaySurface,
    S: TouchSensor,
    C: Clock,
{
    display: D,
    sensor: S,
    clock: C,
    slots: [Option<Widget>; N],
    calibration: CalibrationBounds,
    debouncer: TouchDebouncer,
    background: Rgb565,
    mode: ColorMode,
}

impl<D, S, C, const N: usize> Window<D, S, C, N>
where
    D: DisplaySurface,
    S: TouchSensor,
    C: Clock,
{
    pub fn new(display: D, sensor: S, clock: C, config: WindowConfig) -> Self {
        let mode = ColorMode::from_dark(config.dark_mode);
        let background = if config.dark_mode {
            mode.background()
        } else {
            rgb565(config.background)
        };
        let size = display.bounding_box().size;
        info!(
            "Window created: {}x{}, {} slots, {:?} mode",
            size.width, size.height, N, mode
        );

        Self {
            display,
            sensor,
            clock,
            slots: core::array::from_fn(|_| None),
            calibration: config.calibration,
            debouncer: TouchDebouncer::new(config.debounce),
            background,
            mode,
        }
    }

    // ------------------------------------------------------------------------
    // Registry
    // ------------------------------------------------------------------------

    /// Register a widget in the first free slot.
    pub fn add_widget(&mut self, widget: impl Into<Widget>) -> Result<WidgetId, WindowError> {
        let Some(index) = self.slots.iter().position(Option::is_none) else {
            return Err(WindowError::RegistryFull { capacity: N });
        };
        let widget = widget.into();
        debug!("Registered {:?} in slot {}", widget.kind(), index);
        self.slots[index] = Some(widget);
        Ok(WidgetId(index))
    }

    /// Remove a widget, freeing its slot for reuse.
    pub fn remove_widget(&mut self, id: WidgetId) -> Option<Widget> {
        let widget = self.slots.get_mut(id.0)?.take();
        if let Some(widget) = &widget {
            debug!("Removed {:?} from slot {}", widget.kind(), id.0);
        }
        widget
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.slots.get(id.0)?.as_ref()
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    /// Borrow a registered widget as its concrete family.
    ///
    /// ```ignore
    /// let checked = window.widget_as::<CheckBox>(id).map(CheckBox::checked);
    /// ```
    pub fn widget_as<T: WidgetVariant>(&self, id: WidgetId) -> Option<&T> {
        self.widget(id)?.downcast_ref()
    }

    pub fn widget_as_mut<T: WidgetVariant>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.widget_mut(id)?.downcast_mut()
    }

    /// Registered widgets in registration order.
    pub fn widgets(&self) -> impl Iterator<Item = (WidgetId, &Widget)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|w| (WidgetId(i), w)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    // ------------------------------------------------------------------------
    // Appearance
    // ------------------------------------------------------------------------

    pub fn background_color(&self) -> Rgb565 {
        self.background
    }

    pub fn set_background_color(&mut self, color: Rgb565) {
        self.background = color;
    }

    /// Switch every widget between its light and dark colors.
    ///
    /// The background is reset to black or white.
    pub fn enable_darkmode(&mut self, enable: bool) {
        self.mode = ColorMode::from_dark(enable);
        self.background = self.mode.background();
        info!("Dark mode {}", if enable { "enabled" } else { "disabled" });
    }

    pub fn is_dark_mode(&self) -> bool {
        self.mode.is_dark()
    }

    pub fn color_mode(&self) -> ColorMode {
        self.mode
    }

    // ------------------------------------------------------------------------
    // Touch configuration
    // ------------------------------------------------------------------------

    pub fn calibration(&self) -> &CalibrationBounds {
        &self.calibration
    }

    pub fn set_calibration(&mut self, bounds: CalibrationBounds) {
        debug!("Calibration set: {:?}", bounds);
        self.calibration = bounds;
    }

    pub fn debouncer(&self) -> &TouchDebouncer {
        &self.debouncer
    }

    // ------------------------------------------------------------------------
    // Owned devices
    // ------------------------------------------------------------------------

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    // ------------------------------------------------------------------------
    // Frame cycle
    // ------------------------------------------------------------------------

    /// Run one frame: sample, dispatch, redraw and commit.
    pub fn update(&mut self) -> FrameResult<FrameReport, D, S> {
        let accepted = self.sample_touch()?;
        let claim = self.dispatch(accepted.unwrap_or(TouchPoint::NONE));

        if let Some(claim) = &claim {
            self.debouncer.record_claim(claim.kind);
            debug!(
                "Touch claimed by {:?} in slot {}: {:?}",
                claim.kind, claim.id.0, claim.event
            );
        } else if let Some(point) = accepted {
            trace!("Touch at ({}, {}) not claimed", point.x, point.y);
        }

        self.render()?;
        Ok(FrameReport { accepted, claim })
    }

    /// Read the sensor if the debounce gate allows a new sample.
    fn sample_touch(&mut self) -> FrameResult<Option<TouchPoint>, D, S> {
        if !self.sensor.is_touching().map_err(UpdateError::Touch)? {
            return Ok(None);
        }

        let now = self.clock.now();
        if !self.debouncer.can_accept(now) {
            return Ok(None);
        }

        let raw = self.sensor.sample().map_err(UpdateError::Touch)?;
        self.debouncer.accept(now);

        let point = map_to_screen(raw, &self.calibration, self.display.bounding_box().size);
        trace!(
            "Accepted touch raw ({}, {}) -> ({}, {}) pressure {}",
            raw.x, raw.y, point.x, point.y, point.pressure
        );
        Ok(Some(point))
    }

    /// Offer `point` to the widgets and return the claim, if any.
    ///
    /// Overlays that were prioritized when the frame started go first. Once a
    /// widget has claimed the touch the remaining ones are only released.
    fn dispatch(&mut self, point: TouchPoint) -> Option<Claim> {
        let prioritized: [bool; N] = core::array::from_fn(|i| {
            self.slots[i]
                .as_ref()
                .is_some_and(|widget| widget.is_prioritized())
        });

        let mut claim = None;
        for pass in [true, false] {
            for (i, slot) in self.slots.iter_mut().enumerate() {
                let Some(widget) = slot else {
                    continue;
                };
                if prioritized[i] != pass {
                    continue;
                }
                if claim.is_some() {
                    widget.release();
                    continue;
                }

                let result = widget.check_touched(point);
                if result.is_claimed() {
                    claim = Some(Claim {
                        id: WidgetId(i),
                        kind: widget.kind(),
                        event: result.event(),
                    });
                }
            }
        }
        claim
    }

    /// Repaint the whole window and commit the frame.
    fn render(&mut self) -> FrameResult<(), D, S> {
        self.display
            .clear(self.background)
            .map_err(UpdateError::Display)?;

        for overlays in [false, true] {
            for widget in self.slots.iter().flatten() {
                if widget.is_enabled() && widget.is_prioritized() == overlays {
                    widget
                        .draw(&mut self.display, self.mode)
                        .map_err(UpdateError::Display)?;
                }
            }
        }

        self.display.commit_frame().map_err(UpdateError::Display)
    }

    /// Run one frame of an interactive calibration instead of the widgets.
    ///
    /// Call this from the main loop until it returns
    /// [`CalibrationStep::Complete`]; the new bounds are installed on the
    /// window at that point. A run that produced unusable bounds restarts
    /// from the first target.
    pub fn calibration_step(
        &mut self,
        wizard: &mut CalibrationWizard,
    ) -> FrameResult<CalibrationStep, D, S> {
        let touch = if self.sensor.is_touching().map_err(UpdateError::Touch)? {
            Some(self.sensor.sample().map_err(UpdateError::Touch)?)
        } else {
            None
        };

        let step = wizard.feed(touch).unwrap_or_else(|_| wizard.step());
        if let CalibrationStep::Complete(bounds) = step {
            self.set_calibration(bounds);
        }

        self.display
            .clear(self.background)
            .map_err(UpdateError::Display)?;
        let target = WidgetColors::on_background().resolve(self.mode).fore;
        wizard
            .draw(&mut self.display, target)
            .map_err(UpdateError::Display)?;
        self.display.commit_frame().map_err(UpdateError::Display)?;

        Ok(step)
    }
}
