//! Four-point touchscreen calibration.
//!
//! The wizard shows a crosshair near each corner in turn (top-left, top-right,
//! bottom-right, bottom-left), records the raw reading while the target is
//! pressed and waits for the stylus to lift before moving on. Once all four
//! corners are known the two readings per edge are averaged and extrapolated
//! from the inset targets out to the real screen edges.
//!
//! The wizard never blocks: it is fed one optional sample per frame, so the
//! caller's loop keeps running (see
//! [`Window::calibration_step`](crate::window::Window::calibration_step)).

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle};
use log::{debug, info, warn};

use super::RawTouch;
use crate::config::{CalibrationBounds, ConfigError};

/// Distance of each target from the two nearest screen edges, in pixels.
pub const TARGET_INSET: i32 = 20;

/// Half-length of the crosshair arms.
const CROSSHAIR_ARM: i32 = 8;

/// Number of calibration targets.
pub const TARGET_COUNT: usize = 4;

/// Progress of a [`CalibrationWizard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationStep {
    /// Waiting for the given target to be pressed
    AwaitingPress(usize),
    /// Target recorded, waiting for the touch to end
    AwaitingRelease(usize),
    /// All targets recorded
    Complete(CalibrationBounds),
}

pub struct CalibrationWizard {
    display: Size,
    targets: [Point; TARGET_COUNT],
    readings: [RawTouch; TARGET_COUNT],
    step: CalibrationStep,
}

impl CalibrationWizard {
    /// Start a calibration run for a display of the given size.
    pub fn new(display: Size) -> Self {
        let right = display.width as i32 - TARGET_INSET;
        let bottom = display.height as i32 - TARGET_INSET;

        Self {
            display,
            targets: [
                Point::new(TARGET_INSET, TARGET_INSET),
                Point::new(right, TARGET_INSET),
                Point::new(right, bottom),
                Point::new(TARGET_INSET, bottom),
            ],
            readings: [RawTouch::default(); TARGET_COUNT],
            step: CalibrationStep::AwaitingPress(0),
        }
    }

    pub fn step(&self) -> CalibrationStep {
        self.step
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.step, CalibrationStep::Complete(_))
    }

    /// Screen position of the target the user should touch, if any.
    pub fn current_target(&self) -> Option<Point> {
        match self.step {
            CalibrationStep::AwaitingPress(i) | CalibrationStep::AwaitingRelease(i) => {
                Some(self.targets[i])
            }
            CalibrationStep::Complete(_) => None,
        }
    }

    /// Start over from the first target.
    pub fn restart(&mut self) {
        self.readings = [RawTouch::default(); TARGET_COUNT];
        self.step = CalibrationStep::AwaitingPress(0);
    }

    /// Advance with this frame's reading (`None` when the panel is untouched).
    ///
    /// If the recorded corners cannot produce usable bounds (for example the
    /// same spot was pressed every time) the wizard restarts and the error is
    /// returned.
    pub fn feed(&mut self, touch: Option<RawTouch>) -> Result<CalibrationStep, ConfigError> {
        self.step = match (self.step, touch) {
            (CalibrationStep::AwaitingPress(i), Some(raw)) if raw.pressure > 0 => {
                debug!(
                    "Calibration target {} recorded raw ({}, {})",
                    i, raw.x, raw.y
                );
                self.readings[i] = raw;
                CalibrationStep::AwaitingRelease(i)
            }
            (CalibrationStep::AwaitingRelease(i), None) if i + 1 < TARGET_COUNT => {
                CalibrationStep::AwaitingPress(i + 1)
            }
            (CalibrationStep::AwaitingRelease(_), None) => match self.compute_bounds() {
                Ok(bounds) => {
                    info!(
                        "Calibration complete: x {}..{}, y {}..{}",
                        bounds.raw_min_x, bounds.raw_max_x, bounds.raw_min_y, bounds.raw_max_y
                    );
                    CalibrationStep::Complete(bounds)
                }
                Err(e) => {
                    warn!("Calibration rejected: {}", e);
                    self.restart();
                    return Err(e);
                }
            },
            (step, _) => step,
        };

        Ok(self.step)
    }

    fn compute_bounds(&self) -> Result<CalibrationBounds, ConfigError> {
        let [tl, tr, br, bl] = self.readings;

        let left = (tl.x as i64 + bl.x as i64) / 2;
        let right = (tr.x as i64 + br.x as i64) / 2;
        let top = (tl.y as i64 + tr.y as i64) / 2;
        let bottom = (bl.y as i64 + br.y as i64) / 2;

        let (min_x, max_x) = extrapolate(left, right, self.display.width);
        let (min_y, max_y) = extrapolate(top, bottom, self.display.height);

        CalibrationBounds::new(min_x, min_y, max_x, max_y)
    }

    /// Draw the current target. Nothing is drawn once calibration is complete.
    pub fn draw<D>(&self, display: &mut D, color: Rgb565) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(center) = self.current_target() else {
            return Ok(());
        };
        let style = PrimitiveStyle::with_stroke(color, 1);

        Line::new(
            center - Point::new(CROSSHAIR_ARM, 0),
            center + Point::new(CROSSHAIR_ARM, 0),
        )
        .into_styled(style)
        .draw(display)?;
        Line::new(
            center - Point::new(0, CROSSHAIR_ARM),
            center + Point::new(0, CROSSHAIR_ARM),
        )
        .into_styled(style)
        .draw(display)?;
        Circle::with_center(center, CROSSHAIR_ARM as u32)
            .into_styled(style)
            .draw(display)?;

        Ok(())
    }
}

/// Extend the raw readings taken at the inset targets out to the screen edges.
fn extrapolate(near: i64, far: i64, extent: u32) -> (i32, i32) {
    let inner = extent as i64 - 2 * TARGET_INSET as i64;
    if inner <= 0 {
        return (near as i32, far as i32);
    }
    let margin = (far - near) * TARGET_INSET as i64 / inner;
    ((near - margin) as i32, (far + margin) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::touch::TouchPoint;
    use crate::touch::mapper::map_to_raw;

    const DISPLAY: Size = Size::new(320, 240);

    fn run_wizard(actual: &CalibrationBounds) -> CalibrationBounds {
        let mut wizard = CalibrationWizard::new(DISPLAY);
        while let Some(target) = wizard.current_target() {
            let raw = map_to_raw(TouchPoint::new(target.x, target.y, 1), actual, DISPLAY);
            // Ignored until the press is seen
            wizard.feed(None).unwrap();
            wizard.feed(Some(raw)).unwrap();
            // Held for a few frames
            wizard.feed(Some(raw)).unwrap();
            wizard.feed(None).unwrap();
        }
        match wizard.step() {
            CalibrationStep::Complete(bounds) => bounds,
            other => panic!("wizard stopped at {:?}", other),
        }
    }

    #[test]
    fn test_targets_are_inset_from_corners() {
        let wizard = CalibrationWizard::new(DISPLAY);
        assert_eq!(wizard.current_target(), Some(Point::new(20, 20)));
        assert_eq!(wizard.targets[2], Point::new(300, 220));
    }

    #[test]
    fn test_recovers_linear_panel() {
        let actual = CalibrationBounds::new(0, 0, 3200, 2400).unwrap();
        assert_eq!(run_wizard(&actual), actual);
    }

    #[test]
    fn test_recovers_inverted_panel() {
        let actual = CalibrationBounds::default();
        let measured = run_wizard(&actual);
        assert!((measured.raw_min_x - actual.raw_min_x).abs() <= 2);
        assert!((measured.raw_max_x - actual.raw_max_x).abs() <= 2);
        assert!((measured.raw_min_y - actual.raw_min_y).abs() <= 2);
        assert!((measured.raw_max_y - actual.raw_max_y).abs() <= 2);
    }

    #[test]
    fn test_release_required_between_targets() {
        let mut wizard = CalibrationWizard::new(DISPLAY);
        let raw = RawTouch::new(500, 500, 3);
        wizard.feed(Some(raw)).unwrap();
        assert_eq!(wizard.step(), CalibrationStep::AwaitingRelease(0));
        wizard.feed(Some(raw)).unwrap();
        assert_eq!(wizard.step(), CalibrationStep::AwaitingRelease(0));
        wizard.feed(None).unwrap();
        assert_eq!(wizard.step(), CalibrationStep::AwaitingPress(1));
    }

    #[test]
    fn test_same_spot_everywhere_restarts() {
        let mut wizard = CalibrationWizard::new(DISPLAY);
        let raw = RawTouch::new(2000, 2000, 3);
        for _ in 0..3 {
            wizard.feed(Some(raw)).unwrap();
            wizard.feed(None).unwrap();
        }
        wizard.feed(Some(raw)).unwrap();
        assert!(wizard.feed(None).is_err());
        assert_eq!(wizard.step(), CalibrationStep::AwaitingPress(0));
    }
}
