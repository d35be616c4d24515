//! Differentiated debounce gate for touch samples.
//!
//! A single physical press on a resistive panel stays down for many frames.
//! Accepting every one of those frames would toggle a checkbox back and forth,
//! so a new sample is only taken once the long interval has passed since the
//! previous accepted one. Sliders are the exception: while the last accepted
//! touch was claimed by a slider the gate reopens after the short interval so
//! dragging stays fluid.

use embassy_time::Instant;

use crate::config::DebounceConfig;
use crate::ui::WidgetKind;

/// Debounce state owned by a window and mutated only by its update cycle.
#[derive(Debug, Clone)]
pub struct TouchDebouncer {
    config: DebounceConfig,
    last_accepted: Option<Instant>,
    last_kind: WidgetKind,
}

impl TouchDebouncer {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            last_accepted: None,
            last_kind: WidgetKind::Undefined,
        }
    }

    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }

    /// Kind of the widget that claimed the most recently accepted touch.
    pub fn last_kind(&self) -> WidgetKind {
        self.last_kind
    }

    /// Whether a touch reported at `now` may be sampled.
    ///
    /// The very first touch is always accepted.
    pub fn can_accept(&self, now: Instant) -> bool {
        let Some(last) = self.last_accepted else {
            return true;
        };

        let elapsed = now.saturating_duration_since(last);
        elapsed >= self.config.long_interval()
            || (self.last_kind.is_continuous() && elapsed >= self.config.short_interval())
    }

    /// Record that a sample was taken at `now`.
    ///
    /// The claimed kind resets to `Undefined` until dispatch reports a claim.
    pub fn accept(&mut self, now: Instant) {
        self.last_accepted = Some(now);
        self.last_kind = WidgetKind::Undefined;
    }

    /// Record which kind of widget claimed the touch accepted this cycle.
    pub fn record_claim(&mut self, kind: WidgetKind) {
        self.last_kind = kind;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_time::Duration;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_first_touch_is_accepted() {
        let debouncer = TouchDebouncer::new(DebounceConfig::default());
        assert!(debouncer.can_accept(at(0)));
    }

    #[test]
    fn test_long_interval_applies_to_buttons() {
        let mut debouncer = TouchDebouncer::new(DebounceConfig::default());
        debouncer.accept(at(1000));
        debouncer.record_claim(WidgetKind::Button);

        assert!(!debouncer.can_accept(at(1033)));
        assert!(!debouncer.can_accept(at(1249)));
        assert!(debouncer.can_accept(at(1250)));
    }

    #[test]
    fn test_short_interval_applies_after_slider() {
        let mut debouncer = TouchDebouncer::new(DebounceConfig::default());
        debouncer.accept(at(1000));
        debouncer.record_claim(WidgetKind::Slider);

        assert!(!debouncer.can_accept(at(1032)));
        assert!(debouncer.can_accept(at(1033)));
    }

    #[test]
    fn test_unclaimed_touch_uses_long_interval() {
        let mut debouncer = TouchDebouncer::new(DebounceConfig::default());
        debouncer.accept(at(1000));
        debouncer.record_claim(WidgetKind::Slider);

        // The next sample misses every widget
        debouncer.accept(at(1040));
        assert_eq!(debouncer.last_kind(), WidgetKind::Undefined);
        assert!(!debouncer.can_accept(at(1080)));
        assert!(debouncer.can_accept(at(1290)));
    }

    #[test]
    fn test_held_touch_never_accepted_faster_than_interval() {
        let config = DebounceConfig::default();
        for (kind, interval) in [
            (WidgetKind::CheckBox, config.long_interval()),
            (WidgetKind::Slider, config.short_interval()),
        ] {
            let mut debouncer = TouchDebouncer::new(config);
            let mut last: Option<Instant> = None;
            // One frame every 7 ms for two seconds
            for frame in 0..300u64 {
                let now = at(frame * 7);
                if debouncer.can_accept(now) {
                    if let Some(previous) = last {
                        assert!(now - previous >= interval);
                    }
                    debouncer.accept(now);
                    debouncer.record_claim(kind);
                    last = Some(now);
                }
            }
            assert!(last.is_some());
        }
    }

    #[test]
    fn test_custom_intervals() {
        let mut debouncer = TouchDebouncer::new(DebounceConfig {
            long_interval_ms: 100,
            short_interval_ms: 10,
        });
        debouncer.accept(at(0));
        debouncer.record_claim(WidgetKind::Button);
        assert!(debouncer.can_accept(at(0) + Duration::from_millis(100)));
    }
}
