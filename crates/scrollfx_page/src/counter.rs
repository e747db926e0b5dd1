//! Animated counters
//!
//! A counter element carries its target in an attribute (`data-target`).
//! The target is parsed once into a [`CounterConfig`]; the animator then
//! counts from 0 to the target when the element scrolls into view, writing
//! the rounded, comma-grouped value as the element's text on every update.
//! Counters fire once and never reset.

use scrollfx_animation::{
    Easing, PinLayout, Scrub, ScrollRange, TriggerInput, TriggerMode, TriggerPhase, TriggerPosition,
    TriggerSpec, TriggerState,
};
use scrollfx_core::{Document, FrameContext, NodeId, Viewport};

use crate::error::CounterConfigError;

/// Validated counter configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterConfig {
    pub target: i64,
}

impl CounterConfig {
    /// Parse the target from an attribute value.
    ///
    /// Reads the leading decimal digits after optional whitespace and sign;
    /// anything after them is ignored (`"1200+"` counts to 1200). There is no
    /// hex prefix (`"0x1F"` is 0), and values outside `i64` are rejected.
    pub fn from_attribute(attribute: &str, value: Option<&str>) -> Result<Self, CounterConfigError> {
        let value = value.ok_or_else(|| CounterConfigError::Missing(attribute.to_string()))?;
        let trimmed = value.trim_start();
        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let magnitude: i64 = rest[..digits_len]
            .parse()
            .map_err(|_| CounterConfigError::NotANumber(value.to_string()))?;
        Ok(Self {
            target: if negative { -magnitude } else { magnitude },
        })
    }
}

/// Snapshot of a counter's accumulator
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterState {
    pub current: f64,
    pub target: i64,
}

/// Drives one counter element
#[derive(Clone, Debug)]
pub struct CounterAnimator {
    element: NodeId,
    config: CounterConfig,
    duration: f32,
    ease: Easing,
    spec: TriggerSpec,
    range: ScrollRange,
    trigger: TriggerState,
    written: Option<f32>,
}

impl CounterAnimator {
    pub fn new(element: NodeId, config: CounterConfig, duration: f32, ease: Easing, start: TriggerPosition) -> Self {
        let spec = TriggerSpec::new(element).start(start).scrub(Scrub::Off).once(true);
        Self {
            element,
            config,
            duration,
            ease,
            spec,
            range: ScrollRange::default(),
            trigger: TriggerState::new(),
            written: None,
        }
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn target(&self) -> i64 {
        self.config.target
    }

    pub fn range(&self) -> ScrollRange {
        self.range
    }

    pub fn phase(&self) -> TriggerPhase {
        self.trigger.phase
    }

    /// Re-resolve the trigger range against the page's pin spacing
    pub fn refresh(&mut self, doc: &Document, viewport: Viewport, pins: &PinLayout) {
        self.range = pins.resolve(doc, &self.spec, viewport);
    }

    /// Accumulator value `seconds` after the counter fired
    pub fn value_at(&self, seconds: f32) -> f64 {
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            (seconds / self.duration).clamp(0.0, 1.0)
        };
        self.value_at_progress(t)
    }

    fn value_at_progress(&self, t: f32) -> f64 {
        // Ease endpoints are exact, so the final value is exactly the target
        if t >= 1.0 {
            return self.config.target as f64;
        }
        self.config.target as f64 * self.ease.apply(t) as f64
    }

    /// Text shown `seconds` after the counter fired
    pub fn display_at(&self, seconds: f32) -> String {
        format_grouped(self.value_at(seconds))
    }

    pub fn state(&self) -> CounterState {
        CounterState {
            current: self.value_at_progress(self.trigger.progress),
            target: self.config.target,
        }
    }

    /// Advance by one frame; writes the text whenever the value moved.
    ///
    /// Returns true while the counter is still counting or waiting to fire.
    pub fn tick(&mut self, doc: &mut Document, ctx: &FrameContext) -> bool {
        if self.trigger.phase == TriggerPhase::Settled {
            return false;
        }

        let input = TriggerInput {
            scroll: ctx.scroll_y,
            dt: ctx.dt,
            range: self.range,
            duration: self.duration,
        };
        let (next, _) = self.trigger.advance(TriggerMode::from(&self.spec), &input);
        if next.phase != TriggerPhase::Armed && self.trigger.phase != next.phase {
            tracing::debug!(value = self.config.target, phase = ?next.phase, "counter");
        }
        self.trigger = next;

        let counting = matches!(next.phase, TriggerPhase::Active | TriggerPhase::Settled);
        if counting && self.written != Some(next.progress) {
            let text = format_grouped(self.value_at_progress(next.progress));
            doc.set_text(self.element, &text);
            self.written = Some(next.progress);
        }

        next.phase != TriggerPhase::Settled
    }
}

/// Round to an integer and group thousands with commas (`1234567.4` → `"1,234,567"`)
pub fn format_grouped(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u64);

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollfx_core::Rect;

    fn animator(target: i64) -> (Document, CounterAnimator) {
        let mut doc = Document::new();
        let el = doc.append_element(doc.body(), "span");
        doc.set_rect(el, Rect::new(0.0, 2000.0, 200.0, 80.0));
        doc.set_text(el, "0");
        let counter = CounterAnimator::new(
            el,
            CounterConfig { target },
            2.0,
            Easing::EaseOutCubic,
            TriggerPosition::edges(0.0, 0.8),
        );
        (doc, counter)
    }

    #[test]
    fn test_parse_attribute() {
        let parse = |v| CounterConfig::from_attribute("data-target", v);
        assert_eq!(parse(Some("12000")).unwrap().target, 12000);
        assert_eq!(parse(Some("  98%")).unwrap().target, 98);
        assert_eq!(parse(Some("-40")).unwrap().target, -40);
        assert_eq!(parse(None), Err(CounterConfigError::Missing("data-target".into())));
        assert_eq!(parse(Some("many")), Err(CounterConfigError::NotANumber("many".into())));
        assert!(parse(Some("")).is_err());
        assert_eq!(parse(Some("0x1F")).unwrap().target, 0);
        assert_eq!(
            parse(Some("99999999999999999999")),
            Err(CounterConfigError::NotANumber("99999999999999999999".into()))
        );
    }

    #[test]
    fn test_grouping() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(999.4), "999");
        assert_eq!(format_grouped(999.5), "1,000");
        assert_eq!(format_grouped(1_234_567.0), "1,234,567");
        assert_eq!(format_grouped(-12_000.0), "-12,000");
    }

    #[test]
    fn test_display_endpoints() {
        let (_, counter) = animator(1_250_000);
        assert_eq!(counter.display_at(0.0), "0");
        assert_eq!(counter.display_at(2.0), "1,250,000");
        assert_eq!(counter.display_at(5.0), "1,250,000");
    }

    #[test]
    fn test_fires_once_and_holds() {
        let (mut doc, mut counter) = animator(350);
        let viewport = Viewport::new(1280.0, 800.0);
        counter.refresh(&doc, viewport, &PinLayout::default());
        assert_eq!(counter.range().start, 2000.0 - 640.0);

        let mut ctx = FrameContext::new(viewport);
        ctx.begin_frame(0.016);
        ctx.scroll_y = 0.0;
        assert!(counter.tick(&mut doc, &ctx));
        assert_eq!(doc.text_content(counter.element()), "0");
        assert_eq!(counter.phase(), TriggerPhase::Armed);

        ctx.scroll_y = 1500.0;
        for _ in 0..30 {
            ctx.begin_frame(0.1);
            counter.tick(&mut doc, &ctx);
        }
        assert_eq!(counter.phase(), TriggerPhase::Settled);
        assert_eq!(doc.text_content(counter.element()), "350");
        assert_eq!(counter.state().current, 350.0);

        // Scrolling back up leaves the final value in place
        ctx.scroll_y = 0.0;
        ctx.begin_frame(0.016);
        assert!(!counter.tick(&mut doc, &ctx));
        assert_eq!(doc.text_content(counter.element()), "350");
    }

    #[test]
    fn test_intermediate_values_increase() {
        let (mut doc, mut counter) = animator(10_000);
        let viewport = Viewport::new(1280.0, 800.0);
        counter.refresh(&doc, viewport, &PinLayout::default());

        let mut ctx = FrameContext::new(viewport);
        ctx.scroll_y = 1500.0;
        let mut last = -1.0;
        for _ in 0..10 {
            ctx.begin_frame(0.1);
            counter.tick(&mut doc, &ctx);
            let current = counter.state().current;
            assert!(current >= last);
            last = current;
        }
        assert!(last > 0.0 && last < 10_000.0);
    }
}
