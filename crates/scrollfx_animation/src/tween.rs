//! Tweens
//!
//! A tween describes one animation over a set of targets: which properties
//! move, from where to where, for how long, with which curve, and how far
//! apart consecutive targets start (stagger). It is pure data; resolving it
//! against a [`Document`] captures per-target start and end values into
//! [`Track`]s that can then be rendered at any playhead.

use std::str::FromStr;

use indexmap::IndexMap;
use scrollfx_core::{Document, NodeId, Property};

use crate::easing::Easing;
use crate::error::{AnimationError, Result};

/// Duration used when a tween does not set one
pub const DEFAULT_DURATION: f32 = 0.5;

/// A property value as written in a descriptor
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropValue {
    Number(f32),
    /// Percentage of the element's own size (`"100%"`)
    Percent(f32),
}

impl FromStr for PropValue {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || AnimationError::InvalidValue(s.to_string());
        match s.strip_suffix('%') {
            Some(num) => num.trim().parse().map(PropValue::Percent).map_err(|_| invalid()),
            None => s
                .strip_suffix("px")
                .unwrap_or(s)
                .trim()
                .parse()
                .map(PropValue::Number)
                .map_err(|_| invalid()),
        }
    }
}

/// Normalize `(y, "100%")` to `(yPercent, 100)`; other properties keep the bare number
fn normalize(prop: Property, value: PropValue) -> (Property, f32) {
    match value {
        PropValue::Number(v) => (prop, v),
        PropValue::Percent(v) => (prop.percent_variant().unwrap_or(prop), v),
    }
}

/// Which end of the tween the descriptor values describe
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenMode {
    /// Animate from the current values to the given ones
    To,
    /// Animate from the given values to the current ones
    From,
    /// Animate between two explicit value sets
    FromTo,
}

/// Animation descriptor (immutable once registered)
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    mode: TweenMode,
    from: IndexMap<Property, f32>,
    to: IndexMap<Property, f32>,
    duration: f32,
    ease: Easing,
    stagger: f32,
    delay: f32,
}

impl Tween {
    fn with_mode(mode: TweenMode) -> Self {
        Self {
            mode,
            from: IndexMap::new(),
            to: IndexMap::new(),
            duration: DEFAULT_DURATION,
            ease: Easing::EaseOutQuad,
            stagger: 0.0,
            delay: 0.0,
        }
    }

    pub fn to() -> Self {
        Self::with_mode(TweenMode::To)
    }

    pub fn from() -> Self {
        Self::with_mode(TweenMode::From)
    }

    pub fn from_to() -> Self {
        Self::with_mode(TweenMode::FromTo)
    }

    /// Builder: set a descriptor value (the `to` side for `to()`/`from_to()`,
    /// the `from` side for `from()`)
    pub fn set(self, prop: Property, value: f32) -> Self {
        self.set_value(prop, PropValue::Number(value))
    }

    /// Builder: set a percentage value
    pub fn set_percent(self, prop: Property, value: f32) -> Self {
        self.set_value(prop, PropValue::Percent(value))
    }

    pub fn set_value(mut self, prop: Property, value: PropValue) -> Self {
        let (prop, v) = normalize(prop, value);
        match self.mode {
            TweenMode::From => self.from.insert(prop, v),
            TweenMode::To | TweenMode::FromTo => self.to.insert(prop, v),
        };
        self
    }

    /// Builder: set the `from` side of a `from_to()` tween
    pub fn start_value(mut self, prop: Property, value: PropValue) -> Self {
        let (prop, v) = normalize(prop, value);
        self.from.insert(prop, v);
        self
    }

    /// Builder: parse `name` and `value` (`"y"`, `"100%"`) and set them
    pub fn parse_set(self, name: &str, value: &str) -> Result<Self> {
        let prop: Property = name.parse()?;
        let value: PropValue = value.parse()?;
        Ok(self.set_value(prop, value))
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    pub fn ease(mut self, ease: Easing) -> Self {
        self.ease = ease;
        self
    }

    pub fn stagger(mut self, seconds: f32) -> Self {
        self.stagger = seconds.max(0.0);
        self
    }

    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds.max(0.0);
        self
    }

    pub fn mode(&self) -> TweenMode {
        self.mode
    }

    pub fn duration_secs(&self) -> f32 {
        self.duration
    }

    pub fn delay_secs(&self) -> f32 {
        self.delay
    }

    pub fn stagger_secs(&self) -> f32 {
        self.stagger
    }

    pub fn easing(&self) -> Easing {
        self.ease
    }

    /// Properties this tween writes, in descriptor order
    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        let from_only = self.from.keys().filter(|p| !self.to.contains_key(*p));
        self.to.keys().chain(from_only).copied()
    }

    // ========================================================================
    // Timing
    // ========================================================================

    /// Start time of the `k`-th target, relative to the tween's own start
    pub fn target_start(&self, k: usize) -> f32 {
        self.delay + k as f32 * self.stagger
    }

    /// Time until the last of `target_count` targets finishes
    pub fn total_duration(&self, target_count: usize) -> f32 {
        let spread = target_count.saturating_sub(1) as f32 * self.stagger;
        self.delay + spread + self.duration
    }

    /// Eased progress of the `k`-th target at `playhead` seconds
    pub fn target_progress(&self, k: usize, playhead: f32) -> f32 {
        let local = playhead - self.target_start(k);
        let linear = if self.duration <= 0.0 {
            if local >= 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            (local / self.duration).clamp(0.0, 1.0)
        };
        self.ease.apply(linear)
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Capture start/end values for each target from the document's current state
    pub fn resolve(&self, doc: &Document, targets: &[NodeId]) -> Vec<Track> {
        let mut tracks = Vec::with_capacity(targets.len() * self.to.len().max(self.from.len()));
        for (index, &target) in targets.iter().enumerate() {
            for prop in self.properties() {
                let current = doc.prop(target, prop);
                let (start, end) = match self.mode {
                    TweenMode::To => (current, self.to.get(&prop).copied().unwrap_or(current)),
                    TweenMode::From => (self.from.get(&prop).copied().unwrap_or(current), current),
                    TweenMode::FromTo => (
                        self.from.get(&prop).copied().unwrap_or(current),
                        self.to.get(&prop).copied().unwrap_or(current),
                    ),
                };
                tracks.push(Track {
                    target,
                    index,
                    prop,
                    start,
                    end,
                });
            }
        }
        tracks
    }

    /// Write every track's value at `playhead` into the document
    pub fn render(&self, doc: &mut Document, tracks: &[Track], playhead: f32) {
        for track in tracks {
            let t = self.target_progress(track.index, playhead);
            doc.set_prop(track.target, track.prop, track.value_at(t));
        }
    }

    /// Whether the start values must be applied as soon as the tween is registered
    pub fn renders_immediately(&self) -> bool {
        matches!(self.mode, TweenMode::From | TweenMode::FromTo)
    }
}

/// One property of one target, with its captured endpoints
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    pub target: NodeId,
    /// Position of the target in the tween's target list (drives stagger)
    pub index: usize,
    pub prop: Property,
    pub start: f32,
    pub end: f32,
}

impl Track {
    pub fn value_at(&self, eased: f32) -> f32 {
        self.start + (self.end - self.start) * eased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(n: usize) -> (Document, Vec<NodeId>) {
        let mut doc = Document::new();
        let ids = (0..n)
            .map(|_| doc.append_element(doc.body(), "div"))
            .collect();
        (doc, ids)
    }

    #[test]
    fn test_stagger_start_times() {
        let tween = Tween::from().set(Property::Y, 100.0).stagger(0.12).delay(0.3);
        for k in 0..6 {
            let expected = 0.3 + k as f32 * 0.12;
            assert!((tween.target_start(k) - expected).abs() < 1e-6);
        }
        assert!((tween.total_duration(6) - (0.3 + 5.0 * 0.12 + DEFAULT_DURATION)).abs() < 1e-6);
        assert_eq!(tween.total_duration(0), 0.3 + DEFAULT_DURATION);
    }

    #[test]
    fn test_percent_values_normalized() {
        let tween = Tween::from().parse_set("y", "100%").unwrap();
        assert_eq!(tween.properties().collect::<Vec<_>>(), vec![Property::YPercent]);

        let tween = Tween::to().parse_set("x", "-80px").unwrap();
        assert_eq!(tween.properties().collect::<Vec<_>>(), vec![Property::X]);

        assert!(Tween::to().parse_set("y", "abc").is_err());
        assert!(Tween::to().parse_set("skew", "10").is_err());
    }

    #[test]
    fn test_from_tween_resolves_to_current() {
        let (mut doc, ids) = doc_with(1);
        doc.set_prop(ids[0], Property::Opacity, 0.8);
        let tween = Tween::from().set(Property::Opacity, 0.0).duration(1.0).ease(Easing::Linear);
        let tracks = tween.resolve(&doc, &ids);
        assert_eq!(tracks.len(), 1);
        assert_eq!((tracks[0].start, tracks[0].end), (0.0, 0.8));

        tween.render(&mut doc, &tracks, 0.5);
        assert!((doc.prop(ids[0], Property::Opacity) - 0.4).abs() < 1e-6);
        tween.render(&mut doc, &tracks, 10.0);
        assert!((doc.prop(ids[0], Property::Opacity) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_to_tween_staggers_targets() {
        let (mut doc, ids) = doc_with(3);
        let tween = Tween::to()
            .set(Property::Y, 90.0)
            .duration(1.0)
            .stagger(0.5)
            .ease(Easing::Linear);
        let tracks = tween.resolve(&doc, &ids);
        tween.render(&mut doc, &tracks, 1.0);
        let ys: Vec<f32> = ids.iter().map(|id| doc.prop(*id, Property::Y)).collect();
        assert!((ys[0] - 90.0).abs() < 1e-4);
        assert!((ys[1] - 45.0).abs() < 1e-4);
        assert!(ys[2].abs() < 1e-4);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let tween = Tween::to().set(Property::X, 10.0).duration(0.0);
        assert_eq!(tween.target_progress(0, -0.01), 0.0);
        assert_eq!(tween.target_progress(0, 0.0), 1.0);
    }

    #[test]
    fn test_from_to_uses_both_sides() {
        let (doc, ids) = doc_with(1);
        let tween = Tween::from_to()
            .start_value(Property::Scale, PropValue::Number(0.8))
            .set(Property::Scale, 1.2);
        let tracks = tween.resolve(&doc, &ids);
        assert_eq!((tracks[0].start, tracks[0].end), (0.8, 1.2));
        assert!(tween.renders_immediately());
        assert!(!Tween::to().renders_immediately());
    }
}
