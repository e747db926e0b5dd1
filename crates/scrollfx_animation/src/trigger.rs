//! Scroll triggers
//!
//! A trigger ties a binding's progress to the scroll position of an anchor
//! element. Start and end are written the usual way, element edge first
//! and viewport edge second: `"top 80%"` fires when the anchor's top
//! reaches 80% of the viewport height, `"bottom top"` when its bottom
//! reaches the top of the viewport. An end of `"+=300%"` means three
//! viewport heights of scrolling after the start.
//!
//! Each trigger runs a small state machine:
//!
//! ```text
//! Idle ──► Armed ──► Active ──► Settled   (once)
//!             ▲        │
//!             └─ Reset ◄┘                 (scrolled back above start)
//! ```
//!
//! [`TriggerState::advance`] is a pure transition: it takes the previous
//! state and this frame's input and returns the next state plus the side
//! effects (transition events, pin offsets) for the caller to apply.

use std::str::FromStr;

use scrollfx_core::{NodeId, Rect, TriggerEvent, Viewport};
use smallvec::SmallVec;

use crate::error::AnimationError;

/// Distance along an element or the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Offset {
    /// Fraction of the size (`top` = 0, `center` = 0.5, `bottom` = 1, `80%` = 0.8)
    Fraction(f32),
    Pixels(f32),
}

impl Offset {
    pub fn resolve(&self, size: f32) -> f32 {
        match self {
            Offset::Fraction(f) => f * size,
            Offset::Pixels(px) => *px,
        }
    }

    fn parse_keyword(token: &str) -> Option<Self> {
        match token {
            "top" => Some(Offset::Fraction(0.0)),
            "center" => Some(Offset::Fraction(0.5)),
            "bottom" => Some(Offset::Fraction(1.0)),
            _ => {
                if let Some(pct) = token.strip_suffix('%') {
                    pct.parse::<f32>().ok().map(|v| Offset::Fraction(v / 100.0))
                } else {
                    token
                        .strip_suffix("px")
                        .unwrap_or(token)
                        .parse::<f32>()
                        .ok()
                        .map(Offset::Pixels)
                }
            }
        }
    }
}

/// A trigger start or end position
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerPosition {
    /// `"<element edge> <viewport edge>"`
    Edges { element: Offset, viewport: Offset },
    /// `"+=300%"` (viewport heights) or `"+=500"` (pixels) after the start
    Relative(Offset),
    /// Absolute scroll offset in pixels
    Absolute(f32),
}

impl TriggerPosition {
    pub const fn edges(element: f32, viewport: f32) -> Self {
        TriggerPosition::Edges {
            element: Offset::Fraction(element),
            viewport: Offset::Fraction(viewport),
        }
    }

    /// Scroll offset at which the position is reached; `shift_at` gives the
    /// pin spacing above a point of the document
    fn resolve(&self, anchor: Rect, viewport: Viewport, start: f32, shift_at: &impl Fn(f32) -> f32) -> f32 {
        match self {
            TriggerPosition::Edges { element, viewport: vp } => {
                let point = anchor.top() + element.resolve(anchor.height);
                point + shift_at(point) - vp.resolve(viewport.height)
            }
            TriggerPosition::Relative(amount) => start + amount.resolve(viewport.height),
            TriggerPosition::Absolute(y) => *y,
        }
    }
}

impl FromStr for TriggerPosition {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let invalid = |reason: &str| AnimationError::InvalidPosition {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        if let Some(rest) = input.strip_prefix("+=") {
            return Offset::parse_keyword(rest.trim())
                .map(TriggerPosition::Relative)
                .ok_or_else(|| invalid("expected a percentage or pixel amount after `+=`"));
        }

        let tokens: SmallVec<[&str; 2]> = input.split_whitespace().collect();
        match tokens.as_slice() {
            [single] => single
                .parse::<f32>()
                .map(TriggerPosition::Absolute)
                .map_err(|_| invalid("a single token must be a scroll offset")),
            [element, viewport] => {
                let element = Offset::parse_keyword(element)
                    .ok_or_else(|| invalid("unknown element edge"))?;
                let viewport = Offset::parse_keyword(viewport)
                    .ok_or_else(|| invalid("unknown viewport edge"))?;
                Ok(TriggerPosition::Edges { element, viewport })
            }
            _ => Err(invalid("expected `<element> <viewport>`")),
        }
    }
}

/// How scroll position drives progress
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Scrub {
    /// Progress runs on a timer once the trigger is entered
    #[default]
    Off,
    /// Progress is a direct function of scroll position
    Instant,
    /// Like `Instant`, low-pass filtered; the value is the catch-up time in seconds
    Smoothed(f32),
}

impl Scrub {
    pub fn is_scrubbed(&self) -> bool {
        !matches!(self, Scrub::Off)
    }
}

/// Trigger descriptor attached to a binding
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerSpec {
    pub anchor: NodeId,
    pub start: TriggerPosition,
    pub end: TriggerPosition,
    pub scrub: Scrub,
    pub pin: bool,
    pub once: bool,
}

impl TriggerSpec {
    /// Defaults: start `top bottom`, end `bottom top`, timed, not pinned, repeatable
    pub fn new(anchor: NodeId) -> Self {
        Self {
            anchor,
            start: TriggerPosition::edges(0.0, 1.0),
            end: TriggerPosition::edges(1.0, 0.0),
            scrub: Scrub::Off,
            pin: false,
            once: false,
        }
    }

    pub fn start(mut self, position: TriggerPosition) -> Self {
        self.start = position;
        self
    }

    pub fn end(mut self, position: TriggerPosition) -> Self {
        self.end = position;
        self
    }

    /// Builder: parse and set the start position
    pub fn start_at(self, position: &str) -> Result<Self, AnimationError> {
        Ok(self.start(position.parse()?))
    }

    /// Builder: parse and set the end position
    pub fn end_at(self, position: &str) -> Result<Self, AnimationError> {
        Ok(self.end(position.parse()?))
    }

    pub fn scrub(mut self, scrub: Scrub) -> Self {
        self.scrub = scrub;
        self
    }

    pub fn pin(mut self, pin: bool) -> Self {
        self.pin = pin;
        self
    }

    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    /// Resolve the scroll range for an anchor laid out at `anchor`,
    /// with both edges pushed down by `shift` pixels of pin spacing
    pub fn resolve(&self, anchor: Rect, viewport: Viewport, shift: f32) -> ScrollRange {
        self.resolve_with(anchor, viewport, |_| shift)
    }

    /// Resolve the scroll range where the pin spacing depends on the
    /// document position of each edge (an anchor can start above a pinned
    /// section and end below it). Absolute positions are never shifted.
    pub fn resolve_with(&self, anchor: Rect, viewport: Viewport, shift_at: impl Fn(f32) -> f32) -> ScrollRange {
        let start = self.start.resolve(anchor, viewport, 0.0, &shift_at);
        let end = self.end.resolve(anchor, viewport, start, &shift_at);
        ScrollRange::new(start, end)
    }
}

/// Where the scroll position sits relative to a range
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Before,
    Inside,
    After,
}

/// Resolved scroll offsets of a trigger
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ScrollRange {
    pub start: f32,
    pub end: f32,
}

impl ScrollRange {
    /// An end before the start collapses the range onto the start
    pub fn new(start: f32, end: f32) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn len(&self) -> f32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }

    /// Linear progress of `scroll` through the range, clamped to [0, 1]
    pub fn progress(&self, scroll: f32) -> f32 {
        if scroll < self.start {
            0.0
        } else if self.is_empty() || scroll >= self.end {
            1.0
        } else {
            (scroll - self.start) / self.len()
        }
    }

    pub fn region(&self, scroll: f32) -> Region {
        if scroll < self.start {
            Region::Before
        } else if scroll > self.end {
            Region::After
        } else {
            Region::Inside
        }
    }

    /// Offset that holds a pinned anchor in place while inside the range
    pub fn pin_offset(&self, scroll: f32) -> f32 {
        scroll.clamp(self.start, self.end) - self.start
    }
}

/// Lifecycle phase of a trigger
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TriggerPhase {
    /// Registered, never evaluated
    #[default]
    Idle,
    /// Waiting for the scroll position to reach the start
    Armed,
    /// Driving progress
    Active,
    /// One-shot trigger finished; progress stays at 1
    Settled,
    /// Repeatable trigger scrolled back above the start; progress back at 0
    Reset,
}

/// Side effect of a trigger transition
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerEffect {
    Event(TriggerEvent),
    /// Vertical offset to hold a pinned anchor in the viewport
    Pin(f32),
    /// Entered Active
    Fired,
    /// Entered Reset
    Reset,
    /// Entered Settled
    Settled,
}

pub type TriggerEffects = SmallVec<[TriggerEffect; 4]>;

/// Per-frame input to [`TriggerState::advance`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerInput {
    pub scroll: f32,
    pub dt: f32,
    pub range: ScrollRange,
    /// Length in seconds of the timed animation the trigger drives
    pub duration: f32,
}

/// Behaviour flags the state machine needs
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TriggerMode {
    pub scrub: Scrub,
    pub pin: bool,
    pub once: bool,
}

impl From<&TriggerSpec> for TriggerMode {
    fn from(spec: &TriggerSpec) -> Self {
        Self {
            scrub: spec.scrub,
            pin: spec.pin,
            once: spec.once,
        }
    }
}

/// State of one trigger
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TriggerState {
    pub phase: TriggerPhase,
    /// Normalized progress of the driven animation (0.0 to 1.0)
    pub progress: f32,
    /// Region at the previous evaluation; `None` until first evaluated
    pub region: Option<Region>,
}

impl TriggerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure transition: previous state + input -> next state + effects
    pub fn advance(self, mode: TriggerMode, input: &TriggerInput) -> (Self, TriggerEffects) {
        let mut effects = TriggerEffects::new();
        let mut next = self;

        if mode.pin {
            effects.push(TriggerEffect::Pin(input.range.pin_offset(input.scroll)));
        }

        if self.phase == TriggerPhase::Settled {
            return (next, effects);
        }

        let region = input.range.region(input.scroll);
        for event in crossing_events(self.region, region) {
            effects.push(TriggerEffect::Event(*event));
        }
        next.region = Some(region);

        let reached = region != Region::Before;

        match self.phase {
            TriggerPhase::Idle | TriggerPhase::Armed | TriggerPhase::Reset => {
                if reached {
                    next.phase = TriggerPhase::Active;
                    effects.push(TriggerEffect::Fired);
                    if mode.scrub.is_scrubbed() {
                        next.progress = scrub_toward(self.progress, mode.scrub, input);
                    } else {
                        // Timed playback starts on the next frame
                        next.progress = 0.0;
                    }
                } else {
                    if self.phase == TriggerPhase::Idle {
                        next.phase = TriggerPhase::Armed;
                    }
                    next.progress = if mode.scrub.is_scrubbed() {
                        scrub_toward(self.progress, mode.scrub, input)
                    } else {
                        0.0
                    };
                }
            }
            // Active (Settled returned early)
            _ => {
                if mode.scrub.is_scrubbed() {
                    next.progress = scrub_toward(self.progress, mode.scrub, input);
                } else if !reached && !mode.once {
                    next.progress = 0.0;
                } else if input.duration <= 0.0 {
                    next.progress = 1.0;
                } else {
                    next.progress = (self.progress + input.dt / input.duration).min(1.0);
                }

                if !reached && !mode.once {
                    next.phase = TriggerPhase::Reset;
                    effects.push(TriggerEffect::Reset);
                }
            }
        }

        if mode.once && next.phase == TriggerPhase::Active && next.progress >= 1.0 {
            next.phase = TriggerPhase::Settled;
            next.progress = 1.0;
            effects.push(TriggerEffect::Settled);
        }

        (next, effects)
    }
}

fn scrub_toward(current: f32, scrub: Scrub, input: &TriggerInput) -> f32 {
    let target = input.range.progress(input.scroll);
    match scrub {
        Scrub::Off | Scrub::Instant => target,
        Scrub::Smoothed(lag) if lag <= 0.0 => target,
        Scrub::Smoothed(lag) => {
            let alpha = (input.dt / lag).clamp(0.0, 1.0);
            let next = current + (target - current) * alpha;
            if (target - next).abs() < 1e-4 {
                target
            } else {
                next
            }
        }
    }
}

fn crossing_events(previous: Option<Region>, current: Region) -> &'static [TriggerEvent] {
    use Region::*;
    use TriggerEvent::*;
    match (previous, current) {
        (None | Some(Before), Inside) => &[Enter],
        (None | Some(Before), After) => &[Enter, Leave],
        (Some(Inside), After) => &[Leave],
        (Some(Inside), Before) => &[LeaveBack],
        (Some(After), Inside) => &[EnterBack],
        (Some(After), Before) => &[EnterBack, LeaveBack],
        _ => &[],
    }
}
