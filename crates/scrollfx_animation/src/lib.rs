//! scrollfx Animation System
//!
//! Easing, tweens, timeline orchestration and scroll triggers.
//!
//! # Features
//!
//! - **Tweens**: to / from / fromTo descriptors with per-target stagger and delay
//! - **Timelines**: chain tweens with overlaps (`"-=0.8"`) or absolute positions
//! - **Scroll Triggers**: scrubbed, smoothed, pinned and one-shot bindings driven
//!   by a pure per-frame state machine
//! - **Scheduler**: advances every binding from `(scroll, dt)` and writes the
//!   resulting properties into the visual tree

pub mod easing;
pub mod error;
pub mod presets;
pub mod scheduler;
pub mod timeline;
pub mod trigger;
pub mod tween;

pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use presets::AnimationPreset;
pub use scheduler::{
    AnimationBinding, BindingId, EffectScheduler, FiredEvent, PinLayout, PinSpacing, ScrollTrigger,
    TimelineId,
};
pub use timeline::{Position, Timeline, TimelineEntryId};
pub use trigger::{
    Offset, Region, Scrub, ScrollRange, TriggerEffect, TriggerInput, TriggerMode, TriggerPhase,
    TriggerPosition, TriggerSpec, TriggerState,
};
pub use tween::{PropValue, Track, Tween, TweenMode};
