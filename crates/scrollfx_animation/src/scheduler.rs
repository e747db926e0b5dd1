//! Effect scheduler
//!
//! Owns every registered binding and timeline and advances them once per
//! frame: time-driven ones by the frame's delta time, scroll-driven ones by
//! feeding the current scroll offset through their trigger state machine.

use scrollfx_core::{Document, FrameContext, NodeId, Property, TriggerEvent, Viewport};
use slotmap::{new_key_type, SlotMap};

use crate::timeline::{Timeline, TimelineEntryId};
use crate::trigger::{
    ScrollRange, TriggerEffect, TriggerInput, TriggerMode, TriggerPhase, TriggerSpec, TriggerState,
};
use crate::tween::{Track, Tween};

new_key_type! {
    pub struct BindingId;
    pub struct TimelineId;
}

/// A trigger attached to a binding, with its resolved range and live state
#[derive(Clone, Debug)]
pub struct ScrollTrigger {
    pub spec: TriggerSpec,
    pub range: ScrollRange,
    pub state: TriggerState,
}

/// A registered tween: targets, captured tracks, optional trigger
pub struct AnimationBinding {
    label: String,
    tween: Tween,
    targets: Vec<NodeId>,
    tracks: Vec<Track>,
    trigger: Option<ScrollTrigger>,
    playhead: f32,
    rendered: Option<f32>,
}

impl AnimationBinding {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    pub fn trigger(&self) -> Option<&ScrollTrigger> {
        self.trigger.as_ref()
    }

    /// Current local time in seconds
    pub fn playhead(&self) -> f32 {
        self.playhead
    }

    pub fn total_duration(&self) -> f32 {
        self.tween.total_duration(self.targets.len())
    }

    /// Normalized progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        match &self.trigger {
            Some(trigger) => trigger.state.progress,
            None => {
                let total = self.total_duration();
                if total <= 0.0 {
                    1.0
                } else {
                    (self.playhead / total).clamp(0.0, 1.0)
                }
            }
        }
    }

    fn is_finished(&self) -> bool {
        match &self.trigger {
            Some(t) => t.state.phase == TriggerPhase::Settled,
            None => self.playhead >= self.total_duration(),
        }
    }

    fn render(&mut self, doc: &mut Document) {
        if self.rendered == Some(self.playhead) {
            return;
        }
        self.tween.render(doc, &self.tracks, self.playhead);
        self.rendered = Some(self.playhead);
    }
}

struct TimelinePlayback {
    label: String,
    timeline: Timeline,
    tracks: Vec<(TimelineEntryId, Vec<Track>)>,
    rendered: Option<f32>,
}

impl TimelinePlayback {
    fn render(&mut self, doc: &mut Document) {
        let now = self.timeline.current_time();
        if self.rendered == Some(now) {
            return;
        }
        for (entry_id, tracks) in &self.tracks {
            let (Some(entry), Some(playhead)) = (
                self.timeline.entry(*entry_id),
                self.timeline.entry_playhead(*entry_id),
            ) else {
                continue;
            };
            // Entries that have not started keep whatever earlier entries wrote
            if playhead < 0.0 && !entry.tween.renders_immediately() {
                continue;
            }
            entry.tween.render(doc, tracks, playhead);
        }
        self.rendered = Some(now);
    }
}

/// A trigger transition observed during a frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FiredEvent {
    pub binding: BindingId,
    pub event: TriggerEvent,
}

/// The scheduler that ticks all registered effects
pub struct EffectScheduler {
    bindings: SlotMap<BindingId, AnimationBinding>,
    /// Registration order
    order: Vec<BindingId>,
    timelines: SlotMap<TimelineId, TimelinePlayback>,
}

impl EffectScheduler {
    pub fn new() -> Self {
        Self {
            bindings: SlotMap::with_key(),
            order: Vec::new(),
            timelines: SlotMap::with_key(),
        }
    }

    /// Register a tween over `targets`, optionally driven by a scroll trigger.
    ///
    /// Returns `None` (and registers nothing) when there are no targets.
    pub fn add_binding(
        &mut self,
        doc: &mut Document,
        label: &str,
        tween: Tween,
        targets: Vec<NodeId>,
        trigger: Option<TriggerSpec>,
        viewport: Viewport,
    ) -> Option<BindingId> {
        if targets.is_empty() {
            tracing::debug!(binding = label, "no targets, binding skipped");
            return None;
        }

        let tracks = tween.resolve(doc, &targets);
        let pins = self.pin_layout(doc, viewport);
        let trigger = trigger.map(|spec| ScrollTrigger {
            range: pins.resolve(doc, &spec, viewport),
            spec,
            state: TriggerState::new(),
        });

        let mut binding = AnimationBinding {
            label: label.to_string(),
            tween,
            targets,
            tracks,
            trigger,
            playhead: 0.0,
            rendered: None,
        };
        if binding.tween.renders_immediately() {
            binding.render(doc);
        }

        tracing::debug!(
            binding = label,
            targets = binding.targets.len(),
            scroll_driven = binding.trigger.is_some(),
            "binding registered"
        );

        let id = self.bindings.insert(binding);
        self.order.push(id);
        Some(id)
    }

    /// Register a chained timeline; it starts playing immediately
    pub fn add_timeline(&mut self, doc: &mut Document, label: &str, mut timeline: Timeline) -> Option<TimelineId> {
        if timeline.is_empty() {
            tracing::debug!(timeline = label, "empty timeline skipped");
            return None;
        }

        let tracks: Vec<(TimelineEntryId, Vec<Track>)> = timeline
            .entries()
            .map(|(id, entry)| (id, entry.tween.resolve(doc, &entry.targets)))
            .collect();

        for (id, entry_tracks) in &tracks {
            if let Some(entry) = timeline.entry(*id) {
                if entry.tween.renders_immediately() {
                    entry.tween.render(doc, entry_tracks, 0.0);
                }
            }
        }

        timeline.start();
        tracing::debug!(
            timeline = label,
            entries = timeline.len(),
            duration = timeline.duration(),
            "timeline registered"
        );

        Some(self.timelines.insert(TimelinePlayback {
            label: label.to_string(),
            timeline,
            tracks,
            rendered: None,
        }))
    }

    /// Re-resolve every trigger range (after layout or viewport changes)
    pub fn refresh(&mut self, doc: &Document, viewport: Viewport) {
        let pins = self.pin_layout(doc, viewport);
        for id in &self.order {
            let Some(binding) = self.bindings.get_mut(*id) else {
                continue;
            };
            if let Some(trigger) = binding.trigger.as_mut() {
                trigger.range = pins.resolve(doc, &trigger.spec, viewport);
            }
        }
        tracing::debug!(pins = pins.len(), "trigger ranges refreshed");
    }

    /// Spacing added by every pinned trigger, top-most first
    pub fn pin_layout(&self, doc: &Document, viewport: Viewport) -> PinLayout {
        let mut pinned: Vec<(f32, &TriggerSpec)> = self
            .order
            .iter()
            .filter_map(|id| self.bindings.get(*id)?.trigger.as_ref())
            .filter(|t| t.spec.pin)
            .map(|t| (doc.rect(t.spec.anchor).unwrap_or_default().top(), &t.spec))
            .collect();
        pinned.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut layout = PinLayout::default();
        for (top, spec) in pinned {
            let range = layout.resolve(doc, spec, viewport);
            layout.pins.push(PinSpacing {
                anchor: spec.anchor,
                top,
                distance: range.len(),
            });
        }
        layout
    }

    /// Advance every effect by one frame and write the results into `doc`
    pub fn tick(&mut self, doc: &mut Document, ctx: &FrameContext) -> Vec<FiredEvent> {
        let mut fired = Vec::new();

        for id in &self.order {
            let Some(binding) = self.bindings.get_mut(*id) else {
                continue;
            };
            let total = binding.total_duration();

            match binding.trigger.as_mut() {
                Some(trigger) => {
                    let input = TriggerInput {
                        scroll: ctx.scroll_y,
                        dt: ctx.dt,
                        range: trigger.range,
                        duration: total,
                    };
                    let (next, effects) = trigger.state.advance(TriggerMode::from(&trigger.spec), &input);
                    trigger.state = next;

                    for effect in effects {
                        match effect {
                            TriggerEffect::Pin(offset) => {
                                doc.set_prop(trigger.spec.anchor, Property::PinY, offset)
                            }
                            TriggerEffect::Event(event) => {
                                tracing::debug!(
                                    binding = binding.label.as_str(),
                                    event = event.name(),
                                    scroll = ctx.scroll_y,
                                    "trigger event"
                                );
                                fired.push(FiredEvent { binding: *id, event });
                            }
                            TriggerEffect::Settled => {
                                tracing::debug!(binding = binding.label.as_str(), "settled")
                            }
                            TriggerEffect::Fired | TriggerEffect::Reset => {}
                        }
                    }
                    binding.playhead = next.progress * total;
                }
                None => {
                    binding.playhead = (binding.playhead + ctx.dt).min(total);
                }
            }

            binding.render(doc);
        }

        for (_, playback) in self.timelines.iter_mut() {
            playback.timeline.tick(ctx.dt);
            playback.render(doc);
        }

        fired
    }

    pub fn binding(&self, id: BindingId) -> Option<&AnimationBinding> {
        self.bindings.get(id)
    }

    /// Bindings in registration order
    pub fn bindings(&self) -> impl Iterator<Item = (BindingId, &AnimationBinding)> {
        self.order
            .iter()
            .filter_map(|id| self.bindings.get(*id).map(|b| (*id, b)))
    }

    pub fn timeline(&self, id: TimelineId) -> Option<&Timeline> {
        self.timelines.get(id).map(|p| &p.timeline)
    }

    pub fn timeline_label(&self, id: TimelineId) -> Option<&str> {
        self.timelines.get(id).map(|p| p.label.as_str())
    }

    /// Check if any time-driven effect is still running or any trigger can still move
    pub fn has_active_animations(&self) -> bool {
        self.bindings.iter().any(|(_, b)| !b.is_finished())
            || self.timelines.iter().any(|(_, p)| p.timeline.is_playing())
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn timeline_count(&self) -> usize {
        self.timelines.len()
    }

    /// Drop every binding and timeline
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.order.clear();
        self.timelines.clear();
    }
}

impl Default for EffectScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Scroll distance a pinned anchor holds the page for
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinSpacing {
    pub anchor: NodeId,
    /// Layout top of the pinned anchor
    pub top: f32,
    pub distance: f32,
}

/// The pin spacing of a page: everything laid out below a pinned anchor
/// is reached that much later
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PinLayout {
    pins: Vec<PinSpacing>,
}

impl PinLayout {
    pub fn pins(&self) -> &[PinSpacing] {
        &self.pins
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Extra scroll before document point `y` is reached, ignoring the pin
    /// of `anchor` itself
    pub fn shift_at(&self, anchor: NodeId, y: f32) -> f32 {
        self.pins
            .iter()
            .filter(|pin| pin.anchor != anchor && pin.top < y)
            .map(|pin| pin.distance)
            .sum()
    }

    /// Resolve a trigger's range with this spacing applied
    pub fn resolve(&self, doc: &Document, spec: &TriggerSpec, viewport: Viewport) -> ScrollRange {
        let anchor = doc.rect(spec.anchor).unwrap_or_default();
        spec.resolve_with(anchor, viewport, |y| self.shift_at(spec.anchor, y))
    }
}
