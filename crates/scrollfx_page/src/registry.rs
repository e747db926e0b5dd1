//! Effect registry
//!
//! Declares bindings against the document the way a page script would:
//! targets and trigger anchors are CSS selectors, trigger positions are
//! strings like `"top 80%"`. Everything is resolved once, at registration.
//!
//! Registration never fails. A selector that matches nothing makes the
//! binding a no-op (logged at `debug`); a malformed selector, trigger
//! position or counter target skips that one binding (logged at `warn`).
//! Either way the remaining registrations go ahead.

use scrollfx_animation::{
    AnimationError, BindingId, EffectScheduler, Easing, Position, Scrub, Timeline, TimelineId,
    TriggerPosition, TriggerSpec, Tween,
};
use scrollfx_core::{Document, NodeId, Viewport};
use serde::Serialize;

use crate::config::PageConfig;
use crate::counter::{CounterAnimator, CounterConfig};
use crate::dots;
use crate::pointer::PointerTracker;
use crate::word_reveal;

/// Everything the registry registers into and the runtime drives each frame
pub struct Effects {
    pub scheduler: EffectScheduler,
    pub counters: Vec<CounterAnimator>,
    pub pointer: PointerTracker,
}

impl Effects {
    pub fn new(config: &PageConfig) -> Self {
        Self {
            scheduler: EffectScheduler::new(),
            counters: Vec::new(),
            pointer: PointerTracker::new(&config.pointer),
        }
    }

    /// Drop every binding, timeline and counter and detach the followers
    pub fn clear(&mut self) {
        self.scheduler.clear();
        self.counters.clear();
        self.pointer = self.pointer.clone().with_followers(None, None);
    }
}

/// What a trigger is anchored to
#[derive(Clone, Debug, PartialEq)]
pub enum Anchor {
    /// First element matching a selector
    Selector(String),
    Node(NodeId),
    /// The binding's first target
    Target,
}

/// Scroll trigger as written in a binding table
#[derive(Clone, Debug, PartialEq)]
pub struct Trigger {
    anchor: Anchor,
    start: Option<String>,
    end: Option<String>,
    scrub: Scrub,
    pin: bool,
    once: bool,
}

impl Trigger {
    fn with_anchor(anchor: Anchor) -> Self {
        Self {
            anchor,
            start: None,
            end: None,
            scrub: Scrub::Off,
            pin: false,
            once: false,
        }
    }

    /// Anchored to the first element matching `selector`
    pub fn on(selector: &str) -> Self {
        Self::with_anchor(Anchor::Selector(selector.to_string()))
    }

    pub fn on_node(node: NodeId) -> Self {
        Self::with_anchor(Anchor::Node(node))
    }

    /// Anchored to the animated element itself
    pub fn on_target() -> Self {
        Self::with_anchor(Anchor::Target)
    }

    pub fn start(mut self, position: &str) -> Self {
        self.start = Some(position.to_string());
        self
    }

    pub fn end(mut self, position: &str) -> Self {
        self.end = Some(position.to_string());
        self
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

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    fn to_spec(&self, anchor: NodeId) -> Result<TriggerSpec, AnimationError> {
        let mut spec = TriggerSpec::new(anchor)
            .scrub(self.scrub)
            .pin(self.pin)
            .once(self.once);
        if let Some(start) = &self.start {
            spec = spec.start_at(start)?;
        }
        if let Some(end) = &self.end {
            spec = spec.end_at(end)?;
        }
        Ok(spec)
    }
}

/// One step of a chained timeline
#[derive(Clone, Debug)]
pub struct TimelineStep<'s> {
    pub selector: &'s str,
    pub tween: Tween,
    /// `""` (after the previous step), `"-=0.8"`, `"+=0.2"`, `"<"` or an absolute time
    pub position: &'s str,
}

impl<'s> TimelineStep<'s> {
    pub fn new(selector: &'s str, tween: Tween) -> Self {
        Self {
            selector,
            tween,
            position: "",
        }
    }

    pub fn at(mut self, position: &'s str) -> Self {
        self.position = position;
        self
    }
}

/// Registration counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub bindings: usize,
    pub timelines: usize,
    pub counters: usize,
    pub dots: usize,
    /// Registrations that matched no element
    pub skipped: usize,
    /// Registrations dropped because of malformed input
    pub invalid: usize,
}

/// Declares bindings against a document
pub struct EffectRegistry<'a> {
    doc: &'a mut Document,
    effects: &'a mut Effects,
    config: &'a PageConfig,
    viewport: Viewport,
    stats: RegistryStats,
}

impl<'a> EffectRegistry<'a> {
    pub fn new(doc: &'a mut Document, effects: &'a mut Effects, config: &'a PageConfig, viewport: Viewport) -> Self {
        Self {
            doc,
            effects,
            config,
            viewport,
            stats: RegistryStats::default(),
        }
    }

    pub fn document(&self) -> &Document {
        self.doc
    }

    pub fn stats(&self) -> RegistryStats {
        self.stats
    }

    // ========================================================================
    // Resolution helpers
    // ========================================================================

    fn targets(&mut self, label: &str, selector: &str) -> Option<Vec<NodeId>> {
        match self.doc.query_all(selector) {
            Ok(nodes) if nodes.is_empty() => {
                tracing::debug!(binding = label, selector, "selector matched nothing, skipped");
                self.stats.skipped += 1;
                None
            }
            Ok(nodes) => Some(nodes),
            Err(e) => {
                tracing::warn!(binding = label, selector, error = %e, "invalid selector, skipped");
                self.stats.invalid += 1;
                None
            }
        }
    }

    fn trigger_spec(&mut self, label: &str, trigger: &Trigger, targets: &[NodeId]) -> Option<TriggerSpec> {
        let anchor = match &trigger.anchor {
            Anchor::Target => targets.first().copied(),
            Anchor::Node(node) => Some(*node).filter(|n| self.doc.contains(*n)),
            Anchor::Selector(selector) => match self.doc.query(selector) {
                Ok(found) => found,
                Err(e) => {
                    tracing::warn!(binding = label, selector = selector.as_str(), error = %e, "invalid trigger selector, skipped");
                    self.stats.invalid += 1;
                    return None;
                }
            },
        };
        let Some(anchor) = anchor else {
            tracing::debug!(binding = label, "trigger anchor not found, skipped");
            self.stats.skipped += 1;
            return None;
        };

        match trigger.to_spec(anchor) {
            Ok(spec) => Some(spec),
            Err(e) => {
                tracing::warn!(binding = label, error = %e, "invalid trigger, skipped");
                self.stats.invalid += 1;
                None
            }
        }
    }

    // ========================================================================
    // Bindings
    // ========================================================================

    /// Register `tween` over every element matching `selector`
    pub fn register(&mut self, label: &str, selector: &str, tween: Tween, trigger: Option<Trigger>) -> Option<BindingId> {
        let targets = self.targets(label, selector)?;
        self.register_nodes(label, targets, tween, trigger)
    }

    /// Register `tween` over explicit targets
    pub fn register_nodes(
        &mut self,
        label: &str,
        targets: Vec<NodeId>,
        tween: Tween,
        trigger: Option<Trigger>,
    ) -> Option<BindingId> {
        if targets.is_empty() {
            tracing::debug!(binding = label, "no targets, skipped");
            self.stats.skipped += 1;
            return None;
        }
        let spec = match trigger {
            Some(trigger) => Some(self.trigger_spec(label, &trigger, &targets)?),
            None => None,
        };
        let id = self
            .effects
            .scheduler
            .add_binding(self.doc, label, tween, targets, spec, self.viewport)?;
        self.stats.bindings += 1;
        Some(id)
    }

    /// Animate from the current values to the ones `build` sets
    pub fn register_to(
        &mut self,
        label: &str,
        selector: &str,
        build: impl FnOnce(Tween) -> Tween,
        trigger: Option<Trigger>,
    ) -> Option<BindingId> {
        self.register(label, selector, build(Tween::to()), trigger)
    }

    /// Animate from the values `build` sets to the current ones
    pub fn register_from(
        &mut self,
        label: &str,
        selector: &str,
        build: impl FnOnce(Tween) -> Tween,
        trigger: Option<Trigger>,
    ) -> Option<BindingId> {
        self.register(label, selector, build(Tween::from()), trigger)
    }

    pub fn register_from_to(
        &mut self,
        label: &str,
        selector: &str,
        build: impl FnOnce(Tween) -> Tween,
        trigger: Option<Trigger>,
    ) -> Option<BindingId> {
        self.register(label, selector, build(Tween::from_to()), trigger)
    }

    /// One binding per matching element, each with its own copy of `trigger`
    /// (use [`Trigger::on_target`] to anchor each to its element)
    pub fn register_each(&mut self, label: &str, selector: &str, tween: Tween, trigger: Trigger) -> Vec<BindingId> {
        let Some(targets) = self.targets(label, selector) else {
            return Vec::new();
        };
        targets
            .into_iter()
            .filter_map(|target| self.register_nodes(label, vec![target], tween.clone(), Some(trigger.clone())))
            .collect()
    }

    /// Register a chained entrance sequence that starts playing immediately.
    ///
    /// Steps whose selector matches nothing are left out of the chain.
    pub fn register_timeline<'s>(
        &mut self,
        label: &str,
        delay: f32,
        steps: impl IntoIterator<Item = TimelineStep<'s>>,
    ) -> Option<TimelineId> {
        let mut timeline = Timeline::new().with_delay(delay);
        for step in steps {
            let position: Position = match step.position.parse() {
                Ok(position) => position,
                Err(e) => {
                    tracing::warn!(timeline = label, error = %e, "invalid step position, step skipped");
                    self.stats.invalid += 1;
                    continue;
                }
            };
            let Some(targets) = self.targets(label, step.selector) else {
                continue;
            };
            timeline.add(step.tween, targets, position);
        }

        let id = self.effects.scheduler.add_timeline(self.doc, label, timeline)?;
        self.stats.timelines += 1;
        Some(id)
    }

    /// Wrap the words of the first element matching `container` and register
    /// `tween` over the inner word spans
    pub fn register_word_reveal(
        &mut self,
        label: &str,
        container: &str,
        tween: Tween,
        trigger: Trigger,
    ) -> Option<BindingId> {
        let node = *self.targets(label, container)?.first()?;
        let words = word_reveal::wrap_words(self.doc, node);
        self.register_nodes(label, words, tween, Some(trigger))
    }

    // ========================================================================
    // Counters, dots, pointer
    // ========================================================================

    /// Register a counter for every element matching `selector`; returns how
    /// many were registered
    pub fn register_counters(&mut self, selector: &str) -> usize {
        let Some(nodes) = self.targets("counters", selector) else {
            return 0;
        };
        let Some(start) = self.counter_start() else {
            return 0;
        };
        let ease = self.config.counter_easing();
        nodes
            .into_iter()
            .filter(|node| self.add_counter(*node, start, ease))
            .count()
    }

    pub fn register_counter(&mut self, node: NodeId) -> bool {
        match self.counter_start() {
            Some(start) => {
                let ease = self.config.counter_easing();
                self.add_counter(node, start, ease)
            }
            None => false,
        }
    }

    fn counter_start(&mut self) -> Option<TriggerPosition> {
        match self.config.counters.start.parse() {
            Ok(start) => Some(start),
            Err(e) => {
                tracing::warn!(error = %e, "invalid counter trigger start");
                self.stats.invalid += 1;
                None
            }
        }
    }

    fn add_counter(&mut self, node: NodeId, start: TriggerPosition, ease: Easing) -> bool {
        let attribute = self.config.counters.attribute.as_str();
        let config = match CounterConfig::from_attribute(attribute, self.doc.attribute(node, attribute)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "counter skipped");
                self.stats.invalid += 1;
                return false;
            }
        };

        let mut counter = CounterAnimator::new(node, config, self.config.counters.duration, ease, start);
        let pins = self.effects.scheduler.pin_layout(self.doc, self.viewport);
        counter.refresh(self.doc, self.viewport, &pins);

        tracing::debug!(value = config.target, "counter registered");
        self.effects.counters.push(counter);
        self.stats.counters += 1;
        true
    }

    /// Fill the first element matching `layer` with decorative dots
    pub fn generate_dots(&mut self, layer: &str) -> Vec<NodeId> {
        let Some(node) = self.targets("dots", layer).and_then(|nodes| nodes.first().copied()) else {
            return Vec::new();
        };
        let created = dots::generate_dots(self.doc, node, &self.config.dots);
        self.stats.dots += created.len();
        created
    }

    /// Attach the cursor followers; either may be absent
    pub fn track_pointer(&mut self, dot: &str, ring: &str) {
        let dot = self.doc.query(dot).ok().flatten();
        let ring = self.doc.query(ring).ok().flatten();
        if dot.is_none() && ring.is_none() {
            tracing::debug!("no cursor followers found");
        }
        self.effects.pointer = self.effects.pointer.clone().with_followers(dot, ring);
    }

    /// Re-resolve every trigger range after a layout or viewport change
    pub fn refresh(&mut self) {
        refresh(self.doc, self.effects, self.viewport);
    }
}

/// Re-resolve the trigger ranges of every binding and counter
pub fn refresh(doc: &Document, effects: &mut Effects, viewport: Viewport) {
    effects.scheduler.refresh(doc, viewport);
    let pins = effects.scheduler.pin_layout(doc, viewport);
    for counter in &mut effects.counters {
        counter.refresh(doc, viewport, &pins);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollfx_core::{Property, Rect};

    const VIEWPORT: Viewport = Viewport::new(1000.0, 1000.0);

    fn page() -> Document {
        let mut doc = Document::new();
        let body = doc.body();
        for (i, class) in ["card", "card", "card"].iter().enumerate() {
            let card = doc.append_element(body, "div");
            doc.add_class(card, class);
            doc.set_rect(card, Rect::new(0.0, 1000.0 + i as f32 * 300.0, 300.0, 250.0));
        }
        let stat = doc.append_element(body, "span");
        doc.add_class(stat, "counter-val");
        doc.set_attribute(stat, "data-target", "4200");
        doc.set_rect(stat, Rect::new(0.0, 3000.0, 100.0, 40.0));
        let broken = doc.append_element(body, "span");
        doc.add_class(broken, "counter-val");
        doc.set_attribute(broken, "data-target", "lots");
        doc
    }

    #[test]
    fn test_missing_selector_is_noop() {
        let mut doc = page();
        let config = PageConfig::default();
        let mut effects = Effects::new(&config);
        let mut registry = EffectRegistry::new(&mut doc, &mut effects, &config, VIEWPORT);

        assert!(registry
            .register_from("ghost", ".does-not-exist", |t| t.set(Property::Opacity, 0.0), None)
            .is_none());
        assert!(registry
            .register_from("cards", ".card", |t| t.set(Property::Y, 100.0), None)
            .is_some());

        let stats = registry.stats();
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.bindings, 1);
        assert_eq!(effects.scheduler.binding_count(), 1);
    }

    #[test]
    fn test_invalid_input_skips_only_that_binding() {
        let mut doc = page();
        let config = PageConfig::default();
        let mut effects = Effects::new(&config);
        let mut registry = EffectRegistry::new(&mut doc, &mut effects, &config, VIEWPORT);

        let bad_position = Trigger::on(".card").start("top sideways");
        assert!(registry.register_to("bad", ".card", |t| t.set(Property::X, 1.0), Some(bad_position)).is_none());
        assert!(registry.register_to("bad selector", "div > .card", |t| t, None).is_none());
        assert!(registry.register_to("good", ".card", |t| t.set(Property::X, 1.0), None).is_some());
        assert_eq!(registry.stats().invalid, 2);
    }

    #[test]
    fn test_register_each_anchors_to_element() {
        let mut doc = page();
        let config = PageConfig::default();
        let mut effects = Effects::new(&config);
        let mut registry = EffectRegistry::new(&mut doc, &mut effects, &config, VIEWPORT);

        let ids = registry.register_each(
            "cards",
            ".card",
            Tween::from().set(Property::Y, 30.0),
            Trigger::on_target().start("top 90%"),
        );
        assert_eq!(ids.len(), 3);
        let starts: Vec<f32> = ids
            .iter()
            .map(|id| effects.scheduler.binding(*id).unwrap().trigger().unwrap().range.start)
            .collect();
        assert_eq!(starts, vec![100.0, 400.0, 700.0]);
    }

    #[test]
    fn test_counters_skip_malformed() {
        let mut doc = page();
        let config = PageConfig::default();
        let mut effects = Effects::new(&config);
        let mut registry = EffectRegistry::new(&mut doc, &mut effects, &config, VIEWPORT);

        assert_eq!(registry.register_counters(".counter-val"), 1);
        assert_eq!(registry.stats().invalid, 1);
        assert_eq!(effects.counters.len(), 1);
        assert_eq!(effects.counters[0].target(), 4200);
        assert_eq!(effects.counters[0].range().start, 3000.0 - 800.0);
    }

    #[test]
    fn test_timeline_steps_chain() {
        let mut doc = page();
        let config = PageConfig::default();
        let mut effects = Effects::new(&config);
        let mut registry = EffectRegistry::new(&mut doc, &mut effects, &config, VIEWPORT);

        let id = registry
            .register_timeline(
                "intro",
                0.0,
                [
                    TimelineStep::new(".card", Tween::to().set(Property::Y, 0.0).duration(1.2)),
                    TimelineStep::new(".missing", Tween::to().duration(5.0)).at("-=0.2"),
                    TimelineStep::new(".counter-val", Tween::to().duration(0.8)).at("-=0.8"),
                    TimelineStep::new(".card", Tween::to().duration(0.6)).at("sometime"),
                ],
            )
            .unwrap();

        let timeline = effects.scheduler.timeline(id).unwrap();
        let starts: Vec<f32> = timeline.entries().map(|(_, e)| e.start).collect();
        assert_eq!(starts.len(), 2);
        assert!((starts[1] - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_word_reveal_registration() {
        let mut doc = Document::new();
        let p = doc.append_element(doc.body(), "p");
        doc.set_id(p, "reveal-text");
        doc.append_text(p, "scroll is the new click");
        let config = PageConfig::default();
        let mut effects = Effects::new(&config);
        let mut registry = EffectRegistry::new(&mut doc, &mut effects, &config, VIEWPORT);

        let id = registry
            .register_word_reveal(
                "words",
                "#reveal-text",
                Tween::from().set_percent(Property::Y, 100.0).stagger(0.04),
                Trigger::on("#reveal-text").start("top 80%"),
            )
            .unwrap();
        assert_eq!(effects.scheduler.binding(id).unwrap().targets().len(), 5);
        for word in doc.query_all("#reveal-text .word span").unwrap() {
            assert_eq!(doc.prop(word, Property::YPercent), 100.0);
        }
    }
}
