//! Integration tests for scroll triggers driving tweens
//!
//! These tests run the scheduler against a small document the way the page
//! runtime does, one frame at a time:
//! - Timed triggers replay when repeatable and hold when one-shot
//! - Smoothed scrubbing trails instant scrubbing and then catches up
//! - Trigger events arrive in scroll order

use scrollfx_animation::{EffectScheduler, Easing, Scrub, TriggerSpec, Tween};
use scrollfx_core::{Document, FrameContext, NodeId, Property, Rect, TriggerEvent, Viewport};

const VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};
const DT: f32 = 1.0 / 60.0;

fn page() -> Document {
    let mut doc = Document::new();
    let body = doc.body();
    doc.set_rect(body, Rect::new(0.0, 0.0, 1280.0, 4000.0));
    doc
}

fn block(doc: &mut Document, class: &str, top: f32) -> NodeId {
    let body = doc.body();
    let node = doc.append_element(body, "div");
    doc.add_class(node, class);
    doc.set_rect(node, Rect::new(0.0, top, 1280.0, 200.0));
    node
}

struct Harness {
    doc: Document,
    scheduler: EffectScheduler,
    ctx: FrameContext,
    events: Vec<TriggerEvent>,
}

impl Harness {
    fn new(doc: Document) -> Self {
        Self {
            doc,
            scheduler: EffectScheduler::new(),
            ctx: FrameContext::new(VIEWPORT),
            events: Vec::new(),
        }
    }

    fn bind(&mut self, label: &str, tween: Tween, node: NodeId, spec: TriggerSpec) {
        self.scheduler
            .add_binding(&mut self.doc, label, tween, vec![node], Some(spec), VIEWPORT)
            .unwrap();
    }

    fn scroll(&mut self, y: f32, frames: usize) {
        self.ctx.scroll_y = y;
        for _ in 0..frames {
            self.ctx.begin_frame(DT);
            let fired = self.scheduler.tick(&mut self.doc, &self.ctx);
            self.events.extend(fired.into_iter().map(|f| f.event));
        }
    }

    fn opacity(&self, node: NodeId) -> f32 {
        self.doc.prop(node, Property::Opacity)
    }
}

#[test]
fn test_repeatable_fade_replays() {
    let mut doc = page();
    let node = block(&mut doc, "box", 2000.0);
    let mut h = Harness::new(doc);
    let spec = TriggerSpec::new(node).start_at("top 80%").unwrap();
    h.bind("fade", Tween::from().set(Property::Opacity, 0.0).duration(1.0), node, spec);
    assert_eq!(h.opacity(node), 0.0);

    // Start is 2000 - 640
    h.scroll(1300.0, 30);
    assert_eq!(h.opacity(node), 0.0);

    h.scroll(1500.0, 70);
    assert!((h.opacity(node) - 1.0).abs() < 1e-4);

    // Back above the start: the fade resets to its hidden state
    h.scroll(0.0, 1);
    assert_eq!(h.opacity(node), 0.0);

    h.scroll(1500.0, 30);
    let halfway = h.opacity(node);
    assert!(halfway > 0.0 && halfway < 1.0, "replaying ({halfway})");

    assert_eq!(
        h.events,
        vec![TriggerEvent::Enter, TriggerEvent::LeaveBack, TriggerEvent::Enter]
    );
}

#[test]
fn test_once_fade_holds() {
    let mut doc = page();
    let node = block(&mut doc, "box", 2000.0);
    let mut h = Harness::new(doc);
    let spec = TriggerSpec::new(node).start_at("top 80%").unwrap().once(true);
    h.bind("fade once", Tween::from().set(Property::Opacity, 0.0).duration(0.5), node, spec);

    h.scroll(1500.0, 60);
    assert!((h.opacity(node) - 1.0).abs() < 1e-4);

    h.scroll(0.0, 10);
    assert!((h.opacity(node) - 1.0).abs() < 1e-4);
    assert!(!h.scheduler.has_active_animations());
}

#[test]
fn test_smoothed_scrub_trails_instant() {
    let mut doc = page();
    let near = block(&mut doc, "near", 0.0);
    let far = block(&mut doc, "far", 0.0);
    let body = doc.body();
    let mut h = Harness::new(doc);

    let drift = || Tween::to().set(Property::Y, -100.0).ease(Easing::Linear);
    let whole_page = |scrub| {
        TriggerSpec::new(body)
            .start_at("top top")
            .unwrap()
            .end_at("bottom bottom")
            .unwrap()
            .scrub(scrub)
    };
    h.bind("near", drift(), near, whole_page(Scrub::Instant));
    h.bind("far", drift(), far, whole_page(Scrub::Smoothed(1.0)));

    // Halfway down a 3200px range
    h.scroll(1600.0, 1);
    assert!((h.doc.prop(near, Property::Y) + 50.0).abs() < 1e-3);
    let trailing = h.doc.prop(far, Property::Y);
    assert!(trailing > -50.0 && trailing < 0.0, "smoothed lags ({trailing})");

    h.scroll(1600.0, 600);
    assert!((h.doc.prop(far, Property::Y) + 50.0).abs() < 1e-2);
}
