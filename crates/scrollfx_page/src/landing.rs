//! The landing page binding table
//!
//! Every effect of the landing page, declared once against its markup. The
//! selectors match [`crate::demo::landing_document`]; against any other
//! document, missing sections simply register nothing.

use scrollfx_animation::{AnimationPreset, Easing, Scrub, Tween};
use scrollfx_core::Property;

use crate::registry::{EffectRegistry, TimelineStep, Trigger};

/// Trigger shared by the parallax layers: the whole time the section is on screen
fn parallax(scrub: Scrub) -> Trigger {
    Trigger::on("#parallax-section")
        .start("top bottom")
        .end("bottom top")
        .scrub(scrub)
}

/// Register every landing page effect
pub fn register_landing(registry: &mut EffectRegistry<'_>) {
    registry.track_pointer("#cursor", "#cursor-ring");

    // Reading progress
    registry.register_to(
        "progress bar",
        "#progress-bar",
        |t| t.set(Property::ScaleX, 1.0).ease(Easing::Linear),
        Some(Trigger::on("body").start("top top").end("bottom bottom").scrub(Scrub::Instant)),
    );

    register_hero(registry);
    register_reveal(registry);
    register_cards(registry);
    register_parallax(registry);

    // Horizontal gallery: 4 slides, pinned for three screens of scrolling
    registry.register_to(
        "horizontal pin",
        "#pin-wrapper",
        |t| t.set_percent(Property::X, -75.0).ease(Easing::Linear),
        Some(
            Trigger::on("#pin-section")
                .start("top top")
                .end("+=300%")
                .scrub(Scrub::Smoothed(1.0))
                .pin(true),
        ),
    );

    registry.register_counters(".counter-val");

    registry.register_from(
        "cta title",
        ".cta-title",
        |t| {
            t.set(Property::Y, 120.0)
                .set(Property::Opacity, 0.0)
                .duration(1.4)
                .ease(Easing::EaseOutExpo)
        },
        Some(Trigger::on("#cta-section").start("top 75%")),
    );
    registry.register(
        "cta button",
        ".cta-btn",
        AnimationPreset::fade_up(40.0, 0.8).delay(0.3),
        Some(Trigger::on("#cta-section").start("top 70%")),
    );

    // Anchors below the pinned gallery were laid out before it registered
    registry.refresh();
}

fn register_hero(registry: &mut EffectRegistry<'_>) {
    let fade = |duration: f32| Tween::to().set(Property::Opacity, 1.0).duration(duration);

    registry.register_timeline(
        "hero intro",
        0.2,
        [
            TimelineStep::new(
                ".hero-title .line span",
                Tween::to()
                    .set(Property::Y, 0.0)
                    .duration(1.2)
                    .ease(Easing::EaseOutExpo)
                    .stagger(0.12),
            ),
            TimelineStep::new(".hero-label", AnimationPreset::fade_to_visible(0.8, Easing::EaseOutExpo)).at("-=0.8"),
            TimelineStep::new(".hero-sub", AnimationPreset::fade_to_visible(0.8, Easing::EaseOutCubic)).at("-=0.5"),
            TimelineStep::new(".hero-cta", fade(0.6)).at("-=0.4"),
            TimelineStep::new(".hero-scroll-hint", fade(0.6)).at("-=0.3"),
        ],
    );

    registry.register(
        "hero background",
        ".hero-bg-num",
        AnimationPreset::drift_y(30.0),
        Some(Trigger::on("#hero").start("top top").end("bottom top").scrub(Scrub::Instant)),
    );
}

fn register_reveal(registry: &mut EffectRegistry<'_>) {
    registry.register_word_reveal(
        "word reveal",
        "#reveal-text",
        AnimationPreset::line_reveal(0.8).stagger(0.04),
        Trigger::on("#reveal-text").start("top 80%"),
    );

    // The two boxes come in from opposite sides
    let boxes = registry
        .document()
        .query_all("#fade-section .anim-fade")
        .unwrap_or_default();
    for (node, offset) in boxes.into_iter().zip([-80.0, 80.0]) {
        registry.register_nodes(
            "fade box",
            vec![node],
            AnimationPreset::slide_in_x(offset, 0.9),
            Some(Trigger::on_node(node).start("top 85%")),
        );
    }

    registry.register_each(
        "section tag",
        ".section-tag",
        AnimationPreset::fade_up(30.0, 0.7),
        Trigger::on_target().start("top 90%"),
    );
}

fn register_cards(registry: &mut EffectRegistry<'_>) {
    let header = || Trigger::on(".cards-header").start("top 80%");
    registry.register("cards title", ".cards-header h2", AnimationPreset::fade_up(60.0, 1.0), Some(header()));
    registry.register(
        "cards intro",
        ".cards-header p",
        AnimationPreset::fade_up(40.0, 0.8).delay(0.2),
        Some(header()),
    );
    registry.register(
        "cards",
        ".card",
        AnimationPreset::fade_up(100.0, 0.9)
            .ease(Easing::EaseOutExpo)
            .stagger(0.12),
        Some(Trigger::on(".cards-grid").start("top 80%")),
    );
}

fn register_parallax(registry: &mut EffectRegistry<'_>) {
    registry.generate_dots("#dots-layer");

    // Higher smoothing lags further behind the scroll, so layers separate
    registry.register("parallax bg", ".parallax-bg", AnimationPreset::drift_y(20.0), Some(parallax(Scrub::Instant)));
    registry.register(
        "parallax layer 1",
        ".parallax-layer-1",
        AnimationPreset::drift_y(-30.0),
        Some(parallax(Scrub::Smoothed(1.5))),
    );
    registry.register(
        "parallax layer 2",
        ".parallax-layer-2",
        AnimationPreset::drift_y(-15.0).set_percent(Property::X, 10.0),
        Some(parallax(Scrub::Smoothed(2.0))),
    );
    registry.register(
        "dots layer",
        ".dots-layer",
        AnimationPreset::drift_y(-40.0),
        Some(parallax(Scrub::Smoothed(0.8))),
    );

    registry.register(
        "parallax content",
        ".parallax-content",
        AnimationPreset::scale_in(0.8, 1.0),
        Some(Trigger::on("#parallax-section").start("top 70%")),
    );
}
