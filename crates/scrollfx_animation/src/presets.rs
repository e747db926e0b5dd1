//! Tween presets for common entrance effects
//!
//! Pre-built descriptors for the reveal patterns landing pages reach for
//! again and again. Callers still chain `.stagger()`, `.delay()` etc.

use scrollfx_core::Property;

use crate::easing::Easing;
use crate::tween::Tween;

/// Pre-built tween presets
pub struct AnimationPreset;

impl AnimationPreset {
    // ========================================================================
    // Fade animations
    // ========================================================================

    /// Fade an element that starts hidden up to full opacity
    pub fn fade_to_visible(duration: f32, ease: Easing) -> Tween {
        Tween::to()
            .set(Property::Opacity, 1.0)
            .duration(duration)
            .ease(ease)
    }

    // ========================================================================
    // Rise / slide animations
    // ========================================================================

    /// Rise `distance` pixels into place while fading in
    pub fn fade_up(distance: f32, duration: f32) -> Tween {
        Tween::from()
            .set(Property::Y, distance)
            .set(Property::Opacity, 0.0)
            .duration(duration)
    }

    /// Slide in horizontally from `offset` pixels (negative = from the left)
    pub fn slide_in_x(offset: f32, duration: f32) -> Tween {
        Tween::from()
            .set(Property::X, offset)
            .set(Property::Opacity, 0.0)
            .duration(duration)
            .ease(Easing::EaseOutExpo)
    }

    /// Rise a full line height from below a clipping container
    pub fn line_reveal(duration: f32) -> Tween {
        Tween::from()
            .set_percent(Property::Y, 100.0)
            .set(Property::Opacity, 0.0)
            .duration(duration)
            .ease(Easing::EaseOutExpo)
    }

    // ========================================================================
    // Scale animations
    // ========================================================================

    /// Grow from `scale` while fading in
    pub fn scale_in(scale: f32, duration: f32) -> Tween {
        Tween::from()
            .set(Property::Scale, scale)
            .set(Property::Opacity, 0.0)
            .duration(duration)
    }

    // ========================================================================
    // Scroll-linked
    // ========================================================================

    /// Linear vertical drift by `percent` of the element's height (parallax)
    pub fn drift_y(percent: f32) -> Tween {
        Tween::to()
            .set_percent(Property::Y, percent)
            .ease(Easing::Linear)
    }
}
