//! Decorative dots for the parallax dots layer

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use scrollfx_core::{Document, NodeId, Property};

use crate::config::DotsConfig;

/// Append `config.count` dots to `layer`.
///
/// `left` and `top` are percentages of the layer (0 to 100); opacity lies in
/// `[min_opacity, min_opacity + opacity_spread)`. The same seed always
/// produces the same dots.
pub fn generate_dots(doc: &mut Document, layer: NodeId, config: &DotsConfig) -> Vec<NodeId> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let dots: Vec<NodeId> = (0..config.count)
        .map(|_| {
            let dot = doc.append_element(layer, "div");
            doc.add_class(dot, "dot");
            doc.set_prop(dot, Property::Left, rng.gen::<f32>() * 100.0);
            doc.set_prop(dot, Property::Top, rng.gen::<f32>() * 100.0);
            doc.set_prop(
                dot,
                Property::Opacity,
                config.min_opacity + rng.gen::<f32>() * config.opacity_spread,
            );
            dot
        })
        .collect();

    tracing::debug!(count = dots.len(), seed = config.seed, "dots generated");
    dots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> (Document, NodeId) {
        let mut doc = Document::new();
        let layer = doc.append_element(doc.body(), "div");
        doc.set_id(layer, "dots-layer");
        (doc, layer)
    }

    #[test]
    fn test_count_and_ranges() {
        let (mut doc, layer) = layer();
        let dots = generate_dots(&mut doc, layer, &DotsConfig::default());
        assert_eq!(dots.len(), 40);
        assert_eq!(doc.query_all("#dots-layer .dot").unwrap().len(), 40);
        for dot in dots {
            let left = doc.prop(dot, Property::Left);
            let top = doc.prop(dot, Property::Top);
            let opacity = doc.prop(dot, Property::Opacity);
            assert!((0.0..100.0).contains(&left));
            assert!((0.0..100.0).contains(&top));
            assert!((0.1..0.5).contains(&opacity), "opacity {opacity}");
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let config = DotsConfig { count: 5, ..Default::default() };
        let (mut a, la) = layer();
        let (mut b, lb) = layer();
        let da = generate_dots(&mut a, la, &config);
        let db = generate_dots(&mut b, lb, &config);
        for (x, y) in da.iter().zip(&db) {
            assert_eq!(a.props(*x), b.props(*y));
        }

        let (mut c, lc) = layer();
        let dc = generate_dots(&mut c, lc, &DotsConfig { seed: 7, ..config });
        assert_ne!(a.props(da[0]), c.props(dc[0]));
    }

    #[test]
    fn test_zero_count() {
        let (mut doc, layer) = layer();
        let config = DotsConfig { count: 0, ..Default::default() };
        assert!(generate_dots(&mut doc, layer, &config).is_empty());
    }
}
