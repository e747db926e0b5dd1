//! Headless copy of the landing page markup
//!
//! Layout is precomputed from the viewport size the way a browser would lay
//! the page out, and the initial property values mirror the stylesheet
//! (hidden hero copy, an empty progress bar, title lines pushed below their
//! clipping box).

use scrollfx_core::{Document, NodeId, Property, Rect, Viewport};

/// Text of the word reveal paragraph
pub const REVEAL_TEXT: &str = "Scroll is the new click. Every section of this page moves \
     because you asked it to, one word, one card, one layer at a time.";

/// `data-target` of each counter, in document order
pub const COUNTER_TARGETS: [&str; 4] = ["340", "98", "12000", "2500000"];

/// Vertical offset of the hero title lines before the intro plays
pub const HERO_LINE_OFFSET: f32 = 132.0;

struct Builder {
    doc: Document,
    width: f32,
}

impl Builder {
    fn element(&mut self, parent: NodeId, tag: &str, classes: &str, rect: Rect) -> NodeId {
        let node = self.doc.append_element(parent, tag);
        for class in classes.split_whitespace() {
            self.doc.add_class(node, class);
        }
        self.doc.set_rect(node, rect);
        node
    }

    fn with_id(&mut self, node: NodeId, id: &str) -> NodeId {
        self.doc.set_id(node, id);
        node
    }

    fn text(&mut self, node: NodeId, text: &str) -> NodeId {
        self.doc.append_text(node, text);
        node
    }

    fn hidden(&mut self, node: NodeId) -> NodeId {
        self.doc.set_prop(node, Property::Opacity, 0.0);
        node
    }

    fn section(&mut self, id: &str, top: f32, height: f32) -> NodeId {
        let body = self.doc.body();
        let section = self.element(body, "section", "", Rect::new(0.0, top, self.width, height));
        self.with_id(section, id)
    }

    fn tag(&mut self, section: NodeId, top: f32, label: &str) {
        let tag = self.element(section, "span", "section-tag", Rect::new(80.0, top, 160.0, 24.0));
        self.text(tag, label);
    }
}

/// Build the landing page for `viewport`
pub fn landing_document(viewport: Viewport) -> Document {
    let w = viewport.width;
    let h = viewport.height;
    let mut b = Builder {
        doc: Document::new(),
        width: w,
    };
    let body = b.doc.body();

    // Fixed chrome
    let cursor = b.element(body, "div", "cursor", Rect::new(0.0, 0.0, 12.0, 12.0));
    b.with_id(cursor, "cursor");
    let ring = b.element(body, "div", "cursor-ring", Rect::new(0.0, 0.0, 36.0, 36.0));
    b.with_id(ring, "cursor-ring");
    let bar = b.element(body, "div", "", Rect::new(0.0, 0.0, w, 3.0));
    b.with_id(bar, "progress-bar");
    b.doc.set_prop(bar, Property::ScaleX, 0.0);

    // Hero
    let mut top = 0.0;
    let hero = b.section("hero", top, h);
    let bg = b.element(hero, "div", "hero-bg-num", Rect::new(w * 0.5, h * 0.2, w * 0.4, h * 0.6));
    b.text(bg, "01");
    let label = b.element(hero, "p", "hero-label", Rect::new(80.0, h * 0.25, 400.0, 24.0));
    b.text(label, "Scroll-driven motion");
    b.hidden(label);
    let title = b.element(hero, "h1", "hero-title", Rect::new(80.0, h * 0.3, w - 160.0, 240.0));
    for (i, line) in ["Motion that", "follows you"].iter().enumerate() {
        let row = b.element(title, "div", "line", Rect::new(80.0, h * 0.3 + i as f32 * 120.0, w - 160.0, 120.0));
        let span = b.element(row, "span", "", Rect::new(80.0, h * 0.3 + i as f32 * 120.0, w - 160.0, 120.0));
        b.text(span, line);
        b.doc.set_prop(span, Property::Y, HERO_LINE_OFFSET);
    }
    let sub = b.element(hero, "p", "hero-sub", Rect::new(80.0, h * 0.65, 560.0, 48.0));
    b.text(sub, "Seven sections, one scroll.");
    b.hidden(sub);
    let cta = b.element(hero, "a", "hero-cta", Rect::new(80.0, h * 0.75, 200.0, 48.0));
    b.text(cta, "Start scrolling");
    b.hidden(cta);
    let hint = b.element(hero, "div", "hero-scroll-hint", Rect::new(w / 2.0 - 20.0, h - 80.0, 40.0, 60.0));
    b.hidden(hint);

    // Word reveal
    top += h;
    let reveal = b.section("reveal-section", top, h);
    b.tag(reveal, top + 120.0, "02 / Reveal");
    let text = b.element(reveal, "p", "reveal-text", Rect::new(80.0, top + 200.0, w - 160.0, 320.0));
    b.with_id(text, "reveal-text");
    b.text(text, REVEAL_TEXT);

    // Fade boxes
    top += h;
    let fade = b.section("fade-section", top, h);
    b.tag(fade, top + 120.0, "03 / Fade");
    let half = (w - 240.0) / 2.0;
    for (i, heading) in ["From the left", "From the right"].iter().enumerate() {
        let x = 80.0 + i as f32 * (half + 80.0);
        let card = b.element(fade, "div", "anim-fade", Rect::new(x, top + 240.0, half, 320.0));
        b.text(card, heading);
    }

    // Cards
    top += h;
    let cards_height = h * 1.5;
    let cards = b.section("cards-section", top, cards_height);
    b.tag(cards, top + 120.0, "04 / Cards");
    let header = b.element(cards, "div", "cards-header", Rect::new(80.0, top + 180.0, w - 160.0, 160.0));
    let h2 = b.element(header, "h2", "", Rect::new(80.0, top + 180.0, w - 160.0, 96.0));
    b.text(h2, "Staggered entrances");
    let intro = b.element(header, "p", "", Rect::new(80.0, top + 290.0, w - 160.0, 48.0));
    b.text(intro, "Each card enters a beat after the one before it.");
    let grid = b.element(cards, "div", "cards-grid", Rect::new(80.0, top + 400.0, w - 160.0, 640.0));
    let card_w = (w - 160.0 - 64.0) / 3.0;
    for i in 0..6 {
        let (row, col) = (i / 3, i % 3);
        let rect = Rect::new(
            80.0 + col as f32 * (card_w + 32.0),
            top + 400.0 + row as f32 * 320.0,
            card_w,
            288.0,
        );
        let card = b.element(grid, "div", "card", rect);
        b.text(card, &format!("Card {:02}", i + 1));
    }

    // Parallax
    top += cards_height;
    let parallax_height = h * 1.25;
    let parallax = b.section("parallax-section", top, parallax_height);
    let layer = Rect::new(0.0, top, w, parallax_height);
    b.element(parallax, "div", "parallax-bg", layer);
    b.element(parallax, "div", "parallax-layer-1", layer);
    b.element(parallax, "div", "parallax-layer-2", layer);
    let dots = b.element(parallax, "div", "dots-layer", layer);
    b.with_id(dots, "dots-layer");
    let content = b.element(
        parallax,
        "div",
        "parallax-content",
        Rect::new(w * 0.2, top + parallax_height * 0.3, w * 0.6, parallax_height * 0.4),
    );
    b.text(content, "Depth from speed");

    // Pinned horizontal gallery
    top += parallax_height;
    let pin = b.section("pin-section", top, h);
    let wrapper = b.element(pin, "div", "", Rect::new(0.0, top, w * 4.0, h));
    b.with_id(wrapper, "pin-wrapper");
    for i in 0..4 {
        let slide = b.element(wrapper, "div", "h-slide", Rect::new(i as f32 * w, top, w, h));
        b.text(slide, &format!("Slide {}", i + 1));
    }

    // Counters
    top += h;
    let counters = b.section("counters-section", top, h);
    b.tag(counters, top + 120.0, "06 / Numbers");
    let stat_w = (w - 160.0) / COUNTER_TARGETS.len() as f32;
    for (i, target) in COUNTER_TARGETS.iter().enumerate() {
        let rect = Rect::new(80.0 + i as f32 * stat_w, top + 320.0, stat_w, 80.0);
        let stat = b.element(counters, "div", "stat", rect);
        let value = b.element(stat, "span", "counter-val", rect);
        b.doc.set_attribute(value, "data-target", target);
        b.text(value, "0");
    }

    // Closing call to action
    top += h;
    let cta_section = b.section("cta-section", top, h);
    let cta_title = b.element(cta_section, "h2", "cta-title", Rect::new(80.0, top + 240.0, w - 160.0, 160.0));
    b.text(cta_title, "Keep scrolling");
    let cta_btn = b.element(cta_section, "a", "cta-btn", Rect::new(w / 2.0 - 120.0, top + 460.0, 240.0, 56.0));
    b.text(cta_btn, "Get started");

    top += h;
    b.doc.set_rect(body, Rect::new(0.0, 0.0, w, top));
    b.doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_stack() {
        let viewport = Viewport::new(1280.0, 800.0);
        let doc = landing_document(viewport);
        let ids = [
            "hero",
            "reveal-section",
            "fade-section",
            "cards-section",
            "parallax-section",
            "pin-section",
            "counters-section",
            "cta-section",
        ];
        let mut expected_top = 0.0;
        for id in ids {
            let rect = doc.get_by_id(id).and_then(|n| doc.rect(n)).unwrap();
            assert_eq!(rect.top(), expected_top, "section {id}");
            expected_top = rect.bottom();
        }
        assert_eq!(doc.rect(doc.body()).unwrap().height, expected_top);
    }

    #[test]
    fn test_initial_state_mirrors_stylesheet() {
        let doc = landing_document(Viewport::default());
        let bar = doc.get_by_id("progress-bar").unwrap();
        assert_eq!(doc.prop(bar, Property::ScaleX), 0.0);
        let label = doc.query(".hero-label").unwrap().unwrap();
        assert_eq!(doc.prop(label, Property::Opacity), 0.0);
        for span in doc.query_all(".hero-title .line span").unwrap() {
            assert_eq!(doc.prop(span, Property::Y), HERO_LINE_OFFSET);
        }
        let counters = doc.query_all(".counter-val").unwrap();
        let targets: Vec<_> = counters.iter().map(|c| doc.attribute(*c, "data-target").unwrap()).collect();
        assert_eq!(targets, COUNTER_TARGETS);
        assert_eq!(doc.query_all(".card").unwrap().len(), 6);
        assert_eq!(doc.query_all(".section-tag").unwrap().len(), 4);
    }
}
