//! Custom cursor followers
//!
//! Two elements follow the pointer: the dot snaps to the instant position on
//! every move, the ring eases toward it once per frame. Both are centered on
//! their position using half of their own layout size.

use scrollfx_core::{Document, NodeId, PointerState, Property};

use crate::config::PointerConfig;

/// Places the cursor followers from a [`PointerState`]
#[derive(Clone, Debug)]
pub struct PointerTracker {
    dot: Option<NodeId>,
    ring: Option<NodeId>,
    smoothing: f32,
    dot_size: f32,
    ring_size: f32,
}

impl PointerTracker {
    pub fn new(config: &PointerConfig) -> Self {
        Self {
            dot: None,
            ring: None,
            smoothing: config.smoothing,
            dot_size: config.dot_size,
            ring_size: config.ring_size,
        }
    }

    /// Builder: attach the follower elements (either may be missing)
    pub fn with_followers(mut self, dot: Option<NodeId>, ring: Option<NodeId>) -> Self {
        self.dot = dot;
        self.ring = ring;
        self
    }

    pub fn dot(&self) -> Option<NodeId> {
        self.dot
    }

    pub fn ring(&self) -> Option<NodeId> {
        self.ring
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    /// Record a pointer move and snap the dot onto it
    pub fn on_pointer_move(&self, doc: &mut Document, pointer: &mut PointerState, x: f32, y: f32) {
        pointer.instant_x = x;
        pointer.instant_y = y;
        if let Some(dot) = self.dot {
            place_centered(doc, dot, x, y, self.dot_size);
        }
    }

    /// Per-frame update: ease the lagged position and move the ring
    pub fn frame(&self, doc: &mut Document, pointer: &mut PointerState) {
        pointer.smooth(self.smoothing);
        if let Some(ring) = self.ring {
            place_centered(doc, ring, pointer.lagged_x, pointer.lagged_y, self.ring_size);
        }
    }
}

fn place_centered(doc: &mut Document, node: NodeId, x: f32, y: f32, fallback: f32) {
    let (width, height) = match doc.rect(node) {
        Some(rect) if rect.width > 0.0 && rect.height > 0.0 => (rect.width, rect.height),
        _ => (fallback, fallback),
    };
    doc.set_prop(node, Property::X, x - width / 2.0);
    doc.set_prop(node, Property::Y, y - height / 2.0);
}
