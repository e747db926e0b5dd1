//! Page runtime
//!
//! Owns the document, the registered effects and the [`FrameContext`]. The
//! host feeds it events between frames and calls [`PageRuntime::frame`] once
//! per display refresh.
//!
//! ```text
//! new ──► init ──► (handle_event* frame)* ──► teardown
//! ```

use scrollfx_animation::{EffectScheduler, FiredEvent, TriggerPhase};
use scrollfx_core::{Document, FrameContext, PageEvent, Viewport};

use crate::config::PageConfig;
use crate::counter::CounterAnimator;
use crate::landing;
use crate::registry::{self, EffectRegistry, Effects, RegistryStats};

/// A landing page with its effects, driven frame by frame
pub struct PageRuntime {
    doc: Document,
    config: PageConfig,
    effects: Effects,
    ctx: FrameContext,
    stats: RegistryStats,
    initialized: bool,
    torn_down: bool,
}

impl PageRuntime {
    pub fn new(doc: Document, config: PageConfig) -> Self {
        let ctx = FrameContext::new(config.viewport.viewport());
        let effects = Effects::new(&config);
        Self {
            doc,
            config,
            effects,
            ctx,
            stats: RegistryStats::default(),
            initialized: false,
            torn_down: false,
        }
    }

    /// Register the landing page effects
    pub fn init(&mut self) -> RegistryStats {
        self.init_with(landing::register_landing)
    }

    /// Register effects with a custom binding table.
    ///
    /// A second call is ignored while `registry.guard_reinit` is set;
    /// otherwise every binding is registered again and runs twice.
    pub fn init_with(&mut self, register: impl FnOnce(&mut EffectRegistry<'_>)) -> RegistryStats {
        if self.torn_down {
            tracing::warn!("init after teardown ignored");
            return self.stats;
        }
        if self.initialized {
            if self.config.registry.guard_reinit {
                tracing::warn!("page already initialized, init ignored");
                return self.stats;
            }
            tracing::warn!("page initialized again, bindings will be duplicated");
        }

        let mut registry = EffectRegistry::new(&mut self.doc, &mut self.effects, &self.config, self.ctx.viewport);
        register(&mut registry);
        let stats = registry.stats();

        self.stats = stats;
        self.initialized = true;
        tracing::info!(
            bindings = stats.bindings,
            timelines = stats.timelines,
            counters = stats.counters,
            skipped = stats.skipped,
            invalid = stats.invalid,
            "page initialized"
        );
        stats
    }

    /// Apply a host event; ignored after teardown
    pub fn handle_event(&mut self, event: PageEvent) {
        if self.torn_down {
            tracing::trace!(?event, "event after teardown ignored");
            return;
        }
        match event {
            PageEvent::PointerMove { x, y } => {
                self.effects
                    .pointer
                    .on_pointer_move(&mut self.doc, &mut self.ctx.pointer, x, y);
            }
            PageEvent::Scroll { y } => self.ctx.scroll_y = y.max(0.0),
            PageEvent::Resize { width, height } => {
                self.ctx.viewport = Viewport::new(width, height);
                registry::refresh(&self.doc, &mut self.effects, self.ctx.viewport);
            }
            PageEvent::Teardown => self.teardown(),
        }
    }

    /// Advance every effect by `dt` seconds; returns the trigger events of this frame
    pub fn frame(&mut self, dt: f32) -> Vec<FiredEvent> {
        if self.torn_down {
            return Vec::new();
        }
        self.ctx.begin_frame(dt);

        self.effects.pointer.frame(&mut self.doc, &mut self.ctx.pointer);
        let fired = self.effects.scheduler.tick(&mut self.doc, &self.ctx);
        for counter in &mut self.effects.counters {
            counter.tick(&mut self.doc, &self.ctx);
        }
        fired
    }

    /// Detach every effect; later events and frames are no-ops
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.effects.clear();
        self.torn_down = true;
        tracing::info!(frames = self.ctx.frame, "page torn down");
    }

    /// Furthest the page can scroll, pin spacing included
    pub fn max_scroll(&self) -> f32 {
        let height = self.doc.rect(self.doc.body()).map(|r| r.height).unwrap_or_default();
        let spacing: f32 = self
            .effects
            .scheduler
            .pin_layout(&self.doc, self.ctx.viewport)
            .pins()
            .iter()
            .map(|pin| pin.distance)
            .sum();
        (height + spacing - self.ctx.viewport.height).max(0.0)
    }

    pub fn has_active_animations(&self) -> bool {
        self.effects.scheduler.has_active_animations()
            || self
                .effects
                .counters
                .iter()
                .any(|c| c.phase() != TriggerPhase::Settled)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn context(&self) -> &FrameContext {
        &self.ctx
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &EffectScheduler {
        &self.effects.scheduler
    }

    pub fn counters(&self) -> &[CounterAnimator] {
        &self.effects.counters
    }

    pub fn stats(&self) -> RegistryStats {
        self.stats
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}
