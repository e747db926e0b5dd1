//! scrollfx Page Layer
//!
//! Everything between the animation engine and a concrete landing page:
//!
//! - **Effect Registry**: declares bindings with selectors and trigger strings
//! - **Pointer Tracker**: custom cursor dot and lagged ring
//! - **Word Reveal**: splits a paragraph into individually animated words
//! - **Counters**: count up to an element's `data-target` once it scrolls in
//! - **Runtime**: owns the document and drives every effect once per frame
//!
//! # Example
//!
//! ```rust
//! use scrollfx_core::PageEvent;
//! use scrollfx_page::{demo, PageConfig, PageRuntime};
//!
//! let config = PageConfig::default();
//! let doc = demo::landing_document(config.viewport.viewport());
//! let mut page = PageRuntime::new(doc, config);
//! page.init();
//!
//! page.handle_event(PageEvent::Scroll { y: 1200.0 });
//! for _ in 0..60 {
//!     page.frame(1.0 / 60.0);
//! }
//! page.teardown();
//! ```

pub mod config;
pub mod counter;
pub mod demo;
pub mod dots;
pub mod error;
pub mod landing;
pub mod pointer;
pub mod registry;
pub mod runtime;
pub mod word_reveal;

pub use config::PageConfig;
pub use counter::{format_grouped, CounterAnimator, CounterConfig, CounterState};
pub use error::{ConfigError, CounterConfigError};
pub use pointer::PointerTracker;
pub use registry::{Anchor, EffectRegistry, Effects, RegistryStats, TimelineStep, Trigger};
pub use runtime::PageRuntime;
