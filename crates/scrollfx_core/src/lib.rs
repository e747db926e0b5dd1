//! scrollfx Core Runtime
//!
//! This crate provides the foundational primitives shared by the scrollfx
//! animation and page crates:
//!
//! - **Visual Tree**: an in-memory element tree with layout rects and animated properties
//! - **Selectors**: `#id`, `.class`, `tag` and descendant queries
//! - **Page Events**: pointer, scroll, resize and teardown input from the host
//! - **Frame Context**: the explicit per-frame state handed to every update
//!
//! # Example
//!
//! ```rust
//! use scrollfx_core::dom::{Document, Rect};
//! use scrollfx_core::Property;
//!
//! let mut doc = Document::new();
//! let section = doc.append_element(doc.body(), "section");
//! doc.set_id(section, "hero");
//! doc.set_rect(section, Rect::new(0.0, 0.0, 1280.0, 800.0));
//!
//! let title = doc.append_element(section, "h1");
//! doc.add_class(title, "hero-title");
//! doc.set_prop(title, Property::Opacity, 0.0);
//!
//! assert_eq!(doc.query_all("#hero .hero-title").unwrap(), vec![title]);
//! ```

pub mod context;
pub mod dom;
pub mod error;
pub mod events;
pub mod property;
pub mod selector;

pub use context::{FrameContext, PointerState, Viewport};
pub use dom::{Document, NodeId, Rect};
pub use error::{DomError, Result};
pub use events::{PageEvent, TriggerEvent};
pub use property::Property;
pub use selector::Selector;
