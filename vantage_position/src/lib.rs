// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vantage_position --heading-base-level=0

//! Vantage Position: semantic position events for elements in a scrolling viewport.
//!
//! Register elements with a compound event spec such as `"in"`, `"top"` or
//! `"partially out top"`. On every tick (scroll, resize, or an explicit
//! [`PositionEngine::tick`]) the engine takes one [`GeometrySnapshot`] per
//! element, evaluates its spec, and emits events through an
//! [`EventBus`](vantage_events::EventBus).
//!
//! ## Vocabulary
//!
//! | Token | Holds when |
//! |---|---|
//! | `in` | the box is fully inside the viewport |
//! | `out` | the box is fully outside (or, with `partially`, at least partly outside) |
//! | `partially` | modifier for `out`; no condition of its own |
//! | `top` | top edge is on, or crossed this tick, the viewport top; with `out`, the box sticks out above |
//! | `bottom`, `left`, `right` | the matching edge is on, or crossed, the matching viewport edge |
//! | `middle`, `center` | the vertical/horizontal center is on, or crossed, the viewport midline |
//!
//! A spec triggers when every token in it holds. Edge crossings are detected
//! from the page scroll delta alone (see [`crossed`]), so an edge event fires
//! once per crossing rather than on every tick.
//!
//! ## Emitted events
//!
//! When a spec triggers, the engine emits, in order:
//! 1) the element's `id`, if it has a non-empty one;
//! 2) the spec string itself, e.g. `"partially out top"`;
//! 3) [`ANY_EVENT`] (`"*"`).
//!
//! After every pass it emits [`SCROLL_EVENT`] with the observed scroll offset,
//! whether or not anything triggered.
//!
//! ## Host
//!
//! The engine reads geometry and discovers elements through the traits in
//! [`host`]. Tests can implement them over synthetic boxes; `vantage_web`
//! implements them over `web-sys` on `wasm32`.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::{Cell, RefCell};
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect, Size};
//! use vantage_events::listener;
//! use vantage_position::host::{BoxProvider, ElementQuery, Host, HostSignal, HostSignals};
//! use vantage_position::{PositionEngine, PositionEvent, PositionOptions};
//!
//! // A page with a single 100x100 element, scrolled by hand.
//! struct Page {
//!     scroll: Cell<f64>,
//! }
//!
//! impl Host for Page {
//!     type Element = u32;
//! }
//! impl BoxProvider for Page {
//!     fn bounding_box(&self, _: &u32) -> Rect {
//!         let y = 50.0 - self.scroll.get();
//!         Rect::new(0.0, y, 100.0, y + 100.0)
//!     }
//!     fn viewport_size(&self) -> Size {
//!         Size::new(800.0, 600.0)
//!     }
//!     fn scroll_offset(&self) -> Point {
//!         Point::new(0.0, self.scroll.get())
//!     }
//! }
//! impl ElementQuery for Page {
//!     fn elements_with_attribute(&self, _: &str) -> Vec<(u32, String)> {
//!         vec![(1, "top".into())]
//!     }
//!     fn element_id(&self, _: &u32) -> Option<String> {
//!         Some("hero".into())
//!     }
//!     fn is_attached(&self, _: &u32) -> bool {
//!         true
//!     }
//! }
//! impl HostSignals for Page {
//!     fn subscribe(&self, _: HostSignal, _: Box<dyn Fn()>) {}
//! }
//!
//! let page = Rc::new(Page { scroll: Cell::new(0.0) });
//! let engine = Rc::new(PositionEngine::new(Rc::clone(&page), PositionOptions::default()));
//!
//! let hits = Rc::new(RefCell::new(Vec::new()));
//! let log = Rc::clone(&hits);
//! engine.on("hero", listener(move |event: &PositionEvent<u32>| {
//!     log.borrow_mut().push(event.clone());
//! }));
//! engine.init().unwrap();
//! assert!(hits.borrow().is_empty());
//!
//! // Scroll 60px: the element's top moves from 50 to -10, crossing 0.
//! page.scroll.set(60.0);
//! engine.tick();
//! assert_eq!(hits.borrow().len(), 1);
//!
//! // No further movement, no further event.
//! engine.tick();
//! assert_eq!(hits.borrow().len(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod engine;
mod error;
mod geometry;
pub mod host;
mod options;
mod spec;

pub use engine::{ANY_EVENT, PositionEngine, PositionEvent, SCROLL_EVENT, TrackedEntry};
pub use error::InvalidEventSpec;
pub use geometry::{GeometrySnapshot, crossed};
pub use options::{DEFAULT_ATTRIBUTE, PositionOptions};
pub use spec::{EventSpec, Token, TokenSet};
