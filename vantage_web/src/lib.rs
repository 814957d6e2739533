// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vantage_web --heading-base-level=0

//! `web-sys` host for Vantage.
//!
//! [`WebHost`] implements every host trait of `vantage_position` and
//! `vantage_sticky` over the browser `Window` and `Document` when targeting
//! `wasm32`.
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn start() -> Option<()> {
//!     use std::rc::Rc;
//!     use vantage_position::{PositionEngine, PositionOptions};
//!     use vantage_sticky::{StickyController, StickyOptions};
//!
//!     let host = Rc::new(vantage_web::WebHost::new()?);
//!     let engine = Rc::new(PositionEngine::new(host, PositionOptions::default()));
//!     let sticky = Rc::new(StickyController::new(engine, StickyOptions::default()));
//!     sticky.init().ok()
//! }
//! ```
//!
//! Notes:
//! - Boxes come from `getBoundingClientRect`, the viewport from
//!   `innerWidth`/`innerHeight` (falling back to the root element's client
//!   size), and the scroll offset from `scrollX`/`scrollY`.
//! - Scroll and resize callbacks are registered on the window and live for the
//!   rest of the page; they only hold weak references to the engine.
//! - Failed DOM calls are logged and treated as no-ops.
//! - On other targets this crate is empty.

#![no_std]

extern crate alloc;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebHost;

use kurbo::Size;

/// Viewport size from DOM measurements, where zero means unavailable.
///
/// The width is the root element's client width, which excludes a vertical
/// scrollbar, falling back to the body's. The height is `innerHeight`, falling
/// back to the root element's client height.
#[cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "Only the wasm32 host measures the viewport.")
)]
fn viewport_from(root_client: Size, body_client_width: f64, inner_height: f64) -> Size {
    let width = if root_client.width > 0.0 {
        root_client.width
    } else {
        body_client_width
    };
    let height = if inner_height > 0.0 {
        inner_height
    } else {
        root_client.height
    };
    Size::new(width, height)
}

/// Parse a computed pixel length such as `12px`; anything else is zero.
#[cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "Only the wasm32 host reads computed styles.")
)]
fn pixels(value: &str) -> f64 {
    value
        .trim()
        .trim_end_matches("px")
        .parse::<f64>()
        .unwrap_or(0.0)
}
