// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vantage_sticky --heading-base-level=0

//! Vantage Sticky: pin elements to the top of the viewport once they are scrolled past.
//!
//! Mark elements with [`DEFAULT_ATTRIBUTE`] (`data-vantage-sticky`); a
//! non-empty attribute value names extra classes added while pinned. A
//! [`StickyController`] tracks each marked element on a shared
//! [`PositionEngine`](vantage_position::PositionEngine) under
//! `partially out top`.
//!
//! ## Pin
//!
//! When a sticky element starts sticking out above the viewport:
//! - a `div` placeholder with the element's size and margins is inserted
//!   before it, so the surrounding layout does not jump;
//! - the element gets `position: fixed` at the viewport top, keeping its
//!   left offset and width;
//! - elements taller than the viewport get `height: 100%` and the
//!   [`tall_class`](StickyOptions::tall_class).
//!
//! ## Release
//!
//! The placeholder is tracked under `in` and `top`. When either fires, the
//! placeholder is removed and the element's inline style text is restored
//! exactly as it was before pinning. Only classes added by the pin are taken
//! off again; classes the element already carried stay.
//!
//! ## Host
//!
//! On top of [`PositionHost`](vantage_position::host::PositionHost), the
//! controller needs [`StyleAccessor`](host::StyleAccessor) and
//! [`TreeMutator`](host::TreeMutator). Everything runs on one thread; the
//! controller and engine are shared through `Rc` and listeners hold weak
//! references.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
pub mod host;
mod options;
mod style;

pub use controller::{EventRoute, StickyController, StickyEntry, StickyState};
pub use options::{DEFAULT_ATTRIBUTE, DEFAULT_PLACEHOLDER_PREFIX, StickyOptions};
