// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities the engine depends on.
//!
//! The engine never touches a DOM directly. A host adapter (for example
//! `vantage_web` on `wasm32`, or an in-memory page in tests) implements these
//! traits over its own element handles. Methods take `&self`: element handles
//! behave like DOM references, and every call happens on the UI thread.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect, Size};

/// Common element handle type of a host.
pub trait Host {
    /// A cheap, comparable reference to an element.
    ///
    /// Equality must be identity: two handles are equal iff they refer to
    /// the same node.
    type Element: Clone + PartialEq + Debug + 'static;
}

/// Geometry queries.
pub trait BoxProvider: Host {
    /// The element's border box in viewport coordinates.
    fn bounding_box(&self, element: &Self::Element) -> Rect;

    /// The viewport size; the width excludes any vertical scrollbar.
    fn viewport_size(&self) -> Size;

    /// The document scroll offset (`x` left, `y` top).
    fn scroll_offset(&self) -> Point;
}

/// Element discovery and identity.
pub trait ElementQuery: Host {
    /// Every element carrying `attribute`, in document order, with the
    /// attribute's value.
    fn elements_with_attribute(&self, attribute: &str) -> Vec<(Self::Element, String)>;

    /// The element's `id`, if it has one.
    fn element_id(&self, element: &Self::Element) -> Option<String>;

    /// Whether the element is still attached to a parent node.
    fn is_attached(&self, element: &Self::Element) -> bool;
}

/// Window-level signals that trigger an evaluation pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HostSignal {
    /// The document scrolled.
    Scroll,
    /// The viewport was resized.
    Resize,
}

/// Registration of window-level signal callbacks.
pub trait HostSignals {
    /// Run `callback` every time `signal` fires, for the lifetime of the page.
    fn subscribe(&self, signal: HostSignal, callback: Box<dyn Fn()>);
}

/// Everything [`PositionEngine`](crate::PositionEngine) needs from a host.
pub trait PositionHost: BoxProvider + ElementQuery + HostSignals {}

impl<T: BoxProvider + ElementQuery + HostSignals> PositionHost for T {}
