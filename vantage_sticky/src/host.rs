// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities needed on top of [`PositionHost`] to pin elements.

use alloc::string::String;

use kurbo::Insets;
use vantage_position::host::{Host, PositionHost};

/// Inline style and class access.
pub trait StyleAccessor: Host {
    /// The element's inline style text (`style.cssText`).
    fn style_text(&self, element: &Self::Element) -> String;

    /// Replace the element's inline style text.
    fn set_style_text(&self, element: &Self::Element, text: &str);

    /// Computed margins in pixels (`x0` left, `y0` top, `x1` right, `y1` bottom).
    fn computed_margins(&self, element: &Self::Element) -> Insets;

    /// Returns `true` if the element carries the class name.
    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    /// Add a single class name. Adding a present class is a no-op.
    fn add_class(&self, element: &Self::Element, class: &str);

    /// Remove a single class name. Removing an absent class is a no-op.
    fn remove_class(&self, element: &Self::Element, class: &str);
}

/// Tree mutation.
pub trait TreeMutator: Host {
    /// Create a detached element. Returns `None` if the host refuses.
    fn create_element(&self, tag: &str) -> Option<Self::Element>;

    /// Set an attribute (including `id`).
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);

    /// Insert `new` immediately before `reference` under the same parent.
    ///
    /// Returns `false` if `reference` has no parent or the insertion failed.
    fn insert_before(&self, new: &Self::Element, reference: &Self::Element) -> bool;

    /// Detach `element` from its parent. Detached elements are left alone.
    fn remove(&self, element: &Self::Element);
}

/// Everything [`StickyController`](crate::StickyController) needs from a host.
pub trait StickyHost: PositionHost + StyleAccessor + TreeMutator {}

impl<T: PositionHost + StyleAccessor + TreeMutator> StickyHost for T {}
