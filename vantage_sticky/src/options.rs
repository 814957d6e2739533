// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Attribute marking sticky elements; its value is an optional extra class.
pub const DEFAULT_ATTRIBUTE: &str = "data-vantage-sticky";

/// Id prefix of generated placeholders; the entry index follows it.
pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "vantage-sticky-placeholder-";

/// Sticky controller configuration.
///
/// Class fields may hold several space-separated class names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StickyOptions {
    /// Marker attribute scanned by `populate`.
    pub attribute: String,
    /// Id prefix that identifies placeholders in position events.
    pub placeholder_prefix: String,
    /// Classes given to placeholders.
    pub placeholder_class: String,
    /// Classes added to an element while it is pinned.
    pub pinned_class: String,
    /// Classes added to a pinned element taller than the viewport.
    pub tall_class: String,
}

impl Default for StickyOptions {
    fn default() -> Self {
        Self {
            attribute: String::from(DEFAULT_ATTRIBUTE),
            placeholder_prefix: String::from(DEFAULT_PLACEHOLDER_PREFIX),
            placeholder_class: String::from("vantage sticky placeholder"),
            pinned_class: String::from("vantage sticky element"),
            tall_class: String::from("scrolled"),
        }
    }
}

impl StickyOptions {
    /// Set [`StickyOptions::attribute`].
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// Set [`StickyOptions::placeholder_prefix`].
    #[must_use]
    pub fn with_placeholder_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.placeholder_prefix = prefix.into();
        self
    }

    /// Set [`StickyOptions::placeholder_class`].
    #[must_use]
    pub fn with_placeholder_class(mut self, class: impl Into<String>) -> Self {
        self.placeholder_class = class.into();
        self
    }

    /// Set [`StickyOptions::pinned_class`].
    #[must_use]
    pub fn with_pinned_class(mut self, class: impl Into<String>) -> Self {
        self.pinned_class = class.into();
        self
    }

    /// Set [`StickyOptions::tall_class`].
    #[must_use]
    pub fn with_tall_class(mut self, class: impl Into<String>) -> Self {
        self.tall_class = class.into();
        self
    }
}
