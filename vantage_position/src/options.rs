// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Attribute scanned by [`PositionEngine::populate`](crate::PositionEngine::populate) by default.
pub const DEFAULT_ATTRIBUTE: &str = "data-vantage-position";

/// Per-engine configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionOptions {
    /// Run one evaluation pass during `init`, so elements that already
    /// satisfy their spec fire without waiting for the first scroll.
    pub trigger_on_init: bool,
    /// Marker attribute naming an element's event spec.
    pub attribute: String,
    /// Log invalid specs and carry on instead of returning an error.
    pub safe_mode: bool,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            trigger_on_init: true,
            attribute: String::from(DEFAULT_ATTRIBUTE),
            safe_mode: false,
        }
    }
}

impl PositionOptions {
    /// Set [`PositionOptions::trigger_on_init`].
    #[must_use]
    pub fn with_trigger_on_init(mut self, trigger_on_init: bool) -> Self {
        self.trigger_on_init = trigger_on_init;
        self
    }

    /// Set [`PositionOptions::attribute`].
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// Set [`PositionOptions::safe_mode`].
    #[must_use]
    pub fn with_safe_mode(mut self, safe_mode: bool) -> Self {
        self.safe_mode = safe_mode;
        self
    }
}
