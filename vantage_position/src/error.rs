// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

/// Error returned when an event spec contains a token outside the vocabulary.
///
/// Registration is all-or-nothing: a spec with a single bad token among
/// several valid ones is rejected entirely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidEventSpec {
    /// The first offending token (may be empty for stray spaces).
    pub token: String,
    /// The full spec string as supplied.
    pub spec: String,
    /// Debug rendering of the element the spec was registered for, if any.
    pub element: Option<String>,
}

impl InvalidEventSpec {
    pub(crate) fn new(token: &str, spec: &str) -> Self {
        Self {
            token: String::from(token),
            spec: String::from(spec),
            element: None,
        }
    }

    /// Attach a description of the element being registered.
    #[must_use]
    pub fn with_element(mut self, element: String) -> Self {
        self.element = Some(element);
        self
    }
}

impl fmt::Display for InvalidEventSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid event name `{}` in event spec `{}`",
            self.token, self.spec
        )?;
        if let Some(element) = &self.element {
            write!(f, "; skipping {element}")?;
        }
        Ok(())
    }
}

impl core::error::Error for InvalidEventSpec {}
