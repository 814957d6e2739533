// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline style text for placeholders and pinned elements.

use alloc::format;
use alloc::string::String;

use kurbo::{Insets, Rect};

/// Style for a placeholder standing in for an element of `bounds` and `margins`.
pub(crate) fn placeholder(bounds: Rect, margins: Insets) -> String {
    format!(
        "width: {}px; height: {}px; margin: {}px {}px {}px {}px;",
        bounds.width(),
        bounds.height(),
        margins.y0,
        margins.x1,
        margins.y1,
        margins.x0,
    )
}

/// Declarations that pin an element at the viewport top, keeping its
/// horizontal position and width.
///
/// With `fill_viewport` the height is forced to the viewport instead of the
/// measured height.
pub(crate) fn pinned(bounds: Rect, fill_viewport: bool) -> String {
    let height = if fill_viewport {
        String::from("100%")
    } else {
        format!("{}px", bounds.height())
    };
    format!(
        "position: fixed!important; top: 0px!important; left: {}px!important; width: {}px!important; height: {height}!important;",
        bounds.x0,
        bounds.width(),
    )
}

/// Whether an element of `bounds` and `margins` overflows the viewport height.
pub(crate) fn is_taller_than(bounds: Rect, margins: Insets, viewport_height: f64) -> bool {
    margins.y0 + bounds.height() > viewport_height
}

/// Append declarations to existing style text, keeping it well-formed.
pub(crate) fn append(existing: &str, extra: &str) -> String {
    let trimmed = existing.trim_end();
    if trimmed.is_empty() {
        String::from(extra)
    } else if trimmed.ends_with(';') {
        format!("{trimmed} {extra}")
    } else {
        format!("{trimmed}; {extra}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_copies_size_and_margins() {
        let style = placeholder(
            Rect::new(10.0, 20.0, 310.0, 70.5),
            Insets::new(1.0, 2.0, 3.0, 4.0),
        );
        assert_eq!(
            style,
            "width: 300px; height: 50.5px; margin: 2px 3px 4px 1px;"
        );
    }

    #[test]
    fn pinned_keeps_left_and_width() {
        let style = pinned(Rect::new(12.0, -30.0, 212.0, 20.0), false);
        assert_eq!(
            style,
            "position: fixed!important; top: 0px!important; left: 12px!important; width: 200px!important; height: 50px!important;"
        );
        assert!(pinned(Rect::new(0.0, 0.0, 1.0, 1.0), true).ends_with("height: 100%!important;"));
    }

    #[test]
    fn taller_counts_the_top_margin() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 590.0);
        assert!(!is_taller_than(bounds, Insets::ZERO, 600.0));
        assert!(is_taller_than(bounds, Insets::new(0.0, 20.0, 0.0, 0.0), 600.0));
        // The bottom margin is not part of the check.
        assert!(!is_taller_than(bounds, Insets::new(0.0, 0.0, 0.0, 20.0), 600.0));
    }

    #[test]
    fn append_separates_declarations() {
        assert_eq!(append("", "top: 0;"), "top: 0;");
        assert_eq!(append("   ", "top: 0;"), "top: 0;");
        assert_eq!(append("color: red;", "top: 0;"), "color: red; top: 0;");
        assert_eq!(append("color: red", "top: 0;"), "color: red; top: 0;");
    }
}
