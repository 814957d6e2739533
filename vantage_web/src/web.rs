// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Insets, Point, Rect, Size};
use vantage_position::host::{BoxProvider, ElementQuery, Host, HostSignal, HostSignals};
use vantage_sticky::host::{StyleAccessor, TreeMutator};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, Window};

use crate::{pixels, viewport_from};

/// Host over the page's window and document.
#[derive(Clone)]
pub struct WebHost {
    window: Window,
    document: Document,
}

impl fmt::Debug for WebHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebHost { .. }")
    }
}

impl WebHost {
    /// Host for the global window. Returns `None` outside a browser document.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    /// Host for an explicit window and document.
    pub fn with_document(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    /// The document elements are queried and created in.
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn computed_style(&self, element: &Element) -> Option<CssStyleDeclaration> {
        match self.window.get_computed_style(element) {
            Ok(style) => style,
            Err(err) => {
                log::warn!("getComputedStyle failed: {err:?}");
                None
            }
        }
    }
}

fn warn_on_err<T>(what: &str, result: Result<T, JsValue>) {
    if let Err(err) = result {
        log::warn!("{what} failed: {err:?}");
    }
}

impl Host for WebHost {
    type Element = Element;
}

impl BoxProvider for WebHost {
    fn bounding_box(&self, element: &Element) -> Rect {
        let r = element.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }

    fn viewport_size(&self) -> Size {
        let root = self.document.document_element().map_or(Size::ZERO, |root| {
            Size::new(
                f64::from(root.client_width()),
                f64::from(root.client_height()),
            )
        });
        let body_width = self
            .document
            .body()
            .map_or(0.0, |body| f64::from(body.client_width()));
        let inner_height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        viewport_from(root, body_width, inner_height)
    }

    fn scroll_offset(&self) -> Point {
        Point::new(
            self.window.scroll_x().unwrap_or(0.0),
            self.window.scroll_y().unwrap_or(0.0),
        )
    }
}

impl ElementQuery for WebHost {
    fn elements_with_attribute(&self, attribute: &str) -> Vec<(Element, String)> {
        let selector = alloc::format!("[{attribute}]");
        let nodes = match self.document.query_selector_all(&selector) {
            Ok(nodes) => nodes,
            Err(err) => {
                log::warn!("querySelectorAll(`{selector}`) failed: {err:?}");
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter_map(|element| {
                let value = element.get_attribute(attribute)?;
                Some((element, value))
            })
            .collect()
    }

    fn element_id(&self, element: &Element) -> Option<String> {
        Some(element.id()).filter(|id| !id.is_empty())
    }

    fn is_attached(&self, element: &Element) -> bool {
        element.parent_node().is_some()
    }
}

impl HostSignals for WebHost {
    fn subscribe(&self, signal: HostSignal, callback: Box<dyn Fn()>) {
        let event = match signal {
            HostSignal::Scroll => "scroll",
            HostSignal::Resize => "resize",
        };
        let closure = Closure::wrap(callback);
        warn_on_err(
            "addEventListener",
            self.window
                .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()),
        );
        closure.forget();
    }
}

impl StyleAccessor for WebHost {
    fn style_text(&self, element: &Element) -> String {
        element
            .dyn_ref::<HtmlElement>()
            .map(|el| el.style().css_text())
            .unwrap_or_default()
    }

    fn set_style_text(&self, element: &Element, text: &str) {
        match element.dyn_ref::<HtmlElement>() {
            Some(el) => el.style().set_css_text(text),
            None => warn_on_err("set style", element.set_attribute("style", text)),
        }
    }

    fn computed_margins(&self, element: &Element) -> Insets {
        let Some(style) = self.computed_style(element) else {
            return Insets::ZERO;
        };
        let side = |name: &str| {
            style
                .get_property_value(name)
                .map_or(0.0, |value| pixels(&value))
        };
        Insets::new(
            side("margin-left"),
            side("margin-top"),
            side("margin-right"),
            side("margin-bottom"),
        )
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&self, element: &Element, class: &str) {
        warn_on_err("classList.add", element.class_list().add_1(class));
    }

    fn remove_class(&self, element: &Element, class: &str) {
        warn_on_err("classList.remove", element.class_list().remove_1(class));
    }
}

impl TreeMutator for WebHost {
    fn create_element(&self, tag: &str) -> Option<Element> {
        match self.document.create_element(tag) {
            Ok(element) => Some(element),
            Err(err) => {
                log::warn!("createElement(`{tag}`) failed: {err:?}");
                None
            }
        }
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) {
        warn_on_err("setAttribute", element.set_attribute(name, value));
    }

    fn insert_before(&self, new: &Element, reference: &Element) -> bool {
        let Some(parent) = reference.parent_node() else {
            return false;
        };
        match parent.insert_before(new, Some(&**reference)) {
            Ok(_) => true,
            Err(err) => {
                log::warn!("insertBefore failed: {err:?}");
                false
            }
        }
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }
}
