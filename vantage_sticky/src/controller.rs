// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use vantage_events::listener;
use vantage_position::{EventSpec, InvalidEventSpec, PositionEngine, PositionEvent, Token};

use crate::host::StickyHost;
use crate::options::StickyOptions;
use crate::style;

/// Where a sticky element currently lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StickyState<E> {
    /// In normal document flow.
    Normal,
    /// Pinned to the viewport, with `placeholder` holding its place in the flow.
    Pinned {
        /// The node inserted before the element while it is pinned.
        placeholder: E,
    },
}

/// Which engine subscription delivered a position event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventRoute {
    /// `partially out top`: pins sticky elements; placeholders are ignored.
    Pin,
    /// `in` or `top`: placeholders release their element; sticky elements pin.
    Restore,
}

/// A sticky element and what is needed to restore it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StickyEntry<E> {
    element: E,
    state: StickyState<E>,
    saved_style_text: String,
    class_name: Option<String>,
    added_classes: Vec<String>,
}

impl<E> StickyEntry<E> {
    /// The sticky element.
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Current state.
    pub fn state(&self) -> &StickyState<E> {
        &self.state
    }

    /// Returns `true` while the element is pinned.
    pub fn is_active(&self) -> bool {
        matches!(self.state, StickyState::Pinned { .. })
    }

    /// The live placeholder, while pinned.
    pub fn placeholder(&self) -> Option<&E> {
        match &self.state {
            StickyState::Pinned { placeholder } => Some(placeholder),
            StickyState::Normal => None,
        }
    }

    /// Inline style text restored on release.
    pub fn saved_style_text(&self) -> &str {
        &self.saved_style_text
    }

    /// Extra classes applied while pinned, from the marker attribute.
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Classes the controller added on pin and removes on release.
    ///
    /// Classes the element already carried are not listed.
    pub fn added_classes(&self) -> &[String] {
        &self.added_classes
    }
}

/// Pins marked elements to the viewport top while they are scrolled past.
///
/// Each sticky element is tracked under `partially out top`. When it starts
/// sticking out above the viewport it is pinned: a size-matched placeholder
/// is inserted before it and tracked under `in` and `top`, and the element
/// gets fixed positioning. When the placeholder comes back to the top edge
/// (or fully into view) the placeholder is removed and the element's inline
/// style is restored.
///
/// Placeholders are recognised in events by their id, which is
/// [`placeholder_prefix`](StickyOptions::placeholder_prefix) followed by the
/// entry index.
pub struct StickyController<H: StickyHost> {
    engine: Rc<PositionEngine<H>>,
    options: StickyOptions,
    entries: RefCell<Vec<StickyEntry<H::Element>>>,
    watch: EventSpec,
    restore: [EventSpec; 2],
}

impl<H: StickyHost> fmt::Debug for StickyController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StickyController")
            .field("options", &self.options)
            .field("entries", &self.entries.borrow())
            .finish_non_exhaustive()
    }
}

impl<H: StickyHost + 'static> StickyController<H> {
    /// Create a controller that registers with `engine`.
    pub fn new(engine: Rc<PositionEngine<H>>, options: StickyOptions) -> Self {
        Self {
            engine,
            options,
            entries: RefCell::new(Vec::new()),
            watch: EventSpec::from_tokens(&[Token::Partially, Token::Out, Token::Top]),
            restore: [
                EventSpec::from_tokens(&[Token::In]),
                EventSpec::from_tokens(&[Token::Top]),
            ],
        }
    }

    /// The engine this controller listens to.
    pub fn engine(&self) -> &Rc<PositionEngine<H>> {
        &self.engine
    }

    /// The controller configuration.
    pub fn options(&self) -> &StickyOptions {
        &self.options
    }

    /// Register `element` as sticky, with optional extra pinned classes.
    pub fn add(&self, element: H::Element, class_name: Option<&str>) {
        let saved_style_text = self.engine.host().style_text(&element);
        self.engine.track(element.clone(), self.watch.clone());
        self.entries.borrow_mut().push(StickyEntry {
            element,
            state: StickyState::Normal,
            saved_style_text,
            class_name: class_name.filter(|c| !c.is_empty()).map(String::from),
            added_classes: Vec::new(),
        });
    }

    /// Rescan the page for the marker attribute.
    ///
    /// Pinned elements are released and previous entries dropped first. Only
    /// the controller's own `partially out top` registrations are untracked;
    /// other registrations for the same elements stay.
    pub fn populate(&self) {
        self.release_all();
        let old = core::mem::take(&mut *self.entries.borrow_mut());
        for entry in &old {
            self.engine.remove_spec(&entry.element, &self.watch);
        }

        let found = self
            .engine
            .host()
            .elements_with_attribute(&self.options.attribute);
        log::debug!("discovered {} sticky element(s)", found.len());
        for (element, class_name) in found {
            self.add(element, Some(&class_name));
        }
    }

    /// Populate, subscribe to the engine, then start the engine.
    ///
    /// Errors come from the engine's own discovery pass.
    pub fn init(self: &Rc<Self>) -> Result<(), InvalidEventSpec> {
        self.populate();

        for spec in &self.restore {
            let controller = Rc::downgrade(self);
            self.engine.on(
                spec.as_str(),
                listener(move |event: &PositionEvent<H::Element>| {
                    if let Some(controller) = controller.upgrade() {
                        controller.handle(event, EventRoute::Restore);
                    }
                }),
            );
        }
        let controller = Rc::downgrade(self);
        self.engine.on(
            self.watch.as_str(),
            listener(move |event: &PositionEvent<H::Element>| {
                if let Some(controller) = controller.upgrade() {
                    controller.handle(event, EventRoute::Pin);
                }
            }),
        );

        self.engine.init()
    }

    /// React to a position event naming a sticky element or a placeholder.
    ///
    /// Placeholder events release the matching entry on the
    /// [`Restore`](EventRoute::Restore) route and are ignored on the
    /// [`Pin`](EventRoute::Pin) route. Events for sticky elements pin them.
    /// Anything else is ignored.
    pub fn handle(&self, event: &PositionEvent<H::Element>, route: EventRoute) {
        let Some(element) = event.element() else {
            return;
        };
        let id = self.engine.host().element_id(element).unwrap_or_default();
        match id.strip_prefix(self.options.placeholder_prefix.as_str()) {
            Some(index) => {
                if route == EventRoute::Pin {
                    return;
                }
                match index.parse::<usize>() {
                    Ok(idx) => self.release_placeholder(idx, element),
                    Err(_) => log::trace!("ignoring malformed placeholder id `{id}`"),
                }
            }
            None => {
                if let Some(idx) = self.find(element) {
                    self.pin(idx);
                }
            }
        }
    }

    fn find(&self, element: &H::Element) -> Option<usize> {
        self.entries
            .borrow()
            .iter()
            .position(|entry| entry.element == *element)
    }

    /// Pin entry `idx`. No-op if it is already pinned.
    fn pin(&self, idx: usize) {
        let (element, class_name) = {
            let entries = self.entries.borrow();
            let Some(entry) = entries.get(idx) else {
                return;
            };
            if entry.is_active() {
                return;
            }
            (entry.element.clone(), entry.class_name.clone())
        };

        let host = self.engine.host();
        let bounds = host.bounding_box(&element);
        let margins = host.computed_margins(&element);
        let saved_style_text = host.style_text(&element);

        let Some(placeholder) = host.create_element("div") else {
            log::debug!("host refused to create a placeholder for {element:?}");
            return;
        };
        for class in self.options.placeholder_class.split_whitespace() {
            host.add_class(&placeholder, class);
        }
        host.set_style_text(&placeholder, &style::placeholder(bounds, margins));
        host.set_attribute(
            &placeholder,
            "id",
            &format!("{}{idx}", self.options.placeholder_prefix),
        );
        host.set_attribute(&placeholder, "data-id", &idx.to_string());
        if !host.insert_before(&placeholder, &element) {
            log::debug!("cannot pin detached sticky element {element:?}");
            return;
        }
        for spec in &self.restore {
            self.engine.track(placeholder.clone(), spec.clone());
        }

        let mut added_classes = Vec::new();
        add_missing(&**host, &element, &self.options.pinned_class, &mut added_classes);
        if let Some(class_name) = &class_name {
            add_missing(&**host, &element, class_name, &mut added_classes);
        }
        let tall = style::is_taller_than(bounds, margins, host.viewport_size().height);
        if tall {
            add_missing(&**host, &element, &self.options.tall_class, &mut added_classes);
        }
        host.set_style_text(
            &element,
            &style::append(&saved_style_text, &style::pinned(bounds, tall)),
        );

        log::debug!("pinned sticky element {idx}");
        if let Some(entry) = self.entries.borrow_mut().get_mut(idx) {
            entry.saved_style_text = saved_style_text;
            entry.added_classes = added_classes;
            entry.state = StickyState::Pinned { placeholder };
        }
    }

    /// Release entry `idx` if `placeholder` is its live placeholder.
    fn release_placeholder(&self, idx: usize, placeholder: &H::Element) {
        let owned = self
            .entries
            .borrow()
            .get(idx)
            .and_then(StickyEntry::placeholder)
            .is_some_and(|p| p == placeholder);
        if owned {
            self.release(idx);
        } else {
            log::trace!("ignoring stale placeholder {placeholder:?}");
        }
    }

    /// Release entry `idx`. No-op if it is not pinned.
    fn release(&self, idx: usize) {
        let (element, placeholder, saved_style_text, added_classes) = {
            let mut entries = self.entries.borrow_mut();
            let Some(entry) = entries.get_mut(idx) else {
                return;
            };
            let StickyState::Pinned { placeholder } =
                core::mem::replace(&mut entry.state, StickyState::Normal)
            else {
                return;
            };
            (
                entry.element.clone(),
                placeholder,
                entry.saved_style_text.clone(),
                core::mem::take(&mut entry.added_classes),
            )
        };

        let host = self.engine.host();
        host.remove(&placeholder);
        self.engine.remove(&placeholder);

        for class in &added_classes {
            host.remove_class(&element, class);
        }
        host.set_style_text(&element, &saved_style_text);
        log::debug!("released sticky element {idx}");
    }

    /// Release every pinned element.
    pub fn release_all(&self) {
        let len = self.entries.borrow().len();
        for idx in 0..len {
            self.release(idx);
        }
    }

    /// A copy of every sticky entry, in registration order.
    pub fn entries(&self) -> Vec<StickyEntry<H::Element>> {
        self.entries.borrow().clone()
    }

    /// The state of `element`, if it is a sticky element.
    pub fn state_of(&self, element: &H::Element) -> Option<StickyState<H::Element>> {
        self.entries
            .borrow()
            .iter()
            .find(|entry| entry.element == *element)
            .map(|entry| entry.state.clone())
    }

    /// Number of pinned elements, which is also the number of live placeholders.
    pub fn pinned_count(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.is_active())
            .count()
    }
}

/// Add each of `classes` the element lacks, recording it in `added`.
fn add_missing<H: StickyHost>(
    host: &H,
    element: &H::Element,
    classes: &str,
    added: &mut Vec<String>,
) {
    for class in classes.split_whitespace() {
        if host.has_class(element, class) || added.iter().any(|c| c == class) {
            continue;
        }
        host.add_class(element, class);
        added.push(String::from(class));
    }
}
