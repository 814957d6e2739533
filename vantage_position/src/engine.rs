// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The position engine: tracked elements, the scroll baseline, and emission.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use kurbo::{Point, Size, Vec2};
use vantage_events::{EventBus, Listener};

use crate::error::InvalidEventSpec;
use crate::geometry::GeometrySnapshot;
use crate::host::{HostSignal, PositionHost};
use crate::options::PositionOptions;
use crate::spec::EventSpec;

/// Catch-all event emitted for every triggered spec.
pub const ANY_EVENT: &str = "*";

/// Event emitted at the end of every evaluation pass.
pub const SCROLL_EVENT: &str = "scroll";

/// A registered element and the spec it listens for.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedEntry<E> {
    /// The tracked element.
    pub element: E,
    /// Its validated spec.
    pub spec: EventSpec,
}

/// Payload passed to position listeners.
#[derive(Clone, Debug, PartialEq)]
pub enum PositionEvent<E> {
    /// An element satisfied its spec. Sent under the element id, the spec
    /// string, and [`ANY_EVENT`].
    Position {
        /// The element that triggered.
        element: E,
        /// The spec it satisfied.
        spec: EventSpec,
    },
    /// An evaluation pass finished. Sent under [`SCROLL_EVENT`].
    Scroll {
        /// The scroll offset the pass observed (`x` left, `y` top).
        offset: Point,
    },
}

impl<E> PositionEvent<E> {
    /// The triggering element, for position events.
    pub fn element(&self) -> Option<&E> {
        match self {
            Self::Position { element, .. } => Some(element),
            Self::Scroll { .. } => None,
        }
    }

    /// The satisfied spec, for position events.
    pub fn spec(&self) -> Option<&EventSpec> {
        match self {
            Self::Position { spec, .. } => Some(spec),
            Self::Scroll { .. } => None,
        }
    }
}

/// Tracks elements against the viewport and emits position events.
///
/// ## Lifecycle
///
/// 1) Build with [`PositionEngine::new`] and wrap in an `Rc`.
/// 2) Subscribe with [`PositionEngine::on`] / [`PositionEngine::once`].
/// 3) Call [`PositionEngine::init`]: captures the scroll baseline, discovers
///    marked elements, optionally runs a first pass, and hooks scroll/resize.
///
/// Elements can also be registered by hand with [`PositionEngine::add`] at any
/// point; [`PositionEngine::reset`] + [`PositionEngine::populate`] rescans the
/// page.
///
/// ## Reentrancy
///
/// Listeners run synchronously inside a pass and may call back into the engine
/// (register or remove elements, subscribe, unsubscribe). A pass evaluates the
/// tracked list as it was when the pass began.
pub struct PositionEngine<H: PositionHost> {
    host: Rc<H>,
    options: PositionOptions,
    entries: RefCell<Vec<TrackedEntry<H::Element>>>,
    baseline: Cell<Point>,
    bus: EventBus<PositionEvent<H::Element>>,
    diagnostics: RefCell<Vec<InvalidEventSpec>>,
}

impl<H: PositionHost> fmt::Debug for PositionEngine<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionEngine")
            .field("options", &self.options)
            .field("entries", &self.entries.borrow().len())
            .field("baseline", &self.baseline.get())
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}

impl<H: PositionHost + 'static> PositionEngine<H> {
    /// Create an engine over `host`. Nothing is tracked until
    /// [`PositionEngine::init`] or [`PositionEngine::add`].
    pub fn new(host: Rc<H>, options: PositionOptions) -> Self {
        Self {
            host,
            options,
            entries: RefCell::new(Vec::new()),
            baseline: Cell::new(Point::ZERO),
            bus: EventBus::new(),
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// The host this engine reads from.
    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    /// The engine configuration.
    pub fn options(&self) -> &PositionOptions {
        &self.options
    }

    /// The underlying event bus.
    pub fn events(&self) -> &EventBus<PositionEvent<H::Element>> {
        &self.bus
    }

    /// Subscribe to `event` (an element id, a spec string, [`ANY_EVENT`] or
    /// [`SCROLL_EVENT`]).
    pub fn on(&self, event: &str, listener: Listener<PositionEvent<H::Element>>) {
        self.bus.on(event, listener);
    }

    /// Subscribe to the next `event` only. Returns the handle to cancel with.
    pub fn once(
        &self,
        event: &str,
        listener: Listener<PositionEvent<H::Element>>,
    ) -> Listener<PositionEvent<H::Element>> {
        self.bus.once(event, listener)
    }

    /// Remove one registration of `listener` from `event`.
    pub fn remove_listener(
        &self,
        event: &str,
        listener: &Listener<PositionEvent<H::Element>>,
    ) -> bool {
        self.bus.remove_listener(event, listener)
    }

    /// Validate `spec` and start tracking `element`.
    ///
    /// On an unknown token nothing is registered and the diagnostic is
    /// recorded; it is returned as an error unless
    /// [`safe_mode`](PositionOptions::safe_mode) is set, in which case it is
    /// logged and `Ok(())` is returned.
    pub fn add(&self, element: H::Element, spec: &str) -> Result<(), InvalidEventSpec> {
        match EventSpec::parse(spec) {
            Ok(spec) => {
                self.track(element, spec);
                Ok(())
            }
            Err(err) => self.report(err.with_element(format!("{element:?}"))),
        }
    }

    /// Start tracking `element` under an already validated spec.
    pub fn track(&self, element: H::Element, spec: EventSpec) {
        self.entries
            .borrow_mut()
            .push(TrackedEntry { element, spec });
    }

    /// Stop tracking `element`. Returns how many entries were dropped.
    pub fn remove(&self, element: &H::Element) -> usize {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|entry| entry.element != *element);
        before - entries.len()
    }

    /// Drop the entries tracking `element` under `spec`, leaving its other
    /// registrations in place. Returns how many were removed.
    pub fn remove_spec(&self, element: &H::Element, spec: &EventSpec) -> usize {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|entry| entry.element != *element || entry.spec != *spec);
        before - entries.len()
    }

    /// Drop every tracked entry.
    pub fn reset(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Scan the host for the configured attribute and [`add`](Self::add)
    /// each marked element, in document order.
    ///
    /// Outside safe mode the scan stops at the first invalid spec; elements
    /// before it stay registered.
    pub fn populate(&self) -> Result<(), InvalidEventSpec> {
        let found = self.host.elements_with_attribute(&self.options.attribute);
        log::debug!(
            "discovered {} element(s) with `{}`",
            found.len(),
            self.options.attribute
        );
        for (element, spec) in found {
            self.add(element, &spec)?;
        }
        Ok(())
    }

    /// Start the engine.
    ///
    /// Captures the scroll baseline, runs [`populate`](Self::populate), runs
    /// one pass if [`trigger_on_init`](PositionOptions::trigger_on_init) is
    /// set, then evaluates on every host scroll and resize. The host
    /// callbacks only hold a weak reference to the engine.
    pub fn init(self: &Rc<Self>) -> Result<(), InvalidEventSpec> {
        self.baseline.set(self.host.scroll_offset());
        self.populate()?;

        if self.options.trigger_on_init {
            self.tick();
        }

        for signal in [HostSignal::Scroll, HostSignal::Resize] {
            let engine = Rc::downgrade(self);
            self.host.subscribe(
                signal,
                Box::new(move || {
                    if let Some(engine) = engine.upgrade() {
                        engine.tick();
                    }
                }),
            );
        }
        Ok(())
    }

    /// Run one pass over a snapshot of the tracked list.
    pub fn tick(&self) {
        let entries = self.entries.borrow().clone();
        self.positions(&entries);
    }

    /// Evaluate `entries`, advance the scroll baseline, then emit
    /// [`SCROLL_EVENT`].
    ///
    /// Every entry in the pass sees the same scroll delta.
    pub fn positions(&self, entries: &[TrackedEntry<H::Element>]) {
        let offset = self.host.scroll_offset();
        let delta = offset - self.baseline.get();
        let viewport = self.host.viewport_size();

        for entry in entries {
            self.position(entry, viewport, delta);
        }

        self.baseline.set(offset);
        self.bus
            .emit(SCROLL_EVENT, &PositionEvent::Scroll { offset });
    }

    fn position(&self, entry: &TrackedEntry<H::Element>, viewport: Size, delta: Vec2) {
        if !self.host.is_attached(&entry.element) {
            log::trace!("skipping detached element {:?}", entry.element);
            return;
        }

        let geometry = GeometrySnapshot {
            bounds: self.host.bounding_box(&entry.element),
            viewport,
            delta,
        };
        if !entry.spec.matches(&geometry) {
            return;
        }

        let event = PositionEvent::Position {
            element: entry.element.clone(),
            spec: entry.spec.clone(),
        };
        if let Some(id) = self
            .host
            .element_id(&entry.element)
            .filter(|id| !id.is_empty())
        {
            self.bus.emit(&id, &event);
        }
        self.bus.emit(entry.spec.as_str(), &event);
        self.bus.emit(ANY_EVENT, &event);
    }

    fn report(&self, err: InvalidEventSpec) -> Result<(), InvalidEventSpec> {
        self.diagnostics.borrow_mut().push(err.clone());
        if self.options.safe_mode {
            log::warn!("{err}");
            Ok(())
        } else {
            Err(err)
        }
    }

    /// A copy of the tracked list, in registration order.
    pub fn entries(&self) -> Vec<TrackedEntry<H::Element>> {
        self.entries.borrow().clone()
    }

    /// Number of tracked entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` if nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Every rejected registration so far, oldest first.
    pub fn diagnostics(&self) -> Vec<InvalidEventSpec> {
        self.diagnostics.borrow().clone()
    }

    /// The scroll offset observed at the end of the last pass (or at `init`).
    pub fn scroll_baseline(&self) -> Point {
        self.baseline.get()
    }
}
