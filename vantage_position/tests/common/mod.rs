// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory page for engine integration tests.

#![allow(
    missing_docs,
    reason = "Integration-test helper module; not part of the public API."
)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::{Point, Rect, Size};
use vantage_events::listener;
use vantage_position::host::{BoxProvider, ElementQuery, Host, HostSignal, HostSignals};
use vantage_position::{PositionEngine, PositionEvent, PositionOptions};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct El(pub usize);

struct Node {
    /// Box in document coordinates.
    page_box: Rect,
    id: Option<String>,
    attrs: Vec<(String, String)>,
    attached: bool,
}

/// Elements live at fixed document positions; the viewport scrolls over them.
pub struct Page {
    nodes: RefCell<Vec<Node>>,
    scroll: Cell<Point>,
    viewport: Cell<Size>,
    signals: RefCell<Vec<(HostSignal, Box<dyn Fn()>)>>,
}

impl Page {
    pub fn new(viewport: Size) -> Rc<Self> {
        Rc::new(Self {
            nodes: RefCell::new(Vec::new()),
            scroll: Cell::new(Point::ZERO),
            viewport: Cell::new(viewport),
            signals: RefCell::new(Vec::new()),
        })
    }

    pub fn insert(&self, page_box: Rect) -> El {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            page_box,
            id: None,
            attrs: Vec::new(),
            attached: true,
        });
        El(nodes.len() - 1)
    }

    pub fn set_id(&self, el: El, id: &str) {
        self.nodes.borrow_mut()[el.0].id = Some(id.to_owned());
    }

    pub fn set_attr(&self, el: El, name: &str, value: &str) {
        self.nodes.borrow_mut()[el.0]
            .attrs
            .push((name.to_owned(), value.to_owned()));
    }

    pub fn detach(&self, el: El) {
        self.nodes.borrow_mut()[el.0].attached = false;
    }

    pub fn scroll_to(&self, x: f64, y: f64) {
        self.scroll.set(Point::new(x, y));
    }

    pub fn set_viewport(&self, viewport: Size) {
        self.viewport.set(viewport);
    }

    /// Invoke every callback subscribed to `signal`; returns how many ran.
    pub fn fire(&self, signal: HostSignal) -> usize {
        let signals = self.signals.borrow();
        let mut ran = 0;
        for (s, callback) in signals.iter() {
            if *s == signal {
                callback();
                ran += 1;
            }
        }
        ran
    }
}

impl Host for Page {
    type Element = El;
}

impl BoxProvider for Page {
    fn bounding_box(&self, element: &El) -> Rect {
        let scroll = self.scroll.get().to_vec2();
        self.nodes.borrow()[element.0].page_box - scroll
    }

    fn viewport_size(&self) -> Size {
        self.viewport.get()
    }

    fn scroll_offset(&self) -> Point {
        self.scroll.get()
    }
}

impl ElementQuery for Page {
    fn elements_with_attribute(&self, attribute: &str) -> Vec<(El, String)> {
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| {
                node.attrs
                    .iter()
                    .find(|(name, _)| name == attribute)
                    .map(|(_, value)| (El(idx), value.clone()))
            })
            .collect()
    }

    fn element_id(&self, element: &El) -> Option<String> {
        self.nodes.borrow()[element.0].id.clone()
    }

    fn is_attached(&self, element: &El) -> bool {
        self.nodes.borrow()[element.0].attached
    }
}

impl HostSignals for Page {
    fn subscribe(&self, signal: HostSignal, callback: Box<dyn Fn()>) {
        self.signals.borrow_mut().push((signal, callback));
    }
}

pub type Engine = Rc<PositionEngine<Page>>;

pub fn engine(page: &Rc<Page>, options: PositionOptions) -> Engine {
    Rc::new(PositionEngine::new(Rc::clone(page), options))
}

/// Events in emission order, tagged with the name they were emitted under.
pub type EventLog = Rc<RefCell<Vec<(&'static str, PositionEvent<El>)>>>;

/// Record every event emitted under `name`.
pub fn record(engine: &Engine, name: &'static str) -> EventLog {
    let log = Rc::new(RefCell::new(Vec::new()));
    record_into(engine, name, &log);
    log
}

pub fn record_into(engine: &Engine, name: &'static str, log: &EventLog) {
    let log = Rc::clone(log);
    engine.on(
        name,
        listener(move |event: &PositionEvent<El>| {
            log.borrow_mut().push((name, event.clone()));
        }),
    );
}

