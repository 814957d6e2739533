// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory document with inline styles, classes, and a flat node list.

#![allow(
    missing_docs,
    dead_code,
    reason = "Integration-test helper module; not every test uses every helper."
)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::{Insets, Point, Rect, Size};
use vantage_position::host::{BoxProvider, ElementQuery, Host, HostSignal, HostSignals};
use vantage_position::{PositionEngine, PositionOptions};
use vantage_sticky::host::{StyleAccessor, TreeMutator};
use vantage_sticky::{StickyController, StickyOptions};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct El(pub usize);

#[derive(Default)]
struct Node {
    tag: String,
    /// Box in document coordinates while in normal flow.
    page_box: Rect,
    margins: Insets,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    style: String,
    attached: bool,
}

/// Nodes sit at fixed document positions; the viewport scrolls over them.
///
/// A node whose inline style contains `position: fixed` is laid out at the
/// viewport top instead, at its own left offset.
pub struct Document {
    nodes: RefCell<Vec<Node>>,
    scroll: Cell<Point>,
    viewport: Cell<Size>,
    signals: RefCell<Vec<(HostSignal, Box<dyn Fn()>)>>,
}

impl Document {
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
            tag: String::from("div"),
            page_box,
            attached: true,
            ..Node::default()
        });
        El(nodes.len() - 1)
    }

    pub fn set_attr(&self, el: El, name: &str, value: &str) {
        self.set_attribute(&el, name, value);
    }

    pub fn detach(&self, el: El) {
        self.nodes.borrow_mut()[el.0].attached = false;
    }

    /// Scroll without notifying anyone.
    pub fn set_scroll_y(&self, y: f64) {
        self.scroll.set(Point::new(0.0, y));
    }

    pub fn set_classes(&self, el: El, classes: &[&str]) {
        self.nodes.borrow_mut()[el.0].classes =
            classes.iter().map(|c| (*c).to_owned()).collect();
    }

    pub fn set_style(&self, el: El, style: &str) {
        self.nodes.borrow_mut()[el.0].style = style.to_owned();
    }

    pub fn set_margins(&self, el: El, margins: Insets) {
        self.nodes.borrow_mut()[el.0].margins = margins;
    }

    pub fn style(&self, el: El) -> String {
        self.nodes.borrow()[el.0].style.clone()
    }

    pub fn classes(&self, el: El) -> Vec<String> {
        self.nodes.borrow()[el.0].classes.clone()
    }

    pub fn has_class(&self, el: El, class: &str) -> bool {
        self.nodes.borrow()[el.0].classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, el: El, name: &str) -> Option<String> {
        self.nodes.borrow()[el.0]
            .attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    pub fn tag(&self, el: El) -> String {
        self.nodes.borrow()[el.0].tag.clone()
    }

    /// Attached nodes whose id starts with `prefix`.
    pub fn attached_with_id_prefix(&self, prefix: &str) -> Vec<El> {
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, node)| {
                node.attached
                    && node
                        .attrs
                        .iter()
                        .any(|(n, v)| n == "id" && v.starts_with(prefix))
            })
            .map(|(idx, _)| El(idx))
            .collect()
    }

    /// Scroll vertically and notify scroll subscribers.
    pub fn scroll_y(&self, y: f64) {
        self.scroll.set(Point::new(0.0, y));
        self.fire(HostSignal::Scroll);
    }

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

impl Host for Document {
    type Element = El;
}

impl BoxProvider for Document {
    fn bounding_box(&self, element: &El) -> Rect {
        let nodes = self.nodes.borrow();
        let node = &nodes[element.0];
        if node.style.contains("position: fixed") {
            let size = node.page_box.size();
            Rect::new(
                node.page_box.x0,
                0.0,
                node.page_box.x0 + size.width,
                size.height,
            )
        } else {
            node.page_box - self.scroll.get().to_vec2()
        }
    }

    fn viewport_size(&self) -> Size {
        self.viewport.get()
    }

    fn scroll_offset(&self) -> Point {
        self.scroll.get()
    }
}

impl ElementQuery for Document {
    fn elements_with_attribute(&self, attribute: &str) -> Vec<(El, String)> {
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, node)| node.attached)
            .filter_map(|(idx, node)| {
                node.attrs
                    .iter()
                    .find(|(name, _)| name == attribute)
                    .map(|(_, value)| (El(idx), value.clone()))
            })
            .collect()
    }

    fn element_id(&self, element: &El) -> Option<String> {
        self.attr(*element, "id")
    }

    fn is_attached(&self, element: &El) -> bool {
        self.nodes.borrow()[element.0].attached
    }
}

impl HostSignals for Document {
    fn subscribe(&self, signal: HostSignal, callback: Box<dyn Fn()>) {
        self.signals.borrow_mut().push((signal, callback));
    }
}

impl StyleAccessor for Document {
    fn style_text(&self, element: &El) -> String {
        self.style(*element)
    }

    fn set_style_text(&self, element: &El, text: &str) {
        self.set_style(*element, text);
    }

    fn computed_margins(&self, element: &El) -> Insets {
        self.nodes.borrow()[element.0].margins
    }

    fn has_class(&self, element: &El, class: &str) -> bool {
        self.nodes.borrow()[element.0]
            .classes
            .iter()
            .any(|c| c == class)
    }

    fn add_class(&self, element: &El, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[element.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
        }
    }

    fn remove_class(&self, element: &El, class: &str) {
        self.nodes.borrow_mut()[element.0]
            .classes
            .retain(|c| c != class);
    }
}

impl TreeMutator for Document {
    fn create_element(&self, tag: &str) -> Option<El> {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            tag: tag.to_owned(),
            ..Node::default()
        });
        Some(El(nodes.len() - 1))
    }

    fn set_attribute(&self, element: &El, name: &str, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let attrs = &mut nodes[element.0].attrs;
        match attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_owned(),
            None => attrs.push((name.to_owned(), value.to_owned())),
        }
    }

    fn insert_before(&self, new: &El, reference: &El) -> bool {
        let mut nodes = self.nodes.borrow_mut();
        if !nodes[reference.0].attached {
            return false;
        }
        // The new node takes over the reference's slot in the flow.
        let page_box = nodes[reference.0].page_box;
        let node = &mut nodes[new.0];
        node.page_box = page_box;
        node.attached = true;
        true
    }

    fn remove(&self, element: &El) {
        self.nodes.borrow_mut()[element.0].attached = false;
    }
}

pub type Engine = Rc<PositionEngine<Document>>;
pub type Controller = Rc<StickyController<Document>>;

/// A started engine and controller over `doc`.
pub fn start(doc: &Rc<Document>, options: StickyOptions) -> Controller {
    let engine = Rc::new(PositionEngine::new(
        Rc::clone(doc),
        PositionOptions::default(),
    ));
    let controller = Rc::new(StickyController::new(engine, options));
    controller.init().unwrap();
    controller
}
