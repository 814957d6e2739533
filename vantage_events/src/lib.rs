// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vantage_events --heading-base-level=0

//! Vantage Events: a small named-event publish/subscribe registry.
//!
//! [`EventBus`] maps an event name to an ordered list of listeners. Listeners
//! run in registration order and receive a shared reference to the payload.
//!
//! - [`EventBus::on`] appends a listener. There is no de-duplication: a
//!   listener registered twice runs twice.
//! - [`EventBus::once`] wraps a listener in an adapter that removes itself
//!   before its first invocation.
//! - [`EventBus::remove_listener`] removes the first matching instance, by
//!   pointer identity.
//! - [`EventBus::emit`] runs a snapshot of the listener list taken before the
//!   first listener is called. Listeners may subscribe, unsubscribe and emit
//!   re-entrantly without perturbing the emission in progress.
//!
//! Emitting a name nobody listens to is a no-op.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use vantage_events::{EventBus, listener};
//!
//! let bus = EventBus::<u32>::new();
//! let total = Rc::new(Cell::new(0));
//!
//! let sum = Rc::clone(&total);
//! bus.on("tick", listener(move |n: &u32| sum.set(sum.get() + *n)));
//!
//! let hits = Rc::clone(&total);
//! bus.once("tick", listener(move |_: &u32| hits.set(hits.get() + 100)));
//!
//! bus.emit("tick", &1);
//! bus.emit("tick", &2);
//! assert_eq!(total.get(), 103);
//! assert_eq!(bus.listener_count("tick"), 1);
//! ```
//!
//! The bus is a cheap handle: cloning it yields another handle onto the same
//! registry. It is single-threaded (`Rc`/`RefCell`) and meant to live on a UI
//! thread.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, OnceCell, RefCell};
use core::fmt;

use hashbrown::HashMap;

/// A shared, identity-comparable listener.
///
/// Listeners are compared with [`Rc::ptr_eq`], so keep the handle returned by
/// [`listener`] (or [`EventBus::once`]) if you intend to remove it later.
pub type Listener<A> = Rc<dyn Fn(&A)>;

/// Wrap a closure into a [`Listener`].
pub fn listener<A>(f: impl Fn(&A) + 'static) -> Listener<A> {
    Rc::new(f)
}

type Registry<A> = RefCell<HashMap<String, Vec<Listener<A>>>>;

/// Named-event registry.
///
/// See the [crate docs](crate) for the emission rules.
pub struct EventBus<A> {
    registry: Rc<Registry<A>>,
}

impl<A> Clone for EventBus<A> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<A> Default for EventBus<A> {
    fn default() -> Self {
        Self {
            registry: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl<A> fmt::Debug for EventBus<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        let mut map = f.debug_map();
        for (name, listeners) in registry.iter() {
            map.entry(name, &listeners.len());
        }
        map.finish()
    }
}

impl<A: 'static> EventBus<A> {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `listener` to the sequence for `name`.
    pub fn on(&self, name: &str, listener: Listener<A>) {
        self.registry
            .borrow_mut()
            .entry_ref(name)
            .or_default()
            .push(listener);
    }

    /// Register `listener` so that it runs at most once.
    ///
    /// Returns the self-removing adapter actually stored in the registry;
    /// pass it to [`EventBus::remove_listener`] to cancel before it fires.
    pub fn once(&self, name: &str, listener: Listener<A>) -> Listener<A> {
        let registry = Rc::downgrade(&self.registry);
        let event = String::from(name);
        let fired = Cell::new(false);
        let slot: Rc<OnceCell<Weak<dyn Fn(&A)>>> = Rc::new(OnceCell::new());
        let own = Rc::clone(&slot);

        let adapter: Listener<A> = Rc::new(move |args: &A| {
            // An outer emission may still hold this adapter in its snapshot.
            if fired.replace(true) {
                return;
            }
            if let (Some(registry), Some(me)) =
                (registry.upgrade(), own.get().and_then(Weak::upgrade))
            {
                remove_from(&registry, &event, &me);
            }
            listener(args);
        });

        let _ = slot.set(Rc::downgrade(&adapter));
        self.on(name, Rc::clone(&adapter));
        adapter
    }

    /// Remove the first registered instance of `listener` from `name`.
    ///
    /// Returns `true` if something was removed.
    pub fn remove_listener(&self, name: &str, listener: &Listener<A>) -> bool {
        remove_from(&self.registry, name, listener)
    }

    /// Invoke every listener registered for `name`, in registration order.
    ///
    /// Returns the number of listeners in the snapshot that was run.
    pub fn emit(&self, name: &str, args: &A) -> usize {
        let snapshot = match self.registry.borrow().get(name) {
            Some(listeners) => listeners.clone(),
            None => return 0,
        };
        for listener in &snapshot {
            listener(args);
        }
        snapshot.len()
    }

    /// Number of listeners currently registered for `name`.
    #[must_use]
    pub fn listener_count(&self, name: &str) -> usize {
        self.registry.borrow().get(name).map_or(0, Vec::len)
    }

    /// Returns `true` if at least one listener is registered for `name`.
    #[must_use]
    pub fn has_listeners(&self, name: &str) -> bool {
        self.listener_count(name) > 0
    }

    /// Drop every listener for every name.
    pub fn clear(&self) {
        self.registry.borrow_mut().clear();
    }
}

fn remove_from<A>(registry: &Registry<A>, name: &str, listener: &Listener<A>) -> bool {
    let mut registry = registry.borrow_mut();
    let Some(listeners) = registry.get_mut(name) else {
        return false;
    };
    let Some(idx) = listeners.iter().position(|l| Rc::ptr_eq(l, listener)) else {
        return false;
    };
    listeners.remove(idx);
    if listeners.is_empty() {
        registry.remove(name);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn recorder(log: &Log, tag: &'static str) -> Listener<u32> {
        let log = Rc::clone(log);
        listener(move |_: &u32| log.borrow_mut().push(tag))
    }

    #[test]
    fn emit_without_listeners_is_a_no_op() {
        let bus = EventBus::<u32>::new();
        assert_eq!(bus.emit("nobody", &1), 0);
        assert!(!bus.has_listeners("nobody"));
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let bus = EventBus::new();
        let log = Log::default();
        bus.on("e", recorder(&log, "a"));
        bus.on("e", recorder(&log, "b"));
        bus.on("other", recorder(&log, "x"));
        bus.on("e", recorder(&log, "c"));

        assert_eq!(bus.emit("e", &0), 3);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn duplicate_registration_runs_twice() {
        let bus = EventBus::new();
        let log = Log::default();
        let l = recorder(&log, "dup");
        bus.on("e", Rc::clone(&l));
        bus.on("e", Rc::clone(&l));

        bus.emit("e", &0);
        assert_eq!(log.borrow().len(), 2);

        // Removal takes out one instance at a time.
        assert!(bus.remove_listener("e", &l));
        assert_eq!(bus.listener_count("e"), 1);
        assert!(bus.remove_listener("e", &l));
        assert!(!bus.remove_listener("e", &l));
        assert!(!bus.has_listeners("e"));
    }

    #[test]
    fn payload_is_passed_through() {
        let bus = EventBus::new();
        let seen = Rc::new(Cell::new(0_u32));
        let s = Rc::clone(&seen);
        bus.on("n", listener(move |n: &u32| s.set(*n)));
        bus.emit("n", &42);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn once_fires_exactly_once_and_is_removed() {
        let bus = EventBus::new();
        let log = Log::default();
        bus.once("e", recorder(&log, "once"));
        assert_eq!(bus.listener_count("e"), 1);

        for _ in 0..5 {
            bus.emit("e", &0);
        }
        assert_eq!(*log.borrow(), vec!["once"]);
        assert_eq!(bus.listener_count("e"), 0);
    }

    #[test]
    fn once_handle_cancels_before_firing() {
        let bus = EventBus::new();
        let log = Log::default();
        let handle = bus.once("e", recorder(&log, "never"));
        assert!(bus.remove_listener("e", &handle));
        bus.emit("e", &0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn self_removal_does_not_skip_later_listeners() {
        let bus = EventBus::new();
        let log = Log::default();

        let slot: Rc<RefCell<Option<Listener<u32>>>> = Rc::default();
        let (bus2, slot2, log2) = (bus.clone(), Rc::clone(&slot), Rc::clone(&log));
        let first = listener(move |_: &u32| {
            log2.borrow_mut().push("first");
            if let Some(me) = slot2.borrow().as_ref() {
                bus2.remove_listener("e", me);
            }
        });
        *slot.borrow_mut() = Some(Rc::clone(&first));
        bus.on("e", first);
        bus.on("e", recorder(&log, "second"));
        bus.on("e", recorder(&log, "third"));

        bus.emit("e", &0);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);

        log.borrow_mut().clear();
        bus.emit("e", &0);
        assert_eq!(*log.borrow(), vec!["second", "third"]);
    }

    #[test]
    fn listener_added_during_emit_waits_for_next_emit() {
        let bus = EventBus::new();
        let log = Log::default();
        let (bus2, log2) = (bus.clone(), Rc::clone(&log));
        bus.once(
            "e",
            listener(move |_: &u32| {
                bus2.on("e", recorder(&log2, "late"));
            }),
        );

        assert_eq!(bus.emit("e", &0), 1);
        assert!(log.borrow().is_empty());
        bus.emit("e", &0);
        assert_eq!(*log.borrow(), vec!["late"]);
    }

    #[test]
    fn nested_emit_does_not_rerun_once_listener() {
        let bus = EventBus::new();
        let log = Log::default();
        let bus2 = bus.clone();
        bus.on(
            "e",
            listener(move |depth: &u32| {
                if *depth == 0 {
                    bus2.emit("e", &1);
                }
            }),
        );
        bus.once("e", recorder(&log, "once"));

        bus.emit("e", &0);
        assert_eq!(*log.borrow(), vec!["once"]);
    }

    #[test]
    fn clear_drops_everything() {
        let bus = EventBus::new();
        let log = Log::default();
        bus.on("a", recorder(&log, "a"));
        bus.on("b", recorder(&log, "b"));
        bus.clear();
        bus.emit("a", &0);
        bus.emit("b", &0);
        assert!(log.borrow().is_empty());
    }
}
