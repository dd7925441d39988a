// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed subscriber lists.
//!
//! Each event category gets its own [`Subscribers`] list, so a listener only sees the events
//! it registered for. Emission is synchronous and runs listeners in subscription order.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Handle returned by [`Subscribers::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Listeners for one event type.
pub struct Subscribers<E> {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Box<dyn FnMut(&E)>)>,
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<E> Subscribers<E> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` and returns a handle for removing it.
    pub fn subscribe(&mut self, listener: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Calls every listener with `event`.
    pub fn emit(&mut self, event: &E) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    /// Number of listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// A change to a chart's item list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemEvent {
    /// An item with this name was appended.
    Added(String),
    /// The item with this name was removed.
    Removed(String),
    /// The whole list was replaced.
    Replaced {
        /// Number of items after the replacement.
        count: usize,
    },
    /// The list was reordered by value.
    Sorted,
}

/// Why a chart wants to be drawn again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedrawReason {
    /// Item data changed.
    Items,
    /// Configuration changed.
    Config,
}

/// Asks the host to call [`crate::Chart::marks`] again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedrawRequest {
    /// What changed.
    pub reason: RedrawReason,
}

impl RedrawRequest {
    /// A request for `reason`.
    pub fn new(reason: RedrawReason) -> Self {
        Self { reason }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use super::*;

    #[test]
    fn emits_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subs = Subscribers::<u32>::new();
        let s1 = Rc::clone(&seen);
        subs.subscribe(move |e| s1.borrow_mut().push(("first", *e)));
        let s2 = Rc::clone(&seen);
        subs.subscribe(move |e| s2.borrow_mut().push(("second", *e)));
        subs.emit(&7);
        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn unsubscribe_removes_only_that_listener() {
        let count = Rc::new(RefCell::new(0));
        let mut subs = Subscribers::<()>::new();
        let c1 = Rc::clone(&count);
        let id = subs.subscribe(move |()| *c1.borrow_mut() += 1);
        let c2 = Rc::clone(&count);
        subs.subscribe(move |()| *c2.borrow_mut() += 10);
        assert!(subs.unsubscribe(id));
        assert!(!subs.unsubscribe(id), "second removal is a no-op");
        subs.emit(&());
        assert_eq!(*count.borrow(), 10);
        assert_eq!(subs.len(), 1);
    }
}
