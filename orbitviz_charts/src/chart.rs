// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Chart`] trait and the item list shared by list-based charts.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;

use crate::events::{ItemEvent, RedrawReason, RedrawRequest, Subscribers, SubscriptionId};
use crate::item::{SortOrder, sort_items};
use crate::log;
use crate::mark::Mark;

/// Anything a chart lists by name and sizes by value.
pub trait Named {
    /// Identifying name, unique within one chart.
    fn name(&self) -> &str;
    /// Size-determining value.
    fn value(&self) -> f64;
}

/// A chart that generates marks for a viewport.
pub trait Chart {
    /// Lays the chart out inside `viewport` and returns its marks.
    ///
    /// Nothing is cached: every call recomputes geometry from the current data and config.
    fn marks(&self, viewport: Rect) -> Vec<Mark>;
}

/// Insertion-ordered items with change notification.
#[derive(Debug)]
pub struct ItemList<T> {
    items: Vec<T>,
    item_events: Subscribers<ItemEvent>,
    redraw: Subscribers<RedrawRequest>,
}

impl<T> Default for ItemList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            item_events: Subscribers::new(),
            redraw: Subscribers::new(),
        }
    }
}

impl<T: Named> ItemList<T> {
    /// Creates a list holding `items`; no events are emitted.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Items in insertion (or last sorted) order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item named `name`.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.items.iter().find(|i| i.name() == name)
    }

    /// Position of the item named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|i| i.name() == name)
    }

    /// Replaces every item.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        log::debug!(count = self.items.len(), "items replaced");
        self.item_events.emit(&ItemEvent::Replaced {
            count: self.items.len(),
        });
        self.request_redraw(RedrawReason::Items);
    }

    /// Appends `item` unless an item with the same name is already present.
    ///
    /// Returns `false` (and changes nothing) for a duplicate name.
    pub fn add_item(&mut self, item: T) -> bool {
        if self.get(item.name()).is_some() {
            return false;
        }
        let event = ItemEvent::Added(item.name().into());
        self.items.push(item);
        self.item_events.emit(&event);
        self.request_redraw(RedrawReason::Items);
        true
    }

    /// Removes and returns the item named `name`.
    pub fn remove_item(&mut self, name: &str) -> Option<T> {
        let index = self.position(name)?;
        let item = self.items.remove(index);
        self.item_events.emit(&ItemEvent::Removed(name.into()));
        self.request_redraw(RedrawReason::Items);
        Some(item)
    }

    /// Stable-sorts items by value.
    pub fn sort_by_value(&mut self, order: SortOrder) {
        sort_items(&mut self.items, order);
        self.item_events.emit(&ItemEvent::Sorted);
        self.request_redraw(RedrawReason::Items);
    }
}

impl<T> ItemList<T> {
    /// Notifies redraw listeners.
    pub fn request_redraw(&mut self, reason: RedrawReason) {
        self.redraw.emit(&RedrawRequest::new(reason));
    }

    /// Registers a redraw listener.
    pub fn on_redraw(&mut self, listener: impl FnMut(&RedrawRequest) + 'static) -> SubscriptionId {
        self.redraw.subscribe(listener)
    }

    /// Registers an item change listener.
    pub fn on_item_event(&mut self, listener: impl FnMut(&ItemEvent) + 'static) -> SubscriptionId {
        self.item_events.subscribe(listener)
    }

    /// Redraw listeners.
    pub fn redraw_subscribers(&mut self) -> &mut Subscribers<RedrawRequest> {
        &mut self.redraw
    }

    /// Item change listeners.
    pub fn item_subscribers(&mut self) -> &mut Subscribers<ItemEvent> {
        &mut self.item_events
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use super::*;
    use crate::item::Item;

    fn list(names: &[&str]) -> Vec<Item> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Item::new(*n, i as f64).unwrap())
            .collect()
    }

    #[test]
    fn set_items_reads_back_in_order() {
        let mut l = ItemList::default();
        l.set_items(list(&["c", "a", "b"]));
        let names: Vec<&str> = l.items().iter().map(Item::name).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn add_item_refuses_duplicates_only() {
        let mut l = ItemList::new(list(&["a", "b"]));
        assert!(!l.add_item(Item::new("a", 9.0).unwrap()));
        assert_eq!(l.get("a").map(Item::value), Some(0.0), "original kept");
        assert!(l.add_item(Item::new("c", 9.0).unwrap()));
        assert_eq!(l.len(), 3);
    }

    #[test]
    fn mutations_emit_events_and_redraws() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let redraws = Rc::new(RefCell::new(0));
        let mut l = ItemList::default();
        let e = Rc::clone(&events);
        l.on_item_event(move |ev| e.borrow_mut().push(ev.clone()));
        let r = Rc::clone(&redraws);
        l.on_redraw(move |_| *r.borrow_mut() += 1);

        l.set_items(list(&["a", "b"]));
        l.add_item(Item::new("c", 5.0).unwrap());
        l.add_item(Item::new("c", 6.0).unwrap());
        assert!(l.remove_item("a").is_some());
        assert!(l.remove_item("zzz").is_none());
        l.sort_by_value(SortOrder::Desc);

        assert_eq!(
            *events.borrow(),
            vec![
                ItemEvent::Replaced { count: 2 },
                ItemEvent::Added("c".into()),
                ItemEvent::Removed("a".into()),
                ItemEvent::Sorted,
            ]
        );
        assert_eq!(*redraws.borrow(), 4);
        let names: Vec<&str> = l.items().iter().map(Item::name).collect();
        assert_eq!(names, ["c", "b"]);
    }
}
