// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart data: named values, flows between them, and the connections derived from flows.

extern crate alloc;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;
use peniko::Color;

use crate::chart::Named;
use crate::error::{ChartError, check_value};
use crate::log;
use crate::palette::palette_color;

/// A named, non-negative value with an optional fill and description.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    name: String,
    value: f64,
    fill: Option<Color>,
    description: Option<String>,
}

impl Item {
    /// Creates an item, rejecting negative and non-finite values.
    pub fn new(name: impl Into<String>, value: f64) -> Result<Self, ChartError> {
        let name = name.into();
        let value = check_value(&name, value)?;
        Ok(Self {
            name,
            value,
            fill: None,
            description: None,
        })
    }

    /// A zero-valued item, such as a synthetic tree root.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: 0.0,
            fill: None,
            description: None,
        }
    }

    /// The item name. Names identify items within a chart.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The item value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Replaces the value, rejecting negative and non-finite values.
    pub fn set_value(&mut self, value: f64) -> Result<(), ChartError> {
        self.value = check_value(&self.name, value)?;
        Ok(())
    }

    /// The explicit fill, if one was set.
    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    /// The explicit fill, or the palette color for position `index`.
    pub fn resolved_fill(&self, index: usize) -> Color {
        self.fill.unwrap_or_else(|| palette_color(index))
    }

    /// Sets the fill.
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Sets or clears the fill.
    pub fn set_fill(&mut self, fill: Option<Color>) {
        self.fill = fill;
    }

    /// Free-form description (tooltip text in interactive hosts).
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Named for Item {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> f64 {
        self.value
    }
}

/// An item that sends flows to other items, optionally placed on a level.
///
/// Levels are only meaningful to the sankey plot; other flow charts ignore them.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowItem {
    /// The underlying named value.
    pub item: Item,
    /// Column index for level-based layouts.
    pub level: usize,
    outgoing: Vec<(String, f64)>,
}

impl FlowItem {
    /// Creates a flow item on level 0 with no outgoing flows.
    pub fn new(name: impl Into<String>, value: f64) -> Result<Self, ChartError> {
        Ok(Self {
            item: Item::new(name, value)?,
            level: 0,
            outgoing: Vec::new(),
        })
    }

    /// Sets the level.
    pub fn with_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    /// Sets the fill.
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.item = self.item.with_fill(fill);
        self
    }

    /// Adds a flow of `value` toward the item named `target`.
    ///
    /// Targets are resolved when connections are derived, so they may be added before the
    /// target item exists.
    pub fn add_outgoing(
        &mut self,
        target: impl Into<String>,
        value: f64,
    ) -> Result<(), ChartError> {
        let target = target.into();
        let value = check_value(&target, value)?;
        self.outgoing.push((target, value));
        Ok(())
    }

    /// Builder form of [`FlowItem::add_outgoing`].
    pub fn with_outgoing(
        mut self,
        target: impl Into<String>,
        value: f64,
    ) -> Result<Self, ChartError> {
        self.add_outgoing(target, value)?;
        Ok(self)
    }

    /// Outgoing flows as `(target name, value)` in insertion order.
    pub fn outgoing(&self) -> &[(String, f64)] {
        &self.outgoing
    }

    /// Total outgoing value.
    pub fn outgoing_sum(&self) -> f64 {
        self.outgoing.iter().map(|(_, v)| v).sum()
    }
}

impl Named for FlowItem {
    fn name(&self) -> &str {
        self.item.name()
    }

    fn value(&self) -> f64 {
        self.item.value()
    }
}

/// A resolved flow between two items of the same list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    /// Index of the source item.
    pub source: usize,
    /// Index of the target item.
    pub target: usize,
    /// Flow value.
    pub value: f64,
    /// Fill, taken from the source item.
    pub fill: Color,
}

/// Resolves every item's outgoing flows into index-based connections.
///
/// Connections come out in source order, then flow insertion order. Flows to unknown names
/// are skipped; so are zero-valued flows. When names repeat, the first item wins.
pub fn connections(items: &[FlowItem]) -> Vec<Connection> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        index.entry(item.item.name()).or_insert(i);
    }

    let mut out = Vec::new();
    for (source, item) in items.iter().enumerate() {
        for (target_name, value) in item.outgoing() {
            let Some(&target) = index.get(target_name.as_str()) else {
                log::warn!(
                    source = item.item.name(),
                    target = target_name.as_str(),
                    "skipping flow to unknown item"
                );
                continue;
            };
            if *value <= 0.0 {
                continue;
            }
            out.push(Connection {
                source,
                target,
                value: *value,
                fill: item.item.resolved_fill(source),
            });
        }
    }
    out
}

/// Sum of incoming connection values per item.
pub fn incoming_sums(items: &[FlowItem], connections: &[Connection]) -> Vec<f64> {
    let mut sums = vec![0.0; items.len()];
    for c in connections {
        if let Some(s) = sums.get_mut(c.target) {
            *s += c.value;
        }
    }
    sums
}

/// Sum of outgoing connection values per item.
pub fn outgoing_sums(items: &[FlowItem], connections: &[Connection]) -> Vec<f64> {
    let mut sums = vec![0.0; items.len()];
    for c in connections {
        if let Some(s) = sums.get_mut(c.source) {
            *s += c.value;
        }
    }
    sums
}

/// Value sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest value first.
    Asc,
    /// Largest value first.
    Desc,
}

/// Stable sort by [`Named::value`]; equal values keep their relative order.
pub fn sort_items<T: Named>(items: &mut [T], order: SortOrder) {
    match order {
        SortOrder::Asc => items.sort_by(|a, b| a.value().total_cmp(&b.value())),
        SortOrder::Desc => items.sort_by(|a, b| b.value().total_cmp(&a.value())),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec::Vec;

    use super::*;

    fn flows() -> Vec<FlowItem> {
        vec![
            FlowItem::new("a", 10.0)
                .unwrap()
                .with_outgoing("b", 3.0)
                .unwrap()
                .with_outgoing("c", 2.0)
                .unwrap()
                .with_outgoing("missing", 1.0)
                .unwrap(),
            FlowItem::new("b", 5.0)
                .unwrap()
                .with_outgoing("c", 4.0)
                .unwrap()
                .with_outgoing("a", 0.0)
                .unwrap(),
            FlowItem::new("c", 1.0).unwrap(),
        ]
    }

    #[test]
    fn item_rejects_bad_values() {
        assert!(matches!(
            Item::new("x", -1.0),
            Err(ChartError::NegativeValue { value, .. }) if value == -1.0
        ));
        assert!(matches!(
            Item::new("x", f64::NAN),
            Err(ChartError::NonFiniteValue { .. })
        ));
        let mut item = Item::new("x", 0.0).unwrap();
        assert!(item.set_value(f64::INFINITY).is_err());
        assert_eq!(item.value(), 0.0, "failed set leaves value unchanged");
    }

    #[test]
    fn connections_skip_unknown_and_zero_flows() {
        let items = flows();
        let conns = connections(&items);
        let pairs: Vec<(usize, usize, f64)> = conns
            .iter()
            .map(|c| (c.source, c.target, c.value))
            .collect();
        assert_eq!(pairs, [(0, 1, 3.0), (0, 2, 2.0), (1, 2, 4.0)]);
        assert_eq!(conns[0].fill, palette_color(0));
    }

    #[test]
    fn flow_sums() {
        let items = flows();
        let conns = connections(&items);
        assert_eq!(incoming_sums(&items, &conns), [0.0, 3.0, 6.0]);
        assert_eq!(outgoing_sums(&items, &conns), [5.0, 4.0, 0.0]);
        // The raw outgoing sum still counts unresolved flows.
        assert_eq!(items[0].outgoing_sum(), 6.0);
    }

    #[test]
    fn sort_is_monotonic_and_stable() {
        let mut items: Vec<Item> = [("a", 2.0), ("b", 1.0), ("c", 2.0), ("d", 0.5)]
            .into_iter()
            .map(|(n, v)| Item::new(n, v).unwrap())
            .collect();
        sort_items(&mut items, SortOrder::Asc);
        let names: Vec<&str> = items.iter().map(Item::name).collect();
        assert_eq!(names, ["d", "b", "a", "c"]);
        sort_items(&mut items, SortOrder::Desc);
        let names: Vec<&str> = items.iter().map(Item::name).collect();
        assert_eq!(names, ["a", "c", "b", "d"]);
        assert!(items.windows(2).all(|w| w[0].value() >= w[1].value()));
    }
}
