// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavior shared by every chart: degenerate data, id stability and list round-trips.

extern crate std;

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashSet;
use kurbo::{PathEl, Point, Rect};

use crate::{
    ArcChart, BarChart, BoxPlot, BubbleGridChart, BubbleGridEntry, CategorySeries, Chart,
    CircularPlot, ComparisonBarChart, CoxcombChart, FlowItem, Item, MarkPayload, RadialTidyTree,
    SankeyPlot, Series, SunburstChart, Tree,
};

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);

fn flows(value: f64, flow: f64) -> Vec<FlowItem> {
    vec![
        FlowItem::new("a", value)
            .unwrap()
            .with_outgoing("b", flow)
            .unwrap()
            .with_outgoing("c", flow)
            .unwrap(),
        FlowItem::new("b", value)
            .unwrap()
            .with_level(1)
            .with_outgoing("c", flow)
            .unwrap(),
        FlowItem::new("c", value).unwrap().with_level(2),
    ]
}

fn items(values: &[f64]) -> Vec<Item> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Item::new(std::format!("item{i}"), *v).unwrap())
        .collect()
}

fn hierarchy(value: f64) -> Tree<Item> {
    let mut tree = Tree::new(Item::named("root"));
    let root = tree.root();
    let a = tree
        .add_child(root, Item::new("a", value).unwrap())
        .unwrap();
    tree.add_child(a, Item::new("a1", value).unwrap()).unwrap();
    tree.add_child(root, Item::new("b", value).unwrap())
        .unwrap();
    tree
}

fn boxed(chart: impl Chart + 'static) -> Box<dyn Chart> {
    Box::new(chart)
}

/// One instance of every chart, with every value set to `value`.
fn every_chart(value: f64) -> Vec<(&'static str, Box<dyn Chart>)> {
    let flow = 0.5 * value;
    let series = vec![
        Series::new("s", vec![value; 5]).unwrap(),
        Series::new("t", vec![value, 2.0 * value]).unwrap(),
    ];
    let entries = vec![
        BubbleGridEntry::new("x", "p", value).unwrap(),
        BubbleGridEntry::new("y", "q", value).unwrap(),
    ];
    let left = CategorySeries::new("l", [("a", value), ("b", value)]).unwrap();
    let right = CategorySeries::new("r", [("b", value), ("a", value)]).unwrap();
    vec![
        ("circular", boxed(CircularPlot::new(flows(value, flow)))),
        ("arc", boxed(ArcChart::new(flows(value, flow)))),
        ("sankey", boxed(SankeyPlot::new(flows(value, flow)).unwrap())),
        ("coxcomb", boxed(CoxcombChart::new(items(&[value; 4])))),
        ("sunburst", boxed(SunburstChart::new(hierarchy(value)))),
        ("tidy", boxed(RadialTidyTree::new(hierarchy(value)))),
        ("box", boxed(BoxPlot::new(series).unwrap())),
        ("bubble", boxed(BubbleGridChart::new(entries).unwrap())),
        ("comparison", boxed(ComparisonBarChart::new(left, right).unwrap())),
        ("bar", boxed(BarChart::new(items(&[value; 3])))),
    ]
}

fn finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

fn assert_finite_marks(name: &str, chart: &dyn Chart) {
    for mark in chart.marks(VIEWPORT) {
        match &mark.payload {
            MarkPayload::Path(p) => {
                for el in p.path.elements() {
                    let ok = match *el {
                        PathEl::MoveTo(a) | PathEl::LineTo(a) => finite(a),
                        PathEl::QuadTo(a, b) => finite(a) && finite(b),
                        PathEl::CurveTo(a, b, c) => finite(a) && finite(b) && finite(c),
                        PathEl::ClosePath => true,
                    };
                    assert!(ok, "{name}: non-finite path in mark {:?}", mark.id);
                }
            }
            MarkPayload::Text(t) => {
                assert!(
                    finite(t.pos),
                    "{name}: non-finite text position {:?}",
                    mark.id
                );
            }
        }
    }
}

#[test]
fn all_zero_data_lays_out_without_nan() {
    for (name, chart) in every_chart(0.0) {
        assert_finite_marks(name, chart.as_ref());
    }
}

#[test]
fn populated_data_lays_out_without_nan() {
    for (name, chart) in every_chart(3.0) {
        assert_finite_marks(name, chart.as_ref());
        assert!(!chart.marks(VIEWPORT).is_empty(), "{name}: no marks");
    }
}

#[test]
fn a_tiny_viewport_stays_finite() {
    for (name, chart) in every_chart(1.0) {
        for mark in chart.marks(Rect::new(0.0, 0.0, 4.0, 4.0)) {
            if let Some(b) = mark.bounds() {
                assert!(
                    b.x0.is_finite() && b.y0.is_finite() && b.x1.is_finite() && b.y1.is_finite(),
                    "{name}: {b:?}"
                );
            }
        }
    }
}

#[test]
fn mark_ids_are_unique_within_a_chart() {
    for (name, chart) in every_chart(2.0) {
        let marks = chart.marks(VIEWPORT);
        let ids: HashSet<u64> = marks.iter().map(|m| m.id.0).collect();
        assert_eq!(ids.len(), marks.len(), "{name}: duplicate mark ids");
    }
}

#[test]
fn mark_ids_do_not_collide_across_charts() {
    let mut seen: HashSet<u64> = HashSet::new();
    for (name, chart) in every_chart(2.0) {
        for mark in chart.marks(VIEWPORT) {
            assert!(seen.insert(mark.id.0), "{name}: id {:?} reused", mark.id);
        }
    }
}

#[test]
fn marks_are_stable_across_calls() {
    for (name, chart) in every_chart(2.0) {
        assert_eq!(chart.marks(VIEWPORT), chart.marks(VIEWPORT), "{name}");
    }
}

#[test]
fn set_items_reads_back_in_order() {
    let mut chart = CoxcombChart::new(Vec::<Item>::new());
    let values = [4.0, 1.0, 3.0, 1.0, 0.0];
    chart.set_items(items(&values));
    let names: Vec<&str> = chart.items().iter().map(Item::name).collect();
    assert_eq!(names, ["item0", "item1", "item2", "item3", "item4"]);

    assert!(
        !chart.add_item(Item::new("item2", 9.0).unwrap()),
        "duplicate name"
    );
    assert!(
        chart.add_item(Item::new("item5", 1.0).unwrap()),
        "equal value, new name"
    );
    assert_eq!(chart.items().len(), values.len() + 1);
}

#[test]
fn a_single_zero_item_is_a_zero_width_segment() {
    let chart = CircularPlot::new(vec![FlowItem::new("only", 0.0).unwrap()]);
    let segments = chart.segments();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].width, 0.0);
    assert_finite_marks("circular", &chart);
}
