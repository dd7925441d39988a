// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Writes one SVG per `orbitviz_charts` chart type.

use std::error::Error;
use std::path::{Path, PathBuf};

use orbitviz_charts::svg::write_svg;
use orbitviz_charts::{
    ArcChart, BarChart, BarChartConfig, BoxPlot, BubbleGridChart, BubbleGridEntry, CategorySeries,
    Chart, ChartError, CircularPlot, CircularPlotConfig, ComparisonBarChart, CoxcombChart,
    CoxcombConfig, FlowItem, Item, RadialTidyTree, SankeyPlot, Series, SortOrder, SunburstChart,
    Tree,
};
use peniko::color::palette::css;
use tracing_subscriber::EnvFilter;

type DemoResult<T> = Result<T, Box<dyn Error>>;

fn main() -> DemoResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "out".into()));
    std::fs::create_dir_all(&out_dir)?;

    let charts: Vec<(&str, Box<dyn Chart>, (f64, f64))> = vec![
        ("circular_plot", boxed(circular_plot()?), (600.0, 600.0)),
        ("arc_chart", boxed(arc_chart()?), (720.0, 360.0)),
        ("sankey", boxed(sankey()?), (720.0, 420.0)),
        ("coxcomb", boxed(coxcomb()?), (520.0, 520.0)),
        ("sunburst", boxed(sunburst()?), (560.0, 560.0)),
        ("radial_tidy_tree", boxed(radial_tidy_tree()?), (600.0, 600.0)),
        ("box_plot", boxed(box_plot()?), (600.0, 360.0)),
        ("bubble_grid", boxed(bubble_grid()?), (600.0, 320.0)),
        ("comparison_bar", boxed(comparison_bar()?), (600.0, 300.0)),
        ("bar_chart", boxed(bar_chart()?), (600.0, 340.0)),
    ];

    for (name, chart, (width, height)) in &charts {
        let path = out_dir.join(format!("{name}.svg"));
        write(&path, chart.as_ref(), *width, *height)?;
    }
    tracing::info!(count = charts.len(), dir = %out_dir.display(), "done");
    Ok(())
}

fn boxed(chart: impl Chart + 'static) -> Box<dyn Chart> {
    Box::new(chart)
}

fn write(path: &Path, chart: &dyn Chart, width: f64, height: f64) -> DemoResult<()> {
    write_svg(path, chart, width, height)?;
    tracing::info!(path = %path.display(), "wrote chart");
    Ok(())
}

/// Household budget flows used by the flow charts.
fn budget_flows() -> Result<Vec<FlowItem>, ChartError> {
    Ok(vec![
        FlowItem::new("Salary", 0.0)?
            .with_outgoing("Housing", 1400.0)?
            .with_outgoing("Food", 600.0)?
            .with_outgoing("Savings", 800.0)?
            .with_outgoing("Leisure", 300.0)?,
        FlowItem::new("Freelance", 0.0)?
            .with_outgoing("Savings", 400.0)?
            .with_outgoing("Leisure", 200.0)?,
        FlowItem::new("Housing", 0.0)?
            .with_level(1)
            .with_outgoing("Rent", 1100.0)?
            .with_outgoing("Utilities", 300.0)?,
        FlowItem::new("Food", 0.0)?.with_level(1),
        FlowItem::new("Savings", 0.0)?.with_level(1),
        FlowItem::new("Leisure", 0.0)?.with_level(1),
        FlowItem::new("Rent", 0.0)?.with_level(2),
        FlowItem::new("Utilities", 0.0)?.with_level(2),
    ])
}

fn circular_plot() -> Result<CircularPlot, ChartError> {
    Ok(CircularPlot::new(budget_flows()?).with_config(
        CircularPlotConfig::default()
            .with_gap(3.0)
            .with_flow_direction(true),
    ))
}

fn arc_chart() -> Result<ArcChart, ChartError> {
    Ok(ArcChart::new(budget_flows()?))
}

fn sankey() -> Result<SankeyPlot, ChartError> {
    SankeyPlot::new(budget_flows()?)
}

fn coxcomb() -> Result<CoxcombChart, ChartError> {
    let months = [
        ("Jan", 12.0),
        ("Feb", 19.0),
        ("Mar", 31.0),
        ("Apr", 42.0),
        ("May", 55.0),
        ("Jun", 61.0),
        ("Jul", 64.0),
        ("Aug", 58.0),
        ("Sep", 47.0),
        ("Oct", 33.0),
        ("Nov", 21.0),
        ("Dec", 14.0),
    ];
    let items = months
        .into_iter()
        .map(|(name, value)| Item::new(name, value))
        .collect::<Result<Vec<_>, _>>()?;
    let config = CoxcombConfig::default().with_sort(None);
    Ok(CoxcombChart::new(items).with_config(config))
}

/// A small source tree: directories with file sizes at the leaves.
fn source_tree() -> Result<Tree<Item>, ChartError> {
    let mut tree = Tree::new(Item::named("crate"));
    let root = tree.root();
    let layout = tree.add_child(root, Item::named("layout"))?;
    let modules = [
        ("subdivide", 9.0),
        ("propagate", 7.0),
        ("path", 12.0),
        ("tree", 8.0),
    ];
    for (name, size) in modules {
        tree.add_child(layout, Item::new(name, size)?)?;
    }
    let charts = tree.add_child(root, Item::named("charts"))?;
    let flow = tree.add_child(charts, Item::named("flow"))?;
    for (name, size) in [("circular", 11.0), ("arc", 8.0), ("sankey", 13.0)] {
        tree.add_child(flow, Item::new(name, size)?)?;
    }
    let radial = tree.add_child(charts, Item::named("radial"))?;
    for (name, size) in [("coxcomb", 7.0), ("sunburst", 10.0), ("tidy", 9.0)] {
        tree.add_child(radial, Item::new(name, size)?)?;
    }
    tree.add_child(charts, Item::new("svg", 5.0)?)?;
    tree.add_child(root, Item::new("demo", 6.0)?.with_fill(css::SLATE_GRAY))?;
    Ok(tree)
}

fn sunburst() -> Result<SunburstChart, ChartError> {
    Ok(SunburstChart::new(source_tree()?))
}

fn radial_tidy_tree() -> Result<RadialTidyTree, ChartError> {
    Ok(RadialTidyTree::new(source_tree()?))
}

fn box_plot() -> Result<BoxPlot, ChartError> {
    BoxPlot::new(vec![
        Series::new(
            "north",
            [12.0, 14.0, 15.0, 15.5, 17.0, 18.0, 19.0, 21.0, 35.0],
        )?,
        Series::new("south", [22.0, 24.0, 24.5, 26.0, 27.0, 29.0, 30.0])?,
        Series::new("east", [8.0, 11.0, 13.0, 13.5, 14.0, 16.0, 17.5, 18.0])?,
        Series::new("west", [2.0, 16.0, 17.0, 18.0, 19.0, 20.0, 21.0])?,
    ])
}

fn bubble_grid() -> Result<BubbleGridChart, ChartError> {
    let days = ["Mon", "Tue", "Wed", "Thu", "Fri"];
    let slots = ["morning", "afternoon", "evening"];
    let mut entries = Vec::new();
    for (i, day) in days.iter().enumerate() {
        for (j, slot) in slots.iter().enumerate() {
            let value = ((i + 1) * (j + 2) % 7 + 1) as f64;
            entries.push(BubbleGridEntry::new(*day, *slot, value)?);
        }
    }
    BubbleGridChart::new(entries)
}

fn comparison_bar() -> Result<ComparisonBarChart, ChartError> {
    let groups = ["0-17", "18-34", "35-54", "55-74", "75+"];
    let then = groups.into_iter().zip([18.0, 24.0, 29.0, 21.0, 8.0]);
    let now = groups.into_iter().zip([16.0, 22.0, 27.0, 24.0, 11.0]);
    let left = CategorySeries::new("2013", then)?.with_fill(css::STEEL_BLUE);
    let right = CategorySeries::new("2023", now)?.with_fill(css::INDIAN_RED);
    ComparisonBarChart::new(left, right)
}

fn bar_chart() -> Result<BarChart, ChartError> {
    let samples = [
        ("alpha", 4.2),
        ("beta", 7.9),
        ("gamma", 2.4),
        ("delta", 5.6),
    ];
    let items = samples
        .into_iter()
        .map(|(name, value)| Item::new(name, value))
        .collect::<Result<Vec<_>, _>>()?;
    let config = BarChartConfig::default().with_values(true);
    let mut chart = BarChart::new(items).with_config(config);
    chart.sort_by_value(SortOrder::Desc);
    Ok(chart)
}
