// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG export for chart marks.
//!
//! This is a plain serializer: paths are written as `<path>` elements and text as `<text>`
//! elements for the SVG consumer to shape. Marks are painted in `(z_index, id)` order.

use std::fmt::Write as _;
use std::io;
use std::path::Path;
use std::string::String;
use std::vec::Vec;

use kurbo::Rect;
use peniko::Brush;

use crate::chart::Chart;
use crate::log;
use crate::mark::{Mark, MarkPayload, TextAnchor, TextBaseline};

/// Serializes `marks` into a standalone SVG document of the given size.
pub fn render_svg(marks: &[Mark], width: f64, height: f64) -> String {
    let mut order: Vec<&Mark> = marks.iter().collect();
    order.sort_by_key(|m| (m.z_index, m.id.0));

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}">"#
    );
    for mark in order {
        match &mark.payload {
            MarkPayload::Path(p) => {
                if p.path.elements().is_empty() {
                    continue;
                }
                let _ = write!(out, r#"<path d="{}""#, p.path.to_svg());
                write_paint_attr(&mut out, "fill", &p.fill);
                if p.stroke_width > 0.0 {
                    write_paint_attr(&mut out, "stroke", &p.stroke);
                    let _ = write!(out, r#" stroke-width="{}""#, p.stroke_width);
                }
                out.push_str("/>\n");
            }
            MarkPayload::Text(t) => {
                let baseline = match t.baseline {
                    TextBaseline::Middle => "middle",
                    TextBaseline::Alphabetic => "alphabetic",
                    TextBaseline::Hanging => "hanging",
                    TextBaseline::Ideographic => "ideographic",
                };
                let _ = write!(
                    out,
                    r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{baseline}""#,
                    t.pos.x, t.pos.y, t.font_size
                );
                if t.angle != 0.0 {
                    let _ = write!(
                        out,
                        r#" transform="rotate({} {} {})""#,
                        t.angle, t.pos.x, t.pos.y
                    );
                }
                out.push_str(match t.anchor {
                    TextAnchor::Start => r#" text-anchor="start""#,
                    TextAnchor::Middle => r#" text-anchor="middle""#,
                    TextAnchor::End => r#" text-anchor="end""#,
                });
                write_paint_attr(&mut out, "fill", &t.fill);
                out.push('>');
                out.push_str(&escape_xml(&t.text));
                out.push_str("</text>\n");
            }
        }
    }
    out.push_str("</svg>\n");
    out
}

/// Lays `chart` out in a `width` x `height` viewport and writes it to `path` as SVG.
pub fn write_svg(
    path: impl AsRef<Path>,
    chart: &dyn Chart,
    width: f64,
    height: f64,
) -> io::Result<()> {
    let marks = chart.marks(Rect::new(0.0, 0.0, width, height));
    let svg = render_svg(&marks, width, height);
    log::debug!(
        path = %path.as_ref().display(),
        marks = marks.len(),
        bytes = svg.len(),
        "writing svg"
    );
    std::fs::write(path, svg)
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = std::format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, opacity)
        }
        _ => ("none".into(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    if opacity == Some(0.0) {
        let _ = write!(out, r#" {name}="none""#);
        return;
    }
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::vec;

    use kurbo::Point;
    use peniko::color::palette::css;

    use super::*;
    use crate::mark::{MarkId, PathMark};
    use crate::text_mark::TextMarkSpec;

    #[test]
    fn marks_are_painted_in_z_then_id_order() {
        let marks = vec![
            Mark::path(
                MarkId::from_raw(2),
                10,
                PathMark::rect(Rect::new(0.0, 0.0, 1.0, 1.0)).with_fill(css::RED),
            ),
            Mark::path(
                MarkId::from_raw(1),
                10,
                PathMark::rect(Rect::new(0.0, 0.0, 1.0, 1.0)).with_fill(css::BLUE),
            ),
            Mark::path(
                MarkId::from_raw(3),
                -5,
                PathMark::rect(Rect::new(0.0, 0.0, 1.0, 1.0)).with_fill(css::LIME),
            ),
        ];
        let svg = render_svg(&marks, 10.0, 10.0);
        let lime = svg.find("#00ff00").unwrap();
        let blue = svg.find("#0000ff").unwrap();
        let red = svg.find("#ff0000").unwrap();
        assert!(lime < blue && blue < red, "{svg}");
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn text_is_escaped_and_transparent_fill_is_none() {
        let marks = vec![
            TextMarkSpec::new(MarkId::from_raw(1), Point::new(5.0, 5.0), "a < b & c")
                .with_angle(30.0)
                .mark(),
            Mark::path(
                MarkId::from_raw(2),
                0,
                PathMark::line(Point::ZERO, Point::new(1.0, 1.0)),
            ),
        ];
        let svg = render_svg(&marks, 10.0, 10.0);
        assert!(svg.contains("a &lt; b &amp; c"), "{svg}");
        assert!(svg.contains(r#"transform="rotate(30 5 5)""#), "{svg}");
        assert!(svg.contains(r#"fill="none""#), "{svg}");
        assert!(!svg.contains("stroke-width"), "{svg}");
    }
}
