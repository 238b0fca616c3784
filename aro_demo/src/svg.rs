// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of a [`SceneSurface`].

use std::fmt::Write as _;

use kurbo::Rect;
use peniko::Color;

use crate::scene::{SceneMark, SceneSurface};

impl SceneSurface {
    /// Renders the current scene as a standalone SVG document.
    ///
    /// The view box is the canvas of the last layout, grown to cover any mark
    /// drawn outside it.
    pub fn to_svg_string(&self) -> String {
        let view_box = self
            .marks()
            .iter()
            .map(SceneMark::bounds)
            .fold(self.view(), |a, b| a.union(b));
        let view_box = if view_box.area() > 0.0 {
            view_box
        } else {
            Rect::new(0.0, 0.0, 100.0, 100.0)
        };

        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = write!(
            out,
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        );
        out.push('\n');

        for mark in self.marks() {
            match mark {
                SceneMark::Path {
                    path,
                    stroke,
                    stroke_width,
                } => {
                    let _ = write!(out, r#"<path d="{}" fill="none""#, path.to_svg());
                    write_color_attr(&mut out, "stroke", *stroke);
                    let _ = write!(out, r#" stroke-width="{stroke_width}""#);
                    out.push_str("/>\n");
                }
                SceneMark::Text {
                    bounds,
                    font_size,
                    text,
                } => {
                    let c = bounds.center();
                    let _ = write!(
                        out,
                        r#"<text x="{}" y="{}" font-size="{font_size}" dominant-baseline="middle" text-anchor="middle">"#,
                        c.x, c.y
                    );
                    out.push_str(&escape_xml(text));
                    out.push_str("</text>\n");
                }
                SceneMark::Image { rect, href } => {
                    let r = rect.abs();
                    let _ = writeln!(
                        out,
                        r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="none" href="{}"/>"#,
                        r.x0,
                        r.y0,
                        r.width(),
                        r.height(),
                        escape_xml(href)
                    );
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }
}

fn write_color_attr(out: &mut String, name: &str, color: Color) {
    let rgba = color.to_rgba8();
    let _ = write!(
        out,
        r##" {name}="#{:02x}{:02x}{:02x}""##,
        rgba.r, rgba.g, rgba.b
    );
    if rgba.a != 255 {
        let _ = write!(out, r#" {name}-opacity="{}""#, f64::from(rgba.a) / 255.0);
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
