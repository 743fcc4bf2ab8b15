use crate::model::{
    DrawItem, Drawable, EllipseLayout, FigureLayout, MarkerLayout, PathLayout, StrokeLayout,
    TextLayout,
};
use quizfig_core::Color;
use quizfig_core::style::{FontWeight, MarkerShape};
use std::fmt::Write as _;

#[derive(Debug, Clone, Default)]
pub struct SvgRenderOptions {
    /// Prefix for element ids (clip paths). Needed when several figures share one document.
    pub diagram_id: Option<String>,
    /// Draws the background rectangle even when the configured background is transparent.
    pub force_background: Option<Color>,
}

pub fn render_figure_svg(layout: &FigureLayout, options: &SvgRenderOptions) -> String {
    let id = options.diagram_id.as_deref().unwrap_or("quizfig");
    let clip_id = format!("{id}-axes");
    let vb = &layout.viewbox;

    let mut out = String::with_capacity(4096 + layout.items.len() * 160);
    let _ = write!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="{}" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        escape_attr(id),
        fmt(layout.width),
        fmt(layout.height),
        fmt(vb.min_x),
        fmt(vb.min_y),
        fmt(layout.width),
        fmt(layout.height),
    );

    let background = options.force_background.unwrap_or(layout.background);
    if !background.is_transparent() {
        let _ = write!(
            &mut out,
            r#"<rect class="background" x="{}" y="{}" width="{}" height="{}""#,
            fmt(vb.min_x),
            fmt(vb.min_y),
            fmt(layout.width),
            fmt(layout.height),
        );
        write_fill(&mut out, Some(background));
        out.push_str("/>");
    }

    let ab = &layout.axes_box;
    let _ = write!(
        &mut out,
        r#"<defs><clipPath id="{}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath></defs>"#,
        escape_attr(&clip_id),
        fmt(ab.min_x),
        fmt(ab.min_y),
        fmt(ab.width()),
        fmt(ab.height()),
    );

    for item in &layout.items {
        render_item(&mut out, item, &clip_id);
    }

    out.push_str("</svg>\n");
    out
}

fn render_item(out: &mut String, item: &DrawItem, clip_id: &str) {
    let _ = write!(out, r#"<g class="{}""#, item.role.as_str());
    if item.clip {
        let _ = write!(out, r#" clip-path="url(#{})""#, escape_attr(clip_id));
    }
    out.push('>');
    match &item.drawable {
        Drawable::Path(p) => render_path(out, p),
        Drawable::Ellipse(e) => render_ellipse(out, e),
        Drawable::Marker(m) => render_marker(out, m),
        Drawable::Text(t) => render_text(out, t),
    }
    out.push_str("</g>");
}

fn write_fill(out: &mut String, fill: Option<Color>) {
    match fill {
        Some(c) if !c.is_transparent() => {
            let _ = write!(out, r#" fill="{}""#, c.to_hex());
            if c.a < 255 {
                let _ = write!(out, r#" fill-opacity="{}""#, fmt_path(c.alpha()));
            }
        }
        _ => out.push_str(r#" fill="none""#),
    }
}

fn write_stroke(out: &mut String, stroke: Option<&StrokeLayout>) {
    let Some(s) = stroke else {
        out.push_str(r#" stroke="none""#);
        return;
    };
    let _ = write!(
        out,
        r#" stroke="{}" stroke-width="{}""#,
        s.color.to_hex(),
        fmt_path(s.width)
    );
    if s.color.a < 255 {
        let _ = write!(out, r#" stroke-opacity="{}""#, fmt_path(s.color.alpha()));
    }
    if let Some(dash) = &s.dash {
        out.push_str(r#" stroke-dasharray=""#);
        for (i, v) in dash.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&fmt_path(*v));
        }
        out.push('"');
    }
}

fn path_data(runs: &[Vec<(f64, f64)>], closed: bool) -> String {
    let mut d = String::new();
    for run in runs {
        for (i, (x, y)) in run.iter().enumerate() {
            d.push(if i == 0 { 'M' } else { 'L' });
            d.push_str(&fmt_path(*x));
            d.push(',');
            d.push_str(&fmt_path(*y));
        }
        if closed && !run.is_empty() {
            d.push('Z');
        }
    }
    d
}

fn render_path(out: &mut String, p: &PathLayout) {
    let d = path_data(&p.runs, p.closed);
    if d.is_empty() {
        return;
    }
    let _ = write!(out, r#"<path d="{d}""#);
    write_fill(out, p.fill);
    write_stroke(out, p.stroke.as_ref());
    out.push_str(r#" stroke-linejoin="round" stroke-linecap="butt"/>"#);
}

fn render_ellipse(out: &mut String, e: &EllipseLayout) {
    let _ = write!(
        out,
        r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}""#,
        fmt_path(e.cx),
        fmt_path(e.cy),
        fmt_path(e.rx),
        fmt_path(e.ry)
    );
    write_fill(out, e.fill);
    write_stroke(out, e.stroke.as_ref());
    out.push_str("/>");
}

fn render_marker(out: &mut String, m: &MarkerLayout) {
    let r = m.size / 2.0;
    let (x, y) = (m.x, m.y);
    match m.shape {
        MarkerShape::Circle | MarkerShape::Point => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}""#,
                fmt_path(x),
                fmt_path(y),
                fmt_path(r)
            );
        }
        MarkerShape::Square => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                fmt_path(x - r),
                fmt_path(y - r),
                fmt_path(m.size),
                fmt_path(m.size)
            );
        }
        MarkerShape::Triangle => {
            let d = path_data(&[vec![(x, y - r), (x + r, y + r), (x - r, y + r)]], true);
            let _ = write!(out, r#"<path d="{d}""#);
        }
        MarkerShape::Diamond => {
            let d = path_data(
                &[vec![(x, y - r), (x + r, y), (x, y + r), (x - r, y)]],
                true,
            );
            let _ = write!(out, r#"<path d="{d}""#);
        }
        MarkerShape::Plus => {
            let d = path_data(
                &[vec![(x - r, y), (x + r, y)], vec![(x, y - r), (x, y + r)]],
                false,
            );
            let _ = write!(out, r#"<path d="{d}""#);
        }
        MarkerShape::Cross => {
            let d = path_data(
                &[
                    vec![(x - r, y - r), (x + r, y + r)],
                    vec![(x - r, y + r), (x + r, y - r)],
                ],
                false,
            );
            let _ = write!(out, r#"<path d="{d}""#);
        }
    }
    write_fill(out, m.face);
    write_stroke(out, m.edge.as_ref());
    out.push_str("/>");
}

fn render_text(out: &mut String, t: &TextLayout) {
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-family="{}" font-size="{}" text-anchor="{}""#,
        fmt_path(t.x),
        fmt_path(t.y),
        escape_attr(&t.font_family),
        fmt_path(t.font_size),
        t.anchor.as_str()
    );
    if t.weight == FontWeight::Bold {
        out.push_str(r#" font-weight="bold""#);
    }
    write_fill(out, Some(t.color));
    if t.rotation != 0.0 {
        let _ = write!(
            out,
            r#" transform="rotate({} {} {})""#,
            fmt_path(-t.rotation),
            fmt_path(t.pivot.0),
            fmt_path(t.pivot.1)
        );
    }
    out.push('>');
    for (i, line) in t.lines.iter().enumerate() {
        let dy = if i == 0 { 0.0 } else { t.line_height };
        let _ = write!(
            out,
            r#"<tspan x="{}" dy="{}">{}</tspan>"#,
            fmt_path(t.x),
            fmt_path(dy),
            escape_xml(line)
        );
    }
    out.push_str("</text>");
}

fn fmt(v: f64) -> String {
    // Round-trippable decimal form without `-0` and tiny float noise.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn fmt_path(v: f64) -> String {
    // Three fractional digits, ties half-up.
    if !v.is_finite() || v.abs() < 0.0005 {
        return "0".to_string();
    }

    let r = ((v * 1000.0) + 0.5).floor() / 1000.0;
    let mut s = format!("{r:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> std::borrow::Cow<'_, str> {
    htmlize::escape_text(text)
}

fn escape_attr(text: &str) -> std::borrow::Cow<'_, str> {
    htmlize::escape_attribute(text)
}
