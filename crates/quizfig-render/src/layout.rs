use crate::legend::{self, Handle, LegendEntry, LegendParams};
use crate::model::{
    DrawItem, Drawable, EllipseLayout, FigureLayout, MarkerLayout, PathLayout, Px, Role,
    StrokeLayout, TextAnchor, TextLayout, TickLayout,
};
use crate::pie;
use crate::scale::AxesTransform;
use crate::text::{ASCENT, DESCENT, TextMeasurer, TextStyle};
use crate::ticks::{format_tick_labels, nice_ticks, tick_budget};
use crate::{Error, LayoutOptions, Result};
use quizfig_core::figure::{
    Arc, Arrow, ArrowHeads, Aspect, AxisStyle, Circle, Coords, Curve, Element, Figure, Markers,
    Pie, Polygon, Rect, RefLine, SpinePosition, Text, Ticks,
};
use quizfig_core::geom::{Bounds, point, screen_rotation};
use quizfig_core::style::{FontWeight, HAlign, MarkerShape, MarkerStyle, Stroke, VAlign};
use quizfig_core::{Color, ColorCycle, RenderConfig};

const SUBPLOT_LEFT: f64 = 0.125;
const SUBPLOT_RIGHT: f64 = 0.9;
const SUBPLOT_BOTTOM: f64 = 0.11;
const SUBPLOT_TOP: f64 = 0.88;
const MARGIN: f64 = 0.05;
const PIE_LIMIT: f64 = 1.25;

const TICK_LENGTH_PT: f64 = 3.5;
const TICK_PAD_PT: f64 = 3.5;
const AXIS_WIDTH_PT: f64 = 0.8;
const TITLE_PAD_PT: f64 = 6.0;
const MARKER_EDGE_PT: f64 = 1.0;
const ARROW_WIDTH_PT: f64 = 1.0;
const GRID_COLOR: Color = Color::rgb(0xb0, 0xb0, 0xb0);

const Z_GRID: f64 = 1.5;
const Z_AXIS: f64 = 2.5;

/// Largest canvas edge accepted, in pixels.
const MAX_CANVAS_PX: f64 = 32_768.0;

struct Ctx<'a> {
    cfg: &'a RenderConfig,
    measurer: &'a dyn TextMeasurer,
    px_per_pt: f64,
    font_family: String,
    line_cycle: ColorCycle,
    patch_cycle: ColorCycle,
    items: Vec<DrawItem>,
    legend: Vec<LegendEntry>,
    /// Visible data vertices in pixels; the legend avoids them.
    data_points: Vec<Px>,
}

impl Ctx<'_> {
    fn pt(&self, v: f64) -> f64 {
        v * self.px_per_pt
    }

    fn push(&mut self, z: f64, role: Role, clip: bool, drawable: Drawable) {
        self.items.push(DrawItem {
            z,
            role,
            clip,
            drawable,
        });
    }

    fn stroke(&self, stroke: &Stroke, color: Color) -> Option<StrokeLayout> {
        if !stroke.style.is_visible() {
            return None;
        }
        let width_pt = stroke.width.unwrap_or_else(|| self.cfg.line_width());
        let color = stroke.color.unwrap_or(color);
        let color = match stroke.alpha {
            Some(a) => color.with_alpha(a),
            None => color,
        };
        Some(StrokeLayout {
            color,
            width: self.pt(width_pt),
            dash: stroke
                .style
                .dash_pattern()
                .map(|p| p.iter().map(|v| self.pt(v * width_pt)).collect()),
        })
    }

    fn marker(&self, style: &MarkerStyle, color: Color, at: Px) -> MarkerLayout {
        let mut size_pt = style.size.unwrap_or_else(|| self.cfg.marker_size());
        if style.shape == MarkerShape::Point {
            size_pt *= 0.5;
        }
        let face = if style.shape.is_filled() {
            Some(style.face.unwrap_or(color))
        } else {
            None
        };
        MarkerLayout {
            x: at.0,
            y: at.1,
            shape: style.shape,
            size: self.pt(size_pt),
            face,
            edge: Some(StrokeLayout {
                color: style.edge.unwrap_or(color),
                width: self.pt(style.edge_width.unwrap_or(MARKER_EDGE_PT)),
                dash: None,
            }),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &self,
        content: &str,
        at: Px,
        size_px: f64,
        weight: FontWeight,
        color: Color,
        ha: HAlign,
        va: VAlign,
        rotation: f64,
    ) -> TextLayout {
        let style = TextStyle {
            font_family: Some(self.font_family.clone()),
            font_size: size_px,
            font_weight: weight,
        };
        let m = self.measurer.measure(content, &style);
        let lines = crate::text::DeterministicTextMeasurer::normalized_text_lines(content);
        let n = lines.len().max(1) as f64;
        let block_h = (n - 1.0) * m.line_height + size_px * (ASCENT + DESCENT);
        let (ax, ay) = at;
        let first_baseline = match va {
            VAlign::Top => ay + ASCENT * size_px,
            VAlign::Center => ay - block_h / 2.0 + ASCENT * size_px,
            VAlign::Bottom => ay - DESCENT * size_px - (n - 1.0) * m.line_height,
            VAlign::Baseline => ay - (n - 1.0) * m.line_height,
        };
        let (left, anchor) = match ha {
            HAlign::Left => (ax, TextAnchor::Start),
            HAlign::Center => (ax - m.width / 2.0, TextAnchor::Middle),
            HAlign::Right => (ax - m.width, TextAnchor::End),
        };
        let top = first_baseline - ASCENT * size_px;
        let unrotated = Bounds {
            min_x: left,
            min_y: top,
            max_x: left + m.width,
            max_y: top + block_h,
        };
        let bbox = if rotation == 0.0 {
            unrotated
        } else {
            let t = screen_rotation(point(ax, ay), rotation);
            let corners = [
                (unrotated.min_x, unrotated.min_y),
                (unrotated.max_x, unrotated.min_y),
                (unrotated.max_x, unrotated.max_y),
                (unrotated.min_x, unrotated.max_y),
            ]
            .map(|(x, y)| {
                let p = t.transform_point(point(x, y));
                (p.x, p.y)
            });
            Bounds::from_points(corners).unwrap_or(unrotated)
        };
        TextLayout {
            x: ax,
            y: first_baseline,
            lines,
            line_height: m.line_height,
            font_size: size_px,
            font_family: self.font_family.clone(),
            weight,
            anchor,
            color,
            rotation,
            pivot: at,
            bbox,
        }
    }
}

fn nonsingular(lo: f64, hi: f64) -> [f64; 2] {
    if (hi - lo).abs() > 1e-12 * lo.abs().max(hi.abs()).max(1.0) {
        return [lo, hi];
    }
    if lo == 0.0 {
        [-MARGIN, MARGIN]
    } else {
        [lo - MARGIN * lo.abs(), hi + MARGIN * hi.abs()]
    }
}

fn autoscale(extent: Option<[f64; 2]>) -> [f64; 2] {
    let Some([lo, hi]) = extent else {
        return [0.0, 1.0];
    };
    let [lo, hi] = nonsingular(lo, hi);
    let d = (hi - lo) * MARGIN;
    [lo - d, hi + d]
}

#[derive(Default)]
struct Extents {
    x: Option<[f64; 2]>,
    y: Option<[f64; 2]>,
}

impl Extents {
    fn add_x(&mut self, v: f64) {
        if v.is_finite() {
            self.x = Some(match self.x {
                Some([lo, hi]) => [lo.min(v), hi.max(v)],
                None => [v, v],
            });
        }
    }

    fn add_y(&mut self, v: f64) {
        if v.is_finite() {
            self.y = Some(match self.y {
                Some([lo, hi]) => [lo.min(v), hi.max(v)],
                None => [v, v],
            });
        }
    }

    fn add(&mut self, (x, y): Px) {
        if x.is_finite() && y.is_finite() {
            self.add_x(x);
            self.add_y(y);
        }
    }
}

fn arc_data_points(a: &Arc) -> Vec<Px> {
    pie::arc_points(a.center, a.radius, a.start_deg, a.end_deg)
}

fn rect_corners(r: &Rect) -> [Px; 4] {
    let (x, y) = r.origin;
    [
        (x, y),
        (x + r.width, y),
        (x + r.width, y + r.height),
        (x, y + r.height),
    ]
}

fn data_extents(fig: &Figure, sampled: &[Option<Vec<Vec<Px>>>]) -> Extents {
    let mut ext = Extents::default();
    for (el, runs) in fig.elements.iter().zip(sampled) {
        match el {
            Element::Polyline(p) => p.points.iter().for_each(|pt| ext.add(*pt)),
            Element::Markers(m) => m.points.iter().for_each(|pt| ext.add(*pt)),
            Element::Polygon(p) => p.points.iter().for_each(|pt| ext.add(*pt)),
            Element::Curve(_) => {
                for run in runs.iter().flatten() {
                    run.iter().for_each(|pt| ext.add(*pt));
                }
            }
            Element::Circle(c) => {
                ext.add((c.center.0 - c.radius, c.center.1 - c.radius));
                ext.add((c.center.0 + c.radius, c.center.1 + c.radius));
            }
            Element::Arc(a) => arc_data_points(a).into_iter().for_each(|pt| ext.add(pt)),
            Element::Rect(r) if r.coords == Coords::Data => {
                rect_corners(r).into_iter().for_each(|pt| ext.add(pt))
            }
            Element::HLine(l) => ext.add_y(l.value),
            Element::VLine(l) => ext.add_x(l.value),
            Element::Rect(_) | Element::Pie(_) | Element::Text(_) | Element::Arrow(_) => {}
        }
    }
    ext
}

fn span(lim: [f64; 2]) -> f64 {
    (lim[1] - lim[0]).abs()
}

/// Re-centers `lim` on its midpoint with the given (absolute) span, keeping its direction.
fn with_span(lim: [f64; 2], new_span: f64) -> [f64; 2] {
    let mid = (lim[0] + lim[1]) / 2.0;
    let half = new_span / 2.0;
    if lim[1] >= lim[0] {
        [mid - half, mid + half]
    } else {
        [mid + half, mid - half]
    }
}

/// Liang-Barsky clip of one segment; returns the kept parameter range.
fn clip_segment(p0: Px, p1: Px, r: &Bounds) -> Option<(f64, f64)> {
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-dx, p0.0 - r.min_x),
        (dx, r.max_x - p0.0),
        (-dy, p0.1 - r.min_y),
        (dy, r.max_y - p0.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }
    }
    Some((t0, t1))
}

/// Cuts a pixel polyline to `r`. Non-finite vertices and excursions outside `r` split the run.
pub(crate) fn clip_polyline(run: &[Px], r: &Bounds) -> Vec<Vec<Px>> {
    let lerp = |a: Px, b: Px, t: f64| (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t);
    let finite = |p: &Px| p.0.is_finite() && p.1.is_finite();
    let mut out: Vec<Vec<Px>> = Vec::new();
    let mut cur: Vec<Px> = Vec::new();
    let mut connected = false;
    for w in run.windows(2) {
        let (a, b) = (w[0], w[1]);
        let kept = if finite(&a) && finite(&b) {
            clip_segment(a, b, r)
        } else {
            None
        };
        match kept {
            Some((t0, t1)) => {
                if !(connected && t0 == 0.0) {
                    if cur.len() > 1 {
                        out.push(std::mem::take(&mut cur));
                    }
                    cur.clear();
                    cur.push(lerp(a, b, t0));
                }
                cur.push(lerp(a, b, t1));
                connected = t1 == 1.0;
            }
            None => connected = false,
        }
    }
    if cur.len() > 1 {
        out.push(cur);
    }
    out
}

fn axis_ticks(style: &AxisStyle, lim: [f64; 2], budget: usize) -> Vec<f64> {
    if !style.visible {
        return Vec::new();
    }
    let lo = lim[0].min(lim[1]);
    let hi = lim[0].max(lim[1]);
    let eps = (hi - lo) * 1e-9;
    let raw = match &style.ticks {
        Ticks::Auto => nice_ticks(lo, hi, budget),
        Ticks::Fixed(values) => values.clone(),
        Ticks::Hidden => Vec::new(),
    };
    raw.into_iter()
        .filter(|v| v.is_finite() && *v >= lo - eps && *v <= hi + eps)
        .collect()
}

fn path(
    runs: Vec<Vec<Px>>,
    closed: bool,
    stroke: Option<StrokeLayout>,
    fill: Option<Color>,
) -> Drawable {
    Drawable::Path(PathLayout {
        runs,
        closed,
        stroke,
        fill,
    })
}

/// Lays a figure out on its canvas: limits, ticks, every element as pixel geometry, the legend
/// and the trimmed output region.
pub fn layout_figure(fig: &Figure, options: &LayoutOptions) -> Result<FigureLayout> {
    fig.validate()?;
    let cfg = &options.config;

    let dpi = fig.dpi.unwrap_or_else(|| cfg.dpi());
    let canvas_w = fig.width * dpi;
    let canvas_h = fig.height * dpi;
    if canvas_w > MAX_CANVAS_PX || canvas_h > MAX_CANVAS_PX {
        return Err(Error::InvalidFigure {
            message: format!("canvas of {canvas_w}x{canvas_h} px is too large"),
        });
    }
    let canvas = Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: canvas_w,
        max_y: canvas_h,
    };
    let mut frame = Bounds {
        min_x: canvas_w * SUBPLOT_LEFT,
        min_y: canvas_h * (1.0 - SUBPLOT_TOP),
        max_x: canvas_w * SUBPLOT_RIGHT,
        max_y: canvas_h * (1.0 - SUBPLOT_BOTTOM),
    };

    let sampled: Vec<Option<Vec<Vec<Px>>>> = fig
        .elements
        .iter()
        .map(|el| match el {
            Element::Curve(c) => Some(c.curve.segments()),
            _ => None,
        })
        .collect();

    let has_pie = fig.elements.iter().any(|e| matches!(e, Element::Pie(_)));
    let axes_visible = fig.axes.visible && !has_pie;
    let ext = data_extents(fig, &sampled);

    let pie_lim = has_pie.then_some([-PIE_LIMIT, PIE_LIMIT]);
    let mut xlim = fig.axes.xlim.or(pie_lim).unwrap_or_else(|| autoscale(ext.x));
    let mut ylim = fig.axes.ylim.or(pie_lim).unwrap_or_else(|| autoscale(ext.y));

    let aspect = if has_pie { Aspect::Equal } else { fig.axes.aspect };
    let x_fixed = fig.axes.xlim.is_some() || has_pie;
    let y_fixed = fig.axes.ylim.is_some() || has_pie;
    let adjust_box = aspect == Aspect::EqualBox || (aspect == Aspect::Equal && x_fixed && y_fixed);
    if aspect != Aspect::Auto {
        let kx = span(xlim) / frame.width();
        let ky = span(ylim) / frame.height();
        if adjust_box {
            let k = kx.max(ky);
            let (w, h) = (span(xlim) / k, span(ylim) / k);
            let (cx, cy) = (
                (frame.min_x + frame.max_x) / 2.0,
                (frame.min_y + frame.max_y) / 2.0,
            );
            frame = Bounds {
                min_x: cx - w / 2.0,
                min_y: cy - h / 2.0,
                max_x: cx + w / 2.0,
                max_y: cy + h / 2.0,
            };
        } else {
            let k = if x_fixed {
                kx
            } else if y_fixed {
                ky
            } else {
                kx.max(ky)
            };
            xlim = with_span(xlim, k * frame.width());
            ylim = with_span(ylim, k * frame.height());
        }
    }
    tracing::debug!(?xlim, ?ylim, ?aspect, "axes limits");

    let transform = AxesTransform::new(xlim, ylim, frame);

    let mut ctx = Ctx {
        cfg,
        measurer: options.text_measurer.as_ref(),
        px_per_pt: dpi / 72.0,
        font_family: cfg.font_family().to_string(),
        line_cycle: ColorCycle::new(cfg.color_cycle()),
        patch_cycle: ColorCycle::new(cfg.color_cycle()),
        items: Vec::new(),
        legend: Vec::new(),
        data_points: Vec::new(),
    };

    let (x_ticks, y_ticks) = if axes_visible {
        layout_axes(&mut ctx, fig, &transform)
    } else {
        (Vec::new(), Vec::new())
    };

    for (el, runs) in fig.elements.iter().zip(&sampled) {
        layout_element(&mut ctx, el, runs.as_deref(), &transform);
    }

    if let Some(title) = &fig.title {
        let size = ctx.pt(title.font_size.unwrap_or_else(|| cfg.title_font_size()));
        let at = ((frame.min_x + frame.max_x) / 2.0, frame.min_y - ctx.pt(TITLE_PAD_PT));
        let t = ctx.text(
            &title.text,
            at,
            size,
            title.weight,
            Color::BLACK,
            HAlign::Center,
            VAlign::Baseline,
            0.0,
        );
        ctx.push(Z_AXIS, Role::Title, false, Drawable::Text(t));
    }

    let mut legend_location = None;
    if let Some(legend) = &fig.legend {
        let font_size = ctx.pt(legend.font_size.unwrap_or_else(|| cfg.font_size()));
        let params = LegendParams {
            measurer: ctx.measurer,
            font_family: &ctx.font_family,
            font_size,
            px_per_pt: ctx.px_per_pt,
        };
        if let Some((items, loc)) =
            legend::layout_legend(&ctx.legend, legend.location, &frame, &ctx.data_points, &params)
        {
            ctx.items.extend(items);
            legend_location = Some(loc);
        }
    }

    let mut items = ctx.items;
    items.sort_by(|a, b| a.z.total_cmp(&b.z));

    let viewbox = if cfg.tight_bbox() {
        let mut bb = frame;
        for item in &items {
            if let Some(b) = item_extent(item, &frame) {
                bb = bb.union(&b);
            }
        }
        bb.inflate(cfg.pad_inches() * dpi)
    } else {
        canvas
    };

    Ok(FigureLayout {
        width: viewbox.width().ceil().max(1.0),
        height: viewbox.height().ceil().max(1.0),
        viewbox,
        canvas,
        dpi,
        background: cfg.background(),
        axes_box: frame,
        x_scale: transform.x,
        y_scale: transform.y,
        x_ticks,
        y_ticks,
        legend_location,
        items,
    })
}

fn layout_axes(
    ctx: &mut Ctx<'_>,
    fig: &Figure,
    t: &AxesTransform,
) -> (Vec<TickLayout>, Vec<TickLayout>) {
    let frame = t.frame;
    let axes = &fig.axes;
    let font_px = ctx.pt(ctx.cfg.font_size());
    let axis_stroke = StrokeLayout {
        color: Color::BLACK,
        width: ctx.pt(AXIS_WIDTH_PT),
        dash: None,
    };
    let tick_len = ctx.pt(TICK_LENGTH_PT);
    let tick_pad = ctx.pt(TICK_PAD_PT);

    let spine_y = match axes.spines.bottom_position {
        SpinePosition::Edge => frame.max_y,
        SpinePosition::Center => (frame.min_y + frame.max_y) / 2.0,
        SpinePosition::Zero => t.y.map(0.0).clamp(frame.min_y, frame.max_y),
    };

    let xv = axis_ticks(
        &axes.x_axis,
        t.x.domain,
        tick_budget(frame.width(), font_px, true),
    );
    let yv = axis_ticks(
        &axes.y_axis,
        t.y.domain,
        tick_budget(frame.height(), font_px, false),
    );
    tracing::debug!(x = xv.len(), y = yv.len(), "ticks");

    let x_ticks: Vec<TickLayout> = xv
        .iter()
        .zip(format_tick_labels(&xv))
        .map(|(v, label)| TickLayout {
            value: *v,
            position: t.x.map(*v),
            label,
        })
        .collect();
    let y_ticks: Vec<TickLayout> = yv
        .iter()
        .zip(format_tick_labels(&yv))
        .map(|(v, label)| TickLayout {
            value: *v,
            position: t.y.map(*v),
            label,
        })
        .collect();

    if let Some(grid) = &axes.grid {
        if let Some(stroke) = ctx.stroke(
            &Stroke {
                width: grid.width.or(Some(AXIS_WIDTH_PT)),
                ..*grid
            },
            GRID_COLOR,
        ) {
            let mut runs: Vec<Vec<Px>> = x_ticks
                .iter()
                .map(|tk| vec![(tk.position, frame.min_y), (tk.position, frame.max_y)])
                .collect();
            runs.extend(
                y_ticks
                    .iter()
                    .map(|tk| vec![(frame.min_x, tk.position), (frame.max_x, tk.position)]),
            );
            if !runs.is_empty() {
                ctx.push(Z_GRID, Role::Grid, true, path(runs, false, Some(stroke), None));
            }
        }
    }

    let spines = axes.spines;
    let mut spine_runs: Vec<Vec<Px>> = Vec::new();
    if spines.left {
        spine_runs.push(vec![(frame.min_x, frame.min_y), (frame.min_x, frame.max_y)]);
    }
    if spines.right {
        spine_runs.push(vec![(frame.max_x, frame.min_y), (frame.max_x, frame.max_y)]);
    }
    if spines.top {
        spine_runs.push(vec![(frame.min_x, frame.min_y), (frame.max_x, frame.min_y)]);
    }
    if spines.bottom {
        spine_runs.push(vec![(frame.min_x, spine_y), (frame.max_x, spine_y)]);
    }
    if !spine_runs.is_empty() {
        ctx.push(
            Z_AXIS,
            Role::Spine,
            false,
            path(spine_runs, false, Some(axis_stroke.clone()), None),
        );
    }

    let mut tick_runs: Vec<Vec<Px>> = Vec::new();
    for tk in &x_ticks {
        tick_runs.push(vec![(tk.position, spine_y), (tk.position, spine_y + tick_len)]);
        let label = ctx.text(
            &tk.label,
            (tk.position, spine_y + tick_len + tick_pad),
            font_px,
            FontWeight::Normal,
            Color::BLACK,
            HAlign::Center,
            VAlign::Top,
            0.0,
        );
        ctx.push(Z_AXIS, Role::TickLabel, false, Drawable::Text(label));
    }
    for tk in &y_ticks {
        tick_runs.push(vec![(frame.min_x, tk.position), (frame.min_x - tick_len, tk.position)]);
        let label = ctx.text(
            &tk.label,
            (frame.min_x - tick_len - tick_pad, tk.position),
            font_px,
            FontWeight::Normal,
            Color::BLACK,
            HAlign::Right,
            VAlign::Center,
            0.0,
        );
        ctx.push(Z_AXIS, Role::TickLabel, false, Drawable::Text(label));
    }
    if !tick_runs.is_empty() {
        ctx.push(
            Z_AXIS,
            Role::Tick,
            false,
            path(tick_runs, false, Some(axis_stroke), None),
        );
    }

    (x_ticks, y_ticks)
}

fn z_of(el: &Element) -> f64 {
    f64::from(el.z_order())
}

fn layout_element(
    ctx: &mut Ctx<'_>,
    el: &Element,
    sampled: Option<&[Vec<Px>]>,
    t: &AxesTransform,
) {
    let z = z_of(el);
    let guard = t.frame.inflate(t.frame.width().max(t.frame.height()) * 0.05 + 20.0);
    match el {
        Element::Polyline(p) => layout_lines(
            ctx,
            z,
            std::slice::from_ref(&p.points),
            &p.stroke,
            p.marker.as_ref(),
            p.label.as_deref(),
            t,
            &guard,
        ),
        Element::Curve(c) => layout_curve(ctx, z, c, sampled.unwrap_or(&[]), t, &guard),
        Element::Markers(m) => layout_markers(ctx, z, m, t, &guard),
        Element::Circle(c) => layout_circle(ctx, z, c, t),
        Element::Arc(a) => layout_arc(ctx, z, a, t, &guard),
        Element::Polygon(p) => layout_polygon(ctx, z, p, t),
        Element::Rect(r) => layout_rect(ctx, z, r, t),
        Element::Pie(p) => layout_pie(ctx, z, p, t),
        Element::HLine(l) => layout_ref_line(ctx, z, l, true, t),
        Element::VLine(l) => layout_ref_line(ctx, z, l, false, t),
        Element::Text(tx) => layout_text(ctx, z, tx, t),
        Element::Arrow(a) => layout_arrow(ctx, z, a, t),
    }
}

#[allow(clippy::too_many_arguments)]
fn layout_lines(
    ctx: &mut Ctx<'_>,
    z: f64,
    data_runs: &[Vec<Px>],
    stroke: &Stroke,
    marker: Option<&MarkerStyle>,
    label: Option<&str>,
    t: &AxesTransform,
    guard: &Bounds,
) {
    let color = stroke.color.unwrap_or_else(|| ctx.line_cycle.next_color());
    let line = ctx.stroke(stroke, color);

    if let Some(line) = &line {
        let mut runs = Vec::new();
        for run in data_runs {
            let px: Vec<Px> = run.iter().map(|p| t.data(*p)).collect();
            runs.extend(clip_polyline(&px, guard));
        }
        ctx.data_points.extend(
            runs.iter()
                .flatten()
                .filter(|(x, y)| t.frame.contains(*x, *y))
                .copied(),
        );
        if !runs.is_empty() {
            ctx.push(z, Role::Data, true, path(runs, false, Some(line.clone()), None));
        }
    }

    let marker_template = marker.map(|m| ctx.marker(m, color, (0.0, 0.0)));
    if let Some(m) = marker {
        for p in data_runs.iter().flatten() {
            let at = t.data(*p);
            if guard.contains(at.0, at.1) {
                ctx.data_points.push(at);
                let mk = ctx.marker(m, color, at);
                ctx.push(z, Role::Data, true, Drawable::Marker(mk));
            }
        }
    }

    if let Some(label) = label {
        ctx.legend.push(LegendEntry {
            label: label.to_string(),
            handle: Handle::Line {
                stroke: line,
                marker: marker_template,
            },
        });
    }
}

fn layout_curve(
    ctx: &mut Ctx<'_>,
    z: f64,
    c: &Curve,
    runs: &[Vec<Px>],
    t: &AxesTransform,
    guard: &Bounds,
) {
    layout_lines(ctx, z, runs, &c.stroke, None, c.label.as_deref(), t, guard);
}

fn layout_markers(ctx: &mut Ctx<'_>, z: f64, m: &Markers, t: &AxesTransform, guard: &Bounds) {
    let color = m
        .marker
        .face
        .filter(|c| !c.is_transparent())
        .or(m.marker.edge)
        .unwrap_or_else(|| ctx.line_cycle.next_color());
    for p in &m.points {
        let at = t.data(*p);
        if at.0.is_finite() && at.1.is_finite() && guard.contains(at.0, at.1) {
            ctx.data_points.push(at);
            let mk = ctx.marker(&m.marker, color, at);
            ctx.push(z, Role::Data, true, Drawable::Marker(mk));
        }
    }
    if let Some(label) = &m.label {
        let template = ctx.marker(&m.marker, color, (0.0, 0.0));
        ctx.legend.push(LegendEntry {
            label: label.clone(),
            handle: Handle::Line {
                stroke: None,
                marker: Some(template),
            },
        });
    }
}

/// Outline and fill of a patch. With neither given the patch is filled from the patch cycle.
fn patch_paint(
    ctx: &mut Ctx<'_>,
    stroke: Option<&Stroke>,
    fill: Option<Color>,
) -> (Option<StrokeLayout>, Option<Color>) {
    let outline = stroke.and_then(|s| ctx.stroke(s, Color::BLACK));
    let fill = match (stroke, fill) {
        (None, None) => Some(ctx.patch_cycle.next_color()),
        (_, fill) => fill,
    };
    (outline, fill)
}

fn layout_circle(ctx: &mut Ctx<'_>, z: f64, c: &Circle, t: &AxesTransform) {
    let (stroke, fill) = patch_paint(ctx, c.stroke.as_ref(), c.fill);
    let (cx, cy) = t.data(c.center);
    ctx.push(
        z,
        Role::Data,
        true,
        Drawable::Ellipse(EllipseLayout {
            cx,
            cy,
            rx: c.radius * t.x.pixels_per_unit(),
            ry: c.radius * t.y.pixels_per_unit(),
            stroke,
            fill,
        }),
    );
}

fn layout_arc(ctx: &mut Ctx<'_>, z: f64, a: &Arc, t: &AxesTransform, guard: &Bounds) {
    let Some(stroke) = ctx.stroke(&a.stroke, Color::BLACK) else {
        return;
    };
    let px: Vec<Px> = arc_data_points(a).into_iter().map(|p| t.data(p)).collect();
    let runs = clip_polyline(&px, guard);
    if !runs.is_empty() {
        ctx.push(z, Role::Data, true, path(runs, false, Some(stroke), None));
    }
}

fn layout_polygon(ctx: &mut Ctx<'_>, z: f64, p: &Polygon, t: &AxesTransform) {
    let (stroke, fill) = patch_paint(ctx, p.stroke.as_ref(), p.fill);
    let px: Vec<Px> = p
        .points
        .iter()
        .map(|pt| t.data(*pt))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    ctx.data_points
        .extend(px.iter().filter(|(x, y)| t.frame.contains(*x, *y)).copied());
    if let Some(label) = &p.label {
        ctx.legend.push(LegendEntry {
            label: label.clone(),
            handle: Handle::Patch {
                fill,
                stroke: stroke.clone(),
            },
        });
    }
    ctx.push(z, Role::Data, true, path(vec![px], true, stroke, fill));
}

fn layout_rect(ctx: &mut Ctx<'_>, z: f64, r: &Rect, t: &AxesTransform) {
    let (stroke, fill) = patch_paint(ctx, r.stroke.as_ref(), r.fill);
    let px: Vec<Px> = rect_corners(r)
        .into_iter()
        .map(|p| t.to_px(r.coords, p))
        .collect();
    ctx.push(z, Role::Data, true, path(vec![px], true, stroke, fill));
}

fn layout_pie(ctx: &mut Ctx<'_>, z: f64, p: &Pie, t: &AxesTransform) {
    for (i, (theta1, theta2)) in pie::wedge_angles(&p.sizes, p.start_angle, p.clockwise)
        .into_iter()
        .enumerate()
    {
        if theta1 == theta2 {
            continue;
        }
        let fill = p
            .colors
            .get(i)
            .copied()
            .unwrap_or_else(|| ctx.patch_cycle.next_color());
        let edge = p.edge.as_ref().and_then(|s| ctx.stroke(s, Color::WHITE));
        let px: Vec<Px> = pie::wedge_polygon((0.0, 0.0), 1.0, theta1, theta2)
            .into_iter()
            .map(|pt| t.data(pt))
            .collect();
        ctx.push(z, Role::Data, true, path(vec![px], true, edge, Some(fill)));
    }
}

fn layout_ref_line(ctx: &mut Ctx<'_>, z: f64, l: &RefLine, horizontal: bool, t: &AxesTransform) {
    let color = l.stroke.color.unwrap_or_else(|| ctx.line_cycle.next_color());
    let Some(stroke) = ctx.stroke(&l.stroke, color) else {
        return;
    };
    let f = t.frame;
    let run = if horizontal {
        let y = t.y.map(l.value);
        vec![(f.min_x, y), (f.max_x, y)]
    } else {
        let x = t.x.map(l.value);
        vec![(x, f.min_y), (x, f.max_y)]
    };
    if let Some(label) = &l.label {
        ctx.legend.push(LegendEntry {
            label: label.clone(),
            handle: Handle::Line {
                stroke: Some(stroke.clone()),
                marker: None,
            },
        });
    }
    if run.iter().all(|(x, y)| x.is_finite() && y.is_finite()) {
        ctx.push(z, Role::Data, true, path(vec![run], false, Some(stroke), None));
    }
}

fn layout_text(ctx: &mut Ctx<'_>, z: f64, tx: &Text, t: &AxesTransform) {
    let at = t.to_px(tx.coords, (tx.x, tx.y));
    if !(at.0.is_finite() && at.1.is_finite()) {
        return;
    }
    let size = ctx.pt(tx.size.unwrap_or_else(|| ctx.cfg.font_size()));
    let layout = ctx.text(
        &tx.text,
        at,
        size,
        tx.weight,
        tx.color.unwrap_or(Color::BLACK),
        tx.ha,
        tx.va,
        tx.rotation,
    );
    ctx.push(z, Role::Annotation, false, Drawable::Text(layout));
}

fn arrow_head(tip: Px, from: Px, length: f64) -> Vec<Px> {
    let (dx, dy) = (tip.0 - from.0, tip.1 - from.1);
    let norm = dx.hypot(dy);
    if norm == 0.0 {
        return Vec::new();
    }
    let (ux, uy) = (dx / norm, dy / norm);
    let half = length * 0.35;
    let base = (tip.0 - ux * length, tip.1 - uy * length);
    vec![
        tip,
        (base.0 - uy * half, base.1 + ux * half),
        (base.0 + uy * half, base.1 - ux * half),
    ]
}

fn layout_arrow(ctx: &mut Ctx<'_>, z: f64, a: &Arrow, t: &AxesTransform) {
    let stroke = Stroke {
        width: a.stroke.width.or(Some(ARROW_WIDTH_PT)),
        ..a.stroke
    };
    let Some(line) = ctx.stroke(&stroke, Color::BLACK) else {
        return;
    };
    let (p0, p1) = (t.data(a.from), t.data(a.to));
    if ![p0.0, p0.1, p1.0, p1.1].iter().all(|v| v.is_finite()) {
        return;
    }
    let head_len = ctx.pt(6.0) + 2.0 * line.width;
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let norm = dx.hypot(dy).max(f64::EPSILON);
    let trim = head_len.min(norm / 2.0) * 0.8;
    let (ux, uy) = (dx / norm * trim, dy / norm * trim);
    let (start_head, end_head) = match a.heads {
        ArrowHeads::End => (false, true),
        ArrowHeads::Start => (true, false),
        ArrowHeads::Both => (true, true),
    };
    let s = if start_head { (p0.0 + ux, p0.1 + uy) } else { p0 };
    let e = if end_head { (p1.0 - ux, p1.1 - uy) } else { p1 };
    let head_color = line.color;
    ctx.push(z, Role::Annotation, false, path(vec![vec![s, e]], false, Some(line), None));
    if end_head {
        let head = arrow_head(p1, p0, head_len);
        ctx.push(z, Role::Annotation, false, path(vec![head], true, None, Some(head_color)));
    }
    if start_head {
        let head = arrow_head(p0, p1, head_len);
        ctx.push(z, Role::Annotation, false, path(vec![head], true, None, Some(head_color)));
    }
}

/// Pixel extent of an item for the tight bounding box. Clipped items are cut to `frame`.
fn item_extent(item: &DrawItem, frame: &Bounds) -> Option<Bounds> {
    let raw = match &item.drawable {
        Drawable::Path(p) => {
            let half = p.stroke.as_ref().map(|s| s.width / 2.0).unwrap_or(0.0);
            Bounds::from_points(p.runs.iter().flatten().copied())?.inflate(half)
        }
        Drawable::Ellipse(e) => {
            let half = e.stroke.as_ref().map(|s| s.width / 2.0).unwrap_or(0.0);
            Bounds {
                min_x: e.cx - e.rx,
                min_y: e.cy - e.ry,
                max_x: e.cx + e.rx,
                max_y: e.cy + e.ry,
            }
            .inflate(half)
        }
        Drawable::Marker(m) => {
            let r = m.size / 2.0 + m.edge.as_ref().map(|s| s.width / 2.0).unwrap_or(0.0);
            Bounds {
                min_x: m.x,
                min_y: m.y,
                max_x: m.x,
                max_y: m.y,
            }
            .inflate(r)
        }
        Drawable::Text(t) => t.bbox,
    };
    if item.clip {
        raw.intersect(frame)
    } else {
        Some(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Bounds {
        Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 10.0,
            max_y: 10.0,
        }
    }

    #[test]
    fn autoscale_adds_five_percent_margins() {
        assert_eq!(autoscale(Some([0.0, 10.0])), [-0.5, 10.5]);
        assert_eq!(autoscale(None), [0.0, 1.0]);
        let [lo, hi] = autoscale(Some([0.0, 0.0]));
        assert!(lo < 0.0 && hi > 0.0);
    }

    #[test]
    fn clip_polyline_cuts_excursions() {
        let run = vec![(1.0, 1.0), (5.0, 1.0), (5.0, 1e12), (6.0, 1.0), (9.0, 1.0)];
        let out = clip_polyline(&run, &unit_box());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0][0], (1.0, 1.0));
        let (x, y) = out[0][out[0].len() - 1];
        assert!((x - 5.0).abs() < 1e-9 && (y - 10.0).abs() < 1e-9);
        assert_eq!(out[1].last(), Some(&(9.0, 1.0)));
        let slack = unit_box().inflate(1e-9);
        assert!(out.iter().flatten().all(|(x, y)| slack.contains(*x, *y)));
    }

    #[test]
    fn clip_polyline_splits_at_non_finite_vertices() {
        let run = vec![(1.0, 1.0), (2.0, 2.0), (f64::NAN, 1.0), (3.0, 3.0), (4.0, 4.0)];
        let out = clip_polyline(&run, &unit_box());
        assert_eq!(out, vec![vec![(1.0, 1.0), (2.0, 2.0)], vec![(3.0, 3.0), (4.0, 4.0)]]);
    }

    #[test]
    fn with_span_keeps_direction() {
        assert_eq!(with_span([0.0, 2.0], 4.0), [-1.0, 3.0]);
        assert_eq!(with_span([2.0, 0.0], 4.0), [3.0, -1.0]);
    }
}
