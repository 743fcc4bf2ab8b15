use crate::model::{
    DrawItem, Drawable, MarkerLayout, PathLayout, Px, Role, StrokeLayout, TextAnchor, TextLayout,
};
use crate::text::{TextMeasurer, TextStyle};
use quizfig_core::Color;
use quizfig_core::figure::LegendLocation;
use quizfig_core::geom::Bounds;
use quizfig_core::style::FontWeight;

pub(crate) const Z_LEGEND: f64 = 5.0;

const FRAME_FACE: Color = Color::rgba(255, 255, 255, 204);
const FRAME_EDGE: Color = Color::rgb(204, 204, 204);

#[derive(Debug, Clone)]
pub(crate) enum Handle {
    Line {
        stroke: Option<StrokeLayout>,
        marker: Option<MarkerLayout>,
    },
    Patch {
        fill: Option<Color>,
        stroke: Option<StrokeLayout>,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct LegendEntry {
    pub label: String,
    pub handle: Handle,
}

pub(crate) struct LegendParams<'a> {
    pub measurer: &'a dyn TextMeasurer,
    pub font_family: &'a str,
    /// Pixels.
    pub font_size: f64,
    pub px_per_pt: f64,
}

const CORNERS: [LegendLocation; 4] = [
    LegendLocation::UpperRight,
    LegendLocation::UpperLeft,
    LegendLocation::LowerLeft,
    LegendLocation::LowerRight,
];

fn place(loc: LegendLocation, frame: &Bounds, w: f64, h: f64, gap: f64) -> Bounds {
    let left = frame.min_x + gap;
    let right = frame.max_x - gap - w;
    let top = frame.min_y + gap;
    let bottom = frame.max_y - gap - h;
    let (x, y) = match loc {
        LegendLocation::UpperRight | LegendLocation::Best => (right, top),
        LegendLocation::UpperLeft => (left, top),
        LegendLocation::LowerLeft => (left, bottom),
        LegendLocation::LowerRight => (right, bottom),
    };
    Bounds {
        min_x: x,
        min_y: y,
        max_x: x + w,
        max_y: y + h,
    }
}

/// The corner whose box covers the fewest points; earlier corners win ties.
pub(crate) fn best_corner(frame: &Bounds, w: f64, h: f64, gap: f64, points: &[Px]) -> LegendLocation {
    let mut best = (usize::MAX, LegendLocation::UpperRight);
    for loc in CORNERS {
        let b = place(loc, frame, w, h, gap);
        let hits = points.iter().filter(|(x, y)| b.contains(*x, *y)).count();
        if hits < best.0 {
            best = (hits, loc);
        }
    }
    best.1
}

pub(crate) fn layout_legend(
    entries: &[LegendEntry],
    location: LegendLocation,
    frame: &Bounds,
    data_points: &[Px],
    params: &LegendParams<'_>,
) -> Option<(Vec<DrawItem>, LegendLocation)> {
    if entries.is_empty() {
        return None;
    }
    let fs = params.font_size;
    let pad = 0.4 * fs;
    let handle_len = 2.0 * fs;
    let handle_pad = 0.8 * fs;
    let spacing = 0.5 * fs;
    let gap = 0.5 * fs;

    let style = TextStyle {
        font_family: Some(params.font_family.to_string()),
        font_size: fs,
        font_weight: FontWeight::Normal,
    };
    let metrics: Vec<_> = entries
        .iter()
        .map(|e| params.measurer.measure(&e.label, &style))
        .collect();
    let text_w = metrics.iter().map(|m| m.width).fold(0.0, f64::max);
    let rows_h: f64 = metrics.iter().map(|m| m.height).sum();
    let w = 2.0 * pad + handle_len + handle_pad + text_w;
    let h = 2.0 * pad + rows_h + spacing * (entries.len() - 1) as f64;

    let resolved = match location {
        LegendLocation::Best => best_corner(frame, w, h, gap, data_points),
        other => other,
    };
    tracing::debug!(?resolved, entries = entries.len(), "legend placed");
    let b = place(resolved, frame, w, h, gap);

    let item = |drawable| DrawItem {
        z: Z_LEGEND,
        role: Role::Legend,
        clip: false,
        drawable,
    };
    let mut items = vec![item(Drawable::Path(PathLayout {
        runs: vec![vec![
            (b.min_x, b.min_y),
            (b.max_x, b.min_y),
            (b.max_x, b.max_y),
            (b.min_x, b.max_y),
        ]],
        closed: true,
        stroke: Some(StrokeLayout {
            color: FRAME_EDGE,
            width: 0.8 * params.px_per_pt,
            dash: None,
        }),
        fill: Some(FRAME_FACE),
    }))];

    let hx0 = b.min_x + pad;
    let hx1 = hx0 + handle_len;
    let mut row_top = b.min_y + pad;
    for (entry, m) in entries.iter().zip(&metrics) {
        let cy = row_top + m.height / 2.0;
        match &entry.handle {
            Handle::Line { stroke, marker } => {
                if let Some(stroke) = stroke {
                    items.push(item(Drawable::Path(PathLayout {
                        runs: vec![vec![(hx0, cy), (hx1, cy)]],
                        closed: false,
                        stroke: Some(stroke.clone()),
                        fill: None,
                    })));
                }
                if let Some(marker) = marker {
                    items.push(item(Drawable::Marker(MarkerLayout {
                        x: (hx0 + hx1) / 2.0,
                        y: cy,
                        ..marker.clone()
                    })));
                }
            }
            Handle::Patch { fill, stroke } => {
                let half = 0.35 * fs;
                items.push(item(Drawable::Path(PathLayout {
                    runs: vec![vec![
                        (hx0, cy - half),
                        (hx1, cy - half),
                        (hx1, cy + half),
                        (hx0, cy + half),
                    ]],
                    closed: true,
                    stroke: stroke.clone(),
                    fill: *fill,
                })));
            }
        }

        let tx = hx1 + handle_pad;
        let baseline = row_top + crate::text::ASCENT * fs;
        items.push(item(Drawable::Text(TextLayout {
            x: tx,
            y: baseline,
            lines: vec![entry.label.clone()],
            line_height: m.line_height,
            font_size: fs,
            font_family: params.font_family.to_string(),
            weight: FontWeight::Normal,
            anchor: TextAnchor::Start,
            color: Color::BLACK,
            rotation: 0.0,
            pivot: (tx, baseline),
            bbox: Bounds {
                min_x: tx,
                min_y: row_top,
                max_x: tx + m.width,
                max_y: row_top + m.height,
            },
        })));
        row_top += m.height + spacing;
    }

    Some((items, resolved))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_corner_avoids_data() {
        let frame = Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 100.0,
            max_y: 100.0,
        };
        // Points crowd the upper-right and upper-left corners.
        let pts = vec![(90.0, 5.0), (95.0, 8.0), (5.0, 5.0)];
        assert_eq!(
            best_corner(&frame, 20.0, 20.0, 1.0, &pts),
            LegendLocation::LowerLeft
        );
        assert_eq!(
            best_corner(&frame, 20.0, 20.0, 1.0, &[]),
            LegendLocation::UpperRight
        );
    }
}
