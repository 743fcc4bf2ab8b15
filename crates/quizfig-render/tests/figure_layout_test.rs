use quizfig_core::prelude::*;
use quizfig_render::model::{Drawable, FigureLayout, Role};
use quizfig_render::{LayoutOptions, layout_figure};

fn layout(fig: &Figure) -> FigureLayout {
    layout_figure(fig, &LayoutOptions::default()).expect("layout ok")
}

fn data_paths(layout: &FigureLayout) -> Vec<&quizfig_render::model::PathLayout> {
    layout
        .items_with_role(Role::Data)
        .filter_map(|i| match &i.drawable {
            Drawable::Path(p) => Some(p),
            _ => None,
        })
        .collect()
}

fn texts(layout: &FigureLayout) -> Vec<String> {
    layout.texts().map(|t| t.lines.join("\n")).collect()
}

#[test]
fn straight_line_passes_through_its_intercepts() {
    let mut fig = Figure::default();
    fig.add(Curve::explicit("2*x + 1", -1.0, 2.0, 50).expect("expr"));
    fig.axes.grid(LineStyle::Dashed, 0.5);
    let out = layout(&fig);

    let paths = data_paths(&out);
    assert_eq!(paths.len(), 1);
    for (px, py) in paths[0].runs.iter().flatten() {
        let x = out.x_scale.invert(*px);
        let y = out.y_scale.invert(*py);
        assert!((y - (2.0 * x + 1.0)).abs() < 1e-9, "({x}, {y}) off the line");
    }

    for (x, y) in [(0.0, 1.0), (1.0, 3.0)] {
        let (px, py) = (out.x_scale.map(x), out.y_scale.map(y));
        assert!(out.axes_box.contains(px, py));
        assert!((out.x_scale.invert(px) - x).abs() < 1e-9);
        assert!((out.y_scale.invert(py) - y).abs() < 1e-9);
    }

    assert!(out.items_with_role(Role::Grid).count() == 1);
    assert!(!out.x_ticks.is_empty() && !out.y_ticks.is_empty());
}

#[test]
fn autoscale_pads_data_by_five_percent() {
    let mut fig = Figure::default();
    fig.add(Markers::fmt(vec![(0.0, 0.0), (10.0, 20.0)], "ro").expect("fmt"));
    let out = layout(&fig);
    assert_eq!(out.x_scale.domain, [-0.5, 10.5]);
    assert_eq!(out.y_scale.domain, [-1.0, 21.0]);
}

#[test]
fn explicit_limits_bound_the_ticks() {
    let mut fig = Figure::default();
    fig.axes.xlim(-3.0, 3.0).ylim(-1.5, 1.5);
    fig.add(Curve::explicit("sin(x)", -3.0, 3.0, 200).expect("expr"));
    let out = layout(&fig);

    assert_eq!(out.x_scale.domain, [-3.0, 3.0]);
    assert_eq!(out.y_scale.domain, [-1.5, 1.5]);
    assert!(out.x_ticks.iter().all(|t| (-3.0..=3.0).contains(&t.value)));
    assert!(out.y_ticks.iter().all(|t| (-1.5..=1.5).contains(&t.value)));

    let labels: Vec<_> = out.x_ticks.iter().map(|t| t.label.as_str()).collect();
    assert!(labels.contains(&"0"));
    assert!(labels.iter().any(|l| l.starts_with('\u{2212}')));
}

#[test]
fn fixed_and_hidden_ticks() {
    let mut fig = Figure::default();
    fig.axes.xlim(0.0, 10.0).ylim(0.0, 10.0);
    fig.axes.x_axis.ticks = Ticks::Fixed(vec![0.0, 5.0, 10.0, 20.0]);
    fig.axes.y_axis.ticks = Ticks::Hidden;
    fig.add(Polyline::new(vec![(0.0, 0.0), (10.0, 10.0)]));
    let out = layout(&fig);

    let values: Vec<f64> = out.x_ticks.iter().map(|t| t.value).collect();
    assert_eq!(values, vec![0.0, 5.0, 10.0]);
    assert!(out.y_ticks.is_empty());
    assert_eq!(out.items_with_role(Role::TickLabel).count(), 3);
}

#[test]
fn equal_aspect_uses_one_scale_for_both_axes() {
    let mut fig = Figure::new(6.0, 4.0);
    fig.axes.equal();
    fig.add(Circle {
        center: (0.0, 0.0),
        radius: 1.0,
        stroke: Some(Stroke::solid(Color::BLUE)),
        fill: None,
        z: None,
    });
    let out = layout(&fig);

    let kx = out.x_scale.pixels_per_unit();
    let ky = out.y_scale.pixels_per_unit();
    assert!((kx - ky).abs() < 1e-9, "{kx} vs {ky}");

    let ellipse = out
        .items
        .iter()
        .find_map(|i| match &i.drawable {
            Drawable::Ellipse(e) => Some(e),
            _ => None,
        })
        .expect("circle drawn");
    assert!((ellipse.rx - ellipse.ry).abs() < 1e-9);
    assert!(ellipse.fill.is_none());
}

#[test]
fn equal_box_shrinks_the_frame() {
    let mut fig = Figure::new(8.0, 4.0);
    fig.axes.equal_box().xlim(0.0, 1.0).ylim(0.0, 1.0);
    fig.add(Polyline::new(vec![(0.0, 0.0), (1.0, 1.0)]));
    let out = layout(&fig);
    assert!((out.axes_box.width() - out.axes_box.height()).abs() < 1e-9);
    assert_eq!(out.x_scale.domain, [0.0, 1.0]);
}

#[test]
fn right_triangle_has_only_its_labels() {
    let mut fig = Figure::new(5.0, 4.0);
    fig.axes.off().equal();
    fig.add(Polygon::outline(
        vec![(0.0, 0.0), (4.0, 0.0), (4.0, 3.0)],
        Color::BLACK,
        2.0,
    ));
    fig.add(Polyline::new(vec![(3.7, 0.0), (3.7, 0.3), (4.0, 0.3)]).color(Color::BLACK));
    fig.add(Text::new(2.0, -0.3, "4").align(HAlign::Center, VAlign::Top));
    fig.add(Text::new(4.2, 1.5, "3").va(VAlign::Center));
    fig.add(Text::new(1.8, 1.8, "5").align(HAlign::Right, VAlign::Bottom));
    fig.add(Text::new(0.6, 0.1, "θ"));
    let out = layout(&fig);

    let mut labels = texts(&out);
    labels.sort();
    assert_eq!(labels, vec!["3", "4", "5", "θ"]);
    assert!(out.x_ticks.is_empty() && out.y_ticks.is_empty());
    assert_eq!(out.items_with_role(Role::Spine).count(), 0);

    // The right-angle marker sits inside the corner at (4, 0).
    let corner = (out.x_scale.map(4.0), out.y_scale.map(0.0));
    let marker = data_paths(&out)
        .into_iter()
        .find(|p| !p.closed)
        .expect("marker path");
    for (x, y) in marker.runs.iter().flatten() {
        assert!(*x <= corner.0 + 1e-9 && *y <= corner.1 + 1e-9);
    }
}

#[test]
fn text_alignment_sets_anchor_and_box() {
    let mut fig = Figure::default();
    fig.axes.off();
    fig.add(Text::new(0.5, 0.5, "centered").align(HAlign::Center, VAlign::Center).in_axes());
    let out = layout(&fig);
    let t = out.texts().next().expect("text");
    let (cx, cy) = (
        (out.axes_box.min_x + out.axes_box.max_x) / 2.0,
        (out.axes_box.min_y + out.axes_box.max_y) / 2.0,
    );
    assert!(((t.bbox.min_x + t.bbox.max_x) / 2.0 - cx).abs() < 1e-9);
    assert!(((t.bbox.min_y + t.bbox.max_y) / 2.0 - cy).abs() < 1e-9);
}

#[test]
fn rotated_text_grows_a_tall_box() {
    let mut fig = Figure::default();
    fig.axes.off();
    fig.add(Text::new(0.5, 0.5, "slope label").rotation(90.0).in_axes());
    let out = layout(&fig);
    let t = out.texts().next().expect("text");
    assert!(t.bbox.height() > t.bbox.width());
}

#[test]
fn pie_hides_axes_and_draws_one_wedge_per_size() {
    let mut fig = Figure::new(4.0, 4.0);
    fig.add(Pie::new(vec![1.0, 2.0, 3.0]));
    let out = layout(&fig);

    assert!(out.x_ticks.is_empty() && out.y_ticks.is_empty());
    let wedges = data_paths(&out);
    assert_eq!(wedges.len(), 3);
    assert!(wedges.iter().all(|w| w.closed && w.fill.is_some()));
    assert!((out.x_scale.pixels_per_unit() - out.y_scale.pixels_per_unit()).abs() < 1e-9);
}

#[test]
fn curves_near_asymptotes_stay_near_the_frame() {
    let mut fig = Figure::default();
    fig.axes.ylim(-5.0, 5.0);
    fig.add(
        Curve::explicit("tan(x)", -3.0, 3.0, 400)
            .expect("expr")
            .excluding(std::f64::consts::FRAC_PI_2, 0.01)
            .excluding(-std::f64::consts::FRAC_PI_2, 0.01),
    );
    let out = layout(&fig);

    let paths = data_paths(&out);
    let runs: Vec<_> = paths.iter().flat_map(|p| p.runs.iter()).collect();
    assert!(runs.len() >= 3, "branches are drawn separately");
    let frame = out.axes_box;
    let slack = frame.width().max(frame.height());
    for (x, y) in runs.iter().copied().flatten() {
        assert!(x.is_finite() && y.is_finite());
        assert!(*y > frame.min_y - slack && *y < frame.max_y + slack);
    }
}

#[test]
fn legend_avoids_the_data() {
    let mut fig = Figure::default();
    fig.add(
        Polyline::new(vec![(0.0, 10.0), (1.0, 9.0), (2.0, 8.0)])
            .label("falling"),
    );
    fig.add(
        Polyline::new(vec![(8.0, 10.0), (9.0, 9.5), (10.0, 9.0)])
            .label("flat"),
    );
    fig.show_legend();
    let out = layout(&fig);

    assert!(matches!(
        out.legend_location,
        Some(LegendLocation::LowerLeft | LegendLocation::LowerRight)
    ));
    let legend_texts: Vec<_> = out
        .items_with_role(Role::Legend)
        .filter_map(|i| match &i.drawable {
            Drawable::Text(t) => Some(t.lines[0].as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(legend_texts, vec!["falling", "flat"]);
}

#[test]
fn items_are_sorted_by_z_order() {
    let mut fig = Figure::default();
    fig.add(Text::new(0.5, 0.5, "over"));
    fig.add(Polygon {
        points: vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)],
        stroke: None,
        fill: Some(Color::GREEN),
        label: None,
        z: Some(0),
    });
    fig.add(Polyline::new(vec![(0.0, 0.0), (1.0, 1.0)]).z(10));
    let out = layout(&fig);

    let zs: Vec<f64> = out.items.iter().map(|i| i.z).collect();
    assert!(zs.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(out.items.last().map(|i| i.z), Some(10.0));
}

#[test]
fn tight_bbox_covers_every_label() {
    let mut fig = Figure::default().with_title("Area under the curve", 14.0);
    fig.add(Curve::explicit("x^2", 0.0, 2.0, 50).expect("expr"));
    let out = layout(&fig);

    for t in out.texts() {
        assert!(out.viewbox.min_x <= t.bbox.min_x && out.viewbox.max_x >= t.bbox.max_x);
        assert!(out.viewbox.min_y <= t.bbox.min_y && out.viewbox.max_y >= t.bbox.max_y);
    }
    assert!(out.width <= out.canvas.width() + 1.0);
    assert!(out.items_with_role(Role::Title).count() == 1);
}

#[test]
fn loose_bbox_keeps_the_canvas() {
    let mut config = quizfig_core::RenderConfig::default();
    config.set_value("tightBBox", serde_json::Value::Bool(false));
    let fig = Figure::new(3.0, 2.0);
    let out = layout_figure(&fig, &LayoutOptions::with_config(config)).expect("layout");
    assert_eq!((out.width, out.height), (300.0, 200.0));
}

#[test]
fn invalid_figures_are_rejected() {
    let fig = Figure::new(-1.0, 2.0);
    assert!(layout_figure(&fig, &LayoutOptions::default()).is_err());
}

#[test]
fn arcs_sweeping_past_a_full_turn_draw_one_turn() {
    let mut fig = Figure::default();
    fig.add(Arc::new((0.0, 0.0), 1.0, 0.0, 1e11));
    let out = layout(&fig);

    let paths = data_paths(&out);
    assert_eq!(paths.len(), 1);
    let points: usize = paths[0].runs.iter().map(Vec::len).sum();
    assert!(points > 0 && points <= 181, "{points} vertices");
}

#[test]
fn non_finite_arc_angles_are_rejected() {
    let mut fig = Figure::default();
    fig.add(Arc::new((0.0, 0.0), 1.0, f64::NAN, 90.0));
    assert!(layout_figure(&fig, &LayoutOptions::default()).is_err());
}
