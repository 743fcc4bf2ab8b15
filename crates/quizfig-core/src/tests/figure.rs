use crate::figure::*;
use crate::style::{LineStyle, MarkerShape};
use crate::*;

#[test]
fn figure_builders_collect_elements() {
    let mut fig = Figure::new(5.0, 5.0).with_title("Pendiente", 14.0);
    fig.add(
        Curve::explicit("2x + 1", -2.0, 2.0, 100)
            .unwrap()
            .fmt("b-")
            .unwrap()
            .width(2.0)
            .label("y = 2x + 1"),
    )
    .add(Polyline::fmt(vec![(0.0, 1.0), (1.0, 1.0), (1.0, 3.0)], "r--").unwrap())
    .add(Text::new(0.5, 0.8, "1"));
    fig.axes.grid(LineStyle::Dashed, 0.3);

    assert_eq!(fig.elements.len(), 3);
    assert_eq!(fig.elements[0].label(), Some("y = 2x + 1"));
    assert_eq!(fig.title.as_ref().unwrap().font_size, Some(14.0));
    assert!(fig.validate().is_ok());
}

#[test]
fn figure_default_z_orders() {
    let poly: Element =
        Polygon::outline(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)], Color::BLACK, 1.0).into();
    let line: Element = Polyline::new(vec![(0.0, 0.0)]).into();
    let text: Element = Text::new(0.0, 0.0, "a").into();
    assert_eq!(poly.z_order(), 1);
    assert_eq!(line.z_order(), 2);
    assert_eq!(text.z_order(), 3);

    let raised: Element = Markers::fmt(vec![(1.0, 1.0)], "ro").unwrap().z(5).into();
    assert_eq!(raised.z_order(), 5);
}

#[test]
fn markers_fmt_colors_face_and_edge() {
    let m = Markers::fmt(vec![(0.0, 0.0)], "wo").unwrap().edge(Color::RED);
    assert_eq!(m.marker.shape, MarkerShape::Circle);
    assert_eq!(m.marker.face, Some(Color::WHITE));
    assert_eq!(m.marker.edge, Some(Color::RED));
}

#[test]
fn figure_validation_rejects_bad_geometry() {
    assert!(Figure::new(0.0, 4.0).validate().is_err());

    let mut fig = Figure::new(4.0, 4.0);
    fig.axes.xlim(1.0, 1.0);
    assert!(fig.validate().is_err());

    let mut fig = Figure::new(4.0, 4.0);
    fig.add(Pie::new(vec![0.0, 0.0]));
    assert!(fig.validate().is_err());

    let mut fig = Figure::new(4.0, 4.0);
    fig.add(Polygon::outline(vec![(0.0, 0.0), (1.0, 1.0)], Color::BLACK, 1.0));
    assert!(fig.validate().is_err());
}

#[test]
fn element_json_is_tagged_by_kind() {
    let el: Element = RefLine::at(0.0).color(Color::BLACK).width(0.8).horizontal();
    let v = serde_json::to_value(&el).unwrap();
    assert_eq!(v["kind"], "hline");
    assert_eq!(v["value"], 0.0);
    let back: Element = serde_json::from_value(v).unwrap();
    assert_eq!(back, el);
}

#[test]
fn curve_element_reads_flattened_function_fields() {
    let el: Element = serde_json::from_value(serde_json::json!({
        "kind": "curve",
        "y": "x^2 - 4x + 3",
        "domain": [-1.0, 5.0],
        "stroke": { "color": "green", "width": 2.0 },
        "label": "parabola"
    }))
    .unwrap();
    let Element::Curve(c) = el else {
        panic!("expected a curve");
    };
    assert_eq!(c.curve.samples, 100);
    assert_eq!(c.curve.function.at(2.0), (2.0, -1.0));
    assert_eq!(c.stroke.color, Some(Color::GREEN));

    let el: Element = serde_json::from_value(serde_json::json!({
        "kind": "curve",
        "x": "cos(t)",
        "y": "sin(t)",
        "domain": [0.0, 6.283185307179586],
        "samples": 200
    }))
    .unwrap();
    let Element::Curve(c) = el else {
        panic!("expected a curve");
    };
    assert!(matches!(c.curve.function, CurveFn::Parametric { .. }));
}

#[test]
fn figure_validation_rejects_non_finite_angles() {
    let mut fig = Figure::new(4.0, 4.0);
    fig.add(Arc::new((0.0, 0.0), 1.0, 0.0, f64::NAN));
    assert!(matches!(fig.validate(), Err(Error::InvalidFigure { .. })));

    let mut fig = Figure::new(4.0, 4.0);
    fig.add(Arc::new((0.0, 0.0), 1.0, f64::NEG_INFINITY, 90.0));
    assert!(fig.validate().is_err());

    let mut fig = Figure::new(4.0, 4.0);
    fig.add(Pie {
        start_angle: f64::NAN,
        ..Pie::new(vec![1.0, 1.0])
    });
    assert!(fig.validate().is_err());

    // Huge but finite sweeps are valid; layout draws them as one turn.
    let mut fig = Figure::new(4.0, 4.0);
    fig.add(Arc::new((0.0, 0.0), 1.0, 0.0, 1e11));
    assert!(fig.validate().is_ok());

    let mut fig = Figure::new(4.0, 4.0);
    fig.add(Curve::explicit("x", 0.0, 1.0, usize::MAX).unwrap());
    assert!(fig.validate().is_err());
}
