//! Pieces shared by several batches.

use quizfig_core::figure::XY;
use quizfig_core::prelude::*;

/// Black reference lines through the origin.
pub(crate) fn axis_lines(fig: &mut Figure) {
    fig.add(RefLine::at(0.0).color(Color::BLACK).width(1.0).horizontal());
    fig.add(RefLine::at(0.0).color(Color::BLACK).width(1.0).vertical());
}

/// Faint solid grid plus the origin lines (the algebra plots).
pub(crate) fn light_grid(fig: &mut Figure) {
    fig.axes.grid(LineStyle::Solid, 0.3);
    axis_lines(fig);
}

/// Dashed grid plus the origin lines, applied last to every calculus plot.
pub(crate) fn calculus_finish(fig: &mut Figure) {
    fig.axes.grid(LineStyle::Dashed, 0.7);
    axis_lines(fig);
}

/// A horizontal number line over `[lo, hi]` with a tick at every integer.
pub(crate) fn number_line(lo: i32, hi: i32) -> Figure {
    let mut fig = Figure::new(8.0, 2.0);
    fig.axes.xlim(f64::from(lo), f64::from(hi)).ylim(-1.0, 1.0);
    let spines = &mut fig.axes.spines;
    spines.left = false;
    spines.right = false;
    spines.top = false;
    spines.bottom_position = SpinePosition::Center;
    fig.axes.y_axis.visible = false;
    fig.axes.x_axis.ticks = Ticks::Fixed((lo..=hi).map(f64::from).collect());
    fig
}

/// Number line endpoint: filled when `closed`, white with a colored edge otherwise.
pub(crate) fn endpoint(x: f64, color: Color, closed: bool) -> Markers {
    let face = if closed { color } else { Color::WHITE };
    Markers::new(
        vec![(x, 0.0)],
        MarkerStyle::new(MarkerShape::Circle)
            .size(10.0)
            .face(face)
            .edge(color),
    )
}

/// A single `plot(x, y, fmt)` marker.
pub(crate) fn dot(x: f64, y: f64, fmt: &str) -> Result<Markers> {
    Markers::fmt(vec![(x, y)], fmt)
}

/// A removable discontinuity: white face, colored edge.
pub(crate) fn hole(x: f64, y: f64, edge: Color) -> Result<Markers> {
    Ok(dot(x, y, "wo")?.edge(edge))
}

pub(crate) fn segment(from: XY, to: XY, fmt: &str) -> Result<Polyline> {
    Polyline::fmt(vec![from, to], fmt)
}

/// Circular arc about the origin, `from`/`to` in radians.
pub(crate) fn arc(radius: f64, from: f64, to: f64, samples: usize) -> Result<Curve> {
    Curve::parametric(
        &format!("{radius} cos(t)"),
        &format!("{radius} sin(t)"),
        from,
        to,
        samples,
    )
}

pub(crate) fn circle(radius: f64) -> Result<Curve> {
    arc(radius, 0.0, std::f64::consts::TAU, 100)
}

/// Sample points of `f` over `linspace(start, stop, n)`, keeping only the `x` that pass `keep`.
pub(crate) fn sampled(
    start: f64,
    stop: f64,
    n: usize,
    keep: impl Fn(f64) -> bool,
    f: impl Fn(f64) -> f64,
) -> Vec<XY> {
    linspace(start, stop, n)
        .filter(|&x| keep(x))
        .map(|x| (x, f(x)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_line_ticks_every_integer() {
        let fig = number_line(-5, 10);
        assert_eq!(fig.axes.xlim, Some([-5.0, 10.0]));
        let Ticks::Fixed(ticks) = &fig.axes.x_axis.ticks else {
            panic!("expected fixed ticks");
        };
        assert_eq!(ticks.len(), 16);
        assert_eq!(ticks.first(), Some(&-5.0));
        assert_eq!(ticks.last(), Some(&10.0));
        assert!(!fig.axes.y_axis.visible);
    }

    #[test]
    fn sampled_drops_rejected_points() {
        let pts = sampled(0.0, 4.0, 5, |x| x != 2.0, |x| x * x);
        assert_eq!(pts, vec![(0.0, 0.0), (1.0, 1.0), (3.0, 9.0), (4.0, 16.0)]);
    }

    #[test]
    fn arc_endpoints_lie_on_the_radius() {
        let curve = arc(0.5, 0.0, std::f64::consts::FRAC_PI_2, 20).unwrap();
        let run = curve.curve.segments().remove(0);
        let (x0, y0) = run[0];
        let (x1, y1) = run[run.len() - 1];
        assert!((x0 - 0.5).abs() < 1e-12 && y0.abs() < 1e-12);
        assert!(x1.abs() < 1e-12 && (y1 - 0.5).abs() < 1e-12);
    }
}
