//! Trigonometry and conics, quiz 280.

use crate::DiagramBuilder;
use crate::kit;
use quizfig_core::prelude::*;

pub(crate) const DIAGRAMS: &[(&str, DiagramBuilder)] = &[
    ("C21_P280_Q1_Right_Triangle", right_triangle),
    ("C21_P280_Q5_Angle_Elevation", angle_of_elevation),
    ("C21_P280_Q8_Unit_Circle", unit_circle),
    ("C21_P280_Q25_Sine_Law", oblique_triangle),
    ("C21_P280_Q30_Parabola", parabola),
    ("C21_P280_Q32_Ellipse", ellipse),
];

/// 6x4 in, equal units, optionally with a dashed grid.
fn canvas(grid: bool) -> Figure {
    let mut fig = Figure::new(6.0, 4.0);
    if grid {
        fig.axes.grid(LineStyle::Dashed, 0.6);
    }
    fig.axes.equal();
    fig
}

fn right_triangle() -> Result<Figure> {
    let mut fig = canvas(false);
    fig.add(
        Polyline::fmt(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 0.0)], "b-")?.width(2.0),
    );
    // Right-angle marker in the corner at (4, 0).
    fig.add(Polyline::fmt(vec![(3.6, 0.0), (3.6, 0.4), (4.0, 0.4)], "k-")?.width(1.0));

    fig.add(Text::new(2.0, -0.3, "4").ha(HAlign::Center));
    fig.add(Text::new(4.1, 1.5, "3").va(VAlign::Center));
    fig.add(Text::new(1.8, 1.6, "5").align(HAlign::Center, VAlign::Center));
    fig.add(Text::new(0.5, 0.2, "θ").size(12.0));
    fig.axes.off();
    Ok(fig)
}

fn angle_of_elevation() -> Result<Figure> {
    let mut fig = canvas(false);
    fig.add(kit::segment((0.0, 0.0), (10.0, 0.0), "k-")?.width(2.0));
    fig.add(kit::segment((8.0, 0.0), (8.0, 6.0), "k-")?.width(3.0));
    fig.add(kit::segment((0.0, 0.0), (8.0, 6.0), "b--")?.width(1.5));
    fig.add(kit::segment((0.0, 0.0), (5.0, 0.0), "k:")?.width(1.0));
    fig.add(kit::arc(2.0, 0.0, 36.87f64.to_radians(), 20)?.fmt("r-")?);

    fig.add(Text::new(2.5, 0.5, "30°").size(10.0));
    fig.add(Text::new(8.2, 3.0, "h = ?").size(10.0));
    fig.add(Text::new(4.0, -0.5, "50 m").ha(HAlign::Center));
    fig.axes.off();
    Ok(fig)
}

fn unit_circle() -> Result<Figure> {
    let mut fig = canvas(true);
    fig.add(kit::circle(1.0)?.fmt("k-")?.alpha(0.5));
    kit::axis_lines(&mut fig);

    let (s, c) = 30f64.to_radians().sin_cos();
    fig.add(kit::segment((0.0, 0.0), (c, s), "r-")?.width(2.0));
    fig.add(kit::segment((c, 0.0), (c, s), "b--")?.width(1.0));
    fig.add(Text::new(0.2, 0.05, "30°"));
    fig.add(Text::new(0.9, 0.25, "P(x,y)"));
    fig.axes.xlim(-1.2, 1.2).ylim(-1.2, 1.2);
    Ok(fig)
}

fn oblique_triangle() -> Result<Figure> {
    let mut fig = canvas(false);
    fig.add(
        Polyline::fmt(vec![(0.0, 0.0), (5.0, 0.0), (3.0, 4.0), (0.0, 0.0)], "g-")?.width(2.0),
    );
    for (x, y, label) in [
        (-0.3, -0.3, "A"),
        (5.1, -0.3, "B"),
        (3.0, 4.2, "C"),
        (2.5, -0.3, "c = 10"),
        (1.2, 2.2, "b = ?"),
        (4.2, 2.2, "a = 8"),
        (0.5, 0.2, "45°"),
        (4.3, 0.2, "60°"),
    ] {
        fig.add(Text::new(x, y, label));
    }
    fig.axes.off();
    Ok(fig)
}

fn parabola() -> Result<Figure> {
    let mut fig = canvas(true);
    fig.add(Curve::explicit("0.5x^2", -4.0, 4.0, 100)?.fmt("b-")?.width(2.0));
    fig.add(kit::dot(0.0, 0.5, "ro")?);
    fig.add(
        RefLine::at(-0.5)
            .color(Color::GREEN)
            .line_style(LineStyle::Dashed)
            .horizontal(),
    );
    fig.add(Text::new(0.2, 0.6, "Foco"));
    fig.add(Text::new(2.0, -0.8, "Directriz"));
    fig.axes.xlim(-5.0, 5.0).ylim(-2.0, 8.0);
    Ok(fig)
}

fn ellipse() -> Result<Figure> {
    let mut fig = canvas(true);
    fig.add(
        Curve::parametric("4cos(t)", "2sin(t)", 0.0, std::f64::consts::TAU, 100)?
            .fmt("m-")?
            .width(2.0),
    );
    // c = sqrt(16 - 4)
    fig.add(Markers::fmt(vec![(-3.46, 0.0), (3.46, 0.0)], "ro")?);
    fig.add(Text::new(-3.5, 0.3, "F1"));
    fig.add(Text::new(3.5, 0.3, "F2"));
    fig.axes.xlim(-5.0, 5.0).ylim(-3.0, 3.0);
    Ok(fig)
}
