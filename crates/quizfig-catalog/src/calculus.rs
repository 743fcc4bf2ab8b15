//! Calculus period I, quiz 281: number lines and elementary functions.

use crate::DiagramBuilder;
use crate::kit;
use quizfig_core::prelude::*;

pub(crate) const DIAGRAMS: &[(&str, DiagramBuilder)] = &[
    ("C21_P281_Q1_Inecuacion", inequality),
    ("C21_P281_Q2_ValorAbsoluto", absolute_value),
    ("C21_P281_Q3_Recta", linear),
    ("C21_P281_Q4_Parabola", quadratic),
    ("C21_P281_Q5_Racional", rational),
    ("C21_P281_Q6_Logaritmo", logarithm),
    ("C21_P281_Q7_Trozos", piecewise),
    ("C21_P281_Q8_Inyectiva", horizontal_line_test),
    ("C21_P281_Q9_Operaciones", operations),
    ("C21_P281_Q10_Composicion", composition),
];

/// `scatter(..., color='red', zorder=5)`.
fn highlighted(points: Vec<(f64, f64)>) -> Result<Markers> {
    Ok(Markers::fmt(points, "ro")?.z(5))
}

fn inequality() -> Result<Figure> {
    let mut fig = kit::number_line(-10, 10).titled("x <= -5");
    fig.add(
        Polyline::new(vec![(-10.0, 0.0), (-5.0, 0.0)])
            .color(Color::BLUE)
            .width(3.0),
    );
    fig.add(kit::endpoint(-5.0, Color::BLUE, true));
    Ok(fig)
}

fn absolute_value() -> Result<Figure> {
    let mut fig = kit::number_line(-5, 10).titled("-1 < x < 5");
    fig.add(
        Polyline::new(vec![(-1.0, 0.0), (5.0, 0.0)])
            .color(Color::BLUE)
            .width(3.0),
    );
    fig.add(kit::endpoint(-1.0, Color::BLUE, false));
    fig.add(kit::endpoint(5.0, Color::BLUE, false));
    Ok(fig)
}

fn linear() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(Curve::explicit("2x", -2.0, 5.0, 100)?.label("y = 2x"));
    fig.add(highlighted(vec![(1.0, 2.0), (3.0, 6.0)])?);
    fig.add(Text::new(1.2, 2.0, "(1, 2)"));
    fig.add(Text::new(3.2, 6.0, "(3, 6)"));
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn quadratic() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(Curve::explicit("x^2 - 6x + 5", 0.0, 6.0, 100)?.label("y = x^2 - 6x + 5"));
    fig.add(highlighted(vec![(3.0, -4.0)])?);
    fig.add(Text::new(3.2, -4.0, "V(3, -4)"));
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn rational() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    // Scattered samples of (x + 1) / (x^2 - 4), skipping the poles at x = ±2.
    let points = kit::sampled(
        -5.0,
        5.0,
        200,
        |x| (x - 2.0).abs() > 0.1 && (x + 2.0).abs() > 0.1,
        |x| (x + 1.0) / (x * x - 4.0),
    );
    fig.add(Markers::new(
        points,
        MarkerStyle::new(MarkerShape::Circle).size(1.0),
    ));
    for pole in [2.0, -2.0] {
        fig.add(
            RefLine::at(pole)
                .color(Color::RED)
                .line_style(LineStyle::Dashed)
                .label(format!("x={pole}"))
                .vertical(),
        );
    }
    fig.axes.ylim(-5.0, 5.0);
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn logarithm() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(Curve::explicit("log2(x)", 0.1, 10.0, 100)?.label("y = log2(x)"));
    fig.add(highlighted(vec![(2.0, 1.0), (4.0, 2.0), (8.0, 3.0)])?);
    fig.add(Text::new(2.2, 1.0, "(2, 1)"));
    fig.add(Text::new(4.2, 2.0, "(4, 2)"));
    fig.add(Text::new(8.2, 3.0, "(8, 3)"));
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn piecewise() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    let left = kit::sampled(-2.0, 1.0, 50, |x| x < 1.0, |x| 2.0 * x);
    fig.add(Polyline::fmt(left, "b")?.label("2x (x < 1)"));
    fig.add(
        Curve::explicit("3", 1.0, 4.0, 50)?
            .fmt("g")?
            .label("3 (x >= 1)"),
    );
    fig.add(kit::dot(1.0, 2.0, "bo")?.face(Color::TRANSPARENT));
    fig.add(kit::dot(1.0, 3.0, "go")?);
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn horizontal_line_test() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0).titled("Prueba de la Recta Horizontal");
    fig.add(Curve::explicit("x^2", -2.0, 2.0, 100)?.label("y = x^2"));
    fig.add(
        RefLine::at(2.0)
            .color(Color::RED)
            .line_style(LineStyle::Dashed)
            .label("y=2")
            .horizontal(),
    );
    fig.add(Markers::fmt(vec![(-1.414, 2.0), (1.414, 2.0)], "ro")?);
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn operations() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(Curve::explicit("3x^2 + 2", -2.0, 2.0, 100)?.label("f(x) = 3x^2 + 2"));
    fig.add(Curve::explicit("2x - 1", -2.0, 2.0, 100)?.label("g(x) = 2x - 1"));
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn composition() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(Curve::explicit("sqrt(x + 1)", -1.0, 5.0, 100)?.label("y = sqrt(x+1)"));
    fig.add(kit::dot(-1.0, 0.0, "ro")?);
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}
