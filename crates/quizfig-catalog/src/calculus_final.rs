//! Calculus final review, quiz 281. Saved next to the algebra and trigonometry figures.

use crate::DiagramBuilder;
use crate::kit;
use quizfig_core::prelude::*;

pub(crate) const DIAGRAMS: &[(&str, DiagramBuilder)] = &[
    ("C21_P281_Q1_Inecuacion", absolute_inequality),
    ("C21_P281_Q3_Parabola", parabola),
    ("C21_P281_Q5_Trozos", piecewise),
    ("C21_P281_Q6_Inyectiva", injective),
    ("C21_P281_Q9_Limite", limit),
    ("C21_P281_Q10_LimLateral", one_sided_limits),
    ("C21_P281_Q12_Asintota", horizontal_asymptote),
    ("C21_P281_Q15_DerivadaConcepto", derivative_as_slope),
    ("C21_P281_Q20_PuntosCriticos", critical_points),
    ("C21_P281_Q22_Caja", open_box),
];

fn absolute_inequality() -> Result<Figure> {
    let mut fig = kit::number_line(-5, 10).titled("|x - 2| < 3");
    fig.add(
        Polyline::new(vec![(-1.0, 0.0), (5.0, 0.0)])
            .color(Color::BLUE)
            .width(3.0),
    );
    fig.add(kit::endpoint(-1.0, Color::BLUE, false));
    fig.add(kit::endpoint(5.0, Color::BLUE, false));
    Ok(fig)
}

fn parabola() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(Curve::explicit("x^2 - 4x + 3", 0.0, 4.0, 100)?.label("y = x^2 - 4x + 3"));
    fig.add(kit::dot(2.0, -1.0, "ro")?);
    fig.add(Text::new(2.1, -1.0, "V(2, -1)"));
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn piecewise() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(
        Curve::explicit("x + 1", -2.0, 0.0, 50)?
            .fmt("b")?
            .label("x+1 (x<0)"),
    );
    fig.add(kit::hole(0.0, 1.0, Color::BLUE)?);
    fig.add(
        Curve::explicit("x^2", 0.0, 2.0, 50)?
            .fmt("g")?
            .label("x^2 (x>=0)"),
    );
    fig.add(kit::dot(0.0, 0.0, "go")?);
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn injective() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0).titled("Función Inyectiva");
    fig.add(Curve::explicit("x^3", -2.0, 2.0, 100)?.label("f(x) = x^3"));
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn limit() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0).titled("f(x) = (x^2-4)/(x-2)");
    fig.add(Curve::explicit("x + 2", 0.0, 4.0, 100)?);
    fig.add(kit::hole(2.0, 4.0, Color::BLUE)?);
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn one_sided_limits() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(
        Curve::explicit("3x - 1", -1.0, 1.0, 50)?
            .fmt("b")?
            .label("3x-1 (x<=1)"),
    );
    fig.add(kit::dot(1.0, 2.0, "bo")?);
    fig.add(
        Curve::explicit("x + 4", 1.0, 3.0, 50)?
            .fmt("g")?
            .label("x+4 (x>1)"),
    );
    fig.add(kit::hole(1.0, 5.0, Color::GREEN)?);
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn horizontal_asymptote() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(Curve::explicit("(3x^2 - 2x)/(2x^2 + 1)", -5.0, 5.0, 200)?);
    fig.add(
        RefLine::at(1.5)
            .color(Color::RED)
            .line_style(LineStyle::Dashed)
            .label("y = 3/2")
            .horizontal(),
    );
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn derivative_as_slope() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0).titled("Derivada = Pendiente Tangente");
    fig.add(Curve::explicit("x^2", 0.0, 4.0, 100)?.label("f(x)"));
    fig.add(
        Curve::explicit("4x - 4", 1.0, 3.0, 100)?
            .fmt("r--")?
            .label("Tangente"),
    );
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn critical_points() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0).titled("f(x) = x^3 - 3x");
    fig.add(Curve::explicit("x^3 - 3x", -2.0, 2.0, 100)?);
    fig.add(Markers::fmt(vec![(-1.0, 2.0), (1.0, -2.0)], "ro")?);
    fig.add(Text::new(-1.2, 2.2, "Max (-1, 2)"));
    fig.add(Text::new(0.8, -2.5, "Min (1, -2)"));
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

/// A 10x10 sheet with its four corner squares marked for cutting.
fn open_box() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0).titled("Caja: V(x) = x(30-2x)^2");
    fig.add(Polyline::fmt(
        vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
        "k",
    )?);
    for (x0, y0) in [(0.0, 0.0), (9.0, 0.0), (9.0, 9.0), (0.0, 9.0)] {
        let (x1, y1) = (x0 + 1.0, y0 + 1.0);
        fig.add(Polyline::fmt(
            vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)],
            "r--",
        )?);
    }
    fig.add(Text::new(0.2, 0.2, "x"));
    fig.add(Text::new(5.0, -1.0, "30 cm"));
    fig.axes.off();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}
