//! Calculus periods II and III, quiz 281: limits, derivatives and their applications.

use crate::DiagramBuilder;
use crate::kit;
use quizfig_core::prelude::*;
use std::f64::consts::TAU;

pub(crate) const DIAGRAMS: &[(&str, DiagramBuilder)] = &[
    ("C21_P281_Q11_LimiteGrafico", limit_from_graph),
    ("C21_P281_Q12_PropiedadesLim", limit_properties),
    ("C21_P281_Q13_LimiteLateral", one_sided_limits),
    ("C21_P281_Q14_TecnicaLimite", removable_discontinuity),
    ("C21_P281_Q15_Asintota", vertical_asymptote),
    ("C21_P281_Q16_LimTrig", trig_limit),
    ("C21_P281_Q17_Continuidad", jump_discontinuity),
    ("C21_P281_Q18_ConceptoDerivada", tangent_line),
    ("C21_P281_Q19_DerivadaPotencia", power_rule),
    ("C21_P281_Q20_ReglaProducto", product_rule),
    ("C21_P281_Q21_ReglaCadena", chain_rule),
    ("C21_P281_Q22_DerivadaImplicita", implicit_circle),
    ("C21_P281_Q23_OrdenSuperior", higher_order),
    ("C21_P281_Q24_Crecimiento", increasing_interval),
    ("C21_P281_Q25_Concavidad", concavity),
    ("C21_P281_Q26_Criterio2da", second_derivative_test),
    ("C21_P281_Q27_MaximosMinimos", absolute_maximum),
    ("C21_P281_Q28_Optimizacion", optimization),
    ("C21_P281_Q29_RazonCambio", related_rates),
];

/// A single default-colored curve under a title.
fn titled_curve(expr: &str, start: f64, stop: f64, title: &str) -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0).titled(title);
    fig.add(Curve::explicit(expr, start, stop, 100)?);
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn limit_from_graph() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0).titled("f(x)");
    fig.add(Curve::explicit("x + 1", 0.0, 4.0, 100)?.fmt("b")?);
    fig.add(kit::hole(2.0, 3.0, Color::BLUE)?.size(8.0));
    fig.add(kit::dot(2.0, 1.0, "bo")?.size(8.0));
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn limit_properties() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(Curve::explicit("2x^2 - 5x + 1", 1.0, 4.0, 100)?);
    fig.add(kit::dot(3.0, 4.0, "ro")?);
    fig.add(Text::new(3.1, 4.0, "(3, 4)"));
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn one_sided_limits() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(
        Curve::explicit("x + 1", -1.0, 1.0, 50)?
            .fmt("b")?
            .label("x+1 (x<1)"),
    );
    fig.add(
        Curve::explicit("x^2", 1.0, 3.0, 50)?
            .fmt("g")?
            .label("x^2 (x>=1)"),
    );
    fig.add(kit::hole(1.0, 2.0, Color::BLUE)?);
    fig.add(kit::dot(1.0, 1.0, "go")?);
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn removable_discontinuity() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0).titled("f(x) = (x^2-4)/(x-2)");
    fig.add(Curve::explicit("x + 2", 0.0, 4.0, 100)?);
    fig.add(kit::hole(2.0, 4.0, Color::BLUE)?);
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn vertical_asymptote() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(Curve::explicit("1/(x - 3)", 0.0, 6.0, 200)?.excluding(3.0, 0.1));
    fig.add(
        RefLine::at(3.0)
            .color(Color::RED)
            .line_style(LineStyle::Dashed)
            .label("x=3")
            .vertical(),
    );
    fig.axes.ylim(-10.0, 10.0);
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn trig_limit() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0).titled("y = sin(5x)/x");
    fig.add(Curve::explicit("sin(5x)/x", -1.0, 1.0, 200)?);
    fig.add(kit::hole(0.0, 5.0, Color::BLUE)?);
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn jump_discontinuity() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(Curve::explicit("x", -1.0, 1.0, 50)?.fmt("b")?);
    fig.add(Curve::explicit("x + 1", 1.0, 3.0, 50)?.fmt("b")?);
    fig.add(kit::dot(1.0, 1.0, "bo")?);
    fig.add(kit::hole(1.0, 2.0, Color::BLUE)?);
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn tangent_line() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(Curve::explicit("x^2", 0.0, 4.0, 100)?.label("f(x)"));
    // Tangent at (2, 4) with slope 4.
    fig.add(
        Curve::explicit("4x - 4", 1.0, 3.0, 100)?
            .fmt("r--")?
            .label("Tangente"),
    );
    fig.add(kit::dot(2.0, 4.0, "ko")?);
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn power_rule() -> Result<Figure> {
    titled_curve("3x^4 - 2x^2 + 5", -1.5, 1.5, "f(x) = 3x^4 - 2x^2 + 5")
}

fn product_rule() -> Result<Figure> {
    titled_curve("x exp(x)", -2.0, 1.0, "f(x) = x e^x")
}

fn chain_rule() -> Result<Figure> {
    titled_curve("(2x + 1)^3", -2.0, 1.0, "f(x) = (2x+1)^3")
}

fn implicit_circle() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0).titled("x^2 + y^2 = 25");
    fig.add(kit::circle(5.0)?);
    fig.axes.equal();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn higher_order() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(Curve::explicit("sin(x)", 0.0, TAU, 100)?.label("sin(x)"));
    fig.add(
        Curve::explicit("-sin(x)", 0.0, TAU, 100)?
            .fmt("--")?
            .label("-sin(x) (f'')"),
    );
    fig.show_legend();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn increasing_interval() -> Result<Figure> {
    // f'(x) = 3x(2 - x) is positive on (0, 2).
    let mut fig = Figure::new(6.0, 6.0).titled("Intervalo Creciente");
    fig.add(Curve::explicit("-x^3 + 3x^2", -1.0, 3.0, 100)?);
    for x in [0.0, 2.0] {
        fig.add(
            RefLine::at(x)
                .color(Color::GREEN)
                .line_style(LineStyle::Dashed)
                .vertical(),
        );
    }
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn concavity() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(Curve::explicit("x^3", -2.0, 2.0, 100)?);
    fig.add(Text::new(1.0, 1.0, "Cóncava Arriba"));
    fig.add(Text::new(-1.0, -1.0, "Cóncava Abajo"));
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn second_derivative_test() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0).titled("f'(c)=0, f''(c)>0 => Minimo");
    fig.add(Curve::explicit("x^2", -2.0, 2.0, 100)?);
    fig.add(kit::dot(0.0, 0.0, "ro")?);
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn absolute_maximum() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(Curve::explicit("-0.5(x - 1.5)^2 + 3", -1.0, 4.0, 100)?);
    fig.add(kit::dot(1.5, 3.0, "ro")?);
    fig.add(Text::new(1.6, 3.0, "Max Absoluto"));
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn optimization() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0);
    fig.add(Polyline::fmt(
        vec![(0.0, 0.0), (5.0, 0.0), (5.0, 5.0), (0.0, 5.0), (0.0, 0.0)],
        "b",
    )?);
    fig.add(Text::new(2.0, 2.5, "Area Maxima\nCuadrado 5x5"));
    fig.axes.xlim(-1.0, 6.0).ylim(-1.0, 6.0);
    kit::calculus_finish(&mut fig);
    Ok(fig)
}

fn related_rates() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 6.0).titled("dr/dt = 1 => dA/dt = ?");
    for r in [1.0, 3.0, 5.0] {
        fig.add(kit::circle(r)?.fmt("b--")?);
    }
    fig.axes.equal();
    kit::calculus_finish(&mut fig);
    Ok(fig)
}
