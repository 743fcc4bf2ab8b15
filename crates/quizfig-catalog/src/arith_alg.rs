//! Arithmetic (quiz 278) and algebra (quiz 279).

use crate::DiagramBuilder;
use crate::kit;
use quizfig_core::prelude::*;

pub(crate) const DIAGRAMS: &[(&str, DiagramBuilder)] = &[
    ("C21_P278_Q3732", fraction_three_quarters),
    ("C21_P278_Q3735", discount_tag),
    ("C21_P278_Q3739", square_perimeter),
    ("C21_P279_Q3781", line_slope),
    ("C21_P279_Q3784", parabola_vertex),
    ("C21_P279_Q3790", line_through_two_points),
    ("C21_P279_Q3791", system_intersection),
];

const SHADED: Color = Color::rgb(0x4a, 0xde, 0x80);
const TAG: Color = Color::rgb(0xfc, 0xa5, 0xa5);

fn fraction_three_quarters() -> Result<Figure> {
    let mut fig = Figure::new(4.0, 4.0).with_title("¿Qué fracción está sombreada?", 14.0);
    fig.add(Pie {
        colors: vec![SHADED, SHADED, SHADED, Color::WHITE],
        start_angle: 90.0,
        clockwise: true,
        edge: Some(Stroke::solid(Color::BLACK).width(2.0)),
        ..Pie::new(vec![25.0; 4])
    });
    Ok(fig)
}

fn discount_tag() -> Result<Figure> {
    let mut fig = Figure::new(5.0, 3.0);
    fig.axes.off();
    let tag = TAG.with_alpha(0.3);
    fig.add(
        Rect::new((0.1, 0.1), 0.8, 0.8)
            .in_axes()
            .filled(tag)
            .outline(tag, 1.0),
    );
    fig.add(
        Text::new(0.5, 0.6, "$200")
            .in_axes()
            .align(HAlign::Center, VAlign::Center)
            .size(30.0)
            .bold()
            .color(Color::BLACK),
    );
    fig.add(
        Text::new(0.5, 0.3, "-10%")
            .in_axes()
            .align(HAlign::Center, VAlign::Center)
            .size(25.0)
            .bold()
            .color(Color::RED),
    );
    Ok(fig)
}

fn square_perimeter() -> Result<Figure> {
    let mut fig = Figure::new(4.0, 4.0).with_title("Perímetro = ?", 14.0);
    fig.add(Rect::new((1.0, 1.0), 3.0, 3.0).outline(Color::BLUE, 3.0));
    let side = |x: f64, y: f64| {
        Text::new(x, y, "5 cm")
            .align(HAlign::Center, VAlign::Center)
            .size(14.0)
            .color(Color::BLUE)
    };
    fig.add(side(2.5, 0.5));
    fig.add(side(4.2, 2.5).rotation(90.0));
    fig.axes.xlim(0.0, 5.0).ylim(0.0, 5.0).off();
    Ok(fig)
}

fn line_slope() -> Result<Figure> {
    let mut fig = Figure::new(5.0, 5.0).with_title("Pendiente de la recta", 14.0);
    fig.add(
        Curve::explicit("2x + 1", -2.0, 2.0, 100)?
            .fmt("b-")?
            .width(2.0)
            .label("y = 2x + 1"),
    );
    kit::light_grid(&mut fig);

    // Slope triangle: run 1, rise 2.
    fig.add(kit::segment((0.0, 1.0), (1.0, 1.0), "r--")?.width(1.5));
    fig.add(kit::segment((1.0, 1.0), (1.0, 3.0), "r--")?.width(1.5));
    fig.add(Text::new(0.5, 0.8, "1").color(Color::RED).size(10.0));
    fig.add(Text::new(1.1, 2.0, "2").color(Color::RED).size(10.0));
    Ok(fig)
}

fn parabola_vertex() -> Result<Figure> {
    let mut fig = Figure::new(5.0, 5.0).with_title("Vértice de la parábola", 14.0);
    fig.add(
        Curve::explicit("x^2 - 4x", 0.0, 4.0, 100)?
            .fmt("g-")?
            .width(2.0)
            .label("y = x² - 4x"),
    );
    fig.add(kit::dot(2.0, -4.0, "ro")?);
    fig.add(Text::new(2.2, -3.8, "Vértice").color(Color::RED).size(12.0));
    kit::light_grid(&mut fig);
    Ok(fig)
}

fn line_through_two_points() -> Result<Figure> {
    let mut fig = Figure::new(5.0, 5.0).with_title("Recta por dos puntos", 14.0);
    fig.add(Curve::explicit("2x", 0.0, 4.0, 100)?.fmt("purple")?.width(2.0));
    fig.add(kit::dot(1.0, 2.0, "bo")?);
    fig.add(Text::new(0.8, 2.5, "(1, 2)").color(Color::BLUE).size(10.0));
    fig.add(kit::dot(3.0, 6.0, "bo")?);
    fig.add(Text::new(2.8, 6.5, "(3, 6)").color(Color::BLUE).size(10.0));
    kit::light_grid(&mut fig);
    Ok(fig)
}

fn system_intersection() -> Result<Figure> {
    let mut fig = Figure::new(5.0, 5.0).with_title("Sistema de Ecuaciones", 14.0);
    fig.add(
        Curve::explicit("3x - 10", 0.0, 5.0, 100)?
            .fmt("b-")?
            .label("3x - y = 10"),
    );
    fig.add(
        Curve::explicit("5 - 2x", 0.0, 5.0, 100)?
            .fmt("r-")?
            .label("2x + y = 5"),
    );
    fig.add(kit::dot(3.0, -1.0, "ko")?);
    fig.add(Text::new(3.2, -0.8, "Solución").size(12.0));
    kit::light_grid(&mut fig);
    fig.show_legend();
    Ok(fig)
}
