//! Second trigonometry set, quiz 280. These questions carry a description instead of a number.

use crate::DiagramBuilder;
use crate::kit;
use quizfig_core::prelude::*;
use std::f64::consts::PI;

pub(crate) const DIAGRAMS: &[(&str, DiagramBuilder)] = &[
    ("C21_P280_Q_RefAngle210", reference_angle_210),
    ("C21_P280_Q_SineAmplitude", sine_amplitude),
    ("C21_P280_Q_LawSines", law_of_sines),
    ("C21_P280_Q_LawCosines", law_of_cosines),
    ("C21_P280_Q_ComplexNum", complex_number),
];

fn reference_angle_210() -> Result<Figure> {
    let mut fig = Figure::new(5.0, 5.0).with_title("Ángulo de Referencia", 14.0);
    fig.add(kit::circle(1.0)?.fmt("k-")?.alpha(0.3));
    kit::axis_lines(&mut fig);

    let angle = 210f64.to_radians();
    let (s, c) = angle.sin_cos();
    fig.add(
        kit::segment((0.0, 0.0), (c, s), "b-")?
            .width(2.0)
            .label("210°"),
    );
    // Reference angle, from 180° to 210°.
    fig.add(kit::arc(0.3, PI, angle, 20)?.fmt("r-")?.width(2.0));
    fig.add(
        Text::new(-0.4, -0.15, "30°")
            .color(Color::RED)
            .size(12.0)
            .bold(),
    );

    fig.axes.equal().xlim(-1.2, 1.2).ylim(-1.2, 1.2).off();
    Ok(fig)
}

fn sine_amplitude() -> Result<Figure> {
    let mut fig = Figure::new(8.0, 4.0).with_title("y = 2 + 3 sin(4x − π)", 14.0);
    fig.add(
        Curve::explicit("2 + 3sin(4x - pi)", 0.0, 2.0 * PI, 400)?
            .fmt("b-")?
            .width(2.0),
    );

    fig.add(
        RefLine::at(2.0)
            .color(Color::GRAY)
            .line_style(LineStyle::Dashed)
            .alpha(0.7)
            .label("Eje central (y=2)")
            .horizontal(),
    );
    for extreme in [5.0, -1.0] {
        fig.add(
            RefLine::at(extreme)
                .color(Color::RED)
                .line_style(LineStyle::Dotted)
                .alpha(0.5)
                .horizontal(),
        );
    }

    // A crest sits at x = 3π/8.
    let crest = PI / 8.0 + PI / 4.0;
    fig.add(
        Arrow::new((crest, 5.0), (crest, 2.0), ArrowHeads::Both)
            .color(Color::GREEN)
            .width(2.0),
    );
    fig.add(
        Text::new(1.3, 3.5, "Amplitud = ?")
            .color(Color::GREEN)
            .size(12.0)
            .bold(),
    );

    fig.axes.grid(LineStyle::Solid, 0.3).ylim(-2.0, 6.0);
    Ok(fig)
}

fn law_of_sines() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 4.0).with_title("Ley de Senos", 14.0);

    // a = 10, A = 30°, B = 45°: b = a sin B / sin A, c = a sin C / sin A.
    let (b_len, c_len) = (14.14, 19.32);
    let a = (0.0, 0.0);
    let b = (c_len, 0.0);
    let (sa, ca) = 30f64.to_radians().sin_cos();
    let c = (b_len * ca, b_len * sa);
    fig.add(Polygon::outline(vec![a, b, c], Color::BLUE, 2.0));

    let vertex = |x: f64, y: f64, label: &str| Text::new(x, y, label).size(12.0).bold();
    fig.add(vertex(-1.0, -1.0, "A (30°)"));
    fig.add(vertex(c_len, -1.0, "B (45°)"));
    fig.add(vertex(c.0 - 1.0, c.1 + 1.0, "C"));

    fig.add(Text::new(c_len / 2.0, -2.0, "c").size(12.0));
    fig.add(
        Text::new(c.0 / 2.0 - 1.0, c.1 / 2.0 + 1.0, "b = ?")
            .size(12.0)
            .color(Color::RED)
            .bold(),
    );
    fig.add(Text::new((b.0 + c.0) / 2.0 + 0.5, (b.1 + c.1) / 2.0 + 1.0, "a = 10").size(12.0));

    fig.axes.xlim(-2.0, 22.0).ylim(-3.0, 10.0).off();
    Ok(fig)
}

fn law_of_cosines() -> Result<Figure> {
    let mut fig = Figure::new(6.0, 4.0).with_title("Ley de Cosenos", 14.0);

    // Sides a = 7, b = 5, c = 6: 49 = 25 + 36 - 60 cos A, so cos A = 0.2.
    let (b_len, c_len) = (5.0, 6.0);
    let (sa, ca) = 0.2f64.acos().sin_cos();
    let b = (c_len, 0.0);
    let c = (b_len * ca, b_len * sa);
    fig.add(Polygon::outline(vec![(0.0, 0.0), b, c], Color::PURPLE, 2.0));

    fig.add(
        Text::new(-0.5, -0.5, "A = ?")
            .size(12.0)
            .color(Color::RED)
            .bold(),
    );
    fig.add(Text::new(c_len, -0.5, "B").size(12.0));
    fig.add(Text::new(c.0, c.1 + 0.5, "C").size(12.0));

    let side = |x: f64, y: f64, label: &str| Text::new(x, y, label).size(12.0).bold();
    fig.add(side(c_len / 2.0, -0.8, "6"));
    fig.add(side(c.0 / 2.0 - 0.5, c.1 / 2.0, "5"));
    fig.add(side((b.0 + c.0) / 2.0 + 0.2, (b.1 + c.1) / 2.0, "7"));

    fig.axes.xlim(-1.0, 7.0).ylim(-1.0, 6.0).off();
    Ok(fig)
}

fn complex_number() -> Result<Figure> {
    let mut fig = Figure::new(5.0, 5.0).with_title("Número Complejo", 14.0);
    kit::axis_lines(&mut fig);

    let (r, theta) = (2.0, PI / 3.0);
    let (x, y) = (r * theta.cos(), r * theta.sin());
    fig.add(kit::segment((0.0, 0.0), (x, y), "b-")?.width(2.0));
    fig.add(kit::dot(x, y, "bo")?);
    fig.add(kit::segment((x, 0.0), (x, y), "k--")?.alpha(0.3));
    fig.add(kit::segment((0.0, y), (x, y), "k--")?.alpha(0.3));

    fig.add(kit::arc(0.5, 0.0, theta, 20)?.fmt("r-")?.width(1.5));
    fig.add(Text::new(0.6, 0.3, "π/3").color(Color::RED).size(12.0));
    fig.add(
        Text::new(0.8, 1.0, "r = 2")
            .color(Color::BLUE)
            .size(12.0)
            .bold(),
    );

    fig.axes
        .xlim(-0.5, 2.5)
        .ylim(-0.5, 2.5)
        .equal()
        .grid(LineStyle::Solid, 0.3);
    Ok(fig)
}
