#![forbid(unsafe_code)]

//! Quiz diagram model (headless).
//!
//! A [`Diagram`] is a [`Figure`] (canvas, axes and drawing primitives) bound to the
//! [`DiagramName`] of the quiz question it illustrates. Curves are written as closed-form
//! [`Expr`]essions and sampled lazily; nothing in this crate touches pixels or the filesystem.

pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod expr;
pub mod figure;
pub mod geom;
pub mod name;
pub mod sample;
pub mod style;

pub use color::{Color, ColorCycle};
pub use config::RenderConfig;
pub use document::{Diagram, DocumentFormat, FigureDocument};
pub use error::{Error, Result};
pub use expr::{Expr, ExprError};
pub use figure::{Axes, Element, Figure};
pub use name::DiagramName;
pub use sample::{CurveFn, Sample, SampledCurve, linspace};

/// Everything a diagram definition usually needs.
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::document::Diagram;
    pub use crate::figure::{
        Arc, Arrow, ArrowHeads, Aspect, Circle, Coords, Curve, Element, Figure, Legend,
        LegendLocation, Markers, Pie, Polygon, Polyline, Rect, RefLine, SpinePosition, Stroked,
        Text, Ticks,
    };
    pub use crate::name::DiagramName;
    pub use crate::sample::linspace;
    pub use crate::style::{HAlign, LineStyle, MarkerShape, MarkerStyle, Stroke, VAlign};
    pub use crate::{Error, Result};
}

#[cfg(test)]
mod tests;
