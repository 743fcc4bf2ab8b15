//! The figure model: a canvas, one set of axes, and the primitives drawn on it.
//!
//! Everything here is plain data. Layout and pixels live in `quizfig-render`.

use crate::color::Color;
use crate::sample::{CurveFn, SampledCurve};
use crate::style::{FontWeight, FormatSpec, HAlign, LineStyle, MarkerStyle, Stroke, VAlign};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

pub type XY = (f64, f64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Figure {
    /// Width in inches.
    pub width: f64,
    /// Height in inches.
    pub height: f64,
    /// Overrides the configured DPI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    pub axes: Axes,
    pub elements: Vec<Element>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

impl Default for Figure {
    fn default() -> Self {
        Self {
            width: 6.4,
            height: 4.8,
            dpi: None,
            title: None,
            axes: Axes::default(),
            elements: Vec::new(),
            legend: None,
        }
    }
}

impl Figure {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, text: impl Into<String>, font_size: f64) -> Self {
        self.title = Some(Title {
            text: text.into(),
            font_size: Some(font_size),
            weight: FontWeight::Normal,
        });
        self
    }

    /// Title at the configured default size.
    pub fn titled(mut self, text: impl Into<String>) -> Self {
        self.title = Some(Title {
            text: text.into(),
            font_size: None,
            weight: FontWeight::Normal,
        });
        self
    }

    pub fn add(&mut self, element: impl Into<Element>) -> &mut Self {
        self.elements.push(element.into());
        self
    }

    pub fn show_legend(&mut self) -> &mut Self {
        self.legend = Some(Legend::default());
        self
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidFigure { message });
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return invalid(format!(
                "figure size must be positive, got {}x{} in",
                self.width, self.height
            ));
        }
        if let Some(dpi) = self.dpi {
            if !(dpi.is_finite() && dpi > 0.0) {
                return invalid(format!("dpi must be positive, got {dpi}"));
            }
        }
        for (name, lim) in [("xlim", self.axes.xlim), ("ylim", self.axes.ylim)] {
            if let Some([lo, hi]) = lim {
                if !(lo.is_finite() && hi.is_finite()) || lo == hi {
                    return invalid(format!("{name} must be a finite, non-empty range"));
                }
            }
        }
        for element in &self.elements {
            element.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub weight: FontWeight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    #[default]
    Auto,
    /// Equal units; the data limits grow to fill the axes box.
    Equal,
    /// Equal units; the axes box shrinks around the data limits.
    EqualBox,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ticks {
    #[default]
    Auto,
    Fixed(Vec<f64>),
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisStyle {
    pub visible: bool,
    pub ticks: Ticks,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            visible: true,
            ticks: Ticks::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinePosition {
    /// The bottom edge of the axes box.
    #[default]
    Edge,
    /// The vertical middle of the axes box.
    Center,
    /// The data line `y = 0`.
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spines {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
    pub bottom_position: SpinePosition,
}

impl Default for Spines {
    fn default() -> Self {
        Self {
            left: true,
            right: true,
            top: true,
            bottom: true,
            bottom_position: SpinePosition::Edge,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Axes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xlim: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ylim: Option<[f64; 2]>,
    pub aspect: Aspect,
    /// `false` hides spines, ticks, labels and grid.
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Stroke>,
    pub spines: Spines,
    pub x_axis: AxisStyle,
    pub y_axis: AxisStyle,
}

impl Default for Axes {
    fn default() -> Self {
        Self {
            xlim: None,
            ylim: None,
            aspect: Aspect::Auto,
            visible: true,
            grid: None,
            spines: Spines::default(),
            x_axis: AxisStyle::default(),
            y_axis: AxisStyle::default(),
        }
    }
}

impl Axes {
    pub fn off(&mut self) -> &mut Self {
        self.visible = false;
        self
    }

    pub fn equal(&mut self) -> &mut Self {
        self.aspect = Aspect::Equal;
        self
    }

    pub fn equal_box(&mut self) -> &mut Self {
        self.aspect = Aspect::EqualBox;
        self
    }

    pub fn xlim(&mut self, lo: f64, hi: f64) -> &mut Self {
        self.xlim = Some([lo, hi]);
        self
    }

    pub fn ylim(&mut self, lo: f64, hi: f64) -> &mut Self {
        self.ylim = Some([lo, hi]);
        self
    }

    /// Grid lines at the major ticks. The default grid color is a light gray.
    pub fn grid(&mut self, style: LineStyle, alpha: f64) -> &mut Self {
        self.grid = Some(Stroke::default().style(style).alpha(alpha));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendLocation {
    /// The corner that covers the fewest data points.
    #[default]
    Best,
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Legend {
    pub location: LegendLocation,
    pub font_size: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coords {
    #[default]
    Data,
    /// Fractions of the axes box, `(0, 0)` bottom-left.
    Axes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowHeads {
    #[default]
    End,
    Start,
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Polyline(Polyline),
    Curve(Curve),
    Markers(Markers),
    Circle(Circle),
    Arc(Arc),
    Polygon(Polygon),
    Rect(Rect),
    Pie(Pie),
    #[serde(rename = "hline")]
    HLine(RefLine),
    #[serde(rename = "vline")]
    VLine(RefLine),
    Text(Text),
    Arrow(Arrow),
}

impl Element {
    /// Draw order; ties keep insertion order. Patches sit under lines, text on top.
    pub fn z_order(&self) -> i32 {
        let (explicit, default) = match self {
            Element::Circle(e) => (e.z, 1),
            Element::Polygon(e) => (e.z, 1),
            Element::Rect(e) => (e.z, 1),
            Element::Pie(e) => (e.z, 1),
            Element::Polyline(e) => (e.z, 2),
            Element::Curve(e) => (e.z, 2),
            Element::Markers(e) => (e.z, 2),
            Element::Arc(e) => (e.z, 2),
            Element::HLine(e) | Element::VLine(e) => (e.z, 2),
            Element::Text(e) => (e.z, 3),
            Element::Arrow(e) => (e.z, 3),
        };
        explicit.unwrap_or(default)
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Element::Polyline(e) => e.label.as_deref(),
            Element::Curve(e) => e.label.as_deref(),
            Element::Markers(e) => e.label.as_deref(),
            Element::Polygon(e) => e.label.as_deref(),
            Element::HLine(e) | Element::VLine(e) => e.label.as_deref(),
            _ => None,
        }
    }

    fn validate(&self) -> Result<()> {
        let invalid = |message: &str| {
            Err(Error::InvalidFigure {
                message: message.to_string(),
            })
        };
        match self {
            Element::Curve(c) => c.curve.validate(),
            Element::Circle(c) if !(c.radius.is_finite() && c.radius > 0.0) => {
                invalid("circle radius must be positive")
            }
            Element::Arc(a) if !(a.radius.is_finite() && a.radius > 0.0) => {
                invalid("arc radius must be positive")
            }
            Element::Arc(a) if !(a.start_deg.is_finite() && a.end_deg.is_finite()) => {
                invalid("arc angles must be finite")
            }
            Element::Pie(p) if !p.start_angle.is_finite() => {
                invalid("pie start angle must be finite")
            }
            Element::Pie(p) => {
                if p.sizes.iter().any(|v| !v.is_finite() || *v < 0.0) {
                    return invalid("pie sizes must be finite and non-negative");
                }
                if p.sizes.iter().sum::<f64>() <= 0.0 {
                    return invalid("pie sizes must not all be zero");
                }
                Ok(())
            }
            Element::Polygon(p) if p.points.len() < 3 => {
                invalid("polygon needs at least three vertices")
            }
            _ => Ok(()),
        }
    }
}

/// Builder methods shared by every element that carries a [`Stroke`].
pub trait Stroked: Sized {
    fn stroke_mut(&mut self) -> &mut Stroke;

    fn color(mut self, color: Color) -> Self {
        self.stroke_mut().color = Some(color);
        self
    }

    fn width(mut self, width: f64) -> Self {
        self.stroke_mut().width = Some(width);
        self
    }

    fn line_style(mut self, style: LineStyle) -> Self {
        self.stroke_mut().style = style;
        self
    }

    fn alpha(mut self, alpha: f64) -> Self {
        self.stroke_mut().alpha = Some(alpha);
        self
    }
}

macro_rules! into_element {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for Element {
            fn from(value: $ty) -> Self {
                Element::$variant(value)
            }
        })*
    };
}

into_element!(
    Polyline => Polyline,
    Curve => Curve,
    Markers => Markers,
    Circle => Circle,
    Arc => Arc,
    Polygon => Polygon,
    Rect => Rect,
    Pie => Pie,
    Text => Text,
    Arrow => Arrow,
);

/// Connected line segments through literal points, optionally with markers at the vertices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Polyline {
    pub points: Vec<XY>,
    pub stroke: Stroke,
    pub marker: Option<MarkerStyle>,
    pub label: Option<String>,
    pub z: Option<i32>,
}

impl Polyline {
    pub fn new(points: impl Into<Vec<XY>>) -> Self {
        Self {
            points: points.into(),
            ..Self::default()
        }
    }

    /// `plot(xs, ys, fmt)` style construction.
    pub fn fmt(points: impl Into<Vec<XY>>, fmt: &str) -> Result<Self> {
        let spec = FormatSpec::parse(fmt)?;
        Ok(Self {
            points: points.into(),
            stroke: spec.stroke(),
            marker: spec.marker_style(),
            ..Self::default()
        })
    }

    pub fn marker(mut self, marker: MarkerStyle) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn z(mut self, z: i32) -> Self {
        self.z = Some(z);
        self
    }
}

impl Stroked for Polyline {
    fn stroke_mut(&mut self) -> &mut Stroke {
        &mut self.stroke
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    #[serde(flatten)]
    pub curve: SampledCurve,
    #[serde(default)]
    pub stroke: Stroke,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub z: Option<i32>,
}

impl Curve {
    pub fn new(curve: SampledCurve) -> Self {
        Self {
            curve,
            stroke: Stroke::default(),
            label: None,
            z: None,
        }
    }

    /// `y = f(x)` over `[start, stop]`.
    pub fn explicit(y: &str, start: f64, stop: f64, samples: usize) -> Result<Self> {
        Ok(Self::new(SampledCurve::new(
            CurveFn::explicit(y)?,
            start,
            stop,
            samples,
        )))
    }

    /// `(x(t), y(t))` for `t` in `[start, stop]`.
    pub fn parametric(x: &str, y: &str, start: f64, stop: f64, samples: usize) -> Result<Self> {
        Ok(Self::new(SampledCurve::new(
            CurveFn::parametric(x, y)?,
            start,
            stop,
            samples,
        )))
    }

    pub fn fmt(mut self, fmt: &str) -> Result<Self> {
        let spec = FormatSpec::parse(fmt)?;
        self.stroke.style = spec.line_style();
        if spec.color.is_some() {
            self.stroke.color = spec.color;
        }
        Ok(self)
    }

    pub fn excluding(mut self, center: f64, radius: f64) -> Self {
        self.curve = self.curve.excluding(center, radius);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Stroked for Curve {
    fn stroke_mut(&mut self) -> &mut Stroke {
        &mut self.stroke
    }
}

/// Unconnected point markers (`scatter`, or `plot` with a marker-only format).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub points: Vec<XY>,
    pub marker: MarkerStyle,
    pub label: Option<String>,
    pub z: Option<i32>,
}

impl Markers {
    pub fn new(points: impl Into<Vec<XY>>, marker: MarkerStyle) -> Self {
        Self {
            points: points.into(),
            marker,
            ..Self::default()
        }
    }

    /// Marker-only format such as `"ro"` or `"wo"`; the color fills face and edge.
    pub fn fmt(points: impl Into<Vec<XY>>, fmt: &str) -> Result<Self> {
        let spec = FormatSpec::parse(fmt)?;
        let mut marker = spec.marker_style().unwrap_or_default();
        if let Some(c) = spec.color {
            marker.face = Some(c);
            marker.edge = Some(c);
        }
        Ok(Self::new(points, marker))
    }

    pub fn edge(mut self, color: Color) -> Self {
        self.marker.edge = Some(color);
        self
    }

    pub fn face(mut self, color: Color) -> Self {
        self.marker.face = Some(color);
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.marker.size = Some(size);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn z(mut self, z: i32) -> Self {
        self.z = Some(z);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: XY,
    pub radius: f64,
    #[serde(default)]
    pub stroke: Option<Stroke>,
    #[serde(default)]
    pub fill: Option<Color>,
    #[serde(default)]
    pub z: Option<i32>,
}

/// A circular arc stroked from `start_deg` to `end_deg`, counter-clockwise for increasing angles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: XY,
    pub radius: f64,
    pub start_deg: f64,
    pub end_deg: f64,
    #[serde(default)]
    pub stroke: Stroke,
    #[serde(default)]
    pub z: Option<i32>,
}

impl Arc {
    pub fn new(center: XY, radius: f64, start_deg: f64, end_deg: f64) -> Self {
        Self {
            center,
            radius,
            start_deg,
            end_deg,
            stroke: Stroke::default(),
            z: None,
        }
    }
}

impl Stroked for Arc {
    fn stroke_mut(&mut self) -> &mut Stroke {
        &mut self.stroke
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Polygon {
    pub points: Vec<XY>,
    pub stroke: Option<Stroke>,
    pub fill: Option<Color>,
    pub label: Option<String>,
    pub z: Option<i32>,
}

impl Polygon {
    /// An unfilled outline.
    pub fn outline(points: impl Into<Vec<XY>>, color: Color, width: f64) -> Self {
        Self {
            points: points.into(),
            stroke: Some(Stroke::solid(color).width(width)),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Bottom-left corner.
    pub origin: XY,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub coords: Coords,
    #[serde(default)]
    pub stroke: Option<Stroke>,
    #[serde(default)]
    pub fill: Option<Color>,
    #[serde(default)]
    pub z: Option<i32>,
}

impl Rect {
    pub fn new(origin: XY, width: f64, height: f64) -> Self {
        Self {
            origin,
            width,
            height,
            coords: Coords::Data,
            stroke: None,
            fill: None,
            z: None,
        }
    }

    pub fn in_axes(mut self) -> Self {
        self.coords = Coords::Axes;
        self
    }

    pub fn outline(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(Stroke::solid(color).width(width));
        self
    }

    pub fn filled(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }
}

/// Wedges proportional to `sizes`, drawn on the unit circle. A pie fixes the axes to an
/// equal-aspect, frameless view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pie {
    pub sizes: Vec<f64>,
    #[serde(default)]
    pub colors: Vec<Color>,
    /// Angle of the first wedge edge, degrees counter-clockwise from the positive x axis.
    #[serde(default)]
    pub start_angle: f64,
    #[serde(default)]
    pub clockwise: bool,
    #[serde(default)]
    pub edge: Option<Stroke>,
    #[serde(default)]
    pub z: Option<i32>,
}

impl Pie {
    pub fn new(sizes: impl Into<Vec<f64>>) -> Self {
        Self {
            sizes: sizes.into(),
            colors: Vec::new(),
            start_angle: 0.0,
            clockwise: false,
            edge: None,
            z: None,
        }
    }
}

/// A horizontal (`hline`) or vertical (`vline`) line spanning the whole axes box.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RefLine {
    pub value: f64,
    pub stroke: Stroke,
    pub label: Option<String>,
    pub z: Option<i32>,
}

impl RefLine {
    pub fn at(value: f64) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// `axhline(y)`.
    pub fn horizontal(self) -> Element {
        Element::HLine(self)
    }

    /// `axvline(x)`.
    pub fn vertical(self) -> Element {
        Element::VLine(self)
    }
}

impl Stroked for RefLine {
    fn stroke_mut(&mut self) -> &mut Stroke {
        &mut self.stroke
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub text: String,
    #[serde(default)]
    pub coords: Coords,
    /// Font size in points.
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub ha: HAlign,
    #[serde(default)]
    pub va: VAlign,
    /// Counter-clockwise rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub z: Option<i32>,
}

impl Text {
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            coords: Coords::Data,
            size: None,
            color: None,
            weight: FontWeight::Normal,
            ha: HAlign::Left,
            va: VAlign::Baseline,
            rotation: 0.0,
            z: None,
        }
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn align(mut self, ha: HAlign, va: VAlign) -> Self {
        self.ha = ha;
        self.va = va;
        self
    }

    pub fn ha(mut self, ha: HAlign) -> Self {
        self.ha = ha;
        self
    }

    pub fn va(mut self, va: VAlign) -> Self {
        self.va = va;
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn in_axes(mut self) -> Self {
        self.coords = Coords::Axes;
        self
    }
}

/// A straight arrow between two data points (an annotation without text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub from: XY,
    pub to: XY,
    #[serde(default)]
    pub heads: ArrowHeads,
    #[serde(default)]
    pub stroke: Stroke,
    #[serde(default)]
    pub z: Option<i32>,
}

impl Arrow {
    pub fn new(from: XY, to: XY, heads: ArrowHeads) -> Self {
        Self {
            from,
            to,
            heads,
            stroke: Stroke::default(),
            z: None,
        }
    }
}

impl Stroked for Arrow {
    fn stroke_mut(&mut self) -> &mut Stroke {
        &mut self.stroke
    }
}
