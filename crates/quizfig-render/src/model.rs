use crate::scale::LinearScale;
use quizfig_core::Color;
use quizfig_core::figure::LegendLocation;
use quizfig_core::geom::Bounds;
use quizfig_core::style::{FontWeight, MarkerShape};
use serde::{Deserialize, Serialize};

pub type Px = (f64, f64);

/// What a draw item belongs to. Emitted as the SVG `class` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Grid,
    Spine,
    Tick,
    TickLabel,
    Title,
    Data,
    Annotation,
    Legend,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Grid => "grid",
            Role::Spine => "spine",
            Role::Tick => "tick",
            Role::TickLabel => "tick-label",
            Role::Title => "title",
            Role::Data => "data",
            Role::Annotation => "annotation",
            Role::Legend => "legend",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeLayout {
    pub color: Color,
    pub width: f64,
    /// On/off lengths in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathLayout {
    /// Disconnected runs of vertices; each run becomes one sub-path.
    pub runs: Vec<Vec<Px>>,
    pub closed: bool,
    pub stroke: Option<StrokeLayout>,
    pub fill: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipseLayout {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    pub stroke: Option<StrokeLayout>,
    pub fill: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLayout {
    pub x: f64,
    pub y: f64,
    pub shape: MarkerShape,
    /// Diameter in pixels.
    pub size: f64,
    pub face: Option<Color>,
    pub edge: Option<StrokeLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLayout {
    /// Anchor x and the baseline of the first line.
    pub x: f64,
    pub y: f64,
    pub lines: Vec<String>,
    pub line_height: f64,
    pub font_size: f64,
    pub font_family: String,
    pub weight: FontWeight,
    pub anchor: TextAnchor,
    pub color: Color,
    /// Counter-clockwise degrees about `pivot`.
    pub rotation: f64,
    pub pivot: Px,
    /// Extent after rotation.
    pub bbox: Bounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Drawable {
    Path(PathLayout),
    Ellipse(EllipseLayout),
    Marker(MarkerLayout),
    Text(TextLayout),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawItem {
    pub z: f64,
    pub role: Role,
    /// Clipped to the axes box.
    pub clip: bool,
    #[serde(flatten)]
    pub drawable: Drawable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickLayout {
    pub value: f64,
    /// Pixel position along the axis.
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureLayout {
    /// Output size in pixels.
    pub width: f64,
    pub height: f64,
    /// The region of the canvas that is written out.
    pub viewbox: Bounds,
    /// The untrimmed canvas.
    pub canvas: Bounds,
    pub dpi: f64,
    pub background: Color,
    pub axes_box: Bounds,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub x_ticks: Vec<TickLayout>,
    pub y_ticks: Vec<TickLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend_location: Option<LegendLocation>,
    /// Sorted by `z`; equal `z` keeps insertion order.
    pub items: Vec<DrawItem>,
}

impl FigureLayout {
    pub fn texts(&self) -> impl Iterator<Item = &TextLayout> {
        self.items.iter().filter_map(|i| match &i.drawable {
            Drawable::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn items_with_role(&self, role: Role) -> impl Iterator<Item = &DrawItem> {
        self.items.iter().filter(move |i| i.role == role)
    }
}
