use crate::color::Color;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
    None,
}

impl LineStyle {
    /// Accepts both the short codes (`-`, `--`, `:`, `-.`) and the long names.
    pub fn parse(text: &str) -> Option<Self> {
        Some(match text.trim() {
            "-" | "solid" => Self::Solid,
            "--" | "dashed" => Self::Dashed,
            ":" | "dotted" => Self::Dotted,
            "-." | "dashdot" => Self::DashDot,
            "" | "none" | "None" => Self::None,
            _ => return None,
        })
    }

    /// On/off lengths in points for a line width of one point.
    pub fn dash_pattern(&self) -> Option<&'static [f64]> {
        match self {
            Self::Dashed => Some(&[3.7, 1.6]),
            Self::Dotted => Some(&[1.0, 1.65]),
            Self::DashDot => Some(&[6.4, 1.6, 1.0, 1.6]),
            Self::Solid | Self::None => None,
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    #[default]
    Circle,
    Point,
    Square,
    Triangle,
    Diamond,
    Plus,
    Cross,
}

impl MarkerShape {
    pub fn from_code(c: char) -> Option<Self> {
        Some(match c {
            'o' => Self::Circle,
            '.' => Self::Point,
            's' => Self::Square,
            '^' => Self::Triangle,
            'D' => Self::Diamond,
            '+' => Self::Plus,
            'x' => Self::Cross,
            _ => return None,
        })
    }

    /// Open shapes are drawn with their edge color only.
    pub fn is_filled(&self) -> bool {
        !matches!(self, Self::Plus | Self::Cross)
    }
}

/// Line appearance. `None` fields fall back to the render configuration (width) or the color
/// cycle (color).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stroke {
    pub color: Option<Color>,
    pub width: Option<f64>,
    pub style: LineStyle,
    pub alpha: Option<f64>,
}

impl Stroke {
    pub fn solid(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    /// Marker diameter in points.
    pub size: Option<f64>,
    /// Face color; `None` uses the owning line's color.
    pub face: Option<Color>,
    /// Edge color; `None` uses the owning line's color.
    pub edge: Option<Color>,
    pub edge_width: Option<f64>,
}

impl MarkerStyle {
    pub fn new(shape: MarkerShape) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn face(mut self, color: Color) -> Self {
        self.face = Some(color);
        self
    }

    pub fn edge(mut self, color: Color) -> Self {
        self.edge = Some(color);
        self
    }

    /// Transparent face, edge only.
    pub fn hollow(self) -> Self {
        self.face(Color::TRANSPARENT)
    }
}

/// A parsed `[marker][line][color]` format string such as `"r--"`, `"bo"` or `"purple"`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FormatSpec {
    pub color: Option<Color>,
    pub line: Option<LineStyle>,
    pub marker: Option<MarkerShape>,
}

impl FormatSpec {
    pub fn parse(fmt: &str) -> Result<Self> {
        let invalid = |message: String| Error::InvalidFormat {
            fmt: fmt.to_string(),
            message,
        };

        // A whole-string color (`"purple"`, `"#4ade80"`, `"0.5"`) wins over code parsing.
        if fmt.chars().count() > 1 {
            if let Ok(color) = Color::parse(fmt) {
                return Ok(Self {
                    color: Some(color),
                    ..Self::default()
                });
            }
        }

        let mut spec = Self::default();
        let chars: Vec<char> = fmt.chars().collect();
        let mut i = 0usize;
        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();

            let two = next.map(|n| [c, n].iter().collect::<String>());
            if let Some(style) = two.as_deref().and_then(|t| match t {
                "--" => Some(LineStyle::Dashed),
                "-." => Some(LineStyle::DashDot),
                _ => None,
            }) {
                if spec.line.replace(style).is_some() {
                    return Err(invalid("two line styles".to_string()));
                }
                i += 2;
                continue;
            }

            if c == 'C' {
                if let Some(d) = next.and_then(|n| n.to_digit(10)) {
                    let color = Color::parse(&format!("C{d}"))?;
                    if spec.color.replace(color).is_some() {
                        return Err(invalid("two colors".to_string()));
                    }
                    i += 2;
                    continue;
                }
            }

            if c == '-' || c == ':' {
                let style = if c == '-' {
                    LineStyle::Solid
                } else {
                    LineStyle::Dotted
                };
                if spec.line.replace(style).is_some() {
                    return Err(invalid("two line styles".to_string()));
                }
            } else if let Some(marker) = MarkerShape::from_code(c) {
                if spec.marker.replace(marker).is_some() {
                    return Err(invalid("two markers".to_string()));
                }
            } else if let Some(color) = Color::from_code(c) {
                if spec.color.replace(color).is_some() {
                    return Err(invalid("two colors".to_string()));
                }
            } else {
                return Err(invalid(format!("unrecognized character {c:?}")));
            }
            i += 1;
        }

        Ok(spec)
    }

    /// Effective line style: a marker without a line style means "markers only".
    pub fn line_style(&self) -> LineStyle {
        match (self.line, self.marker) {
            (Some(style), _) => style,
            (None, Some(_)) => LineStyle::None,
            (None, None) => LineStyle::Solid,
        }
    }

    pub fn stroke(&self) -> Stroke {
        Stroke {
            color: self.color,
            style: self.line_style(),
            ..Stroke::default()
        }
    }

    pub fn marker_style(&self) -> Option<MarkerStyle> {
        self.marker.map(MarkerStyle::new)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VAlign {
    Top,
    Center,
    Bottom,
    #[default]
    Baseline,
}
