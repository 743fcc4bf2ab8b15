use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// The ten-color default property cycle (`tab10`).
pub const DEFAULT_CYCLE: [Color; 10] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x7f, 0x7f, 0x7f),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0x17, 0xbe, 0xcf),
];

const TAB_NAMES: [&str; 10] = [
    "blue", "orange", "green", "red", "purple", "brown", "pink", "gray", "olive", "cyan",
];

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const CYAN: Color = Color::rgb(0, 191, 191);
    pub const MAGENTA: Color = Color::rgb(191, 0, 191);
    pub const YELLOW: Color = Color::rgb(191, 191, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a color the way plotting scripts spell them:
    /// - single-letter codes (`b`, `g`, `r`, `c`, `m`, `y`, `k`, `w`)
    /// - cycle references `C0`..`C9` and `tab:<name>`
    /// - grayscale strings in `[0, 1]` (`"0.5"`)
    /// - `none`/`transparent`
    /// - anything CSS understands (`purple`, `#fca5a5`, `rgb(...)`)
    pub fn parse(text: &str) -> Result<Self> {
        let s = text.trim();
        let invalid = || Error::InvalidColor {
            value: text.to_string(),
        };
        if s.is_empty() {
            return Err(invalid());
        }

        if s.len() == 1 {
            if let Some(c) = s.chars().next().and_then(Self::from_code) {
                return Ok(c);
            }
        }

        let lower = s.to_ascii_lowercase();
        if lower == "none" || lower == "transparent" {
            return Ok(Self::TRANSPARENT);
        }

        if let Some(idx) = lower.strip_prefix('c') {
            if let Ok(i) = idx.parse::<usize>() {
                return Ok(DEFAULT_CYCLE[i % DEFAULT_CYCLE.len()]);
            }
        }

        if let Some(name) = lower.strip_prefix("tab:") {
            return TAB_NAMES
                .iter()
                .position(|n| *n == name || (name == "grey" && *n == "gray"))
                .map(|i| DEFAULT_CYCLE[i])
                .ok_or_else(invalid);
        }

        if s.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
            let level: f64 = s.parse().map_err(|_| invalid())?;
            if !(0.0..=1.0).contains(&level) {
                return Err(invalid());
            }
            let v = (level * 255.0).round() as u8;
            return Ok(Self::rgb(v, v, v));
        }

        let css = svgtypes::Color::from_str(s).map_err(|_| invalid())?;
        Ok(Self::rgba(css.red, css.green, css.blue, css.alpha))
    }

    /// Single-letter color codes used in format strings.
    pub fn from_code(c: char) -> Option<Self> {
        Some(match c {
            'b' => Self::BLUE,
            'g' => Self::GREEN,
            'r' => Self::RED,
            'c' => Self::CYAN,
            'm' => Self::MAGENTA,
            'y' => Self::YELLOW,
            'k' => Self::BLACK,
            'w' => Self::WHITE,
            _ => return None,
        })
    }

    /// Multiplies the current alpha by `alpha` (clamped to `[0, 1]`).
    pub fn with_alpha(self, alpha: f64) -> Self {
        let alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self {
            a: (f64::from(self.a) * alpha).round() as u8,
            ..self
        }
    }

    pub fn alpha(&self) -> f64 {
        f64::from(self.a) / 255.0
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// `#rrggbb`, ignoring alpha. SVG emitters pair this with an opacity attribute.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "{}", self.to_hex())
        } else {
            write!(f, "{}{:02x}", self.to_hex(), self.a)
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

/// Hands out cycle colors in order, wrapping around.
#[derive(Debug, Clone, Default)]
pub struct ColorCycle {
    palette: Vec<Color>,
    next: usize,
}

impl ColorCycle {
    pub fn new(palette: Vec<Color>) -> Self {
        let palette = if palette.is_empty() {
            DEFAULT_CYCLE.to_vec()
        } else {
            palette
        };
        Self { palette, next: 0 }
    }

    pub fn next_color(&mut self) -> Color {
        if self.palette.is_empty() {
            self.palette = DEFAULT_CYCLE.to_vec();
        }
        let c = self.palette[self.next % self.palette.len()];
        self.next += 1;
        c
    }
}
