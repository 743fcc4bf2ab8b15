use quizfig_core::style::FontWeight;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

/// Ascent and descent as fractions of the font size.
pub const ASCENT: f64 = 0.76;
pub const DESCENT: f64 = 0.24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    /// Pixels.
    pub font_size: f64,
    pub font_weight: FontWeight,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 10.0 * 100.0 / 72.0,
            font_weight: FontWeight::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
    /// Distance between consecutive baselines.
    pub line_height: f64,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-free measurer: every column of a line is `char_width_factor` ems wide.
///
/// Columns come from Unicode East Asian width, so combining marks are free and wide glyphs count
/// double. Bold text is widened by 10%.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn normalized_text_lines(text: &str) -> Vec<String> {
        let out = text
            .replace("\r\n", "\n")
            .split('\n')
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        if out.is_empty() {
            return vec!["".to_string()];
        }
        out
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let lines = Self::normalized_text_lines(text);
        let font_size = style.font_size.max(1.0);
        let max_cols = lines.iter().map(|l| l.width()).max().unwrap_or(0);
        let weight = match style.font_weight {
            FontWeight::Bold => 1.1,
            FontWeight::Normal => 1.0,
        };

        let line_height = font_size * line_height_factor;
        let width = max_cols as f64 * font_size * char_width_factor * weight;
        let height = (lines.len() - 1) as f64 * line_height + font_size * (ASCENT + DESCENT);
        TextMetrics {
            width,
            height,
            line_count: lines.len(),
            line_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_measurer_counts_columns() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle {
            font_size: 10.0,
            ..Default::default()
        };
        let one = m.measure("θ", &style);
        assert!((one.width - 6.0).abs() < 1e-9);
        assert_eq!(one.line_count, 1);
        assert!((one.height - 10.0).abs() < 1e-9);

        let two = m.measure("ab\nabcd", &style);
        assert!((two.width - 24.0).abs() < 1e-9);
        assert_eq!(two.line_count, 2);
        assert!((two.height - 22.0).abs() < 1e-9);
    }

    #[test]
    fn deterministic_measurer_widens_bold_text() {
        let m = DeterministicTextMeasurer::default();
        let normal = TextStyle {
            font_size: 10.0,
            ..Default::default()
        };
        let bold = TextStyle {
            font_weight: FontWeight::Bold,
            ..normal.clone()
        };
        assert!(m.measure("Caja", &bold).width > m.measure("Caja", &normal).width);
    }
}
