use crate::color::{Color, DEFAULT_CYCLE};
use crate::document::DocumentFormat;
use crate::Result;
use serde_json::{Map, Value, json};

/// Render settings as a JSON object addressed by dotted paths.
///
/// Layers are merged in order: [`RenderConfig::site_defaults`], an optional config file, then
/// individual overrides via [`RenderConfig::set_value`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig(Value);

impl Default for RenderConfig {
    fn default() -> Self {
        Self::site_defaults()
    }
}

impl RenderConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn site_defaults() -> Self {
        let cycle: Vec<String> = DEFAULT_CYCLE.iter().map(|c| c.to_string()).collect();
        Self(json!({
            "dpi": 100.0,
            "fontFamily": "DejaVu Sans, Arial, Helvetica, sans-serif",
            "fontSize": 10.0,
            "titleFontSize": 12.0,
            "background": "white",
            "lineWidth": 1.5,
            "markerSize": 6.0,
            "padInches": 0.1,
            "tightBBox": true,
            "colorCycle": cycle,
        }))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Site defaults overlaid with a JSON, YAML or JSON5 config file.
    pub fn from_text(text: &str, format: DocumentFormat) -> Result<Self> {
        let value: Value = format.decode(text)?;
        let mut cfg = Self::site_defaults();
        cfg.deep_merge(&value);
        Ok(cfg)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path)?.as_bool()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    fn positive(&self, key: &str, fallback: f64) -> f64 {
        self.get_f64(key)
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(fallback)
    }

    pub fn dpi(&self) -> f64 {
        self.positive("dpi", 100.0)
    }

    pub fn font_family(&self) -> &str {
        self.get_str("fontFamily").unwrap_or("sans-serif")
    }

    pub fn font_size(&self) -> f64 {
        self.positive("fontSize", 10.0)
    }

    pub fn title_font_size(&self) -> f64 {
        self.positive("titleFontSize", 12.0)
    }

    pub fn line_width(&self) -> f64 {
        self.positive("lineWidth", 1.5)
    }

    pub fn marker_size(&self) -> f64 {
        self.positive("markerSize", 6.0)
    }

    pub fn pad_inches(&self) -> f64 {
        self.get_f64("padInches")
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(0.1)
    }

    pub fn tight_bbox(&self) -> bool {
        self.get_bool("tightBBox").unwrap_or(true)
    }

    /// Unparseable background strings fall back to white.
    pub fn background(&self) -> Color {
        self.get_str("background")
            .and_then(|s| Color::parse(s).ok())
            .unwrap_or(Color::WHITE)
    }

    /// Unparseable entries are skipped; an empty result means the default cycle.
    pub fn color_cycle(&self) -> Vec<Color> {
        let colors: Vec<Color> = self
            .get("colorCycle")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter_map(|s| Color::parse(s).ok())
                    .collect()
            })
            .unwrap_or_default();
        if colors.is_empty() {
            DEFAULT_CYCLE.to_vec()
        } else {
            colors
        }
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
