use crate::figure::Figure;
use crate::name::DiagramName;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One named figure: the unit that gets rendered and saved.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub name: DiagramName,
    pub figure: Figure,
}

impl Diagram {
    pub fn new(name: DiagramName, figure: Figure) -> Self {
        Self { name, figure }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Json5,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "json5" => Some(Self::Json5),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// `{` at the start means JSON; anything else is read as YAML (a JSON superset for our needs).
    pub fn sniff(text: &str) -> Self {
        if text.trim_start().starts_with('{') {
            Self::Json
        } else {
            Self::Yaml
        }
    }

    pub fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        Ok(match self {
            Self::Json => serde_json::from_str(text)?,
            Self::Yaml => serde_yaml::from_str(text)?,
            Self::Json5 => json5::from_str(text)?,
        })
    }
}

/// A figure described as data, as read from `*.json`, `*.yaml` or `*.json5` files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<DiagramName>,
    pub figure: Figure,
}

impl FigureDocument {
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self> {
        let doc: Self = format.decode(text)?;
        doc.figure.validate()?;
        Ok(doc)
    }

    /// Picks the format from `path`'s extension when it has a known one, otherwise sniffs `text`.
    pub fn parse_for_path(text: &str, path: Option<&Path>) -> Result<Self> {
        let format = match path {
            Some(p) => match DocumentFormat::from_path(p) {
                Some(f) => f,
                None if p.extension().is_some() => {
                    return Err(Error::UnknownDocumentFormat {
                        hint: p.display().to_string(),
                    });
                }
                None => DocumentFormat::sniff(text),
            },
            None => DocumentFormat::sniff(text),
        };
        Self::parse(text, format)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Binds the document to a name, falling back to `fallback` when the document has none.
    pub fn into_diagram(self, fallback: impl FnOnce() -> Result<DiagramName>) -> Result<Diagram> {
        let name = match self.name {
            Some(n) => n,
            None => fallback()?,
        };
        Ok(Diagram::new(name, self.figure))
    }
}
