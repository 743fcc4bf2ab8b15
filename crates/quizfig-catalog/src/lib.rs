#![forbid(unsafe_code)]

//! The quiz diagrams shipped with quizfig.
//!
//! Diagrams are grouped into [`Batch`]es. A batch is rendered in a fixed order into its default
//! output directory; several batches share a directory, so file names must be unique per
//! directory (see [`Catalog::check_unique`]).

mod arith_alg;
mod calculus;
mod calculus_final;
mod calculus_limits;
mod kit;
mod trig;
mod trig_extra;

use indexmap::IndexMap;
use quizfig_core::{Diagram, DiagramName, Figure};
use rustc_hash::FxHashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown batch {name:?} (expected one of: {expected})")]
    UnknownBatch { name: String, expected: String },

    #[error("duplicate file name {file} in {}", .dir.display())]
    DuplicateFile { dir: PathBuf, file: String },

    #[error("{stem}: {source}")]
    Diagram {
        stem: &'static str,
        #[source]
        source: quizfig_core::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Builds the figure of one catalog entry.
pub type DiagramBuilder = fn() -> quizfig_core::Result<Figure>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Batch {
    /// Arithmetic and algebra, quizzes 278 and 279.
    ArithAlg,
    /// Trigonometry and conics, quiz 280.
    Trig,
    /// Second trigonometry set, quiz 280.
    TrigExtra,
    /// Calculus period I, quiz 281.
    Calculus,
    /// Calculus periods II and III (limits, derivatives, applications), quiz 281.
    CalculusLimits,
    /// Calculus final review, quiz 281.
    CalculusFinal,
}

impl Batch {
    pub const ALL: [Batch; 6] = [
        Batch::ArithAlg,
        Batch::Trig,
        Batch::TrigExtra,
        Batch::Calculus,
        Batch::CalculusLimits,
        Batch::CalculusFinal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Batch::ArithAlg => "arith-alg",
            Batch::Trig => "trig",
            Batch::TrigExtra => "trig-extra",
            Batch::Calculus => "calculus",
            Batch::CalculusLimits => "calculus-limits",
            Batch::CalculusFinal => "calculus-final",
        }
    }

    /// Relative to the working directory of the run.
    pub fn default_output_dir(&self) -> &'static str {
        match self {
            Batch::Calculus | Batch::CalculusLimits => "generated_images_calculus",
            Batch::ArithAlg | Batch::Trig | Batch::TrigExtra | Batch::CalculusFinal => {
                "imagenes temporales preguntas"
            }
        }
    }

    fn diagrams(&self) -> &'static [(&'static str, DiagramBuilder)] {
        match self {
            Batch::ArithAlg => arith_alg::DIAGRAMS,
            Batch::Trig => trig::DIAGRAMS,
            Batch::TrigExtra => trig_extra::DIAGRAMS,
            Batch::Calculus => calculus::DIAGRAMS,
            Batch::CalculusLimits => calculus_limits::DIAGRAMS,
            Batch::CalculusFinal => calculus_final::DIAGRAMS,
        }
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Batch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Batch::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownBatch {
                name: s.to_string(),
                expected: Batch::ALL.map(|b| b.name()).join(", "),
            })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub batch: Batch,
    /// File stem, e.g. `C21_P279_Q3781`.
    pub stem: &'static str,
    builder: DiagramBuilder,
}

impl CatalogEntry {
    pub fn name(&self) -> Result<DiagramName> {
        DiagramName::parse(self.stem).map_err(|source| Error::Diagram {
            stem: self.stem,
            source,
        })
    }

    pub fn build(&self) -> Result<Diagram> {
        let name = self.name()?;
        let figure = (self.builder)().map_err(|source| Error::Diagram {
            stem: self.stem,
            source,
        })?;
        tracing::debug!(
            batch = %self.batch,
            diagram = self.stem,
            elements = figure.elements.len(),
            "built diagram"
        );
        Ok(Diagram::new(name, figure))
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    batches: IndexMap<Batch, Vec<CatalogEntry>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Every built-in batch, in source order.
    pub fn builtin() -> Self {
        let mut batches = IndexMap::new();
        for batch in Batch::ALL {
            let entries = batch
                .diagrams()
                .iter()
                .map(|&(stem, builder)| CatalogEntry {
                    batch,
                    stem,
                    builder,
                })
                .collect();
            batches.insert(batch, entries);
        }
        Self { batches }
    }

    pub fn batches(&self) -> impl Iterator<Item = Batch> + '_ {
        self.batches.keys().copied()
    }

    pub fn entries(&self, batch: Batch) -> &[CatalogEntry] {
        self.batches.get(&batch).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.batches.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.batches.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, batch: Batch, stem: &str) -> Option<&CatalogEntry> {
        self.entries(batch).iter().find(|e| e.stem == stem)
    }

    /// Entries of `batch` (all batches when `None`) whose stem contains `only`, in source order.
    pub fn select(&self, batch: Option<Batch>, only: Option<&str>) -> Vec<&CatalogEntry> {
        self.iter()
            .filter(|e| batch.is_none_or(|b| e.batch == b))
            .filter(|e| only.is_none_or(|needle| e.stem.contains(needle)))
            .collect()
    }

    /// Fails when two entries would write the same file into the same default directory.
    pub fn check_unique(&self) -> Result<()> {
        let entries: Vec<&CatalogEntry> = self.iter().collect();
        check_destinations(&entries, |e| PathBuf::from(e.batch.default_output_dir()))
    }
}

/// Fails when two of `entries` would write the same file, given the directory each one is
/// written to.
pub fn check_destinations(
    entries: &[&CatalogEntry],
    dir_of: impl Fn(&CatalogEntry) -> PathBuf,
) -> Result<()> {
    let mut seen: FxHashSet<(PathBuf, &'static str)> = FxHashSet::default();
    for &entry in entries {
        let dir = dir_of(entry);
        if !seen.insert((dir.clone(), entry.stem)) {
            return Err(Error::DuplicateFile {
                dir,
                file: entry.stem.to_string(),
            });
        }
    }
    Ok(())
}
