#![forbid(unsafe_code)]

//! Headless layout and SVG rendering for quiz figures.
//!
//! [`layout_figure`] resolves a [`quizfig_core::Figure`] into pixel geometry
//! ([`model::FigureLayout`]); [`svg::render_figure_svg`] serializes that geometry.

pub mod layout;
mod legend;
pub mod model;
mod pie;
pub mod scale;
pub mod svg;
pub mod text;
pub mod ticks;

use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use quizfig_core::{Figure, RenderConfig};
use std::sync::Arc;

pub use layout::layout_figure;
pub use model::FigureLayout;
pub use svg::{SvgRenderOptions, render_figure_svg};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid figure: {message}")]
    InvalidFigure { message: String },
    #[error(transparent)]
    Core(#[from] quizfig_core::Error),
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub config: RenderConfig,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            config: RenderConfig::default(),
        }
    }
}

impl LayoutOptions {
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}

/// Lays out and serializes a figure in one step.
pub fn render_svg(
    figure: &Figure,
    layout: &LayoutOptions,
    svg: &SvgRenderOptions,
) -> Result<String> {
    let laid_out = layout_figure(figure, layout)?;
    Ok(render_figure_svg(&laid_out, svg))
}

/// The layout as pretty JSON, for debugging and snapshot tests.
pub fn layout_json(figure: &Figure, layout: &LayoutOptions) -> Result<String> {
    let laid_out = layout_figure(figure, layout)?;
    Ok(serde_json::to_string_pretty(&laid_out)?)
}
