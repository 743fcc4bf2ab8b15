#![forbid(unsafe_code)]

//! `quizfig` renders the figures that accompany quiz questions: plots, triangles, unit circles
//! and similar diagrams, each written to a file named after its question
//! (e.g. `C21_P279_Q3781.png`).
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`quizfig::render`)
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use quizfig_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use quizfig_render::model::FigureLayout;
    pub use quizfig_render::svg::SvgRenderOptions;
    pub use quizfig_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use quizfig_render::{LayoutOptions, layout_figure};

    use quizfig_core::{Diagram, Figure, RenderConfig};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Model(#[from] quizfig_core::Error),
        #[error(transparent)]
        Render(#[from] quizfig_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token.
    ///
    /// Clip path ids are derived from the root id, so figures inlined into one document need
    /// distinct ids. The result starts with an ASCII letter and contains only `[A-Za-z0-9_.:-]`.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "q-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 4);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':' || ch == '.';
            out.push(if ok { ch } else { '-' });
        }

        let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_ok {
            out.insert_str(0, "q-");
        }

        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "q" {
            return "q-untitled".to_string();
        }
        out.to_string()
    }

    pub fn layout_figure_sync(figure: &Figure, layout: &LayoutOptions) -> Result<FigureLayout> {
        Ok(quizfig_render::layout_figure(figure, layout)?)
    }

    pub fn render_layout_svg(layout: &FigureLayout, svg_options: &SvgRenderOptions) -> String {
        quizfig_render::svg::render_figure_svg(layout, svg_options)
    }

    pub fn render_svg_sync(
        figure: &Figure,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let layout = layout_figure_sync(figure, layout_options)?;
        Ok(render_layout_svg(&layout, svg_options))
    }

    /// Bundles layout and SVG options so call sites pass one value.
    ///
    /// All work is CPU-bound; nothing here touches the filesystem except the `raster` helpers
    /// that write files.
    #[derive(Clone, Default)]
    pub struct HeadlessRenderer {
        pub layout: LayoutOptions,
        pub svg: SvgRenderOptions,
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_config(mut self, config: RenderConfig) -> Self {
            self.layout.config = config;
            self
        }

        pub fn config(&self) -> &RenderConfig {
            &self.layout.config
        }

        pub fn layout_sync(&self, figure: &Figure) -> Result<FigureLayout> {
            layout_figure_sync(figure, &self.layout)
        }

        pub fn render_svg_sync(&self, figure: &Figure) -> Result<String> {
            render_svg_sync(figure, &self.layout, &self.svg)
        }

        /// Renders a named diagram; the root SVG id is derived from the diagram name.
        pub fn render_diagram_svg_sync(&self, diagram: &Diagram) -> Result<String> {
            let mut svg = self.svg.clone();
            svg.diagram_id = Some(sanitize_svg_id(&diagram.name.to_string()));
            render_svg_sync(&diagram.figure, &self.layout, &svg)
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            diagram: &Diagram,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            let svg = self.render_diagram_svg_sync(diagram)?;
            raster::svg_to_png(&svg, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg_sync(
            &self,
            diagram: &Diagram,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            let svg = self.render_diagram_svg_sync(diagram)?;
            raster::svg_to_jpeg(&svg, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_pdf_sync(&self, diagram: &Diagram) -> raster::Result<Vec<u8>> {
            let svg = self.render_diagram_svg_sync(diagram)?;
            raster::svg_to_pdf(&svg)
        }
    }
}
