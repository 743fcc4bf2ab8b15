use quizfig::render::HeadlessRenderer;
use quizfig::render::raster::{self, OutputFormat, RasterOptions};
use quizfig::{Diagram, DocumentFormat, FigureDocument, RenderConfig};
use quizfig_catalog::{Batch, Catalog, CatalogEntry};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    BadArgument(quizfig_catalog::Error),
    Io(std::io::Error),
    Model(quizfig::Error),
    Render(quizfig::render::HeadlessError),
    Raster(raster::RasterError),
    Catalog(quizfig_catalog::Error),
    Json(serde_json::Error),
    NothingSelected,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::BadArgument(err) => write!(f, "{err}\n\n{}", usage()),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Model(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Catalog(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::NothingSelected => write!(f, "No diagram matches the selection"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<quizfig::Error> for CliError {
    fn from(value: quizfig::Error) -> Self {
        Self::Model(value)
    }
}

impl From<quizfig::render::HeadlessError> for CliError {
    fn from(value: quizfig::render::HeadlessError) -> Self {
        Self::Render(value)
    }
}

impl From<raster::RasterError> for CliError {
    fn from(value: raster::RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<quizfig_catalog::Error> for CliError {
    fn from(value: quizfig_catalog::Error) -> Self {
        Self::Catalog(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    List,
    #[default]
    Run,
    Render,
    Layout,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    /// `None` selects every batch.
    batch: Option<Batch>,
    only: Option<String>,
    out_dir: Option<PathBuf>,
    out: Option<String>,
    format: OutputFormat,
    scale: f32,
    background: Option<String>,
    config: Option<PathBuf>,
    pretty: bool,
    input: Option<String>,
}

fn usage() -> &'static str {
    "quizfig\n\
\n\
USAGE:\n\
  quizfig list [--batch <name>]\n\
  quizfig [run] [--batch <name>|all] [--only <substring>] [--out-dir <dir>] [--format png|svg|jpg|pdf] [--scale <n>] [--background <color>] [--config <file>]\n\
  quizfig render [--format png|svg|jpg|pdf] [--scale <n>] [--background <color>] [--out <path>] [--config <file>] [<document>|-]\n\
  quizfig layout [--pretty] [--config <file>] [<document>|-]\n\
\n\
BATCHES:\n\
  arith-alg, trig, trig-extra, calculus, calculus-limits, calculus-final\n\
\n\
NOTES:\n\
  - run renders the built-in diagrams into each batch's default directory unless --out-dir is given.\n\
  - With --out-dir and more than one batch selected, each batch gets a subdirectory named after it.\n\
  - Existing files are overwritten; missing directories are created.\n\
  - <document> is a JSON, YAML or JSON5 figure document. If omitted or '-', it is read from stdin.\n\
  - render writes next to the input file (or ./out.<ext> for stdin); --out - writes to stdout.\n\
  - --config takes a JSON, YAML or JSON5 file overriding the render settings (dpi, fontSize, ...).\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "list" => args.command = Command::List,
            "run" => args.command = Command::Run,
            "render" => args.command = Command::Render,
            "layout" => args.command = Command::Layout,
            "--pretty" => args.pretty = true,
            "--batch" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.batch = match name.trim() {
                    "all" => None,
                    other => Some(other.parse::<Batch>().map_err(CliError::BadArgument)?),
                };
            }
            "--only" => {
                let Some(needle) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.only = Some(needle.clone());
            }
            "--out-dir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out_dir = Some(PathBuf::from(dir));
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.scale.is_finite() && args.scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(PathBuf::from(path));
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    // Only documents take a positional input.
    if args.input.is_some() && matches!(args.command, Command::List | Command::Run) {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn input_path(input: Option<&str>) -> Option<&Path> {
    match input {
        None | Some("-") => None,
        Some(path) => Some(Path::new(path)),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<RenderConfig, CliError> {
    let Some(path) = path else {
        return Ok(RenderConfig::site_defaults());
    };
    let text = std::fs::read_to_string(path)?;
    let format = DocumentFormat::from_path(path).unwrap_or_else(|| DocumentFormat::sniff(&text));
    Ok(RenderConfig::from_text(&text, format)?)
}

fn default_out_path(input: Option<&str>, ext: &str) -> PathBuf {
    match input_path(input) {
        Some(path) => path.with_extension(ext),
        None => PathBuf::from(format!("out.{ext}")),
    }
}

fn list(catalog: &Catalog, batch: Option<Batch>) {
    for b in catalog.batches().filter(|b| batch.is_none_or(|want| want == *b)) {
        println!("{b} ({})", b.default_output_dir());
        for entry in catalog.entries(b) {
            println!("  {}", entry.stem);
        }
    }
}

fn run_batches(
    args: &Args,
    renderer: &HeadlessRenderer,
    raster: &RasterOptions,
) -> Result<(), CliError> {
    let catalog = Catalog::builtin();
    let selected = catalog.select(args.batch, args.only.as_deref());
    if selected.is_empty() {
        return Err(CliError::NothingSelected);
    }

    // Batches may reuse a stem, so a shared --out-dir is split per batch.
    let several_batches = selected.windows(2).any(|w| w[0].batch != w[1].batch);
    let dir_of = |entry: &CatalogEntry| match &args.out_dir {
        Some(dir) if several_batches => dir.join(entry.batch.name()),
        Some(dir) => dir.clone(),
        None => PathBuf::from(entry.batch.default_output_dir()),
    };
    quizfig_catalog::check_destinations(&selected, &dir_of)?;

    for entry in selected {
        let diagram = entry.build()?;
        let dir = dir_of(entry);
        let path = raster::save_diagram(renderer, &diagram, &dir, args.format, raster)?;
        println!("Saved {}", path.display());
    }
    Ok(())
}

fn render_document(
    args: &Args,
    renderer: &HeadlessRenderer,
    raster: &RasterOptions,
) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let doc = FigureDocument::parse_for_path(&text, input_path(args.input.as_deref()))?;

    let svg = match doc.name {
        Some(name) => renderer.render_diagram_svg_sync(&Diagram::new(name, doc.figure))?,
        None => renderer.render_svg_sync(&doc.figure)?,
    };
    let bytes = match args.format {
        OutputFormat::Svg => svg.into_bytes(),
        OutputFormat::Png => raster::svg_to_png(&svg, raster)?,
        OutputFormat::Jpeg => raster::svg_to_jpeg(&svg, raster)?,
        OutputFormat::Pdf => raster::svg_to_pdf(&svg)?,
    };

    let out = args.out.clone().unwrap_or_else(|| {
        default_out_path(args.input.as_deref(), args.format.extension())
            .to_string_lossy()
            .to_string()
    });
    if out == "-" {
        std::io::stdout().lock().write_all(&bytes)?;
    } else {
        std::fs::write(&out, bytes)?;
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let renderer = HeadlessRenderer::new().with_config(config);
    let raster = RasterOptions {
        scale: args.scale,
        background: args.background.clone(),
        ..RasterOptions::default()
    };

    match args.command {
        Command::List => {
            list(&Catalog::builtin(), args.batch);
            Ok(())
        }
        Command::Run => run_batches(&args, &renderer, &raster),
        Command::Render => render_document(&args, &renderer, &raster),
        Command::Layout => {
            let text = read_input(args.input.as_deref())?;
            let doc = FigureDocument::parse_for_path(&text, input_path(args.input.as_deref()))?;
            let layout = renderer.layout_sync(&doc.figure)?;
            write_json(&layout, args.pretty)
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(err @ (CliError::Usage(_) | CliError::BadArgument(_))) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
