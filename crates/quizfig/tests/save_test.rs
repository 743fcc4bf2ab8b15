use quizfig::prelude::*;
use quizfig::render::HeadlessRenderer;
use quizfig::render::raster::{OutputFormat, RasterOptions, save_diagram};

fn sample_diagram() -> Diagram {
    let mut fig = Figure::new(4.0, 3.0);
    fig.add(Curve::explicit("2*x + 1", -2.0, 2.0, 40).expect("expr"));
    fig.add(Text::new(0.0, 1.0, "(0, 1)"));
    Diagram::new(DiagramName::new("C21", "P279", "Q3781").expect("name"), fig)
}

fn png_size(bytes: &[u8]) -> (u32, u32) {
    let decoder = png::Decoder::new(bytes);
    let reader = decoder.read_info().expect("png header");
    let info = reader.info();
    (info.width, info.height)
}

#[test]
fn save_diagram_writes_a_named_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out_dir = dir.path().join("nested").join("images");
    let renderer = HeadlessRenderer::new();
    let diagram = sample_diagram();

    let path = save_diagram(
        &renderer,
        &diagram,
        &out_dir,
        OutputFormat::Png,
        &RasterOptions::default(),
    )
    .expect("saved");

    assert_eq!(path, out_dir.join("C21_P279_Q3781.png"));
    let bytes = std::fs::read(&path).expect("read back");
    let (w, h) = png_size(&bytes);
    let layout = renderer.layout_sync(&diagram.figure).expect("layout");
    assert_eq!((w as f64, h as f64), (layout.width, layout.height));
}

#[test]
fn save_diagram_overwrites_existing_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("C21_P279_Q3781.png");
    std::fs::write(&target, b"stale").expect("seed");

    let path = save_diagram(
        &HeadlessRenderer::new(),
        &sample_diagram(),
        dir.path(),
        OutputFormat::Png,
        &RasterOptions::default(),
    )
    .expect("saved");
    assert_eq!(path, target);
    let bytes = std::fs::read(&path).expect("read back");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn save_diagram_supports_svg_and_pdf() {
    let dir = tempfile::tempdir().expect("tempdir");
    let renderer = HeadlessRenderer::new();
    let diagram = sample_diagram();

    let svg = save_diagram(
        &renderer,
        &diagram,
        dir.path(),
        OutputFormat::Svg,
        &RasterOptions::default(),
    )
    .expect("svg");
    let text = std::fs::read_to_string(&svg).expect("svg text");
    let doc = roxmltree::Document::parse(&text).expect("well-formed");
    assert_eq!(doc.root_element().attribute("id"), Some("C21_P279_Q3781"));

    let pdf = save_diagram(
        &renderer,
        &diagram,
        dir.path(),
        OutputFormat::Pdf,
        &RasterOptions::default(),
    )
    .expect("pdf");
    assert!(pdf.ends_with("C21_P279_Q3781.pdf"));
    assert!(std::fs::read(&pdf).expect("pdf bytes").starts_with(b"%PDF-"));
}

#[test]
fn scale_multiplies_the_pixel_size() {
    let renderer = HeadlessRenderer::new();
    let diagram = sample_diagram();
    let one = renderer
        .render_png_sync(&diagram, &RasterOptions::default())
        .expect("png");
    let two = renderer
        .render_png_sync(
            &diagram,
            &RasterOptions {
                scale: 2.0,
                ..RasterOptions::default()
            },
        )
        .expect("png");
    let (w1, h1) = png_size(&one);
    let (w2, h2) = png_size(&two);
    assert_eq!((w2, h2), (w1 * 2, h1 * 2));
}
