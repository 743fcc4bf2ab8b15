use quizfig_core::prelude::*;
use quizfig_core::{FigureDocument, RenderConfig};
use quizfig_render::svg::{SvgRenderOptions, render_figure_svg};
use quizfig_render::{LayoutOptions, layout_figure, render_svg};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn text_nodes(doc: &roxmltree::Document<'_>) -> Vec<String> {
    doc.descendants()
        .filter(|n| n.has_tag_name("text"))
        .map(|n| {
            n.children()
                .filter(|c| c.has_tag_name("tspan"))
                .filter_map(|c| c.text())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect()
}

#[test]
fn svg_root_matches_the_layout_size() {
    let mut fig = Figure::default().titled("Parabola");
    fig.add(Curve::explicit("x^2 - 1", -2.0, 2.0, 80).expect("expr"));
    let layout = layout_figure(&fig, &LayoutOptions::default()).expect("layout");
    let svg = render_figure_svg(&layout, &SvgRenderOptions::default());

    let doc = roxmltree::Document::parse(&svg).expect("well-formed svg");
    let root = doc.root_element();
    assert!(root.has_tag_name("svg"));
    assert_eq!(
        root.attribute("width").and_then(|v| v.parse::<f64>().ok()),
        Some(layout.width)
    );
    assert_eq!(
        root.attribute("height").and_then(|v| v.parse::<f64>().ok()),
        Some(layout.height)
    );
    assert!(root.attribute("viewBox").is_some());

    assert!(
        doc.descendants()
            .any(|n| n.has_tag_name("clipPath") && n.attribute("id") == Some("quizfig-axes"))
    );
    assert!(text_nodes(&doc).iter().any(|t| t == "Parabola"));
    assert!(
        doc.descendants()
            .any(|n| n.has_tag_name("g") && n.attribute("class") == Some("data"))
    );
}

#[test]
fn svg_escapes_label_text() {
    let mut fig = Figure::default();
    fig.axes.off();
    fig.add(Text::new(0.5, 0.5, "x < 2 & y > \"1\"").in_axes());
    let svg = render_svg(&fig, &LayoutOptions::default(), &SvgRenderOptions::default())
        .expect("render");

    let doc = roxmltree::Document::parse(&svg).expect("well-formed svg");
    assert_eq!(text_nodes(&doc), vec!["x < 2 & y > \"1\"".to_string()]);
}

#[test]
fn svg_multiline_text_uses_one_tspan_per_line() {
    let mut fig = Figure::default();
    fig.axes.off();
    fig.add(Text::new(0.1, 0.9, "Base = 4\nHeight = 3").in_axes());
    let svg = render_svg(&fig, &LayoutOptions::default(), &SvgRenderOptions::default())
        .expect("render");
    let doc = roxmltree::Document::parse(&svg).expect("well-formed svg");
    let tspans = doc.descendants().filter(|n| n.has_tag_name("tspan")).count();
    assert_eq!(tspans, 2);
}

#[test]
fn transparent_background_omits_the_backdrop() {
    let mut config = RenderConfig::default();
    config.set_value("background", serde_json::Value::from("transparent"));
    let fig = Figure::default();
    let svg = render_svg(
        &fig,
        &LayoutOptions::with_config(config),
        &SvgRenderOptions::default(),
    )
    .expect("render");
    assert!(!svg.contains(r#"class="background""#));

    let svg = render_svg(&fig, &LayoutOptions::default(), &SvgRenderOptions::default())
        .expect("render");
    assert!(svg.contains(r#"class="background""#));
}

#[test]
fn dashed_lines_carry_a_dash_array() {
    let mut fig = Figure::default();
    fig.add(RefLine::at(0.0).line_style(LineStyle::Dashed).horizontal());
    fig.add(Polyline::new(vec![(-1.0, -1.0), (1.0, 1.0)]));
    let svg = render_svg(&fig, &LayoutOptions::default(), &SvgRenderOptions::default())
        .expect("render");
    let doc = roxmltree::Document::parse(&svg).expect("well-formed svg");
    let dashed = doc
        .descendants()
        .filter(|n| n.has_tag_name("path") && n.attribute("stroke-dasharray").is_some())
        .count();
    assert_eq!(dashed, 1);
}

#[test]
fn fixture_documents_render() {
    let dir = workspace_root().join("fixtures").join("figures");
    let mut seen = 0;
    for entry in std::fs::read_dir(&dir).expect("fixtures dir") {
        let path = entry.expect("dir entry").path();
        let text = std::fs::read_to_string(&path).expect("fixture");
        let doc = FigureDocument::parse_for_path(&text, Some(&path))
            .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        let svg = render_svg(
            &doc.figure,
            &LayoutOptions::default(),
            &SvgRenderOptions::default(),
        )
        .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        roxmltree::Document::parse(&svg).expect("well-formed svg");
        seen += 1;
    }
    assert!(seen >= 3);
}
