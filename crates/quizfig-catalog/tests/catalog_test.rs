use quizfig_catalog::{Batch, Catalog, Error, check_destinations};
use std::path::PathBuf;
use quizfig_core::prelude::*;
use quizfig_core::sample::Sample;
use quizfig_render::{LayoutOptions, layout_figure};

fn texts(figure: &Figure) -> Vec<&str> {
    figure
        .elements
        .iter()
        .filter_map(|e| match e {
            Element::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn batches_keep_source_order_and_sizes() {
    let catalog = Catalog::builtin();
    let sizes: Vec<(Batch, usize)> = catalog
        .batches()
        .map(|b| (b, catalog.entries(b).len()))
        .collect();
    assert_eq!(
        sizes,
        vec![
            (Batch::ArithAlg, 7),
            (Batch::Trig, 6),
            (Batch::TrigExtra, 5),
            (Batch::Calculus, 10),
            (Batch::CalculusLimits, 19),
            (Batch::CalculusFinal, 10),
        ]
    );
    assert_eq!(catalog.len(), 57);

    let first: Vec<&str> = catalog
        .entries(Batch::ArithAlg)
        .iter()
        .map(|e| e.stem)
        .take(2)
        .collect();
    assert_eq!(first, vec!["C21_P278_Q3732", "C21_P278_Q3735"]);
}

#[test]
fn file_names_are_unique_per_output_directory() {
    let catalog = Catalog::builtin();
    catalog.check_unique().expect("unique names");

    // The same stem may appear in batches that write to different directories.
    assert!(catalog.find(Batch::Calculus, "C21_P281_Q1_Inecuacion").is_some());
    assert!(
        catalog
            .find(Batch::CalculusFinal, "C21_P281_Q1_Inecuacion")
            .is_some()
    );
    assert_ne!(
        Batch::Calculus.default_output_dir(),
        Batch::CalculusFinal.default_output_dir()
    );
}

#[test]
fn shared_destination_reports_the_colliding_file() {
    let catalog = Catalog::builtin();
    let everything = catalog.select(None, None);

    let err = check_destinations(&everything, |_| PathBuf::from("out")).unwrap_err();
    let Error::DuplicateFile { dir, file } = err else {
        panic!("expected a duplicate file error");
    };
    assert_eq!(dir, PathBuf::from("out"));
    assert_eq!(file, "C21_P281_Q1_Inecuacion");

    check_destinations(&everything, |e| PathBuf::from("out").join(e.batch.name()))
        .expect("one directory per batch");
}

#[test]
fn every_diagram_builds_validates_and_lays_out() {
    let options = LayoutOptions::default();
    for entry in Catalog::builtin().iter() {
        let diagram = entry
            .build()
            .unwrap_or_else(|e| panic!("{}: {e}", entry.stem));
        assert_eq!(diagram.name.to_string(), entry.stem);
        diagram
            .figure
            .validate()
            .unwrap_or_else(|e| panic!("{}: {e}", entry.stem));
        let layout = layout_figure(&diagram.figure, &options)
            .unwrap_or_else(|e| panic!("{}: {e}", entry.stem));
        assert!(layout.width > 0.0 && layout.height > 0.0, "{}", entry.stem);
    }
}

#[test]
fn batch_names_round_trip() {
    for batch in Batch::ALL {
        assert_eq!(batch.name().parse::<Batch>().unwrap(), batch);
    }
    assert_eq!("Trig-Extra".parse::<Batch>().unwrap(), Batch::TrigExtra);
    let err = "geometry".parse::<Batch>().unwrap_err();
    assert!(matches!(err, Error::UnknownBatch { .. }));
    assert!(err.to_string().contains("calculus-limits"));
}

#[test]
fn default_output_dirs() {
    assert_eq!(
        Batch::ArithAlg.default_output_dir(),
        "imagenes temporales preguntas"
    );
    assert_eq!(
        Batch::CalculusLimits.default_output_dir(),
        "generated_images_calculus"
    );
}

#[test]
fn select_filters_by_batch_and_substring() {
    let catalog = Catalog::builtin();
    let all = catalog.select(None, None);
    assert_eq!(all.len(), catalog.len());

    let trig = catalog.select(Some(Batch::Trig), None);
    assert_eq!(trig.len(), 6);
    assert!(trig.iter().all(|e| e.batch == Batch::Trig));

    let parabolas: Vec<&str> = catalog
        .select(None, Some("Parabola"))
        .iter()
        .map(|e| e.stem)
        .collect();
    assert_eq!(
        parabolas,
        vec![
            "C21_P280_Q30_Parabola",
            "C21_P281_Q4_Parabola",
            "C21_P281_Q3_Parabola"
        ]
    );
    assert!(catalog.select(Some(Batch::Trig), Some("Q3781")).is_empty());
}

#[test]
fn right_triangle_has_its_labels_and_corner_marker() {
    let catalog = Catalog::builtin();
    let entry = catalog
        .find(Batch::Trig, "C21_P280_Q1_Right_Triangle")
        .expect("entry");
    let diagram = entry.build().unwrap();
    assert_eq!(diagram.name.question(), "Q1");
    assert_eq!(diagram.name.description(), Some("Right_Triangle"));

    let fig = &diagram.figure;
    assert_eq!(texts(fig), vec!["4", "3", "5", "θ"]);
    assert!(!fig.axes.visible);

    // Legs 4 and 3 meet at (4, 0); the right-angle marker hugs that corner.
    let corner = fig.elements.iter().any(|e| match e {
        Element::Polyline(p) => p.points == vec![(3.6, 0.0), (3.6, 0.4), (4.0, 0.4)],
        _ => false,
    });
    assert!(corner);
}

#[test]
fn slope_diagram_passes_through_its_slope_triangle() {
    let catalog = Catalog::builtin();
    let diagram = catalog
        .find(Batch::ArithAlg, "C21_P279_Q3781")
        .expect("entry")
        .build()
        .unwrap();
    assert_eq!(diagram.name.file_name("png"), "C21_P279_Q3781.png");

    let Some(Element::Curve(line)) = diagram.figure.elements.first() else {
        panic!("expected the line first");
    };
    assert_eq!(line.curve.domain, [-2.0, 2.0]);
    assert_eq!(line.curve.function.at(0.0), (0.0, 1.0));
    assert_eq!(line.curve.function.at(1.0), (1.0, 3.0));
    assert!(
        line.curve
            .samples()
            .all(|s| matches!(s, Sample::Point(x, y) if (y - (2.0 * x + 1.0)).abs() < 1e-9))
    );

    let labels = texts(&diagram.figure);
    assert!(labels.contains(&"1") && labels.contains(&"2"));
}

#[test]
fn asymptote_curve_is_split_at_the_pole() {
    let catalog = Catalog::builtin();
    let diagram = catalog
        .find(Batch::CalculusLimits, "C21_P281_Q15_Asintota")
        .expect("entry")
        .build()
        .unwrap();
    let Some(Element::Curve(curve)) = diagram.figure.elements.first() else {
        panic!("expected the curve first");
    };
    let runs = curve.curve.segments();
    assert_eq!(runs.len(), 2);
    assert!(runs[0].iter().all(|(x, _)| *x < 2.9));
    assert!(runs[1].iter().all(|(x, _)| *x > 3.1));
}

#[test]
fn fraction_pie_shades_three_of_four() {
    let diagram = Catalog::builtin()
        .find(Batch::ArithAlg, "C21_P278_Q3732")
        .expect("entry")
        .build()
        .unwrap();
    let Some(Element::Pie(pie)) = diagram.figure.elements.first() else {
        panic!("expected a pie");
    };
    assert_eq!(pie.sizes, vec![25.0; 4]);
    assert!(pie.clockwise);
    assert_eq!(pie.start_angle, 90.0);
    assert_eq!(pie.colors.iter().filter(|c| **c == Color::WHITE).count(), 1);
}
