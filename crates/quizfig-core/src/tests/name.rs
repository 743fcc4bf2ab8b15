use crate::*;

#[test]
fn diagram_name_joins_components() {
    let n = DiagramName::new("C21", "P279", "Q3781").unwrap();
    assert_eq!(n.file_name("png"), "C21_P279_Q3781.png");

    let n = n.with_description("Right_Triangle").unwrap();
    assert_eq!(n.to_string(), "C21_P279_Q3781_Right_Triangle");
}

#[test]
fn diagram_name_parses_stems() {
    let n = DiagramName::parse("C21_P281_Q10_Composicion").unwrap();
    assert_eq!(n.course(), "C21");
    assert_eq!(n.quiz(), "P281");
    assert_eq!(n.question(), "Q10");
    assert_eq!(n.description(), Some("Composicion"));

    let n = DiagramName::parse("C21_P280_Q_LawSines").unwrap();
    assert_eq!(n.question(), "Q");
    assert_eq!(n.description(), Some("LawSines"));

    let n: DiagramName = "C21_P278_Q3732".parse().unwrap();
    assert_eq!(n.description(), None);
}

#[test]
fn diagram_name_rejects_path_characters() {
    for bad in ["C21_P281", "C21/x_P1_Q1", "C21_P 1_Q1", "C21_P1_Q1_a.b"] {
        assert!(
            matches!(DiagramName::parse(bad), Err(Error::InvalidName { .. })),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn diagram_name_serde_validates() {
    let n: DiagramName = serde_json::from_value(serde_json::json!({
        "course": "C21", "quiz": "P281", "question": "Q3", "description": "Recta"
    }))
    .unwrap();
    assert_eq!(n.to_string(), "C21_P281_Q3_Recta");

    assert!(
        serde_json::from_value::<DiagramName>(serde_json::json!({
            "course": "C 21", "quiz": "P281", "question": "Q3"
        }))
        .is_err()
    );
}
