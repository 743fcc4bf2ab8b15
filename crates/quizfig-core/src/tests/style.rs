use crate::style::{FormatSpec, LineStyle, MarkerShape};
use crate::*;

#[test]
fn format_spec_parses_color_and_line() {
    let f = FormatSpec::parse("r--").unwrap();
    assert_eq!(f.color, Some(Color::RED));
    assert_eq!(f.line, Some(LineStyle::Dashed));
    assert_eq!(f.marker, None);
    assert_eq!(f.line_style(), LineStyle::Dashed);
}

#[test]
fn format_spec_marker_only_means_no_line() {
    let f = FormatSpec::parse("bo").unwrap();
    assert_eq!(f.marker, Some(MarkerShape::Circle));
    assert_eq!(f.line_style(), LineStyle::None);

    let f = FormatSpec::parse("ko-").unwrap();
    assert_eq!(f.line_style(), LineStyle::Solid);
    assert_eq!(f.color, Some(Color::BLACK));
}

#[test]
fn format_spec_handles_dotted_and_dashdot() {
    assert_eq!(FormatSpec::parse("k:").unwrap().line, Some(LineStyle::Dotted));
    assert_eq!(FormatSpec::parse("g-.").unwrap().line, Some(LineStyle::DashDot));
    assert_eq!(FormatSpec::parse("").unwrap().line_style(), LineStyle::Solid);
}

#[test]
fn format_spec_accepts_whole_color_names() {
    let f = FormatSpec::parse("purple").unwrap();
    assert_eq!(f.color, Some(Color::PURPLE));
    assert_eq!(f.line_style(), LineStyle::Solid);

    let f = FormatSpec::parse("C3--").unwrap();
    assert_eq!(f.color, Some(Color::parse("C3").unwrap()));
    assert_eq!(f.line, Some(LineStyle::Dashed));
}

#[test]
fn format_spec_rejects_duplicates_and_unknown_codes() {
    assert!(matches!(
        FormatSpec::parse("rb"),
        Err(Error::InvalidFormat { .. })
    ));
    assert!(matches!(
        FormatSpec::parse("--:"),
        Err(Error::InvalidFormat { .. })
    ));
    assert!(matches!(
        FormatSpec::parse("r?"),
        Err(Error::InvalidFormat { .. })
    ));
}

#[test]
fn line_style_dash_patterns() {
    assert_eq!(LineStyle::Dashed.dash_pattern(), Some(&[3.7, 1.6][..]));
    assert_eq!(LineStyle::Solid.dash_pattern(), None);
    assert_eq!(LineStyle::parse("dashdot"), Some(LineStyle::DashDot));
    assert!(!LineStyle::None.is_visible());
}
