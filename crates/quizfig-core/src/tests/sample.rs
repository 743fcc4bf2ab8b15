use crate::sample::{MAX_SAMPLES, SampledCurve};
use crate::*;

#[test]
fn linspace_includes_both_ends() {
    let v: Vec<f64> = linspace(-2.0, 2.0, 5).collect();
    assert_eq!(v, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
    assert_eq!(linspace(0.0, 1.0, 0).count(), 0);
    assert_eq!(linspace(3.0, 7.0, 1).collect::<Vec<_>>(), vec![3.0]);
    assert_eq!(linspace(0.0, 0.3, 4).last(), Some(0.3));
    assert_eq!(linspace(0.0, 1.0, 100).len(), 100);
}

#[test]
fn explicit_curve_samples_y_of_x() {
    let c = SampledCurve::new(CurveFn::explicit("2x + 1").unwrap(), -2.0, 2.0, 5);
    let pts: Vec<Sample> = c.samples().collect();
    assert_eq!(pts[0], Sample::Point(-2.0, -3.0));
    assert_eq!(pts[3], Sample::Point(1.0, 3.0));
    assert_eq!(pts.len(), 5);
}

#[test]
fn parametric_curve_traces_unit_circle() {
    let c = SampledCurve::new(
        CurveFn::parametric("cos(t)", "sin(t)").unwrap(),
        0.0,
        std::f64::consts::TAU,
        64,
    );
    for s in c.samples() {
        let Sample::Point(x, y) = s else {
            panic!("unexpected gap");
        };
        assert!((x.hypot(y) - 1.0).abs() < 1e-12);
    }
}

#[test]
fn samples_can_be_taken_more_than_once() {
    let c = SampledCurve::new(CurveFn::explicit("x^2").unwrap(), 0.0, 1.0, 11);
    assert_eq!(c.samples().count(), c.samples().count());
}

#[test]
fn non_finite_samples_split_segments() {
    // x = 2 is hit exactly by the grid.
    let c = SampledCurve::new(CurveFn::explicit("1/(x - 2)").unwrap(), 0.0, 4.0, 5);
    let segs = c.segments();
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0], vec![(0.0, -0.5), (1.0, -1.0)]);
    assert_eq!(segs[1], vec![(3.0, 1.0), (4.0, 0.5)]);
}

#[test]
fn exclusion_intervals_remove_samples_around_asymptotes() {
    let c = SampledCurve::new(CurveFn::explicit("1/(x - 2)").unwrap(), 0.0, 4.0, 41)
        .excluding(2.0, 0.1);
    let segs = c.segments();
    assert_eq!(segs.len(), 2);
    assert!(segs[0].iter().all(|(x, _)| *x < 1.9 + 1e-9));
    assert!(segs[1].iter().all(|(x, _)| *x > 2.1 - 1e-9));
}

#[test]
fn curve_validation_rejects_non_finite_domains() {
    let c = SampledCurve::new(CurveFn::explicit("x").unwrap(), 0.0, f64::INFINITY, 10);
    assert!(matches!(c.validate(), Err(Error::InvalidFigure { .. })));
}

#[test]
fn curve_validation_caps_the_sample_count() {
    let ok = SampledCurve::new(CurveFn::explicit("x").unwrap(), 0.0, 1.0, MAX_SAMPLES);
    assert!(ok.validate().is_ok());
    let huge = SampledCurve::new(CurveFn::explicit("x").unwrap(), 0.0, 1.0, MAX_SAMPLES + 1);
    assert!(matches!(huge.validate(), Err(Error::InvalidFigure { .. })));
}

#[test]
fn excluded_samples_are_not_counted_as_non_finite() {
    // ln(x) is non-finite for x <= 0; the pole at x = 3 is excluded.
    let c = SampledCurve::new(CurveFn::explicit("ln(x)/(x - 3)").unwrap(), -2.0, 6.0, 9)
        .excluding(3.0, 0.5);
    let (runs, non_finite) = c.split_runs();
    assert_eq!(non_finite, 3);
    assert_eq!(
        runs,
        vec![
            vec![(1.0, 0.0), (2.0, -(2f64.ln()))],
            vec![(4.0, 4f64.ln()), (5.0, 5f64.ln() / 2.0), (6.0, 6f64.ln() / 3.0)],
        ]
    );

    let masked_only = SampledCurve::new(CurveFn::explicit("1/(x - 2)").unwrap(), 0.0, 4.0, 41)
        .excluding(2.0, 0.1);
    assert_eq!(masked_only.split_runs().1, 0);
}
