use crate::model::Px;

pub(crate) fn polar_xy(radius: f64, angle: f64) -> (f64, f64) {
    // Zero points along +x and angles grow counter-clockwise, in data space (y up).
    (radius * angle.cos(), radius * angle.sin())
}

/// Start/end angles in degrees for each wedge. Sizes are normalized to a full turn.
pub(crate) fn wedge_angles(sizes: &[f64], start_angle: f64, clockwise: bool) -> Vec<(f64, f64)> {
    let total: f64 = sizes.iter().filter(|v| v.is_finite() && **v > 0.0).sum();
    if !(total > 0.0) {
        return Vec::new();
    }
    let sign = if clockwise { -1.0 } else { 1.0 };
    let mut theta = start_angle;
    let mut out = Vec::with_capacity(sizes.len());
    for size in sizes {
        let frac = if size.is_finite() { size.max(0.0) / total } else { 0.0 };
        let next = theta + sign * frac * 360.0;
        out.push((theta, next));
        theta = next;
    }
    out
}

/// Points along an arc from `theta1` to `theta2` (degrees), about two degrees apart. Sweeps past
/// a full turn are drawn as one turn.
pub(crate) fn arc_points(center: Px, radius: f64, theta1: f64, theta2: f64) -> Vec<Px> {
    let sweep = theta2 - theta1;
    if !sweep.is_finite() {
        return Vec::new();
    }
    let sweep = sweep.clamp(-360.0, 360.0);
    let n = ((sweep.abs() / 2.0).ceil() as usize).max(8);
    (0..=n)
        .map(|i| {
            let t = (theta1 + sweep * i as f64 / n as f64).to_radians();
            let (dx, dy) = polar_xy(radius, t);
            (center.0 + dx, center.1 + dy)
        })
        .collect()
}

/// A closed wedge outline in data coordinates. Full turns omit the center vertex.
pub(crate) fn wedge_polygon(center: Px, radius: f64, theta1: f64, theta2: f64) -> Vec<Px> {
    let mut pts = arc_points(center, radius, theta1, theta2);
    if (theta2 - theta1).abs() < 360.0 - 1e-9 {
        pts.push(center);
    } else {
        pts.pop();
    }
    pts
}
