use quizfig_core::figure::Coords;
use quizfig_core::geom::Bounds;
use serde::{Deserialize, Serialize};

/// Affine map from a data interval onto a pixel interval. Either interval may be reversed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, v: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if r1 == r0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Pixels per data unit (always non-negative).
    pub fn pixels_per_unit(&self) -> f64 {
        let span = (self.domain[1] - self.domain[0]).abs();
        if span == 0.0 {
            return 0.0;
        }
        (self.range[1] - self.range[0]).abs() / span
    }

    pub fn contains(&self, v: f64) -> bool {
        let lo = self.domain[0].min(self.domain[1]);
        let hi = self.domain[0].max(self.domain[1]);
        let eps = (hi - lo) * 1e-9;
        v >= lo - eps && v <= hi + eps
    }
}

/// Data and axes-fraction coordinates to canvas pixels (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesTransform {
    pub x: LinearScale,
    pub y: LinearScale,
    pub frame: Bounds,
}

impl AxesTransform {
    pub fn new(xlim: [f64; 2], ylim: [f64; 2], frame: Bounds) -> Self {
        Self {
            x: LinearScale::new(xlim, [frame.min_x, frame.max_x]),
            y: LinearScale::new(ylim, [frame.max_y, frame.min_y]),
            frame,
        }
    }

    pub fn data(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (self.x.map(x), self.y.map(y))
    }

    pub fn axes(&self, (fx, fy): (f64, f64)) -> (f64, f64) {
        (
            self.frame.min_x + fx * self.frame.width(),
            self.frame.max_y - fy * self.frame.height(),
        )
    }

    pub fn to_px(&self, coords: Coords, p: (f64, f64)) -> (f64, f64) {
        match coords {
            Coords::Data => self.data(p),
            Coords::Axes => self.axes(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_scale_maps_and_inverts() {
        let s = LinearScale::new([-2.0, 2.0], [100.0, 500.0]);
        assert_eq!(s.map(0.0), 300.0);
        assert_eq!(s.map(2.0), 500.0);
        assert_eq!(s.invert(400.0), 1.0);
        assert_eq!(s.pixels_per_unit(), 100.0);
    }

    #[test]
    fn axes_transform_flips_y() {
        let frame = Bounds {
            min_x: 10.0,
            min_y: 20.0,
            max_x: 110.0,
            max_y: 220.0,
        };
        let t = AxesTransform::new([0.0, 1.0], [0.0, 1.0], frame);
        assert_eq!(t.data((0.0, 0.0)), (10.0, 220.0));
        assert_eq!(t.data((1.0, 1.0)), (110.0, 20.0));
        assert_eq!(t.axes((0.5, 0.5)), (60.0, 120.0));
    }
}
