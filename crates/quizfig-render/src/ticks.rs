//! Tick placement and tick label formatting.

/// Evenly spaced "nice" values (steps of 1, 2 or 5 x 10^k) covering `[start, stop]`, aiming for
/// roughly `count` ticks. Values outside the interval are never returned.
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
        if !(count > 0.0) {
            return None;
        }

        let step = (stop - start) / count.max(0.0);
        if !step.is_finite() || step == 0.0 {
            return None;
        }
        let power = step.log10().floor();
        let error = step / 10f64.powf(power);
        let e10 = 50f64.sqrt();
        let e5 = 10f64.sqrt();
        let e2 = 2f64.sqrt();
        let factor = if error >= e10 {
            10.0
        } else if error >= e5 {
            5.0
        } else if error >= e2 {
            2.0
        } else {
            1.0
        };

        // A negative increment means "divide by": it keeps fractional steps exact.
        let (i1, i2, inc) = if power < 0.0 {
            let inc = 10f64.powf(-power) / factor;
            let mut i1 = (start * inc).round() as i64;
            let mut i2 = (stop * inc).round() as i64;
            if (i1 as f64) / inc < start {
                i1 += 1;
            }
            if (i2 as f64) / inc > stop {
                i2 -= 1;
            }
            (i1, i2, -inc)
        } else {
            let inc = 10f64.powf(power) * factor;
            let mut i1 = (start / inc).round() as i64;
            let mut i2 = (stop / inc).round() as i64;
            if (i1 as f64) * inc < start {
                i1 += 1;
            }
            if (i2 as f64) * inc > stop {
                i2 -= 1;
            }
            (i1, i2, inc)
        };

        if i2 < i1 && (0.5..2.0).contains(&count) {
            return tick_spec(start, stop, count * 2.0);
        }

        if !inc.is_finite() || inc == 0.0 {
            return None;
        }

        Some((i1, i2, inc))
    }

    if !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    let count = count as f64;
    if !(count > 0.0) {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (a, b) = if reverse {
        (stop, start)
    } else {
        (start, stop)
    };
    let Some((i1, i2, inc)) = tick_spec(a, b, count) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }

    let n = (i2 - i1 + 1).max(0) as usize;
    let value = |i: i64| {
        if inc < 0.0 {
            i as f64 / -inc
        } else {
            i as f64 * inc
        }
    };
    let mut out: Vec<f64> = (0..n).map(|k| value(i1 + k as i64)).collect();
    if reverse {
        out.reverse();
    }
    out
}

/// How many ticks fit along an axis of `length_px` when labels are `font_px` tall.
///
/// Horizontal axes reserve three label heights per tick, vertical axes two.
pub fn tick_budget(length_px: f64, font_px: f64, horizontal: bool) -> usize {
    let per_tick = font_px.max(1.0) * if horizontal { 3.0 } else { 2.0 };
    let n = (length_px.max(0.0) / per_tick).floor() as usize;
    n.clamp(2, 9)
}

fn decimals_needed(v: f64) -> usize {
    for d in 0..=6usize {
        let scale = 10f64.powi(d as i32);
        let r = (v * scale).round() / scale;
        if (r - v).abs() <= 1e-9 * v.abs().max(1.0) {
            return d;
        }
    }
    6
}

/// Formats tick values with one shared number of decimals and a typographic minus sign.
pub fn format_tick_labels(values: &[f64]) -> Vec<String> {
    let decimals = values
        .iter()
        .filter(|v| v.is_finite())
        .map(|v| decimals_needed(*v))
        .max()
        .unwrap_or(0);
    values
        .iter()
        .map(|v| format_tick(*v, decimals))
        .collect()
}

pub fn format_tick(v: f64, decimals: usize) -> String {
    if !v.is_finite() {
        return String::new();
    }
    let s = format!("{v:.decimals$}");
    let is_zero = s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.');
    match s.strip_prefix('-') {
        Some(_) if is_zero => s[1..].to_string(),
        Some(rest) => format!("\u{2212}{rest}"),
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_ticks_use_round_steps() {
        assert_eq!(
            nice_ticks(-2.2, 2.2, 9),
            vec![-2.0, -1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 2.0]
        );
        assert_eq!(nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(nice_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn nice_ticks_handle_reversed_and_degenerate_ranges() {
        assert_eq!(nice_ticks(10.0, 0.0, 5), vec![10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);
        assert_eq!(nice_ticks(3.0, 3.0, 5), vec![3.0]);
        assert!(nice_ticks(0.0, f64::NAN, 5).is_empty());
    }

    #[test]
    fn tick_labels_share_decimals_and_use_unicode_minus() {
        assert_eq!(
            format_tick_labels(&[-1.0, -0.5, 0.0, 0.5, 1.0]),
            vec!["\u{2212}1.0", "\u{2212}0.5", "0.0", "0.5", "1.0"]
        );
        assert_eq!(format_tick_labels(&[-2.0, 0.0, 2.0]), vec!["\u{2212}2", "0", "2"]);
        assert_eq!(format_tick(-0.0001, 2), "0.00");
    }

    #[test]
    fn tick_budget_is_clamped() {
        assert_eq!(tick_budget(10.0, 14.0, true), 2);
        assert_eq!(tick_budget(5000.0, 14.0, false), 9);
        assert_eq!(tick_budget(400.0, 14.0, true), 9);
        assert_eq!(tick_budget(300.0, 14.0, false), 9);
        assert_eq!(tick_budget(200.0, 14.0, true), 4);
    }
}
