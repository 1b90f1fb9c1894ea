//! SVG geometry for the analytics charts.
//!
//! Values are percentages in `[0, 100]`; 100 renders at the top of the chart.

use rand::Rng;
use serde::Serialize;

/// Weekly demand shown before any date is picked.
pub const DEFAULT_WEEK: [f64; 7] = [45.0, 52.0, 49.0, 62.0, 58.0, 40.0, 35.0];

pub const WEEK_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

/// Map samples to chart coordinates. Fewer than two samples yield no points.
pub fn chart_points(values: &[f64], width: f64, height: f64) -> Vec<ChartPoint> {
    if values.len() < 2 {
        return Vec::new();
    }
    let step_x = width / (values.len() - 1) as f64;
    values
        .iter()
        .enumerate()
        .map(|(i, value)| ChartPoint {
            x: i as f64 * step_x,
            y: height - (value / 100.0) * height,
        })
        .collect()
}

/// Smooth curve through the samples as an SVG path `d` attribute.
///
/// Each segment is a cubic Bézier whose control points sit at the horizontal
/// midpoint, one at each endpoint's height.
pub fn smooth_path(values: &[f64], width: f64, height: f64) -> String {
    let points = chart_points(values, width, height);
    let Some(first) = points.first() else {
        return String::new();
    };

    let mut d = format!("M {} {}", num(first.x), num(first.y));
    for pair in points.windows(2) {
        let (p0, p1) = (pair[0], pair[1]);
        let cp1x = p0.x + (p1.x - p0.x) / 2.0;
        let cp2x = p1.x - (p1.x - p0.x) / 2.0;
        d.push_str(&format!(
            " C {} {} {} {} {} {}",
            num(cp1x),
            num(p0.y),
            num(cp2x),
            num(p1.y),
            num(p1.x),
            num(p1.y)
        ));
    }
    d
}

// Shortest round-trip form, with negative zero printed as 0.
fn num(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Seven simulated daily demand samples, each an integer in `[30, 80)`.
pub fn random_week<R: Rng + ?Sized>(rng: &mut R) -> Vec<f64> {
    (0..WEEK_LABELS.len())
        .map(|_| f64::from(rng.gen_range(30u32..80)))
        .collect()
}

/// Bar widths (percent of the larger value) for a baseline vs event comparison.
pub fn scenario_widths(baseline: f64, event: f64) -> (f64, f64) {
    let max = baseline.max(event);
    if max <= 0.0 || !max.is_finite() {
        return (0.0, 0.0);
    }
    (baseline / max * 100.0, event / max * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn two_points_span_the_chart() {
        let path = smooth_path(&[0.0, 100.0], 100.0, 100.0);
        assert_eq!(path, "M 0 100 C 50 100 50 0 100 0");
    }

    #[test]
    fn fewer_than_two_samples_is_empty() {
        assert_eq!(smooth_path(&[], 600.0, 200.0), "");
        assert_eq!(smooth_path(&[42.0], 600.0, 200.0), "");
        assert!(chart_points(&[42.0], 600.0, 200.0).is_empty());
    }

    #[test]
    fn default_week_has_one_segment_per_gap() {
        let path = smooth_path(&DEFAULT_WEEK, 600.0, 200.0);
        assert!(path.starts_with("M 0 110 C 50 110 50 96 100 96"));
        assert_eq!(path.matches(" C ").count(), DEFAULT_WEEK.len() - 1);
        assert!(path.ends_with(" 600 130"));
    }

    #[test]
    fn path_is_deterministic() {
        let values = [12.5, 80.0, 33.0, 90.0];
        assert_eq!(
            smooth_path(&values, 300.0, 120.0),
            smooth_path(&values, 300.0, 120.0)
        );
    }

    #[test]
    fn random_week_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let week = random_week(&mut rng);
            assert_eq!(week.len(), 7);
            assert!(week.iter().all(|v| (30.0..80.0).contains(v) && v.fract() == 0.0));
        }
    }

    #[test]
    fn scenario_widths_relative_to_larger() {
        assert_eq!(scenario_widths(50.0, 200.0), (25.0, 100.0));
        assert_eq!(scenario_widths(0.0, 0.0), (0.0, 0.0));
    }
}
