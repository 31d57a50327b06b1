//! Dim alpha lookup and dim-amount computation.
//!
//! The interpolation is not linear interpolation. It is a fixed sequence of
//! truncating integer divisions plus a quadratic `sub` term, and the panel
//! calibration was tuned against exactly these outputs. Keep the order of
//! operations intact.

use crate::calibration::CalibrationTable;

/// Integer interpolation between `(xa, ya)` and `(xb, yb)` at `x`.
///
/// Every `/` and `%` truncates toward zero, as Rust integer division does.
/// Intermediates are widened to `i128` so no custom table can overflow;
/// for in-range inputs the result is identical to 32-bit arithmetic.
pub fn interpolate(x: i32, xa: i32, xb: i32, ya: i32, yb: i32) -> i32 {
    let (x, xa, xb, ya, yb) = (
        i128::from(x),
        i128::from(xa),
        i128::from(xb),
        i128::from(ya),
        i128::from(yb),
    );
    if xb == xa {
        return ya as i32;
    }
    let bf = ((yb - ya) * 2 * (x - xa)) / (xb - xa);
    let factor = bf / 2;
    let plus = bf % 2;
    let mut sub = 0;
    if yb != ya {
        sub = ((2 * (x - xa) * (x - xb)) / (yb - ya)) / (xa - xb);
    }
    (ya + factor + plus + sub).clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32
}

#[derive(Debug, Clone)]
pub struct DimCalculator {
    table: CalibrationTable,
    brightness_scale: f64,
}

impl DimCalculator {
    pub fn new(table: CalibrationTable, brightness_scale: f64) -> Self {
        Self {
            table,
            brightness_scale,
        }
    }

    pub fn table(&self) -> &CalibrationTable {
        &self.table
    }

    pub fn brightness_scale(&self) -> f64 {
        self.brightness_scale
    }

    /// Dim alpha for a panel brightness.
    ///
    /// Below the first entry yields the first alpha, above the last entry
    /// yields the last alpha, and anything else interpolates against the
    /// first entry whose brightness is `>=` the input.
    pub fn compute_dim_alpha(&self, brightness: i32) -> i32 {
        let points = self.table.points();
        let i = points.partition_point(|&(b, _)| b < brightness);
        if i == 0 {
            return points[0].1;
        }
        if i == points.len() {
            return points[points.len() - 1].1;
        }
        let (xa, ya) = points[i - 1];
        let (xb, yb) = points[i];
        interpolate(brightness, xa, xb, ya, yb)
    }

    /// Dim amount in `0..=255` for a framework brightness and icon dim percent.
    pub fn compute_dim_amount(&self, raw_brightness: i32, icon_dim_percent: f32) -> i32 {
        let cur = (f64::from(raw_brightness) * self.brightness_scale) as i32;
        let val = self.compute_dim_alpha(cur);
        let alpha = val as f32 / 255.0;
        let ratio = icon_dim_percent / 100.0;
        (alpha * ratio * 255.0) as i32
    }
}

impl Default for DimCalculator {
    fn default() -> Self {
        Self::new(CalibrationTable::reference(), crate::config::DEFAULT_BRIGHTNESS_SCALE)
    }
}

/// Parse an icon dim percent property value.
///
/// Returns `None` for anything that is not a finite number.
pub fn parse_icon_dim_percent(s: &str) -> Option<f32> {
    s.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::REFERENCE_TABLE;

    #[test]
    fn breakpoints_are_exact() {
        let calc = DimCalculator::default();
        for &(b, a) in &REFERENCE_TABLE {
            assert_eq!(calc.compute_dim_alpha(b), a, "breakpoint {b}");
        }
    }

    #[test]
    fn clamps_outside_table() {
        let calc = DimCalculator::default();
        assert_eq!(calc.compute_dim_alpha(-1), 255);
        assert_eq!(calc.compute_dim_alpha(i32::MIN), 255);
        assert_eq!(calc.compute_dim_alpha(2001), 131);
        assert_eq!(calc.compute_dim_alpha(i32::MAX), 131);
    }

    #[test]
    fn truncation_order_samples() {
        let calc = DimCalculator::default();
        // (45,204)-(70,190)
        assert_eq!(calc.compute_dim_alpha(50), 201);
        // plus and sub both -1: lands below both endpoints
        assert_eq!(calc.compute_dim_alpha(3), 234);
        // linear would round to 159
        assert_eq!(calc.compute_dim_alpha(175), 158);
        // sub contributes +5 on the wide (1023,34)-(2000,131) segment
        assert_eq!(calc.compute_dim_alpha(1500), 86);
    }

    #[test]
    fn interpolate_matches_hand_evaluation() {
        // bf = -140/25 = -5, factor = -2, plus = -1, sub = (-200/-14)/-25 = 0
        assert_eq!(interpolate(50, 45, 70, 204, 190), 201);
        // flat segment skips sub
        assert_eq!(interpolate(5, 0, 10, 100, 100), 100);
        // degenerate segment
        assert_eq!(interpolate(5, 5, 5, 10, 20), 10);
    }

    #[test]
    fn dim_amount_applies_scale_and_ratio() {
        let calc = DimCalculator::default();
        assert_eq!(calc.compute_dim_amount(0, 90.0), 229);
        assert_eq!(calc.compute_dim_amount(1, 90.0), 211);
        assert_eq!(calc.compute_dim_amount(100, 90.0), 100);
        assert_eq!(calc.compute_dim_amount(255, 90.0), 30);
        assert_eq!(calc.compute_dim_amount(500, 90.0), 117);
        assert_eq!(calc.compute_dim_amount(100, 0.0), 0);
    }

    #[test]
    fn icon_dim_percent_parsing() {
        assert_eq!(parse_icon_dim_percent("90"), Some(90.0));
        assert_eq!(parse_icon_dim_percent(" 75.5\n"), Some(75.5));
        assert_eq!(parse_icon_dim_percent("inf"), None);
        assert_eq!(parse_icon_dim_percent(""), None);
        assert_eq!(parse_icon_dim_percent("ninety"), None);
    }
}
