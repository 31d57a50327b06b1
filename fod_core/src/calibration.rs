//! Brightness → dim-alpha calibration table.

use crate::error::BuildError;

/// Stock panel table: (panel brightness, dim alpha).
pub const REFERENCE_TABLE: [(i32, i32); 21] = [
    (0, 255),
    (1, 241),
    (2, 236),
    (4, 235),
    (5, 234),
    (6, 232),
    (10, 228),
    (20, 220),
    (30, 212),
    (45, 204),
    (70, 190),
    (100, 179),
    (150, 166),
    (227, 144),
    (300, 131),
    (400, 112),
    (500, 96),
    (600, 83),
    (800, 60),
    (1023, 34),
    (2000, 131),
];

/// Immutable, non-empty table with strictly increasing brightness and
/// alpha values in `0..=255`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationTable {
    points: Vec<(i32, i32)>,
}

impl CalibrationTable {
    pub fn try_new(points: Vec<(i32, i32)>) -> Result<Self, BuildError> {
        if points.is_empty() {
            return Err(BuildError::InvalidCalibration(
                "table must have at least one entry".into(),
            ));
        }
        for (i, &(brightness, alpha)) in points.iter().enumerate() {
            if !(0..=255).contains(&alpha) {
                return Err(BuildError::InvalidCalibration(format!(
                    "alpha {alpha} at index {i} outside 0..=255"
                )));
            }
            if i > 0 && points[i - 1].0 >= brightness {
                return Err(BuildError::InvalidCalibration(format!(
                    "brightness must be strictly increasing (index {} = {}, index {} = {})",
                    i - 1,
                    points[i - 1].0,
                    i,
                    brightness
                )));
            }
        }
        Ok(Self { points })
    }

    pub fn reference() -> Self {
        Self {
            points: REFERENCE_TABLE.to_vec(),
        }
    }

    pub fn points(&self) -> &[(i32, i32)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> (i32, i32) {
        self.points[0]
    }

    pub fn last(&self) -> (i32, i32) {
        self.points[self.points.len() - 1]
    }
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self::reference()
    }
}

impl TryFrom<&[fod_config::CalibrationRow]> for CalibrationTable {
    type Error = BuildError;
    fn try_from(rows: &[fod_config::CalibrationRow]) -> Result<Self, Self::Error> {
        Self::try_new(rows.iter().map(|r| (r.brightness, r.alpha)).collect())
    }
}
