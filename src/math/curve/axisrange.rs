use serde::{
    Deserialize,
    Serialize
};

/// Closed interval `[min, max]` bounding one axis of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct AxisRange {
    min: f64,
    max: f64
}

impl AxisRange {
    /// Bounds given in reverse order are swapped.
    pub fn new(min: f64, max: f64) -> AxisRange {
        if min <= max {
            AxisRange { min, max }
        } else {
            AxisRange { min: max, max: min }
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }

    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }

    /// `count` evenly spaced values from `min` to `max`, both included.
    pub fn linspace(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.min],
            _ => {
                let step = self.span() / (count - 1) as f64;
                (0..count)
                    .map(|i| self.min + step * i as f64)
                    .collect()
            }
        }
    }
}

impl From<(f64, f64)> for AxisRange {
    fn from(bounds: (f64, f64)) -> AxisRange {
        AxisRange::new(bounds.0, bounds.1)
    }
}

impl From<AxisRange> for (f64, f64) {
    fn from(range: AxisRange) -> (f64, f64) {
        (range.min, range.max)
    }
}
