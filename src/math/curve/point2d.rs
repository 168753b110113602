use std::cmp::Ordering;
use std::ops::{
    Add,
    Sub
};

use serde::{
    Deserialize,
    Serialize
};

/// A pair in curve space: `x` is time (ms), `y` is value (km/h).
///
/// Used for control points as well as for tangent offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Offset that leads from `self` to `target`.
    pub fn offset_to(&self, target: Point2D) -> Point2D {
        target - *self
    }

    /// Orders by `x` first and `y` second, NaN-safe.
    pub fn total_cmp(&self, other: &Point2D) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}
