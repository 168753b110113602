use tracing::debug;

use crate::math::curve::axisrange::AxisRange;
use crate::math::curve::curve::Curve;
use crate::math::curve::keyframe::curveerror::CurveError;
use crate::math::curve::keyframe::curverecord::{
    CurveRecord,
    PointRecord,
    TangentRecord
};
use crate::math::curve::keyframe::hermite::{
    hermite_blend,
    hermite_blend_point
};
use crate::math::curve::point2d::Point2D;

/// Editable keyframe curve mapping time (ms) to value (km/h).
///
/// Control points are kept in insertion order. `tangents[i]` is the handle of
/// `points[i]`, stored as an offset from the point; every edit updates both
/// vectors at the same index. Ordering by time happens lazily whenever the
/// curve is evaluated or sampled.
#[derive(Debug, Clone)]
pub struct AnimationCurve {
    points: Vec<Point2D>,
    tangents: Vec<Point2D>,
    time_range: AxisRange,
    value_range: AxisRange
}

impl AnimationCurve {
    pub fn new(time_range: AxisRange, value_range: AxisRange) -> AnimationCurve {
        AnimationCurve {
            points: Vec::new(),
            tangents: Vec::new(),
            time_range,
            value_range
        }
    }

    /// Rebuilds a curve from its positional record. Points are taken verbatim,
    /// even when they fall outside the given ranges.
    pub fn from_record(record: &CurveRecord,
                       time_range: AxisRange,
                       value_range: AxisRange) -> Result<AnimationCurve, CurveError> {
        if !record.is_aligned() {
            return Err(CurveError::TangentCountMismatch {
                points: record.points.len(),
                tangents: record.tangents.len()
            });
        }
        let points = record.points
            .iter()
            .map(|p| Point2D::new(p.time, p.value))
            .collect();
        let tangents = record.tangents
            .iter()
            .map(|t| Point2D::new(t.time_offset, t.value_offset))
            .collect();
        Ok(AnimationCurve { points, tangents, time_range, value_range })
    }

    pub fn to_record(&self) -> CurveRecord {
        CurveRecord {
            points: self.points
                .iter()
                .map(|p| PointRecord { time: p.x(), value: p.y() })
                .collect(),
            tangents: self.tangents
                .iter()
                .map(|t| TangentRecord { time_offset: t.x(), value_offset: t.y() })
                .collect()
        }
    }

    pub fn time_range(&self) -> AxisRange {
        self.time_range
    }

    pub fn value_range(&self) -> AxisRange {
        self.value_range
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<Point2D> {
        self.points.get(index).copied()
    }

    pub fn tangent(&self, index: usize) -> Option<Point2D> {
        self.tangents.get(index).copied()
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn tangents(&self) -> &[Point2D] {
        &self.tangents
    }

    /// Handle assigned to freshly inserted points: flat, with a time reach
    /// proportional to the configured time span.
    pub fn default_tangent(&self) -> Point2D {
        Point2D::new((self.time_range.span() / 25.0).floor() + 1.0, 0.0)
    }

    /// Per-axis distance under which a pick lands on an existing point.
    pub fn pick_tolerance(&self) -> Point2D {
        Point2D::new(
            (self.time_range.span() / 100.0).floor() + 1.0,
            (self.value_range.span() / 100.0).floor() + 1.0
        )
    }

    /// Appends a control point as given, with the default tangent.
    pub fn add_point(&mut self, time: f64, value: f64) -> usize {
        let point = Point2D::new(time, value);
        self.points.push(point);
        self.tangents.push(self.default_tangent());
        debug!(time = point.x(), value = point.y(), "added control point");
        self.points.len() - 1
    }

    /// Returns `false` when `index` does not name a point.
    pub fn move_point(&mut self, index: usize, time: f64, value: f64) -> bool {
        match self.points.get_mut(index) {
            Some(point) => {
                *point = Point2D::new(time, value);
                true
            },
            None => false
        }
    }

    /// Sets the tangent of point `index` to the offset from the point to the
    /// handle position. Returns `false` when `index` does not name a point.
    pub fn adjust_tangent(&mut self, index: usize, handle_time: f64, handle_value: f64) -> bool {
        let Some(point) = self.point(index) else {
            return false;
        };
        self.tangents[index] = point.offset_to(Point2D::new(handle_time, handle_value));
        true
    }

    /// Returns the removed point and its tangent.
    pub fn remove_point(&mut self, index: usize) -> Option<(Point2D, Point2D)> {
        if index >= self.points.len() {
            return None;
        }
        let point = self.points.remove(index);
        let tangent = self.tangents.remove(index);
        debug!(index, time = point.x(), value = point.y(), "removed control point");
        Some((point, tangent))
    }

    /// Largest point time, `None` on an empty curve.
    pub fn duration(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.x())
            .reduce(f64::max)
    }

    /// `(point, tangent)` pairs ordered by time, ties broken by value.
    pub fn keyframes(&self) -> Vec<(Point2D, Point2D)> {
        let mut keyframes: Vec<(Point2D, Point2D)> = self.points
            .iter()
            .copied()
            .zip(self.tangents.iter().copied())
            .collect();
        keyframes.sort_by(|lhs, rhs| lhs.0.total_cmp(&rhs.0));
        keyframes
    }

    /// Hermite value at time `t`.
    ///
    /// The first time-ordered segment with `p0.time <= t <= p1.time` is used,
    /// so a time shared by two segments resolves to the earlier one. Outside
    /// the covered time span, and on curves with fewer than two points, the
    /// result is `0.0`.
    pub fn evaluate(&self, t: f64) -> f64 {
        let keyframes = self.keyframes();
        keyframes
            .windows(2)
            .find(|pair| pair[0].0.x() <= t && t <= pair[1].0.x())
            .map_or(0.0, |pair| {
                let (p0, m0) = pair[0];
                let (p1, m1) = pair[1];
                let width = p1.x() - p0.x();
                if width == 0.0 {
                    return p0.y();
                }
                let u = (t - p0.x()) / width;
                hermite_blend(u, p0.y(), p1.y(), m0.y(), m1.y())
            })
    }

    /// Both ends of the handle drawn through point `index`.
    pub fn handles(&self, index: usize) -> Option<(Point2D, Point2D)> {
        let point = self.point(index)?;
        let tangent = self.tangent(index)?;
        Some((point + tangent, point - tangent))
    }

    /// First point (in insertion order) within the pick tolerance.
    pub fn point_near(&self, time: f64, value: f64) -> Option<usize> {
        let tolerance = self.pick_tolerance();
        self.points
            .iter()
            .position(|p| {
                (p.x() - time).abs() < tolerance.x() && (p.y() - value).abs() < tolerance.y()
            })
    }

    /// Samples every segment at `samples_per_segment` evenly spaced
    /// parameters (ends included), blending both axes. Empty below two points.
    pub fn sample_polyline(&self, samples_per_segment: usize) -> Vec<Point2D> {
        if self.points.len() < 2 || samples_per_segment == 0 {
            return Vec::new();
        }
        let steps = samples_per_segment.saturating_sub(1).max(1) as f64;
        let keyframes = self.keyframes();
        let mut polyline = Vec::with_capacity((keyframes.len() - 1) * samples_per_segment);
        for pair in keyframes.windows(2) {
            let (p0, m0) = pair[0];
            let (p1, m1) = pair[1];
            for i in 0..samples_per_segment {
                let u = i as f64 / steps;
                polyline.push(hermite_blend_point(u, p0, p1, m0, m1));
            }
        }
        polyline
    }
}

impl Curve for AnimationCurve {
    fn value(&self, x: f64) -> f64 {
        self.evaluate(x)
    }

    fn knot_count(&self) -> usize {
        self.len()
    }

    fn max_x(&self) -> Option<f64> {
        self.duration()
    }
}
