use nalgebra::{
    Matrix4,
    RowVector4
};

use crate::math::curve::point2d::Point2D;

// ─────────────────────────────────────────────
// Cubic Hermite basis
// ─────────────────────────────────────────────
//
// [u³ u² u 1] · M gives the blend weights for
//   (p0, p1, m0, m1)
// where M is the canonical basis matrix below.
// Tangents are used as stored, they are not rescaled by the segment width.

fn hermite_basis() -> Matrix4<f64> {
    Matrix4::new(
         2.0, -2.0,  1.0,  1.0,
        -3.0,  3.0, -2.0, -1.0,
         0.0,  0.0,  1.0,  0.0,
         1.0,  0.0,  0.0,  0.0,
    )
}

/// Blend weights `(h00, h01, h10, h11)` for the local parameter `u ∈ [0, 1]`.
pub fn hermite_weights(u: f64) -> RowVector4<f64> {
    let parameters = RowVector4::new(u * u * u, u * u, u, 1.0);
    parameters * hermite_basis()
}

pub fn hermite_blend(u: f64, p0: f64, p1: f64, m0: f64, m1: f64) -> f64 {
    let control = RowVector4::new(p0, p1, m0, m1);
    hermite_weights(u).dot(&control)
}

/// Blends both axes; only the rendering path needs the time component.
pub fn hermite_blend_point(u: f64, p0: Point2D, p1: Point2D, m0: Point2D, m1: Point2D) -> Point2D {
    let weights = hermite_weights(u);
    let xs = RowVector4::new(p0.x(), p1.x(), m0.x(), m1.x());
    let ys = RowVector4::new(p0.y(), p1.y(), m0.y(), m1.y());
    Point2D::new(weights.dot(&xs), weights.dot(&ys))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn weights_select_endpoints() {
        let w0 = hermite_weights(0.0);
        assert_eq!((w0[0], w0[1], w0[2], w0[3]), (1.0, 0.0, 0.0, 0.0));
        let w1 = hermite_weights(1.0);
        assert_eq!((w1[0], w1[1], w1[2], w1[3]), (0.0, 1.0, 0.0, 0.0));
    }

    #[test]
    fn position_weights_sum_to_one() {
        for i in 0..=20 {
            let w = hermite_weights(i as f64 / 20.0);
            assert_abs_diff_eq!(w[0] + w[1], 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn tangent_weights_at_midpoint() {
        let w = hermite_weights(0.5);
        assert_abs_diff_eq!(w[2], 0.125, epsilon = 1e-12);
        assert_abs_diff_eq!(w[3], -0.125, epsilon = 1e-12);
    }

    #[test]
    fn blend_point_matches_scalar_blend() {
        let p0 = Point2D::new(0.0, 10.0);
        let p1 = Point2D::new(100.0, 30.0);
        let m0 = Point2D::new(5.0, 2.0);
        let m1 = Point2D::new(5.0, -4.0);
        let p = hermite_blend_point(0.3, p0, p1, m0, m1);
        assert_abs_diff_eq!(p.y(), hermite_blend(0.3, 10.0, 30.0, 2.0, -4.0), epsilon = 1e-12);
        assert_abs_diff_eq!(p.x(), hermite_blend(0.3, 0.0, 100.0, 5.0, 5.0), epsilon = 1e-12);
    }
}
