pub trait Curve {
    fn value(&self, x: f64) -> f64;

    /// Number of control points the curve is built from.
    fn knot_count(&self) -> usize;

    fn max_x(&self) -> Option<f64>;
}
