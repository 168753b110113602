use crate::math::curve::axisrange::AxisRange;
use crate::math::curve::point2d::Point2D;

const ZOOM_STEP: f64 = 1.1;
const TIME_GRID_LINES: usize = 11;
const VALUE_GRID_LINES: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64
}

impl Default for Padding {
    fn default() -> Self {
        Padding { top: 25.0, right: 25.0, bottom: 50.0, left: 75.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    /// Vertical line at a time tick.
    Time,
    /// Horizontal line at a value tick.
    Value
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub axis: GridAxis,
    /// Canvas x for time lines, canvas y for value lines.
    pub position: f64,
    /// Present only when the tick lies inside the plot area.
    pub label: Option<String>
}

/// Maps curve space (ms, km/h) onto a padded canvas with y pointing down.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    padding: Padding,
    zoom: f64,
    time_range: AxisRange,
    value_range: AxisRange
}

impl Viewport {
    pub fn new(width: f64, height: f64, time_range: AxisRange, value_range: AxisRange) -> Viewport {
        Viewport {
            width,
            height,
            padding: Padding::default(),
            zoom: 1.0,
            time_range,
            value_range
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Wheel handling: positive deltas zoom in, negative ones zoom out.
    pub fn scroll(&mut self, delta: f64) {
        if delta > 0.0 {
            self.zoom *= ZOOM_STEP;
        } else if delta < 0.0 {
            self.zoom /= ZOOM_STEP;
        }
    }

    fn plot_size(&self) -> (f64, f64) {
        (
            self.width - self.padding.left - self.padding.right,
            self.height - self.padding.top - self.padding.bottom
        )
    }

    pub fn world_to_canvas(&self, world: Point2D) -> Point2D {
        let (plot_width, plot_height) = self.plot_size();
        let u = (world.x() - self.time_range.min()) / self.time_range.span();
        let v = (world.y() - self.value_range.min()) / self.value_range.span();
        Point2D::new(
            self.padding.left + u * plot_width * self.zoom,
            self.padding.top + plot_height - v * plot_height * self.zoom
        )
    }

    pub fn canvas_to_world(&self, canvas: Point2D) -> Point2D {
        let (plot_width, plot_height) = self.plot_size();
        let u = (canvas.x() - self.padding.left) / (plot_width * self.zoom);
        let v = (plot_height - (canvas.y() - self.padding.top)) / (plot_height * self.zoom);
        Point2D::new(
            u * self.time_range.span() + self.time_range.min(),
            v * self.value_range.span() + self.value_range.min()
        )
    }

    /// Dashed guide lines: 11 time ticks labelled in seconds, 13 value ticks
    /// labelled in km/h.
    pub fn grid_lines(&self) -> Vec<GridLine> {
        let time_lines = self.time_range
            .linspace(TIME_GRID_LINES)
            .into_iter()
            .map(|time| {
                let position = self.world_to_canvas(Point2D::new(time, 0.0)).x();
                let visible = self.padding.left <= position && position <= self.width - self.padding.right;
                GridLine {
                    axis: GridAxis::Time,
                    position,
                    label: visible.then(|| format!("{:.1} s", time / 1000.0))
                }
            });
        let value_lines = self.value_range
            .linspace(VALUE_GRID_LINES)
            .into_iter()
            .map(|value| {
                let position = self.world_to_canvas(Point2D::new(0.0, value)).y();
                let visible = self.padding.top <= position && position <= self.height - self.padding.bottom;
                GridLine {
                    axis: GridAxis::Value,
                    position,
                    label: visible.then(|| format!("{value:.0} km/h"))
                }
            });
        time_lines.chain(value_lines).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 400.0, AxisRange::new(0.0, 10000.0), AxisRange::new(0.0, 120.0))
    }

    #[test]
    fn corners_map_to_plot_area() {
        let vp = viewport();
        assert_eq!(vp.world_to_canvas(Point2D::new(0.0, 0.0)), Point2D::new(75.0, 350.0));
        assert_eq!(vp.world_to_canvas(Point2D::new(10000.0, 120.0)), Point2D::new(775.0, 25.0));
    }

    #[test]
    fn canvas_round_trip_under_zoom() {
        let mut vp = viewport();
        vp.scroll(1.0);
        vp.scroll(1.0);
        vp.scroll(-1.0);
        assert_abs_diff_eq!(vp.zoom(), 1.1, epsilon = 1e-12);
        let world = Point2D::new(3210.0, 47.5);
        let back = vp.canvas_to_world(vp.world_to_canvas(world));
        assert_abs_diff_eq!(back.x(), world.x(), epsilon = 1e-9);
        assert_abs_diff_eq!(back.y(), world.y(), epsilon = 1e-9);
    }

    #[test]
    fn grid_labels_inside_plot() {
        let vp = viewport();
        let lines = vp.grid_lines();
        assert_eq!(lines.len(), 24);
        assert_eq!(lines[0].label.as_deref(), Some("0.0 s"));
        assert_eq!(lines[10].label.as_deref(), Some("10.0 s"));
        assert_eq!(lines[11].label.as_deref(), Some("0 km/h"));
        assert_eq!(lines[23].label.as_deref(), Some("120 km/h"));

        let mut zoomed = viewport();
        zoomed.scroll(1.0);
        let lines = zoomed.grid_lines();
        assert_eq!(lines[10].label, None);
    }
}
