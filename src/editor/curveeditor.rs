use tracing::debug;

use crate::editor::viewport::{
    GridLine,
    Viewport
};
use crate::math::curve::keyframe::animationcurve::AnimationCurve;
use crate::math::curve::point2d::Point2D;

/// Samples drawn per curve segment.
const SAMPLES_PER_SEGMENT: usize = 100;

/// Outcome of a pointer gesture, for the caller to decide on a redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Selected(usize),
    Added(usize),
    Moved(usize),
    TangentAdjusted(usize),
    Removed(usize),
    Ignored
}

impl EditAction {
    pub fn changes_curve(&self) -> bool {
        matches!(
            self,
            EditAction::Added(_) | EditAction::Moved(_) | EditAction::TangentAdjusted(_) | EditAction::Removed(_)
        )
    }
}

/// A control point as drawn: the dot plus both ends of its handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointGlyph {
    pub center: Point2D,
    pub handle_ahead: Point2D,
    pub handle_behind: Point2D
}

/// Everything needed to paint the editor, in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveScene {
    pub grid: Vec<GridLine>,
    pub points: Vec<PointGlyph>,
    pub polyline: Vec<Point2D>
}

/// Pointer-driven editing of an [`AnimationCurve`].
///
/// Primary button: press picks a point or adds one, drag moves the pick,
/// drag with shift bends its tangent, release drops the pick. Secondary
/// button: press picks, release removes the pick.
#[derive(Debug, Clone)]
pub struct CurveEditor {
    viewport: Viewport,
    selected: Option<usize>
}

impl CurveEditor {
    pub fn new(viewport: Viewport) -> CurveEditor {
        CurveEditor { viewport, selected: None }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    fn pick(&self, curve: &AnimationCurve, canvas: Point2D) -> Option<usize> {
        let world = self.viewport.canvas_to_world(canvas);
        curve.point_near(world.x(), world.y())
    }

    /// World position under `canvas`, saturated into the curve's axis ranges
    /// so that gestures over the padding land on the plot edge.
    fn placement(&self, curve: &AnimationCurve, canvas: Point2D) -> Point2D {
        let world = self.viewport.canvas_to_world(canvas);
        Point2D::new(curve.time_range().clamp(world.x()), curve.value_range().clamp(world.y()))
    }

    pub fn press_primary(&mut self, curve: &mut AnimationCurve, canvas: Point2D) -> EditAction {
        if let Some(index) = self.pick(curve, canvas) {
            self.selected = Some(index);
            return EditAction::Selected(index);
        }
        let world = self.placement(curve, canvas);
        EditAction::Added(curve.add_point(world.x(), world.y()))
    }

    pub fn drag(&mut self, curve: &mut AnimationCurve, canvas: Point2D) -> EditAction {
        let Some(index) = self.selected else {
            return EditAction::Ignored;
        };
        let world = self.placement(curve, canvas);
        if curve.move_point(index, world.x(), world.y()) {
            EditAction::Moved(index)
        } else {
            EditAction::Ignored
        }
    }

    pub fn shift_drag(&mut self, curve: &mut AnimationCurve, canvas: Point2D) -> EditAction {
        let Some(index) = self.selected else {
            return EditAction::Ignored;
        };
        let handle = self.viewport.canvas_to_world(canvas);
        if curve.adjust_tangent(index, handle.x(), handle.y()) {
            EditAction::TangentAdjusted(index)
        } else {
            EditAction::Ignored
        }
    }

    pub fn release_primary(&mut self) {
        self.selected = None;
    }

    pub fn press_secondary(&mut self, curve: &AnimationCurve, canvas: Point2D) -> EditAction {
        match self.pick(curve, canvas) {
            Some(index) => {
                self.selected = Some(index);
                EditAction::Selected(index)
            },
            None => EditAction::Ignored
        }
    }

    pub fn release_secondary(&mut self, curve: &mut AnimationCurve) -> EditAction {
        let Some(index) = self.selected.take() else {
            return EditAction::Ignored;
        };
        match curve.remove_point(index) {
            Some(_) => EditAction::Removed(index),
            None => EditAction::Ignored
        }
    }

    pub fn scroll(&mut self, delta: f64) {
        self.viewport.scroll(delta);
        debug!(zoom = self.viewport.zoom(), "editor zoom changed");
    }

    pub fn scene(&self, curve: &AnimationCurve) -> CurveScene {
        let points = (0..curve.len())
            .filter_map(|i| {
                let center = curve.point(i)?;
                let (ahead, behind) = curve.handles(i)?;
                Some(PointGlyph {
                    center: self.viewport.world_to_canvas(center),
                    handle_ahead: self.viewport.world_to_canvas(ahead),
                    handle_behind: self.viewport.world_to_canvas(behind)
                })
            })
            .collect();
        let polyline = curve
            .sample_polyline(SAMPLES_PER_SEGMENT)
            .into_iter()
            .map(|p| self.viewport.world_to_canvas(p))
            .collect();
        CurveScene {
            grid: self.viewport.grid_lines(),
            points,
            polyline
        }
    }
}
