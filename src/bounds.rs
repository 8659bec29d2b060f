//! Axis-aligned bounding boxes of path geometry.
//!
//! Paths are handed to kurbo as a `BezPath`: smooth segments get their
//! reflected control points, elliptical arcs become cubics. Curves then
//! contribute their true extrema, not their control points.

use kurbo::{Affine, BezPath, ParamCurveExtrema, PathEl, Point, SvgArc, Vec2};

use crate::error::FitError;
use crate::path::{Command, Path, end_point};

/// Maximum distance between an arc and the cubics that stand in for it.
const ARC_TOLERANCE: f64 = 1e-9;

/// A rectangle in user space, stored as its extreme coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    /// The identity for [`Rect::union`]; contains nothing.
    pub const EMPTY: Rect = Rect {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }
}

impl From<kurbo::Rect> for Rect {
    fn from(r: kurbo::Rect) -> Self {
        let r = r.abs();
        Rect::new(r.x0, r.y0, r.x1, r.y1)
    }
}

impl Path {
    /// The path as kurbo elements, in absolute coordinates.
    ///
    /// H/V become lines, S/T become full curves, arcs become cubics. A
    /// command after `Z` other than a moveto restarts at the subpath start.
    pub fn to_bez_path(&self) -> BezPath {
        let abs;
        let path = if self.is_absolute() {
            self
        } else {
            abs = self.to_absolute();
            &abs
        };

        let mut bez = BezPath::new();
        let mut current = (0.0, 0.0);
        let mut start = (0.0, 0.0);
        let mut closed = false;
        // Control point available for reflection by a following S or T
        let mut last_cubic: Option<(f64, f64)> = None;
        let mut last_quad: Option<(f64, f64)> = None;

        for cmd in &path.commands {
            let mut cubic = None;
            let mut quad = None;

            if closed && !matches!(cmd, Command::MoveTo { .. }) {
                bez.move_to(start);
            }
            closed = false;

            match *cmd {
                Command::MoveTo { x, y, .. } => {
                    start = (x, y);
                    bez.move_to((x, y));
                }
                Command::LineTo { x, y, .. } => bez.line_to((x, y)),
                Command::HorizontalTo { x, .. } => bez.line_to((x, current.1)),
                Command::VerticalTo { y, .. } => bez.line_to((current.0, y)),
                Command::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                    ..
                } => {
                    bez.curve_to((x1, y1), (x2, y2), (x, y));
                    cubic = Some((x2, y2));
                }
                Command::SmoothCurveTo { x2, y2, x, y, .. } => {
                    bez.curve_to(reflect(last_cubic, current), (x2, y2), (x, y));
                    cubic = Some((x2, y2));
                }
                Command::QuadTo { x1, y1, x, y, .. } => {
                    bez.quad_to((x1, y1), (x, y));
                    quad = Some((x1, y1));
                }
                Command::SmoothQuadTo { x, y, .. } => {
                    let c = reflect(last_quad, current);
                    bez.quad_to(c, (x, y));
                    quad = Some(c);
                }
                Command::Arc {
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    x,
                    y,
                    ..
                } => {
                    let arc = SvgArc {
                        from: Point::from(current),
                        to: Point::new(x, y),
                        radii: Vec2::new(rx, ry),
                        x_rotation: x_axis_rotation.to_radians(),
                        large_arc,
                        sweep,
                    };
                    match kurbo::Arc::from_svg_arc(&arc) {
                        Some(arc) => {
                            arc.to_cubic_beziers(ARC_TOLERANCE, |p1, p2, p| bez.curve_to(p1, p2, p))
                        }
                        // Zero radius or coincident endpoints
                        None => bez.line_to(arc.to),
                    }
                }
                Command::ClosePath => {
                    bez.close_path();
                    closed = true;
                }
            }

            current = end_point(cmd, current, start);
            last_cubic = cubic;
            last_quad = quad;
        }

        bez
    }

    /// Tight bounding box of everything the path visits after `transform`,
    /// moveto points included.
    ///
    /// Paths holding a non-finite number get [`Rect::EMPTY`], which is not finite.
    pub fn bounds(&self, transform: Affine) -> Result<Rect, FitError> {
        if self.commands.is_empty() {
            return Err(FitError::InvalidPath("Path has no segments".into()));
        }
        if !self.commands.iter().all(Command::is_finite) {
            return Ok(Rect::EMPTY);
        }

        let mut bez = self.to_bez_path();
        bez.apply_affine(transform);
        if !bez.is_finite() {
            return Ok(Rect::EMPTY);
        }

        let mut rect = Rect::EMPTY;
        for el in bez.elements() {
            if let PathEl::MoveTo(p) = el {
                rect.include(p.x, p.y);
            }
        }
        for seg in bez.segments() {
            rect = rect.union(&seg.bounding_box().into());
        }

        Ok(rect)
    }
}

/// Reflection of the previous control point about the current point, or the
/// current point itself when the previous segment was of another kind.
fn reflect(control: Option<(f64, f64)>, current: (f64, f64)) -> (f64, f64) {
    match control {
        Some((cx, cy)) => (2.0 * current.0 - cx, 2.0 * current.1 - cy),
        None => current,
    }
}
