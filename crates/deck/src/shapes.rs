//! Diagram shapes
//!
//! Geometry for the non-text objects of the deck: the pendulum diagram, the
//! convection cell and the 3D axes of the Lorenz scene. Shapes live in scene
//! space; `z` points toward the viewer and is zero for flat diagrams.

use equation_layout::{Color, Point, Rect, RenderOutput, RenderPrimitive};
use serde::{Deserialize, Serialize};

/// Default stroke width for lines, arcs and axes
pub const STROKE_WIDTH: f32 = 2.0;

/// A point in scene space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Front-view projection
    pub fn flatten(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<Point> for Point3 {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y, 0.0)
    }
}

/// A drawable non-text object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    /// Filled disc: pivot, pendulum bobs, number badges
    Dot {
        center: Point3,
        radius: f32,
        color: Color,
    },
    /// Straight segment, optionally dashed or ending in an arrow head
    Line {
        start: Point3,
        end: Point3,
        color: Color,
        dashed: bool,
        tip: bool,
    },
    /// Circular arc; angles in radians, counter-clockwise from +x
    Arc {
        center: Point,
        radius: f32,
        start_angle: f32,
        angle: f32,
        tip: bool,
    },
    /// Rectangle, rounded when `corner_radius` is non-zero
    Rectangle {
        rect: Rect,
        corner_radius: f32,
        fill: Option<Color>,
        stroke: Option<Color>,
    },
    /// Plane axes through `origin`, reaching `x_extent`/`y_extent` each way
    Axes {
        origin: Point,
        x_extent: f32,
        y_extent: f32,
    },
    /// Three perpendicular axes through `origin`
    Axes3D { origin: Point3, extent: f32 },
}

impl Shape {
    pub fn dot(center: impl Into<Point3>, radius: f32, color: Color) -> Self {
        Shape::Dot {
            center: center.into(),
            radius,
            color,
        }
    }

    pub fn line(start: impl Into<Point3>, end: impl Into<Point3>) -> Self {
        Shape::Line {
            start: start.into(),
            end: end.into(),
            color: Color::WHITE,
            dashed: false,
            tip: false,
        }
    }

    pub fn dashed_line(start: impl Into<Point3>, end: impl Into<Point3>) -> Self {
        Shape::Line {
            start: start.into(),
            end: end.into(),
            color: Color::WHITE,
            dashed: true,
            tip: false,
        }
    }

    pub fn arrow(start: impl Into<Point3>, end: impl Into<Point3>) -> Self {
        Shape::Line {
            start: start.into(),
            end: end.into(),
            color: Color::WHITE,
            dashed: false,
            tip: true,
        }
    }

    /// Where an arrow head sits, or the far end of a plain line
    pub fn end_point(&self) -> Option<Point> {
        match self {
            Shape::Line { end, .. } => Some(end.flatten()),
            _ => None,
        }
    }

    /// Front-view bounding box
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Dot { center, radius, .. } => {
                let c = center.flatten();
                Rect::new(c.x - radius, c.y - radius, 2.0 * radius, 2.0 * radius)
            }
            Shape::Line { start, end, .. } => span(start.flatten(), end.flatten()),
            Shape::Arc {
                center,
                radius,
                start_angle,
                angle,
                ..
            } => {
                let (a, b) = (*start_angle, start_angle + angle);
                let mid = (a + b) / 2.0;
                let points = [a, mid, b].map(|t| {
                    Point::new(center.x + radius * t.cos(), center.y + radius * t.sin())
                });
                Rect::union_all(
                    [span(points[0], points[1]), span(points[1], points[2])].iter(),
                )
                .unwrap_or_default()
            }
            Shape::Rectangle { rect, .. } => *rect,
            Shape::Axes {
                origin,
                x_extent,
                y_extent,
            } => Rect::new(
                origin.x - x_extent,
                origin.y - y_extent,
                2.0 * x_extent,
                2.0 * y_extent,
            ),
            Shape::Axes3D { origin, extent } => {
                let o = origin.flatten();
                Rect::new(o.x - extent, o.y - extent, 2.0 * extent, 2.0 * extent)
            }
        }
    }

    /// Front-view draw primitives
    pub fn render(&self) -> RenderOutput {
        let primitives = match self {
            Shape::Dot {
                center,
                radius,
                color,
            } => vec![RenderPrimitive::Circle {
                center: center.flatten(),
                radius: *radius,
                fill: Some(*color),
                stroke: None,
            }],
            Shape::Line {
                start,
                end,
                color,
                dashed,
                tip,
            } => vec![line(start.flatten(), end.flatten(), *color, *dashed, *tip)],
            Shape::Arc {
                center,
                radius,
                start_angle,
                angle,
                tip,
            } => vec![RenderPrimitive::Arc {
                center: *center,
                radius: *radius,
                start_angle: *start_angle,
                angle: *angle,
                thickness: STROKE_WIDTH,
                color: Color::WHITE,
                tip: *tip,
            }],
            Shape::Rectangle {
                rect,
                corner_radius,
                fill,
                stroke,
            } => vec![RenderPrimitive::Rectangle {
                rect: *rect,
                corner_radius: *corner_radius,
                fill: *fill,
                stroke: stroke.map(|c| (c, STROKE_WIDTH)),
            }],
            Shape::Axes {
                origin,
                x_extent,
                y_extent,
            } => vec![
                axis(*origin, Point::new(*x_extent, 0.0)),
                axis(*origin, Point::new(0.0, *y_extent)),
            ],
            // The depth axis collapses to a point in the front view
            Shape::Axes3D { origin, extent } => {
                let o = origin.flatten();
                vec![
                    axis(o, Point::new(*extent, 0.0)),
                    axis(o, Point::new(0.0, *extent)),
                ]
            }
        };
        RenderOutput::new(primitives, self.bounds())
    }
}

fn span(a: Point, b: Point) -> Rect {
    let left = a.x.min(b.x);
    let bottom = a.y.min(b.y);
    Rect::new(left, bottom, (a.x - b.x).abs(), (a.y - b.y).abs())
}

fn line(start: Point, end: Point, color: Color, dashed: bool, tip: bool) -> RenderPrimitive {
    RenderPrimitive::Line {
        start,
        end,
        thickness: STROKE_WIDTH,
        color,
        dashed,
        tip,
    }
}

fn axis(origin: Point, half: Point) -> RenderPrimitive {
    line(
        Point::new(origin.x - half.x, origin.y - half.y),
        Point::new(origin.x + half.x, origin.y + half.y),
        Color::WHITE,
        false,
        true,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_bounds() {
        let dot = Shape::dot(Point::new(10.0, -20.0), 5.0, Color::BLUE);
        assert_eq!(dot.bounds(), Rect::new(5.0, -25.0, 10.0, 10.0));
    }

    #[test]
    fn test_line_bounds_any_direction() {
        let line = Shape::line(Point::new(30.0, 0.0), Point::new(0.0, -60.0));
        assert_eq!(line.bounds(), Rect::new(0.0, -60.0, 30.0, 60.0));
        assert_eq!(line.end_point(), Some(Point::new(0.0, -60.0)));
    }

    #[test]
    fn test_depth_is_dropped_in_front_view() {
        let fall = Shape::dashed_line(Point3::new(30.0, 30.0, 0.0), Point3::new(30.0, 30.0, 30.0));
        let output = fall.render();
        let RenderPrimitive::Line { start, end, dashed, .. } = &output.primitives[0] else {
            panic!("expected a line");
        };
        assert_eq!(start, end);
        assert!(*dashed);
    }

    #[test]
    fn test_axes_render_two_arrows() {
        let axes = Shape::Axes {
            origin: Point::origin(),
            x_extent: 210.0,
            y_extent: 120.0,
        };
        let output = axes.render();
        assert_eq!(output.primitives.len(), 2);
        assert_eq!(output.bounds.width(), 420.0);
        assert!(output
            .primitives
            .iter()
            .all(|p| matches!(p, RenderPrimitive::Line { tip: true, .. })));
    }

    #[test]
    fn test_quarter_arc_bounds() {
        let arc = Shape::Arc {
            center: Point::origin(),
            radius: 10.0,
            start_angle: -std::f32::consts::FRAC_PI_2,
            angle: std::f32::consts::FRAC_PI_2,
            tip: false,
        };
        let bounds = arc.bounds();
        assert!((bounds.right() - 10.0).abs() < 1e-4);
        assert!((bounds.bottom() + 10.0).abs() < 1e-4);
    }
}
