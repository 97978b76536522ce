//! Turtle-style trace path construction.
//!
//! A [`PathBuilder`] carries a cursor (current point, heading, trace width)
//! and appends one outline polygon per primitive: a rectangle for a straight
//! run, an annular sector for a fixed-radius turn. The finished trace is the
//! engine union of all outline polygons, so consecutive primitives may
//! overlap freely at their joints.

use planegeom::point::Point;
use planegeom::polygon::Polygon;

use crate::algebra::union;
use crate::element::Layer;
use crate::shape::Shape;

/// Chord segments per quarter turn of tessellated arc.
const ARC_SEGMENTS_PER_QUARTER: usize = 16;

/// A path cursor that accumulates trace outline polygons.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    width: f64,
    pos: Point,
    heading: f64,
    length: f64,
    turns: usize,
    pieces: Vec<Polygon>,
}

impl PathBuilder {
    /// Creates a path of the given trace width, starting at `start` with the
    /// given heading in radians. The width must be positive.
    pub fn new(width: f64, start: Point, heading: f64) -> Self {
        debug_assert!(width > 0.0);
        Self {
            width,
            pos: start,
            heading,
            length: 0.0,
            turns: 0,
            pieces: Vec::new(),
        }
    }

    /// Returns the current cursor position.
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Returns the current heading in radians.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Returns the accumulated centerline length.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the number of turns taken so far.
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Advances the cursor by `length` along the current heading, emitting a
    /// straight trace segment.
    pub fn run(&mut self, length: f64) -> &mut Self {
        debug_assert!(length > 0.0);
        let dir = Point::new(self.heading.cos(), self.heading.sin());
        let norm = Point::new(-dir.y, dir.x) * (self.width / 2.0);
        let end = self.pos + dir * length;
        self.pieces.push(Polygon::from_verts(vec![
            self.pos + norm,
            end + norm,
            end - norm,
            self.pos - norm,
        ]));
        self.pos = end;
        self.length += length;
        self
    }

    /// Turns the cursor through `angle` radians (left positive) along a
    /// circular arc of the given centerline radius, emitting an arc segment.
    pub fn turn(&mut self, radius: f64, angle: f64) -> &mut Self {
        debug_assert!(radius > self.width / 2.0);
        debug_assert!(angle != 0.0);
        let side = angle.signum();
        // Turn center sits perpendicular to the heading, on the turn side.
        let center = self.pos
            + Point::new(-self.heading.sin(), self.heading.cos()) * (side * radius);
        let start_angle = (self.pos.y - center.y).atan2(self.pos.x - center.x);
        let end_angle = start_angle + angle;
        let segments =
            (ARC_SEGMENTS_PER_QUARTER as f64 * angle.abs() / std::f64::consts::FRAC_PI_2)
                .ceil() as usize;
        self.pieces.push(Polygon::annular_sector(
            center,
            radius - self.width / 2.0,
            radius + self.width / 2.0,
            start_angle,
            end_angle,
            segments.max(1),
        ));
        self.pos = center + Point::new(end_angle.cos(), end_angle.sin()) * radius;
        self.heading += angle;
        self.length += radius * angle.abs();
        self.turns += 1;
        self
    }

    /// Unions the accumulated outline polygons into one shape on `layer`.
    pub fn finish(self, layer: Layer) -> Shape {
        let pieces: Vec<Shape> = self
            .pieces
            .into_iter()
            .map(|p| Shape::from_ring(layer, p))
            .collect();
        union(pieces.iter(), layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use planegeom::bbox::Bbox;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn run_advances_along_heading() {
        let mut path = PathBuilder::new(2.0, Point::zero(), FRAC_PI_2);
        path.run(10.0);
        assert_relative_eq!(path.pos().x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(path.pos().y, 10.0, epsilon = 1e-12);
        assert_relative_eq!(path.length(), 10.0);
    }

    #[test]
    fn right_turn_from_north_heads_east() {
        let mut path = PathBuilder::new(2.0, Point::zero(), FRAC_PI_2);
        path.turn(5.0, -FRAC_PI_2);
        // Quarter circle about (5, 0): the cursor ends at (5, 5) heading east.
        assert_relative_eq!(path.pos().x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(path.pos().y, 5.0, epsilon = 1e-12);
        assert_relative_eq!(path.heading(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(path.length(), 5.0 * FRAC_PI_2, epsilon = 1e-12);
        assert_eq!(path.turns(), 1);
    }

    #[test]
    fn half_turn_reverses_heading() {
        let mut path = PathBuilder::new(1.0, Point::zero(), 0.0);
        path.turn(3.0, PI);
        assert_relative_eq!(path.pos().x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(path.pos().y, 6.0, epsilon = 1e-9);
        assert_relative_eq!(path.heading(), PI, epsilon = 1e-12);
    }

    #[test]
    fn finished_trace_covers_the_centerline() {
        let mut path = PathBuilder::new(2.0, Point::zero(), 0.0);
        path.run(10.0).turn(4.0, PI).run(10.0);
        let shape = path.finish(Layer(12));
        let bbox = shape.bbox_rect();
        assert_relative_eq!(bbox.left(), 0.0, epsilon = 1e-2);
        assert_relative_eq!(bbox.right(), 10.0 + 4.0 + 1.0, epsilon = 1e-2);
        assert_relative_eq!(bbox.bot(), -1.0, epsilon = 1e-2);
        assert_relative_eq!(bbox.top(), 9.0, epsilon = 1e-2);
    }
}
