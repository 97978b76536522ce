//! Simple polygon rings.

use serde::{Deserialize, Serialize};

use crate::bbox::Bbox;
use crate::point::Point;
use crate::rect::Rect;
use crate::transform::{TransformMut, Transformation, TranslateMut};

/// A simple (hole-free) polygon, with vertex coordinates given in order.
///
/// The ring is implicitly closed: the last vertex connects back to the first.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Polygon {
    /// Vector of points that make up the polygon.
    points: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon with the given vertices.
    ///
    /// Consecutive duplicate vertices are dropped.
    pub fn from_verts(vec: Vec<Point>) -> Self {
        let mut points: Vec<Point> = Vec::with_capacity(vec.len());
        for p in vec {
            if points.last() != Some(&p) {
                points.push(p);
            }
        }
        Self { points }
    }

    /// Returns the vertices of the polygon.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Tessellates a circle of radius `radius` centered at `center`.
    ///
    /// `segments` is the number of chord segments in the full circle.
    pub fn circle(center: Point, radius: f64, segments: usize) -> Self {
        let points = (0..segments)
            .map(|i| {
                let theta = 2.0 * std::f64::consts::PI * i as f64 / segments as f64;
                Point::new(
                    center.x + radius * theta.cos(),
                    center.y + radius * theta.sin(),
                )
            })
            .collect();
        Self { points }
    }

    /// Tessellates an annular sector: the region between radii `inner` and
    /// `outer`, swept from `start` to `end` radians about `center`.
    ///
    /// The sweep may be negative (clockwise). `segments` is the number of
    /// chord segments along each arc.
    pub fn annular_sector(
        center: Point,
        inner: f64,
        outer: f64,
        start: f64,
        end: f64,
        segments: usize,
    ) -> Self {
        let at = |radius: f64, theta: f64| {
            Point::new(
                center.x + radius * theta.cos(),
                center.y + radius * theta.sin(),
            )
        };
        let mut points = Vec::with_capacity(2 * (segments + 1));
        for i in 0..=segments {
            let theta = start + (end - start) * i as f64 / segments as f64;
            points.push(at(outer, theta));
        }
        for i in (0..=segments).rev() {
            let theta = start + (end - start) * i as f64 / segments as f64;
            points.push(at(inner, theta));
        }
        Self::from_verts(points)
    }
}

impl Bbox for Polygon {
    fn bbox(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let mut rect = Rect::from_point(*first);
        for p in &self.points[1..] {
            rect = rect.union(Rect::from_point(*p));
        }
        Some(rect)
    }
}

impl TranslateMut for Polygon {
    fn translate_mut(&mut self, p: Point) {
        self.points.translate_mut(p);
    }
}

impl TransformMut for Polygon {
    fn transform_mut(&mut self, trans: Transformation) {
        self.points.transform_mut(trans);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;
    use approx::assert_relative_eq;

    #[test]
    fn bbox_covers_all_vertices() {
        let polygon = Polygon::from_verts(vec![
            Point::new(-10.0, 25.0),
            Point::new(0.0, 16.0),
            Point::new(40.0, -20.0),
        ]);
        assert_eq!(
            polygon.bbox(),
            Some(Rect::from_sides(-10.0, -20.0, 40.0, 25.0))
        );
    }

    #[test]
    fn duplicate_vertices_are_dropped() {
        let polygon = Polygon::from_verts(vec![
            Point::zero(),
            Point::zero(),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ]);
        assert_eq!(polygon.points().len(), 3);
    }

    #[test]
    fn circle_bbox_is_square() {
        let circle = Polygon::circle(Point::new(1.0, 1.0), 2.0, 64);
        let bbox = circle.bbox().unwrap();
        assert_relative_eq!(bbox.left(), -1.0, epsilon = 1e-2);
        assert_relative_eq!(bbox.top(), 3.0, epsilon = 1e-2);
    }

    #[test]
    fn rotated_triangle_moves_vertices() {
        let triangle = Polygon::from_verts(vec![
            Point::zero(),
            Point::new(4.0, -1.0),
            Point::new(4.0, 1.0),
        ]);
        let rotated = triangle.transform(Transformation::rotate(std::f64::consts::PI));
        let bbox = rotated.bbox().unwrap();
        assert_relative_eq!(bbox.left(), -4.0, epsilon = 1e-12);
        assert_relative_eq!(bbox.right(), 0.0, epsilon = 1e-12);
    }
}
