//! Axis-aligned rectangles.

use serde::{Deserialize, Serialize};

use crate::bbox::Bbox;
use crate::point::Point;
use crate::polygon::Polygon;
use crate::transform::TranslateMut;

/// An axis-aligned rectangle, specified by its lower-left and upper-right corners.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    /// The lower-left corner.
    p0: Point,
    /// The upper-right corner.
    p1: Point,
}

impl Rect {
    /// Creates a rectangle from two corner points, in any order.
    pub fn from_corners(p0: Point, p1: Point) -> Self {
        Self {
            p0: Point::new(p0.x.min(p1.x), p0.y.min(p1.y)),
            p1: Point::new(p0.x.max(p1.x), p0.y.max(p1.y)),
        }
    }

    /// Creates a rectangle from left, bottom, right, and top edge coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// # use planegeom::prelude::*;
    /// let rect = Rect::from_sides(10.0, 20.0, 30.0, 40.0);
    /// assert_eq!(rect.width(), 20.0);
    /// assert_eq!(rect.height(), 20.0);
    /// ```
    pub fn from_sides(left: f64, bot: f64, right: f64, top: f64) -> Self {
        Self::from_corners(Point::new(left, bot), Point::new(right, top))
    }

    /// Creates a zero-area rectangle containing the single point `p`.
    pub fn from_point(p: Point) -> Self {
        Self { p0: p, p1: p }
    }

    /// Creates a rectangle of the given width and height centered at `center`.
    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        Self::from_sides(
            center.x - width / 2.0,
            center.y - height / 2.0,
            center.x + width / 2.0,
            center.y + height / 2.0,
        )
    }

    /// Returns the leftmost x-coordinate.
    pub fn left(&self) -> f64 {
        self.p0.x
    }

    /// Returns the bottom y-coordinate.
    pub fn bot(&self) -> f64 {
        self.p0.y
    }

    /// Returns the rightmost x-coordinate.
    pub fn right(&self) -> f64 {
        self.p1.x
    }

    /// Returns the top y-coordinate.
    pub fn top(&self) -> f64 {
        self.p1.y
    }

    /// Returns the width of the rectangle.
    pub fn width(&self) -> f64 {
        self.p1.x - self.p0.x
    }

    /// Returns the height of the rectangle.
    pub fn height(&self) -> f64 {
        self.p1.y - self.p0.y
    }

    /// Returns the center point of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(
            (self.p0.x + self.p1.x) / 2.0,
            (self.p0.y + self.p1.y) / 2.0,
        )
    }

    /// Returns the area of the rectangle.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns the rectangle expanded by `amount` on all four sides.
    ///
    /// # Example
    ///
    /// ```
    /// # use planegeom::prelude::*;
    /// let rect = Rect::from_sides(0.0, 0.0, 10.0, 10.0).expand_all(2.0);
    /// assert_eq!(rect, Rect::from_sides(-2.0, -2.0, 12.0, 12.0));
    /// ```
    pub fn expand_all(&self, amount: f64) -> Self {
        Self::from_sides(
            self.p0.x - amount,
            self.p0.y - amount,
            self.p1.x + amount,
            self.p1.y + amount,
        )
    }

    /// Returns the smallest rectangle containing both `self` and `other`.
    pub fn union(self, other: Self) -> Self {
        Self::from_sides(
            self.p0.x.min(other.p0.x),
            self.p0.y.min(other.p0.y),
            self.p1.x.max(other.p1.x),
            self.p1.y.max(other.p1.y),
        )
    }

    /// Returns the overlapping region of `self` and `other`, if any.
    pub fn intersection(self, other: Self) -> Option<Self> {
        let left = self.p0.x.max(other.p0.x);
        let bot = self.p0.y.max(other.p0.y);
        let right = self.p1.x.min(other.p1.x);
        let top = self.p1.y.min(other.p1.y);
        (left <= right && bot <= top).then(|| Self::from_sides(left, bot, right, top))
    }

    /// Converts the rectangle to a counter-clockwise polygon ring.
    pub fn to_polygon(self) -> Polygon {
        Polygon::from_verts(vec![
            self.p0,
            Point::new(self.p1.x, self.p0.y),
            self.p1,
            Point::new(self.p0.x, self.p1.y),
        ])
    }
}

impl Bbox for Rect {
    fn bbox(&self) -> Option<Rect> {
        Some(*self)
    }
}

impl TranslateMut for Rect {
    fn translate_mut(&mut self, p: Point) {
        self.p0.translate_mut(p);
        self.p1.translate_mut(p);
    }
}
