//! Transformation types and traits for translating and rotating geometry.

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// An affine transformation of the plane: a 2x2 matrix and an offset.
///
/// Constructors cover the transformations mask layout needs: translation,
/// rotation about an arbitrary center, and reflection across the y-axis.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    /// The transformation matrix.
    a: [[f64; 2]; 2],
    /// The offset.
    b: [f64; 2],
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transformation {
    /// Returns the identity transformation.
    pub const fn identity() -> Self {
        Self {
            a: [[1.0, 0.0], [0.0, 1.0]],
            b: [0.0, 0.0],
        }
    }

    /// Returns a translation by `(x, y)`.
    pub const fn translate(x: f64, y: f64) -> Self {
        Self {
            a: [[1.0, 0.0], [0.0, 1.0]],
            b: [x, y],
        }
    }

    /// Returns a counter-clockwise rotation by `angle` radians about the origin.
    pub fn rotate(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            a: [[cos, -sin], [sin, cos]],
            b: [0.0, 0.0],
        }
    }

    /// Returns a counter-clockwise rotation by `angle` radians about `center`.
    ///
    /// # Example
    ///
    /// ```
    /// # use planegeom::prelude::*;
    /// # use approx::assert_relative_eq;
    /// let t = Transformation::rotate_about(std::f64::consts::PI, Point::new(1.0, 0.0));
    /// let p = t.apply(Point::new(2.0, 0.0));
    /// assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
    /// assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
    /// ```
    pub fn rotate_about(angle: f64, center: Point) -> Self {
        Self::cascade(
            Transformation::translate(center.x, center.y),
            Self::cascade(
                Transformation::rotate(angle),
                Transformation::translate(-center.x, -center.y),
            ),
        )
    }

    /// Returns a reflection across the y-axis (`x -> -x`).
    pub const fn reflect_horiz() -> Self {
        Self {
            a: [[-1.0, 0.0], [0.0, 1.0]],
            b: [0.0, 0.0],
        }
    }

    /// Returns the transformation that applies `child` first, then `parent`.
    pub fn cascade(parent: Transformation, child: Transformation) -> Transformation {
        let mut a = [[0.0; 2]; 2];
        for (i, row) in a.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = parent.a[i][0] * child.a[0][j] + parent.a[i][1] * child.a[1][j];
            }
        }
        let b = [
            parent.a[0][0] * child.b[0] + parent.a[0][1] * child.b[1] + parent.b[0],
            parent.a[1][0] * child.b[0] + parent.a[1][1] * child.b[1] + parent.b[1],
        ];
        Self { a, b }
    }

    /// Applies this transformation to a point.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a[0][0] * p.x + self.a[0][1] * p.y + self.b[0],
            self.a[1][0] * p.x + self.a[1][1] * p.y + self.b[1],
        )
    }

    /// Returns the rotation angle of this transformation, in radians.
    ///
    /// Meaningful for transformations composed of rotations and translations.
    pub fn rotation_angle(&self) -> f64 {
        self.a[1][0].atan2(self.a[0][0])
    }
}

/// Trait for in-place translation of geometric objects.
pub trait TranslateMut {
    /// Translates the shape by the given displacement.
    fn translate_mut(&mut self, p: Point);
}

/// Trait for by-value translation of geometric objects.
pub trait Translate: TranslateMut + Sized {
    /// Translates the shape by the given displacement, returning the moved shape.
    fn translate(mut self, p: Point) -> Self {
        self.translate_mut(p);
        self
    }
}

impl<T: TranslateMut + Sized> Translate for T {}

impl<T: TranslateMut> TranslateMut for Vec<T> {
    fn translate_mut(&mut self, p: Point) {
        for item in self.iter_mut() {
            item.translate_mut(p);
        }
    }
}

/// Trait for in-place transformation of geometric objects.
pub trait TransformMut {
    /// Applies `trans` to the shape.
    fn transform_mut(&mut self, trans: Transformation);
}

/// Trait for by-value transformation of geometric objects.
pub trait Transform: TransformMut + Sized {
    /// Applies `trans` to the shape, returning the transformed shape.
    fn transform(mut self, trans: Transformation) -> Self {
        self.transform_mut(trans);
        self
    }
}

impl<T: TransformMut + Sized> Transform for T {}

impl<T: TransformMut> TransformMut for Vec<T> {
    fn transform_mut(&mut self, trans: Transformation) {
        for item in self.iter_mut() {
            item.transform_mut(trans);
        }
    }
}
