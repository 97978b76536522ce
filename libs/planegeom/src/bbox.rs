//! Axis-aligned rectangular bounding boxes.

use crate::rect::Rect;

/// A geometric shape that has a bounding box.
///
/// # Examples
///
/// ```
/// # use planegeom::prelude::*;
/// let rect = Rect::from_sides(0.0, 0.0, 100.0, 200.0);
/// assert_eq!(rect.bbox(), Some(Rect::from_sides(0.0, 0.0, 100.0, 200.0)));
/// ```
pub trait Bbox {
    /// Computes the axis-aligned rectangular bounding box.
    ///
    /// If empty, this method should return `None`.
    fn bbox(&self) -> Option<Rect>;

    /// Computes the axis-aligned rectangular bounding box, panicking if it is
    /// empty.
    fn bbox_rect(&self) -> Rect {
        self.bbox().unwrap()
    }
}

impl<T> Bbox for &T
where
    T: Bbox,
{
    fn bbox(&self) -> Option<Rect> {
        T::bbox(*self)
    }
}

impl<T: Bbox> Bbox for Vec<T> {
    fn bbox(&self) -> Option<Rect> {
        self.as_slice().bbox()
    }
}

impl<T: Bbox> Bbox for [T] {
    fn bbox(&self) -> Option<Rect> {
        let mut bbox: Option<Rect> = None;
        for item in self {
            bbox = match (bbox, item.bbox()) {
                (Some(a), Some(b)) => Some(a.union(b)),
                (a, b) => a.or(b),
            };
        }
        bbox
    }
}

impl Bbox for Option<Rect> {
    fn bbox(&self) -> Option<Rect> {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;
    use crate::polygon::Polygon;

    #[test]
    fn bbox_works_for_vecs() {
        let v = vec![
            Rect::from_sides(0.0, 0.0, 100.0, 200.0),
            Rect::from_sides(-50.0, 20.0, 90.0, 250.0),
        ];
        assert_eq!(v.bbox(), Some(Rect::from_sides(-50.0, 0.0, 100.0, 250.0)));
    }

    #[test]
    fn bbox_of_empty_vec_is_none() {
        let v: Vec<Polygon> = Vec::new();
        assert_eq!(v.bbox(), None);
        assert_eq!(Polygon::from_verts(vec![Point::zero()]).bbox(), Some(Rect::from_point(Point::zero())));
    }
}
