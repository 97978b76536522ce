//! Layer-aware wrappers around the polygon boolean engine.
//!
//! Every operation takes its output layer as an explicit required parameter:
//! there is no silent layer inheritance from the first operand, so reordering
//! inputs cannot change which stratum a result lands on.
//!
//! The engine itself (union/intersection/difference over f64 multipolygons)
//! is external; outward offsetting is built on top of it as a Minkowski
//! dilation by a disc, keeping the engine the only clipping implementation.

use geo::{BooleanOps, MultiPolygon, Polygon as GeoPolygon};
use itertools::Itertools;
use planegeom::bbox::Bbox;
use planegeom::point::Point;
use planegeom::polygon::Polygon;
use planegeom::rect::Rect;

use crate::element::Layer;
use crate::shape::Shape;

/// Chord segments in each tessellated vertex disc used by [`dilate`].
const DILATE_DISC_SEGMENTS: usize = 16;

/// Half-width of the slit cut by [`fracture`], in microns. Wide enough to
/// survive rounding to nanometer database units.
const FRACTURE_SLIT_HALF_WIDTH: f64 = 1e-3;

/// Merges all input shapes into one shape on `layer`.
///
/// An empty input set yields an empty shape, not an error.
pub fn union<'a>(shapes: impl IntoIterator<Item = &'a Shape>, layer: Layer) -> Shape {
    let polys = shapes
        .into_iter()
        .map(|s| s.multi_polygon().clone())
        .collect();
    Shape::from_multi_polygon(layer, union_many(polys))
}

/// Computes `a - b` on `layer`.
pub fn difference(a: &Shape, b: &Shape, layer: Layer) -> Shape {
    let poly = if a.is_empty() || b.is_empty() {
        a.multi_polygon().clone()
    } else {
        a.multi_polygon().difference(b.multi_polygon())
    };
    Shape::from_multi_polygon(layer, poly)
}

/// Computes the overlap of `a` and `b` on `layer`.
pub fn intersection(a: &Shape, b: &Shape, layer: Layer) -> Shape {
    if a.is_empty() || b.is_empty() {
        return Shape::empty(layer);
    }
    Shape::from_multi_polygon(layer, a.multi_polygon().intersection(b.multi_polygon()))
}

/// Grows every contour of `shape` outward by `width`, producing a result on
/// `layer`.
///
/// Realized as the Minkowski sum of the shape with a disc of radius `width`:
/// the original, a sleeve along every boundary edge, and a disc at every
/// vertex, all merged by the engine. Corners are therefore rounded. Intended
/// as an intermediate step (border extraction), never a final output.
pub fn dilate(shape: &Shape, width: f64, layer: Layer) -> Shape {
    debug_assert!(width > 0.0);
    let mut pieces: Vec<MultiPolygon<f64>> = vec![shape.multi_polygon().clone()];
    for poly in shape.multi_polygon() {
        for ring in std::iter::once(poly.exterior()).chain(poly.interiors().iter()) {
            for (a, b) in ring.0.iter().tuple_windows() {
                let (dx, dy) = (b.x - a.x, b.y - a.y);
                let len = (dx * dx + dy * dy).sqrt();
                if len > 0.0 {
                    let (nx, ny) = (-dy / len * width, dx / len * width);
                    let sleeve = Polygon::from_verts(vec![
                        Point::new(a.x + nx, a.y + ny),
                        Point::new(b.x + nx, b.y + ny),
                        Point::new(b.x - nx, b.y - ny),
                        Point::new(a.x - nx, a.y - ny),
                    ]);
                    pieces.push(ring_multi_polygon(&sleeve));
                }
                let disc =
                    Polygon::circle(Point::new(a.x, a.y), width, DILATE_DISC_SEGMENTS);
                pieces.push(ring_multi_polygon(&disc));
            }
        }
    }
    Shape::from_multi_polygon(layer, union_many(pieces))
}

/// Splits hole-carrying polygons into simply-connected ones by cutting a
/// hair-thin slit from each interior ring out through the polygon boundary.
///
/// The output covers the same region as the input minus the slits (two
/// nanometers wide each) and carries no interior rings, which is what the
/// GDS boundary writer requires. Shapes without holes pass through untouched.
pub(crate) fn fracture(shape: &Shape) -> Shape {
    if shape
        .multi_polygon()
        .iter()
        .all(|p| p.interiors().is_empty())
    {
        return shape.clone();
    }
    let mut out: Vec<GeoPolygon<f64>> = Vec::new();
    for poly in shape.multi_polygon() {
        let mut mp = MultiPolygon::new(vec![poly.clone()]);
        // Each slit opens at least the hole it is aimed at; the guard bounds
        // pathological inputs.
        for _ in 0..64 {
            let Some(hole) = mp
                .iter()
                .flat_map(|p| p.interiors().iter())
                .next()
                .cloned()
            else {
                break;
            };
            let top = Shape::from_multi_polygon(shape.layer(), mp.clone())
                .bbox_rect()
                .top();
            let hole_bbox = ring_bbox(&hole);
            let cx = hole_bbox.center().x;
            let slit = Rect::from_sides(
                cx - FRACTURE_SLIT_HALF_WIDTH,
                hole_bbox.bot(),
                cx + FRACTURE_SLIT_HALF_WIDTH,
                top + 1.0,
            );
            mp = mp.difference(&ring_multi_polygon(&slit.to_polygon()));
        }
        out.extend(mp);
    }
    Shape::from_multi_polygon(shape.layer(), MultiPolygon::new(out))
}

/// Merges a list of multipolygons pairwise, halving the list each round.
fn union_many(mut polys: Vec<MultiPolygon<f64>>) -> MultiPolygon<f64> {
    polys.retain(|p| !p.0.is_empty());
    while polys.len() > 1 {
        let merged: Vec<MultiPolygon<f64>> = polys
            .chunks(2)
            .map(|pair| match pair {
                [a, b] => a.union(b),
                [a] => a.clone(),
                _ => unreachable!(),
            })
            .collect();
        polys = merged;
    }
    polys.pop().unwrap_or_else(|| MultiPolygon::new(Vec::new()))
}

fn ring_multi_polygon(ring: &Polygon) -> MultiPolygon<f64> {
    MultiPolygon::new(vec![GeoPolygon::new(
        crate::shape::ring_to_geo(ring),
        Vec::new(),
    )])
}

fn ring_bbox(ring: &geo::LineString<f64>) -> Rect {
    let mut pts = ring.0.iter();
    let first = pts.next().expect("empty interior ring");
    let mut rect = Rect::from_point(Point::new(first.x, first.y));
    for c in pts {
        rect = rect.union(Rect::from_point(Point::new(c.x, c.y)));
    }
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use planegeom::transform::Translate;

    fn rect_shape(layer: Layer, l: f64, b: f64, r: f64, t: f64) -> Shape {
        Shape::from_rect(layer, Rect::from_sides(l, b, r, t))
    }

    #[test]
    fn union_of_nothing_is_empty() {
        let none: [&Shape; 0] = [];
        let merged = union(none, Layer(4));
        assert!(merged.is_empty());
        assert_eq!(merged.layer(), Layer(4));
    }

    #[test]
    fn union_takes_explicit_layer() {
        let a = rect_shape(Layer(1), 0.0, 0.0, 2.0, 2.0);
        let b = rect_shape(Layer(2), 1.0, 0.0, 3.0, 2.0);
        let merged = union([&a, &b], Layer(9));
        assert_eq!(merged.layer(), Layer(9));
        assert_relative_eq!(merged.area(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn difference_with_empty_subtrahend_is_identity() {
        let a = rect_shape(Layer(1), 0.0, 0.0, 2.0, 2.0);
        let d = difference(&a, &Shape::empty(Layer(1)), Layer(1));
        assert_relative_eq!(d.area(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn intersection_with_empty_is_empty() {
        let a = rect_shape(Layer(1), 0.0, 0.0, 2.0, 2.0);
        assert!(intersection(&a, &Shape::empty(Layer(1)), Layer(1)).is_empty());
    }

    #[test]
    fn translation_round_trip_restores_bbox() {
        let original = rect_shape(Layer(1), -3.0, -1.0, 5.0, 7.0);
        let moved = original
            .clone()
            .translate(Point::new(12.5, -8.25))
            .translate(Point::new(-12.5, 8.25));
        let a = original.bbox_rect();
        let b = moved.bbox_rect();
        assert_relative_eq!(a.left(), b.left(), epsilon = 1e-9);
        assert_relative_eq!(a.bot(), b.bot(), epsilon = 1e-9);
        assert_relative_eq!(a.right(), b.right(), epsilon = 1e-9);
        assert_relative_eq!(a.top(), b.top(), epsilon = 1e-9);
    }

    #[test]
    fn dilate_grows_bbox_by_width_per_side() {
        let shape = rect_shape(Layer(1), 0.0, 0.0, 10.0, 4.0);
        let grown = dilate(&shape, 0.5, Layer(1));
        let bbox = grown.bbox_rect();
        assert_relative_eq!(bbox.left(), -0.5, epsilon = 1e-6);
        assert_relative_eq!(bbox.bot(), -0.5, epsilon = 1e-6);
        assert_relative_eq!(bbox.right(), 10.5, epsilon = 1e-6);
        assert_relative_eq!(bbox.top(), 4.5, epsilon = 1e-6);
    }

    #[test]
    fn fracture_removes_interior_rings() {
        let outer = rect_shape(Layer(1), 0.0, 0.0, 10.0, 10.0);
        let inner = rect_shape(Layer(1), 4.0, 4.0, 6.0, 6.0);
        let annulus = difference(&outer, &inner, Layer(1));
        assert!(annulus
            .multi_polygon()
            .iter()
            .any(|p| !p.interiors().is_empty()));
        let fractured = fracture(&annulus);
        assert!(fractured
            .multi_polygon()
            .iter()
            .all(|p| p.interiors().is_empty()));
        assert_relative_eq!(fractured.area(), annulus.area(), epsilon = 0.1);
    }
}
