//! Layered polygon sets.
//!
//! A [`Shape`] is the atomic geometry unit: a set of polygons tagged with one
//! [`Layer`]. Internally the polygon set is stored in the boolean engine's
//! multipolygon representation so that composed results (which may carry
//! interior rings) round-trip through further boolean operations losslessly.
//! Topology is immutable after construction; translation and rotation mutate
//! position only.

use geo::{Area, BoundingRect, LineString, MapCoords, MultiPolygon, Polygon as GeoPolygon};
use planegeom::bbox::Bbox;
use planegeom::point::Point;
use planegeom::polygon::Polygon;
use planegeom::rect::Rect;
use planegeom::transform::{TransformMut, Transformation, TranslateMut};

use crate::element::Layer;

/// A set of polygons on a single layer.
#[derive(Debug, Clone)]
pub struct Shape {
    layer: Layer,
    poly: MultiPolygon<f64>,
}

impl Shape {
    /// Creates an empty shape on the given layer.
    ///
    /// Empty shapes are valid operands everywhere: boolean operations on them
    /// follow ordinary set semantics instead of erroring.
    pub fn empty(layer: Layer) -> Self {
        Self {
            layer,
            poly: MultiPolygon::new(Vec::new()),
        }
    }

    /// Creates a shape from a single polygon ring.
    pub fn from_ring(layer: Layer, ring: Polygon) -> Self {
        Self::from_rings(layer, [ring])
    }

    /// Creates a shape from a set of polygon rings.
    pub fn from_rings(layer: Layer, rings: impl IntoIterator<Item = Polygon>) -> Self {
        let polys = rings
            .into_iter()
            .filter(|r| r.points().len() >= 3)
            .map(|r| GeoPolygon::new(ring_to_geo(&r), Vec::new()))
            .collect();
        Self {
            layer,
            poly: MultiPolygon::new(polys),
        }
    }

    /// Creates a rectangular shape.
    pub fn from_rect(layer: Layer, rect: Rect) -> Self {
        Self::from_ring(layer, rect.to_polygon())
    }

    pub(crate) fn from_multi_polygon(layer: Layer, poly: MultiPolygon<f64>) -> Self {
        Self { layer, poly }
    }

    /// Returns the layer this shape is on.
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Returns `true` if the shape contains no polygons.
    pub fn is_empty(&self) -> bool {
        self.poly.0.is_empty()
    }

    /// Returns the total enclosed area of the shape.
    pub fn area(&self) -> f64 {
        self.poly.unsigned_area()
    }

    pub(crate) fn multi_polygon(&self) -> &MultiPolygon<f64> {
        &self.poly
    }
}

impl Bbox for Shape {
    fn bbox(&self) -> Option<Rect> {
        self.poly.bounding_rect().map(|r| {
            Rect::from_sides(r.min().x, r.min().y, r.max().x, r.max().y)
        })
    }
}

impl TranslateMut for Shape {
    fn translate_mut(&mut self, p: Point) {
        let (dx, dy) = (p.x, p.y);
        self.poly = self
            .poly
            .map_coords(move |c| geo::Coord { x: c.x + dx, y: c.y + dy });
    }
}

impl TransformMut for Shape {
    fn transform_mut(&mut self, trans: Transformation) {
        self.poly = self.poly.map_coords(move |c| {
            let p = trans.apply(Point::new(c.x, c.y));
            geo::Coord { x: p.x, y: p.y }
        });
    }
}

pub(crate) fn ring_to_geo(ring: &Polygon) -> LineString<f64> {
    LineString::from(
        ring.points()
            .iter()
            .map(|p| (p.x, p.y))
            .collect::<Vec<_>>(),
    )
}
