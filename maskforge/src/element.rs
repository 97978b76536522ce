//! Basic layout elements.
//!
//! Mask layouts consist of layered polygon-set shapes, text annotations, and
//! ordered component groups of the two.

use std::fmt::Display;

use arcstr::ArcStr;
use planegeom::bbox::Bbox;
use planegeom::point::Point;
use planegeom::rect::Rect;
use planegeom::transform::{TransformMut, Transformation, TranslateMut};
use serde::{Deserialize, Serialize};

use crate::shape::Shape;

/// An integer tag denoting a physical fabrication stratum.
///
/// Carries no behavior; the numbering is whatever the downstream process
/// expects. The value domain matches the GDSII layer-number field.
#[derive(
    Debug, Copy, Clone, Default, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord,
)]
pub struct Layer(pub i16);

impl Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A primitive text annotation: a layer, string, location, and angle.
#[derive(Debug, Clone)]
pub struct Text {
    layer: Layer,
    string: ArcStr,
    loc: Point,
    angle: f64,
    size: f64,
}

impl Text {
    /// Creates a new text annotation at `loc` with no rotation and unit size.
    pub fn new(layer: Layer, string: impl Into<ArcStr>, loc: Point) -> Self {
        Self {
            layer,
            string: string.into(),
            loc,
            angle: 0.0,
            size: 1.0,
        }
    }

    /// Returns this annotation rotated to `angle` radians.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Returns this annotation with the given nominal glyph height.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Gets the nominal glyph height of this annotation.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Gets the layer that this annotation is on.
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Gets the text of this annotation.
    pub fn string(&self) -> &ArcStr {
        &self.string
    }

    /// Gets the location of this annotation.
    pub fn loc(&self) -> Point {
        self.loc
    }

    /// Gets the rotation of this annotation, in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }
}

impl Bbox for Text {
    fn bbox(&self) -> Option<Rect> {
        Some(Rect::from_point(self.loc))
    }
}

impl TranslateMut for Text {
    fn translate_mut(&mut self, p: Point) {
        self.loc.translate_mut(p);
    }
}

impl TransformMut for Text {
    fn transform_mut(&mut self, trans: Transformation) {
        self.loc.transform_mut(trans);
        self.angle += trans.rotation_angle();
    }
}

/// A primitive layout element: a shape or a text annotation.
#[derive(Debug, Clone)]
pub enum Element {
    /// A layered polygon-set shape.
    Shape(Shape),
    /// A text annotation.
    Text(Text),
}

impl Element {
    /// If this element is a shape, returns a reference to it.
    pub fn shape(&self) -> Option<&Shape> {
        match self {
            Self::Shape(s) => Some(s),
            _ => None,
        }
    }

    /// If this element is a text annotation, returns a reference to it.
    pub fn text(&self) -> Option<&Text> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl Bbox for Element {
    fn bbox(&self) -> Option<Rect> {
        match self {
            Element::Shape(shape) => shape.bbox(),
            Element::Text(text) => text.bbox(),
        }
    }
}

impl TranslateMut for Element {
    fn translate_mut(&mut self, p: Point) {
        match self {
            Element::Shape(shape) => shape.translate_mut(p),
            Element::Text(text) => text.translate_mut(p),
        }
    }
}

impl TransformMut for Element {
    fn transform_mut(&mut self, trans: Transformation) {
        match self {
            Element::Shape(shape) => shape.transform_mut(trans),
            Element::Text(text) => text.transform_mut(trans),
        }
    }
}

impl From<Shape> for Element {
    fn from(value: Shape) -> Self {
        Self::Shape(value)
    }
}

impl From<Text> for Element {
    fn from(value: Text) -> Self {
        Self::Text(value)
    }
}

/// An ordered collection of elements treated as one repositionable component.
///
/// Groups are what the auto-layout engine positions; element order within a
/// group is draw order and is preserved all the way to the output sink.
#[derive(Debug, Clone, Default)]
pub struct Group {
    elements: Vec<Element>,
}

impl Group {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a group from the given elements.
    pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> Self {
        Self {
            elements: elements.into_iter().collect(),
        }
    }

    /// Appends an element to the group.
    pub fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    /// Appends all elements of `other` to the group, preserving order.
    pub fn extend(&mut self, other: Group) {
        self.elements.extend(other.elements);
    }

    /// Returns the elements of the group in draw order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Consumes the group, returning its elements in draw order.
    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    /// Iterates over the shapes in the group, skipping text annotations.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.elements.iter().filter_map(Element::shape)
    }

    /// Returns the width of the group's bounding box, or zero if empty.
    pub fn width(&self) -> f64 {
        self.bbox().map(|b| b.width()).unwrap_or_default()
    }

    /// Returns the height of the group's bounding box, or zero if empty.
    pub fn height(&self) -> f64 {
        self.bbox().map(|b| b.height()).unwrap_or_default()
    }
}

impl Bbox for Group {
    fn bbox(&self) -> Option<Rect> {
        self.elements.bbox()
    }
}

impl TranslateMut for Group {
    fn translate_mut(&mut self, p: Point) {
        self.elements.translate_mut(p);
    }
}

impl TransformMut for Group {
    fn transform_mut(&mut self, trans: Transformation) {
        self.elements.transform_mut(trans);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planegeom::prelude::Translate;

    #[test]
    fn group_bbox_spans_members() {
        let mut group = Group::new();
        group.push(Shape::from_rect(Layer(1), Rect::from_sides(0.0, 0.0, 2.0, 2.0)));
        group.push(Text::new(Layer(1), "a", Point::new(5.0, 5.0)));
        assert_eq!(group.bbox(), Some(Rect::from_sides(0.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn text_translation_moves_anchor() {
        let text = Text::new(Layer(0), "origin", Point::zero()).translate(Point::new(1.0, -1.0));
        assert_eq!(text.loc(), Point::new(1.0, -1.0));
    }
}
