//! Conversion of the flat element list to GDSII structures.
//!
//! The core's obligation ends at handing the sink a complete, correctly
//! ordered shape and label list: everything here maps elements one-to-one
//! onto [`gds21`] records inside a single top-level cell. Micron coordinates
//! are scaled to nanometer database units; file-format bit layout is entirely
//! [`gds21`]'s concern.

use std::path::Path;

use tracing::{debug, span, Level};

use crate::algebra::fracture;
use crate::element::{Element, Text};
use crate::error::Result;
use crate::shape::Shape;

/// Database units per micron (nanometer grid).
const DB_UNITS_PER_UM: f64 = 1000.0;

/// Converts `elements` into a GDS library holding one cell of the given name,
/// with an `origin` label at (0, 0).
pub fn export(elements: &[Element], cell_name: &str) -> gds21::GdsLibrary {
    let span = span!(Level::INFO, "gds export", cell = cell_name);
    let _guard = span.enter();

    let mut cell = gds21::GdsStruct::new(cell_name);
    for element in elements {
        match element {
            Element::Shape(shape) => cell.elems.extend(convert_shape(shape)),
            Element::Text(text) => cell.elems.push(convert_text(text).into()),
        }
    }
    cell.elems.push(
        gds21::GdsTextElem {
            string: "origin".into(),
            layer: 0,
            texttype: 0,
            xy: gds21::GdsPoint::new(0, 0),
            ..Default::default()
        }
        .into(),
    );
    debug!(elements = cell.elems.len(), "converted cell");

    let mut lib = gds21::GdsLibrary::new("maskforge");
    lib.units = gds21::GdsUnits::new(1e-3, 1e-9);
    lib.structs.push(cell);
    lib
}

/// Converts `elements` and saves the library to `path`.
pub fn write(elements: &[Element], cell_name: &str, path: impl AsRef<Path>) -> Result<()> {
    let lib = export(elements, cell_name);
    lib.save(path.as_ref())?;
    Ok(())
}

/// Converts one shape into boundary records, one per polygon.
///
/// Interior rings are fractured away first; GDS boundaries cannot express
/// holes.
fn convert_shape(shape: &Shape) -> Vec<gds21::GdsElement> {
    let fractured = fracture(shape);
    fractured
        .multi_polygon()
        .iter()
        .map(|poly| {
            debug_assert!(poly.interiors().is_empty());
            let mut xy: Vec<gds21::GdsPoint> = poly
                .exterior()
                .0
                .iter()
                .map(|coord| gds21::GdsPoint::new(to_db(coord.x), to_db(coord.y)))
                .collect();
            // Close the ring if the exterior does not already repeat its
            // first coordinate.
            let needs_close = match (xy.first(), xy.last()) {
                (Some(first), Some(last)) => (first.x, first.y) != (last.x, last.y),
                _ => false,
            };
            if needs_close {
                let first = gds21::GdsPoint::new(xy[0].x, xy[0].y);
                xy.push(first);
            }
            gds21::GdsBoundary {
                layer: shape.layer().0,
                datatype: 0,
                xy,
                ..Default::default()
            }
            .into()
        })
        .collect()
}

fn convert_text(text: &Text) -> gds21::GdsTextElem {
    let strans = (text.angle() != 0.0 || text.size() != 1.0).then(|| gds21::GdsStrans {
        angle: (text.angle() != 0.0).then(|| text.angle().to_degrees()),
        mag: (text.size() != 1.0).then(|| text.size()),
        ..Default::default()
    });
    gds21::GdsTextElem {
        string: text.string().as_str().into(),
        layer: text.layer().0,
        texttype: 0,
        xy: gds21::GdsPoint::new(to_db(text.loc().x), to_db(text.loc().y)),
        strans,
        ..Default::default()
    }
}

fn to_db(um: f64) -> i32 {
    (um * DB_UNITS_PER_UM).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Layer, Text};
    use planegeom::point::Point;
    use planegeom::rect::Rect;

    #[test]
    fn export_produces_one_cell_with_origin_label() {
        let elements: Vec<Element> = vec![
            Shape::from_rect(Layer(12), Rect::from_sides(0.0, 0.0, 1.5, 2.0)).into(),
            Text::new(Layer(15), "hello", Point::new(1.0, -1.0)).into(),
        ];
        let lib = export(&elements, "top");
        assert_eq!(lib.structs.len(), 1);
        let cell = &lib.structs[0];
        assert_eq!(cell.name, "top");
        // One boundary, one text, one origin label.
        assert_eq!(cell.elems.len(), 3);
    }

    #[test]
    fn boundary_coordinates_are_nanometers_and_closed() {
        let elements: Vec<Element> =
            vec![Shape::from_rect(Layer(3), Rect::from_sides(0.0, 0.0, 1.5, 2.0)).into()];
        let lib = export(&elements, "top");
        let gds21::GdsElement::GdsBoundary(boundary) = &lib.structs[0].elems[0] else {
            panic!("expected a boundary");
        };
        assert_eq!(boundary.layer, 3);
        let first = boundary.xy.first().unwrap();
        let last = boundary.xy.last().unwrap();
        assert_eq!((first.x, first.y), (last.x, last.y));
        assert!(boundary
            .xy
            .iter()
            .any(|p| p.x == 1500 && p.y == 2000));
    }

    #[test]
    fn rotated_text_carries_strans_angle() {
        let elements: Vec<Element> = vec![Text::new(Layer(12), "W1.60", Point::zero())
            .with_angle(-std::f64::consts::FRAC_PI_2)
            .into()];
        let lib = export(&elements, "top");
        let gds21::GdsElement::GdsTextElem(text) = &lib.structs[0].elems[0] else {
            panic!("expected a text element");
        };
        let strans = text.strans.as_ref().expect("rotated text needs strans");
        assert_eq!(strans.angle, Some(-90.0));
    }
}
