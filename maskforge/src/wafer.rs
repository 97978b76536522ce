//! Wafer assembly: the chip-column sweep, write-field grid, and wafer
//! outline.

use planegeom::bbox::Bbox;
use planegeom::point::Point;
use planegeom::polygon::Polygon;
use planegeom::rect::Rect;
use planegeom::transform::TranslateMut;
use tracing::info;

use crate::algebra::difference;
use crate::chip::chip;
use crate::config::MaskConfig;
use crate::element::{Element, Text};
use crate::error::Result;
use crate::shape::Shape;

/// Chord segments in the tessellated wafer outline.
const WAFER_SEGMENTS: usize = 256;

/// Assembles the full wafer and returns its flat element list in draw order:
/// chip columns, then the write-field grid, then the wafer outline.
///
/// Each column derives its own deep copy of the configuration and applies one
/// swept junction strap width through a pure override, so no column's
/// geometry can alias another's parameters. The assembled chip array is
/// re-centered on the origin before the overlays are added.
pub fn wafer(cfg: &MaskConfig) -> Result<Vec<Element>> {
    cfg.validate()?;
    let columns = cfg.wafer.columns;
    let (first, last) = cfg.wafer.strap_sweep;

    let mut parts: Vec<Element> = Vec::new();
    let mut chip_width = 0.0;
    for i in 0..columns {
        let width = if columns > 1 {
            first + (last - first) * i as f64 / (columns - 1) as f64
        } else {
            first
        };
        let mut column_cfg = cfg.clone();
        column_cfg.junction = cfg.junction.with_strap_width(width);
        info!(column = i + 1, strap_width = width, "assembling chip column");
        let labels = (format!("Col{}", i + 1), format!("W{width:.2}"));
        let mut column = chip(&column_cfg, [labels.0.as_str(), labels.1.as_str()])?;
        if i == 0 {
            chip_width = column.width();
        }
        column.translate_mut(Point::new(
            (chip_width + cfg.chip.margin) * i as f64,
            0.0,
        ));
        parts.extend(column.into_elements());
    }

    // Re-center the chip array on the origin.
    let center = parts.bbox_rect().center();
    parts.translate_mut(-center);

    parts.extend(write_field_grid(cfg, parts.bbox_rect()));
    parts.push(wafer_outline(cfg).into());
    Ok(parts)
}

/// Tiles the write-field grid over `extent` and labels it.
///
/// One rectangle per field, covering the extent symmetrically about the
/// origin, plus two annotations above the grid stating the extent and the
/// field size.
fn write_field_grid(cfg: &MaskConfig, extent: Rect) -> Vec<Element> {
    let (dx, dy) = cfg.wafer.grid_size;
    let (half_x, half_y) = (extent.width() / 2.0, extent.height() / 2.0);
    let num_x = (half_x / dx).ceil() as i64;
    let num_y = (half_y / dy).ceil() as i64;
    let mut elements: Vec<Element> = Vec::with_capacity(((2 * num_x + 1) * (2 * num_y + 1)) as usize + 2);
    for i in -num_x..=num_x {
        for j in -num_y..=num_y {
            elements.push(
                Shape::from_rect(
                    cfg.wafer.grid_layer,
                    Rect::from_center(Point::new(i as f64 * dx, j as f64 * dy), dx, dy),
                )
                .into(),
            );
        }
    }
    let corner = Point::new(-num_x as f64 * dx, num_y as f64 * dy);
    elements.push(
        Text::new(
            cfg.wafer.grid_layer,
            format!("Extent [{half_x:.0}, {half_y:.0}]"),
            corner + Point::new(0.0, 2.0 * dy),
        )
        .with_size(dy)
        .into(),
    );
    elements.push(
        Text::new(
            cfg.wafer.grid_layer,
            format!("Field Size [{dx:.0}, {dy:.0}]"),
            corner + Point::new(0.0, dy),
        )
        .with_size(dy)
        .into(),
    );
    elements
}

/// Builds the wafer outline: a disc with the flat cut away at the configured
/// x position.
fn wafer_outline(cfg: &MaskConfig) -> Shape {
    let radius = cfg.wafer.radius;
    let disc = Shape::from_ring(
        cfg.wafer.layer,
        Polygon::circle(Point::zero(), radius, WAFER_SEGMENTS),
    );
    let cut = Shape::from_rect(
        cfg.wafer.layer,
        Rect::from_sides(
            -radius - 1.0,
            -radius - 1.0,
            cfg.wafer.flat_at,
            radius + 1.0,
        ),
    );
    difference(&disc, &cut, cfg.wafer.layer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn outline_is_flattened_on_the_left() {
        let cfg = MaskConfig::default();
        let outline = wafer_outline(&cfg);
        let bbox = outline.bbox_rect();
        assert_relative_eq!(bbox.left(), cfg.wafer.flat_at, epsilon = 1e-6);
        assert_relative_eq!(bbox.right(), cfg.wafer.radius, epsilon = 10.0);
    }

    #[test]
    fn grid_covers_the_extent() {
        let cfg = MaskConfig::default();
        let extent = Rect::from_center(Point::zero(), 1000.0, 500.0);
        let elements = write_field_grid(&cfg, extent);
        let shapes: Vec<&Shape> = elements.iter().filter_map(Element::shape).collect();
        // ceil(500/290) = 2, ceil(250/300) = 1 per half-axis.
        assert_eq!(shapes.len(), 5 * 3);
        let grid_bbox = shapes.bbox().unwrap();
        assert!(grid_bbox.width() >= extent.width());
        assert!(grid_bbox.height() >= extent.height());
        assert_eq!(elements.iter().filter(|e| e.text().is_some()).count(), 2);
    }
}
