//! Chip-level primitive features: alignment markers, the resonator bar, and
//! the discharger arc.

use std::f64::consts::FRAC_PI_2;

use planegeom::point::Point;
use planegeom::polygon::Polygon;
use planegeom::rect::Rect;
use planegeom::transform::{Transform, Transformation, Translate};

use crate::algebra::union;
use crate::config::{DischargerConfig, MarkerConfig, ResonatorConfig};
use crate::element::{Group, Text};
use crate::shape::Shape;

/// Chord segments along each discharger arc edge.
const DISCHARGER_SEGMENTS: usize = 64;

/// Builds a corner ("L") alignment marker, rotated by `rotation` radians
/// about the origin.
///
/// The marker is two arms of the configured arm length and stroke width
/// meeting in a square corner at the origin. An optional label is placed
/// beside the corner, rotated a quarter turn clockwise so it reads along the
/// vertical arm; a marker rotated to the left-hand chip edge carries its
/// label shifted inward by one arm length so it stays inside the chip.
pub fn marker_l(cfg: &MarkerConfig, label: Option<&str>, rotation: f64) -> Group {
    let arm = cfg.l_arm_length;
    let w = cfg.l_stroke_width;
    let vertical = Rect::from_sides(-w / 2.0, -arm, w / 2.0, w / 2.0);
    let horizontal = Rect::from_sides(-w / 2.0, -w / 2.0, arm, w / 2.0);
    let corner = union(
        [
            &Shape::from_rect(cfg.layer, vertical),
            &Shape::from_rect(cfg.layer, horizontal),
        ],
        cfg.layer,
    )
    .transform(Transformation::rotate(rotation));

    let mut group = Group::new();
    group.push(corner);
    if let Some(label) = label {
        let mut text = Text::new(cfg.layer, label, Point::new(w, w))
            .with_size(cfg.l_text_size)
            .transform(Transformation::rotate(-FRAC_PI_2));
        if (rotation + FRAC_PI_2).abs() < 1e-9 {
            text = text.translate(Point::new(-arm, 0.0));
        }
        group.push(text);
    }
    group
}

/// Builds a vernier ("V") alignment marker: a triangle with its apex at the
/// origin pointing -x, rotated by `rotation` radians about the origin.
pub fn marker_v(cfg: &MarkerConfig, rotation: f64) -> Group {
    let (dx, dy) = cfg.v_size;
    let triangle = Polygon::from_verts(vec![
        Point::zero(),
        Point::new(dx, -dy / 2.0),
        Point::new(dx, dy / 2.0),
    ])
    .transform(Transformation::rotate(rotation));
    Group::from_elements([Shape::from_ring(cfg.layer, triangle).into()])
}

/// Builds the resonator bar: one rectangle centered on the origin.
pub fn resonator(cfg: &ResonatorConfig) -> Group {
    let (w, h) = cfg.size;
    Group::from_elements([
        Shape::from_rect(cfg.layer, Rect::from_center(Point::zero(), w, h)).into(),
    ])
}

/// Builds the discharger: an arc band of the configured radius and stroke
/// width swept about the origin between the configured angles.
pub fn discharger(cfg: &DischargerConfig) -> Shape {
    let (start, end) = cfg.angles;
    Shape::from_ring(
        cfg.layer,
        Polygon::annular_sector(
            Point::zero(),
            cfg.radius - cfg.width / 2.0,
            cfg.radius + cfg.width / 2.0,
            start,
            end,
            DISCHARGER_SEGMENTS,
        ),
    )
}
