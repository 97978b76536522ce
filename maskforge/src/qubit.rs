//! Qubit assembly: junction stack, mirrored tapered leads, discharger, and
//! the ownership-split clearance border.

use std::f64::consts::PI;

use planegeom::bbox::Bbox;
use planegeom::point::Point;
use planegeom::rect::Rect;
use planegeom::transform::{Transform, Transformation, Translate};

use crate::algebra::union;
use crate::border::BorderPipeline;
use crate::components::discharger;
use crate::config::MaskConfig;
use crate::element::Group;
use crate::error::Result;
use crate::junction::junction_stack;
use crate::shape::Shape;

/// Width multiple of the junction stack cleared of borders around the stitch
/// region.
const KEEP_OUT_FACTOR: f64 = 10.0;

/// Which qubit variant to assemble.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QubitVariant {
    /// A test junction: the pad lead is cut to the test length and the
    /// discharger is omitted.
    pub test: bool,
    /// Use the circular-pad lead instead of the rectangular one.
    pub circular: bool,
}

/// Assembles one qubit group centered on the origin.
///
/// The junction stack sits at the center; one lead is raised by half the
/// stack height and duplicated rotated 180 degrees to form the opposing
/// electrode connection. Test variants take the rectangular profile with the
/// test length substituted on an owned copy of the segment list; the
/// circular pad applies only to non-test qubits.
///
/// The clearance border is split between ownership groups: the coarse lead
/// bodies (plus the discharger) and the fine lead tips land on separate
/// border layers, with a keep-out window over the junction stitch region.
pub fn qubit(cfg: &MaskConfig, variant: QubitVariant) -> Result<Group> {
    let stack = junction_stack(&cfg.junction)?;
    let stack_bbox = stack.bbox().expect("junction stack is never empty");

    let profile = if variant.test {
        cfg.lead.profile()?.with_final_length(cfg.lead.test_length)
    } else if variant.circular {
        cfg.lead.circular_profile()?
    } else {
        cfg.lead.profile()?
    };
    let lead = if variant.circular && !variant.test {
        profile.build_with_pad(cfg.lead.pad_radius)
    } else {
        profile.build()
    };

    let raise = Point::new(0.0, stack_bbox.height() / 2.0);
    let coarse1 = lead.coarse.clone().translate(raise);
    let fine1 = lead.fine.clone().translate(raise);
    let flip = Transformation::rotate(PI);
    let coarse2 = coarse1.clone().transform(flip);
    let fine2 = fine1.clone().transform(flip);

    let arc = (!variant.test).then(|| discharger(&cfg.discharger));

    // The coarse bodies and the discharger merge into one physical feature.
    let mut coarse_parts: Vec<&Shape> = vec![&coarse1, &coarse2];
    if let Some(arc) = arc.as_ref() {
        coarse_parts.push(arc);
    }
    let coarse_feature = union(coarse_parts.iter().copied(), cfg.lead.coarse_layer);

    let keep_out = Rect::from_center(
        Point::zero(),
        KEEP_OUT_FACTOR * stack_bbox.width(),
        stack_bbox.height(),
    );
    let pipeline = BorderPipeline::new(cfg.border.width, cfg.border.layer)?;
    let (border_coarse, border_fine) = pipeline.split(
        [&coarse_feature],
        [&fine1, &fine2],
        Some(keep_out),
        cfg.border.layer,
        cfg.border.fine_layer,
    );

    let mut group = Group::new();
    for shape in stack {
        group.push(shape);
    }
    group.push(coarse_feature);
    group.push(fine1);
    group.push(fine2);
    group.push(border_coarse);
    group.push(border_fine);
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Layer;
    use approx::assert_relative_eq;

    fn shapes_on(group: &Group, layer: Layer) -> usize {
        group.shapes().filter(|s| s.layer() == layer).count()
    }

    #[test]
    fn nominal_qubit_carries_split_borders() {
        let cfg = MaskConfig::default();
        let group = qubit(
            &cfg,
            QubitVariant {
                test: false,
                circular: true,
            },
        )
        .unwrap();
        // 7 stack shapes + coarse feature + 2 fine pieces + 2 border shapes.
        assert_eq!(group.elements().len(), 12);
        assert_eq!(shapes_on(&group, Layer(6)), 1);
        assert_eq!(shapes_on(&group, Layer(13)), 1);
        assert_eq!(shapes_on(&group, Layer(11)), 2);
    }

    #[test]
    fn qubit_is_mirror_symmetric_about_the_origin() {
        let cfg = MaskConfig::default();
        let group = qubit(&cfg, QubitVariant::default()).unwrap();
        let bbox = group.bbox_rect();
        assert_relative_eq!(bbox.center().y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_variant_has_no_discharger_and_shorter_pad() {
        let cfg = MaskConfig::default();
        let nominal = qubit(
            &cfg,
            QubitVariant {
                test: false,
                circular: true,
            },
        )
        .unwrap();
        let test = qubit(
            &cfg,
            QubitVariant {
                test: true,
                circular: true,
            },
        )
        .unwrap();
        assert!(test.height() < nominal.height());
        // The test variant substitutes the rectangular profile's final
        // segment; the discharger arc is absent either way in its extent.
        let cfg_height = cfg.junction.strap.height;
        assert!(test.height() > cfg_height);
    }

    #[test]
    fn borders_avoid_the_junction_keep_out() {
        let cfg = MaskConfig::default();
        let group = qubit(&cfg, QubitVariant::default()).unwrap();
        let keep_out = Shape::from_rect(
            Layer(0),
            Rect::from_center(Point::zero(), 10.0 * 0.58, 1.0),
        );
        for layer in [Layer(6), Layer(13)] {
            let border = group
                .shapes()
                .find(|s| s.layer() == layer)
                .expect("border shape present");
            let overlap = crate::algebra::intersection(border, &keep_out, Layer(0));
            assert_relative_eq!(overlap.area(), 0.0, epsilon = 1e-9);
        }
    }
}
