//! Tapered leads split into coarse and fine pieces.
//!
//! A lead is a stepped, mirror-symmetric conductor connecting a small
//! junction feature to a larger pad. Its profile is built as a half-outline
//! on one side of the lead axis, mirrored, and unioned into one solid; the
//! solid is then cut once at the coarse/fine seam so the two pieces can be
//! written at different exposure resolutions.

use planegeom::bbox::Bbox;
use planegeom::point::Point;
use planegeom::polygon::Polygon;
use planegeom::rect::Rect;
use planegeom::transform::{Transform, Transformation};

use crate::algebra::{intersection, union};
use crate::element::Layer;
use crate::error::{Error, Result};
use crate::shape::Shape;

/// Sample count per cubic transition curve in the profile outline.
const TRANSITION_STEPS: usize = 8;

/// Chord segments in the tessellated pad disc.
const PAD_SEGMENTS: usize = 64;

/// One straight section of a lead profile.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    /// Full width of the section.
    pub width: f64,
    /// Length of the section along the lead axis.
    pub length: f64,
}

impl Segment {
    /// Creates a segment of the given width and length.
    pub const fn new(width: f64, length: f64) -> Self {
        Self { width, length }
    }
}

/// A composed lead: the coarse and fine sub-pieces of one solid.
#[derive(Debug, Clone)]
pub struct Lead {
    /// The piece beyond the seam, written at coarse resolution.
    pub coarse: Shape,
    /// The piece up to the seam, written at fine resolution.
    pub fine: Shape,
}

/// The parametric profile of a tapered lead.
///
/// Segments are ordered from the fine tip outward; `gaps[i]` is the axial
/// distance between segments `i` and `i + 1`, bridged by an s-curve
/// transition. The profile is a value: variants (test junctions, sweeps) are
/// derived with [`LeadProfile::with_final_length`] on an owned copy, never by
/// mutating a profile shared between lead instances.
#[derive(Debug, Clone)]
pub struct LeadProfile {
    segments: Vec<Segment>,
    gaps: Vec<f64>,
    overlap: f64,
    coarse_layer: Layer,
    fine_layer: Layer,
}

impl LeadProfile {
    /// Creates a lead profile.
    ///
    /// Fails fast if the segment and gap lists are inconsistent or any extent
    /// is degenerate.
    pub fn new(
        segments: Vec<Segment>,
        gaps: Vec<f64>,
        overlap: f64,
        coarse_layer: Layer,
        fine_layer: Layer,
    ) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::config("lead.segments", "must not be empty"));
        }
        if gaps.len() + 1 != segments.len() {
            return Err(Error::config(
                "lead.gaps",
                format!(
                    "expected {} entries for {} segments, got {}",
                    segments.len() - 1,
                    segments.len(),
                    gaps.len()
                ),
            ));
        }
        for (i, s) in segments.iter().enumerate() {
            if s.width <= 0.0 || s.length <= 0.0 {
                return Err(Error::config(
                    "lead.segments",
                    format!("segment {i} has non-positive extent"),
                ));
            }
        }
        if segments[0].length < segments[0].width / 2.0 {
            return Err(Error::config(
                "lead.segments",
                "first segment is shorter than its corner transition",
            ));
        }
        if gaps.iter().any(|&g| g < 0.0) {
            return Err(Error::config("lead.gaps", "gaps must be non-negative"));
        }
        Ok(Self {
            segments,
            gaps,
            overlap,
            coarse_layer,
            fine_layer,
        })
    }

    /// Returns an owned copy of this profile with the final segment's length
    /// replaced.
    ///
    /// This is how test-junction variants are derived: the override is local
    /// to the returned copy, leaving any profile shared with other lead
    /// instances untouched.
    pub fn with_final_length(&self, length: f64) -> Self {
        let mut derived = self.clone();
        derived
            .segments
            .last_mut()
            .expect("profiles are never empty")
            .length = length;
        derived
    }

    /// Returns the full axial length of the profile: all segment lengths plus
    /// all gaps.
    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(|s| s.length).sum::<f64>() + self.gaps.iter().sum::<f64>()
    }

    /// The axial position of the coarse/fine seam: the first segment and its
    /// gap, shifted by the overlap allowance.
    fn seam(&self) -> f64 {
        self.segments[0].length + self.gaps.first().copied().unwrap_or_default() + self.overlap
    }

    /// Builds the lead solid and splits it at the seam.
    pub fn build(&self) -> Lead {
        self.split(self.solid())
    }

    /// Builds the lead with a circular pad unioned onto the coarse piece.
    ///
    /// The pad center sits at the profile's total length plus the pad radius,
    /// pulled back by the overlap allowance so pad and lead stitch together.
    pub fn build_with_pad(&self, radius: f64) -> Lead {
        let mut lead = self.split(self.solid());
        let pad = Shape::from_ring(
            self.coarse_layer,
            Polygon::circle(
                Point::new(0.0, self.total_length() + radius - self.overlap),
                radius,
                PAD_SEGMENTS,
            ),
        );
        lead.coarse = union([&lead.coarse, &pad], self.coarse_layer);
        lead
    }

    /// Builds the mirrored solid on the coarse layer, base at the origin,
    /// extending along +y.
    fn solid(&self) -> Shape {
        let half = self.half_outline();
        let mirrored = half.clone().transform(Transformation::reflect_horiz());
        let half = Shape::from_ring(self.coarse_layer, half);
        let mirrored = Shape::from_ring(self.coarse_layer, mirrored);
        union([&half, &mirrored], self.coarse_layer)
    }

    /// Traces the +x half of the profile outline.
    ///
    /// The cursor starts on the axis, emits a quarter-corner into the first
    /// segment, an s-curve of its gap's height before each later segment, and
    /// finally returns to the axis; the ring closes back down the axis.
    fn half_outline(&self) -> Polygon {
        let mut pts: Vec<Point> = vec![Point::zero()];
        let mut x = 0.0;
        let mut y = 0.0;
        for (i, seg) in self.segments.iter().enumerate() {
            if i == 0 {
                let d = seg.width / 2.0;
                push_cubic(
                    &mut pts,
                    Point::new(x, y),
                    Point::new(x + d, y),
                    Point::new(x + d, y),
                    Point::new(x + d, y + d),
                );
                x += d;
                y += d;
                y += seg.length - d;
            } else {
                let dx = (seg.width - self.segments[i - 1].width) / 2.0;
                let dy = self.gaps[i - 1];
                push_cubic(
                    &mut pts,
                    Point::new(x, y),
                    Point::new(x, y + dy / 2.0),
                    Point::new(x + dx, y + dy / 2.0),
                    Point::new(x + dx, y + dy),
                );
                x += dx;
                y += dy;
                y += seg.length;
            }
            pts.push(Point::new(x, y));
        }
        pts.push(Point::new(0.0, y));
        Polygon::from_verts(pts)
    }

    /// Cuts `solid` at the seam, assigning the destination layers.
    fn split(&self, solid: Shape) -> Lead {
        let bbox = solid.bbox_rect().expand_all(1.0);
        let seam = self.seam();
        let fine_window = Rect::from_sides(bbox.left(), bbox.bot(), bbox.right(), seam);
        let coarse_window = Rect::from_sides(bbox.left(), seam, bbox.right(), bbox.top());
        Lead {
            coarse: intersection(
                &solid,
                &Shape::from_rect(self.coarse_layer, coarse_window),
                self.coarse_layer,
            ),
            fine: intersection(
                &solid,
                &Shape::from_rect(self.fine_layer, fine_window),
                self.fine_layer,
            ),
        }
    }
}

/// Samples a cubic Bezier from `p0` to `p3`, appending all but the start.
fn push_cubic(pts: &mut Vec<Point>, p0: Point, p1: Point, p2: Point, p3: Point) {
    for i in 1..=TRANSITION_STEPS {
        let t = i as f64 / TRANSITION_STEPS as f64;
        let u = 1.0 - t;
        let p = p0 * (u * u * u)
            + p1 * (3.0 * u * u * t)
            + p2 * (3.0 * u * t * t)
            + p3 * (t * t * t);
        pts.push(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn profile() -> LeadProfile {
        LeadProfile::new(
            vec![
                Segment::new(2.0, 20.0),
                Segment::new(10.0, 100.0),
                Segment::new(400.0, 800.0),
            ],
            vec![10.0, 40.0],
            1.5,
            Layer(12),
            Layer(11),
        )
        .unwrap()
    }

    #[test]
    fn gap_count_mismatch_is_rejected() {
        let err = LeadProfile::new(
            vec![Segment::new(2.0, 20.0), Segment::new(10.0, 100.0)],
            vec![],
            0.0,
            Layer(12),
            Layer(11),
        )
        .unwrap_err();
        assert!(err.to_string().contains("lead.gaps"));
    }

    #[test]
    fn solid_spans_the_profile() {
        let p = profile();
        let solid = p.solid();
        let bbox = solid.bbox_rect();
        assert_relative_eq!(bbox.bot(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(bbox.top(), p.total_length(), epsilon = 1e-9);
        assert_relative_eq!(bbox.left(), -200.0, epsilon = 1e-9);
        assert_relative_eq!(bbox.right(), 200.0, epsilon = 1e-9);
    }

    #[test]
    fn seam_split_is_complete_and_disjoint() {
        let p = profile();
        let solid = p.solid();
        let lead = p.build();
        assert_eq!(lead.coarse.layer(), Layer(12));
        assert_eq!(lead.fine.layer(), Layer(11));
        // Disjoint.
        let overlap = intersection(&lead.coarse, &lead.fine, Layer(0));
        assert_relative_eq!(overlap.area(), 0.0, epsilon = 1e-9);
        // Complete: areas sum and the joint bbox reproduces the solid's.
        assert_relative_eq!(
            lead.coarse.area() + lead.fine.area(),
            solid.area(),
            epsilon = 1e-6
        );
        let joint = union([&lead.coarse, &lead.fine], Layer(0)).bbox_rect();
        let solid_bbox = solid.bbox_rect();
        assert_relative_eq!(joint.bot(), solid_bbox.bot(), epsilon = 1e-9);
        assert_relative_eq!(joint.top(), solid_bbox.top(), epsilon = 1e-9);
        assert_relative_eq!(joint.left(), solid_bbox.left(), epsilon = 1e-9);
        assert_relative_eq!(joint.right(), solid_bbox.right(), epsilon = 1e-9);
    }

    #[test]
    fn fine_piece_ends_at_the_seam() {
        let p = profile();
        let lead = p.build();
        // Seam: 20 + 10 + 1.5.
        assert_relative_eq!(lead.fine.bbox_rect().top(), 31.5, epsilon = 1e-9);
        assert_relative_eq!(lead.coarse.bbox_rect().bot(), 31.5, epsilon = 1e-9);
    }

    #[test]
    fn with_final_length_leaves_the_base_profile_untouched() {
        let base = profile();
        let test_variant = base.with_final_length(80.0);
        assert_relative_eq!(test_variant.total_length(), 20.0 + 100.0 + 80.0 + 50.0);
        assert_relative_eq!(base.total_length(), 20.0 + 100.0 + 800.0 + 50.0);
    }

    #[test]
    fn pad_extends_the_coarse_piece() {
        let p = LeadProfile::new(
            vec![Segment::new(2.0, 20.0), Segment::new(10.0, 100.0)],
            vec![10.0],
            1.5,
            Layer(12),
            Layer(11),
        )
        .unwrap();
        let lead = p.build_with_pad(200.0);
        // Pad top: total length + 2r - overlap.
        assert_relative_eq!(
            lead.coarse.bbox_rect().top(),
            130.0 + 400.0 - 1.5,
            epsilon = 1e-2
        );
        assert_relative_eq!(lead.fine.bbox_rect().top(), 31.5, epsilon = 1e-9);
    }
}
