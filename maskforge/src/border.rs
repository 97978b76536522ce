//! Clearance-border extraction.
//!
//! A border is a thin ring around a feature, produced by growing the feature
//! outward and subtracting the feature back out. The seam-splitting variant
//! divides one shared border between two ownership groups that must land on
//! different layers; its stage order is load-bearing and is therefore encoded
//! here as a named pipeline rather than left to call sites.

use planegeom::bbox::Bbox;
use planegeom::rect::Rect;

use crate::algebra::{difference, dilate, intersection, union};
use crate::element::Layer;
use crate::error::{Error, Result};
use crate::shape::Shape;

/// Ratio of the clipping rectangle to the feature extent.
const CLIP_MARGIN_FACTOR: f64 = 10.0;

/// A border-extraction pipeline: one clearance width, one destination layer.
///
/// The width is a single configuration-wide constant per pipeline invocation.
#[derive(Debug, Clone, Copy)]
pub struct BorderPipeline {
    width: f64,
    layer: Layer,
}

impl BorderPipeline {
    /// Creates a pipeline producing rings of the given width on `layer`.
    pub fn new(width: f64, layer: Layer) -> Result<Self> {
        if width <= 0.0 {
            return Err(Error::config(
                "border.width",
                format!("must be positive, got {width}"),
            ));
        }
        Ok(Self { width, layer })
    }

    /// Returns the clearance width of this pipeline.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Produces the clearance ring around the union of `shapes`.
    ///
    /// The clipping rectangle is derived from the joint bounding box, expanded
    /// by many multiples of the ring width so that only artifacts far from the
    /// feature boundary are discarded. An empty input yields an empty ring.
    pub fn ring<'a>(&self, shapes: impl IntoIterator<Item = &'a Shape>) -> Shape {
        let feature = union(shapes, self.layer);
        let clip = match feature.bbox() {
            Some(bbox) => bbox.expand_all(CLIP_MARGIN_FACTOR * self.width),
            None => return Shape::empty(self.layer),
        };
        self.ring_clipped(&feature, clip)
    }

    /// Produces the clearance ring around `feature`, clipped to `clip`.
    ///
    /// Stage order: dilate, then intersect with the clip, then subtract the
    /// feature. Subtracting before clipping would leave dilation artifacts
    /// outside the clip window in the result.
    pub fn ring_clipped(&self, feature: &Shape, clip: Rect) -> Shape {
        let grown = dilate(feature, self.width, self.layer);
        let clipped = intersection(&grown, &Shape::from_rect(self.layer, clip), self.layer);
        difference(&clipped, feature, self.layer)
    }

    /// Splits one shared border between two ownership groups.
    ///
    /// `coarse` and `fine` share a physical border region but their rings must
    /// land on separate destination layers. Stages:
    ///
    /// 1. the combined ring over the union of both groups;
    /// 2. each group's own ring, computed independently;
    /// 3. the combined ring intersected with each group's own ring, assigning
    ///    ownership of the shared boundary;
    /// 4. the coarse assignment subtracted from the fine assignment,
    ///    eliminating double coverage at the seam.
    ///
    /// Stage 3 must precede stage 4: subtracting the raw group rings before
    /// intersecting with the combined ring double-counts the seam region.
    ///
    /// `keep_out`, when given, is cleared from every intermediate ring
    /// (the region where the groups converge and no clearance is wanted).
    pub fn split<'a, 'b>(
        &self,
        coarse: impl IntoIterator<Item = &'a Shape>,
        fine: impl IntoIterator<Item = &'b Shape>,
        keep_out: Option<Rect>,
        coarse_layer: Layer,
        fine_layer: Layer,
    ) -> (Shape, Shape) {
        let coarse_feature = union(coarse, self.layer);
        let fine_feature = union(fine, self.layer);
        let all = union([&coarse_feature, &fine_feature], self.layer);

        let combined = self.cleared(self.ring([&all]), keep_out);
        let ring_coarse = self.cleared(self.ring([&coarse_feature]), keep_out);
        let ring_fine = self.cleared(self.ring([&fine_feature]), keep_out);

        let owned_coarse = intersection(&combined, &ring_coarse, coarse_layer);
        let owned_fine = intersection(&combined, &ring_fine, fine_layer);
        let owned_fine = difference(&owned_fine, &owned_coarse, fine_layer);
        (owned_coarse, owned_fine)
    }

    fn cleared(&self, ring: Shape, keep_out: Option<Rect>) -> Shape {
        match keep_out {
            Some(window) => difference(
                &ring,
                &Shape::from_rect(self.layer, window),
                ring.layer(),
            ),
            None => ring,
        }
    }
}
