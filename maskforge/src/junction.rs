//! Bridge-free Josephson-junction stacks.
//!
//! The stack is four rectangles on four layers: three nested, right-aligned
//! step rectangles raised above the axis, and one thin strap centered on the
//! origin. Each step has the next one subtracted so the exposure layers abut
//! instead of overlapping, and the processed steps are duplicated rotated
//! 180 degrees to form the opposing electrode.

use planegeom::point::Point;
use planegeom::rect::Rect;
use planegeom::transform::{Transform, Transformation};

use crate::algebra::difference;
use crate::config::JunctionConfig;
use crate::error::Result;
use crate::shape::Shape;

/// Builds the junction stack described by `cfg`, centered on the origin.
///
/// Returns the seven shapes in draw order: the three processed steps, their
/// rotated copies, and the strap.
pub fn junction_stack(cfg: &JunctionConfig) -> Result<Vec<Shape>> {
    cfg.validate()?;
    let raise = (cfg.steps[0].height + cfg.strap.height) / 2.0;
    let rects: Vec<Shape> = cfg
        .steps
        .iter()
        .map(|step| {
            // Right-align every step to the widest (first) one.
            let inset = (cfg.steps[0].width - step.width) / 2.0;
            Shape::from_rect(
                step.layer,
                Rect::from_center(Point::new(inset, raise), step.width, step.height),
            )
        })
        .collect();
    let mut steps = vec![
        difference(&rects[0], &rects[1], cfg.steps[0].layer),
        difference(&rects[1], &rects[2], cfg.steps[1].layer),
        rects[2].clone(),
    ];
    let rotated: Vec<Shape> = steps
        .iter()
        .map(|s| s.clone().transform(Transformation::rotate(std::f64::consts::PI)))
        .collect();
    steps.extend(rotated);
    steps.push(Shape::from_rect(
        cfg.strap.layer,
        Rect::from_center(Point::zero(), cfg.strap.width, cfg.strap.height),
    ));
    Ok(steps)
}
