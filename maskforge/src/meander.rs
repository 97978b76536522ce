//! Meandering inductor ("snake") traces.
//!
//! A meander is one continuous trace: a circular head, a straight neck, a
//! lead-in turn, and an alternating sequence of 180-degree turns and straight
//! runs folded back and forth, closed by a shorter terminal run. The fold
//! count is set by the hook count; a hook is one 180-degree turn plus one
//! full-length run.

use std::f64::consts::{FRAC_PI_2, PI};

use planegeom::point::Point;
use planegeom::polygon::Polygon;

use crate::algebra::union;
use crate::config::MeanderConfig;
use crate::error::{Error, Result};
use crate::path::PathBuilder;
use crate::shape::Shape;

/// Chord segments in the tessellated head disc.
const HEAD_SEGMENTS: usize = 64;

/// The vertical sense of the meander neck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeckSense {
    /// The neck runs in the +y direction.
    Up,
    /// The neck runs in the -y direction.
    Down,
}

/// Generates the meander trace described by `cfg`, with the neck leaving the
/// head in the given sense.
///
/// The output is the union of head and body as one shape on the configured
/// layer. The generator validates degeneracy only (non-positive extents,
/// a half-run consumed entirely by the lead-in turn); it does not check
/// self-intersection for arbitrary hook counts. Callers are responsible for
/// keeping the hook count within the range where the head, neck, and folds
/// do not overlap for their chosen radii and run lengths.
pub fn meander(cfg: &MeanderConfig, sense: NeckSense) -> Result<Shape> {
    let path = build_path(cfg, sense)?;
    let head = Shape::from_ring(
        cfg.layer,
        Polygon::circle(Point::zero(), cfg.head_radius, HEAD_SEGMENTS),
    );
    let body = path.finish(cfg.layer);
    Ok(union([&head, &body], cfg.layer))
}

/// Builds the centerline path of the meander body.
///
/// The neck starts at the head center. After the lead-in quarter turn, the
/// first run is half-length (minus the turn radius); hooks then alternate
/// 180-degree turns between the two senses:
/// an even hook count `n` yields `n/2` symmetric turn-pairs terminated by one
/// extra turn of the first sense; an odd `n` yields one leading first-sense
/// turn and run, `(n-1)/2` symmetric pairs, and a terminal second-sense turn.
fn build_path(cfg: &MeanderConfig, sense: NeckSense) -> Result<PathBuilder> {
    cfg.validate()?;
    let r = cfg.turn_radius;
    let run = cfg.run_length;
    let heading = match sense {
        NeckSense::Up => FRAC_PI_2,
        NeckSense::Down => -FRAC_PI_2,
    };
    let mut path = PathBuilder::new(cfg.thickness, Point::zero(), heading);
    path.run(cfg.neck_length);
    path.turn(r, -FRAC_PI_2);
    path.run(run / 2.0 - r);
    if cfg.hooks % 2 == 0 {
        for _ in 0..cfg.hooks / 2 {
            path.turn(r, PI).run(run);
            path.turn(r, -PI).run(run);
        }
        path.turn(r, PI);
    } else {
        path.turn(r, PI).run(run);
        for _ in 0..(cfg.hooks - 1) / 2 {
            path.turn(r, -PI).run(run);
            path.turn(r, PI).run(run);
        }
        path.turn(r, -PI);
    }
    path.run(cfg.final_run_length);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use planegeom::bbox::Bbox;

    fn config(hooks: u32) -> MeanderConfig {
        MeanderConfig {
            hooks,
            ..MeanderConfig::default()
        }
    }

    /// Closed-form centerline length: neck, lead-in quarter turn, half run,
    /// the parity-dependent hook sequence, and the terminal run.
    fn expected_length(cfg: &MeanderConfig, pairs: u32, extra_half_turns: u32, runs: u32) -> f64 {
        cfg.neck_length
            + FRAC_PI_2 * cfg.turn_radius
            + (cfg.run_length / 2.0 - cfg.turn_radius)
            + pairs as f64 * 2.0 * (PI * cfg.turn_radius + cfg.run_length)
            + extra_half_turns as f64 * PI * cfg.turn_radius
            + runs as f64 * cfg.run_length
            + cfg.final_run_length
    }

    #[test]
    fn even_hook_count_yields_pairs_plus_terminal_turn() {
        let cfg = config(4);
        let path = build_path(&cfg, NeckSense::Down).unwrap();
        // Lead-in quarter turn, two full turn-pairs, one terminal half turn.
        assert_eq!(path.turns(), 1 + 4 + 1);
        assert_relative_eq!(
            path.length(),
            expected_length(&cfg, 2, 1, 0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn odd_hook_count_yields_leading_hook_plus_pairs() {
        let cfg = config(7);
        let path = build_path(&cfg, NeckSense::Down).unwrap();
        // Lead-in, leading hook, three pairs, terminal half turn.
        assert_eq!(path.turns(), 1 + 1 + 6 + 1);
        assert_relative_eq!(
            path.length(),
            expected_length(&cfg, 3, 2, 1),
            epsilon = 1e-9
        );
    }

    #[test]
    fn hand_computed_length_for_default_dimensions() {
        // n = 4, r = 200, run = 1400, neck = 1100, final = 700:
        // 1100 + 100π + 500 + 2(200π + 1400 + 200π + 1400) + 200π + 700
        let path = build_path(&config(4), NeckSense::Up).unwrap();
        let expected = 1100.0
            + 100.0 * PI
            + 500.0
            + 2.0 * (200.0 * PI + 1400.0 + 200.0 * PI + 1400.0)
            + 200.0 * PI
            + 700.0;
        assert_relative_eq!(path.length(), expected, epsilon = 1e-9);
    }

    #[test]
    fn neck_sense_flips_the_trace() {
        let up = meander(&config(4), NeckSense::Up).unwrap();
        let down = meander(&config(4), NeckSense::Down).unwrap();
        assert!(up.bbox_rect().top() > -down.bbox_rect().bot() - 1.0);
        assert!(down.bbox_rect().bot() < -1.0);
        assert!(up.bbox_rect().top() > 1.0);
    }

    #[test]
    fn degenerate_half_run_is_rejected() {
        let cfg = MeanderConfig {
            run_length: 300.0,
            ..MeanderConfig::default()
        };
        // Half-run 150 does not clear the 200 turn radius.
        let err = build_path(&cfg, NeckSense::Up).unwrap_err();
        assert!(err.to_string().contains("meander.run_length"));
    }
}
