//! Single-chip assembly.
//!
//! A chip is a fixed topology of feature rows laid out by the auto-layout
//! engine, wrapped in a chip outline rectangle and sheathed with clearance
//! borders. Qubit groups carry their own split borders; every other feature
//! group gets a plain ring.

use std::f64::consts::{FRAC_PI_2, PI};

use planegeom::bbox::Bbox;
use tracing::debug;

use crate::autolayout::{auto_layout, Spacing};
use crate::border::BorderPipeline;
use crate::components::{marker_l, marker_v, resonator};
use crate::config::MaskConfig;
use crate::element::Group;
use crate::error::Result;
use crate::meander::{meander, NeckSense};
use crate::qubit::{qubit, QubitVariant};
use crate::shape::Shape;

/// Assembles one chip centered horizontally on its marker columns, with the
/// two labels carried by the top corner markers.
///
/// Row order, top to bottom: corner markers, vernier markers, resonator,
/// qubit, meander, two vernier rows, corner markers, the test-qubit row, and
/// closing corner markers.
pub fn chip(cfg: &MaskConfig, labels: [&str; 2]) -> Result<Group> {
    cfg.validate()?;
    debug!(labels = ?labels, "assembling chip");

    let qubit1 = qubit(
        cfg,
        QubitVariant {
            test: false,
            circular: true,
        },
    )?;
    let test_qubit = qubit(
        cfg,
        QubitVariant {
            test: true,
            circular: true,
        },
    )?;
    let snake = Group::from_elements([meander(&cfg.meander, NeckSense::Down)?.into()]);

    let test_row: Vec<Group> = (0..cfg.chip.num_test_qubits)
        .map(|_| test_qubit.clone())
        .collect();
    let rows = vec![
        vec![
            marker_l(&cfg.marker, Some(labels[0]), 0.0),
            marker_l(&cfg.marker, Some(labels[1]), -FRAC_PI_2),
        ],
        vec![marker_v(&cfg.marker, 0.0), marker_v(&cfg.marker, PI)],
        vec![resonator(&cfg.resonator)],
        vec![qubit1],
        vec![snake],
        vec![marker_v(&cfg.marker, PI), marker_v(&cfg.marker, 0.0)],
        vec![marker_v(&cfg.marker, 0.0), marker_v(&cfg.marker, PI)],
        vec![
            marker_l(&cfg.marker, None, 0.0),
            marker_l(&cfg.marker, None, -FRAC_PI_2),
        ],
        test_row,
        vec![
            marker_l(&cfg.marker, None, FRAC_PI_2),
            marker_l(&cfg.marker, None, PI),
        ],
    ];
    // Plain rings go on every row except the qubit and test-qubit rows, which
    // carry their own split borders.
    let ringed: Vec<bool> = vec![
        true, true, true, false, true, true, true, true, false, true,
    ];
    let row_lengths: Vec<usize> = rows.iter().map(Vec::len).collect();

    let marker_gap = cfg.chip.marker_gap;
    let spacing = Spacing {
        vertical: cfg.chip.vertical_gaps.clone(),
        horizontal: vec![
            marker_gap,
            marker_gap,
            0.0,
            0.0,
            0.0,
            marker_gap,
            marker_gap,
            marker_gap,
            cfg.chip.test_qubit_gap,
            marker_gap,
        ],
    };
    let placed = auto_layout(rows, &spacing)?;

    let pipeline = BorderPipeline::new(cfg.border.width, cfg.border.layer)?;
    let flags = row_lengths
        .iter()
        .zip(&ringed)
        .flat_map(|(&len, &flag)| std::iter::repeat(flag).take(len));
    let mut borders: Vec<Shape> = Vec::new();
    for (group, flag) in placed.iter().zip(flags) {
        if flag {
            borders.push(pipeline.ring(group.shapes()));
        }
    }

    let mut out = Group::new();
    for group in placed {
        out.extend(group);
    }
    let outline = out
        .bbox_rect()
        .expand_all(cfg.chip.padding);
    out.push(Shape::from_rect(cfg.chip.layer, outline));
    for border in borders {
        out.push(border);
    }
    Ok(out)
}
