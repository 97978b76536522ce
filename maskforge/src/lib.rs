//! Photomask layout generation for superconducting-qubit wafers.
//!
//! maskforge builds repeated chip cells from reusable parametric features
//! (alignment markers, resonators, tapered leads, Josephson-junction stacks,
//! meandering inductor traces), positions them by computed offsets, sheathes
//! them in per-layer clearance borders produced through boolean polygon
//! operations, and tiles the chips into a wafer with a write-field grid and
//! wafer outline.
//!
//! The polygon boolean engine is external ([`geo`]); the output sink is a
//! GDSII library handed to [`gds21`]. Everything in between is deterministic,
//! single-threaded batch computation over one configuration bundle.
//!
//! # Example
//!
//! ```no_run
//! use maskforge::config::MaskConfig;
//!
//! let cfg = MaskConfig::default();
//! maskforge::generate(&cfg, "wafer.gds").unwrap();
//! ```
#![warn(missing_docs)]

pub mod algebra;
pub mod autolayout;
pub mod border;
pub mod chip;
pub mod components;
pub mod config;
pub mod element;
pub mod error;
pub mod gds;
pub mod junction;
pub mod lead;
pub mod meander;
pub mod path;
pub mod qubit;
pub mod shape;
pub mod wafer;

pub use error::{Error, Result};

use std::path::Path;

/// Assembles the full wafer described by `cfg` and writes it to `path` as a
/// single-cell GDS library.
pub fn generate(cfg: &config::MaskConfig, path: impl AsRef<Path>) -> Result<()> {
    let elements = wafer::wafer(cfg)?;
    gds::write(&elements, "wafer", path)
}
