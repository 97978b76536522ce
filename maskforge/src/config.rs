//! The configuration bundle.
//!
//! One read-mostly value object supplies every geometric constant: sizes,
//! gaps, radii, layer assignments, spacing vectors, and counts, all in
//! microns. Parameter sweeps derive variants by cloning the bundle and
//! applying a pure `with_*` override to the clone; nothing mutates a bundle
//! shared between builders.

use serde::{Deserialize, Serialize};

use crate::element::Layer;
use crate::error::{Error, Result};
use crate::lead::{LeadProfile, Segment};

/// Wafer-level constants: outline, write-field grid, and the column sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaferConfig {
    /// Radius of the wafer outline.
    pub radius: f64,
    /// The x position of the wafer flat; everything left of it is cut away.
    pub flat_at: f64,
    /// Layer of the wafer outline.
    pub layer: Layer,
    /// Write-field grid cell size (x, y).
    pub grid_size: (f64, f64),
    /// Layer of the write-field grid.
    pub grid_layer: Layer,
    /// Number of chip columns on the wafer.
    pub columns: usize,
    /// Junction strap widths swept linearly across the columns (first, last).
    pub strap_sweep: (f64, f64),
}

impl WaferConfig {
    fn validate(&self) -> Result<()> {
        if self.radius <= 0.0 {
            return Err(Error::config("wafer.radius", "must be positive"));
        }
        if self.flat_at <= -self.radius || self.flat_at >= self.radius {
            return Err(Error::config(
                "wafer.flat_at",
                "must lie strictly inside the wafer",
            ));
        }
        if self.grid_size.0 <= 0.0 || self.grid_size.1 <= 0.0 {
            return Err(Error::config("wafer.grid_size", "must be positive"));
        }
        if self.columns == 0 {
            return Err(Error::config("wafer.columns", "must be at least 1"));
        }
        Ok(())
    }
}

/// Chip-level constants: outline padding, tiling margin, and row spacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChipConfig {
    /// Distance between the outermost features and the chip outline.
    pub padding: f64,
    /// Distance between adjacent chips on the wafer.
    pub margin: f64,
    /// Layer of the chip outline.
    pub layer: Layer,
    /// Vertical gaps between adjacent feature rows, top to bottom.
    ///
    /// Must hold exactly one entry fewer than the chip has rows.
    pub vertical_gaps: Vec<f64>,
    /// Horizontal gap between the two markers of a marker row.
    pub marker_gap: f64,
    /// Horizontal gap between adjacent test qubits.
    pub test_qubit_gap: f64,
    /// Number of test qubits in the test row.
    pub num_test_qubits: usize,
}

impl ChipConfig {
    fn validate(&self) -> Result<()> {
        if self.padding < 0.0 || self.margin < 0.0 {
            return Err(Error::config("chip.padding", "must be non-negative"));
        }
        if self.vertical_gaps.iter().any(|&g| g <= 0.0) {
            return Err(Error::config("chip.vertical_gaps", "must be positive"));
        }
        if self.num_test_qubits == 0 {
            return Err(Error::config("chip.num_test_qubits", "must be at least 1"));
        }
        Ok(())
    }
}

/// Alignment-marker constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// Layer of all markers.
    pub layer: Layer,
    /// Arm length of the corner ("L") marker.
    pub l_arm_length: f64,
    /// Stroke width of the corner marker.
    pub l_stroke_width: f64,
    /// Glyph height of the corner marker's label.
    pub l_text_size: f64,
    /// Extent (x, y) of the vernier ("V") marker triangle.
    pub v_size: (f64, f64),
}

impl MarkerConfig {
    fn validate(&self) -> Result<()> {
        if self.l_arm_length <= 0.0 || self.l_stroke_width <= 0.0 {
            return Err(Error::config("marker.l_arm_length", "must be positive"));
        }
        if self.v_size.0 <= 0.0 || self.v_size.1 <= 0.0 {
            return Err(Error::config("marker.v_size", "must be positive"));
        }
        Ok(())
    }
}

/// Resonator-bar constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResonatorConfig {
    /// Extent (width, length) of the resonator bar.
    pub size: (f64, f64),
    /// Layer of the resonator.
    pub layer: Layer,
}

impl ResonatorConfig {
    fn validate(&self) -> Result<()> {
        if self.size.0 <= 0.0 || self.size.1 <= 0.0 {
            return Err(Error::config("resonator.size", "must be positive"));
        }
        Ok(())
    }
}

/// Meander-trace constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeanderConfig {
    /// Radius of the circular head.
    pub head_radius: f64,
    /// Trace width of the body.
    pub thickness: f64,
    /// Length of the straight neck, measured from the head center.
    pub neck_length: f64,
    /// Centerline radius shared by every turn.
    pub turn_radius: f64,
    /// Length of a full horizontal run.
    pub run_length: f64,
    /// Number of full hooks: a hook is a 180-degree turn plus one full run.
    pub hooks: u32,
    /// Length of the final, shorter horizontal run.
    pub final_run_length: f64,
    /// Layer of the whole trace.
    pub layer: Layer,
}

impl MeanderConfig {
    /// Fail-fast degeneracy checks. Self-intersection for large hook counts
    /// is not checked; see [`crate::meander::meander`].
    pub fn validate(&self) -> Result<()> {
        if self.head_radius <= 0.0 {
            return Err(Error::config("meander.head_radius", "must be positive"));
        }
        if self.thickness <= 0.0 {
            return Err(Error::config("meander.thickness", "must be positive"));
        }
        if self.neck_length <= 0.0 {
            return Err(Error::config("meander.neck_length", "must be positive"));
        }
        if self.turn_radius <= self.thickness / 2.0 {
            return Err(Error::config(
                "meander.turn_radius",
                "must exceed half the trace thickness",
            ));
        }
        if self.run_length / 2.0 <= self.turn_radius {
            return Err(Error::config(
                "meander.run_length",
                format!(
                    "half-run must clear the turn radius: {}/2 <= {}",
                    self.run_length, self.turn_radius
                ),
            ));
        }
        if self.final_run_length <= 0.0 {
            return Err(Error::config(
                "meander.final_run_length",
                "must be positive",
            ));
        }
        Ok(())
    }
}

/// Tapered-lead constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadConfig {
    /// Profile segments of the rectangular-pad lead, fine tip first.
    pub segments: Vec<Segment>,
    /// Inter-segment gaps; entry `i` separates segments `i` and `i + 1`.
    pub gaps: Vec<f64>,
    /// Profile segments of the circular-pad lead variant.
    pub circular_segments: Vec<Segment>,
    /// Pad radius of the circular-pad variant.
    pub pad_radius: f64,
    /// Final-segment length substituted for test junctions.
    pub test_length: f64,
    /// Seam overlap allowance between the coarse and fine pieces.
    pub overlap: f64,
    /// Layer of the fine piece.
    pub fine_layer: Layer,
    /// Layer of the coarse piece.
    pub coarse_layer: Layer,
}

impl LeadConfig {
    /// Builds the rectangular-pad lead profile.
    pub fn profile(&self) -> Result<LeadProfile> {
        LeadProfile::new(
            self.segments.clone(),
            self.gaps.clone(),
            self.overlap,
            self.coarse_layer,
            self.fine_layer,
        )
    }

    /// Builds the circular-pad lead profile.
    ///
    /// The circular variant has fewer segments than the rectangular one; it
    /// consumes the leading gaps.
    pub fn circular_profile(&self) -> Result<LeadProfile> {
        let n = self.circular_segments.len();
        if n == 0 || self.gaps.len() < n - 1 {
            return Err(Error::config(
                "lead.circular_segments",
                "must be non-empty and covered by the gap list",
            ));
        }
        LeadProfile::new(
            self.circular_segments.clone(),
            self.gaps[..n - 1].to_vec(),
            self.overlap,
            self.coarse_layer,
            self.fine_layer,
        )
    }

    fn validate(&self) -> Result<()> {
        self.profile()?;
        self.circular_profile()?;
        if self.pad_radius <= 0.0 {
            return Err(Error::config("lead.pad_radius", "must be positive"));
        }
        if self.test_length <= 0.0 {
            return Err(Error::config("lead.test_length", "must be positive"));
        }
        Ok(())
    }
}

/// Discharger-arc constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DischargerConfig {
    /// Centerline radius of the arc.
    pub radius: f64,
    /// Stroke width of the arc band.
    pub width: f64,
    /// Sweep angles (start, end) in radians; the sweep may be negative.
    pub angles: (f64, f64),
    /// Layer of the discharger.
    pub layer: Layer,
}

impl DischargerConfig {
    fn validate(&self) -> Result<()> {
        if self.width <= 0.0 || self.radius <= self.width / 2.0 {
            return Err(Error::config(
                "discharger.radius",
                "band must have positive inner radius",
            ));
        }
        if self.angles.0 == self.angles.1 {
            return Err(Error::config("discharger.angles", "sweep must be non-zero"));
        }
        Ok(())
    }
}

/// One rectangle of the junction stack.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JunctionStep {
    /// Full width of the rectangle.
    pub width: f64,
    /// Full height of the rectangle.
    pub height: f64,
    /// Layer of the rectangle.
    pub layer: Layer,
}

impl JunctionStep {
    /// Creates a junction step.
    pub const fn new(width: f64, height: f64, layer: Layer) -> Self {
        Self {
            width,
            height,
            layer,
        }
    }
}

/// Junction-stack constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JunctionConfig {
    /// The three nested, right-aligned step rectangles, widest first.
    pub steps: [JunctionStep; 3],
    /// The thin strap rectangle centered between the electrodes. Its width is
    /// the dimension swept across wafer columns.
    pub strap: JunctionStep,
}

impl JunctionConfig {
    /// Returns an owned copy with the strap width replaced.
    ///
    /// The override is local to the returned copy; the base bundle a sweep
    /// derives from is never touched.
    pub fn with_strap_width(&self, width: f64) -> Self {
        let mut derived = self.clone();
        derived.strap.width = width;
        derived
    }

    /// Fail-fast degeneracy checks.
    pub fn validate(&self) -> Result<()> {
        for (i, step) in self.steps.iter().enumerate() {
            if step.width <= 0.0 || step.height <= 0.0 {
                return Err(Error::config(
                    "junction.steps",
                    format!("step {i} has non-positive extent"),
                ));
            }
        }
        if self.strap.width <= 0.0 || self.strap.height <= 0.0 {
            return Err(Error::config("junction.strap", "has non-positive extent"));
        }
        Ok(())
    }
}

/// Clearance-border constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorderConfig {
    /// Width of the clearance ring sheathing every drawn feature.
    pub width: f64,
    /// Layer of plain borders and of the coarse share of split borders.
    pub layer: Layer,
    /// Layer of the fine share of split borders.
    pub fine_layer: Layer,
}

impl BorderConfig {
    fn validate(&self) -> Result<()> {
        if self.width <= 0.0 {
            return Err(Error::config("border.width", "must be positive"));
        }
        Ok(())
    }
}

/// The full configuration bundle: every geometric constant of a wafer run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskConfig {
    /// Wafer outline, grid, and sweep.
    pub wafer: WaferConfig,
    /// Chip outline and row spacing.
    pub chip: ChipConfig,
    /// Alignment markers.
    pub marker: MarkerConfig,
    /// Resonator bar.
    pub resonator: ResonatorConfig,
    /// Meander trace.
    pub meander: MeanderConfig,
    /// Tapered leads.
    pub lead: LeadConfig,
    /// Discharger arc.
    pub discharger: DischargerConfig,
    /// Junction stack.
    pub junction: JunctionConfig,
    /// Clearance borders.
    pub border: BorderConfig,
}

impl MaskConfig {
    /// Runs every fail-fast consistency check.
    ///
    /// Spacing-vector lengths are additionally checked against the concrete
    /// chip topology when the chip is assembled.
    pub fn validate(&self) -> Result<()> {
        self.wafer.validate()?;
        self.chip.validate()?;
        self.marker.validate()?;
        self.resonator.validate()?;
        self.meander.validate()?;
        self.lead.validate()?;
        self.discharger.validate()?;
        self.junction.validate()?;
        self.border.validate()?;
        Ok(())
    }
}

impl Default for MeanderConfig {
    fn default() -> Self {
        Self {
            head_radius: 550.0,
            thickness: 200.0,
            neck_length: 1100.0,
            turn_radius: 200.0,
            run_length: 1400.0,
            hooks: 4,
            final_run_length: 700.0,
            layer: Layer(12),
        }
    }
}

impl Default for JunctionConfig {
    fn default() -> Self {
        Self {
            steps: [
                JunctionStep::new(0.58, 0.9, Layer(8)),
                JunctionStep::new(0.5, 0.9, Layer(10)),
                JunctionStep::new(0.4, 0.7, Layer(9)),
            ],
            strap: JunctionStep::new(1.66, 0.1, Layer(7)),
        }
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            wafer: WaferConfig {
                radius: 25397.0,
                flat_at: -24122.0,
                layer: Layer(0),
                grid_size: (290.0, 300.0),
                grid_layer: Layer(15),
                columns: 8,
                strap_sweep: (1.52, 1.66),
            },
            chip: ChipConfig {
                padding: 195.0,
                margin: 100.0,
                layer: Layer(1),
                vertical_gaps: vec![
                    2500.0, 800.0, 2500.0, 3000.0, 1960.0, 5360.0, 580.0, 590.0, 590.0,
                ],
                marker_gap: 3500.0,
                test_qubit_gap: 415.0,
                num_test_qubits: 4,
            },
            marker: MarkerConfig {
                layer: Layer(12),
                l_arm_length: 200.0,
                l_stroke_width: 20.0,
                l_text_size: 40.0,
                v_size: (400.0, 200.0),
            },
            resonator: ResonatorConfig {
                size: (152.0, 9143.0),
                layer: Layer(12),
            },
            meander: MeanderConfig::default(),
            lead: LeadConfig {
                segments: vec![
                    Segment::new(2.0, 20.0),
                    Segment::new(10.0, 100.0),
                    Segment::new(400.0, 800.0),
                ],
                gaps: vec![10.0, 40.0],
                circular_segments: vec![Segment::new(2.0, 20.0), Segment::new(10.0, 100.0)],
                pad_radius: 200.0,
                test_length: 80.0,
                overlap: 1.5,
                fine_layer: Layer(11),
                coarse_layer: Layer(12),
            },
            discharger: DischargerConfig {
                radius: 400.0,
                width: 4.0,
                angles: (std::f64::consts::FRAC_PI_2, -std::f64::consts::FRAC_PI_2),
                layer: Layer(12),
            },
            junction: JunctionConfig::default(),
            border: BorderConfig {
                width: 0.4,
                layer: Layer(6),
                fine_layer: Layer(13),
            },
        }
    }
}
