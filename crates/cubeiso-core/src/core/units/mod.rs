//! # Units Module
//!
//! Native coordinate-unit detection and threshold conversion.
//!
//! Cube files express their axis vectors either in Bohr (the quantum chemistry
//! default) or in Angstrom. The unit is detected from explicit keywords in the
//! header comments, falling back to a spacing heuristic, and isovalue thresholds
//! are converted between the two length systems with the appropriate volume
//! exponent: 3 for densities, 1.5 for orbital amplitudes (the square root of a
//! density carries half the volume exponent).

use crate::core::models::grid::CubeHeader;
use crate::core::utils::geometry::average_axis_length;
use crate::core::utils::text::contains_ignore_case;
use serde::Serialize;
use std::fmt;

pub const BOHR_RADIUS_ANGSTROM: f64 = 0.529177210544; // In Å/bohr

/// Average axis lengths above this are taken as Angstrom spacings; typical
/// voxel steps differ by roughly an order of magnitude between the two systems.
const ANGSTROM_SPACING_THRESHOLD: f64 = 2.0;

/// The coordinate/length unit a cube file's axis vectors are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LengthUnit {
    Angstrom,
    Bohr,
}

impl LengthUnit {
    /// Returns the other unit of the pair, used to label converted thresholds.
    pub fn counterpart(&self) -> Self {
        match self {
            LengthUnit::Angstrom => LengthUnit::Bohr,
            LengthUnit::Bohr => LengthUnit::Angstrom,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthUnit::Angstrom => write!(f, "Å"),
            LengthUnit::Bohr => write!(f, "bohr"),
        }
    }
}

/// Determines the native length unit of a parsed cube header.
///
/// Explicit unit keywords in the comment lines take priority in either
/// direction; absent those, the average Euclidean length of the three axis
/// vectors decides (above 2.0 reads as Angstrom).
pub fn detect_native_unit(header: &CubeHeader) -> LengthUnit {
    let mentions = |needle: &str| {
        contains_ignore_case(&header.comment1, needle)
            || contains_ignore_case(&header.comment2, needle)
    };
    if mentions("angstrom") {
        return LengthUnit::Angstrom;
    }
    if mentions("bohr") {
        return LengthUnit::Bohr;
    }
    if average_axis_length(&header.axis_vectors) > ANGSTROM_SPACING_THRESHOLD {
        LengthUnit::Angstrom
    } else {
        LengthUnit::Bohr
    }
}

/// Converts a density threshold (electrons per length-unit³) into the
/// counterpart unit system.
///
/// Always divides by the cubed Bohr factor; the native unit is not consulted,
/// so Angstrom-native values are scaled by the same factor.
pub fn convert_density_threshold(value: f64, _native: LengthUnit) -> f64 {
    value / BOHR_RADIUS_ANGSTROM.powi(3)
}

/// Converts an orbital-amplitude threshold (electrons per length-unit^(3/2))
/// into the counterpart unit system.
///
/// Bohr-native values are divided by the Bohr factor to the 1.5 power;
/// Angstrom-native values pass through unchanged.
pub fn convert_orbital_threshold(value: f64, native: LengthUnit) -> f64 {
    match native {
        LengthUnit::Bohr => value / BOHR_RADIUS_ANGSTROM.powf(1.5),
        LengthUnit::Angstrom => value,
    }
}
