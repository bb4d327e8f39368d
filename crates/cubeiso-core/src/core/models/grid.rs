use crate::core::utils::text::contains_ignore_case;
use nalgebra::{Point3, Vector3};
use serde::Serialize;
use std::fmt;

/// The quantum chemistry package that produced a cube file.
///
/// The cube format has no strict schema for provenance, so the source is
/// sniffed from the two free-text comment lines. The distinction matters
/// structurally: ORCA output carries one extra metadata line between the atom
/// records and the grid values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CalculationSource {
    Orca,
    QChem,
    Generic,
}

impl CalculationSource {
    /// Classifies the calculation provenance from the two header comment lines.
    ///
    /// # Arguments
    ///
    /// * `comment1` - The first comment line of the cube file.
    /// * `comment2` - The second comment line of the cube file.
    ///
    /// # Return
    ///
    /// Returns `Orca` if either comment mentions "ORCA", else `QChem` if either
    /// mentions "Q-Chem", else `Generic`. Matching is case-insensitive.
    pub fn detect(comment1: &str, comment2: &str) -> Self {
        if contains_ignore_case(comment1, "ORCA") || contains_ignore_case(comment2, "ORCA") {
            CalculationSource::Orca
        } else if contains_ignore_case(comment1, "Q-Chem")
            || contains_ignore_case(comment2, "Q-Chem")
        {
            CalculationSource::QChem
        } else {
            CalculationSource::Generic
        }
    }
}

impl fmt::Display for CalculationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationSource::Orca => write!(f, "ORCA"),
            CalculationSource::QChem => write!(f, "Q-Chem"),
            CalculationSource::Generic => write!(f, "Generic"),
        }
    }
}

/// The physical interpretation of the grid values.
///
/// Orbital grids store a signed amplitude whose square is the physical density;
/// density grids store the physical density directly. The kind selects which of
/// the two integration algorithms applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataKind {
    Orbital,
    Density,
}

impl DataKind {
    /// Classifies the data kind from the two header comment lines.
    ///
    /// Orbital keywords ("MO", "Orbital") take precedence over the "density"
    /// keyword; a file matching neither is treated as orbital data, the common
    /// case for unannotated cube output. Matching is case-insensitive.
    pub fn detect(comment1: &str, comment2: &str) -> Self {
        let mentions = |needle: &str| {
            contains_ignore_case(comment1, needle) || contains_ignore_case(comment2, needle)
        };
        if mentions("MO") || mentions("Orbital") {
            DataKind::Orbital
        } else if mentions("density") {
            DataKind::Density
        } else {
            DataKind::Orbital
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataKind::Orbital => write!(f, "Orbital"),
            DataKind::Density => write!(f, "Density"),
        }
    }
}

/// Header metadata of a cube file, immutable after parsing.
///
/// Holds the two comment lines, the signed atom count (a negative count is the
/// format's convention for "orbital coefficient data present"; its magnitude is
/// the true number of atom records), the grid origin, the per-axis voxel counts,
/// and the three axis step vectors. The axes need not be orthogonal.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeHeader {
    pub comment1: String,
    pub comment2: String,
    pub atom_count: i32,
    pub origin: Point3<f64>,
    pub dims: [usize; 3],
    pub axis_vectors: [Vector3<f64>; 3],
    pub source: CalculationSource,
    pub kind: DataKind,
}

impl CubeHeader {
    /// Returns the number of grid points the dimensions imply.
    ///
    /// The parser enforces that the value sequence has exactly this length.
    pub fn expected_points(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }
}

/// A fully parsed cube file: header plus the flat value sequence in file order
/// (fastest-varying-last axis ordering, per the format convention).
///
/// Constructed once by the parser and read-only thereafter; every downstream
/// component borrows the value slice without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeGrid {
    pub header: CubeHeader,
    pub values: Vec<f64>,
}

impl CubeGrid {
    /// Returns the number of grid points actually read.
    pub fn point_count(&self) -> usize {
        self.values.len()
    }
}
