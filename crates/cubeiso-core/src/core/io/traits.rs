use crate::core::models::grid::CubeGrid;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading volumetric file formats.
///
/// This trait provides a common API for parsing a volumetric scalar field into
/// a [`CubeGrid`]. Implementors handle format-specific tokenization and
/// validation; the grid produced is immutable from the caller's perspective.
pub trait VolumetricFile {
    /// The error type for parse operations.
    type Error: Error + From<io::Error>;

    /// Reads a volumetric grid from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the fully parsed and validated grid.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<CubeGrid, Self::Error>;

    /// Reads a volumetric grid from a file path.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the file to read.
    ///
    /// # Return
    ///
    /// Returns the fully parsed and validated grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<CubeGrid, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
