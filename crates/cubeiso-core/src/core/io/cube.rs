use crate::core::io::traits::VolumetricFile;
use crate::core::models::grid::{CalculationSource, CubeGrid, CubeHeader, DataKind};
use nalgebra::{Point3, Vector3};
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CubeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: CubeParseErrorKind,
    },
    #[error("Grid size mismatch: read {actual} values but dimensions imply {expected}")]
    GridSizeMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum CubeParseErrorKind {
    #[error("Invalid integer for {field} (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("Invalid float for {field} (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("Missing token for {field}")]
    MissingField { field: &'static str },
    #[error("Voxel count must be positive (value: '{value}')")]
    InvalidDimension { value: String },
    #[error("Unexpected end of file while reading {expected}")]
    UnexpectedEof { expected: &'static str },
}

fn next_token<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line: usize,
    field: &'static str,
) -> Result<&'a str, CubeError> {
    tokens.next().ok_or(CubeError::Parse {
        line,
        kind: CubeParseErrorKind::MissingField { field },
    })
}

fn parse_i32(token: &str, line: usize, field: &'static str) -> Result<i32, CubeError> {
    token.parse().map_err(|_| CubeError::Parse {
        line,
        kind: CubeParseErrorKind::InvalidInt {
            field,
            value: token.into(),
        },
    })
}

fn parse_f64(token: &str, line: usize, field: &'static str) -> Result<f64, CubeError> {
    token.parse().map_err(|_| CubeError::Parse {
        line,
        kind: CubeParseErrorKind::InvalidFloat {
            field,
            value: token.into(),
        },
    })
}

/// Reader for the Gaussian-style cube format.
///
/// The format is loosely structured text: two free comment lines, an
/// atom-count/origin line, three axis lines, one skipped record per atom, and
/// the grid values as a whitespace-delimited token stream. ORCA output carries
/// one extra metadata line between the atom records and the values.
pub struct CubeFile;

impl VolumetricFile for CubeFile {
    type Error = CubeError;

    fn read_from(reader: &mut impl BufRead) -> Result<CubeGrid, Self::Error> {
        let mut lines = reader.lines();
        let mut line_num = 0usize;

        // The two comment lines carry no structure; a file that ends here is
        // only an error once the required header lines are missing too.
        line_num += 1;
        let comment1 = lines
            .next()
            .transpose()?
            .map(|l| l.trim().to_string())
            .unwrap_or_default();
        line_num += 1;
        let comment2 = lines
            .next()
            .transpose()?
            .map(|l| l.trim().to_string())
            .unwrap_or_default();

        let source = CalculationSource::detect(&comment1, &comment2);
        let kind = DataKind::detect(&comment1, &comment2);

        line_num += 1;
        let line = match lines.next().transpose()? {
            Some(l) => l,
            None => {
                return Err(CubeError::Parse {
                    line: line_num,
                    kind: CubeParseErrorKind::UnexpectedEof {
                        expected: "atom count and origin",
                    },
                });
            }
        };
        let mut tokens = line.split_whitespace();
        let atom_count = parse_i32(
            next_token(&mut tokens, line_num, "atom count")?,
            line_num,
            "atom count",
        )?;
        let origin = Point3::new(
            parse_f64(next_token(&mut tokens, line_num, "origin x")?, line_num, "origin x")?,
            parse_f64(next_token(&mut tokens, line_num, "origin y")?, line_num, "origin y")?,
            parse_f64(next_token(&mut tokens, line_num, "origin z")?, line_num, "origin z")?,
        );

        let mut dims = [0usize; 3];
        let mut axis_vectors = [Vector3::zeros(); 3];
        for axis in 0..3 {
            line_num += 1;
            let line = match lines.next().transpose()? {
                Some(l) => l,
                None => {
                    return Err(CubeError::Parse {
                        line: line_num,
                        kind: CubeParseErrorKind::UnexpectedEof {
                            expected: "axis vector",
                        },
                    });
                }
            };
            let mut tokens = line.split_whitespace();
            let count_token = next_token(&mut tokens, line_num, "voxel count")?;
            let count = parse_f64(count_token, line_num, "voxel count")?.trunc();
            if count < 1.0 {
                return Err(CubeError::Parse {
                    line: line_num,
                    kind: CubeParseErrorKind::InvalidDimension {
                        value: count_token.into(),
                    },
                });
            }
            dims[axis] = count as usize;
            axis_vectors[axis] = Vector3::new(
                parse_f64(next_token(&mut tokens, line_num, "axis x")?, line_num, "axis x")?,
                parse_f64(next_token(&mut tokens, line_num, "axis y")?, line_num, "axis y")?,
                parse_f64(next_token(&mut tokens, line_num, "axis z")?, line_num, "axis z")?,
            );
        }

        // Atom records are skipped outright; the analysis never needs atomic
        // positions. A file truncated here surfaces as a size mismatch below.
        for _ in 0..atom_count.unsigned_abs() {
            if lines.next().transpose()?.is_none() {
                break;
            }
        }

        // ORCA output carries one extra metadata line before the grid values.
        if source == CalculationSource::Orca {
            lines.next().transpose()?;
        }

        let header = CubeHeader {
            comment1,
            comment2,
            atom_count,
            origin,
            dims,
            axis_vectors,
            source,
            kind,
        };
        let expected = header.expected_points();

        let mut values = Vec::with_capacity(expected);
        'values: for line in lines {
            for token in line?.split_whitespace() {
                match token.parse::<f64>() {
                    Ok(v) => values.push(v),
                    // A non-numeric token ends the value stream; the count
                    // check below reports any shortfall.
                    Err(_) => break 'values,
                }
            }
        }

        if values.len() != expected {
            return Err(CubeError::GridSizeMismatch {
                expected,
                actual: values.len(),
            });
        }

        Ok(CubeGrid { header, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const GENERIC_DENSITY_CUBE: &str = "\
 Total electron density
 computed on a coarse grid
    2    0.000000    0.000000    0.000000
    2    0.200000    0.000000    0.000000
    2    0.000000    0.200000    0.000000
    2    0.000000    0.000000    0.200000
    8    8.000000    0.000000    0.000000    0.000000
    8    8.000000    1.000000    1.000000    1.000000
  1.0 1.0 1.0 1.0
  -1.0 -1.0 -1.0 -1.0
";

    #[test]
    fn parses_a_generic_density_cube() {
        let grid = CubeFile::read_from(&mut GENERIC_DENSITY_CUBE.as_bytes()).unwrap();

        assert_eq!(grid.header.source, CalculationSource::Generic);
        assert_eq!(grid.header.kind, DataKind::Density);
        assert_eq!(grid.header.atom_count, 2);
        assert_eq!(grid.header.dims, [2, 2, 2]);
        assert_eq!(grid.header.origin, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(grid.header.axis_vectors[1], Vector3::new(0.0, 0.2, 0.0));
        assert_eq!(
            grid.values,
            vec![1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0]
        );
    }

    #[test]
    fn comments_are_trimmed_and_preserved() {
        let grid = CubeFile::read_from(&mut GENERIC_DENSITY_CUBE.as_bytes()).unwrap();
        assert_eq!(grid.header.comment1, "Total electron density");
        assert_eq!(grid.header.comment2, "computed on a coarse grid");
    }

    #[test]
    fn orca_cube_skips_one_extra_line_before_values() {
        let text = "\
 Generated by ORCA
 MO 7
    1    0.000000    0.000000    0.000000
    2    0.500000    0.000000    0.000000
    2    0.000000    0.500000    0.000000
    2    0.000000    0.000000    0.500000
    6    6.000000    0.000000    0.000000    0.000000
  extra metadata line
  0.1 0.2 0.3 0.4
  0.5 0.6 0.7 0.8
";
        let grid = CubeFile::read_from(&mut text.as_bytes()).unwrap();
        assert_eq!(grid.header.source, CalculationSource::Orca);
        assert_eq!(grid.values.len(), 8);
        assert_eq!(grid.values[0], 0.1);
    }

    #[test]
    fn orca_detection_without_the_extra_line_misses_values() {
        let text = "\
 Generated by ORCA
 MO 7
    1    0.000000    0.000000    0.000000
    2    0.500000    0.000000    0.000000
    2    0.000000    0.500000    0.000000
    2    0.000000    0.000000    0.500000
    6    6.000000    0.000000    0.000000    0.000000
  0.1 0.2 0.3 0.4
  0.5 0.6 0.7 0.8
";
        let result = CubeFile::read_from(&mut text.as_bytes());
        assert!(matches!(
            result,
            Err(CubeError::GridSizeMismatch {
                expected: 8,
                actual: 4
            })
        ));
    }

    #[test]
    fn negative_atom_count_skips_its_magnitude_in_lines() {
        let text = "\
 Some cube
 MO coefficients follow
   -2    0.000000    0.000000    0.000000
    1    1.000000    0.000000    0.000000
    1    0.000000    1.000000    0.000000
    1    0.000000    0.000000    1.000000
    8    8.000000    0.000000    0.000000    0.000000
    8    8.000000    1.000000    1.000000    1.000000
  0.25
";
        let grid = CubeFile::read_from(&mut text.as_bytes()).unwrap();
        assert_eq!(grid.header.atom_count, -2);
        assert_eq!(grid.values, vec![0.25]);
    }

    #[test]
    fn value_count_mismatch_reports_expected_and_actual() {
        let truncated = GENERIC_DENSITY_CUBE.replace("  -1.0 -1.0 -1.0 -1.0\n", "  -1.0\n");
        let result = CubeFile::read_from(&mut truncated.as_bytes());
        assert!(matches!(
            result,
            Err(CubeError::GridSizeMismatch {
                expected: 8,
                actual: 5
            })
        ));
    }

    #[test]
    fn surplus_values_are_a_size_mismatch() {
        let padded = format!("{}  2.0 2.0\n", GENERIC_DENSITY_CUBE);
        let result = CubeFile::read_from(&mut padded.as_bytes());
        assert!(matches!(
            result,
            Err(CubeError::GridSizeMismatch {
                expected: 8,
                actual: 10
            })
        ));
    }

    #[test]
    fn non_numeric_token_ends_the_value_stream() {
        let trailed = format!("{}END\n", GENERIC_DENSITY_CUBE);
        let grid = CubeFile::read_from(&mut trailed.as_bytes()).unwrap();
        assert_eq!(grid.values.len(), 8);
    }

    #[test]
    fn malformed_origin_line_is_a_parse_error() {
        let text = " c1\n c2\n    2    0.0    abc    0.0\n";
        let result = CubeFile::read_from(&mut text.as_bytes());
        assert!(matches!(
            result,
            Err(CubeError::Parse {
                line: 3,
                kind: CubeParseErrorKind::InvalidFloat { .. }
            })
        ));
    }

    #[test]
    fn missing_axis_line_is_a_parse_error() {
        let text = " c1\n c2\n    1    0.0    0.0    0.0\n    2    0.1    0.0    0.0\n";
        let result = CubeFile::read_from(&mut text.as_bytes());
        assert!(matches!(
            result,
            Err(CubeError::Parse {
                line: 5,
                kind: CubeParseErrorKind::UnexpectedEof { .. }
            })
        ));
    }

    #[test]
    fn nonpositive_voxel_count_is_rejected() {
        let text = " c1\n c2\n    0    0.0    0.0    0.0\n    0    0.1    0.0    0.0\n";
        let result = CubeFile::read_from(&mut text.as_bytes());
        assert!(matches!(
            result,
            Err(CubeError::Parse {
                line: 4,
                kind: CubeParseErrorKind::InvalidDimension { .. }
            })
        ));
    }

    #[test]
    fn empty_input_fails_on_the_header_not_the_comments() {
        let result = CubeFile::read_from(&mut "".as_bytes());
        assert!(matches!(
            result,
            Err(CubeError::Parse {
                line: 3,
                kind: CubeParseErrorKind::UnexpectedEof { .. }
            })
        ));
    }

    #[test]
    fn read_from_path_opens_and_parses_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("density.cube");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(GENERIC_DENSITY_CUBE.as_bytes()).unwrap();

        let grid = CubeFile::read_from_path(&path).unwrap();
        assert_eq!(grid.point_count(), 8);
    }

    #[test]
    fn read_from_path_surfaces_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = CubeFile::read_from_path(dir.path().join("missing.cube"));
        assert!(matches!(result, Err(CubeError::Io(_))));
    }
}
