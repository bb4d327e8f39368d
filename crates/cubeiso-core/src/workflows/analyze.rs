use crate::core::integration::{IntegrationError, Sign, density, orbital};
use crate::core::models::grid::{CalculationSource, CubeGrid, DataKind};
use crate::core::units::{self, LengthUnit};
use crate::core::utils::geometry;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Integration(#[from] IntegrationError),
}

/// The direction of the percentage↔isovalue mapping to compute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MappingQuery {
    /// Find the isovalue enclosing this percentage of the total quantity.
    Percentage(f64),
    /// Find the percentage of the total quantity enclosed by this isovalue.
    Isovalue(f64),
}

/// A single analysis request: one mapping direction plus a sign selection.
///
/// The sign selection is binding for density grids and advisory for orbital
/// grids, where the workflow resolves the effective sign from the density mass
/// distribution when the requested side is empty.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnalysisRequest {
    pub query: MappingQuery,
    pub sign: Sign,
}

/// The outcome of the requested mapping, in both unit systems.
#[derive(Debug, Clone, Copy, Serialize)]
pub enum MappingOutcome {
    IsovalueFromPercentage {
        percent: f64,
        isovalue_native: f64,
        isovalue_converted: f64,
        /// Grid quantity at or beyond the threshold, scaled by voxel volume.
        integrated_above_threshold: f64,
        /// The percentage recovered from the computed isovalue, as a
        /// granularity check on the discrete mapping.
        enclosed_percent: f64,
    },
    PercentageFromIsovalue {
        isovalue_native: f64,
        isovalue_converted: f64,
        enclosed_percent: f64,
    },
}

/// Everything a caller needs to render an analysis run: grid metadata, derived
/// geometry and units, the total integrated quantity, the sign the run actually
/// used, and the mapping outcome.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub source: CalculationSource,
    pub kind: DataKind,
    pub dims: [usize; 3],
    pub voxel_volume: f64,
    pub native_unit: LengthUnit,
    pub total_integrated: f64,
    pub sign: Sign,
    pub mapping: MappingOutcome,
}

/// Runs the complete analysis over a parsed grid.
#[instrument(skip_all, name = "analysis_workflow")]
pub fn run(grid: &CubeGrid, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
    let header = &grid.header;
    let voxel_volume = geometry::voxel_volume(&header.axis_vectors);
    let native_unit = units::detect_native_unit(header);

    info!(
        source = %header.source,
        kind = %header.kind,
        points = grid.point_count(),
        "Starting cube analysis."
    );

    let total_integrated = match header.kind {
        DataKind::Orbital => grid.values.iter().map(|v| v * v).sum::<f64>() * voxel_volume,
        DataKind::Density => grid.values.iter().sum::<f64>() * voxel_volume,
    };

    let sign = resolve_sign(grid, request.sign);
    if sign != request.sign {
        info!(requested = %request.sign, resolved = %sign, "Resolved sign from density mass.");
    }

    let mapping = match request.query {
        MappingQuery::Percentage(percent) => {
            debug!(percent, "Integrating toward the requested fraction.");
            let isovalue_native = match header.kind {
                DataKind::Orbital => {
                    orbital::isovalue_from_percentage(&grid.values, percent, sign)?
                }
                DataKind::Density => {
                    density::isovalue_from_percentage(&grid.values, percent, sign)?
                }
            };
            let enclosed_percent = match header.kind {
                DataKind::Orbital => {
                    orbital::percentage_from_isovalue(&grid.values, isovalue_native, sign)?
                }
                DataKind::Density => {
                    density::percentage_from_isovalue(&grid.values, isovalue_native, sign)?
                }
            };
            MappingOutcome::IsovalueFromPercentage {
                percent,
                isovalue_native,
                isovalue_converted: convert_threshold(header.kind, isovalue_native, native_unit),
                integrated_above_threshold: integrated_above(grid, isovalue_native, sign)
                    * voxel_volume,
                enclosed_percent,
            }
        }
        MappingQuery::Isovalue(isovalue) => {
            debug!(isovalue, "Computing the fraction enclosed by the threshold.");
            let enclosed_percent = match header.kind {
                DataKind::Orbital => {
                    orbital::percentage_from_isovalue(&grid.values, isovalue, sign)?
                }
                DataKind::Density => {
                    density::percentage_from_isovalue(&grid.values, isovalue, sign)?
                }
            };
            MappingOutcome::PercentageFromIsovalue {
                isovalue_native: isovalue,
                isovalue_converted: convert_threshold(header.kind, isovalue, native_unit),
                enclosed_percent,
            }
        }
    };

    Ok(AnalysisReport {
        source: header.source,
        kind: header.kind,
        dims: header.dims,
        voxel_volume,
        native_unit,
        total_integrated,
        sign,
        mapping,
    })
}

/// Resolves the effective sign for an orbital run.
///
/// If the requested side holds no density mass, the side with the greater
/// squared-sum mass wins (ties favor positive). Density runs keep the caller's
/// selection untouched.
fn resolve_sign(grid: &CubeGrid, requested: Sign) -> Sign {
    if grid.header.kind != DataKind::Orbital {
        return requested;
    }

    let mut positive_mass = 0.0;
    let mut negative_mass = 0.0;
    for &v in &grid.values {
        if v > 0.0 {
            positive_mass += v * v;
        } else if v < 0.0 {
            negative_mass += v * v;
        }
    }

    let requested_has_mass = match requested {
        Sign::Positive => positive_mass > 0.0,
        Sign::Negative => negative_mass > 0.0,
    };
    if requested_has_mass {
        requested
    } else if positive_mass >= negative_mass {
        Sign::Positive
    } else {
        Sign::Negative
    }
}

fn integrated_above(grid: &CubeGrid, isovalue: f64, sign: Sign) -> f64 {
    match grid.header.kind {
        DataKind::Orbital => {
            let threshold = isovalue * isovalue;
            grid.values
                .iter()
                .map(|v| v * v)
                .filter(|&d| d >= threshold)
                .sum()
        }
        DataKind::Density => grid
            .values
            .iter()
            .copied()
            .filter(|&v| match sign {
                Sign::Positive => v >= isovalue,
                Sign::Negative => v <= isovalue,
            })
            .sum(),
    }
}

fn convert_threshold(kind: DataKind, value: f64, native: LengthUnit) -> f64 {
    match kind {
        DataKind::Orbital => units::convert_orbital_threshold(value, native),
        DataKind::Density => units::convert_density_threshold(value, native),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::grid::CubeHeader;
    use crate::core::units::BOHR_RADIUS_ANGSTROM;
    use nalgebra::{Point3, Vector3};

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn grid_with(kind: DataKind, step: f64, values: Vec<f64>) -> CubeGrid {
        let n = values.len();
        CubeGrid {
            header: CubeHeader {
                comment1: String::new(),
                comment2: String::new(),
                atom_count: 1,
                origin: Point3::origin(),
                dims: [n, 1, 1],
                axis_vectors: [
                    Vector3::new(step, 0.0, 0.0),
                    Vector3::new(0.0, step, 0.0),
                    Vector3::new(0.0, 0.0, step),
                ],
                source: CalculationSource::Generic,
                kind,
            },
            values,
        }
    }

    #[test]
    fn density_percentage_query_matches_the_uniform_cube_example() {
        let values = vec![1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0];
        let grid = grid_with(DataKind::Density, 0.1, values);
        let request = AnalysisRequest {
            query: MappingQuery::Percentage(50.0),
            sign: Sign::Positive,
        };

        let report = run(&grid, &request).unwrap();

        assert!(f64_approx_equal(report.voxel_volume, 0.001));
        assert!(f64_approx_equal(report.total_integrated, 0.0));
        match report.mapping {
            MappingOutcome::IsovalueFromPercentage {
                isovalue_native,
                integrated_above_threshold,
                enclosed_percent,
                ..
            } => {
                assert!(f64_approx_equal(isovalue_native, 1.0));
                assert!(f64_approx_equal(integrated_above_threshold, 0.004));
                assert!(f64_approx_equal(enclosed_percent, 100.0));
            }
            _ => panic!("expected an isovalue-from-percentage outcome"),
        }
    }

    #[test]
    fn orbital_sign_resolves_to_the_populated_side() {
        let grid = grid_with(DataKind::Orbital, 0.1, vec![-0.5, -0.25, 0.0]);
        let request = AnalysisRequest {
            query: MappingQuery::Percentage(50.0),
            sign: Sign::Positive,
        };

        let report = run(&grid, &request).unwrap();
        assert_eq!(report.sign, Sign::Negative);
    }

    #[test]
    fn orbital_sign_is_kept_when_the_requested_side_has_mass() {
        let grid = grid_with(DataKind::Orbital, 0.1, vec![-0.5, 0.25]);
        let request = AnalysisRequest {
            query: MappingQuery::Percentage(50.0),
            sign: Sign::Positive,
        };

        let report = run(&grid, &request).unwrap();
        assert_eq!(report.sign, Sign::Positive);
    }

    #[test]
    fn density_sign_is_never_overridden() {
        let grid = grid_with(DataKind::Density, 0.1, vec![-1.0, -2.0]);
        let request = AnalysisRequest {
            query: MappingQuery::Percentage(50.0),
            sign: Sign::Positive,
        };

        let result = run(&grid, &request);
        assert!(matches!(
            result,
            Err(AnalysisError::Integration(IntegrationError::EmptySelection))
        ));
    }

    #[test]
    fn orbital_total_integrates_squared_values_over_voxel_volume() {
        let grid = grid_with(DataKind::Orbital, 1.0, vec![3.0, -2.0, 1.0]);
        let request = AnalysisRequest {
            query: MappingQuery::Percentage(100.0),
            sign: Sign::Positive,
        };

        let report = run(&grid, &request).unwrap();
        assert!(f64_approx_equal(report.total_integrated, 14.0));
    }

    #[test]
    fn isovalue_query_reports_the_enclosed_percentage_and_conversion() {
        // Sub-2.0 spacing with no unit keywords reads as Bohr-native.
        let grid = grid_with(DataKind::Orbital, 0.5, vec![3.0, 2.0, 1.0]);
        let request = AnalysisRequest {
            query: MappingQuery::Isovalue(2.0),
            sign: Sign::Positive,
        };

        let report = run(&grid, &request).unwrap();
        assert_eq!(report.native_unit, LengthUnit::Bohr);
        match report.mapping {
            MappingOutcome::PercentageFromIsovalue {
                isovalue_native,
                isovalue_converted,
                enclosed_percent,
            } => {
                assert!(f64_approx_equal(isovalue_native, 2.0));
                assert!(f64_approx_equal(
                    isovalue_converted,
                    2.0 / BOHR_RADIUS_ANGSTROM.powf(1.5)
                ));
                assert!(f64_approx_equal(enclosed_percent, 1300.0 / 14.0));
            }
            _ => panic!("expected a percentage-from-isovalue outcome"),
        }
    }

    #[test]
    fn density_conversion_applies_the_cubed_factor_even_when_angstrom_native() {
        let mut grid = grid_with(DataKind::Density, 3.0, vec![2.0, 1.0]);
        grid.header.comment1 = "density in angstrom".to_string();
        let request = AnalysisRequest {
            query: MappingQuery::Isovalue(1.5),
            sign: Sign::Positive,
        };

        let report = run(&grid, &request).unwrap();
        assert_eq!(report.native_unit, LengthUnit::Angstrom);
        match report.mapping {
            MappingOutcome::PercentageFromIsovalue {
                isovalue_converted, ..
            } => {
                assert!(f64_approx_equal(
                    isovalue_converted,
                    1.5 / BOHR_RADIUS_ANGSTROM.powi(3)
                ));
            }
            _ => panic!("expected a percentage-from-isovalue outcome"),
        }
    }
}
