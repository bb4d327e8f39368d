use crate::error::Result;
use cubeiso::core::models::grid::DataKind;
use cubeiso::core::units::LengthUnit;
use cubeiso::workflows::analyze::{AnalysisReport, MappingOutcome};
use std::path::Path;

fn quantity_label(kind: DataKind) -> &'static str {
    match kind {
        DataKind::Orbital => "orbital density",
        DataKind::Density => "electron density",
    }
}

fn quantity_unit(kind: DataKind, unit: LengthUnit) -> String {
    match kind {
        DataKind::Orbital => format!("electrons/{unit}^(3/2)"),
        DataKind::Density => format!("electrons/{unit}^3"),
    }
}

/// Renders the human-readable stdout report for one analysis run.
pub fn human_report(input: &Path, report: &AnalysisReport) -> String {
    let native = report.native_unit;
    let converted = native.counterpart();
    let label = quantity_label(report.kind);

    let mut lines = vec![
        format!("Processing file: {}", input.display()),
        format!("Calculation source: {}", report.source),
        format!("Data kind: {}", report.kind),
        format!(
            "Grid dimensions: {} x {} x {}",
            report.dims[0], report.dims[1], report.dims[2]
        ),
        format!("Voxel volume: {:.6} {}^3", report.voxel_volume, native),
        format!("Total integrated {}: {:.6}", label, report.total_integrated),
        format!("Sign selection: {}", report.sign),
    ];

    match report.mapping {
        MappingOutcome::IsovalueFromPercentage {
            percent,
            isovalue_native,
            isovalue_converted,
            integrated_above_threshold,
            enclosed_percent,
        } => {
            lines.push(format!("Isovalue enclosing {percent}% of the total {label}:"));
            lines.push(format!(
                "  {:.6e} (native, {})",
                isovalue_native,
                quantity_unit(report.kind, native)
            ));
            lines.push(format!(
                "  {:.6e} (converted, {})",
                isovalue_converted,
                quantity_unit(report.kind, converted)
            ));
            lines.push(format!(
                "Integrated {} above threshold: {:.6}",
                label, integrated_above_threshold
            ));
            lines.push(format!(
                "Enclosed percentage at threshold: {:.2}%",
                enclosed_percent
            ));
        }
        MappingOutcome::PercentageFromIsovalue {
            isovalue_native,
            isovalue_converted,
            enclosed_percent,
        } => {
            lines.push(format!(
                "Percentage enclosed by isovalue {:.6e} ({}): {:.2}%",
                isovalue_native,
                quantity_unit(report.kind, native),
                enclosed_percent
            ));
            lines.push(format!(
                "Converted isovalue: {:.6e} ({})",
                isovalue_converted,
                quantity_unit(report.kind, converted)
            ));
        }
    }

    lines.join("\n")
}

/// Renders the report as pretty-printed JSON.
pub fn json_report(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
