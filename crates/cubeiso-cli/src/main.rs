mod cli;
mod error;
mod logging;
mod report;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use clap::Parser;
use cubeiso::core::io::cube::CubeFile;
use cubeiso::core::io::traits::VolumetricFile;
use cubeiso::workflows::analyze::{self, AnalysisRequest, MappingQuery};
use tracing::{debug, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    // Help and version requests exit cleanly; genuine argument errors share
    // the single failure exit code with parse and computation failures.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };
    logging::setup_logging(cli.verbose, cli.quiet, &cli.log_file)?;

    info!("CubeIso v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let query = if let Some(percent) = cli.percentage {
        MappingQuery::Percentage(percent)
    } else if let Some(isovalue) = cli.isovalue {
        MappingQuery::Isovalue(isovalue)
    } else {
        // clap's argument group guarantees one of the two is present.
        return Err(CliError::Argument(
            "one of --percentage or --isovalue is required".to_string(),
        ));
    };
    let request = AnalysisRequest {
        query,
        sign: cli.sign.into(),
    };

    info!("Loading cube file from {:?}", &cli.input);
    let grid = CubeFile::read_from_path(&cli.input).map_err(|e| CliError::CubeParsing {
        path: cli.input.clone(),
        source: e,
    })?;

    let analysis = analyze::run(&grid, &request)?;

    if cli.json {
        println!("{}", report::json_report(&analysis)?);
    } else {
        println!("{}", report::human_report(&cli.input, &analysis));
    }

    Ok(())
}
