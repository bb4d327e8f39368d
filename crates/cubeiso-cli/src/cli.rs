use clap::{ArgGroup, Parser, ValueEnum};
use cubeiso::core::integration::Sign;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "cubeiso",
    author = "Markus G. S. Weiss",
    version,
    about = "CubeIso - A command-line tool that maps integration percentages to isovalues (and back) for volumetric cube files.",
    help_template = HELP_TEMPLATE,
)]
#[command(group(ArgGroup::new("mapping").required(true).args(["percentage", "isovalue"])))]
pub struct Cli {
    /// Path to the input cube file.
    #[arg(value_name = "CUBE_FILE")]
    pub input: PathBuf,

    /// Compute the isovalue enclosing the given percentage of the total quantity.
    #[arg(short, long, value_name = "FLOAT")]
    pub percentage: Option<f64>,

    /// Compute the percentage of the total quantity enclosed by the given isovalue.
    #[arg(short, long, value_name = "FLOAT")]
    pub isovalue: Option<f64>,

    /// Select positive or negative values for density integration.
    /// Advisory for orbital data, where the populated side wins.
    #[arg(short, long, value_enum, default_value_t = SignChoice::Pos)]
    pub sign: SignChoice,

    /// Emit the analysis report as JSON instead of the human-readable text.
    #[arg(long)]
    pub json: bool,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Sign selection as spelled on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignChoice {
    Pos,
    Neg,
}

impl From<SignChoice> for Sign {
    fn from(choice: SignChoice) -> Self {
        match choice {
            SignChoice::Pos => Sign::Positive,
            SignChoice::Neg => Sign::Negative,
        }
    }
}
