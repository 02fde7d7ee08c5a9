//! Command-line interface for building MapScore case grids and rating
//! probability fields.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod aggregate;
mod error;
mod grid;
mod input;
mod score;

pub use error::CliError;

use aggregate::{AggregateArgs, run_aggregate};
use grid::{GridArgs, run_grid};
use score::{ScoreArgs, run_score};

pub(crate) const ARG_LAST_LAT: &str = "last-lat";
pub(crate) const ARG_LAST_LON: &str = "last-lon";
pub(crate) const ARG_FIND_LAT: &str = "find-lat";
pub(crate) const ARG_FIND_LON: &str = "find-lon";
pub(crate) const ARG_CELL_SIZE_M: &str = "cell-size-m";
pub(crate) const ARG_BOX_SIDE_KM: &str = "box-side-km";
pub(crate) const ARG_TOTAL_HOURS: &str = "total-hours";
pub(crate) const ARG_NOTIFY_HOURS: &str = "notify-hours";
pub(crate) const ARG_SEARCH_HOURS: &str = "search-hours";
pub(crate) const ARG_CASE: &str = "case";
pub(crate) const ARG_FIELD: &str = "field";
pub(crate) const ARG_INDEXING: &str = "indexing";
pub(crate) const ARG_OUTSIDE_FALLBACK: &str = "outside-fallback";
pub(crate) const ARG_TESTS: &str = "tests";
pub(crate) const ENV_LAST_LAT: &str = "MAPSCORE_CMDS_GRID_LAST_LAT";
pub(crate) const ENV_LAST_LON: &str = "MAPSCORE_CMDS_GRID_LAST_LON";
pub(crate) const ENV_FIND_LAT: &str = "MAPSCORE_CMDS_GRID_FIND_LAT";
pub(crate) const ENV_FIND_LON: &str = "MAPSCORE_CMDS_GRID_FIND_LON";
pub(crate) const ENV_CASE: &str = "MAPSCORE_CMDS_SCORE_CASE_PATH";
pub(crate) const ENV_FIELD: &str = "MAPSCORE_CMDS_SCORE_FIELD_PATH";
pub(crate) const ENV_TESTS: &str = "MAPSCORE_CMDS_AGGREGATE_TESTS_PATH";

/// Run the MapScore CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, an
/// input cannot be read, or the requested computation fails.
pub fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            err.print().map_err(CliError::WriteOutput)?;
            return Ok(());
        }
        Err(err) => return Err(CliError::ArgumentParsing(err)),
    };
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Grid(args) => run_grid(args, writer),
        Command::Score(args) => run_score(args, writer),
        Command::Aggregate(args) => run_aggregate(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "mapscore",
    about = "Lay out search grids and rate probability maps for lost-person cases",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a case grid and locate the find cell.
    Grid(GridArgs),
    /// Rate a probability field image against a case.
    Score(ScoreArgs),
    /// Aggregate a model's test ratings.
    Aggregate(AggregateArgs),
}

#[cfg(test)]
mod tests;
