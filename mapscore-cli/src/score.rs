//! Score command implementation for the MapScore CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use mapscore_core::{CaseRecord, GridCell, Rating, SearchCase};
use mapscore_scorer::{
    CellIndexing, DEFAULT_OUTSIDE_FALLBACK, ScoringError, ScoringOptions, load_field, score_case,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{read_json, require_existing, write_json};
use crate::{
    ARG_CASE, ARG_FIELD, ARG_INDEXING, ARG_OUTSIDE_FALLBACK, CliError, ENV_CASE, ENV_FIELD,
};

const INDEXING_ROW_MAJOR: &str = "row-major";
const INDEXING_TRANSPOSED: &str = "transposed";

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rate a grayscale probability field image against a case. \
                 The case is a JSON-encoded case record; the image must have \
                 one pixel per grid cell. Prints the find cell and the \
                 rating as JSON.",
    about = "Rate a probability field against a case"
)]
#[ortho_config(prefix = "MAPSCORE")]
pub(crate) struct ScoreArgs {
    /// Path to a JSON file containing a case record.
    #[arg(value_name = "case")]
    #[serde(default)]
    pub(crate) case_path: Option<Utf8PathBuf>,
    /// Path to the grayscale probability field image.
    #[arg(value_name = "field")]
    #[serde(default)]
    pub(crate) field_path: Option<Utf8PathBuf>,
    /// Field addressing: "row-major" (default) or "transposed".
    #[arg(long = ARG_INDEXING, value_name = "order")]
    #[serde(default)]
    pub(crate) indexing: Option<String>,
    /// Residual probability used when the field total leaves no valid
    /// residual for a find outside the box (default 0.05).
    #[arg(long = ARG_OUTSIDE_FALLBACK, value_name = "probability")]
    #[serde(default)]
    pub(crate) outside_fallback: Option<f64>,
}

impl ScoreArgs {
    pub(crate) fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

/// Resolved `score` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScoreConfig {
    /// Path to the JSON case record.
    pub(crate) case_path: Utf8PathBuf,
    /// Path to the probability field image.
    pub(crate) field_path: Utf8PathBuf,
    /// Scoring knobs.
    pub(crate) options: ScoringOptions,
}

impl ScoreConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.case_path, ARG_CASE)?;
        require_existing(&self.field_path, ARG_FIELD)?;
        Ok(())
    }
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let case_path = args.case_path.ok_or(CliError::MissingArgument {
            field: ARG_CASE,
            env: ENV_CASE,
        })?;
        let field_path = args.field_path.ok_or(CliError::MissingArgument {
            field: ARG_FIELD,
            env: ENV_FIELD,
        })?;
        let indexing = args
            .indexing
            .as_deref()
            .map(parse_indexing)
            .transpose()?
            .unwrap_or_default();
        let outside_fallback = args.outside_fallback.unwrap_or(DEFAULT_OUTSIDE_FALLBACK);
        if !(0.0..=1.0).contains(&outside_fallback) {
            return Err(CliError::InvalidArgument {
                field: ARG_OUTSIDE_FALLBACK,
                value: outside_fallback.to_string(),
                reason: "expected a probability between 0 and 1",
            });
        }
        Ok(Self {
            case_path,
            field_path,
            options: ScoringOptions {
                indexing,
                outside_fallback,
            },
        })
    }
}

fn parse_indexing(raw: &str) -> Result<CellIndexing, CliError> {
    match raw.trim() {
        INDEXING_ROW_MAJOR => Ok(CellIndexing::RowMajor),
        INDEXING_TRANSPOSED => Ok(CellIndexing::Transposed),
        _ => Err(CliError::InvalidArgument {
            field: ARG_INDEXING,
            value: raw.to_owned(),
            reason: "expected \"row-major\" or \"transposed\"",
        }),
    }
}

/// JSON document printed by the `score` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ScoreReport {
    pub(crate) find_cell: GridCell,
    pub(crate) inside_grid: bool,
    pub(crate) side_cell_count: u64,
    pub(crate) indexing: CellIndexing,
    pub(crate) rating: Rating,
}

pub(super) fn run_score(args: ScoreArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let report = execute_score(&config)?;
    write_json(writer, &report)
}

pub(super) fn execute_score(config: &ScoreConfig) -> Result<ScoreReport, CliError> {
    let record: CaseRecord = read_json(&config.case_path, ARG_CASE)?;
    let case = SearchCase::from_record(&record)?;
    let field = load_field(&config.field_path).map_err(ScoringError::from)?;
    let rating = score_case(&field, &case, &config.options).map_err(ScoringError::from)?;
    info!("rated {} against {}: {rating}", config.field_path, config.case_path);
    Ok(ScoreReport {
        find_cell: case.find_cell(),
        inside_grid: case.find_cell_index().is_some(),
        side_cell_count: case.grid().side_cell_count(),
        indexing: config.options.indexing,
        rating,
    })
}
