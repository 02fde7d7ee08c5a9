//! Grid command implementation for the MapScore CLI.

use std::io::Write;

use clap::Parser;
use log::debug;
use mapscore_core::{
    CaseRecord, CaseSummary, DEFAULT_BOX_SIDE_KM, DEFAULT_CELL_SIZE_M, GridConfig, ReportedHours,
    SearchCase,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::write_json;
use crate::{
    ARG_BOX_SIDE_KM, ARG_CELL_SIZE_M, ARG_FIND_LAT, ARG_FIND_LON, ARG_LAST_LAT, ARG_LAST_LON,
    ARG_NOTIFY_HOURS, ARG_SEARCH_HOURS, ARG_TOTAL_HOURS, CliError, ENV_FIND_LAT, ENV_FIND_LON,
    ENV_LAST_LAT, ENV_LAST_LON,
};

/// CLI arguments for the `grid` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Lay out the square cell grid centred on the last-known \
                 position, locate the find position on it and print the \
                 derived corners, steps, cell counts and preview URLs as \
                 JSON. Coordinates may be given as decimal degrees or text.",
    about = "Build a case grid and locate the find cell"
)]
#[ortho_config(prefix = "MAPSCORE")]
pub(crate) struct GridArgs {
    /// Latitude where the subject was last seen, in degrees.
    #[arg(long = ARG_LAST_LAT, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) last_lat: Option<String>,
    /// Longitude where the subject was last seen, in degrees.
    #[arg(long = ARG_LAST_LON, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) last_lon: Option<String>,
    /// Latitude where the subject was found, in degrees.
    #[arg(long = ARG_FIND_LAT, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) find_lat: Option<String>,
    /// Longitude where the subject was found, in degrees.
    #[arg(long = ARG_FIND_LON, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) find_lon: Option<String>,
    /// Edge length of one cell in metres (default 5).
    #[arg(long = ARG_CELL_SIZE_M, value_name = "metres")]
    #[serde(default)]
    pub(crate) cell_size_m: Option<u32>,
    /// Edge length of the search box in kilometres (default 25).
    #[arg(long = ARG_BOX_SIDE_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) box_side_km: Option<u32>,
    /// Reported hours from going missing to the find; may be "unknown".
    #[arg(long = ARG_TOTAL_HOURS, value_name = "hours")]
    #[serde(default)]
    pub(crate) total_hours: Option<String>,
    /// Reported hours before the search was notified.
    #[arg(long = ARG_NOTIFY_HOURS, value_name = "hours")]
    #[serde(default)]
    pub(crate) notify_hours: Option<String>,
    /// Reported hours spent searching.
    #[arg(long = ARG_SEARCH_HOURS, value_name = "hours")]
    #[serde(default)]
    pub(crate) search_hours: Option<String>,
}

impl GridArgs {
    pub(crate) fn into_config(self) -> Result<GridCommandConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        GridCommandConfig::try_from(merged)
    }
}

/// Resolved `grid` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GridCommandConfig {
    /// Case coordinates and grid dimensions.
    pub(crate) record: CaseRecord,
    /// Reported hours, when any were supplied.
    pub(crate) hours: Option<ReportedHours>,
}

impl TryFrom<GridArgs> for GridCommandConfig {
    type Error = CliError;

    fn try_from(args: GridArgs) -> Result<Self, Self::Error> {
        let last_lat = args.last_lat.ok_or(CliError::MissingArgument {
            field: ARG_LAST_LAT,
            env: ENV_LAST_LAT,
        })?;
        let last_lon = args.last_lon.ok_or(CliError::MissingArgument {
            field: ARG_LAST_LON,
            env: ENV_LAST_LON,
        })?;
        let find_lat = args.find_lat.ok_or(CliError::MissingArgument {
            field: ARG_FIND_LAT,
            env: ENV_FIND_LAT,
        })?;
        let find_lon = args.find_lon.ok_or(CliError::MissingArgument {
            field: ARG_FIND_LON,
            env: ENV_FIND_LON,
        })?;

        let grid = GridConfig {
            cell_size_m: args.cell_size_m.unwrap_or(DEFAULT_CELL_SIZE_M),
            box_side_km: args.box_side_km.unwrap_or(DEFAULT_BOX_SIDE_KM),
        };

        let any_hours = args.total_hours.is_some()
            || args.notify_hours.is_some()
            || args.search_hours.is_some();
        let hours = any_hours.then(|| ReportedHours {
            total: args.total_hours.unwrap_or_default(),
            notify: args.notify_hours.unwrap_or_default(),
            search: args.search_hours.unwrap_or_default(),
        });

        Ok(Self {
            record: CaseRecord {
                last_lat: last_lat.into(),
                last_lon: last_lon.into(),
                find_lat: find_lat.into(),
                find_lon: find_lon.into(),
                grid,
            },
            hours,
        })
    }
}

/// JSON document printed by the `grid` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct GridReport {
    #[serde(flatten)]
    pub(crate) summary: CaseSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) hours: Option<ReportedHours>,
}

pub(super) fn run_grid(args: GridArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_grid(&config)?;
    write_json(writer, &report)
}

pub(super) fn execute_grid(config: &GridCommandConfig) -> Result<GridReport, CliError> {
    let case = SearchCase::from_record(&config.record)?;
    debug!(
        "find cell ({}, {}) on a {}-cell grid",
        case.find_cell().x,
        case.find_cell().y,
        case.grid().side_cell_count()
    );
    Ok(GridReport {
        summary: case.summary(),
        hours: config
            .hours
            .clone()
            .map(ReportedHours::with_filled_total),
    })
}
