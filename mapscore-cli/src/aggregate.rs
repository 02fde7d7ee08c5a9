//! Aggregate command implementation for the MapScore CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use mapscore_core::Rating;
use mapscore_scorer::{ModelAggregate, ModelId, TestEntry};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{read_json, require_existing, write_json};
use crate::{ARG_TESTS, CliError, ENV_TESTS};

/// CLI arguments for the `aggregate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Compute a model's aggregate rating from its test ratings. \
                 The input is a JSON document with a model id and a list of \
                 tests, each carrying a rating and an active flag. Only \
                 closed (inactive) rated tests count towards the mean.",
    about = "Aggregate a model's test ratings"
)]
#[ortho_config(prefix = "MAPSCORE")]
pub(crate) struct AggregateArgs {
    /// Path to a JSON file describing the model's tests.
    #[arg(value_name = "tests")]
    #[serde(default)]
    pub(crate) tests_path: Option<Utf8PathBuf>,
}

impl AggregateArgs {
    pub(crate) fn into_config(self) -> Result<AggregateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AggregateConfig::try_from(merged)
    }
}

/// Resolved `aggregate` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AggregateConfig {
    /// Path to the model's tests.
    pub(crate) tests_path: Utf8PathBuf,
}

impl TryFrom<AggregateArgs> for AggregateConfig {
    type Error = CliError;

    fn try_from(args: AggregateArgs) -> Result<Self, Self::Error> {
        let tests_path = args.tests_path.ok_or(CliError::MissingArgument {
            field: ARG_TESTS,
            env: ENV_TESTS,
        })?;
        Ok(Self { tests_path })
    }
}

/// A model and its tests as read from disk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct ModelTests {
    pub(crate) model: ModelId,
    #[serde(default)]
    pub(crate) tests: Vec<TestEntry>,
}

/// JSON document printed by the `aggregate` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct AggregateReport {
    pub(crate) model: ModelId,
    pub(crate) tests: usize,
    pub(crate) counted: usize,
    pub(crate) rating: Rating,
}

pub(super) fn run_aggregate(args: AggregateArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.tests_path, ARG_TESTS)?;
    let input: ModelTests = read_json(&config.tests_path, ARG_TESTS)?;
    write_json(writer, &summarise(input))
}

pub(super) fn summarise(input: ModelTests) -> AggregateReport {
    let aggregate = ModelAggregate::from_entries(input.model, input.tests);
    let counted = aggregate
        .entries()
        .filter(|entry| !entry.active && entry.rating.is_rated())
        .count();
    AggregateReport {
        model: aggregate.model(),
        tests: aggregate.len(),
        counted,
        rating: aggregate.rating(),
    }
}
