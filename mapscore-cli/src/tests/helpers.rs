//! Test helpers for writing CLI inputs to a temporary workspace.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use image::{GrayImage, Luma};
use std::fs;
use tempfile::TempDir;

/// Temporary directory holding the files a CLI invocation reads.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write a case on a three-cell grid (500 m cells, 1 km box).
    pub(super) fn write_small_case(&self, find_lat: f64, find_lon: f64) -> Utf8PathBuf {
        let path = self.path("case.json");
        let json = format!(
            r#"{{"last_lat":"46.8","last_lon":-121.7,"find_lat":{find_lat},"find_lon":{find_lon},"grid":{{"cell_size_m":500,"box_side_km":1}}}}"#
        );
        write_utf8(&path, json.as_bytes());
        path
    }

    /// Write a 3 × 3 PNG whose centre pixel is brightest.
    pub(super) fn write_peaked_field(&self) -> Utf8PathBuf {
        let path = self.path("field.png");
        GrayImage::from_fn(3, 3, |x, y| Luma([if (x, y) == (1, 1) { 200 } else { 10 }]))
            .save(path.as_std_path())
            .expect("write png");
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test input");
}

/// Parse `args` as a full command line and run it, capturing stdout.
pub(super) fn run_cli(args: &[&str]) -> Result<serde_json::Value, CliError> {
    let cli = Cli::try_parse_from(args).map_err(CliError::ArgumentParsing)?;
    let mut output = Vec::new();
    dispatch(cli.command, &mut output)?;
    Ok(serde_json::from_slice(&output).expect("command prints JSON"))
}
