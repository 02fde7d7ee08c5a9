//! Loading probability fields from stored grayscale images.

use camino::Utf8Path;
use log::debug;
use mapscore_fs::read_utf8_file;

use crate::{FieldLoadError, ProbabilityField};

/// Read and decode the image at `path` into a probability field.
///
/// Colour images are converted to 8-bit luma first; each pixel's intensity
/// becomes the value of the matching cell.
///
/// # Errors
/// Returns [`FieldLoadError::Read`] when the file cannot be read,
/// [`FieldLoadError::Decode`] when it is not a supported image and
/// [`FieldLoadError::Field`] when the decoded pixels do not form a field.
pub fn load_field(path: &Utf8Path) -> Result<ProbabilityField, FieldLoadError> {
    let bytes = read_utf8_file(path).map_err(|source| FieldLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|source| FieldLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let luma = decoded.to_luma8();
    debug!(
        "decoded {}x{} probability field from {path}",
        luma.width(),
        luma.height()
    );
    ProbabilityField::from_luma(luma).map_err(|source| FieldLoadError::Field {
        path: path.to_path_buf(),
        source,
    })
}
