//! Per-cell probability values submitted for one search case.

use image::GrayImage;

use crate::FieldError;

/// A rectangular grid of non-negative, finite values stored row-major.
///
/// Row `r` runs west to east along grid row `y = r`; rows run north to
/// south.
///
/// # Examples
/// ```
/// use mapscore_scorer::ProbabilityField;
///
/// # fn main() -> Result<(), mapscore_scorer::FieldError> {
/// let field = ProbabilityField::from_rows(vec![vec![0.1, 0.2], vec![0.3, 0.4]])?;
/// assert_eq!(field.get(1, 0), Some(0.3));
/// assert_eq!(field.get(2, 0), None);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ProbabilityField {
    width: usize,
    height: usize,
    cells: Cells,
}

/// Cell storage. Luma fields keep their 8-bit pixels so a full-size image
/// costs one byte per cell.
#[derive(Debug, Clone)]
enum Cells {
    Luma(Vec<u8>),
    Real(Vec<f64>),
}

impl Cells {
    const fn len(&self) -> usize {
        match self {
            Self::Luma(cells) => cells.len(),
            Self::Real(cells) => cells.len(),
        }
    }

    fn get(&self, offset: usize) -> Option<f64> {
        match self {
            Self::Luma(cells) => cells.get(offset).copied().map(f64::from),
            Self::Real(cells) => cells.get(offset).copied(),
        }
    }
}

fn check_length(width: usize, height: usize, actual: usize) -> Result<(), FieldError> {
    let expected = width.checked_mul(height).unwrap_or(usize::MAX);
    if actual == expected {
        Ok(())
    } else {
        Err(FieldError::Length {
            width,
            height,
            expected,
            actual,
        })
    }
}

impl ProbabilityField {
    /// Wrap `values` as a `width × height` field.
    ///
    /// # Errors
    /// Returns [`FieldError::Length`] when `values` does not hold exactly
    /// `width * height` entries and [`FieldError::InvalidValue`] for the
    /// first negative or non-finite entry.
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> Result<Self, FieldError> {
        check_length(width, height, values.len())?;
        let invalid = values
            .iter()
            .position(|value| !value.is_finite() || *value < 0.0);
        if let Some(offset) = invalid {
            return Err(FieldError::InvalidValue {
                row: offset.checked_div(width).unwrap_or_default(),
                column: offset.checked_rem(width).unwrap_or_default(),
                value: values.get(offset).copied().unwrap_or(f64::NAN),
            });
        }
        Ok(Self {
            width,
            height,
            cells: Cells::Real(values),
        })
    }

    /// Build a field from nested rows, north row first.
    ///
    /// # Errors
    /// Returns [`FieldError::RaggedRow`] when rows differ in length, plus
    /// every error [`ProbabilityField::new`] can raise.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, FieldError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(width.saturating_mul(height));
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != width {
                return Err(FieldError::RaggedRow {
                    row,
                    expected: width,
                    actual: cells.len(),
                });
            }
            values.extend(cells);
        }
        Self::new(width, height, values)
    }

    /// Build a field from an 8-bit grayscale image; each pixel's intensity
    /// is the cell value.
    ///
    /// The pixel buffer is kept as is, one byte per cell.
    ///
    /// # Errors
    /// Returns [`FieldError::Length`] when the image dimensions cannot be
    /// addressed on this platform.
    pub fn from_luma(image: GrayImage) -> Result<Self, FieldError> {
        let width = usize::try_from(image.width()).unwrap_or(usize::MAX);
        let height = usize::try_from(image.height()).unwrap_or(usize::MAX);
        let pixels = image.into_raw();
        check_length(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            cells: Cells::Luma(pixels),
        })
    }

    /// Cells per row.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Report whether the field is `side × side`.
    #[must_use]
    pub const fn is_square_of(&self, side: usize) -> bool {
        self.width == side && self.height == side
    }

    /// Value at `row`, `column`, or `None` outside the field.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if column >= self.width {
            return None;
        }
        let offset = row.checked_mul(self.width)?.checked_add(column)?;
        self.cells.get(offset)
    }

    /// Number of cells in the field.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// All values, row-major.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        let (luma, real): (&[u8], &[f64]) = match &self.cells {
            Cells::Luma(cells) => (cells.as_slice(), &[]),
            Cells::Real(cells) => (&[], cells.as_slice()),
        };
        luma.iter()
            .copied()
            .map(f64::from)
            .chain(real.iter().copied())
    }

    /// Sum of every cell.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values().sum()
    }
}

impl PartialEq for ProbabilityField {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.values().eq(other.values())
    }
}
