//! QR module matrices and the encoder seam that produces them

mod source;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub use source::{MatrixSource, QrcodeSource};

/// QR error correction strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CorrectionLevel {
    /// ~7% of codewords recoverable
    #[default]
    L,
    /// ~15%
    M,
    /// ~25%
    Q,
    /// ~30%
    H,
}

impl CorrectionLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            CorrectionLevel::L => "L",
            CorrectionLevel::M => "M",
            CorrectionLevel::Q => "Q",
            CorrectionLevel::H => "H",
        }
    }
}

impl FromStr for CorrectionLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "L" => Ok(CorrectionLevel::L),
            "M" => Ok(CorrectionLevel::M),
            "Q" => Ok(CorrectionLevel::Q),
            "H" => Ok(CorrectionLevel::H),
            other => Err(Error::Input(format!(
                "unknown correction level '{}' (expected L, M, Q or H)",
                other
            ))),
        }
    }
}

impl fmt::Display for CorrectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Square grid of QR modules, `true` meaning dark.
///
/// Includes whatever quiet zone the producing source added. Immutable once
/// built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    modules: Vec<bool>,
}

impl QrMatrix {
    /// Build a matrix from row-major modules.
    ///
    /// Fails if `modules` does not hold exactly `width * width` entries.
    pub fn new(width: usize, modules: Vec<bool>) -> Result<Self> {
        let expected = width
            .checked_mul(width)
            .ok_or_else(|| Error::Input("matrix width overflows".to_string()))?;
        if modules.len() != expected {
            return Err(Error::Input(format!(
                "matrix of width {} needs {} modules, got {}",
                width,
                expected,
                modules.len()
            )));
        }
        Ok(Self { width, modules })
    }

    /// Build a matrix from rows of `'#'` (dark) and anything else (light).
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let width = rows.len();
        let mut modules = Vec::with_capacity(width * width);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(Error::Input(format!("row {} is not {} modules wide", y, width)));
            }
            modules.extend(row.chars().map(|c| c == '#'));
        }
        Self::new(width, modules)
    }

    /// Side length in modules
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0
    }

    /// Out-of-range coordinates read as light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.modules[y * self.width + x]
    }

    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }

    /// Rows of modules, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks() panics on 0, and an empty matrix has no rows anyway
        self.modules.chunks(self.width.max(1))
    }

    /// Copy with `border` light modules added on every side
    pub fn with_quiet_zone(&self, border: usize) -> Self {
        let width = self.width + 2 * border;
        let mut modules = vec![false; width * width];
        for (y, row) in self.rows().enumerate() {
            let start = (y + border) * width + border;
            modules[start..start + self.width].copy_from_slice(row);
        }
        Self { width, modules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correction_level_parse() {
        assert_eq!("h".parse::<CorrectionLevel>().unwrap(), CorrectionLevel::H);
        assert_eq!(" Q ".parse::<CorrectionLevel>().unwrap(), CorrectionLevel::Q);
        assert!("X".parse::<CorrectionLevel>().unwrap_err().is_input());
        assert_eq!(CorrectionLevel::default(), CorrectionLevel::L);
    }

    #[test]
    fn test_matrix_rejects_wrong_length() {
        assert!(QrMatrix::new(3, vec![true; 8]).is_err());
        assert!(QrMatrix::from_rows(&["#.", "#"]).is_err());
    }

    #[test]
    fn test_quiet_zone_padding() {
        let m = QrMatrix::from_rows(&["#.", ".#"]).unwrap();
        let padded = m.with_quiet_zone(2);

        assert_eq!(padded.width(), 6);
        assert_eq!(padded.dark_count(), 2);
        assert!(padded.is_dark(2, 2));
        assert!(padded.is_dark(3, 3));
        assert!(!padded.is_dark(0, 0));
        assert!(!padded.is_dark(3, 2));
    }

    #[test]
    fn test_out_of_range_is_light() {
        let m = QrMatrix::from_rows(&["#"]).unwrap();
        assert!(m.is_dark(0, 0));
        assert!(!m.is_dark(1, 0));
        assert!(!m.is_dark(0, 5));
    }
}
