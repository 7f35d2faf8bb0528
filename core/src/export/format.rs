//! Output format selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Tiff,
    Heif,
    Pdf,
    Svg,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::Png,
        OutputFormat::Jpeg,
        OutputFormat::Tiff,
        OutputFormat::Heif,
        OutputFormat::Pdf,
        OutputFormat::Svg,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Tiff => "TIFF",
            OutputFormat::Heif => "HEIF",
            OutputFormat::Pdf => "PDF",
            OutputFormat::Svg => "SVG",
        }
    }

    /// File extension: the lower-cased format name
    pub fn extension(self) -> String {
        self.name().to_lowercase()
    }

    pub fn is_vector(self) -> bool {
        matches!(self, OutputFormat::Pdf | OutputFormat::Svg)
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_uppercase();
        let wanted = match wanted.as_str() {
            "JPG" => "JPEG",
            "TIF" => "TIFF",
            "HEIC" => "HEIF",
            other => other,
        };
        OutputFormat::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| Error::Input(format!("unknown output format '{}'", s)))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_extension() {
        assert_eq!("svg".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert_eq!("jpg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::Tiff.extension(), "tiff");
        assert!("gif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_vector_formats() {
        let vector: Vec<_> = OutputFormat::ALL.into_iter().filter(|f| f.is_vector()).collect();
        assert_eq!(vector, vec![OutputFormat::Pdf, OutputFormat::Svg]);
    }
}
