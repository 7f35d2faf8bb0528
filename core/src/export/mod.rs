//! Bitmap and vector exporters

mod bitmap;
mod format;
pub mod pdf;
pub mod svg;

use std::path::Path;

use crate::Result;

pub use bitmap::{BitmapExporter, QualityOptions, RasterCapabilities};
pub use format::OutputFormat;
pub use pdf::export_pdf;
pub use svg::export_svg;

/// Finished output of one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Bitmap { format: OutputFormat, bytes: Vec<u8> },
    Svg(String),
    Pdf(Vec<u8>),
}

impl Artifact {
    pub fn format(&self) -> OutputFormat {
        match self {
            Artifact::Bitmap { format, .. } => *format,
            Artifact::Svg(_) => OutputFormat::Svg,
            Artifact::Pdf(_) => OutputFormat::Pdf,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Artifact::Bitmap { bytes, .. } | Artifact::Pdf(bytes) => bytes,
            Artifact::Svg(text) => text.as_bytes(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Write the whole artifact in one call; nothing is written for an
    /// artifact that failed to render because none exists.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.as_bytes())?;
        tracing::info!("wrote {} ({} bytes)", path.display(), self.len());
        Ok(())
    }
}

/// Decimal text for a coordinate or transform operand: nine fixed decimals,
/// trailing zeros trimmed. Keeps a scaled extent within 1e-6 of its target
/// for any matrix the encoder can produce.
pub(crate) fn format_number(value: f64) -> String {
    let text = format!("{:.9}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
