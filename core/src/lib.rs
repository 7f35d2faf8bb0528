//! qrsmith core - QR code rendering and export pipeline
//!
//! Turns a message into a QR module matrix, then either colorizes and scales
//! it into a PNG/JPEG/TIFF raster or outlines it as vector paths for SVG and
//! PDF. Rendering jobs run through a single-worker queue because the
//! rendering backends tolerate only one caller at a time.

pub mod constants;
pub mod export;
pub mod input;
pub mod matrix;
pub mod pipeline;
pub mod queue;
pub mod render;
pub mod request;

mod error;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use error::{Error, Result};

/// Configuration for renderers and the render queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Light modules added around the symbol
    pub quiet_zone: u32,
    /// Lossy compression quality, 0.0 to 1.0
    pub quality: f32,
    /// How a failing job affects the rest of its batch
    pub batch_policy: BatchPolicy,
    /// Jobs that may wait in the queue before submitters block
    pub queue_capacity: usize,
    /// Where outputs are written; see [`Config::output_dir`]
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiet_zone: constants::DEFAULT_QUIET_ZONE,
            quality: constants::DEFAULT_QUALITY,
            batch_policy: BatchPolicy::default(),
            queue_capacity: constants::DEFAULT_QUEUE_CAPACITY,
            output_dir: None,
        }
    }
}

impl Config {
    /// Load from a JSON file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.quality) {
            return Err(Error::Config(format!("quality {} is outside 0.0..=1.0", self.quality)));
        }
        if self.queue_capacity == 0 {
            return Err(Error::Config("queue_capacity must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Configured directory with `~` expanded, or the default output directory
    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => input::expand_tilde(&dir.to_string_lossy()),
            None => input::default_output_dir(),
        }
    }
}

// Re-export key types for convenience
pub use export::{Artifact, OutputFormat, RasterCapabilities};
pub use matrix::{CorrectionLevel, MatrixSource, QrMatrix, QrcodeSource};
pub use pipeline::Renderer;
pub use queue::{BatchPolicy, BatchReport, CancelToken, QueueEvent, RenderJob, RenderQueue};
pub use render::Color;
pub use request::RenderRequest;
