//! Render request value object

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_OUTPUT_WIDTH, MAX_OUTPUT_WIDTH};
use crate::matrix::CorrectionLevel;
use crate::render::{Background, Color};
use crate::{Error, Result};

/// Everything needed to render one QR code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    /// UTF-8 message bytes
    pub message: Vec<u8>,
    pub correction_level: CorrectionLevel,
    pub foreground: Color,
    pub transparent_background: bool,
    /// Output side in pixels (bitmap) or points (vector)
    pub output_width: u32,
}

impl RenderRequest {
    /// Request with default settings for `message`
    pub fn new(message: impl Into<Vec<u8>>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_correction_level(mut self, level: CorrectionLevel) -> Self {
        self.correction_level = level;
        self
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    pub fn with_transparent_background(mut self, transparent: bool) -> Self {
        self.transparent_background = transparent;
        self
    }

    pub fn with_output_width(mut self, width: u32) -> Self {
        self.output_width = width;
        self
    }

    pub fn background(&self) -> Background {
        Background::from_transparent(self.transparent_background)
    }

    /// Reject requests that cannot produce an artifact.
    ///
    /// Width is capped at [`MAX_OUTPUT_WIDTH`] because bitmap rendering
    /// allocates `width * width * 8` bytes up front.
    pub fn validate(&self) -> Result<()> {
        if self.message.is_empty() {
            return Err(Error::Input("message is empty".to_string()));
        }
        if self.output_width == 0 {
            return Err(Error::Input("output width must be positive".to_string()));
        }
        if self.output_width > MAX_OUTPUT_WIDTH {
            return Err(Error::Input(format!(
                "output width {} exceeds the maximum of {}",
                self.output_width, MAX_OUTPUT_WIDTH
            )));
        }
        Ok(())
    }
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            message: Vec::new(),
            correction_level: CorrectionLevel::L,
            foreground: Color::BLACK,
            transparent_background: false,
            output_width: DEFAULT_OUTPUT_WIDTH,
        }
    }
}
