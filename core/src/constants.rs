//! Centralized rendering constants
//!
//! Defaults applied when the caller leaves a parameter unspecified.

/// Default output width in pixels (bitmap) or points (vector)
pub const DEFAULT_OUTPUT_WIDTH: u32 = 300;

/// Largest accepted output width.
///
/// Bitmap output holds a `width x width` RGBA16 buffer (8 bytes per pixel),
/// 128 MiB at this cap, plus an 8-bit RGB copy for JPEG.
pub const MAX_OUTPUT_WIDTH: u32 = 4_096;

/// Light modules padded around the symbol by the default matrix source
pub const DEFAULT_QUIET_ZONE: u32 = 4;

/// Lossy compression quality, 0.0 to 1.0
pub const DEFAULT_QUALITY: f32 = 1.0;

/// Capacity of the render queue's job channel
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Comment written into every SVG document
pub const SVG_GENERATOR_COMMENT: &str = "<!-- Generated by qrsmith -->";

/// File name prefix for outputs whose input was literal text
pub const OUTPUT_FILE_PREFIX: &str = "qr_";
