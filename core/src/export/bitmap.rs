//! Raster encoding through the `image` crate

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb, RgbImage};

use super::OutputFormat;
use crate::constants::DEFAULT_QUALITY;
use crate::render::{ColorizedRaster, ScaleTransform};
use crate::{Error, Result};

/// Formats the raster backend can produce on this build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterCapabilities {
    pub heif: bool,
}

impl RasterCapabilities {
    /// Capabilities of the bundled `image` backend, which has no HEIF encoder
    pub fn detect() -> Self {
        Self { heif: false }
    }

    pub fn supports(&self, format: OutputFormat) -> bool {
        match format {
            OutputFormat::Png | OutputFormat::Jpeg | OutputFormat::Tiff => true,
            OutputFormat::Heif => self.heif,
            OutputFormat::Pdf | OutputFormat::Svg => false,
        }
    }

    /// Every format a caller may offer, vector formats included
    pub fn available_formats(&self) -> Vec<OutputFormat> {
        OutputFormat::ALL
            .into_iter()
            .filter(|f| f.is_vector() || self.supports(*f))
            .collect()
    }
}

impl Default for RasterCapabilities {
    fn default() -> Self {
        Self::detect()
    }
}

/// Encoder options for lossy formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityOptions {
    /// 0.0 to 1.0
    pub quality: f32,
}

impl QualityOptions {
    fn jpeg_quality(&self) -> u8 {
        (self.quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8
    }
}

impl Default for QualityOptions {
    fn default() -> Self {
        Self { quality: DEFAULT_QUALITY }
    }
}

/// Renders colorized rasters into PNG, JPEG, TIFF or HEIF bytes
#[derive(Debug, Clone, Default)]
pub struct BitmapExporter {
    capabilities: RasterCapabilities,
}

impl BitmapExporter {
    pub fn new(capabilities: RasterCapabilities) -> Self {
        Self { capabilities }
    }

    pub fn capabilities(&self) -> RasterCapabilities {
        self.capabilities
    }

    /// Scale `raster` by `transform` and encode it as `format`.
    ///
    /// PNG and TIFF keep 16 bits per channel. JPEG has no alpha, so the
    /// raster is flattened over white first.
    pub fn export(
        &self,
        raster: &ColorizedRaster,
        transform: &ScaleTransform,
        format: OutputFormat,
        options: &QualityOptions,
    ) -> Result<Vec<u8>> {
        if !self.capabilities.supports(format) {
            return Err(Error::Encoding(format!(
                "{} output is not supported by the raster backend",
                format
            )));
        }

        let scaled = scale_nearest(raster, transform)?;
        let mut buffer = Cursor::new(Vec::new());

        match format {
            OutputFormat::Png => DynamicImage::ImageRgba16(scaled).write_to(&mut buffer, ImageFormat::Png)?,
            OutputFormat::Tiff => DynamicImage::ImageRgba16(scaled).write_to(&mut buffer, ImageFormat::Tiff)?,
            OutputFormat::Jpeg => {
                let flat = flatten_over_white(&scaled);
                JpegEncoder::new_with_quality(&mut buffer, options.jpeg_quality()).encode_image(&flat)?;
            }
            OutputFormat::Heif | OutputFormat::Pdf | OutputFormat::Svg => {
                return Err(Error::Encoding(format!("no {} encoder in the raster backend", format)));
            }
        }

        let bytes = buffer.into_inner();
        tracing::debug!("encoded {} raster: {} bytes", format, bytes.len());
        Ok(bytes)
    }
}

/// Nearest-neighbour resample: each output pixel takes the module under its
/// centre, so module edges stay hard.
fn scale_nearest(raster: &ColorizedRaster, transform: &ScaleTransform) -> Result<ColorizedRaster> {
    let (src_w, src_h) = raster.dimensions();
    let (width, height) = transform.output_size((src_w, src_h));
    if width == 0 || height == 0 || src_w == 0 || src_h == 0 {
        return Err(Error::Input(format!("cannot scale a {}x{} raster to {}x{}", src_w, src_h, width, height)));
    }

    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        let (sx, sy) = transform.invert((f64::from(x) + 0.5, f64::from(y) + 0.5));
        let sx = (sx.floor().max(0.0) as u32).min(src_w - 1);
        let sy = (sy.floor().max(0.0) as u32).min(src_h - 1);
        *raster.get_pixel(sx, sy)
    }))
}

fn flatten_over_white(raster: &ColorizedRaster) -> RgbImage {
    const MAX: u32 = u16::MAX as u32;
    ImageBuffer::from_fn(raster.width(), raster.height(), |x, y| {
        let [r, g, b, a] = raster.get_pixel(x, y).0;
        let a = u32::from(a);
        let blend = |c: u16| {
            let c16 = (u32::from(c) * a + MAX * (MAX - a)) / MAX;
            ((c16 + 128) / 257) as u8
        };
        Rgb([blend(r), blend(g), blend(b)])
    })
}
