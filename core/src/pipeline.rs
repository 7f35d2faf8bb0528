//! Request to artifact: matrix source, then the raster or vector branch

use std::path::Path;

use crate::export::{export_pdf, export_svg, Artifact, BitmapExporter, OutputFormat, QualityOptions, RasterCapabilities};
use crate::matrix::{MatrixSource, QrcodeSource};
use crate::render::{colorize, vectorize, ScaleTransform};
use crate::request::RenderRequest;
use crate::{Config, Error, Result};

/// Renders requests into artifacts.
///
/// Holds no mutable state; concurrency limits for the backend are applied by
/// [`RenderQueue`](crate::queue::RenderQueue), not here.
#[derive(Debug, Clone)]
pub struct Renderer<S = QrcodeSource> {
    source: S,
    bitmap: BitmapExporter,
    quality: QualityOptions,
}

impl Renderer<QrcodeSource> {
    /// Renderer using the `qrcode` crate and the detected raster backend
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_source(QrcodeSource::new(config.quiet_zone), RasterCapabilities::detect())
            .with_quality(QualityOptions { quality: config.quality })
    }
}

impl Default for Renderer<QrcodeSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MatrixSource> Renderer<S> {
    pub fn with_source(source: S, capabilities: RasterCapabilities) -> Self {
        Self {
            source,
            bitmap: BitmapExporter::new(capabilities),
            quality: QualityOptions::default(),
        }
    }

    pub fn with_quality(mut self, quality: QualityOptions) -> Self {
        self.quality = quality;
        self
    }

    pub fn capabilities(&self) -> RasterCapabilities {
        self.bitmap.capabilities()
    }

    /// Render `request` as `format`.
    ///
    /// The request is validated and the format checked against the backend
    /// before the matrix source is consulted.
    pub fn render(&self, request: &RenderRequest, format: OutputFormat) -> Result<Artifact> {
        request.validate()?;
        if !format.is_vector() && !self.capabilities().supports(format) {
            return Err(Error::Encoding(format!(
                "{} output is not available with this raster backend",
                format
            )));
        }

        let matrix = self.source.encode(&request.message, request.correction_level)?;
        let width = request.output_width;
        tracing::debug!("rendering {}x{} matrix as {} at {}px", matrix.width(), matrix.width(), format, width);

        let artifact = match format {
            OutputFormat::Svg => {
                let shape = vectorize(&matrix);
                Artifact::Svg(export_svg(&shape, request.foreground, request.background().fill(), width))
            }
            OutputFormat::Pdf => {
                let shape = vectorize(&matrix);
                Artifact::Pdf(export_pdf(&shape, request.foreground, request.transparent_background, width)?)
            }
            OutputFormat::Png | OutputFormat::Jpeg | OutputFormat::Tiff | OutputFormat::Heif => {
                let raster = colorize(&matrix, request.foreground, request.background())?;
                let native = f64::from(raster.width());
                let transform = ScaleTransform::to_width((native, native), width);
                let bytes = self.bitmap.export(&raster, &transform, format, &self.quality)?;
                Artifact::Bitmap { format, bytes }
            }
        };

        Ok(artifact)
    }

    /// Render and write to `path`. The file is only created once the whole
    /// artifact exists in memory.
    pub fn render_to_file(&self, request: &RenderRequest, format: OutputFormat, path: &Path) -> Result<()> {
        let artifact = self.render(request, format)?;
        artifact.write_to(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::matrix::{CorrectionLevel, QrMatrix};
    use crate::render::Color;

    struct CountingSource {
        calls: AtomicUsize,
    }

    impl MatrixSource for CountingSource {
        fn encode(&self, message: &[u8], level: CorrectionLevel) -> Result<QrMatrix> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            QrcodeSource::default().encode(message, level)
        }
    }

    fn counting() -> CountingSource {
        CountingSource { calls: AtomicUsize::new(0) }
    }

    fn temp_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("qrsmith-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Pixel whose centre samples module `m` at `width` px over a 29-module matrix
    fn module_pixel(m: u32, width: u32) -> u32 {
        ((f64::from(m) + 0.5) * f64::from(width) / 29.0) as u32
    }

    #[test]
    fn test_hello_png_has_three_finder_patterns() {
        let request = RenderRequest::new("HELLO").with_output_width(100);
        let artifact = Renderer::new().render(&request, OutputFormat::Png).unwrap();
        let image = image::load_from_memory(artifact.as_bytes()).unwrap().to_rgba8();

        assert_eq!(image.dimensions(), (100, 100));
        assert!(image.pixels().any(|p| p.0 == [0, 0, 0, 255]));
        assert!(image.pixels().any(|p| p.0 == [255, 255, 255, 255]));

        // Quiet zone of 4 around a 21-module symbol
        let sample = |origin_x: u32, origin_y: u32| {
            let mut pattern = Vec::new();
            for j in 0..7 {
                for i in 0..7 {
                    let px = image.get_pixel(module_pixel(origin_x + i, 100), module_pixel(origin_y + j, 100));
                    pattern.push(px.0[0] == 0);
                }
            }
            pattern
        };
        let expected: Vec<bool> = (0..7)
            .flat_map(|j| (0..7).map(move |i| (i, j)))
            .map(|(i, j)| i == 0 || i == 6 || j == 0 || j == 6 || ((2..=4).contains(&i) && (2..=4).contains(&j)))
            .collect();

        assert_eq!(sample(4, 4), expected);
        assert_eq!(sample(18, 4), expected);
        assert_eq!(sample(4, 18), expected);
    }

    #[test]
    fn test_empty_message_never_reaches_source() {
        let source = counting();
        let renderer = Renderer::with_source(&source, RasterCapabilities::detect());
        let err = renderer.render(&RenderRequest::new(""), OutputFormat::Png).unwrap_err();

        assert!(err.is_input());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_pdf_page_box_matches_width() {
        let request = RenderRequest::new("https://example.com");
        let artifact = Renderer::new().render(&request, OutputFormat::Pdf).unwrap();

        let doc = lopdf::Document::load_mem(artifact.as_bytes()).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);
        let page = doc.get_object(*pages.values().next().unwrap()).unwrap().as_dict().unwrap();
        let media_box: Vec<i64> = page
            .get(b"MediaBox")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o.as_i64().unwrap())
            .collect();
        assert_eq!(media_box, vec![0, 0, 300, 300]);
    }

    #[test]
    fn test_heif_without_capability_writes_nothing() {
        let source = counting();
        let renderer = Renderer::with_source(&source, RasterCapabilities { heif: false });
        let dir = temp_dir();
        let path = dir.join("qr_0000.heif");

        let err = renderer
            .render_to_file(&RenderRequest::new("HELLO"), OutputFormat::Heif, &path)
            .unwrap_err();

        assert!(matches!(err, Error::Encoding(_)));
        assert!(!path.exists());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let path = std::env::temp_dir()
            .join(format!("qrsmith-missing-{}", uuid::Uuid::new_v4()))
            .join("out.svg");
        let err = Renderer::new()
            .render_to_file(&RenderRequest::new("HELLO"), OutputFormat::Svg, &path)
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_vector_output_is_idempotent() {
        let request = RenderRequest::new("same input")
            .with_correction_level(CorrectionLevel::Q)
            .with_foreground(Color::rgb(20, 40, 200))
            .with_output_width(512);
        let renderer = Renderer::new();

        for format in [OutputFormat::Svg, OutputFormat::Pdf] {
            let first = renderer.render(&request, format).unwrap();
            let second = renderer.render(&request, format).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_red_foreground_only_red_and_white() {
        let request = RenderRequest::new("color check")
            .with_foreground(Color::rgb(255, 0, 0))
            .with_output_width(157);
        let artifact = Renderer::new().render(&request, OutputFormat::Png).unwrap();
        let image = image::load_from_memory(artifact.as_bytes()).unwrap().to_rgba8();

        assert_eq!(image.dimensions(), (157, 157));
        for pixel in image.pixels() {
            assert!(pixel.0 == [255, 0, 0, 255] || pixel.0 == [255, 255, 255, 255], "{:?}", pixel);
        }
    }

    #[test]
    fn test_transparent_raster_alpha() {
        let request = RenderRequest::new("HELLO")
            .with_transparent_background(true)
            .with_output_width(58);
        let artifact = Renderer::new().render(&request, OutputFormat::Png).unwrap();
        let image = image::load_from_memory(artifact.as_bytes()).unwrap().to_rgba8();

        for pixel in image.pixels() {
            match pixel.0 {
                [0, 0, 0, 255] => {}
                [_, _, _, 0] => {}
                other => panic!("unexpected pixel {:?}", other),
            }
        }
        // Quiet zone is light, finder corner is dark
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
        assert_eq!(image.get_pixel(9, 9).0[3], 255);
    }

    #[test]
    fn test_transparent_svg_and_pdf() {
        let request = RenderRequest::new("HELLO").with_transparent_background(true);
        let renderer = Renderer::new();

        let svg = renderer.render(&request, OutputFormat::Svg).unwrap();
        let svg = std::str::from_utf8(svg.as_bytes()).unwrap();
        assert!(svg.contains("<rect fill=\"none\""));

        let pdf = renderer.render(&request, OutputFormat::Pdf).unwrap();
        let doc = lopdf::Document::load_mem(pdf.as_bytes()).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let content = lopdf::content::Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        assert!(!content.operations.iter().any(|op| op.operator == "re"));
    }

    #[test]
    fn test_capacity_overflow_surfaces_input_error() {
        let request = RenderRequest::new(vec![b'x'; 3000]).with_correction_level(CorrectionLevel::H);
        let err = Renderer::new().render(&request, OutputFormat::Svg).unwrap_err();
        assert!(err.is_input());
    }
}
