//! SVG document emission

use super::format_number;
use crate::constants::SVG_GENERATOR_COMMENT;
use crate::render::{Color, PathCommand, VectorShape};

/// Render `shape` as a self-contained `width x width` SVG 1.1 document.
///
/// `background` of `None` leaves the page unpainted (`fill="none"`).
/// Output depends only on the arguments, byte for byte.
pub fn export_svg(shape: &VectorShape, foreground: Color, background: Option<Color>, width: u32) -> String {
    let transform = shape.transform_to_width(width);
    let background_fill = background.map_or_else(|| "none".to_string(), |c| c.to_hex());

    let mut svg = String::new();
    svg += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    svg += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
    svg += &format!(
        "<svg version=\"1.1\" xmlns=\"http://www.w3.org/2000/svg\" width=\"{0}\" height=\"{0}\" viewBox=\"0 0 {0} {0}\">\n",
        width
    );
    svg += SVG_GENERATOR_COMMENT;
    svg += "\n";
    svg += &format!(
        "<rect fill=\"{}\" x=\"0\" y=\"0\" width=\"{1}\" height=\"{1}\"/>\n",
        background_fill, width
    );
    svg += &format!(
        "<g transform=\"translate({},{}) scale({},{})\" fill=\"{}\" stroke=\"none\">\n",
        format_number(transform.translate_x),
        format_number(transform.translate_y),
        format_number(transform.scale_x),
        format_number(transform.scale_y),
        foreground.to_hex(),
    );
    svg += "\t<path d=\"";
    svg += &path_data(shape);
    svg += "\"/>\n";
    svg += "</g>\n";
    svg += "</svg>\n";
    svg
}

/// `d` attribute for the shape, one `M L L L Z` group per square
pub fn path_data(shape: &VectorShape) -> String {
    let mut d = String::new();
    for command in shape.commands() {
        if !d.is_empty() {
            d.push(' ');
        }
        match command {
            PathCommand::MoveTo(x, y) => d.push_str(&format!("M{} {}", x, y)),
            PathCommand::LineTo(x, y) => d.push_str(&format!("L{} {}", x, y)),
            PathCommand::Close => d.push('Z'),
        }
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{CorrectionLevel, MatrixSource, QrMatrix, QrcodeSource};
    use crate::render::vectorize;

    fn attr<'a>(svg: &'a str, prefix: &str) -> &'a str {
        let start = svg.find(prefix).unwrap() + prefix.len();
        let end = start + svg[start..].find('"').unwrap();
        &svg[start..end]
    }

    #[test]
    fn test_document_layout() {
        let m = QrMatrix::from_rows(&["#.", ".#"]).unwrap();
        let svg = export_svg(&vectorize(&m), Color::rgb(255, 0, 0), Some(Color::WHITE), 100);

        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n\
<svg version=\"1.1\" xmlns=\"http://www.w3.org/2000/svg\" width=\"100\" height=\"100\" viewBox=\"0 0 100 100\">\n\
<!-- Generated by qrsmith -->\n\
<rect fill=\"#ffffff\" x=\"0\" y=\"0\" width=\"100\" height=\"100\"/>\n\
<g transform=\"translate(0,0) scale(50,50)\" fill=\"#ff0000\" stroke=\"none\">\n\
\t<path d=\"M0 0 L1 0 L1 1 L0 1 Z M1 1 L2 1 L2 2 L1 2 Z\"/>\n\
</g>\n\
</svg>\n";
        assert_eq!(svg, expected);
    }

    #[test]
    fn test_transparent_background_is_unfilled() {
        let m = QrMatrix::from_rows(&["#"]).unwrap();
        let svg = export_svg(&vectorize(&m), Color::BLACK, None, 10);
        assert!(svg.contains("<rect fill=\"none\""));
        assert!(svg.contains("fill=\"#000000\""));
    }

    #[test]
    fn test_quiet_zone_becomes_translation() {
        let m = QrMatrix::from_rows(&["#.", ".#"]).unwrap().with_quiet_zone(1);
        let svg = export_svg(&vectorize(&m), Color::BLACK, Some(Color::WHITE), 300);
        assert_eq!(attr(&svg, "transform=\""), "translate(75,75) scale(75,75)");
    }

    fn transform_numbers(svg: &str) -> [f64; 4] {
        let numbers: Vec<f64> = attr(svg, "transform=\"")
            .split(|c: char| !(c.is_ascii_digit() || c == '.'))
            .filter(|s| !s.is_empty())
            .map(|s| s.parse().unwrap())
            .collect();
        [numbers[0], numbers[1], numbers[2], numbers[3]]
    }

    #[test]
    fn test_content_spans_output_width() {
        let m = QrMatrix::from_rows(&["#.#", "...", "#.#"]).unwrap();
        let width = 287;
        let shape = vectorize(&m);
        let [tx, ty, sx, sy] = transform_numbers(&export_svg(&shape, Color::BLACK, None, width));
        let bounds = shape.bounds().unwrap();

        let right = tx + f64::from(bounds.width) * sx;
        let bottom = ty + f64::from(bounds.height) * sy;
        assert!(tx.abs() < 1e-6 && ty.abs() < 1e-6);
        assert!((right - f64::from(width)).abs() < 1e-6, "right edge {}", right);
        assert!((bottom - f64::from(width)).abs() < 1e-6, "bottom edge {}", bottom);
    }

    #[test]
    fn test_default_quiet_zone_extent_within_tolerance() {
        // 29-module matrix: 300/29 has no short decimal form
        let matrix = QrcodeSource::default().encode(b"HELLO", CorrectionLevel::L).unwrap();
        assert_eq!(matrix.width(), 29);
        let shape = vectorize(&matrix);

        for width in [300, 287, 1000, 16] {
            let [tx, ty, sx, sy] = transform_numbers(&export_svg(&shape, Color::BLACK, None, width));
            let (ox, oy) = shape.origin();
            let far_x = tx + f64::from(shape.extent() - ox) * sx;
            let far_y = ty + f64::from(shape.extent() - oy) * sy;
            assert!((far_x - f64::from(width)).abs() < 1e-6, "width {}: far x {}", width, far_x);
            assert!((far_y - f64::from(width)).abs() < 1e-6, "width {}: far y {}", width, far_y);
        }
    }
}
