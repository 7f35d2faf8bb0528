//! Two-color rasterization of a module matrix

use image::{ImageBuffer, Rgba};

use super::color::{Background, Color};
use crate::matrix::QrMatrix;
use crate::{Error, Result};

/// One pixel per module, 16 bits per channel
pub type ColorizedRaster = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Paint dark modules with `foreground` and light modules with `background`.
///
/// Module boundaries are kept exactly; nothing is blended at this stage.
pub fn colorize(matrix: &QrMatrix, foreground: Color, background: Background) -> Result<ColorizedRaster> {
    if matrix.is_empty() {
        return Err(Error::Input("cannot colorize an empty matrix".to_string()));
    }

    let side = u32::try_from(matrix.width())
        .map_err(|_| Error::Input("matrix too large to rasterize".to_string()))?;
    let dark = Rgba(foreground.to_rgba16());
    let light = Rgba(background.color().to_rgba16());

    Ok(ImageBuffer::from_fn(side, side, |x, y| {
        if matrix.is_dark(x as usize, y as usize) {
            dark
        } else {
            light
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> QrMatrix {
        QrMatrix::from_rows(&["#.", ".#"]).unwrap()
    }

    #[test]
    fn test_maps_modules_to_colors() {
        let raster = colorize(&checker(), Color::rgb(255, 0, 0), Background::White).unwrap();

        assert_eq!(raster.dimensions(), (2, 2));
        assert_eq!(raster.get_pixel(0, 0).0, [0xffff, 0, 0, 0xffff]);
        assert_eq!(raster.get_pixel(1, 0).0, [0xffff; 4]);
        assert_eq!(raster.get_pixel(1, 1).0, [0xffff, 0, 0, 0xffff]);
    }

    #[test]
    fn test_transparent_background() {
        let raster = colorize(&checker(), Color::BLACK, Background::Transparent).unwrap();
        assert_eq!(raster.get_pixel(0, 1).0[3], 0);
        assert_eq!(raster.get_pixel(0, 0).0[3], 0xffff);
    }

    #[test]
    fn test_empty_matrix_is_input_error() {
        let empty = QrMatrix::new(0, Vec::new()).unwrap();
        assert!(colorize(&empty, Color::BLACK, Background::White).unwrap_err().is_input());
    }
}
