//! Vector outline of a module matrix
//!
//! Every dark module becomes one closed unit square. Squares are never merged,
//! so the filled area always equals the dark-module count and the emitted path
//! is stable for a given matrix.

use super::scale::ScaleTransform;
use crate::matrix::QrMatrix;

/// Tight rectangle around the dark modules, in module units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One path instruction in native (module) units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCommand {
    MoveTo(u32, u32),
    LineTo(u32, u32),
    Close,
}

/// Unit squares for the dark modules of a matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorShape {
    /// Absolute cell coordinates, row-major
    cells: Vec<(u32, u32)>,
    bounds: Option<Bounds>,
    extent: u32,
}

/// Scan `matrix` row by row and emit a square for each dark module.
pub fn vectorize(matrix: &QrMatrix) -> VectorShape {
    let mut cells = Vec::with_capacity(matrix.dark_count());
    for (y, row) in matrix.rows().enumerate() {
        for (x, &dark) in row.iter().enumerate() {
            if dark {
                cells.push((x as u32, y as u32));
            }
        }
    }

    let bounds = bounds_of(&cells);
    tracing::debug!("vectorized {} dark modules, bounds {:?}", cells.len(), bounds);

    VectorShape {
        cells,
        bounds,
        extent: matrix.width() as u32,
    }
}

fn bounds_of(cells: &[(u32, u32)]) -> Option<Bounds> {
    let (first, rest) = cells.split_first()?;
    let (mut min_x, mut min_y) = *first;
    let (mut max_x, mut max_y) = *first;
    for &(x, y) in rest {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    Some(Bounds {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

impl VectorShape {
    /// `None` when the matrix has no dark modules
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Side of the source matrix, quiet zone included
    pub fn extent(&self) -> u32 {
        self.extent
    }

    /// Number of unit squares
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Filled area in square module units
    pub fn area(&self) -> u64 {
        self.cells.len() as u64
    }

    /// Bounding-box origin; path coordinates are relative to it
    pub fn origin(&self) -> (u32, u32) {
        self.bounds.map_or((0, 0), |b| (b.x, b.y))
    }

    /// Path instructions relative to [`origin`](Self::origin).
    ///
    /// Each square winds top-left, top-right, bottom-right, bottom-left.
    pub fn commands(&self) -> impl Iterator<Item = PathCommand> + '_ {
        let (ox, oy) = self.origin();
        self.cells.iter().flat_map(move |&(x, y)| {
            let (x, y) = (x - ox, y - oy);
            [
                PathCommand::MoveTo(x, y),
                PathCommand::LineTo(x + 1, y),
                PathCommand::LineTo(x + 1, y + 1),
                PathCommand::LineTo(x, y + 1),
                PathCommand::Close,
            ]
        })
    }

    /// Transform taking relative path coordinates to a `width x width` output
    /// covering the whole matrix.
    pub fn transform_to_width(&self, width: u32) -> ScaleTransform {
        let extent = f64::from(self.extent.max(1));
        let (ox, oy) = self.origin();
        ScaleTransform::to_width((extent, extent), width).with_offset((f64::from(ox), f64::from(oy)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_row_major_order_and_winding() {
        let m = QrMatrix::from_rows(&["...", ".##", "#.."]).unwrap();
        let shape = vectorize(&m);

        assert_eq!(shape.len(), 3);
        assert_eq!(
            shape.bounds(),
            Some(Bounds { x: 0, y: 1, width: 3, height: 2 })
        );

        let commands: Vec<_> = shape.commands().collect();
        assert_eq!(commands.len(), 15);
        // (1,1) relative to origin (0,1) comes first
        assert_eq!(
            &commands[..5],
            &[
                PathCommand::MoveTo(1, 0),
                PathCommand::LineTo(2, 0),
                PathCommand::LineTo(2, 1),
                PathCommand::LineTo(1, 1),
                PathCommand::Close,
            ]
        );
        assert_eq!(commands[5], PathCommand::MoveTo(2, 0));
        assert_eq!(commands[10], PathCommand::MoveTo(0, 1));
    }

    #[test]
    fn test_all_light_matrix() {
        let m = QrMatrix::from_rows(&["..", ".."]).unwrap();
        let shape = vectorize(&m);
        assert!(shape.is_empty());
        assert_eq!(shape.bounds(), None);
        assert_eq!(shape.commands().count(), 0);
    }

    #[test]
    fn test_transform_covers_output_width() {
        let m = QrMatrix::from_rows(&["#.", ".#"]).unwrap().with_quiet_zone(1);
        let shape = vectorize(&m);
        let t = shape.transform_to_width(400);

        // Relative (0,0) is absolute (1,1); matrix is 4 modules wide
        assert_eq!(t.apply((0.0, 0.0)), (100.0, 100.0));
        assert_eq!(t.apply((2.0, 2.0)), (300.0, 300.0));
    }

    proptest! {
        #[test]
        fn prop_area_equals_dark_modules(width in 1usize..24, seed in any::<u64>()) {
            let modules: Vec<bool> = (0..width * width)
                .map(|i| (seed.rotate_left((i % 64) as u32) ^ (i as u64 * 0x9E37_79B9)) & 1 == 1)
                .collect();
            let matrix = QrMatrix::new(width, modules).unwrap();
            let shape = vectorize(&matrix);

            prop_assert_eq!(shape.area(), matrix.dark_count() as u64);

            let mut seen = std::collections::HashSet::new();
            let (ox, oy) = shape.origin();
            for cmd in shape.commands() {
                if let PathCommand::MoveTo(x, y) = cmd {
                    let (ax, ay) = ((x + ox) as usize, (y + oy) as usize);
                    prop_assert!(matrix.is_dark(ax, ay));
                    prop_assert!(seen.insert((ax, ay)));
                }
            }
        }
    }
}
