//! Native module space to output space

/// Axis-aligned affine transform: `p' = p * scale + translate`.
///
/// Scale factors are computed per axis, so a non-square source is stretched
/// onto the square target rather than letterboxed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl ScaleTransform {
    /// Map a native extent of `(width, height)` units onto `target x target`.
    pub fn to_width(native: (f64, f64), target: u32) -> Self {
        let target = f64::from(target);
        Self {
            scale_x: target / native.0,
            scale_y: target / native.1,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    /// Shift so that native-space coordinates relative to `origin` land where
    /// their absolute position would.
    pub fn with_offset(self, origin: (f64, f64)) -> Self {
        Self {
            translate_x: origin.0 * self.scale_x,
            translate_y: origin.1 * self.scale_y,
            ..self
        }
    }

    pub fn apply(&self, point: (f64, f64)) -> (f64, f64) {
        (
            point.0 * self.scale_x + self.translate_x,
            point.1 * self.scale_y + self.translate_y,
        )
    }

    /// Native-space point that lands on `point`
    pub fn invert(&self, point: (f64, f64)) -> (f64, f64) {
        (
            (point.0 - self.translate_x) / self.scale_x,
            (point.1 - self.translate_y) / self.scale_y,
        )
    }

    /// Output size of a native extent, rounded to whole pixels
    pub fn output_size(&self, native: (u32, u32)) -> (u32, u32) {
        (
            (f64::from(native.0) * self.scale_x).round() as u32,
            (f64::from(native.1) * self.scale_y).round() as u32,
        )
    }
}
