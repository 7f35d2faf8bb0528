//! Module matrix to raster and vector intermediates

pub mod color;
mod colorize;
mod scale;
mod vectorize;

pub use color::{Background, Color};
pub use colorize::{colorize, ColorizedRaster};
pub use scale::ScaleTransform;
pub use vectorize::{vectorize, Bounds, PathCommand, VectorShape};
