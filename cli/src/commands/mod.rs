//! CLI command implementations.

mod formats;
mod generate;
mod preview;

pub use formats::show_formats;
pub use generate::{run_generate, GenerateArgs};
pub use preview::show_preview;
