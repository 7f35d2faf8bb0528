//! Formats command implementation.

use qrsmith_core::{OutputFormat, RasterCapabilities};

/// List the formats the active backend can produce.
///
/// Formats the raster backend lacks (HEIF on most builds) are not offered.
pub fn show_formats() {
    let capabilities = RasterCapabilities::detect();
    println!("\n\x1b[1;36mqrsmith\x1b[0m \x1b[2mv{}\x1b[0m", env!("CARGO_PKG_VERSION"));
    println!("\x1b[1mAvailable output formats:\x1b[0m");
    for format in capabilities.available_formats() {
        let kind = if format.is_vector() { "vector" } else { "bitmap" };
        println!("  • {:<5} .{:<5} {}", format.name(), format.extension(), kind);
    }

    let missing: Vec<_> = OutputFormat::ALL
        .into_iter()
        .filter(|f| !f.is_vector() && !capabilities.supports(*f))
        .map(OutputFormat::name)
        .collect();
    if !missing.is_empty() {
        println!("\n\x1b[2mNot available on this build: {}\x1b[0m", missing.join(", "));
    }
    println!();
}
