//! Preview command implementation.

use qrsmith_core::input::resolve_input;
use qrsmith_core::{CorrectionLevel, MatrixSource, QrcodeSource};

use crate::ui::print_qr_code;

/// Encode `text_or_path` and print the symbol to the terminal.
pub fn show_preview(text_or_path: &str, level: CorrectionLevel) -> anyhow::Result<()> {
    let input = resolve_input(text_or_path)?;
    // The terminal renderer draws its own quiet zone
    let matrix = QrcodeSource::new(0).encode(&input.message, level)?;

    println!(
        "\n\x1b[1m{}x{} modules, level {}\x1b[0m\n",
        matrix.width(),
        matrix.width(),
        level
    );
    print_qr_code(&matrix);
    println!();
    Ok(())
}
