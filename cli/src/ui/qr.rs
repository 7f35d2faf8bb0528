//! Terminal QR rendering.

use qrsmith_core::QrMatrix;

/// Print a module matrix to the terminal.
///
/// Each character covers 2 vertical modules; a two-module quiet zone is
/// drawn around the symbol.
pub fn print_qr_code(matrix: &QrMatrix) {
    let width = matrix.width();
    let quiet = "  ";

    println!("{}{}", quiet, " ".repeat(width + 4));

    for y in (0..width).step_by(2) {
        print!("{}  ", quiet);
        for x in 0..width {
            let ch = match (matrix.is_dark(x, y), matrix.is_dark(x, y + 1)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            };
            print!("{}", ch);
        }
        println!("  ");
    }

    println!("{}{}", quiet, " ".repeat(width + 4));
}
