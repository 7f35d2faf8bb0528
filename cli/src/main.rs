//! qrsmith CLI - render QR codes to bitmap and vector files.

mod commands;
mod ui;

use clap::{Parser, Subcommand};
use qrsmith_core::CorrectionLevel;
use tracing_subscriber::EnvFilter;

use commands::GenerateArgs;

#[derive(Parser)]
#[command(name = "qrsmith")]
#[command(about = "Render QR codes as PNG, JPEG, TIFF, HEIF, PDF or SVG", long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    // Without a subcommand, inputs are rendered as with `generate`
    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one QR code per input (text, or a file whose contents are encoded) (default)
    Generate(GenerateArgs),
    /// Print a QR code to the terminal
    Preview {
        /// Text to encode, or a file whose contents are encoded
        text: String,
        /// Error correction level: L, M, Q or H
        #[arg(short, long, default_value_t = CorrectionLevel::L)]
        level: CorrectionLevel,
    },
    /// List the output formats this build can produce
    Formats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("qrsmith=info".parse()?)
                .add_directive("qrsmith_core=info".parse()?)
                .add_directive("lopdf=warn".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate(args)) => commands::run_generate(args).await?,
        Some(Commands::Preview { text, level }) => commands::show_preview(&text, level)?,
        Some(Commands::Formats) => commands::show_formats(),
        None => commands::run_generate(cli.generate).await?,
    }

    Ok(())
}
