//! Generate command implementation.

use std::path::PathBuf;

use clap::Args;
use qrsmith_core::constants::DEFAULT_OUTPUT_WIDTH;
use qrsmith_core::input::{destination_for, resolve_input};
use qrsmith_core::{
    BatchPolicy, CancelToken, Color, Config, CorrectionLevel, OutputFormat, QueueEvent, RenderJob, RenderQueue,
    RenderRequest, Renderer,
};

/// Options for `qrsmith generate`
#[derive(Args)]
pub struct GenerateArgs {
    /// Text to encode, or paths of files whose contents are encoded
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Error correction level: L, M, Q or H
    #[arg(short, long, default_value_t = CorrectionLevel::L)]
    pub level: CorrectionLevel,

    /// Output width in pixels (bitmap) or points (vector)
    #[arg(short, long, default_value_t = DEFAULT_OUTPUT_WIDTH)]
    pub width: u32,

    /// Foreground color as #rrggbb or #rrggbbaa
    #[arg(short, long, default_value_t = Color::BLACK)]
    pub color: Color,

    /// Leave light modules transparent instead of white
    #[arg(short, long)]
    pub transparent: bool,

    /// Output format: PNG, JPEG, TIFF, HEIF, PDF or SVG
    #[arg(short, long, default_value_t = OutputFormat::Png)]
    pub format: OutputFormat,

    /// Directory to write into (defaults to the desktop)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Keep rendering the remaining inputs after a failure
    #[arg(long)]
    pub keep_going: bool,
}

/// Render every input through the render queue.
pub async fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(dir) = args.out_dir.clone() {
        config.output_dir = Some(dir);
    }
    if args.keep_going {
        config.batch_policy = BatchPolicy::ContinueOnError;
    }

    let renderer = Renderer::from_config(&config);
    if !args.format.is_vector() && !renderer.capabilities().supports(args.format) {
        anyhow::bail!("{} output is not available on this build", args.format);
    }

    let out_dir = config.output_dir();
    let jobs = build_jobs(&args, &out_dir)?;
    let total = jobs.len();

    let (queue, mut events) = RenderQueue::start(renderer, config.queue_capacity);

    // Ctrl+C skips whatever has not started yet
    let cancel = CancelToken::new();
    let ctrlc_token = cancel.clone();
    ctrlc::set_handler(move || {
        ctrlc_token.cancel();
    })?;

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            handle_event(event, total);
        }
    });

    let report = queue.run_batch(jobs, config.batch_policy, cancel).await?;
    queue.shutdown().await?;
    printer.await?;

    let written = report.succeeded().count();
    println!("\n\x1b[1m{} of {} QR codes written to {}\x1b[0m", written, total, out_dir.display());

    for outcome in report.failed() {
        if let Err(e) = &outcome.result {
            eprintln!("\x1b[1;31m✗\x1b[0m {}: {}", outcome.destination.display(), e);
        }
    }

    match report.first_error() {
        Some(e) => anyhow::bail!("{} of {} QR codes failed: {}", total - written, total, e),
        None => Ok(()),
    }
}

fn build_jobs(args: &GenerateArgs, out_dir: &std::path::Path) -> qrsmith_core::Result<Vec<RenderJob>> {
    args.inputs
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let input = resolve_input(item)?;
            let destination = destination_for(out_dir, index, &input, args.format);
            let request = RenderRequest::new(input.message)
                .with_correction_level(args.level)
                .with_foreground(args.color)
                .with_transparent_background(args.transparent)
                .with_output_width(args.width);
            Ok(RenderJob::new(request, args.format, destination))
        })
        .collect()
}

/// Print a queue event.
fn handle_event(event: QueueEvent, total: usize) {
    match event {
        QueueEvent::Started { job_id } => {
            tracing::debug!("rendering job {}", job_id);
        }
        QueueEvent::Finished { path, .. } => {
            println!("\x1b[1;32m✓\x1b[0m {}", path.display());
        }
        QueueEvent::Failed { job_id, error } => {
            eprintln!("\x1b[1;31m✗\x1b[0m Job {} failed: {}", job_id, error);
        }
        QueueEvent::Cancelled { job_id } => {
            println!("\x1b[1;33m⊘\x1b[0m Skipped job {}", job_id);
        }
        QueueEvent::Progress { completed, .. } => {
            println!("\x1b[2m[{}/{}]\x1b[0m", completed, total);
        }
    }
}
