use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Play an animated image once and save a PNG every time a new frame becomes active.
#[derive(Parser, Debug)]
#[command(name = "animclock", version)]
struct Cli {
    /// Input image (GIF, or any still format).
    input: PathBuf,

    /// Directory receiving the snapshots.
    output_dir: PathBuf,

    /// Stop after this many seconds even if the animation has not looped yet.
    #[arg(long)]
    seconds: Option<u64>,

    /// Interval between clock ticks, in milliseconds.
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Write directly into OUTPUT_DIR instead of a timestamped subdirectory.
    #[arg(long)]
    no_stamp: bool,

    /// Also write manifest.json listing every snapshot.
    #[arg(long)]
    manifest: bool,

    /// Advance the clock by the tick interval without sleeping.
    #[arg(long)]
    offline: bool,

    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = animclock::CaptureConfig::new(&cli.input, &cli.output_dir)
        .with_tick(Duration::from_millis(cli.tick_ms))
        .with_max_duration(cli.seconds.map(Duration::from_secs))
        .with_stamp_output_dir(!cli.no_stamp)
        .with_manifest(cli.manifest);

    let mut ticker: Box<dyn animclock::Ticker> = if cli.offline {
        Box::new(animclock::FixedTicker::new(config.tick))
    } else {
        Box::new(animclock::WallTicker::new(config.tick))
    };
    let report = animclock::run_capture(&config, ticker.as_mut())
        .with_context(|| format!("capture '{}'", cli.input.display()))?;

    eprintln!(
        "wrote {} snapshot(s) of {} frame(s) to {}",
        report.snapshots.len(),
        report.frame_count,
        report.output_dir.display()
    );
    if !report.completed {
        eprintln!("stopped before the animation looped");
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "animclock=debug" } else { "animclock=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
