use std::{
    path::{Path, PathBuf},
    sync::mpsc,
    time::Duration,
};

use anyhow::Context as _;

use crate::{
    capture::{config::CaptureConfig, ticker::Ticker},
    clock::animation_clock::AnimationClock,
    foundation::error::AnimatorResult,
    media::decoded::DecodedImage,
};

/// File written next to the snapshots when `write_manifest` is set.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// One PNG written during a capture session.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    pub frame: usize,
    pub timer_ms: u64,
    pub path: PathBuf,
}

/// Outcome of [`run_capture`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CaptureReport {
    pub output_dir: PathBuf,
    pub frame_count: usize,
    pub total_animation_ms: u64,
    pub snapshots: Vec<Snapshot>,
    /// True when one full pass was observed (or there was nothing to animate);
    /// false when the session hit `max_duration` first.
    pub completed: bool,
}

/// `{frame}_{timer:05}.png`
pub fn snapshot_file_name(frame: usize, timer_ms: u64) -> String {
    format!("{frame}_{timer_ms:05}.png")
}

/// Per-session output directory name, minute resolution.
pub fn session_dir_name(now: &chrono::NaiveDateTime) -> String {
    now.format("%Y-%m-%d-%H-%M").to_string()
}

/// Animate `config.input` once, writing a PNG every time a later frame becomes active.
///
/// Frame 0 is written up front. The session ends when the resolved frame stops increasing
/// (the animation looped), after two loops' worth of ticks without such a wrap, when the
/// image has nothing to animate, or when `max_duration` worth of ticks has elapsed.
#[tracing::instrument(skip(config, ticker), fields(input = %config.input.display()))]
pub fn run_capture(
    config: &CaptureConfig,
    ticker: &mut dyn Ticker,
) -> AnimatorResult<CaptureReport> {
    config.validate()?;

    let image = DecodedImage::open(&config.input)?;
    let output_dir = if config.stamp_output_dir {
        config
            .output_root
            .join(session_dir_name(&chrono::Local::now().naive_local()))
    } else {
        config.output_root.clone()
    };
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output dir '{}'", output_dir.display()))?;

    let mut clock = AnimationClock::new(image)?;
    let frame_count = clock.frame_count();
    let total_animation_ms = clock.total_animation_time();

    let mut snapshots = vec![take_snapshot(clock.image(), &output_dir, 0, 0)?];

    let (changed_tx, changed_rx) = mpsc::channel::<usize>();
    clock.set_on_frame_changed(move |c| {
        // Receiver lives until the end of the session.
        let _ = changed_tx.send(c.current_frame());
    });

    let mut completed = total_animation_ms == 0;
    if completed {
        tracing::info!(frame_count, "image has nothing to animate");
    }

    let pass_budget = Duration::from_millis(total_animation_ms.saturating_mul(2));
    let mut last_frame = 0usize;
    let mut elapsed = Duration::ZERO;
    while !completed {
        if config.max_duration.is_some_and(|max| elapsed >= max) {
            tracing::info!(?elapsed, "capture time limit reached");
            break;
        }

        let dt = ticker.tick();
        elapsed += dt;
        clock.advance_by(dt);

        while let Ok(frame) = changed_rx.try_recv() {
            if frame <= last_frame {
                completed = true;
                break;
            }
            clock.commit_frame()?;
            snapshots.push(take_snapshot(
                clock.image(),
                &output_dir,
                frame,
                clock.timer_position(),
            )?);
            last_frame = frame;
        }

        // Ticks aligned to the loop length, or zero-length leading frames, never report a wrap.
        if !completed && elapsed >= pass_budget {
            tracing::debug!(?elapsed, last_frame, "pass budget exhausted");
            completed = true;
        }
    }
    clock.clear_on_frame_changed();

    let report = CaptureReport {
        output_dir,
        frame_count,
        total_animation_ms,
        snapshots,
        completed,
    };

    if config.write_manifest {
        write_manifest(&report)?;
    }

    tracing::info!(
        snapshots = report.snapshots.len(),
        completed = report.completed,
        "capture finished"
    );
    Ok(report)
}

fn take_snapshot(
    image: &DecodedImage,
    dir: &Path,
    frame: usize,
    timer_ms: u64,
) -> AnimatorResult<Snapshot> {
    let path = dir.join(snapshot_file_name(frame, timer_ms));
    image.save_active_png(&path)?;
    tracing::debug!(frame, timer_ms, path = %path.display(), "snapshot written");
    Ok(Snapshot {
        frame,
        timer_ms,
        path,
    })
}

fn write_manifest(report: &CaptureReport) -> AnimatorResult<()> {
    let path = report.output_dir.join(MANIFEST_FILE_NAME);
    let f = std::fs::File::create(&path)
        .with_context(|| format!("create manifest '{}'", path.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(f), report)
        .with_context(|| format!("write manifest '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/capture/session.rs"]
mod tests;
