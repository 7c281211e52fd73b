use std::{path::PathBuf, time::Duration};

use crate::foundation::error::{AnimatorError, AnimatorResult};

/// Default interval between clock ticks.
pub const DEFAULT_TICK: Duration = Duration::from_millis(50);

/// Settings for one capture session.
#[derive(Clone, Debug)]
pub struct CaptureConfig {
    /// Image file to animate.
    pub input: PathBuf,
    /// Directory receiving snapshots (or the per-session subdirectory, see `stamp_output_dir`).
    pub output_root: PathBuf,
    /// Interval between clock ticks.
    pub tick: Duration,
    /// Stop after this much animation time even if the pass is incomplete.
    pub max_duration: Option<Duration>,
    /// Write into `<output_root>/<YYYY-MM-DD-HH-MM>` instead of `output_root` itself.
    pub stamp_output_dir: bool,
    /// Write `manifest.json` next to the snapshots.
    pub write_manifest: bool,
}

impl CaptureConfig {
    pub fn new(input: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_root: output_root.into(),
            tick: DEFAULT_TICK,
            max_duration: None,
            stamp_output_dir: true,
            write_manifest: false,
        }
    }

    pub fn validate(&self) -> AnimatorResult<()> {
        if !self.input.is_file() {
            return Err(AnimatorError::validation(format!(
                "input image '{}' does not exist",
                self.input.display()
            )));
        }
        if self.tick.is_zero() {
            return Err(AnimatorError::validation("tick interval must be non-zero"));
        }
        if self.max_duration.is_some_and(|d| d.is_zero()) {
            return Err(AnimatorError::validation(
                "max capture duration must be non-zero",
            ));
        }
        Ok(())
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_max_duration(mut self, max: Option<Duration>) -> Self {
        self.max_duration = max;
        self
    }

    pub fn with_stamp_output_dir(mut self, stamp: bool) -> Self {
        self.stamp_output_dir = stamp;
        self
    }

    pub fn with_manifest(mut self, write: bool) -> Self {
        self.write_manifest = write;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/config.rs"]
mod tests;
