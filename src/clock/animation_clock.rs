use std::{fmt, time::Duration};

use crate::{
    clock::{
        delays::{FrameDelays, frame_end_times},
        handle::AnimatedImage,
    },
    foundation::error::{AnimatorError, AnimatorResult},
};

/// Callback invoked synchronously whenever the resolved frame changes.
///
/// The handler receives the clock itself, so it can query state or call
/// [`AnimationClock::commit_frame`] directly.
pub type FrameChangedHandler<H> = Box<dyn FnMut(&mut AnimationClock<H>) + Send>;

/// Per-image animation clock.
///
/// Tracks which frame of a multi-frame image should be displayed for a running timer, and
/// flags the frame as dirty until the caller commits it back onto the image handle.
///
/// The clock is a plain single-owner value: it does no locking, and callers sharing one clock
/// across threads must serialize access themselves.
pub struct AnimationClock<H> {
    image: H,
    animated: bool,
    frame_count: usize,
    frame_end_times: Vec<u64>, // cumulative ms, non-decreasing
    frame: usize,
    timer: u64,
    dirty: bool,
    on_frame_changed: Option<FrameChangedHandler<H>>,
    handler_epoch: u64, // bumped on every set/clear so a running handler can be replaced
    in_handler: bool,
    notify_pending: bool,
}

impl<H: AnimatedImage> AnimationClock<H> {
    /// Build a clock from the image's frame count and delay metadata.
    ///
    /// Fails with [`AnimatorError::InvalidImage`] when an animatable image cannot report a
    /// usable frame count.
    pub fn new(image: H) -> AnimatorResult<Self> {
        let animated = image.is_time_animatable();

        let (frame_count, frame_end_times) = if animated {
            let frame_count = image
                .frame_count_in_time_dimension()
                .map_err(|e| match e {
                    AnimatorError::InvalidImage(_) => e,
                    other => AnimatorError::invalid_image(format!("{other:#}")),
                })?;
            if frame_count == 0 {
                return Err(AnimatorError::invalid_image(
                    "animatable image reported zero frames",
                ));
            }
            let delays = image.frame_delays();
            if delays == FrameDelays::NoDelays {
                tracing::debug!("image has no frame delay metadata; all delays are 0");
            }
            (frame_count, frame_end_times(&delays, frame_count))
        } else {
            (1, vec![0])
        };

        let clock = Self {
            image,
            animated,
            frame_count,
            frame_end_times,
            frame: 0,
            timer: 0,
            dirty: false,
            on_frame_changed: None,
            handler_epoch: 0,
            in_handler: false,
            notify_pending: false,
        };
        tracing::debug!(
            animated,
            frame_count,
            total_ms = clock.total_animation_time(),
            "animation clock created"
        );
        Ok(clock)
    }

    /// Advance the timer by `elapsed_ms` and resolve the frame it lands on.
    ///
    /// The timer wraps around the total animation time. Fires the frame-changed handler once
    /// if the resolved frame differs from the one before the call.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let old_frame = self.frame;
        let total = self.total_animation_time();

        if total == 0 {
            // Nothing to animate: timer and frame are pinned at the start.
            self.timer = 0;
            return;
        }

        self.timer = self.timer.saturating_add(elapsed_ms);
        if self.timer > total {
            self.timer %= total;
        }

        // A wrap can move the timer before the current frame; rescan from the first frame.
        if self.frame > 0 && self.timer < self.frame_end_times[self.frame - 1] {
            self.frame = 0;
        }

        while self.frame + 1 < self.frame_count && self.timer > self.frame_end_times[self.frame] {
            self.frame += 1;
        }

        if self.frame != old_frame {
            self.dirty = true;
            tracing::trace!(
                from = old_frame,
                to = self.frame,
                timer_ms = self.timer,
                "frame changed"
            );
            self.notify_frame_changed();
        }
    }

    /// [`advance`](Self::advance) by a [`Duration`], truncated to whole milliseconds.
    pub fn advance_by(&mut self, elapsed: Duration) {
        self.advance(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
    }

    /// Apply the resolved frame to the image if it changed since the last commit.
    ///
    /// On failure the clock stays dirty so the commit can be retried.
    pub fn commit_frame(&mut self) -> AnimatorResult<()> {
        if !self.dirty {
            return Ok(());
        }
        self.image
            .select_active_frame(self.frame)
            .map_err(|e| match e {
                AnimatorError::ImageSelection(_) => e,
                other => AnimatorError::image_selection(format!("{other:#}")),
            })?;
        self.dirty = false;
        Ok(())
    }

    /// Install the frame-changed handler, replacing any previous one.
    ///
    /// If the handler itself calls [`advance`](Self::advance) and that changes the frame, the
    /// handler is not re-entered; it runs once more after the current call returns.
    pub fn set_on_frame_changed<F>(&mut self, handler: F)
    where
        F: FnMut(&mut AnimationClock<H>) + Send + 'static,
    {
        self.on_frame_changed = Some(Box::new(handler));
        self.handler_epoch += 1;
    }

    /// Remove the frame-changed handler.
    pub fn clear_on_frame_changed(&mut self) {
        self.on_frame_changed = None;
        self.handler_epoch += 1;
    }

    fn notify_frame_changed(&mut self) {
        if self.in_handler {
            self.notify_pending = true;
            return;
        }
        self.in_handler = true;
        loop {
            let Some(mut handler) = self.on_frame_changed.take() else {
                break;
            };
            let epoch = self.handler_epoch;
            handler(self);
            if self.handler_epoch == epoch {
                self.on_frame_changed = Some(handler);
            }
            if !std::mem::take(&mut self.notify_pending) {
                break;
            }
        }
        self.notify_pending = false;
        self.in_handler = false;
    }
}

impl<H> AnimationClock<H> {
    /// Whether the image has more than one frame.
    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// Number of frames; 1 for still images.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Currently resolved frame index.
    pub fn current_frame(&self) -> usize {
        self.frame
    }

    /// Whether the resolved frame has not been committed to the image yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Running timer position within the current loop, in milliseconds.
    pub fn timer_position(&self) -> u64 {
        self.timer
    }

    /// Total duration of one loop in milliseconds; 0 for still images.
    pub fn total_animation_time(&self) -> u64 {
        if self.animated {
            self.frame_end_times[self.frame_count - 1]
        } else {
            0
        }
    }

    /// Timer value at which the current frame ends.
    pub fn frame_end_time(&self) -> u64 {
        self.frame_end_times[self.frame]
    }

    /// Cumulative end time of every frame, in milliseconds.
    pub fn frame_end_times(&self) -> &[u64] {
        &self.frame_end_times
    }

    /// The image handle this clock governs.
    pub fn image(&self) -> &H {
        &self.image
    }

    /// Mutable access to the image handle. Selecting frames directly bypasses the dirty flag.
    pub fn image_mut(&mut self) -> &mut H {
        &mut self.image
    }

    /// Discard the clock and hand back the image handle.
    pub fn into_image(self) -> H {
        self.image
    }
}

impl<H: fmt::Debug> fmt::Debug for AnimationClock<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationClock")
            .field("image", &self.image)
            .field("animated", &self.animated)
            .field("frame_count", &self.frame_count)
            .field("frame_end_times", &self.frame_end_times)
            .field("frame", &self.frame)
            .field("timer", &self.timer)
            .field("dirty", &self.dirty)
            .field("has_handler", &self.on_frame_changed.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/animation_clock.rs"]
mod tests;
