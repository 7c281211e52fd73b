use std::sync::{Arc, Mutex, PoisonError};

use crate::{clock::delays::FrameDelays, foundation::error::AnimatorResult};

/// Capabilities an [`AnimationClock`](crate::AnimationClock) needs from the image it governs.
///
/// The clock never decodes pixels itself; it reads timing metadata once at construction and
/// later asks the image to switch its active frame.
pub trait AnimatedImage {
    /// Whether the image has more than one frame in the time dimension.
    fn is_time_animatable(&self) -> bool;

    /// Number of frames in the time dimension.
    fn frame_count_in_time_dimension(&self) -> AnimatorResult<usize>;

    /// Raw per-frame delay metadata.
    fn frame_delays(&self) -> FrameDelays;

    /// Make `index` the active frame.
    fn select_active_frame(&mut self, index: usize) -> AnimatorResult<()>;
}

impl<T: AnimatedImage + ?Sized> AnimatedImage for &mut T {
    fn is_time_animatable(&self) -> bool {
        (**self).is_time_animatable()
    }

    fn frame_count_in_time_dimension(&self) -> AnimatorResult<usize> {
        (**self).frame_count_in_time_dimension()
    }

    fn frame_delays(&self) -> FrameDelays {
        (**self).frame_delays()
    }

    fn select_active_frame(&mut self, index: usize) -> AnimatorResult<()> {
        (**self).select_active_frame(index)
    }
}

impl<T: AnimatedImage + ?Sized> AnimatedImage for Box<T> {
    fn is_time_animatable(&self) -> bool {
        (**self).is_time_animatable()
    }

    fn frame_count_in_time_dimension(&self) -> AnimatorResult<usize> {
        (**self).frame_count_in_time_dimension()
    }

    fn frame_delays(&self) -> FrameDelays {
        (**self).frame_delays()
    }

    fn select_active_frame(&mut self, index: usize) -> AnimatorResult<()> {
        (**self).select_active_frame(index)
    }
}

/// Shared handle: the image outlives the clock and may be read by other threads between commits.
///
/// A poisoned lock is recovered: the image's timing metadata stays valid even if another holder
/// panicked.
impl<T: AnimatedImage> AnimatedImage for Arc<Mutex<T>> {
    fn is_time_animatable(&self) -> bool {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_time_animatable()
    }

    fn frame_count_in_time_dimension(&self) -> AnimatorResult<usize> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .frame_count_in_time_dimension()
    }

    fn frame_delays(&self) -> FrameDelays {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .frame_delays()
    }

    fn select_active_frame(&mut self, index: usize) -> AnimatorResult<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .select_active_frame(index)
    }
}
