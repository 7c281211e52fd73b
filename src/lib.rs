//! animclock tracks which frame of a multi-frame image should be on screen.
//!
//! The core is [`AnimationClock`]: it reads an image's frame count and per-frame delay metadata
//! once, then maps a running millisecond timer onto a frame index as time is fed to it with
//! [`AnimationClock::advance`]. Frame changes raise a dirty flag and an optional synchronous
//! notification; [`AnimationClock::commit_frame`] applies the resolved frame to the image.
//!
//! Images are reached only through the [`AnimatedImage`] trait. [`DecodedImage`] implements it
//! on top of the `image` crate (GIF frames and delays, or a single still frame).
//!
//! [`run_capture`] is a small driver around one clock that snapshots every newly reached frame
//! of an image to PNG, as used by the `animclock` binary.
//!
//! ```no_run
//! use animclock::{AnimationClock, DecodedImage};
//!
//! let image = DecodedImage::open("spinner.gif".as_ref())?;
//! let mut clock = AnimationClock::new(image)?;
//! clock.advance(120);
//! clock.commit_frame()?;
//! println!("showing frame {}", clock.image().active_frame());
//! # Ok::<(), animclock::AnimatorError>(())
//! ```
#![forbid(unsafe_code)]

mod capture;
mod clock;
mod foundation;
mod media;

pub use capture::config::{CaptureConfig, DEFAULT_TICK};
pub use capture::session::{
    CaptureReport, MANIFEST_FILE_NAME, Snapshot, run_capture, session_dir_name,
    snapshot_file_name,
};
pub use capture::ticker::{FixedTicker, Ticker, WallTicker};
pub use clock::animation_clock::{AnimationClock, FrameChangedHandler};
pub use clock::delays::{FrameDelays, MS_PER_DELAY_UNIT, frame_end_times};
pub use clock::handle::AnimatedImage;
pub use foundation::error::{AnimatorError, AnimatorResult};
pub use media::decoded::{DecodedImage, delay_to_centiseconds};
