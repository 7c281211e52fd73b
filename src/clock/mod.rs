pub mod animation_clock;
pub mod delays;
pub mod handle;
