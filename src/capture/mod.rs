pub mod config;
pub mod session;
pub mod ticker;
