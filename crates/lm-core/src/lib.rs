/// Configuration, errors, and timing primitives shared by the lumen workspace.
///
/// This crate contains the types every other lumen crate agrees on:
/// the TOML-backed `AppConfig`, the `CoreError` taxonomy, and the
/// `FrameClock` that feeds per-frame `delta_time`/`current_time` pairs.

pub mod clock;
pub mod config;
pub mod error;

pub use clock::FrameClock;
pub use config::AppConfig;
pub use error::CoreError;
