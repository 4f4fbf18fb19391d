/// Driver pieces of the `lumen` binary: CLI, logging, hot reload and the
/// per-frame probe that ties metrics and post-processing together.
pub mod cli;
pub mod hotreload;
pub mod logging;
pub mod probe;
pub mod runner;
pub mod synthetic;
