//! Everything that touches the host: CLI, config file, logger and the effect runner.
pub mod app;
pub mod cli;
pub mod config;
pub mod effects;
pub mod logging;
