//! Game state, scoring and persistence for the `typeracer` binary, which adds
//! the terminal, CLI flags and log setup on top.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod high_score;
pub mod input_gate;
pub mod logging;
pub mod metrics;
pub mod runtime;
pub mod sentences;
pub mod session;
pub mod store;
pub mod ui;
pub mod view;
