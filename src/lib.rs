//! playcfg library
//!
//! Cascading system/runner/game configuration for a game launcher, plus the
//! game library database and runner definitions built on top of it.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod runners;
pub mod types;
