//! Wordtally CLI library
//!
//! This library provides the command-line interface for ranking the words of
//! free-text survey responses.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{exit_code, CliError, CliResult};
