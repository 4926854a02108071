//! Kaze - terminal control core of a small text editor
//!
//! This crate puts the controlling terminal into raw mode, reads keys one
//! byte at a time and restores the terminal when done:
//!
//! - `term`: raw mode session, attribute snapshots, window size, screen control
//! - `input`: key decoding, classification and the byte reader
//! - `editor`: the dispatch loop that reports each key until Ctrl-Q
//! - `config`: CLI, environment and TOML configuration
//!
//! Reference: https://man7.org/linux/man-pages/man3/termios.3.html

pub mod config;
pub mod editor;
mod error;
pub mod input;
pub mod term;

pub use config::{CliArgs, Config, ConfigError, LoadedConfig};
pub use editor::{Editor, Exit};
pub use error::{Error, Result};
pub use input::{ctrl_key, Key, KeyClass, KeyReader};
pub use term::{RawMode, ReadPolicy, TerminalAttributes, WindowSize};
