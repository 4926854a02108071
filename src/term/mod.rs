//! Terminal mode control
//!
//! Moves the controlling terminal between cooked and raw mode and reports
//! its size. Everything here is a thin wrapper over termios and ioctl calls;
//! failures are returned as `Error::TerminalAccess` and never retried.

pub mod attrs;
pub mod raw;
pub mod screen;
pub mod size;

pub use attrs::{ReadPolicy, TerminalAttributes};
pub use raw::RawMode;
pub use size::WindowSize;
