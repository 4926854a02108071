//! Error types for terminal control and key reading

use std::io;
use thiserror::Error;

use crate::config::ConfigError;

/// Kaze error type
#[derive(Error, Debug)]
pub enum Error {
    /// A terminal attribute or window size call failed (not a tty,
    /// closed descriptor, permission)
    #[error("Terminal access failed ({op}): {source}")]
    TerminalAccess {
        op: &'static str,
        #[source]
        source: nix::Error,
    },

    /// Reading a byte failed for a reason other than interrupt or EOF
    #[error("Failed to read input: {0}")]
    InputRead(#[source] io::Error),

    /// Writing to the output stream failed
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    /// The terminal reported zero columns and did not answer the cursor probe
    #[error("Terminal did not report a usable window size")]
    UnknownWindowSize,

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    pub(crate) fn terminal(op: &'static str) -> impl FnOnce(nix::Error) -> Self {
        move |source| Error::TerminalAccess { op, source }
    }

    /// Whether this error came from the terminal device itself
    pub fn is_terminal_access(&self) -> bool {
        matches!(self, Error::TerminalAccess { .. })
    }
}

/// Result type for kaze operations
pub type Result<T> = std::result::Result<T, Error>;
