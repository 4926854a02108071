//! Raw mode session
//!
//! A `RawMode` value is the only way to hold a terminal in raw mode. It is
//! created by `RawMode::enter`, which snapshots the cooked attributes, and
//! it restores that snapshot exactly once: through `RawMode::exit`, or on
//! drop if the owner returns early, hits an error or unwinds.

use std::os::fd::AsFd;

use tracing::{debug, warn};

use crate::error::Result;
use crate::term::attrs::{self, ReadPolicy, TerminalAttributes};
use crate::term::size::{self, WindowSize};

/// RAII guard for raw terminal mode
pub struct RawMode<F: AsFd> {
    fd: F,
    original: TerminalAttributes,
    policy: ReadPolicy,
    restored: bool,
}

impl<F: AsFd> RawMode<F> {
    /// Put the terminal behind `fd` into raw mode
    ///
    /// Nothing is written to the device if the initial attribute query
    /// fails, so a non-terminal descriptor is left untouched.
    pub fn enter(fd: F, policy: ReadPolicy) -> Result<Self> {
        let original = attrs::capture(&fd)?;
        let raw = attrs::make_raw(&original, policy);
        attrs::apply(&fd, &raw)?;

        debug!(?policy, "Entered raw mode");

        Ok(Self {
            fd,
            original,
            policy,
            restored: false,
        })
    }

    /// Attributes that were in effect before raw mode was entered
    pub fn original(&self) -> &TerminalAttributes {
        &self.original
    }

    pub fn policy(&self) -> ReadPolicy {
        self.policy
    }

    /// Current row/column count of the session's terminal
    pub fn window_size(&self) -> Result<WindowSize> {
        size::window_size(&self.fd)
    }

    /// Restore the cooked attributes and end the session
    pub fn exit(mut self) -> Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        attrs::apply(&self.fd, &self.original)?;
        debug!("Exited raw mode");
        Ok(())
    }
}

impl<F: AsFd> Drop for RawMode<F> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("Failed to restore terminal attributes: {}", e);
        }
    }
}

impl<F: AsFd> std::fmt::Debug for RawMode<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawMode")
            .field("original", &self.original)
            .field("policy", &self.policy)
            .field("restored", &self.restored)
            .finish()
    }
}
