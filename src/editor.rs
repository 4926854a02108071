//! Key dispatch loop
//!
//! Reads keys until the quit key or end of input and echoes a description
//! of every other key: `<code>\r\n` for control keys and
//! `<code> ('<char>')\r\n` for printable ones.

use std::io::{Read, Write};
use std::os::fd::AsFd;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::input::{Key, KeyReader};
use crate::term::{screen, size, RawMode, ReadPolicy, WindowSize};

/// Longest cursor position report accepted from the terminal
const MAX_CURSOR_REPORT: usize = 31;

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The quit key was pressed
    Quit,
    /// The input stream closed
    EndOfInput,
}

pub struct Editor<R, W> {
    reader: KeyReader<R>,
    out: W,
    quit: Key,
    policy: ReadPolicy,
}

impl<R: Read, W: Write> Editor<R, W> {
    /// Create an editor that quits on Ctrl-Q and treats an empty read as
    /// end of input
    pub fn new(reader: KeyReader<R>, out: W) -> Self {
        Self {
            reader,
            out,
            quit: Key::ctrl(b'q'),
            policy: ReadPolicy::Blocking,
        }
    }

    /// Quit on Ctrl + `letter` instead of Ctrl-Q
    pub fn with_quit_letter(mut self, letter: u8) -> Self {
        self.quit = Key::ctrl(letter);
        self
    }

    /// Match the read policy the terminal was configured with
    ///
    /// Under `ReadPolicy::Timeout` an empty read is an idle tick, so a hung
    /// up terminal that keeps returning no data is polled forever. That only
    /// happens when SIGHUP is ignored; the default action ends the process.
    pub fn with_policy(mut self, policy: ReadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn quit_key(&self) -> Key {
        self.quit
    }

    /// Read and handle one key
    ///
    /// Returns `Some(exit)` when the loop should stop.
    pub fn process_key(&mut self) -> Result<Option<Exit>> {
        let key = match self.reader.read_key()? {
            Some(key) => key,
            None if self.policy.empty_read_is_eof() => return Ok(Some(Exit::EndOfInput)),
            None => return Ok(None),
        };

        if key == self.quit {
            debug!(code = key.code(), "Quit key pressed");
            return Ok(Some(Exit::Quit));
        }

        trace!(code = key.code(), class = ?key.class(), "Dispatch key");
        write!(self.out, "{}\r\n", key)?;
        self.out.flush()?;
        Ok(None)
    }

    /// Process keys until the quit key or end of input
    pub fn run(&mut self) -> Result<Exit> {
        loop {
            if let Some(exit) = self.process_key()? {
                return Ok(exit);
            }
        }
    }

    /// Clear the screen and home the cursor
    pub fn refresh(&mut self) -> Result<()> {
        screen::refresh(&mut self.out)
    }

    /// Size of the session's terminal
    ///
    /// Falls back to a cursor position probe when the driver reports zero
    /// columns.
    pub fn viewport<F: AsFd>(&mut self, session: &RawMode<F>) -> Result<WindowSize> {
        let size = session.window_size()?;
        if size.is_known() {
            debug!(rows = size.rows, cols = size.cols, "Window size");
            return Ok(size);
        }

        debug!("Driver reports zero columns, probing cursor position");
        self.probe_window_size()
    }

    /// Measure the screen by moving the cursor to the bottom-right corner
    /// and asking where it landed
    pub fn probe_window_size(&mut self) -> Result<WindowSize> {
        screen::request_cursor_probe(&mut self.out)?;

        let mut report = Vec::with_capacity(MAX_CURSOR_REPORT);
        while report.len() < MAX_CURSOR_REPORT {
            match self.reader.read_key()? {
                Some(Key(b'R')) | None => break,
                Some(key) => report.push(key.byte()),
            }
        }

        let size = size::parse_cursor_report(&report).ok_or(Error::UnknownWindowSize)?;
        debug!(rows = size.rows, cols = size.cols, "Window size from cursor probe");
        Ok(size)
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<R, W> std::fmt::Debug for Editor<R, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("quit", &self.quit)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
