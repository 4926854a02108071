//! Byte-at-a-time key reader

use std::fs::File;
use std::io::{self, Read};
use std::os::fd::AsFd;

use tracing::trace;

use crate::error::{Error, Result};
use crate::input::key::Key;

/// Reads one key per call from a byte source
pub struct KeyReader<R> {
    source: R,
}

impl KeyReader<File> {
    /// Reader over an unbuffered duplicate of a terminal descriptor
    pub fn from_fd<Fd: AsFd>(fd: Fd) -> Result<Self> {
        let owned = fd.as_fd().try_clone_to_owned().map_err(Error::InputRead)?;
        Ok(Self::new(File::from(owned)))
    }
}

impl<R: Read> KeyReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Read a single key
    ///
    /// Returns `Ok(None)` when the read produced no byte: the stream is
    /// closed, or a raw-mode read timeout elapsed. Interrupted and
    /// would-block reads are retried until they produce a result.
    pub fn read_key(&mut self) -> Result<Option<Key>> {
        let mut buf = [0u8; 1];
        let mut retries = 0u64;

        loop {
            match self.source.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    let key = Key::from(buf[0]);
                    trace!(code = key.code(), retries, "Read key");
                    return Ok(Some(key));
                }
                Err(e) if is_transient(&e) => {
                    retries += 1;
                    trace!(retries, "Transient read failure: {}", e);
                }
                Err(e) => return Err(Error::InputRead(e)),
            }
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.source
    }

    pub fn into_inner(self) -> R {
        self.source
    }
}

fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

impl<R> std::fmt::Debug for KeyReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyReader").finish_non_exhaustive()
    }
}
