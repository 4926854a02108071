//! Terminal attribute snapshots and the raw-mode flag set

use std::os::fd::AsFd;

use nix::sys::termios::{
    self, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, SpecialCharacterIndices,
    Termios,
};

use crate::error::{Error, Result};

/// Snapshot of a terminal's line discipline configuration
///
/// Holds the input, output, control and local flags plus the control
/// character array exactly as the OS reported them.
#[derive(Debug, Clone)]
pub struct TerminalAttributes {
    termios: Termios,
}

impl TerminalAttributes {
    pub fn input_flags(&self) -> InputFlags {
        self.termios.input_flags
    }

    pub fn output_flags(&self) -> OutputFlags {
        self.termios.output_flags
    }

    pub fn control_flags(&self) -> ControlFlags {
        self.termios.control_flags
    }

    pub fn local_flags(&self) -> LocalFlags {
        self.termios.local_flags
    }

    /// Value of a single control character slot (VMIN, VTIME, VINTR, ...)
    pub fn control_char(&self, index: SpecialCharacterIndices) -> u8 {
        self.termios.control_chars[index as usize]
    }

    /// True when echo, canonical input and signal keys are all off
    pub fn is_raw(&self) -> bool {
        !self
            .termios
            .local_flags
            .intersects(LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::ISIG)
    }
}

impl PartialEq for TerminalAttributes {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (&self.termios, &other.termios);
        a.input_flags == b.input_flags
            && a.output_flags == b.output_flags
            && a.control_flags == b.control_flags
            && a.local_flags == b.local_flags
            && a.control_chars == b.control_chars
    }
}

impl Eq for TerminalAttributes {}

impl From<Termios> for TerminalAttributes {
    fn from(termios: Termios) -> Self {
        Self { termios }
    }
}

/// How a raw-mode read waits for input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Block until at least one byte arrives (VMIN=1, VTIME=0)
    #[default]
    Blocking,
    /// Return after at most `tenths` tenths of a second, possibly with
    /// no data (VMIN=0, VTIME=tenths)
    Timeout { tenths: u8 },
}

impl ReadPolicy {
    /// (VMIN, VTIME) pair written into the control character array
    pub fn vmin_vtime(self) -> (u8, u8) {
        match self {
            ReadPolicy::Blocking => (1, 0),
            ReadPolicy::Timeout { tenths } => (0, tenths),
        }
    }

    /// Whether an empty read means the input stream is closed
    pub fn empty_read_is_eof(self) -> bool {
        matches!(self, ReadPolicy::Blocking)
    }
}

/// Read the current attributes of the terminal behind `fd`
pub fn capture<Fd: AsFd>(fd: Fd) -> Result<TerminalAttributes> {
    termios::tcgetattr(fd)
        .map(TerminalAttributes::from)
        .map_err(Error::terminal("tcgetattr"))
}

/// Write `attrs` to the terminal behind `fd`, flushing pending input
pub fn apply<Fd: AsFd>(fd: Fd, attrs: &TerminalAttributes) -> Result<()> {
    termios::tcsetattr(fd, SetArg::TCSAFLUSH, &attrs.termios)
        .map_err(Error::terminal("tcsetattr"))
}

/// Derive the raw attribute set from a cooked snapshot
pub fn make_raw(original: &TerminalAttributes, policy: ReadPolicy) -> TerminalAttributes {
    let mut raw = original.termios.clone();

    // No break-to-SIGINT, CR->NL translation, parity check, 8th bit strip
    // or XON/XOFF flow control
    raw.input_flags &= !(InputFlags::BRKINT
        | InputFlags::ICRNL
        | InputFlags::INPCK
        | InputFlags::ISTRIP
        | InputFlags::IXON);

    raw.output_flags &= !OutputFlags::OPOST;

    raw.control_flags &= !ControlFlags::CSIZE;
    raw.control_flags |= ControlFlags::CS8;

    // Ctrl-C, Ctrl-Z and Ctrl-V arrive as plain bytes
    raw.local_flags &=
        !(LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG);

    let (vmin, vtime) = policy.vmin_vtime();
    raw.control_chars[SpecialCharacterIndices::VMIN as usize] = vmin;
    raw.control_chars[SpecialCharacterIndices::VTIME as usize] = vtime;

    TerminalAttributes::from(raw)
}
