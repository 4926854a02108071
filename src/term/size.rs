//! Terminal window size

use std::os::fd::{AsFd, AsRawFd};

use nix::errno::Errno;

use crate::error::{Error, Result};

/// Window size in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    /// Number of rows (characters)
    pub rows: u16,
    /// Number of columns (characters)
    pub cols: u16,
}

impl WindowSize {
    /// Create a new window size
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { rows, cols }
    }

    /// A zero-column answer means the driver does not know its size
    pub fn is_known(&self) -> bool {
        self.cols > 0
    }
}

impl From<libc::winsize> for WindowSize {
    fn from(ws: libc::winsize) -> Self {
        Self {
            rows: ws.ws_row,
            cols: ws.ws_col,
        }
    }
}

/// Query the size of the terminal behind `fd` (TIOCGWINSZ)
pub fn window_size<Fd: AsFd>(fd: Fd) -> Result<WindowSize> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(fd.as_fd().as_raw_fd(), libc::TIOCGWINSZ, &mut ws) };
    Errno::result(result).map_err(Error::terminal("TIOCGWINSZ"))?;
    Ok(WindowSize::from(ws))
}

/// Parse a cursor position report (`ESC [ rows ; cols R`)
///
/// The trailing `R` is optional since readers usually stop on it.
pub fn parse_cursor_report(report: &[u8]) -> Option<WindowSize> {
    let body = report.strip_prefix(b"\x1b[")?;
    let body = body.strip_suffix(b"R").unwrap_or(body);
    let body = std::str::from_utf8(body).ok()?;
    let (rows, cols) = body.split_once(';')?;
    let rows = rows.parse().ok()?;
    let cols = cols.parse().ok()?;
    Some(WindowSize { rows, cols })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::pty::{openpty, Winsize};

    #[test]
    fn test_window_size_new() {
        let size = WindowSize::new(120, 40);
        assert_eq!(size.cols, 120);
        assert_eq!(size.rows, 40);
        assert!(size.is_known());
        assert!(!WindowSize::new(0, 40).is_known());
    }

    #[test]
    fn test_window_size_from_pty() {
        let ws = Winsize {
            ws_row: 40,
            ws_col: 120,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };
        let pty = openpty(Some(&ws), None).unwrap();
        let size = window_size(&pty.slave).unwrap();
        assert_eq!(size, WindowSize::new(120, 40));
    }

    #[test]
    fn test_window_size_non_terminal() {
        let file = tempfile::tempfile().unwrap();
        let err = window_size(&file).unwrap_err();
        assert!(err.is_terminal_access());
    }

    #[test]
    fn test_parse_cursor_report() {
        assert_eq!(
            parse_cursor_report(b"\x1b[24;80R"),
            Some(WindowSize::new(80, 24))
        );
        assert_eq!(
            parse_cursor_report(b"\x1b[50;132"),
            Some(WindowSize::new(132, 50))
        );
        assert_eq!(parse_cursor_report(b"[24;80R"), None);
        assert_eq!(parse_cursor_report(b"\x1b[24R"), None);
        assert_eq!(parse_cursor_report(b"\x1b[a;bR"), None);
        assert_eq!(parse_cursor_report(b""), None);
    }
}
