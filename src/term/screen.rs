//! Screen control sequences

use std::io::Write;

use crate::error::Result;

/// Erase the whole display
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J";
/// Move the cursor to row 1, column 1
pub const CURSOR_HOME: &[u8] = b"\x1b[H";
/// Push the cursor as far right and down as the terminal allows
pub const CURSOR_BOTTOM_RIGHT: &[u8] = b"\x1b[999C\x1b[999B";
/// Device status report: ask for the cursor position
pub const CURSOR_POSITION_REQUEST: &[u8] = b"\x1b[6n";

/// Clear the screen and home the cursor
pub fn refresh<W: Write>(out: &mut W) -> Result<()> {
    out.write_all(CLEAR_SCREEN)?;
    out.write_all(CURSOR_HOME)?;
    out.flush()?;
    Ok(())
}

/// Ask the terminal where the cursor ended up after a move to the
/// bottom-right corner; the answer arrives on the input stream
pub fn request_cursor_probe<W: Write>(out: &mut W) -> Result<()> {
    out.write_all(CURSOR_BOTTOM_RIGHT)?;
    out.write_all(CURSOR_POSITION_REQUEST)?;
    out.flush()?;
    Ok(())
}
