//! Integration tests for raw mode on real pseudoterminals
//!
//! The PTY master plays the keyboard: bytes written to it pass through the
//! slave's line discipline, so these tests see exactly what a raw-mode
//! editor would see on a real terminal.

use std::fs::File;
use std::io::{self, Read, Write};
use std::os::fd::AsRawFd;

use nix::fcntl::{fcntl, FcntlArg, OFlag};
use nix::pty::{openpty, OpenptyResult, Winsize};

use kaze::term::attrs;
use kaze::{Editor, Exit, KeyReader, RawMode, ReadPolicy, WindowSize};

const POLL: ReadPolicy = ReadPolicy::Timeout { tenths: 1 };

fn pty() -> OpenptyResult {
    openpty(None, None).expect("Failed to open PTY")
}

/// Type `keys` into the slave side of a PTY held in raw mode and run the
/// editor loop over it
fn type_keys(keys: &[u8]) -> (Exit, String) {
    let pty = pty();
    let session = RawMode::enter(&pty.slave, POLL).unwrap();

    let mut keyboard = File::from(pty.master);
    keyboard.write_all(keys).unwrap();

    let reader = KeyReader::from_fd(&pty.slave).unwrap();
    let mut editor = Editor::new(reader, Vec::new()).with_policy(POLL);
    let exit = editor.run().unwrap();
    let output = String::from_utf8(editor.output().clone()).unwrap();

    session.exit().unwrap();
    (exit, output)
}

#[test]
fn test_round_trip_restores_attributes() {
    let pty = pty();
    let before = attrs::capture(&pty.slave).unwrap();

    for policy in [ReadPolicy::Blocking, POLL] {
        let session = RawMode::enter(&pty.slave, policy).unwrap();
        assert_eq!(session.original(), &before);
        session.exit().unwrap();
        assert_eq!(attrs::capture(&pty.slave).unwrap(), before);
    }
}

#[test]
fn test_restored_on_early_return() {
    fn fails_inside_session(pty: &OpenptyResult) -> kaze::Result<()> {
        let _session = RawMode::enter(&pty.slave, ReadPolicy::Blocking)?;
        let mut editor = Editor::new(KeyReader::new(BrokenInput), Vec::new());
        editor.run()?;
        Ok(())
    }

    let pty = pty();
    let before = attrs::capture(&pty.slave).unwrap();
    assert!(matches!(
        fails_inside_session(&pty),
        Err(kaze::Error::InputRead(_))
    ));
    assert_eq!(attrs::capture(&pty.slave).unwrap(), before);
}

struct BrokenInput;

impl Read for BrokenInput {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::PermissionDenied))
    }
}

#[test]
fn test_keys_arrive_unbuffered() {
    // No newline needed for the quit key to arrive: canonical mode is off
    let (exit, output) = type_keys(&[65, 10, 17]);
    assert_eq!(exit, Exit::Quit);
    assert_eq!(output, "65 ('A')\r\n10\r\n");
}

#[test]
fn test_control_bytes_pass_through() {
    // Ctrl-C and Ctrl-Z stay bytes, CR is not translated to NL
    let (exit, output) = type_keys(&[3, 26, 13, 17]);
    assert_eq!(exit, Exit::Quit);
    assert_eq!(output, "3\r\n26\r\n13\r\n");
}

#[test]
fn test_typed_keys_are_not_echoed() {
    let pty = pty();
    let _session = RawMode::enter(&pty.slave, POLL).unwrap();

    let mut keyboard = File::from(pty.master.try_clone().unwrap());
    keyboard.write_all(b"x\x11").unwrap();

    let reader = KeyReader::from_fd(&pty.slave).unwrap();
    let mut editor = Editor::new(reader, Vec::new()).with_policy(POLL);
    assert_eq!(editor.run().unwrap(), Exit::Quit);

    // Nothing came back to the master side
    fcntl(pty.master.as_raw_fd(), FcntlArg::F_SETFL(OFlag::O_NONBLOCK)).unwrap();
    let mut buf = [0u8; 16];
    let read = File::from(pty.master).read(&mut buf);
    assert!(matches!(read, Err(ref e) if e.kind() == io::ErrorKind::WouldBlock));
}

#[test]
fn test_window_size_of_session() {
    let ws = Winsize {
        ws_row: 24,
        ws_col: 80,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let pty = openpty(Some(&ws), None).unwrap();
    let session = RawMode::enter(&pty.slave, ReadPolicy::Blocking).unwrap();
    assert_eq!(session.window_size().unwrap(), WindowSize::new(80, 24));
}

#[test]
fn test_non_terminal_is_rejected() {
    let file = tempfile::tempfile().unwrap();
    let err = RawMode::enter(&file, ReadPolicy::Blocking).unwrap_err();
    assert!(err.is_terminal_access());
    assert!(kaze::term::size::window_size(&file)
        .unwrap_err()
        .is_terminal_access());
}
