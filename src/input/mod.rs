//! Keyboard input under raw mode

pub mod key;
pub mod reader;

pub use key::{ctrl_key, Key, KeyClass};
pub use reader::KeyReader;
