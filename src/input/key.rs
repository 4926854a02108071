//! Keys and their classification
//!
//! A key is one input byte decoded as a Unicode scalar. Bytes below 0x20
//! and DEL are control keys; everything else is printable.

use std::fmt;

/// Delete (0x7F), the one control code above the C0 range
pub const DEL: u8 = 0x7f;

/// The byte a terminal sends for Ctrl + `letter`
///
/// Holding Ctrl clears the upper three bits of the letter's code, so
/// Ctrl-Q is `b'q' & 0x1f` = 17. Upper and lower case give the same byte.
pub const fn ctrl_key(letter: u8) -> u8 {
    letter & 0x1f
}

/// A single decoded keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(pub u8);

impl Key {
    /// Ctrl + `letter`
    pub const fn ctrl(letter: u8) -> Self {
        Key(ctrl_key(letter))
    }

    pub fn byte(self) -> u8 {
        self.0
    }

    /// Numeric code point of the key
    pub fn code(self) -> u32 {
        u32::from(self.0)
    }

    pub fn as_char(self) -> char {
        char::from(self.0)
    }

    pub fn is_control(self) -> bool {
        self.0 < 0x20 || self.0 == DEL
    }

    pub fn class(self) -> KeyClass {
        if self.is_control() {
            KeyClass::Control
        } else {
            KeyClass::Printable
        }
    }
}

impl From<u8> for Key {
    fn from(byte: u8) -> Self {
        Key(byte)
    }
}

/// Control keys render as their code alone, printable keys as
/// `code ('char')`
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class() {
            KeyClass::Control => write!(f, "{}", self.code()),
            KeyClass::Printable => write!(f, "{} ('{}')", self.code(), self.as_char()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    Control,
    Printable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ctrl_key() {
        assert_eq!(ctrl_key(b'q'), 17);
        assert_eq!(ctrl_key(b'Q'), 17);
        assert_eq!(ctrl_key(b'c'), 3);
        assert_eq!(Key::ctrl(b'z'), Key(26));
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(Key(0x00).class(), KeyClass::Control);
        assert_eq!(Key(0x1f).class(), KeyClass::Control);
        assert_eq!(Key(0x20).class(), KeyClass::Printable);
        assert_eq!(Key(0x7e).class(), KeyClass::Printable);
        assert_eq!(Key(DEL).class(), KeyClass::Control);
        assert_eq!(Key(0x80).class(), KeyClass::Printable);
    }

    #[test]
    fn test_display() {
        assert_eq!(Key(b'A').to_string(), "65 ('A')");
        assert_eq!(Key(b' ').to_string(), "32 (' ')");
        assert_eq!(Key(b'\n').to_string(), "10");
        assert_eq!(Key(DEL).to_string(), "127");
        assert_eq!(Key(0xe9).to_string(), "233 ('é')");
    }

    proptest! {
        #[test]
        fn prop_classification(byte in any::<u8>()) {
            let key = Key::from(byte);
            let expect_control = byte < 0x20 || byte == 0x7f;
            prop_assert_eq!(key.is_control(), expect_control);

            let rendered = key.to_string();
            if expect_control {
                prop_assert_eq!(rendered, byte.to_string());
            } else {
                prop_assert_eq!(rendered, format!("{} ('{}')", byte, char::from(byte)));
            }
        }
    }
}
