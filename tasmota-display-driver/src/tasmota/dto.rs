use bytes::Bytes;
use powston_display_lib::topic::Encode;
use std::fmt;

/// Text placement understood by the Tasmota display driver: font size
/// section `s` and vertical offset `y`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pub section: u8,
    pub y: u16,
}

impl Position {
    pub const fn new(section: u8, y: u16) -> Self {
        Self { section, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}y{}", self.section, self.y)
    }
}

/// Payload of `DisplayText`, e.g. `[s1y0] 2024-05-01 14:30:00+10:00: charge`.
#[derive(Clone, PartialEq, Debug)]
pub struct DisplayText {
    pub position: Position,
    pub text: String,
}

impl DisplayText {
    pub fn new(position: Position, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
        }
    }
}

impl fmt::Display for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.position, self.text)
    }
}

impl Encode for DisplayText {
    fn encode(message: &Self) -> Bytes {
        message.to_string().into()
    }
}

/// `DisplayClear` takes no argument.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DisplayClear;

impl Encode for DisplayClear {
    fn encode(_message: &Self) -> Bytes {
        Bytes::new()
    }
}
