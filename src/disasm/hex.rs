//! Hex input cleanup and decoding.
//!
//! Accepts free-form hex text: "0x" markers, spaces, tabs and newlines may
//! appear anywhere and are stripped before interpretation.

use thiserror::Error;

/// Hex decoding errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexError {
    #[error("no hex digits in input")]
    Empty,

    #[error("odd number of hex digits")]
    OddLength,

    #[error("input contains a non-hex digit")]
    InvalidDigit,
}

/// Strip every literal "0x" marker and all ASCII whitespace
fn clean(text: &str) -> String {
    text.replace("0x", "")
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect()
}

/// Decode free-form hex text into a byte buffer.
///
/// The whole input is rejected on any bad pair; a partial buffer is never
/// returned. An input that cleans to nothing is an error, not an empty
/// buffer.
pub fn decode(text: &str) -> Result<Vec<u8>, HexError> {
    let cleaned = clean(text);
    if cleaned.is_empty() {
        return Err(HexError::Empty);
    }

    match hex::decode(&cleaned) {
        Ok(bytes) => Ok(bytes),
        Err(hex::FromHexError::OddLength) => Err(HexError::OddLength),
        Err(_) => Err(HexError::InvalidDigit),
    }
}
