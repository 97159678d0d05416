//! Board character set and text validation.
//!
//! The board shows a fixed set of glyphs, each addressed by a numeric code.
//! Text sent through the text endpoint must fit on the board and use only
//! those glyphs.

use thiserror::Error;

pub const ROWS: usize = 6;
pub const COLUMNS: usize = 22;
pub const MAX_TEXT_LENGTH: usize = ROWS * COLUMNS;

/// Code for an empty cell.
pub const BLANK: u8 = 0;

/// Reasons text is rejected by `valid_text`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("text is empty")]
    Empty,

    #[error("text is {length} characters, longer than the maximum of {max}")]
    TooLong { length: usize, max: usize },

    #[error("lowercase character {character:?} at position {position}; text must be uppercase")]
    Lowercase { character: char, position: usize },

    #[error("unsupported character {character:?} at position {position}")]
    UnsupportedCharacter { character: char, position: usize },
}

/// Map a character to its board code. Lowercase letters share the codes of
/// their uppercase forms.
pub fn char_code(c: char) -> Option<u8> {
    let code = match c.to_ascii_uppercase() {
        ' ' => BLANK,
        letter @ 'A'..='Z' => letter as u8 - b'A' + 1,
        digit @ '1'..='9' => digit as u8 - b'1' + 27,
        '0' => 36,
        '!' => 37,
        '@' => 38,
        '#' => 39,
        '$' => 40,
        '(' => 41,
        ')' => 42,
        '-' => 44,
        '+' => 46,
        '&' => 47,
        '=' => 48,
        ';' => 49,
        ':' => 50,
        '\'' => 52,
        '"' => 53,
        '%' => 54,
        ',' => 55,
        '.' => 56,
        '/' => 59,
        '?' => 60,
        '°' => 62,
        _ => return None,
    };
    Some(code)
}

/// Check text against the board's content rules.
///
/// Length is counted in characters, not bytes.
pub fn valid_text(text: &str, uppercase_required: bool) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }

    let length = text.chars().count();
    if length > MAX_TEXT_LENGTH {
        return Err(ValidationError::TooLong {
            length,
            max: MAX_TEXT_LENGTH,
        });
    }

    for (position, character) in text.chars().enumerate() {
        if uppercase_required && character.is_ascii_lowercase() {
            return Err(ValidationError::Lowercase { character, position });
        }
        if char_code(character).is_none() {
            return Err(ValidationError::UnsupportedCharacter { character, position });
        }
    }
    Ok(())
}
