//! Payloads and responses for the RW endpoint.
//!
//! # Design
//! These types mirror the wire format but are defined independently of the
//! mock-server crate; the integration tests catch any drift between the two.

use serde::{Deserialize, Serialize};

use crate::characters::{char_code, valid_text, ValidationError, BLANK, COLUMNS, ROWS};

/// Full-board content as a grid of character codes.
///
/// Serializes as a JSON array of `ROWS` arrays of `COLUMNS` integers, which is
/// the body the RW endpoint expects for structured updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout([[u8; COLUMNS]; ROWS]);

impl Layout {
    pub fn blank() -> Self {
        Self([[BLANK; COLUMNS]; ROWS])
    }

    pub fn from_rows(rows: [[u8; COLUMNS]; ROWS]) -> Self {
        Self(rows)
    }

    pub fn rows(&self) -> &[[u8; COLUMNS]; ROWS] {
        &self.0
    }

    pub fn get(&self, row: usize, column: usize) -> Option<u8> {
        self.0.get(row)?.get(column).copied()
    }

    /// Set one cell. Returns `false` when the position is off the board.
    pub fn set(&mut self, row: usize, column: usize, code: u8) -> bool {
        match self.0.get_mut(row).and_then(|r| r.get_mut(column)) {
            Some(cell) => {
                *cell = code;
                true
            }
            None => false,
        }
    }

    /// Write text left-aligned on one row, blanking the rest of the row.
    ///
    /// The text is validated with lowercase allowed; it must also fit within
    /// a single row. Empty text clears the row. Out-of-range rows are ignored.
    pub fn write_row(&mut self, row: usize, text: &str) -> Result<(), ValidationError> {
        if !text.is_empty() {
            valid_text(text, false)?;
        }
        let length = text.chars().count();
        if length > COLUMNS {
            return Err(ValidationError::TooLong {
                length,
                max: COLUMNS,
            });
        }

        if let Some(cells) = self.0.get_mut(row) {
            *cells = [BLANK; COLUMNS];
            for (cell, character) in cells.iter_mut().zip(text.chars()) {
                *cell = char_code(character).unwrap_or(BLANK);
            }
        }
        Ok(())
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::blank()
    }
}

/// Request payload for a plain-text update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextMessage {
    pub text: String,
}

/// The server's response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RwMessageResponse {
    #[serde(rename = "status")]
    pub message: String,
}

/// Caller-facing result of a successful send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: Message,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
}

impl From<RwMessageResponse> for MessageResponse {
    fn from(response: RwMessageResponse) -> Self {
        MessageResponse {
            message: Message {
                text: response.message,
            },
        }
    }
}
