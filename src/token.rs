//! Protocol constants and the token model shared by encoder and decoder.
//!
//! A match body is two bytes. The distance is stored minus one in 12 bits so
//! that the full 4096-byte window is addressable, and the length is stored
//! minus `MIN_MATCH` in 4 bits:
//!
//! ```text
//! byte 0: dddddddd   low 8 bits of (offset - 1)
//! byte 1: ddddllll   high 4 bits of (offset - 1), (length - MIN_MATCH)
//! ```

use crate::error::{LzssError, Result};

pub const WINDOW_SIZE: usize = 4096; // Size of the look-behind buffer
pub const MIN_MATCH: usize = 3; // Shorter repeats are cheaper as literals
pub const MAX_MATCH: usize = MIN_MATCH + 15; // Limited by the 4-bit length field
pub const FLAG_GROUP_SIZE: usize = 8;
pub const MATCH_BODY_LEN: usize = 2;

/// A back-reference found by the match finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCandidate {
    /// Distance backward from the current position, `1..=WINDOW_SIZE`.
    pub offset: usize,
    /// Number of bytes matched, `MIN_MATCH..=MAX_MATCH`.
    pub length: usize,
}

/// The atomic unit of the compressed stream.
///
/// Build matches through [`Token::new_match`] or `TryFrom<MatchCandidate>`,
/// which reject offsets and lengths the wire format cannot carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Literal(u8),
    Match { offset: u16, length: u8 },
}

impl Token {
    pub fn new_match(offset: usize, length: usize) -> Result<Token> {
        if !(1..=WINDOW_SIZE).contains(&offset) || !(MIN_MATCH..=MAX_MATCH).contains(&length) {
            return Err(LzssError::InvalidMatch { offset, length });
        }
        Ok(Token::Match {
            offset: offset as u16,
            length: length as u8,
        })
    }

    /// Whether this token sets its bit in the flag byte.
    pub fn is_match(&self) -> bool {
        matches!(self, Token::Match { .. })
    }

    /// Number of input bytes this token stands for.
    pub fn span(&self) -> usize {
        match *self {
            Token::Literal(_) => 1,
            Token::Match { length, .. } => length as usize,
        }
    }

    /// Appends the token body (without its flag bit) to `out`. Only tokens
    /// produced by [`Token::new_match`] or the decoder reach this.
    pub(crate) fn write_body(&self, out: &mut Vec<u8>) {
        match *self {
            Token::Literal(byte) => out.push(byte),
            Token::Match { offset, length } => {
                out.extend_from_slice(&pack_match(offset as usize, length as usize))
            }
        }
    }
}

impl TryFrom<MatchCandidate> for Token {
    type Error = LzssError;

    fn try_from(m: MatchCandidate) -> Result<Self> {
        Token::new_match(m.offset, m.length)
    }
}

/// Packs a match into its two-byte body. `offset` and `length` must already
/// be within the protocol ranges.
pub(crate) fn pack_match(offset: usize, length: usize) -> [u8; MATCH_BODY_LEN] {
    let field = (offset - 1) & (WINDOW_SIZE - 1);
    let len = (length - MIN_MATCH) & 0x0F;
    [(field & 0xFF) as u8, (((field >> 8) << 4) | len) as u8]
}

/// Inverse of [`pack_match`]; every two-byte body decodes to some in-range match.
pub fn unpack_match(body: [u8; MATCH_BODY_LEN]) -> (usize, usize) {
    let field = body[0] as usize | ((body[1] as usize & 0xF0) << 4);
    let len = (body[1] & 0x0F) as usize;
    (field + 1, len + MIN_MATCH)
}
