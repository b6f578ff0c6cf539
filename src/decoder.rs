//! LZSS decoder.

use crate::error::{LzssError, Result};
use crate::token::{unpack_match, Token, FLAG_GROUP_SIZE, MATCH_BODY_LEN};
use crate::window::Window;

/// Body bytes taken by the first `slots` tokens of a group.
fn body_len(flags: u8, slots: usize) -> usize {
    (0..slots)
        .map(|k| if flags & (1 << k) != 0 { MATCH_BODY_LEN } else { 1 })
        .sum()
}

/// Number of token slots of a group that `available` bytes can carry.
///
/// The stream may stop at a slot boundary only if every remaining flag bit
/// is clear; the encoder pads the last group with zero bits. Anything else
/// means bodies are missing, and `Err` carries how many bytes are short of
/// the last match the group declares.
fn group_slots(flags: u8, available: usize) -> std::result::Result<usize, usize> {
    let mut used = 0;
    for k in 0..FLAG_GROUP_SIZE {
        if used == available && flags >> k == 0 {
            return Ok(k);
        }
        used += if flags & (1 << k) != 0 { MATCH_BODY_LEN } else { 1 };
        if used > available {
            let declared = FLAG_GROUP_SIZE - flags.leading_zeros() as usize;
            return Err(body_len(flags, declared) - available);
        }
    }
    Ok(FLAG_GROUP_SIZE)
}

/// Iterator over the tokens of a packed stream.
///
/// Each flag group is checked against the remaining input before any of its
/// tokens is yielded, so a truncated group fails as a whole. After an error
/// the iterator is exhausted.
#[derive(Debug)]
pub struct TokenReader<'a> {
    input: &'a [u8],
    cursor: usize,
    flags: u8,
    slot: usize,
    slots: usize,
    failed: bool,
}

impl<'a> TokenReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            cursor: 0,
            flags: 0,
            slot: 0,
            slots: 0,
            failed: false,
        }
    }

    fn read_flags(&mut self) -> Result<bool> {
        let Some(&flags) = self.input.get(self.cursor) else {
            return Ok(false);
        };
        let position = self.cursor;
        self.cursor += 1;

        let available = self.input.len() - self.cursor;
        let slots = group_slots(flags, available).map_err(|needed| LzssError::TruncatedStream {
            position,
            needed,
            available,
        })?;
        self.flags = flags;
        self.slot = 0;
        self.slots = slots;
        Ok(slots > 0)
    }
}

impl Iterator for TokenReader<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        if self.failed {
            return None;
        }
        if self.slot == self.slots {
            match self.read_flags() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }

        let k = self.slot;
        self.slot += 1;
        let token = if self.flags & (1 << k) == 0 {
            let byte = self.input[self.cursor];
            self.cursor += 1;
            Token::Literal(byte)
        } else {
            let body = [self.input[self.cursor], self.input[self.cursor + 1]];
            self.cursor += MATCH_BODY_LEN;
            let (offset, length) = unpack_match(body);
            Token::Match {
                offset: offset as u16,
                length: length as u8,
            }
        };
        Some(Ok(token))
    }
}

/// Decompresses a complete stream produced by [`crate::encode`].
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let mut window = Window::new();
    let mut output = Vec::with_capacity(input.len() * 2);

    for token in TokenReader::new(input) {
        match token? {
            Token::Literal(byte) => {
                window.push(byte);
                output.push(byte);
            }
            Token::Match { offset, length } => {
                let offset = offset as usize;
                if offset > window.len() {
                    return Err(LzssError::InvalidOffset {
                        offset,
                        available: window.len(),
                        position: output.len(),
                    });
                }
                // Byte by byte: with offset < length the source overlaps
                // what this match is producing.
                for _ in 0..length {
                    let byte = window.at(offset)?;
                    window.push(byte);
                    output.push(byte);
                }
            }
        }
    }

    Ok(output)
}
