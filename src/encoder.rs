//! Greedy LZSS encoder.
//!
//! Each position takes the longest match the finder reports, or a literal
//! when there is none; decisions are never revisited. Tokens are packed in
//! flag groups: one flag byte (bit k set = token k is a match, LSB first)
//! followed by up to eight bodies.

use crate::matcher::{MatchFinder, DEFAULT_MAX_CHAIN};
use crate::token::{Token, FLAG_GROUP_SIZE, MATCH_BODY_LEN};

/// Tuning knobs that change compression ratio and speed but never the
/// stream format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    /// Maximum hash-chain candidates probed per position.
    pub max_chain: usize,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            max_chain: DEFAULT_MAX_CHAIN,
        }
    }
}

/// Iterator over the tokens of a greedy parse of `input`.
#[derive(Debug)]
pub struct Encoder<'a> {
    input: &'a [u8],
    pos: usize,
    finder: MatchFinder,
}

impl<'a> Encoder<'a> {
    pub fn new(input: &'a [u8], options: &EncoderOptions) -> Self {
        Self {
            input,
            pos: 0,
            finder: MatchFinder::new(options.max_chain),
        }
    }
}

impl Iterator for Encoder<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let lookahead = &self.input[self.pos..];
        let &first = lookahead.first()?;

        // A candidate the format cannot carry falls back to a literal.
        let token = match self.finder.find_best_match(lookahead).map(Token::try_from) {
            Some(Ok(token)) => token,
            _ => Token::Literal(first),
        };
        let span = token.span();
        self.finder.advance(lookahead, span);
        self.pos += span;
        Some(token)
    }
}

/// A flag byte and the bodies of the tokens it describes.
#[derive(Debug, Default)]
struct FlagGroup {
    flags: u8,
    count: usize,
    body: Vec<u8>,
}

impl FlagGroup {
    fn push(&mut self, token: &Token) {
        if token.is_match() {
            self.flags |= 1 << self.count;
        }
        token.write_body(&mut self.body);
        self.count += 1;
    }

    fn is_full(&self) -> bool {
        self.count == FLAG_GROUP_SIZE
    }

    /// Writes the group if it holds any token. Unused flag bits stay 0.
    fn flush_into(&mut self, out: &mut Vec<u8>) {
        if self.count == 0 {
            return;
        }
        out.push(self.flags);
        out.extend_from_slice(&self.body);
        self.flags = 0;
        self.count = 0;
        self.body.clear();
    }
}

/// Compresses `input` with the default options.
pub fn encode(input: &[u8]) -> Vec<u8> {
    encode_with(input, &EncoderOptions::default())
}

pub fn encode_with(input: &[u8], options: &EncoderOptions) -> Vec<u8> {
    // Worst case is all literals: one flag byte per eight input bytes.
    let mut out = Vec::with_capacity(input.len() + input.len() / FLAG_GROUP_SIZE + 1);
    let mut group = FlagGroup {
        body: Vec::with_capacity(FLAG_GROUP_SIZE * MATCH_BODY_LEN),
        ..FlagGroup::default()
    };

    for token in Encoder::new(input, options) {
        group.push(&token);
        if group.is_full() {
            group.flush_into(&mut out);
        }
    }
    group.flush_into(&mut out);
    out
}
