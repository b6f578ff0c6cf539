//! Hash-chain match finder over the encoder's window.
//!
//! Every consumed position whose first three bytes are known is linked into
//! a chain keyed by a hash of those bytes. `head` holds the newest position
//! per hash and `prev` is a fixed arena of `WINDOW_SIZE` back links indexed
//! by `position & (WINDOW_SIZE - 1)`, so slots are recycled as the window
//! slides. Chains are walked newest first, which makes the first candidate
//! of a given length also the nearest one.

use crate::token::{MatchCandidate, MAX_MATCH, MIN_MATCH, WINDOW_SIZE};
use crate::window::Window;

const HASH_BITS: usize = 12;
const HASH_SIZE: usize = 1 << HASH_BITS;
const HASH_MASK: usize = HASH_SIZE - 1;
const NIL: usize = usize::MAX;

/// Candidates probed per search unless configured otherwise.
pub const DEFAULT_MAX_CHAIN: usize = 128;

#[derive(Debug, Clone)]
pub struct MatchFinder {
    window: Window,
    head: Vec<usize>,
    prev: Vec<usize>,
    max_chain: usize,
}

impl MatchFinder {
    pub fn new(max_chain: usize) -> Self {
        Self {
            window: Window::new(),
            head: vec![NIL; HASH_SIZE],
            prev: vec![NIL; WINDOW_SIZE],
            max_chain,
        }
    }

    /// Absolute input position of the next byte to be consumed.
    pub fn position(&self) -> usize {
        self.window.total()
    }

    #[inline(always)]
    fn hash(b0: u8, b1: u8, b2: u8) -> usize {
        let h = (b0 as usize).wrapping_mul(506_832_829)
            ^ ((b1 as usize).wrapping_mul(2_654_435_761) << 8)
            ^ ((b2 as usize).wrapping_mul(374_761_393) << 16);
        (h ^ (h >> 15)) & HASH_MASK
    }

    /// Finds the longest prefix of `lookahead` that starts inside the window.
    ///
    /// The lookahead is clamped to `MAX_MATCH`. A match may run past the
    /// current position into the lookahead itself, which is how runs are
    /// encoded with small offsets. Returns `None` when nothing reaches
    /// `MIN_MATCH` bytes.
    pub fn find_best_match(&self, lookahead: &[u8]) -> Option<MatchCandidate> {
        let max_len = lookahead.len().min(MAX_MATCH);
        if max_len < MIN_MATCH {
            return None;
        }

        let pos = self.position();
        let available = self.window.len();
        let mut candidate = self.head[Self::hash(lookahead[0], lookahead[1], lookahead[2])];
        let mut best: Option<MatchCandidate> = None;
        let mut best_len = MIN_MATCH - 1;
        let mut probes = 0;

        while candidate != NIL && candidate < pos && probes < self.max_chain {
            let offset = pos - candidate;
            if offset > available {
                break;
            }

            let len = self.match_length(offset, lookahead, max_len);
            if len > best_len {
                best_len = len;
                best = Some(MatchCandidate {
                    offset,
                    length: len,
                });
                if len == max_len {
                    break;
                }
            }

            // Links always point further back; anything else is a recycled slot.
            let next = self.prev[candidate & (WINDOW_SIZE - 1)];
            if next >= candidate {
                break;
            }
            candidate = next;
            probes += 1;
        }

        best
    }

    fn match_length(&self, offset: usize, lookahead: &[u8], max_len: usize) -> usize {
        let mut len = 0;
        while len < max_len {
            let byte = if len < offset {
                self.window.peek(offset - len)
            } else {
                lookahead[len - offset]
            };
            if byte != lookahead[len] {
                break;
            }
            len += 1;
        }
        len
    }

    /// Consumes the first `n` bytes of `lookahead` into the window, indexing
    /// each position that has three known bytes.
    pub fn advance(&mut self, lookahead: &[u8], n: usize) {
        for i in 0..n.min(lookahead.len()) {
            if i + MIN_MATCH <= lookahead.len() {
                let h = Self::hash(lookahead[i], lookahead[i + 1], lookahead[i + 2]);
                let pos = self.position();
                self.prev[pos & (WINDOW_SIZE - 1)] = self.head[h];
                self.head[h] = pos;
            }
            self.window.push(lookahead[i]);
        }
    }
}

impl Default for MatchFinder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHAIN)
    }
}
