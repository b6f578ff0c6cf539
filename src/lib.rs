//! LZSS compression for byte buffers, streams and files.
//!
//! The stream is a sequence of flag groups with no header: a flag byte whose
//! bit k (LSB first) marks token k as a match, followed by up to eight token
//! bodies. A literal body is the byte itself; a match body packs a 12-bit
//! distance into a 4096-byte window and a 4-bit length of 3 to 18 bytes.
//! Window size and match limits are fixed protocol constants.
//!
//! ```
//! let data = b"abracadabra abracadabra abracadabra";
//! let packed = lzss::encode(data);
//! assert!(packed.len() < data.len());
//! assert_eq!(lzss::decode(&packed).unwrap(), data);
//! ```

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod file;
pub mod matcher;
pub mod stream;
pub mod token;
pub mod window;

pub use decoder::{decode, TokenReader};
pub use encoder::{encode, encode_with, Encoder, EncoderOptions};
pub use error::{LzssError, Result};
pub use file::{decode_file, encode_file, encode_file_with};
pub use matcher::{MatchFinder, DEFAULT_MAX_CHAIN};
pub use stream::{decode_stream, encode_stream, encode_stream_with, Stats};
pub use token::{MatchCandidate, Token, MAX_MATCH, MIN_MATCH, WINDOW_SIZE};
pub use window::Window;
