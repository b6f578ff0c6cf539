use std::io::{Read, Write};

use crate::decoder::decode;
use crate::encoder::{encode_with, EncoderOptions};
use crate::error::Result;

/// Byte counts for one encode or decode call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl Stats {
    fn new(input: &[u8], output: &[u8]) -> Self {
        Self {
            input_bytes: input.len() as u64,
            output_bytes: output.len() as u64,
        }
    }

    /// Output size over input size; 0.0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }
}

/// Compresses everything `reader` yields into `writer`.
///
/// The input is read to the end before anything is written, and the writer
/// is flushed on success.
pub fn encode_stream(reader: &mut impl Read, writer: &mut impl Write) -> Result<Stats> {
    encode_stream_with(reader, writer, &EncoderOptions::default())
}

pub fn encode_stream_with(
    reader: &mut impl Read,
    writer: &mut impl Write,
    options: &EncoderOptions,
) -> Result<Stats> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    let encoded = encode_with(&buffer, options);
    writer.write_all(&encoded)?;
    writer.flush()?;
    Ok(Stats::new(&buffer, &encoded))
}

/// Decompresses everything `reader` yields into `writer`. Nothing is
/// written if the stream is malformed.
pub fn decode_stream(reader: &mut impl Read, writer: &mut impl Write) -> Result<Stats> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    let decoded = decode(&buffer)?;
    writer.write_all(&decoded)?;
    writer.flush()?;
    Ok(Stats::new(&buffer, &decoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LzssError;
    use std::io::{self, BufReader, Cursor, ErrorKind};

    #[test]
    fn test_streaming_roundtrip() -> Result<()> {
        let input_data = b"AAABBBCCCCCDDDDEFFFGAAAAAAAAA AAABBBCCCCC".to_vec();
        let mut compressed_buf = Vec::new();
        let mut reader = BufReader::new(Cursor::new(input_data.clone()));

        let stats = encode_stream(&mut reader, &mut compressed_buf)?;
        assert_eq!(stats.input_bytes, input_data.len() as u64);
        assert_eq!(stats.output_bytes, compressed_buf.len() as u64);
        assert!(stats.ratio() < 1.0);

        let mut decompressed_buf = Vec::new();
        let mut compressed_reader = BufReader::new(Cursor::new(compressed_buf));
        decode_stream(&mut compressed_reader, &mut decompressed_buf)?;

        assert_eq!(input_data, decompressed_buf);
        Ok(())
    }

    #[test]
    fn test_decode_stream_writes_nothing_on_error() {
        let mut stream = vec![0x00];
        stream.extend_from_slice(b"complete");
        stream.extend_from_slice(&[0xFF, 0x01]);
        let mut reader = Cursor::new(stream);
        let mut writer = Vec::new();
        let result = decode_stream(&mut reader, &mut writer);
        assert!(matches!(result, Err(LzssError::TruncatedStream { .. })));
        assert!(writer.is_empty());
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn test_io_error_propagates() {
        let mut writer = Vec::new();
        match encode_stream(&mut FailingReader, &mut writer) {
            Err(LzssError::Io(e)) => assert_eq!(e.kind(), ErrorKind::PermissionDenied),
            other => panic!("expected I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_ratio() {
        assert_eq!(Stats::default().ratio(), 0.0);
    }
}
