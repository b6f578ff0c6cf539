//! Whole-file encode and decode.
//!
//! Results are staged in a temporary file next to the destination and moved
//! into place only once complete, so a failed call never leaves a partial
//! output file behind.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::decoder::decode;
use crate::encoder::{encode_with, EncoderOptions};
use crate::error::Result;
use crate::stream::Stats;

pub fn encode_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Stats> {
    encode_file_with(input, output, &EncoderOptions::default())
}

pub fn encode_file_with(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &EncoderOptions,
) -> Result<Stats> {
    let data = fs::read(input)?;
    let encoded = encode_with(&data, options);
    write_atomic(output, &encoded)?;
    Ok(Stats {
        input_bytes: data.len() as u64,
        output_bytes: encoded.len() as u64,
    })
}

pub fn decode_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Stats> {
    let data = fs::read(input)?;
    let decoded = decode(&data)?;
    write_atomic(output, &decoded)?;
    Ok(Stats {
        input_bytes: data.len() as u64,
        output_bytes: decoded.len() as u64,
    })
}

/// Writes `data` to `path` through a temporary file in the same directory.
pub fn write_atomic(path: impl AsRef<Path>, data: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(data)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LzssError;
    use tempfile::tempdir;

    #[test]
    fn test_file_roundtrip() -> Result<()> {
        let dir = tempdir()?;
        let original = dir.path().join("lorem.txt");
        let packed = dir.path().join("lorem.lzss");
        let restored = dir.path().join("lorem.out");

        let text = b"Lorem ipsum dolor sit amet, consectetur adipisicing elit, \
                     sed do eiusmod tempor incididunt ut labore et dolore magna \
                     aliqua. Lorem ipsum dolor sit amet, consectetur adipisicing \
                     elit, sed do eiusmod tempor incididunt ut labore.";
        fs::write(&original, text)?;

        let stats = encode_file(&original, &packed)?;
        assert_eq!(stats.input_bytes, text.len() as u64);
        assert!(stats.output_bytes < stats.input_bytes);

        decode_file(&packed, &restored)?;
        assert_eq!(fs::read(&restored)?, text);
        Ok(())
    }

    #[test]
    fn test_failed_decode_leaves_no_output() -> Result<()> {
        let dir = tempdir()?;
        let corrupt = dir.path().join("corrupt.lzss");
        let target = dir.path().join("target.out");
        fs::write(&corrupt, b"\xFF\x01\x02\x03")?;

        let result = decode_file(&corrupt, &target);
        assert!(matches!(result, Err(LzssError::TruncatedStream { .. })));
        assert!(!target.exists());
        // Only the input remains; the staged temporary file was cleaned up.
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_missing_input() {
        let dir = tempdir().unwrap();
        let result = encode_file(dir.path().join("absent"), dir.path().join("out"));
        match result {
            Err(LzssError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
