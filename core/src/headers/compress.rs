//! headers/compress.rs
//! Deflate (zlib wrapper) over the payload bytes via flate2.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::constants::{DEFAULT_COMPRESSION_LEVEL, MAX_COMPRESSION_LEVEL};
use crate::crypto::Keyring;
use crate::headers::types::Stage;
use crate::types::{JabError, Result};

#[derive(Clone, Copy, Debug)]
pub struct Compress {
    level: Compression,
}

impl Compress {
    /// `level` 0..=9; anything else falls back to the default level.
    pub fn new(level: u32) -> Self {
        let level = match level {
            0..=MAX_COMPRESSION_LEVEL => Compression::new(level),
            _ => Compression::default(),
        };
        Self { level }
    }

    pub fn level(&self) -> u32 {
        self.level.level()
    }
}

impl Default for Compress {
    fn default() -> Self {
        Self::new(DEFAULT_COMPRESSION_LEVEL)
    }
}

impl Stage for Compress {
    fn type_name(&self) -> &str {
        "Compress"
    }

    fn obfuscate(&self, payload: Vec<u8>) -> Result<Vec<u8>> {
        let mut enc = ZlibEncoder::new(Vec::with_capacity(payload.len() / 2 + 16), self.level);
        enc.write_all(&payload)
            .map_err(|e| JabError::format_with("compress: deflate", e))?;
        enc.finish().map_err(|e| JabError::format_with("compress: deflate finish", e))
    }

    fn deobfuscate(&self, payload: Vec<u8>, _keyring: &Keyring) -> Result<Vec<u8>> {
        let mut dec = ZlibDecoder::new(payload.as_slice());
        let mut out = Vec::with_capacity(payload.len() * 2);
        dec.read_to_end(&mut out)
            .map_err(|e| JabError::format_with("compress: inflate", e))?;
        Ok(out)
    }
}
