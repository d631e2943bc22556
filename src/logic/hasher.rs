//! File Hasher
//!
//! Mục đích: Tính SHA256 của executable bằng streaming, không load cả file
//! vào memory.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const READ_BUFFER_SIZE: usize = 8192;

/// Seam cho scanner: cho phép inject digest failures trong tests
pub trait FileDigest {
    /// Hex digest của toàn bộ file content.
    ///
    /// Mọi open/read error trả về `std::io::Error` - caller coi là "hash
    /// unavailable", không phải fatal.
    fn digest_file(&self, path: &Path) -> std::io::Result<String>;
}

/// Streaming SHA256 hasher
#[derive(Debug, Default)]
pub struct Sha256Hasher;

impl FileDigest for Sha256Hasher {
    fn digest_file(&self, path: &Path) -> std::io::Result<String> {
        let mut file = File::open(path)?;
        let mut hasher = Sha256::new();
        let mut buffer = [0u8; READ_BUFFER_SIZE];

        loop {
            let bytes_read = file.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(format!("{:x}", hasher.finalize()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
