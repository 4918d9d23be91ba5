//! Streaming SHA-256 content fingerprinting.
//!
//! Files are read in fixed-size chunks so peak memory stays bounded
//! regardless of file size. The digest is the content-identity proxy for
//! the whole pipeline: any byte difference changes it with overwhelming
//! probability.

use std::fs::File;
use std::io::Read;

use camino::Utf8Path;
use sha2::{Digest, Sha256};

use crate::error::ScanError;

/// Read chunk size for fingerprinting (1 MiB).
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// Computes the hex-encoded SHA-256 digest of a file's bytes.
///
/// # Errors
///
/// Returns [`ScanError::Read`] if the file cannot be opened or read. The
/// caller decides whether that aborts the run or is recorded per file (in
/// this pipeline it never aborts: batch hashing maps failures to empty
/// digests).
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use ki_scanner::fingerprint::hash_file;
///
/// let digest = hash_file(Utf8Path::new("README.md"))?;
/// assert_eq!(digest.len(), 64);
/// # Ok::<(), ki_scanner::ScanError>(())
/// ```
pub fn hash_file(path: &Utf8Path) -> Result<String, ScanError> {
    let mut file = File::open(path.as_std_path()).map_err(|e| ScanError::read(path, e))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0_u8; CHUNK_SIZE];

    loop {
        let read = file.read(&mut buffer).map_err(|e| ScanError::read(path, e))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &[u8]) -> (tempfile::TempDir, camino::Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("f.bin")).unwrap();
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_known_digest() {
        // SHA-256 of the empty input is a fixed constant.
        let (_dir, path) = write_temp(b"");
        assert_eq!(
            hash_file(&path).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_known_digest_hello() {
        let (_dir, path) = write_temp(b"hello");
        assert_eq!(
            hash_file(&path).unwrap(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_identical_content_identical_digest() {
        let (_d1, p1) = write_temp(b"same bytes");
        let (_d2, p2) = write_temp(b"same bytes");
        assert_eq!(hash_file(&p1).unwrap(), hash_file(&p2).unwrap());
    }

    #[test]
    fn test_single_byte_difference_changes_digest() {
        let (_d1, p1) = write_temp(b"same bytes");
        let (_d2, p2) = write_temp(b"same byteZ");
        assert_ne!(hash_file(&p1).unwrap(), hash_file(&p2).unwrap());
    }

    #[test]
    fn test_multi_chunk_file() {
        // Spans two read chunks; digest must cover all bytes.
        let content = vec![0xAB_u8; CHUNK_SIZE + 17];
        let (_dir, path) = write_temp(&content);
        let digest = hash_file(&path).unwrap();

        let mut hasher = Sha256::new();
        hasher.update(&content);
        assert_eq!(digest, hex::encode(hasher.finalize()));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = hash_file(Utf8Path::new("/nonexistent/nope.bin")).unwrap_err();
        assert!(err.is_recoverable());
    }
}
