use std::path::Path;
use std::str::FromStr;

use md5::{Digest, Md5};
use serde::Serialize;
use sha1::Sha1;
use sha2::Sha256;
use thiserror::Error;

use crate::file::{FileError, read_file};

/// Digest algorithms the `hash` command can compute
///
/// `Blake3` and `XxHash` are only present when the matching cargo feature
/// is enabled (both are on by default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    #[cfg(feature = "blake3")]
    Blake3,
    /// XXH64 with seed 0
    #[cfg(feature = "xxhash")]
    XxHash,
}

impl HashAlgorithm {
    /// Every algorithm compiled into this build
    pub fn all() -> &'static [HashAlgorithm] {
        &[
            HashAlgorithm::Md5,
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha256,
            #[cfg(feature = "blake3")]
            HashAlgorithm::Blake3,
            #[cfg(feature = "xxhash")]
            HashAlgorithm::XxHash,
        ]
    }

    /// The lowercase tag used on the command line
    pub fn tag(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            #[cfg(feature = "blake3")]
            HashAlgorithm::Blake3 => "blake3",
            #[cfg(feature = "xxhash")]
            HashAlgorithm::XxHash => "xxhash",
        }
    }

    /// Comma-separated list of supported tags, for error messages
    pub fn supported_tags() -> String {
        Self::all()
            .iter()
            .map(|a| a.tag())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for HashAlgorithm {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|a| a.tag() == s)
            .ok_or_else(|| HashError::UnsupportedAlgorithm {
                tag: s.to_string(),
                supported: Self::supported_tags(),
            })
    }
}

/// Error types for hashing
#[derive(Debug, Error)]
pub enum HashError {
    #[error("unsupported hash type: {tag} (supported: {supported})")]
    UnsupportedAlgorithm { tag: String, supported: String },
    #[error(transparent)]
    File(#[from] FileError),
}

/// Digest a byte slice, returning lowercase hex
pub fn hash_bytes(bytes: &[u8], algorithm: HashAlgorithm) -> String {
    match algorithm {
        HashAlgorithm::Md5 => format!("{:x}", Md5::digest(bytes)),
        HashAlgorithm::Sha1 => format!("{:x}", Sha1::digest(bytes)),
        HashAlgorithm::Sha256 => format!("{:x}", Sha256::digest(bytes)),
        #[cfg(feature = "blake3")]
        HashAlgorithm::Blake3 => blake3::hash(bytes).to_hex().to_string(),
        // Big-endian rendering of the 64-bit value
        #[cfg(feature = "xxhash")]
        HashAlgorithm::XxHash => format!("{:016x}", xxhash_rust::xxh64::xxh64(bytes, 0)),
    }
}

pub fn hash_string(input: &str, algorithm: HashAlgorithm) -> String {
    hash_bytes(input.as_bytes(), algorithm)
}

/// Digest a file's full contents
///
/// The output is identical to [`hash_string`] over the same bytes.
pub fn hash_file<P: AsRef<Path>>(path: P, algorithm: HashAlgorithm) -> Result<String, HashError> {
    let file = read_file(path)?;
    tracing::debug!(path = %file.path, bytes = file.len(), %algorithm, "hashing file");
    Ok(hash_bytes(&file.bytes, algorithm))
}
