//! Content digesting with a chain of named algorithms.
//!
//! # Overview
//!
//! This module provides the digest algorithm registry and the streaming
//! file digester used by the refinement engine. Algorithms are selected
//! by name (the classic `md5`/`sha*` identifiers plus `blake3`); an
//! unknown name is a configuration error surfaced when the chain is
//! parsed, before any file is touched.
//!
//! Files are read in fixed 64 KiB chunks and fed incrementally into the
//! running digest state, so digesting a multi-gigabyte file never
//! requires proportional memory.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::digest::{digest_file, Algorithm};
//! use std::path::Path;
//!
//! let digest = digest_file(Path::new("/etc/hosts"), Algorithm::Sha256).unwrap();
//! assert_eq!(digest.len(), 64); // lower-case hex
//! ```

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

/// Read size for streaming digests.
///
/// 64 KiB is a multiple of every supported algorithm's internal block
/// size (64 bytes for MD5/SHA-1/SHA-256, 128 for SHA-384/512, 64 for
/// BLAKE3 chunk alignment), so no update call straddles a block.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// A named content digest algorithm.
///
/// The set mirrors the guaranteed algorithm identifiers of the
/// reference environment, extended with BLAKE3 as the fast default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// MD5 (fast, weak; useful only as a first narrowing pass)
    Md5,
    /// SHA-1
    Sha1,
    /// SHA-224
    Sha224,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// BLAKE3 (default)
    Blake3,
}

impl Algorithm {
    /// All supported algorithms, in registry order.
    pub const ALL: [Self; 7] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Blake3,
    ];

    /// Canonical lower-case name, as accepted on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Blake3 => "blake3",
        }
    }

    /// Length of the hex digest string this algorithm produces.
    #[must_use]
    pub fn hex_len(self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha1 => 40,
            Self::Sha224 => 56,
            Self::Sha256 | Self::Blake3 => 64,
            Self::Sha384 => 96,
            Self::Sha512 => 128,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha224" => Ok(Self::Sha224),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            "blake3" => Ok(Self::Blake3),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Errors in the digest chain configuration.
///
/// These are fatal and must be reported before any traversal begins.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The requested algorithm name is not in the registry.
    #[error(
        "unknown digest algorithm '{0}' (supported: md5, sha1, sha224, sha256, sha384, sha512, blake3)"
    )]
    UnknownAlgorithm(String),

    /// The algorithm chain was empty.
    #[error("digest algorithm chain must not be empty")]
    EmptyChain,
}

/// Parse an ordered list of algorithm names into a validated chain.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownAlgorithm`] for any unrecognized name
/// and [`ConfigError::EmptyChain`] for an empty list. Validation is
/// eager so that a bad chain never surfaces mid-scan.
pub fn parse_chain(names: &[String]) -> Result<Vec<Algorithm>, ConfigError> {
    if names.is_empty() {
        return Err(ConfigError::EmptyChain);
    }
    names.iter().map(|name| name.parse()).collect()
}

/// Errors that can occur while digesting a single file.
#[derive(thiserror::Error, Debug)]
pub enum DigestError {
    /// The file vanished between grouping and digesting.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when opening or reading the file.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Any other I/O failure, including mid-read errors.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl DigestError {
    fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Running digest state for one file.
///
/// One enum rather than a trait object so updates stay monomorphic.
enum DigestState {
    Md5(Md5),
    Sha1(Sha1),
    Sha224(Sha224),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
    Blake3(Box<blake3::Hasher>),
}

impl DigestState {
    fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Md5 => Self::Md5(Md5::new()),
            Algorithm::Sha1 => Self::Sha1(Sha1::new()),
            Algorithm::Sha224 => Self::Sha224(Sha224::new()),
            Algorithm::Sha256 => Self::Sha256(Sha256::new()),
            Algorithm::Sha384 => Self::Sha384(Sha384::new()),
            Algorithm::Sha512 => Self::Sha512(Sha512::new()),
            Algorithm::Blake3 => Self::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, chunk: &[u8]) {
        match self {
            Self::Md5(h) => h.update(chunk),
            Self::Sha1(h) => h.update(chunk),
            Self::Sha224(h) => h.update(chunk),
            Self::Sha256(h) => h.update(chunk),
            Self::Sha384(h) => h.update(chunk),
            Self::Sha512(h) => h.update(chunk),
            Self::Blake3(h) => {
                h.update(chunk);
            }
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            Self::Md5(h) => to_hex_lowercase(&h.finalize()),
            Self::Sha1(h) => to_hex_lowercase(&h.finalize()),
            Self::Sha224(h) => to_hex_lowercase(&h.finalize()),
            Self::Sha256(h) => to_hex_lowercase(&h.finalize()),
            Self::Sha384(h) => to_hex_lowercase(&h.finalize()),
            Self::Sha512(h) => to_hex_lowercase(&h.finalize()),
            Self::Blake3(h) => h.finalize().to_hex().to_string(),
        }
    }
}

fn to_hex_lowercase(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Compute the content digest of a file, streaming in bounded chunks.
///
/// # Arguments
///
/// * `path` - File to digest
/// * `algorithm` - Which algorithm to run
///
/// # Errors
///
/// Returns [`DigestError`] if the file cannot be opened or a read
/// fails part-way through. Callers are expected to drop the file from
/// the current group rather than abort the run.
pub fn digest_file(path: &Path, algorithm: Algorithm) -> Result<String, DigestError> {
    let mut file = File::open(path).map_err(|e| DigestError::from_io(path, e))?;
    let mut state = DigestState::new(algorithm);
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = file
            .read(&mut buf)
            .map_err(|e| DigestError::from_io(path, e))?;
        if n == 0 {
            break;
        }
        state.update(&buf[..n]);
    }

    Ok(state.finalize_hex())
}
