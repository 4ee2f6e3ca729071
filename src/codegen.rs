//! Short code generation
//!
//! Two strategies are available: uniformly random alphanumeric codes, and
//! codes derived from a SHA-256 digest of the destination URL. Neither
//! guarantees uniqueness; the registry checks every candidate and retries.

use rand::distr::{Alphanumeric, Distribution};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;

/// Length of generated codes unless configured otherwise
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Number of candidates tried before giving up on generation
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Length of codes derived from URL content
pub const CONTENT_CODE_LENGTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeStrategy {
    #[default]
    Random,
    Content,
}

/// Generate a random code of `length` characters from `[A-Za-z0-9]`
pub fn generate_random(length: usize) -> String {
    Alphanumeric
        .sample_iter(rand::rng())
        .take(length)
        .map(char::from)
        .collect()
}

/// Derive a code from the URL bytes. Pure: the same URL always yields the
/// same 6 lowercase hex characters.
pub fn generate_from_content(url: &str) -> String {
    hex_prefix(&Sha256::digest(url.as_bytes()), CONTENT_CODE_LENGTH)
}

fn generate_from_content_salted(url: &str, salt: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hasher.update(salt.to_le_bytes());
    hex_prefix(&hasher.finalize(), CONTENT_CODE_LENGTH)
}

fn hex_prefix(digest: &[u8], len: usize) -> String {
    let mut out = String::with_capacity(len + 1);
    for byte in digest {
        if out.len() >= len {
            break;
        }
        let _ = write!(out, "{byte:02x}");
    }
    out.truncate(len);
    out
}

/// Produces candidate codes for the registry according to a strategy
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    strategy: CodeStrategy,
    length: usize,
    max_attempts: usize,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(CodeStrategy::Random, DEFAULT_CODE_LENGTH, DEFAULT_MAX_ATTEMPTS)
    }
}

impl CodeGenerator {
    pub fn new(strategy: CodeStrategy, length: usize, max_attempts: usize) -> Self {
        Self {
            strategy,
            length,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Candidate for the given zero-based attempt.
    ///
    /// The content strategy salts every attempt after the first so that a
    /// collision does not keep producing the same candidate.
    pub fn candidate(&self, url: &str, attempt: usize) -> String {
        match self.strategy {
            CodeStrategy::Random => generate_random(self.length),
            CodeStrategy::Content if attempt == 0 => generate_from_content(url),
            CodeStrategy::Content => generate_from_content_salted(url, attempt),
        }
    }
}
