// Salted password digests
// digest = H(salt || password)

use std::fmt;
use std::str::FromStr;

use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};

use crate::error::{CryptoError, Result};

/// Salt length in bytes
pub const SALT_LEN: usize = 32;

/// SHA-256 output length in bytes
pub const DIGEST_LEN: usize = 32;

pub type Salt = [u8; SALT_LEN];
pub type PasswordDigest = [u8; DIGEST_LEN];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha256,
}

impl DigestAlgorithm {
    pub const fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "SHA-256",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = CryptoError;

    /// Accepts `SHA-256`, `sha256`, `SHA_256`.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        match normalized.as_str() {
            "SHA256" => Ok(DigestAlgorithm::Sha256),
            _ => Err(CryptoError::UnsupportedDigestAlgorithm(s.to_string())),
        }
    }
}

/// SHA-256(salt || password)
pub fn hash_password(password: &str, salt: &[u8]) -> PasswordDigest {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

/// Draw a fresh salt from a cryptographically secure source.
pub fn generate_salt<R: CryptoRng + RngCore + ?Sized>(rng: &mut R) -> Result<Salt> {
    let mut salt = [0u8; SALT_LEN];
    rng.try_fill_bytes(&mut salt)?;
    Ok(salt)
}

/// Digest selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    algorithm: DigestAlgorithm,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::with_algorithm(DigestAlgorithm::Sha256)
    }
}

impl PasswordHasher {
    /// Fails with [`CryptoError::UnsupportedDigestAlgorithm`] for unknown names.
    pub fn new(algorithm: &str) -> Result<Self> {
        algorithm.parse().map(Self::with_algorithm)
    }

    pub const fn with_algorithm(algorithm: DigestAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn digest(&self, password: &str, salt: &[u8]) -> PasswordDigest {
        match self.algorithm {
            DigestAlgorithm::Sha256 => hash_password(password, salt),
        }
    }
}
