// Error types shared by the RSA and password-hashing modules

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    #[error("key generation failed after {attempts} attempts")]
    KeyGenerationFailed { attempts: usize },

    #[error("message too large: {message_bits}-bit message does not fit a {modulus_bits}-bit modulus")]
    MessageTooLarge { message_bits: u64, modulus_bits: u64 },

    #[error("ciphertext is not smaller than the modulus")]
    CiphertextOutOfRange,

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("unsupported digest algorithm `{0}`")]
    UnsupportedDigestAlgorithm(String),

    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("cannot find user record `{0}`")]
    UserNotFound(String),
}

impl From<rand::Error> for CryptoError {
    fn from(e: rand::Error) -> Self {
        CryptoError::RandomnessUnavailable(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CryptoError>;
