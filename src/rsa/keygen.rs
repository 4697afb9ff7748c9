// RSA Key Generation
// Implements RSA key pair generation (public and private keys)

use std::fmt;

use num_traits::One;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use super::bigint::{from_u64, gcd, mod_inverse, random_prime, RsaBigInt};
use crate::config::RsaConfig;
use crate::error::{CryptoError, Result};

/// Conventional public exponent: prime, with a small Hamming weight
pub const DEFAULT_PUBLIC_EXPONENT: u64 = 65537;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub n: RsaBigInt, // Modulus
    pub e: RsaBigInt, // Public exponent
}

/// RSA Private Key
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub n: RsaBigInt, // Modulus (same as public)
    pub d: RsaBigInt, // Private exponent
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
}

impl RsaPublicKey {
    pub fn new(n: RsaBigInt, e: RsaBigInt) -> Self {
        Self { n, e }
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Encrypt a message using this public key
    /// Returns ciphertext as bytes
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        use super::encrypt::encrypt_bytes;
        encrypt_bytes(plaintext, self)
    }
}

impl fmt::Display for RsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(e = {}, n = {})", self.e, self.n)
    }
}

impl RsaPrivateKey {
    pub fn new(n: RsaBigInt, d: RsaBigInt) -> Self {
        Self { n, d }
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Decrypt a ciphertext using this private key
    /// Returns plaintext as bytes
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        use super::decrypt::decrypt_bytes;
        decrypt_bytes(ciphertext, self)
    }
}

// d stays out of logs and panic messages
impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("n", &self.n)
            .field("d", &"<redacted>")
            .finish()
    }
}

impl RsaKeyPair {
    /// Build a key pair from two known primes and a public exponent.
    ///
    /// The primes are not checked for primality and are not retained. Fails with
    /// [`CryptoError::InvalidKey`] when `e` has no inverse modulo φ(n).
    pub fn from_primes(p: &RsaBigInt, q: &RsaBigInt, e: &RsaBigInt) -> Result<Self> {
        let two = from_u64(2);
        if p < &two || q < &two {
            return Err(CryptoError::InvalidKey(
                "primes must be at least 2".to_string(),
            ));
        }
        if p == q {
            return Err(CryptoError::InvalidKey(
                "p and q must be distinct".to_string(),
            ));
        }
        if e < &two {
            return Err(CryptoError::InvalidKey(format!(
                "public exponent {} is too small",
                e
            )));
        }

        // Step 2: Compute n = p * q
        let n = p * q;

        // Step 3: Compute φ(n) = (p-1)(q-1)
        let phi_n = totient(p, q);

        // Step 4: Verify e and φ(n) are coprime
        if !gcd(e, &phi_n).is_one() {
            return Err(CryptoError::InvalidKey(format!(
                "e={} is not coprime with φ(n)",
                e
            )));
        }

        // Step 5: Compute d = e^(-1) mod φ(n)
        let d = mod_inverse(e, &phi_n).ok_or_else(|| {
            CryptoError::InvalidKey("failed to compute modular inverse".to_string())
        })?;

        Ok(Self {
            public_key: RsaPublicKey::new(n.clone(), e.clone()),
            private_key: RsaPrivateKey::new(n, d),
        })
    }

    /// Modulus shared by both keys
    pub fn n(&self) -> &RsaBigInt {
        &self.public_key.n
    }

    pub fn e(&self) -> &RsaBigInt {
        &self.public_key.e
    }

    pub fn d(&self) -> &RsaBigInt {
        &self.private_key.d
    }

    /// Get the bit length of the key
    pub fn bit_length(&self) -> u64 {
        self.public_key.bit_length()
    }
}

/// Euler's totient of n = p * q for distinct primes p and q
pub fn totient(p: &RsaBigInt, q: &RsaBigInt) -> RsaBigInt {
    (p - 1u8) * (q - 1u8)
}

/// Draw two distinct primes of `config.prime_bits` bits each.
pub fn generate_prime_pair<R>(config: &RsaConfig, rng: &mut R) -> Result<(RsaBigInt, RsaBigInt)>
where
    R: CryptoRng + RngCore,
{
    config.validate()?;

    for attempt in 1..=config.max_attempts {
        let p = random_prime(
            config.prime_bits,
            config.primality_rounds,
            config.max_attempts,
            rng,
        )?;
        let q = random_prime(
            config.prime_bits,
            config.primality_rounds,
            config.max_attempts,
            rng,
        )?;

        if p != q {
            return Ok((p, q));
        }
        log::debug!("drew identical primes, retrying (attempt {})", attempt);
    }

    Err(CryptoError::KeyGenerationFailed {
        attempts: config.max_attempts,
    })
}

/// Generate an RSA key pair as configured.
///
/// Primes whose totient shares a factor with the public exponent are discarded and
/// fresh ones drawn, at most `config.max_attempts` times.
pub fn generate_keypair<R>(config: &RsaConfig, rng: &mut R) -> Result<RsaKeyPair>
where
    R: CryptoRng + RngCore,
{
    config.validate()?;
    let e = from_u64(config.public_exponent);

    for attempt in 1..=config.max_attempts {
        // Step 1: Generate two random primes p and q
        let (p, q) = generate_prime_pair(config, rng)?;

        if !gcd(&e, &totient(&p, &q)).is_one() {
            log::debug!(
                "e={} is not coprime with φ(n), drawing new primes (attempt {})",
                e,
                attempt
            );
            continue;
        }

        let keypair = RsaKeyPair::from_primes(&p, &q, &e)?;
        log::info!(
            "generated {}-bit RSA key pair from two {}-bit primes",
            keypair.bit_length(),
            config.prime_bits
        );
        return Ok(keypair);
    }

    Err(CryptoError::KeyGenerationFailed {
        attempts: config.max_attempts,
    })
}

/// Generate RSA key pair with default settings (two 128-bit primes, e=65537)
pub fn generate_default_keypair() -> Result<RsaKeyPair> {
    generate_keypair(&RsaConfig::default(), &mut OsRng)
}
