// In-memory credential store
// Maps user IDs to salted digests for the lifetime of the store

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;

use super::hash::{
    generate_salt, DigestAlgorithm, PasswordDigest, PasswordHasher, Salt, DIGEST_LEN, SALT_LEN,
};
use crate::error::{CryptoError, Result};

/// Salt and digest recorded for one user
#[derive(Clone, PartialEq, Eq)]
pub struct SaltedCredential {
    salt: Salt,
    hash: PasswordDigest,
}

impl SaltedCredential {
    pub fn new(salt: Salt, hash: PasswordDigest) -> Self {
        Self { salt, hash }
    }

    /// Parse the base64 text form produced by [`Self::salt_base64`] and [`Self::hash_base64`].
    pub fn from_base64(salt: &str, hash: &str) -> Result<Self> {
        Ok(Self {
            salt: decode_fixed::<SALT_LEN>("salt", salt)?,
            hash: decode_fixed::<DIGEST_LEN>("hash", hash)?,
        })
    }

    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    pub fn hash(&self) -> &PasswordDigest {
        &self.hash
    }

    pub fn salt_base64(&self) -> String {
        STANDARD.encode(self.salt)
    }

    pub fn hash_base64(&self) -> String {
        STANDARD.encode(self.hash)
    }

    /// Recompute the digest with the stored salt and compare in constant time.
    pub fn matches(&self, hasher: &PasswordHasher, password: &str) -> bool {
        let candidate = hasher.digest(password, &self.salt);
        candidate[..].ct_eq(&self.hash[..]).into()
    }
}

impl fmt::Debug for SaltedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaltedCredential")
            .field("salt", &self.salt_base64())
            .field("hash", &self.hash_base64())
            .finish()
    }
}

/// The record format, one field per line. Credentials always hold a SHA-256 sized digest.
impl fmt::Display for SaltedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Salt = {}", self.salt_base64())?;
        write!(
            f,
            "{} Hash of (salt + password) = {}",
            DigestAlgorithm::Sha256,
            self.hash_base64()
        )
    }
}

// Checked in place of a missing record in `verify`
const PLACEHOLDER: SaltedCredential = SaltedCredential {
    salt: [0u8; SALT_LEN],
    hash: [0u8; DIGEST_LEN],
};

fn decode_fixed<const N: usize>(field: &str, text: &str) -> Result<[u8; N]> {
    let bytes = STANDARD
        .decode(text.trim())
        .map_err(|e| CryptoError::InvalidEncoding(format!("{} is not base64: {}", field, e)))?;

    let len = bytes.len();
    bytes.try_into().map_err(|_| {
        CryptoError::InvalidEncoding(format!("{} must be {} bytes, got {}", field, N, len))
    })
}

/// Explicit userID -> credential table.
///
/// Single-threaded; share it behind a `Mutex`/`RwLock` if several callers register
/// and verify concurrently.
#[derive(Debug, Default)]
pub struct CredentialStore {
    hasher: PasswordHasher,
    records: HashMap<String, SaltedCredential>,
}

impl CredentialStore {
    pub fn new(hasher: PasswordHasher) -> Self {
        Self {
            hasher,
            records: HashMap::new(),
        }
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Salt and hash `password` for `user_id`. A previous record for the same user is
    /// replaced.
    pub fn register<R>(
        &mut self,
        user_id: &str,
        password: &str,
        rng: &mut R,
    ) -> Result<&SaltedCredential>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        let salt = generate_salt(rng)?;
        let credential = SaltedCredential::new(salt, self.hasher.digest(password, &salt));
        Ok(self.insert(user_id, credential))
    }

    /// Store an existing credential, e.g. one parsed with [`SaltedCredential::from_base64`].
    pub fn insert(&mut self, user_id: &str, credential: SaltedCredential) -> &SaltedCredential {
        match self.records.entry(user_id.to_owned()) {
            Entry::Occupied(mut entry) => {
                log::debug!("replacing credential for user `{}`", user_id);
                entry.insert(credential);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(credential),
        }
    }

    /// True only if the user exists and the password matches. Unknown users go through
    /// the same digest and constant-time comparison against a placeholder record.
    pub fn verify(&self, user_id: &str, password: &str) -> bool {
        match self.records.get(user_id) {
            Some(credential) => credential.matches(&self.hasher, password),
            None => {
                std::hint::black_box(PLACEHOLDER.matches(&self.hasher, password));
                false
            }
        }
    }

    pub fn credential(&self, user_id: &str) -> Result<&SaltedCredential> {
        self.records
            .get(user_id)
            .ok_or_else(|| CryptoError::UserNotFound(user_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
