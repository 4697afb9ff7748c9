// Password Module
// Salted SHA-256 hashing and an explicit credential store

pub mod hash;
pub mod store;

pub use hash::{
    generate_salt, hash_password, DigestAlgorithm, PasswordDigest, PasswordHasher, Salt,
    DIGEST_LEN, SALT_LEN,
};
pub use store::{CredentialStore, SaltedCredential};
