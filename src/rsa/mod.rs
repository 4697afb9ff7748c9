// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;

pub use bigint::RsaBigInt;
pub use decrypt::{decrypt_biguint, decrypt_bytes, decrypt_to_string};
pub use encrypt::{encrypt_biguint, encrypt_bytes, encrypt_string};
pub use keygen::{
    generate_default_keypair, generate_keypair, generate_prime_pair, totient, RsaKeyPair,
    RsaPrivateKey, RsaPublicKey, DEFAULT_PUBLIC_EXPONENT,
};
