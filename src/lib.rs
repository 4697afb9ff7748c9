//! Textbook RSA built from modular arithmetic, plus salted SHA-256 password hashing.
//!
//! Both halves are teaching material: no padding, no constant-time arithmetic and
//! undersized default keys. Do not use them to protect real data.

pub mod config;
pub mod error;
pub mod password;
pub mod rsa;
pub mod ui;

pub use error::{CryptoError, Result};
